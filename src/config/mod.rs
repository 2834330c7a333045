//! User settings and config directory resolution.

pub mod settings;

pub use settings::{default_config_dir, Settings};
