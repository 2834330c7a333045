//! Cryptographic primitives for Passport.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - Machine-identity key derivation (`machine`)
//! - The `CryptoProvider` trait and its host-bound implementation (`provider`)

pub mod encryption;
pub mod machine;
pub mod provider;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{CryptoProvider, HostCryptoProvider};
pub use encryption::{decrypt, encrypt};
pub use machine::{derive_key, MachineIdSource};
pub use provider::{CryptoProvider, HostCryptoProvider};
