use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::HostCryptoProvider;
use crate::errors::{PassportError, Result};

/// User-level configuration, loaded from `<config dir>/settings.toml`.
///
/// Every field has a sensible default so Passport works out-of-the-box
/// without any settings file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the store document inside the config directory.
    #[serde(default = "default_store_file")]
    pub store_file: String,

    /// Whether `secrets add` encrypts unless `--plain-text` is given.
    #[serde(default = "default_encrypt")]
    pub encrypt_by_default: bool,

    /// File holding the machine identifier, for hosts where the
    /// platform does not provide one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_id_file: Option<PathBuf>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_store_file() -> String {
    "config.yaml".to_string()
}

fn default_encrypt() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_file: default_store_file(),
            encrypt_by_default: default_encrypt(),
            machine_id_file: None,
        }
    }
}

impl Settings {
    /// Name of the settings file inside the config directory.
    const FILE_NAME: &'static str = "settings.toml";

    /// Load settings from `<config_dir>/settings.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let settings_path = config_dir.join(Self::FILE_NAME);

        if !settings_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&settings_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassportError::ConfigError(format!(
                "Failed to parse {}: {e}",
                settings_path.display()
            ))
        })?;

        if settings.store_file.trim().is_empty() {
            return Err(PassportError::ConfigError(
                "store_file cannot be empty".into(),
            ));
        }

        Ok(settings)
    }

    /// Full path to the store document.
    ///
    /// Example: `~/.config/.passport/config.yaml`
    pub fn store_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.store_file)
    }

    /// Build the crypto provider these settings call for.
    ///
    /// A relative `machine_id_file` is resolved against the config dir.
    pub fn crypto_provider(&self, config_dir: &Path) -> HostCryptoProvider {
        match &self.machine_id_file {
            Some(path) => HostCryptoProvider::from_file(config_dir.join(path)),
            None => HostCryptoProvider::new(),
        }
    }
}

/// Default config directory: `<user config dir>/.passport`.
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(".passport"))
        .ok_or_else(|| {
            PassportError::ConfigError(
                "cannot determine the user config directory (use --config-dir)".into(),
            )
        })
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::CryptoProvider;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.store_file, "config.yaml");
        assert!(s.encrypt_by_default);
        assert!(s.machine_id_file.is_none());
    }

    #[test]
    fn load_returns_defaults_when_no_settings_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.store_file, "config.yaml");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
store_file = "passport.yaml"
encrypt_by_default = false
machine_id_file = "/etc/my-host-id"
"#;
        fs::write(tmp.path().join("settings.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.store_file, "passport.yaml");
        assert!(!settings.encrypt_by_default);
        assert_eq!(
            settings.machine_id_file,
            Some(PathBuf::from("/etc/my-host-id"))
        );
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("settings.toml"), "encrypt_by_default = false\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert!(!settings.encrypt_by_default);
        assert_eq!(settings.store_file, "config.yaml");
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("settings.toml"), "not valid {{toml").unwrap();

        assert!(matches!(
            Settings::load(tmp.path()),
            Err(PassportError::ConfigError(_))
        ));
    }

    #[test]
    fn load_rejects_blank_store_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("settings.toml"), "store_file = \" \"\n").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn store_path_joins_config_dir() {
        let s = Settings::default();
        let dir = Path::new("/home/user/.config/.passport");
        assert_eq!(
            s.store_path(dir),
            PathBuf::from("/home/user/.config/.passport/config.yaml")
        );
    }

    #[test]
    fn relative_machine_id_file_resolves_against_config_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("host-id"), "abc123\n").unwrap();

        let settings = Settings {
            machine_id_file: Some(PathBuf::from("host-id")),
            ..Settings::default()
        };
        let crypto = settings.crypto_provider(tmp.path());

        let sealed = crypto.encrypt_string("v").unwrap();
        let same_host = crate::crypto::HostCryptoProvider::with_machine_id("abc123");
        assert_eq!(same_host.decrypt_string(&sealed).unwrap(), "v");
    }
}
