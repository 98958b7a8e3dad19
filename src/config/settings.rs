use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PasskeepError, Result};

/// Project-level configuration, loaded from `.passkeep.toml`.
///
/// Every field has a sensible default so passkeep works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Namespace string whose bytes scope the key wrapping and determine
    /// the store filename.  Give each application its own value so
    /// vaults never collide.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Directory where store and key files live.  Defaults to the
    /// per-user local data directory (`~/.local/share/passkeep` style).
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Argon2 memory cost in KiB (default: 64 MB).
    #[serde(default = "default_argon2_memory_kib")]
    pub argon2_memory_kib: u32,

    /// Argon2 iteration count (default: 3).
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,

    /// Argon2 parallelism degree (default: 4).
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_namespace() -> String {
    "passkeep".to_string()
}

fn default_argon2_memory_kib() -> u32 {
    65_536 // 64 MB
}

fn default_argon2_iterations() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            data_dir: None,
            argon2_memory_kib: default_argon2_memory_kib(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passkeep.toml";

    /// Load settings from `<project_dir>/.passkeep.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PasskeepError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.namespace.is_empty() {
            return Err(PasskeepError::ConfigError(
                "namespace cannot be empty".into(),
            ));
        }

        Ok(settings)
    }

    /// The namespace entropy that scopes key wrapping and file identity.
    pub fn entropy(&self) -> &[u8] {
        self.namespace.as_bytes()
    }

    /// Resolve the data directory: explicit setting, else the per-user
    /// local data directory, else the working directory.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("passkeep"),
        }
    }

    /// Convert the Argon2 settings into crypto-layer params.
    pub fn argon2_params(&self) -> crate::crypto::kdf::Argon2Params {
        crate::crypto::kdf::Argon2Params {
            memory_kib: self.argon2_memory_kib,
            iterations: self.argon2_iterations,
            parallelism: self.argon2_parallelism,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(s.namespace, "passkeep");
        assert!(s.data_dir.is_none());
        assert_eq!(s.argon2_memory_kib, 65_536);
        assert_eq!(s.argon2_iterations, 3);
        assert_eq!(s.argon2_parallelism, 4);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.namespace, "passkeep");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
namespace = "my-app"
data_dir = "/var/lib/my-app"
argon2_memory_kib = 131072
argon2_iterations = 5
argon2_parallelism = 8
"#;
        fs::write(tmp.path().join(".passkeep.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.namespace, "my-app");
        assert_eq!(settings.data_dir.as_deref(), Some("/var/lib/my-app"));
        assert_eq!(settings.argon2_memory_kib, 131_072);
        assert_eq!(settings.argon2_iterations, 5);
        assert_eq!(settings.argon2_parallelism, 8);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let config = "namespace = \"other\"\n";
        fs::write(tmp.path().join(".passkeep.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.namespace, "other");
        // Rest should be defaults
        assert!(settings.data_dir.is_none());
        assert_eq!(settings.argon2_iterations, 3);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passkeep.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(result.is_err());
    }

    #[test]
    fn load_rejects_empty_namespace() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passkeep.toml"), "namespace = \"\"\n").unwrap();

        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn explicit_data_dir_wins() {
        let s = Settings {
            data_dir: Some("/opt/pk".to_string()),
            ..Settings::default()
        };
        assert_eq!(s.data_dir(), PathBuf::from("/opt/pk"));
    }
}
