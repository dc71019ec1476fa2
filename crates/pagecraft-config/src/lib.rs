use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_PUBLIC_BASE_URL: &str = "https://pagecraft.example/public";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Open every page display-only
    #[serde(default)]
    pub read_only: bool,
    /// Prefix for generated public links
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Optional TOML file replacing the demo pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages_path: Option<PathBuf>,
}

fn default_public_base_url() -> String {
    DEFAULT_PUBLIC_BASE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_only: false,
            public_base_url: default_public_base_url(),
            pages_path: None,
        }
    }
}

impl Config {
    /// Read the config at `config_path`; `Ok(None)` when there is no such file
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        if let Some(pages_path) = config.pages_path.take() {
            let expanded = Self::expand_path(&pages_path).unwrap_or_else(|| {
                log::warn!("Could not expand pages path {}", pages_path.display());
                pages_path
            });
            config.pages_path = Some(expanded);
        }

        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loaded config, or the defaults when no config file exists
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    /// `~/.config/pagecraft/config.toml` with the home directory expanded
    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/pagecraft");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Tilde and `$VAR` expansion; `None` when a variable is unset
    fn expand_path(path: &Path) -> Option<PathBuf> {
        shellexpand::full(&path.to_string_lossy())
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/pagecraft/config.toml"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_read_only_alone_keeps_default_base_url() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "read_only = true\n").unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert!(config.read_only);
        assert_eq!(config.public_base_url, DEFAULT_PUBLIC_BASE_URL);
        assert_eq!(config.pages_path, None);
    }

    #[test]
    fn test_saved_config_omits_unset_pages_path() {
        let toml_str = toml::to_string(&Config::default()).unwrap();
        assert!(toml_str.contains("read_only = false"));
        assert!(!toml_str.contains("pages_path"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            read_only: true,
            public_base_url: "https://notes.example/p".to_string(),
            pages_path: Some(PathBuf::from("/tmp/pages.toml")),
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(Config::expand_path(&path).unwrap(), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "read_only = \"sometimes\"").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            read_only: true,
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_pages_path_env_var_is_expanded() {
        unsafe {
            env::set_var("PAGECRAFT_TEST_ROOT", "/custom/notes");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "pages_path = \"$PAGECRAFT_TEST_ROOT/pages.toml\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();
        assert_eq!(
            config.pages_path,
            Some(PathBuf::from("/custom/notes/pages.toml"))
        );
        assert_eq!(config.public_base_url, DEFAULT_PUBLIC_BASE_URL);

        unsafe {
            env::remove_var("PAGECRAFT_TEST_ROOT");
        }
    }
}
