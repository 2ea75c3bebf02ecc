//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fs::paths::default_output_dir;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Browser user agent string sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Download behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Whether to show download progress bars.
    #[serde(default = "default_true")]
    pub show_downloads: bool,

    /// Politeness delay between entry downloads, lower bound (ms).
    #[serde(default = "default_delay_min")]
    pub download_delay_min_ms: u64,

    /// Politeness delay between entry downloads, upper bound (ms).
    #[serde(default = "default_delay_max")]
    pub download_delay_max_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            show_downloads: true,
            download_delay_min_ms: default_delay_min(),
            download_delay_max_ms: default_delay_max(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// The effective output directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(default_output_dir)
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        .to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_delay_min() -> u64 {
    400
}

fn default_delay_max() -> u64 {
    750
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.network.user_agent.starts_with("Mozilla/5.0"));
        assert_eq!(config.network.connect_timeout_secs, 10);
        assert!(config.options.show_downloads);
        assert_eq!(config.download_directory(), PathBuf::from("./downloads"));
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[options]
download_directory = "/tmp/media"
show_downloads = false
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.download_directory(), PathBuf::from("/tmp/media"));
        assert!(!config.options.show_downloads);
        // Unspecified sections fall back to defaults.
        assert_eq!(config.network.request_timeout_secs, 60);
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not = [valid").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
