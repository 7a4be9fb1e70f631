//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/frabsched/config.toml` by default:
//!
//! ```toml
//! timeout = 30
//!
//! [[sources]]
//! group = "fosdem"
//! url = "https://fosdem.org/2024/schedule/xml"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

/// Configuration for the frabsched client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// Schedules fetched by `frabsched sources`.
    pub sources: Vec<SourceSettings>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debug: false,
            timeout: frabsched_fetch::FetchConfig::DEFAULT_TIMEOUT_SECS,
            sources: Vec::new(),
        }
    }
}

/// One named schedule URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Group label stamped on every record from this source.
    pub group: String,

    /// Frab schedule XML URL.
    pub url: String,
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it is absent.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("failed to read config: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("failed to parse config: {}", e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("frabsched")
    }

    /// Checks that every source has a group and a valid URL, and that groups
    /// are unique.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than zero".to_string());
        }

        let mut seen = HashSet::new();
        for (index, source) in self.sources.iter().enumerate() {
            if source.group.trim().is_empty() {
                return Err(format!("sources[{}]: group must not be empty", index));
            }
            Url::parse(&source.url)
                .map_err(|e| format!("sources[{}] ({}): invalid url: {}", index, source.group, e))?;
            if !seen.insert(source.group.as_str()) {
                return Err(format!("duplicate source group {:?}", source.group));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert!(!config.debug);
        assert_eq!(config.timeout, 30);
        assert!(config.sources.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_sources() {
        let config: ClientConfig = toml::from_str(
            r#"
            timeout = 10

            [[sources]]
            group = "fosdem"
            url = "https://fosdem.org/2024/schedule/xml"

            [[sources]]
            group = "ccc"
            url = "https://fahrplan.events.ccc.de/schedule.xml"
            "#,
        )
        .unwrap();

        assert_eq!(config.timeout, 10);
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[1].group, "ccc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: ClientConfig = toml::from_str("debug = true").unwrap();
        assert!(config.debug);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn validate_rejects_bad_sources() {
        let mut config = ClientConfig::default();
        config.sources.push(SourceSettings {
            group: "a".to_string(),
            url: "not a url".to_string(),
        });
        assert!(config.validate().unwrap_err().contains("invalid url"));

        config.sources[0].url = "https://example.org/a.xml".to_string();
        config.sources.push(SourceSettings {
            group: "a".to_string(),
            url: "https://example.org/b.xml".to_string(),
        });
        assert!(config.validate().unwrap_err().contains("duplicate"));

        config.sources[1].group = " ".to_string();
        assert!(config.validate().unwrap_err().contains("group must not be empty"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = ClientConfig {
            timeout: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[sources]]\ngroup = \"demo\"\nurl = \"https://example.org/s.xml\""
        )
        .unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.sources[0].group, "demo");
    }

    #[test]
    fn load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sources = 3").unwrap();

        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(err.contains("failed to parse config"));
    }
}
