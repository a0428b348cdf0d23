use std::path::Path;
use std::time::Duration;

use docfresh_verify::DEFAULT_CHUNK_SIZE;
use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Settings for the update flow.
///
/// Every field has a default, so a TOML file only needs to list overrides:
///
/// ```toml
/// index_url = "https://updates.example/index.txt"
/// index_timeout_secs = 4
/// cache_prefix = "latest_"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Where the fingerprint→location index is published.
    pub index_url: String,

    #[serde(rename = "index_timeout_secs", with = "secs")]
    pub index_timeout: Duration,

    #[serde(rename = "connect_timeout_secs", with = "secs")]
    pub connect_timeout: Duration,

    #[serde(rename = "read_timeout_secs", with = "secs")]
    pub read_timeout: Duration,

    pub hash_chunk_size: usize,

    pub cache_prefix: String,

    pub cache_extension: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            index_url:       "https://pastebin.com/raw/MR1G7jvS".to_string(),
            index_timeout:   Duration::from_secs(6),
            connect_timeout: Duration::from_secs(10),
            read_timeout:    Duration::from_secs(10),
            hash_chunk_size: DEFAULT_CHUNK_SIZE,
            cache_prefix:    "cached_".to_string(),
            cache_extension: "pdf".to_string(),
        }
    }
}

impl FlowConfig {
    /// Load overrides from a TOML file on top of the defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::extract(Figment::from(Serialized::defaults(Self::default())).merge(Toml::file(path)))
    }

    /// Load overrides from TOML text on top of the defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::extract(Figment::from(Serialized::defaults(Self::default())).merge(Toml::string(toml)))
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.index_url.trim().is_empty() {
            return Err(Error::InvalidConfig("index_url must not be empty"));
        }
        if self.hash_chunk_size == 0 {
            return Err(Error::InvalidConfig("hash_chunk_size must be greater than zero"));
        }
        if self.cache_extension.is_empty() || self.cache_extension.contains(['/', '\\']) {
            return Err(Error::InvalidConfig("cache_extension must be a plain file extension"));
        }
        if self.cache_prefix.contains(['/', '\\']) {
            return Err(Error::InvalidConfig("cache_prefix must not contain path separators"));
        }
        Ok(())
    }

    #[must_use]
    pub fn index_url(mut self, index_url: impl Into<String>) -> Self {
        self.index_url = index_url.into();
        self
    }

    #[must_use]
    pub fn index_timeout(mut self, index_timeout: Duration) -> Self {
        self.index_timeout = index_timeout;
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    #[must_use]
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = read_timeout;
        self
    }

    #[must_use]
    pub fn hash_chunk_size(mut self, hash_chunk_size: usize) -> Self {
        self.hash_chunk_size = hash_chunk_size;
        self
    }
}

/// Durations as (fractional) seconds.
mod secs {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = FlowConfig::default();
        assert_eq!(config.index_timeout, Duration::from_secs(6));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.hash_chunk_size, 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(FlowConfig::from_toml_str("").unwrap(), FlowConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = FlowConfig::from_toml_str(
            r#"
            index_url = "https://updates.example/index.txt"
            index_timeout_secs = 2.5
            read_timeout_secs = 30
            cache_prefix = "latest_"
            "#,
        )
        .unwrap();

        assert_eq!(config.index_url, "https://updates.example/index.txt");
        assert_eq!(config.index_timeout, Duration::from_millis(2500));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert_eq!(config.cache_prefix, "latest_");
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_negative_duration_rejected() {
        let result = FlowConfig::from_toml_str("index_timeout_secs = -1");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            FlowConfig::from_toml_str("hash_chunk_size = 0"),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            FlowConfig::from_toml_str("cache_extension = \"../pdf\""),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            FlowConfig::from_toml_str("index_url = \"  \""),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("docfresh.toml");
        std::fs::write(&path, "hash_chunk_size = 4096\ncache_extension = \"bin\"\n").unwrap();

        let config = FlowConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.hash_chunk_size, 4096);
        assert_eq!(config.cache_extension, "bin");
    }

    #[test]
    fn test_builder() {
        let config = FlowConfig::default()
            .index_url("https://idx.example")
            .index_timeout(Duration::from_millis(50))
            .hash_chunk_size(16);
        assert_eq!(config.index_url, "https://idx.example");
        assert_eq!(config.index_timeout, Duration::from_millis(50));
        assert_eq!(config.hash_chunk_size, 16);
    }
}
