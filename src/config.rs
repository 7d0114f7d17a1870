use crate::result::Result;

use serde::Deserialize;
use std::{fs, path::Path, time::Duration};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InstancesConfig {
    pub url: String,
    pub sort_by: String,
    pub timeout_secs: u64,
    pub probe_timeout_secs: Option<u64>,
}

impl Default for InstancesConfig {
    fn default() -> InstancesConfig {
        InstancesConfig {
            url: "https://api.invidious.io/instances.json".to_owned(),
            sort_by: "type,users".to_owned(),
            timeout_secs: 5,
            probe_timeout_secs: None,
        }
    }
}

impl InstancesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MirrorsConfig {
    pub error_threshold: usize,
    pub request_timeout_secs: Option<u64>,
}

impl Default for MirrorsConfig {
    fn default() -> MirrorsConfig {
        MirrorsConfig {
            error_threshold: 3,
            request_timeout_secs: None,
        }
    }
}

impl MirrorsConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub results_path: String,
    pub fails_path: String,
}

impl Default for OutputConfig {
    fn default() -> OutputConfig {
        OutputConfig {
            results_path: "results.json".to_owned(),
            fails_path: "fails.csv".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub instances: InstancesConfig,
    pub mirrors: MirrorsConfig,
    pub output: OutputConfig,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Config> {
        let config = fs::read_to_string(filename)?;
        let config: Config = toml::from_str(&config)?;
        Ok(config)
    }

    /// Loads `filename` when given, otherwise falls back to the built-in defaults.
    pub fn load<P: AsRef<Path>>(filename: Option<P>) -> Result<Config> {
        match filename {
            Some(filename) => Self::from_file(filename),
            None => Ok(Config::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let config = Config::from_file("config/config.toml").unwrap();
        assert_eq!(
            config.instances.url,
            "https://api.invidious.io/instances.json"
        );
        assert_eq!(config.instances.sort_by, "type,users");
        assert_eq!(config.instances.timeout_secs, 5);
        assert_eq!(config.mirrors.error_threshold, 3);
        assert_eq!(config.output.results_path, "results.json");
        assert_eq!(config.output.fails_path, "fails.csv");
    }

    #[test]
    fn test_from_file_failure() {
        assert!(Config::from_file("should_fail.toml").is_err());
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            [mirrors]
            request_timeout_secs = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.mirrors.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.mirrors.error_threshold, 3);
        assert_eq!(config.instances.timeout(), Duration::from_secs(5));
        assert_eq!(config.instances.probe_timeout(), None);
    }

    #[test]
    fn test_malformed_file() {
        assert!(toml::from_str::<Config>("[mirrors]\nerror_threshold = \"three\"").is_err());
    }

    #[test]
    fn test_load_default() {
        let config = Config::load(None::<&str>).unwrap();
        assert_eq!(config.instances.sort_by, "type,users");
        assert_eq!(config.mirrors.request_timeout(), None);
        assert_eq!(config.output.results_path, "results.json");
    }
}
