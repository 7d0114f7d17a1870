#[cfg(test)]
pub mod helpers {
    use crate::config::{Config, OutputConfig};
    use crate::mirror::Mirror;

    use serde_json::{json, Value};
    use std::path::Path;
    use wiremock::MockServer;

    /// Defaults, but with the instance directory served by `directory`.
    pub fn config_for(directory: &MockServer) -> Config {
        let mut config = Config::default();
        config.instances.url = format!("{}/instances.json", directory.uri());
        config
    }

    pub fn output_in(dir: &Path) -> OutputConfig {
        OutputConfig {
            results_path: dir.join("results.json").display().to_string(),
            fails_path: dir.join("fails.csv").display().to_string(),
        }
    }

    pub fn directory_entry(name: &str, api: bool, kind: &str, uri: &str) -> Value {
        json!([
            name,
            {
                "flag": "US",
                "region": "US",
                "api": api,
                "cors": true,
                "type": kind,
                "uri": uri,
                "monitor": null,
            }
        ])
    }

    pub fn mirror_of(server: &MockServer) -> Mirror {
        Mirror {
            uri: server.uri(),
            latency_ms: 0.0,
        }
    }
}
