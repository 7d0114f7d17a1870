use crate::config::Config;
use crate::error::ResolverError;
use crate::mirror::Mirror;
use crate::result::Result;

use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info};

type Json = serde_json::Value;

#[derive(Debug, Deserialize)]
struct Instance {
    api: Option<bool>,
    #[serde(rename = "type")]
    kind: String,
    uri: String,
}

impl Instance {
    fn is_candidate(&self) -> bool {
        self.api == Some(true) && self.kind == "https"
    }
}

#[derive(Debug, Clone)]
pub struct InstancesAPI<'a> {
    config: &'a Config,
    client: &'a reqwest::Client,
}

impl InstancesAPI<'_> {
    pub fn new<'a>(config: &'a Config, client: &'a reqwest::Client) -> InstancesAPI<'a> {
        InstancesAPI { config, client }
    }

    async fn fetch_instances(&self) -> Result<Vec<(String, Instance)>> {
        let instances = &self.config.instances;
        // `sort_by` goes out verbatim; the directory expects a literal comma.
        let url = format!("{}?sort_by={}", instances.url, instances.sort_by);

        let res = self
            .client
            .get(url)
            .timeout(instances.timeout())
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(ResolverError::Directory {
                status: status.as_u16(),
                body,
            });
        }

        let entries: Vec<(String, Json)> = serde_json::from_str(&body)
            .map_err(|err| ResolverError::DirectoryFormat(err.to_string()))?;

        let instances = entries
            .into_iter()
            .filter_map(|(name, entry)| match serde_json::from_value::<Instance>(entry) {
                Ok(instance) => Some((name, instance)),
                Err(err) => {
                    debug!("Dropping malformed instance {}: {}", name, err);
                    None
                }
            })
            .collect();

        Ok(instances)
    }

    async fn probe(&self, uri: &str) -> Option<Mirror> {
        let mut builder = self.client.get(uri);
        if let Some(timeout) = self.config.instances.probe_timeout() {
            builder = builder.timeout(timeout);
        }

        let start = Instant::now();
        let res = match builder.send().await {
            Ok(res) => res,
            Err(err) => {
                debug!("Probe failed for {}: {}", uri, err);
                return None;
            }
        };
        let elapsed = start.elapsed();

        if !res.status().is_success() {
            debug!("Probe of {} returned {}", uri, res.status());
            return None;
        }

        Some(Mirror {
            uri: uri.to_owned(),
            latency_ms: elapsed.as_secs_f64() * 1000.0,
        })
    }

    /// Lists reachable API mirrors, fastest first.
    pub async fn discover(&self) -> Result<Vec<Mirror>> {
        let instances = self.fetch_instances().await?;

        let mut mirrors = Vec::new();
        for (name, instance) in instances {
            if !instance.is_candidate() {
                debug!("Skipping instance {}", name);
                continue;
            }

            if let Some(mirror) = self.probe(&instance.uri).await {
                info!("Found {} ({:.0} ms)", mirror.uri, mirror.latency_ms);
                mirrors.push(mirror);
            }
        }

        mirrors.sort_by(|a, b| a.latency_ms.total_cmp(&b.latency_ms));

        Ok(mirrors)
    }
}
