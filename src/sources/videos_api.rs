use crate::config::Config;
use crate::mirror::{Failure, Mirror, MirrorPool, Rotation};
use crate::result::Result;
use crate::sources::{Extract, VideoEntry};

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

#[derive(Debug, PartialEq)]
pub enum Fetched {
    Video(VideoEntry),
    Failed { body: String, reason: String },
}

#[derive(Debug, Default, PartialEq)]
pub struct Resolution {
    pub results: Vec<VideoEntry>,
    pub failures: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub enum VideosOutcome {
    Completed(Resolution),
    /// Every mirror hit the error threshold; holds whatever was gathered before that.
    MirrorsExhausted(Resolution),
}

#[derive(Debug, Clone)]
pub struct VideosAPI<'a> {
    config: &'a Config,
    client: &'a reqwest::Client,
    video_ids: Vec<String>,
}

impl VideosAPI<'_> {
    pub fn new<'a>(
        config: &'a Config,
        client: &'a reqwest::Client,
        video_ids: Vec<String>,
    ) -> VideosAPI<'a> {
        VideosAPI {
            config,
            client,
            video_ids,
        }
    }

    pub async fn fetch(&self, mirror: &Mirror, video_id: &str) -> Fetched {
        let url = mirror.endpoint(&format!("/api/v1/videos/{}", video_id));
        let mut builder = self.client.get(url);
        if let Some(timeout) = self.config.mirrors.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let res = match builder.send().await {
            Ok(res) => res,
            Err(err) => {
                return Fetched::Failed {
                    body: String::new(),
                    reason: err.to_string(),
                }
            }
        };

        let status = res.status();
        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => {
                return Fetched::Failed {
                    body: String::new(),
                    reason: err.to_string(),
                }
            }
        };

        if !status.is_success() || body.is_empty() {
            return Fetched::Failed {
                body,
                reason: format!("HTTP {}", status.as_u16()),
            };
        }

        match serde_json::from_str::<VideoEntry>(&body) {
            Ok(video) => Fetched::Video(video),
            Err(err) => Fetched::Failed {
                reason: format!("JSON error: {}", err),
                body,
            },
        }
    }

    /// Resolves every id once, against whichever mirror is active when it is reached.
    pub async fn resolve(&self, pool: &mut MirrorPool) -> VideosOutcome {
        let mut resolution = Resolution::default();

        for (index, video_id) in self.video_ids.iter().enumerate() {
            let (failure, reason) = match self.fetch(pool.current(), video_id).await {
                Fetched::Video(video) => {
                    info!("({}) {} => {} by {}", index, video_id, video.title, video.author);
                    resolution.results.push(video);
                    continue;
                }
                Fetched::Failed { body, reason } => (Failure::classify(&body), reason),
            };

            warn!("({}) {} => failed to fetch: {}", index, video_id, reason);
            resolution.failures.push(video_id.to_owned());

            match pool.record_failure(failure) {
                Rotation::Stay => debug!(
                    "{} errors against {}",
                    pool.error_count(),
                    pool.current().uri
                ),
                Rotation::Rotated { from } => {
                    warn!(
                        "Too many errors {}, switching to {} ({} left)",
                        from.uri,
                        pool.current().uri,
                        pool.remaining()
                    );
                }
                Rotation::Exhausted => {
                    error!("Out of working API instances");
                    return VideosOutcome::MirrorsExhausted(resolution);
                }
            }
        }

        VideosOutcome::Completed(resolution)
    }
}

#[async_trait]
impl Extract for VideosAPI<'_> {
    type Data = VideosOutcome;

    async fn extract(&self, mirrors: Vec<Mirror>) -> Result<Self::Data> {
        let mut pool = MirrorPool::new(mirrors, self.config.mirrors.error_threshold)?;

        Ok(self.resolve(&mut pool).await)
    }
}
