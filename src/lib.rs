mod config;
mod error;
pub mod logging;
mod mirror;
mod options;
mod result;
mod sources;
mod store;
mod test;

pub use config::Config;
pub use error::ResolverError;
pub use mirror::Mirror;
pub use options::{Cli, Input};
pub use result::Result;
pub use sources::playlist_api::MirrorError;
pub use sources::VideoEntry;

use sources::instances_api::InstancesAPI;
use sources::playlist_api::{PlaylistAPI, PlaylistOutcome};
use sources::videos_api::{Resolution, VideosAPI, VideosOutcome};
use sources::{videos_csv, Extract};
use store::Store;

use tracing::{debug, info, warn};

#[derive(Debug, PartialEq)]
pub enum Report {
    Videos { results: usize, failures: usize },
    /// Results were saved, but the run stopped early.
    MirrorsExhausted { results: usize, failures: usize },
    Playlist { videos: usize },
    PlaylistNotFound,
    PlaylistUnavailable(Vec<MirrorError>),
}

impl Report {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Report::Videos { .. } | Report::Playlist { .. } | Report::PlaylistNotFound
        )
    }
}

pub struct Resolver {
    config: Config,
    client: reqwest::Client,
    store: Store,
}

impl Resolver {
    pub fn new(config: Config) -> Result<Resolver> {
        let client = reqwest::Client::builder().build()?;
        let store = Store::new(&config.output);

        Ok(Resolver {
            config,
            client,
            store,
        })
    }

    pub async fn discover(&self) -> Result<Vec<Mirror>> {
        info!("Fetching API instances");
        let mirrors = InstancesAPI::new(&self.config, &self.client)
            .discover()
            .await?;
        info!("Found {} working API instances", mirrors.len());

        Ok(mirrors)
    }

    fn load(&self, resolution: &Resolution) -> Result<()> {
        self.store.save(&resolution.results, &resolution.failures)
    }

    async fn run_videos(&self, video_ids: Vec<String>) -> Result<Report> {
        let mirrors = self.discover().await?;

        info!("Fetching {} videos", video_ids.len());
        let api = VideosAPI::new(&self.config, &self.client, video_ids);

        match api.extract(mirrors).await? {
            VideosOutcome::Completed(resolution) => {
                self.load(&resolution)?;
                Ok(Report::Videos {
                    results: resolution.results.len(),
                    failures: resolution.failures.len(),
                })
            }
            VideosOutcome::MirrorsExhausted(resolution) => {
                self.load(&resolution)?;
                Ok(Report::MirrorsExhausted {
                    results: resolution.results.len(),
                    failures: resolution.failures.len(),
                })
            }
        }
    }

    async fn run_playlist(&self, url: &str) -> Result<Report> {
        let api = PlaylistAPI::from_url(&self.config, &self.client, url)?;
        let mirrors = self.discover().await?;

        info!("Fetching playlist {}", api.playlist_id());
        match api.extract(mirrors).await? {
            PlaylistOutcome::Resolved { mirror, videos } => {
                debug!("Saving playlist {} served by {}", api.playlist_id(), mirror);
                self.store.save(&videos, &[])?;
                Ok(Report::Playlist {
                    videos: videos.len(),
                })
            }
            PlaylistOutcome::NotFound { mirror } => {
                warn!("{} has no playlist {}", mirror, api.playlist_id());
                Ok(Report::PlaylistNotFound)
            }
            PlaylistOutcome::Exhausted(errors) => Ok(Report::PlaylistUnavailable(errors)),
        }
    }

    pub async fn run(&self, input: &Input) -> Result<Report> {
        match input {
            Input::Csv(path) => {
                let video_ids = videos_csv::from_path(path)?;
                self.run_videos(video_ids).await
            }
            Input::Playlist(url) => self.run_playlist(url).await,
        }
    }
}
