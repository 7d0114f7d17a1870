use crate::config::Config;
use crate::error::ResolverError;
use crate::mirror::Mirror;
use crate::result::Result;
use crate::sources::{Extract, VideoEntry};

use async_trait::async_trait;
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct PlaylistResponse {
    videos: Vec<VideoEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MirrorError {
    pub uri: String,
    pub detail: String,
}

#[derive(Debug, PartialEq)]
pub enum PlaylistOutcome {
    Resolved {
        mirror: String,
        videos: Vec<VideoEntry>,
    },
    /// A mirror answered 404; the playlist is private or gone.
    NotFound { mirror: String },
    Exhausted(Vec<MirrorError>),
}

enum Attempt {
    Resolved(Vec<VideoEntry>),
    NotFound,
    Failed(String),
}

/// Pulls the value of the first `list=` parameter out of a playlist URL.
pub fn playlist_id(url: &str) -> Result<String> {
    let re = Regex::new(r"list=(?P<id>[\w-]+)")?;
    re.captures(url)
        .map(|caps| caps["id"].to_owned())
        .ok_or_else(|| ResolverError::InvalidPlaylistUrl(url.to_owned()))
}

#[derive(Debug, Clone)]
pub struct PlaylistAPI<'a> {
    config: &'a Config,
    client: &'a reqwest::Client,
    playlist_id: String,
}

impl PlaylistAPI<'_> {
    pub fn new<'a>(
        config: &'a Config,
        client: &'a reqwest::Client,
        playlist_id: String,
    ) -> PlaylistAPI<'a> {
        PlaylistAPI {
            config,
            client,
            playlist_id,
        }
    }

    pub fn from_url<'a>(
        config: &'a Config,
        client: &'a reqwest::Client,
        url: &str,
    ) -> Result<PlaylistAPI<'a>> {
        Ok(PlaylistAPI::new(config, client, playlist_id(url)?))
    }

    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }

    async fn fetch(&self, mirror: &Mirror) -> Attempt {
        let url = mirror.endpoint(&format!("/api/v1/playlists/{}", self.playlist_id));
        let mut builder = self.client.get(url);
        if let Some(timeout) = self.config.mirrors.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let res = match builder.send().await {
            Ok(res) => res,
            Err(err) => return Attempt::Failed(err.to_string()),
        };

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Attempt::NotFound;
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => return Attempt::Failed(err.to_string()),
        };

        if !status.is_success() {
            return Attempt::Failed(format!("{} {}", status.as_u16(), body));
        }

        match serde_json::from_str::<PlaylistResponse>(&body) {
            Ok(playlist) => Attempt::Resolved(playlist.videos),
            Err(err) => Attempt::Failed(format!("Invalid JSON: {}", err)),
        }
    }
}

#[async_trait]
impl Extract for PlaylistAPI<'_> {
    type Data = PlaylistOutcome;

    /// Tries each mirror once, in rank order, stopping at the first answer.
    async fn extract(&self, mirrors: Vec<Mirror>) -> Result<Self::Data> {
        let mut errors = Vec::new();

        for mirror in mirrors {
            match self.fetch(&mirror).await {
                Attempt::Resolved(videos) => {
                    info!(
                        "Fetched {} videos of {} from {}",
                        videos.len(),
                        self.playlist_id,
                        mirror.uri
                    );
                    return Ok(PlaylistOutcome::Resolved {
                        mirror: mirror.uri,
                        videos,
                    });
                }
                Attempt::NotFound => {
                    return Ok(PlaylistOutcome::NotFound { mirror: mirror.uri });
                }
                Attempt::Failed(detail) => {
                    warn!("{} => {}", mirror.uri, detail);
                    errors.push(MirrorError {
                        uri: mirror.uri,
                        detail,
                    });
                }
            }
        }

        Ok(PlaylistOutcome::Exhausted(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::helpers::mirror_of;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn playlist_server(status: u16, body: serde_json::Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/playlists/PL123abc"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn test_playlist_id() {
        assert_eq!(
            playlist_id("https://example.com/watch?v=xyz&list=PL123abc").unwrap(),
            "PL123abc"
        );
        assert_eq!(
            playlist_id("https://www.youtube.com/playlist?list=PLx-_9&index=2").unwrap(),
            "PLx-_9"
        );
    }

    #[test]
    fn test_playlist_id_missing() {
        let err = playlist_id("https://example.com/watch?v=xyz").unwrap_err();
        assert!(matches!(err, ResolverError::InvalidPlaylistUrl(_)));
    }

    #[tokio::test]
    async fn test_extract_first_success_wins() {
        let failing = playlist_server(500, json!({ "error": "boom" })).await;
        let working = playlist_server(
            200,
            json!({
                "title": "Mix",
                "videos": [
                    { "title": "One", "author": "A", "videoId": "id000000001" },
                    { "title": "Two", "author": "B", "videoId": "id000000002" },
                ],
            }),
        )
        .await;
        let unused = playlist_server(200, json!({ "videos": [] })).await;

        let config = Config::default();
        let client = reqwest::Client::new();
        let api = PlaylistAPI::new(&config, &client, "PL123abc".to_owned());

        let outcome = api
            .extract(vec![
                mirror_of(&failing),
                mirror_of(&working),
                mirror_of(&unused),
            ])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PlaylistOutcome::Resolved {
                mirror: working.uri(),
                videos: vec![
                    VideoEntry {
                        title: "One".to_owned(),
                        author: "A".to_owned(),
                    },
                    VideoEntry {
                        title: "Two".to_owned(),
                        author: "B".to_owned(),
                    },
                ],
            }
        );
        assert!(unused.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extract_not_found_stops() {
        let missing = playlist_server(404, json!({ "error": "not found" })).await;
        let unused = playlist_server(200, json!({ "videos": [] })).await;

        let config = Config::default();
        let client = reqwest::Client::new();
        let api = PlaylistAPI::new(&config, &client, "PL123abc".to_owned());

        let outcome = api
            .extract(vec![mirror_of(&missing), mirror_of(&unused)])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            PlaylistOutcome::NotFound {
                mirror: missing.uri()
            }
        );
        assert!(unused.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_extract_all_fail() {
        let a = playlist_server(500, json!("internal")).await;
        let b = playlist_server(403, json!("forbidden")).await;
        let c = playlist_server(200, json!({ "videos": [{ "title": "No author" }] })).await;

        let config = Config::default();
        let client = reqwest::Client::new();
        let api = PlaylistAPI::new(&config, &client, "PL123abc".to_owned());

        let outcome = api
            .extract(vec![mirror_of(&a), mirror_of(&b), mirror_of(&c)])
            .await
            .unwrap();

        match outcome {
            PlaylistOutcome::Exhausted(errors) => {
                assert_eq!(errors.len(), 3);
                assert_eq!(errors[0].uri, a.uri());
                assert_eq!(errors[0].detail, "500 \"internal\"");
                assert_eq!(errors[1].uri, b.uri());
                assert!(errors[1].detail.starts_with("403"));
                assert_eq!(errors[2].uri, c.uri());
                assert!(errors[2].detail.starts_with("Invalid JSON"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_extract_without_mirrors() {
        let config = Config::default();
        let client = reqwest::Client::new();
        let api = PlaylistAPI::new(&config, &client, "PL123abc".to_owned());

        let outcome = api.extract(Vec::new()).await.unwrap();
        assert_eq!(outcome, PlaylistOutcome::Exhausted(Vec::new()));
    }
}
