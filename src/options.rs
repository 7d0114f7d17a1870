use clap::Parser;
use std::{ffi::OsString, path::PathBuf};

// Single-dash long spellings kept for compatibility with older invocations.
const LEGACY_FLAGS: [(&str, &str); 2] = [("-purl", "--playlist-url"), ("-csvp", "--csv-path")];

#[derive(Debug, Parser)]
#[command(
    name = "resolver",
    version,
    about = "Resolve video ids or a playlist into titles and authors via Invidious mirrors"
)]
pub struct Cli {
    /// Playlist URL containing a `list=` parameter
    #[arg(long = "playlist-url", visible_alias = "purl")]
    pub playlist_url: Option<String>,

    /// CSV file whose first column holds video ids
    #[arg(long = "csv-path", visible_alias = "csvp")]
    pub csv_path: Option<PathBuf>,

    /// TOML config file (defaults apply when omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Csv(PathBuf),
    Playlist(String),
}

impl Cli {
    pub fn parse_args<I: IntoIterator<Item = OsString>>(args: I) -> Cli {
        Cli::parse_from(normalize_args(args))
    }

    /// The playlist takes precedence when both sources are given.
    pub fn input(&self) -> Option<Input> {
        match (&self.playlist_url, &self.csv_path) {
            (Some(url), _) => Some(Input::Playlist(url.clone())),
            (None, Some(path)) => Some(Input::Csv(path.clone())),
            (None, None) => None,
        }
    }
}

/// Rewrites legacy flags to their long form; arguments that are not UTF-8 pass through.
pub fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str().map(str::to_owned) else {
                return arg;
            };
            for (legacy, long) in LEGACY_FLAGS {
                if text == legacy {
                    return OsString::from(long);
                }
                if let Some(value) = text.strip_prefix(legacy).and_then(|r| r.strip_prefix('=')) {
                    return OsString::from(format!("{}={}", long, value));
                }
            }
            arg
        })
        .collect()
}
