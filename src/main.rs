use resolver::{logging, Cli, Config, Report, Resolver};

use std::process::ExitCode;
use tracing::{error, info, warn};

fn print_report(report: &Report) {
    match report {
        Report::Videos { results, failures } => {
            info!("Done: {} resolved, {} failed", results, failures)
        }
        Report::MirrorsExhausted { results, failures } => {
            error!(
                "Stopped early: {} resolved, {} failed before running out of mirrors",
                results, failures
            )
        }
        Report::Playlist { videos } => info!("Done: {} videos", videos),
        Report::PlaylistNotFound => println!("Failed to find the playlist. Is it private?"),
        Report::PlaylistUnavailable(errors) => {
            println!("Failed to fetch playlist. Errors by instance:");
            for err in errors {
                println!("{} => {}", err.uri, err.detail);
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args(std::env::args_os());

    logging::init(&cli.log_level);

    let input = match cli.input() {
        Some(input) => input,
        None => {
            error!("Source required: pass --playlist-url or --csv-path");
            return ExitCode::FAILURE;
        }
    };
    if cli.playlist_url.is_some() && cli.csv_path.is_some() {
        warn!("Both sources given, ignoring --csv-path");
    }

    let config = match Config::load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(err) => {
            error!("Could not load config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let resolver = match Resolver::new(config) {
        Ok(resolver) => resolver,
        Err(err) => {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match resolver.run(&input).await {
        Ok(report) => {
            print_report(&report);
            if report.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
