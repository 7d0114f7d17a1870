use crate::config::OutputConfig;
use crate::result::Result;
use crate::sources::VideoEntry;

use std::{fs::File, io::BufWriter, io::Write, path::PathBuf};
use tracing::info;

pub struct Store {
    results_path: PathBuf,
    fails_path: PathBuf,
}

impl Store {
    pub fn new(config: &OutputConfig) -> Store {
        Store {
            results_path: PathBuf::from(&config.results_path),
            fails_path: PathBuf::from(&config.fails_path),
        }
    }

    /// Writes the results file unconditionally; the fails file only when there are failures.
    pub fn save(&self, results: &[VideoEntry], fails: &[String]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(&self.results_path)?);
        serde_json::to_writer(&mut writer, results)?;
        writer.flush()?;
        info!(
            "Saved {} results to {}",
            results.len(),
            self.results_path.display()
        );

        if !fails.is_empty() {
            let mut writer = csv::WriterBuilder::new()
                .quote_style(csv::QuoteStyle::Always)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_path(&self.fails_path)?;
            for video_id in fails {
                writer.write_record([video_id])?;
            }
            writer.flush()?;
            info!("Saved {} fails to {}", fails.len(), self.fails_path.display());
        }

        Ok(())
    }
}
