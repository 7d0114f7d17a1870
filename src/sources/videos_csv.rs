use crate::result::Result;

use regex::Regex;
use std::{io::Read, path::Path};

// Unanchored at the end: anything whose first 11 characters fit passes.
const VIDEO_ID_PATTERN: &str = r"^[a-zA-Z0-9_-]{11}";

pub struct VideoIdMatcher(Regex);

impl VideoIdMatcher {
    pub fn new() -> Result<VideoIdMatcher> {
        Ok(VideoIdMatcher(Regex::new(VIDEO_ID_PATTERN)?))
    }

    pub fn is_valid(&self, id: &str) -> bool {
        self.0.is_match(id)
    }
}

/// Reads video ids from the first column of a CSV file.
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = std::fs::File::open(path)?;
    from_reader(file)
}

pub fn from_reader<R: Read>(reader: R) -> Result<Vec<String>> {
    let matcher = VideoIdMatcher::new()?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .quote(b'"')
        .from_reader(reader);

    let mut video_ids = Vec::new();
    // Only the first column is decoded; other columns may hold any encoding.
    for record in reader.byte_records() {
        let record = record?;
        let video_id = match record.get(0).map(std::str::from_utf8) {
            Some(Ok(field)) => field.trim(),
            Some(Err(_)) | None => continue,
        };

        if video_id.is_empty() || !matcher.is_valid(video_id) {
            continue;
        }

        video_ids.push(video_id.to_owned());
    }

    Ok(video_ids)
}
