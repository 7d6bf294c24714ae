use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// A time series identity: its key and tag set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Series {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Failed to read series file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid series on line {line}: {source}")]
    InvalidSeries {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Parses a series file holding one JSON object per line.
///
/// Blank lines are skipped.
pub fn parse_series_file(path: impl AsRef<Path>) -> Result<Vec<Series>, SeriesError> {
    let file = File::open(path)?;
    parse_series(BufReader::new(file))
}

pub fn parse_series(reader: impl BufRead) -> Result<Vec<Series>, SeriesError> {
    let mut series = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let entry = serde_json::from_str::<Series>(&line).map_err(|source| {
            SeriesError::InvalidSeries {
                line: idx + 1,
                source,
            }
        })?;
        series.push(entry);
    }

    Ok(series)
}
