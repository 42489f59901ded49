use std::path::PathBuf;

use serde::Deserialize;

/// Where and how to read the segment data
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Path to the delimited segment file
    pub data_path: PathBuf,
    /// Field delimiter, a single ASCII character
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Whether the first row is a header
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,
}

impl NetworkConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            delimiter: default_delimiter(),
            has_headers: default_has_headers(),
        }
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_has_headers() -> bool {
    true
}
