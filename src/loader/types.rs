//! Sample types

use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Text format of a sample document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    #[default]
    Json,
    Yaml,
}

impl SampleFormat {
    /// Pick the format from a file extension; anything but `.yaml`/`.yml` is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("yaml" | "yml") => SampleFormat::Yaml,
            _ => SampleFormat::Json,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleFormat::Json => write!(f, "JSON"),
            SampleFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// A validated sample document
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Root object, non-empty, keys in document order
    pub root: JsonObject,

    /// Format the sample was read from
    pub format: SampleFormat,
}

impl Sample {
    /// Top-level key count
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}
