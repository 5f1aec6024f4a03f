//! Local snapshot transport
//!
//! Reads a previously downloaded copy of a feed from disk. Useful for
//! reprocessing a saved snapshot or running against fixtures.

use super::http::{FeedStream, Fetcher};
use crate::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fetcher that resolves URLs to local files
///
/// Accepts plain paths and `file://` URLs. Relative paths are resolved against
/// the optional base directory.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base_dir: Option<PathBuf>,
}

impl FileFetcher {
    /// Create a fetcher resolving relative paths against the working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher resolving relative paths against `base_dir`
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    /// Resolve a URL or path to the file it names
    pub fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Fetcher for FileFetcher {
    fn fetch(&self, url: &str) -> Result<FeedStream> {
        let path = self.resolve(url);
        debug!("Opening local feed snapshot {}", path.display());

        let file = File::open(&path).map_err(|e| {
            Error::transport(
                url,
                format!("Failed to open {}", path.display()),
                Some(Box::new(e)),
            )
        })?;

        Ok(Box::new(BufReader::new(file)))
    }
}
