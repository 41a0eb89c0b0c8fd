//! Sound source fetching
//!
//! Sound URLs usually point at a CDN; `file://` URLs and bare paths are read from
//! disk. Clips are short, so the whole body is buffered before decoding.

use crate::error::{AudioError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Fetches the raw bytes behind a sound URL
pub struct SourceLoader {
    http: reqwest::blocking::Client,
}

impl SourceLoader {
    /// Create a loader with its own blocking HTTP client
    ///
    /// Must be created (and dropped) outside of an async runtime.
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(format!("Soundboard/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AudioError::FetchError(e.to_string()))?;
        Ok(Self { http })
    }

    /// Raw bytes of the source at `location`
    pub fn fetch(&self, location: &str) -> Result<Vec<u8>> {
        if location.starts_with("http://") || location.starts_with("https://") {
            return self.fetch_remote(location);
        }

        let path = local_path(location)?;
        debug!(path = %path.display(), "Reading local sound");
        Ok(std::fs::read(path)?)
    }

    fn fetch_remote(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url = %url, "Downloading sound");
        let response = self
            .http
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| AudioError::FetchError(e.to_string()))?;

        let bytes = response
            .bytes()
            .map_err(|e| AudioError::FetchError(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Filesystem path for a `file://` URL or a bare path
fn local_path(location: &str) -> Result<PathBuf> {
    if location.starts_with("file://") {
        let url = Url::parse(location).map_err(|e| AudioError::FetchError(e.to_string()))?;
        return url
            .to_file_path()
            .map_err(|()| AudioError::FetchError(format!("Not a local file URL: {}", location)));
    }
    Ok(PathBuf::from(location))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_bare_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"RIFF").unwrap();

        let loader = SourceLoader::new().unwrap();
        let bytes = loader.fetch(file.path().to_str().unwrap()).unwrap();

        assert_eq!(bytes, b"RIFF");
    }

    #[test]
    fn test_reads_file_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"OggS").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let loader = SourceLoader::new().unwrap();
        let bytes = loader.fetch(url.as_str()).unwrap();

        assert_eq!(bytes, b"OggS");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let loader = SourceLoader::new().unwrap();
        let result = loader.fetch("/definitely/not/here.mp3");

        assert!(matches!(result, Err(AudioError::Io(_))));
    }
}
