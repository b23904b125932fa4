//! Manifest retrieval.
//!
//! A manifest lives either on disk or behind an HTTP(S) URL. Retrieval
//! failures are fatal: no partial manifest is ever reconciled.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::{PyprepError, Result};

/// Where a requirements manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    /// A file on disk.
    Local(PathBuf),
    /// A URL fetched over plain HTTP(S).
    Remote(String),
}

impl ManifestSource {
    /// Interpret a manifest location from config or the command line.
    ///
    /// `http://` and `https://` locations are remote. Relative paths are
    /// resolved against `base_dir`.
    pub fn parse(location: &str, base_dir: &Path) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            return ManifestSource::Remote(location.to_string());
        }

        let path = PathBuf::from(location);
        if path.is_absolute() {
            ManifestSource::Local(path)
        } else {
            ManifestSource::Local(base_dir.join(path))
        }
    }

    /// Directory that relative paths inside the manifest refer to.
    ///
    /// Remote manifests have none.
    pub fn base_dir(&self) -> Option<&Path> {
        match self {
            ManifestSource::Local(path) => path.parent().filter(|dir| !dir.as_os_str().is_empty()),
            ManifestSource::Remote(_) => None,
        }
    }

    /// Whether this source needs the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, ManifestSource::Remote(_))
    }
}

impl fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestSource::Local(path) => write!(f, "{}", path.display()),
            ManifestSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Loads manifests from local files and remote URLs.
///
/// # Example
///
/// ```no_run
/// use pyprep::manifest::{ManifestFetcher, ManifestSource};
/// use std::time::Duration;
///
/// let fetcher = ManifestFetcher::new(Duration::from_secs(30)).unwrap();
/// let source = ManifestSource::Remote("https://example.com/requirements.txt".into());
/// let lines = fetcher.load(&source).unwrap();
/// ```
pub struct ManifestFetcher {
    client: Client,
}

impl ManifestFetcher {
    /// Create a fetcher with the given request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("pyprep/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self { client })
    }

    /// Load a manifest and split it into lines.
    pub fn load(&self, source: &ManifestSource) -> Result<Vec<String>> {
        let content = match source {
            ManifestSource::Local(path) => read_local(path)?,
            ManifestSource::Remote(url) => self.fetch_remote(url)?,
        };

        Ok(content.lines().map(String::from).collect())
    }

    fn fetch_remote(&self, url: &str) -> Result<String> {
        tracing::debug!("Fetching manifest from {}", url);

        let fetch_failed = |message: String| PyprepError::ManifestFetchFailed {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| fetch_failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(format!("HTTP {}", status)));
        }

        response.text().map_err(|e| fetch_failed(e.to_string()))
    }
}

fn read_local(path: &Path) -> Result<String> {
    tracing::debug!("Reading manifest from {}", path.display());

    if !path.is_file() {
        return Err(PyprepError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }

    Ok(std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn fetcher() -> ManifestFetcher {
        ManifestFetcher::new(Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn parse_recognizes_urls() {
        let base = Path::new("/project");
        assert_eq!(
            ManifestSource::parse("https://example.com/r.txt", base),
            ManifestSource::Remote("https://example.com/r.txt".into())
        );
        assert_eq!(
            ManifestSource::parse("http://example.com/r.txt", base),
            ManifestSource::Remote("http://example.com/r.txt".into())
        );
    }

    #[test]
    fn parse_resolves_relative_paths_against_base() {
        let base = Path::new("/project");
        assert_eq!(
            ManifestSource::parse("requirements.txt", base),
            ManifestSource::Local(PathBuf::from("/project/requirements.txt"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn parse_keeps_absolute_paths() {
        let base = Path::new("/project");
        assert_eq!(
            ManifestSource::parse("/etc/reqs.txt", base),
            ManifestSource::Local(PathBuf::from("/etc/reqs.txt"))
        );
    }

    #[test]
    fn base_dir_is_the_manifest_directory() {
        let local = ManifestSource::parse("deps/requirements.txt", Path::new("/project"));
        assert_eq!(local.base_dir(), Some(Path::new("/project/deps")));

        let bare = ManifestSource::Local(PathBuf::from("requirements.txt"));
        assert_eq!(bare.base_dir(), None);

        let remote = ManifestSource::Remote("https://example.com/r.txt".into());
        assert_eq!(remote.base_dir(), None);
    }

    #[test]
    fn display_shows_location() {
        let remote = ManifestSource::Remote("https://example.com/r.txt".into());
        assert_eq!(remote.to_string(), "https://example.com/r.txt");
        assert!(remote.is_remote());
    }

    #[test]
    fn load_local_file_splits_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("requirements.txt");
        fs::write(&path, "numpy==1.26.0\n# comment\nrequests\n").unwrap();

        let lines = fetcher().load(&ManifestSource::Local(path)).unwrap();
        assert_eq!(lines, vec!["numpy==1.26.0", "# comment", "requests"]);
    }

    #[test]
    fn load_missing_local_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.txt");

        let err = fetcher()
            .load(&ManifestSource::Local(path.clone()))
            .unwrap_err();
        assert!(matches!(err, PyprepError::ManifestNotFound { path: p } if p == path));
    }

    #[test]
    fn load_remote_manifest() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/requirements.txt");
            then.status(200).body("torch>=2.1\ngit+https://example.com/x.git\n");
        });

        let source = ManifestSource::Remote(server.url("/requirements.txt"));
        let lines = fetcher().load(&source).unwrap();
        assert_eq!(lines, vec!["torch>=2.1", "git+https://example.com/x.git"]);
    }

    #[test]
    fn load_remote_404_is_fatal() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.txt");
            then.status(404).body("Not Found");
        });

        let source = ManifestSource::Remote(server.url("/missing.txt"));
        let err = fetcher().load(&source).unwrap_err();
        match err {
            PyprepError::ManifestFetchFailed { message, .. } => {
                assert!(message.contains("404"), "unexpected message: {}", message)
            }
            other => panic!("expected ManifestFetchFailed, got {other:?}"),
        }
    }

    #[test]
    fn load_remote_unreachable_is_fatal() {
        let source = ManifestSource::Remote("http://127.0.0.1:1/requirements.txt".into());
        let err = fetcher().load(&source).unwrap_err();
        assert!(matches!(err, PyprepError::ManifestFetchFailed { .. }));
    }
}
