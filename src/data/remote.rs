//! Remote CSV retrieval: download to a local file, then ingest from disk.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::Url;
use reqwest::blocking::Client;

use crate::config::Settings;
use crate::domain::{RemoteSource, SourceKey};
use crate::error::LoadError;

const DRIVE_DOWNLOAD_URL: &str = "https://drive.google.com/uc";

pub struct RemoteFetcher {
    client: Client,
    download_dir: PathBuf,
}

impl RemoteFetcher {
    pub fn new(settings: &Settings) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(settings.http_timeout)
            .build()
            .map_err(|e| LoadError::SourceUnavailable {
                source_key: "http-client".to_string(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            client,
            download_dir: settings.download_dir.clone(),
        })
    }

    /// Download `remote` into the download directory and return the local path.
    pub fn fetch(&self, remote: &RemoteSource, key: &SourceKey) -> Result<PathBuf, LoadError> {
        let unavailable = |reason: String| LoadError::SourceUnavailable {
            source_key: key.to_string(),
            reason,
        };

        let url = resolve_url(remote).map_err(|e| unavailable(format!("invalid URL: {e}")))?;
        log::info!("downloading {url}");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| unavailable(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(unavailable(format!("request failed with status {}", resp.status())));
        }

        let body = resp
            .bytes()
            .map_err(|e| unavailable(format!("failed to read response body: {e}")))?;

        let target = local_path(&self.download_dir, key);
        write_atomically(&target, &body).map_err(|e| {
            unavailable(format!("failed to write download to '{}': {e}", target.display()))
        })?;

        log::debug!("saved {} bytes from {url} to {}", body.len(), target.display());
        Ok(target)
    }
}

/// The URL actually requested for a remote source.
pub fn resolve_url(remote: &RemoteSource) -> Result<Url, String> {
    let parsed = match remote {
        RemoteSource::Url(url) => Url::parse(url.trim()),
        RemoteSource::Drive { file_id } => Url::parse_with_params(
            DRIVE_DOWNLOAD_URL,
            &[("export", "download"), ("id", file_id.trim())],
        ),
    };
    parsed.map_err(|e| e.to_string())
}

/// Local file a download for `key` is written to.
pub fn local_path(download_dir: &Path, key: &SourceKey) -> PathBuf {
    download_dir.join(format!("{}.csv", key.file_stem()))
}

// A failed write never leaves a truncated CSV at `target`.
fn write_atomically(target: &Path, body: &[u8]) -> std::io::Result<()> {
    if let Some(dir) = target.parent() {
        fs::create_dir_all(dir)?;
    }
    let partial = target.with_extension("csv.part");
    fs::write(&partial, body)?;
    fs::rename(&partial, target).inspect_err(|_| {
        let _ = fs::remove_file(&partial);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load;
    use crate::domain::Source;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Answer one HTTP request on a local port with a canned response.
    fn serve_once(status: &'static str, body: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/tweets.csv", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        (url, handle)
    }

    fn settings_in(dir: &Path) -> Settings {
        Settings {
            download_dir: dir.to_path_buf(),
            http_timeout: Duration::from_secs(5),
            cache_ttl: None,
        }
    }

    #[test]
    fn drive_ids_resolve_to_download_url() {
        let url = resolve_url(&RemoteSource::Drive { file_id: "1AbC-xyz".into() }).unwrap();
        assert_eq!(url.as_str(), "https://drive.google.com/uc?export=download&id=1AbC-xyz");
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(resolve_url(&RemoteSource::Url("not a url".into())).is_err());
    }

    #[test]
    fn unreachable_host_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            download_dir: dir.path().to_path_buf(),
            http_timeout: Duration::from_secs(2),
            cache_ttl: None,
        };
        let fetcher = RemoteFetcher::new(&settings).unwrap();
        let remote = RemoteSource::Url("http://127.0.0.1:9/tweets.csv".into());
        let key = Source::Remote(remote.clone()).key();

        let err = fetcher.fetch(&remote, &key).unwrap_err();
        assert!(matches!(err, LoadError::SourceUnavailable { .. }));
        assert!(!local_path(dir.path(), &key).exists());
    }

    #[test]
    fn successful_download_is_saved_then_ingested() {
        let dir = tempfile::tempdir().unwrap();
        let (url, server) = serve_once("200 OK", "text,sentiment\nI love it,Positive\n");
        let source = Source::Remote(RemoteSource::Url(url));

        let outcome = load(&source, &settings_in(dir.path()));
        server.join().unwrap();

        assert!(outcome.diagnostics.is_empty(), "{:?}", outcome.diagnostics);
        assert_eq!(outcome.dataset.len(), 1);
        assert_eq!(outcome.dataset.records()[0].text, "I love it");
        assert!(local_path(dir.path(), &source.key()).exists());
    }

    #[test]
    fn error_status_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let (url, server) = serve_once("404 Not Found", "missing");
        let source = Source::Remote(RemoteSource::Url(url));

        let outcome = load(&source, &settings_in(dir.path()));
        server.join().unwrap();

        assert!(outcome.is_unavailable());
        assert!(outcome.dataset.is_empty());
        assert!(outcome.diagnostics[0].message.contains("404"));
        assert!(!local_path(dir.path(), &source.key()).exists());
    }

    #[test]
    fn failed_rename_removes_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        let target = dir.path().join("x.csv");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"").unwrap();

        assert!(write_atomically(&target, b"text,sentiment\n").is_err());
        assert!(!target.with_extension("csv.part").exists());
    }

    #[test]
    fn write_atomically_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("x.csv");
        write_atomically(&target, b"text,sentiment\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "text,sentiment\n");
        assert!(!target.with_extension("csv.part").exists());
    }
}
