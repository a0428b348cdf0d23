use std::path::{Path, PathBuf};

use docfresh_fs::{StageOptions, StagedFile};
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::time::timeout;

use crate::data::{FetchOptions, Progress};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Downloads a remote resource onto a local path.
///
/// The body is streamed into a staging file next to the destination and
/// renamed into place only after the last chunk has been written and synced.
/// On any failure the staging file is removed, so the destination either
/// holds a complete transfer or is left untouched.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self { Self { client } }

    pub fn client(&self) -> &C { &self.client }

    /// Fetch `url` into `destination`.
    ///
    /// Progress is reported through [`FetchOptions::on_progress`] after each
    /// chunk, but only when the server declared a non-zero content length.
    pub async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        options: &FetchOptions,
    ) -> Result<PathBuf> {
        if url.trim().is_empty() {
            return Err(FetchError::InvalidUrl(url.to_string()));
        }

        tracing::debug!(url, destination = %destination.display(), "connecting");

        let response = timeout(options.connect_timeout, self.client.get(url))
            .await
            .map_err(|_| FetchError::Timeout(options.connect_timeout, "response"))?
            .map_err(FetchError::network)?;

        let total_bytes = response.content_length.filter(|&n| n > 0);
        if total_bytes.is_none() {
            tracing::debug!(url, "no content length declared, progress is indeterminate");
        }

        let (staged, file) = StagedFile::create(destination, StageOptions::new())?;
        let staging_path = staged.path().to_path_buf();
        let write_err = |source| FetchError::Write {
            path: staging_path.clone(),
            source,
        };
        let mut file = tokio::fs::File::from_std(file);
        let mut body = response.body;
        let mut bytes_downloaded = 0u64;

        loop {
            let next = timeout(options.read_timeout, body.next())
                .await
                .map_err(|_| FetchError::Timeout(options.read_timeout, "response body"))?;
            let Some(chunk) = next else { break };
            let chunk = chunk.map_err(FetchError::network)?;

            file.write_all(&chunk).await.map_err(write_err)?;
            bytes_downloaded += chunk.len() as u64;

            if let (Some(total), Some(callback)) = (total_bytes, options.on_progress.as_ref()) {
                callback(&Progress::new(bytes_downloaded, total));
            }
        }

        file.flush().await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        drop(file);

        let path = staged.commit()?;
        tracing::info!(url, bytes = bytes_downloaded, path = %path.display(), "download committed");

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockClient, MockResponse};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use tempfile::tempdir;

    fn recording_options() -> (FetchOptions, Arc<Mutex<Vec<u8>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let options = FetchOptions::default()
            .on_progress(Arc::new(move |p: &Progress| sink.lock().unwrap().push(p.percentage())));
        (options, seen)
    }

    #[tokio::test]
    async fn test_fetch_with_declared_length() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("cached_abcdef01.pdf");
        let body = vec![1u8; 1000];
        let client = MockClient::new().route("https://x/doc", MockResponse::body(body.clone(), 100));
        let (options, seen) = recording_options();

        let path = Fetcher::new(client).fetch("https://x/doc", &dest, &options).await.unwrap();

        assert_eq!(path, dest);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 10);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(seen.last(), Some(&100));
    }

    #[tokio::test]
    async fn test_fetch_without_length_reports_nothing() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("doc.pdf");
        let client = MockClient::new()
            .route("https://x/doc", MockResponse::body(vec![2u8; 300], 64).undeclared_length());
        let (options, seen) = recording_options();

        Fetcher::new(client).fetch("https://x/doc", &dest, &options).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap().len(), 300);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mid_transfer_drop_leaves_no_file() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("doc.pdf");
        let client = MockClient::new()
            .route("https://x/doc", MockResponse::body(vec![3u8; 1000], 100).drop_after(400));
        let (options, seen) = recording_options();

        let err = Fetcher::new(client).fetch("https://x/doc", &dest, &options).await.unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
        assert_eq!(seen.lock().unwrap().last(), Some(&40));
    }

    #[tokio::test]
    async fn test_connection_failure() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("doc.pdf");
        let client = MockClient::new().route("https://x/doc", MockResponse::fail("connection refused"));

        let err = Fetcher::new(client)
            .fetch("https://x/doc", &dest, &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_unknown_route_is_an_error_status() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("doc.pdf");

        let err = Fetcher::new(MockClient::new())
            .fetch("https://x/missing", &dest, &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_connect_timeout() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("doc.pdf");
        let client = MockClient::new().route("https://x/doc", MockResponse::hang());
        let options = FetchOptions::default().connect_timeout(Duration::from_millis(20));

        let err = Fetcher::new(client).fetch("https://x/doc", &dest, &options).await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout(_, "response")));
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("doc.pdf");
        let client = MockClient::new()
            .route("https://x/doc", MockResponse::body(vec![0u8; 100], 10).stall_after(50));
        let options = FetchOptions::default().read_timeout(Duration::from_millis(20));

        let err = Fetcher::new(client).fetch("https://x/doc", &dest, &options).await.unwrap_err();

        assert!(matches!(err, FetchError::Timeout(_, "response body")));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_empty_url_rejected() {
        let dir = tempdir().unwrap();
        let client = MockClient::new();

        let err = Fetcher::new(client)
            .fetch("  ", &dir.path().join("doc.pdf"), &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
