//! Raw file download (recorded MP3s from `downloadUrl`).

use std::path::{Path, PathBuf};

use reqwest::Response;
use tokio::io::AsyncWriteExt;
use tracing::info;

use ts_core::error::TsResult;

use crate::client::ApiClient;

impl ApiClient {
    /// Download `uri` to `local_path` and return the number of bytes written.
    ///
    /// `uri` may be absolute (a `downloadUrl`) or relative to the server root.
    pub async fn download_file(&self, uri: &str, local_path: &Path) -> TsResult<u64> {
        self.download_file_with_progress(uri, local_path, |_, _| {}).await
    }

    /// Download with progress reporting.
    ///
    /// The callback receives (bytes_downloaded, total_bytes). If the server
    /// does not send Content-Length, total_bytes will be 0. The body is
    /// written to `<local_path>.part` and renamed once complete, so a failed
    /// transfer leaves nothing at `local_path`.
    pub async fn download_file_with_progress<F>(
        &self,
        uri: &str,
        local_path: &Path,
        progress: F,
    ) -> TsResult<u64>
    where
        F: Fn(u64, u64) + Send,
    {
        let url = self.resolve(uri)?;
        let response = self.get_raw(url).await?;

        let partial = partial_path(local_path);
        let written = match self.stream_to_file(response, &partial, progress).await {
            Ok(written) => written,
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, local_path).await?;

        info!("downloaded {written} bytes to {}", local_path.display());
        Ok(written)
    }

    async fn stream_to_file<F>(&self, mut response: Response, path: &Path, progress: F) -> TsResult<u64>
    where
        F: Fn(u64, u64) + Send,
    {
        let total = response.content_length().unwrap_or(0);
        let mut file = tokio::fs::File::create(path).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.classify_error(e))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            progress(written, total);
        }
        file.flush().await?;
        Ok(written)
    }
}

/// `<local_path>.part`, where the body lands until it is complete.
fn partial_path(local_path: &Path) -> PathBuf {
    let mut name = local_path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
