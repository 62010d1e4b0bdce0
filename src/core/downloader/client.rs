use std::ffi::OsString;
use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use reqwest::Client;
use sha1::{Digest, Sha1};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::error::{LauncherError, LauncherResult};

const PROGRESS_STEP_BYTES: u64 = 8 * 1024 * 1024;

/// What `ArtifactFetcher::ensure` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    AlreadyPresent,
    Downloaded { bytes: u64 },
}

/// Downloads the server jar to a fixed path, once.
///
/// The body is streamed into `<dest>.part` and renamed into place only when
/// complete, so an interrupted download never satisfies the existence check
/// of the next run.
pub struct ArtifactFetcher {
    client: Client,
    dest: PathBuf,
    expected_size: Option<u64>,
}

impl ArtifactFetcher {
    pub fn new(client: Client, dest: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dest: dest.into(),
            expected_size: None,
        }
    }

    /// Size advertised by the version metadata. Used for progress when the
    /// response carries no Content-Length.
    pub fn with_expected_size(mut self, size: Option<u64>) -> Self {
        self.expected_size = size;
        self
    }

    /// Make sure the artifact exists, downloading it from `url` if it does not.
    ///
    /// Existence alone gates the download: no request is made when the file
    /// is already there. `sha1_expected` is checked against the streamed body.
    pub async fn ensure(
        &self,
        url: &str,
        sha1_expected: Option<&str>,
    ) -> LauncherResult<FetchOutcome> {
        if self.dest.exists() {
            info!("{:?} already exists. Skipping download.", self.dest);
            return Ok(FetchOutcome::AlreadyPresent);
        }

        info!("Downloading {:?} from {}...", self.dest, url);
        let part = part_path(&self.dest);

        let bytes = match self.stream_to(url, &part, sha1_expected).await {
            Ok(bytes) => bytes,
            Err(err) => {
                if let Err(e) = tokio::fs::remove_file(&part).await {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        warn!("Could not remove partial download {:?}: {}", part, e);
                    }
                }
                return Err(err);
            }
        };

        tokio::fs::rename(&part, &self.dest)
            .await
            .map_err(|source| LauncherError::Io {
                path: self.dest.clone(),
                source,
            })?;

        info!("Download complete ({} bytes).", bytes);
        Ok(FetchOutcome::Downloaded { bytes })
    }

    async fn stream_to(
        &self,
        url: &str,
        part: &Path,
        sha1_expected: Option<&str>,
    ) -> LauncherResult<u64> {
        if let Some(parent) = part.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|source| LauncherError::Io {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let total_bytes = progress_total(response.content_length(), self.expected_size);

        let mut hasher = Sha1::new();
        let mut downloaded = 0_u64;

        // Scoped so the handle is closed before the rename.
        {
            let mut file = tokio::fs::File::create(part)
                .await
                .map_err(|source| LauncherError::Io {
                    path: part.to_path_buf(),
                    source,
                })?;

            let mut stream = response.bytes_stream();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                hasher.update(&chunk);
                file.write_all(&chunk)
                    .await
                    .map_err(|source| LauncherError::Io {
                        path: part.to_path_buf(),
                        source,
                    })?;

                downloaded = downloaded.saturating_add(chunk.len() as u64);
                if downloaded % PROGRESS_STEP_BYTES < chunk.len() as u64 {
                    match total_bytes {
                        Some(total) => debug!("Downloaded {} / {} bytes", downloaded, total),
                        None => debug!("Downloaded {} bytes", downloaded),
                    }
                }
            }

            if let Some(expected) = self.expected_size {
                if downloaded != expected {
                    warn!(
                        "Received {} bytes but the metadata advertised {}",
                        downloaded, expected
                    );
                }
            }

            file.flush().await.map_err(|source| LauncherError::Io {
                path: part.to_path_buf(),
                source,
            })?;
        }

        if let Some(expected) = sha1_expected {
            let actual = hex::encode(hasher.finalize());
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(LauncherError::Sha1Mismatch {
                    path: self.dest.clone(),
                    expected: expected.to_string(),
                    actual,
                });
            }
            debug!("SHA-1 verified for {:?}", self.dest);
        }

        Ok(downloaded)
    }
}

/// The response's Content-Length wins; the advertised size fills in when it is absent.
fn progress_total(content_length: Option<u64>, expected: Option<u64>) -> Option<u64> {
    match (content_length, expected) {
        (Some(length), Some(expected)) if length != expected => {
            warn!(
                "Server sent Content-Length {} but the metadata advertised {} bytes",
                length, expected
            );
            Some(length)
        }
        (Some(length), _) => Some(length),
        (None, expected) => expected,
    }
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name: OsString = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}
