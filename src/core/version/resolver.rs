use tracing::info;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::java::required_java_for_minecraft_version;

use super::{VersionJson, VersionManifest};

/// Where to get the latest release's dedicated server, and what it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedServer {
    pub version: String,
    pub url: String,
    pub sha1: Option<String>,
    pub size: Option<u64>,
    pub java_major: u32,
}

/// Resolves the latest stable release to a server download in two requests:
/// the manifest, then that release's version JSON.
pub struct VersionResolver {
    client: reqwest::Client,
    manifest_url: String,
}

impl VersionResolver {
    pub fn new(client: reqwest::Client, manifest_url: impl Into<String>) -> Self {
        Self {
            client,
            manifest_url: manifest_url.into(),
        }
    }

    pub async fn resolve(&self) -> LauncherResult<ResolvedServer> {
        let manifest = VersionManifest::fetch(&self.client, &self.manifest_url).await?;

        let latest = manifest.latest_release().to_string();
        info!("Latest stable version is: {}", latest);

        let version_url = manifest
            .find_version(&latest)
            .and_then(|entry| entry.url.as_deref())
            .ok_or_else(|| LauncherError::VersionNotFound(latest.clone()))?;

        let version_json = VersionJson::fetch(&self.client, version_url).await?;
        let server = version_json
            .server_download()
            .ok_or_else(|| LauncherError::ServerDownloadMissing(latest.clone()))?;

        let java_major = version_json
            .required_java_major()
            .unwrap_or_else(|| required_java_for_minecraft_version(&latest));

        Ok(ResolvedServer {
            url: server.url.clone(),
            sha1: server.sha1.clone(),
            size: server.size,
            java_major,
            version: latest,
        })
    }
}
