// ─── Version Manifest ───
// Fetching and parsing the Mojang version manifest.

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};

/// Top-level Mojang version manifest.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestVersions,
    pub versions: Vec<VersionEntry>,
}

/// Pointer to the newest stable release.
#[derive(Debug, Deserialize)]
pub struct LatestVersions {
    pub release: String,
}

/// A single entry in the manifest. Only the entry that gets picked needs a URL.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

impl VersionManifest {
    /// Fetch the version manifest using a shared HTTP client.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> LauncherResult<Self> {
        info!("Fetching latest version information from Mojang...");

        let response = client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LauncherError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let manifest = Self::parse(&body)?;
        debug!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(manifest)
    }

    /// Parse a manifest body. Any missing key is reported as a structure change.
    pub fn parse(body: &[u8]) -> LauncherResult<Self> {
        serde_json::from_slice(body).map_err(|e| LauncherError::ManifestStructure(e.to_string()))
    }

    /// Identifier of the latest stable release.
    pub fn latest_release(&self) -> &str {
        &self.latest.release
    }

    /// Find a specific version entry by ID (e.g. "1.20.4").
    pub fn find_version(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_manifest_entry() {
        let json = r#"{
            "id": "1.20.4",
            "type": "release",
            "url": "https://example.com/1.20.4.json",
            "time": "2023-12-07T08:00:00+00:00",
            "releaseTime": "2023-12-07T08:00:00+00:00"
        }"#;
        let entry: VersionEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "1.20.4");
        assert_eq!(entry.url.as_deref(), Some("https://example.com/1.20.4.json"));
    }

    #[test]
    fn entries_without_url_do_not_break_parsing() {
        let manifest = VersionManifest::parse(
            br#"{
                "latest": { "release": "1.20" },
                "versions": [
                    { "id": "rd-132211" },
                    { "id": "1.20", "url": "http://x/meta.json" }
                ]
            }"#,
        )
        .unwrap();

        assert!(manifest.find_version("rd-132211").unwrap().url.is_none());
        assert_eq!(
            manifest.find_version("1.20").unwrap().url.as_deref(),
            Some("http://x/meta.json")
        );
    }

    #[test]
    fn finds_entry_regardless_of_order() {
        let manifest = VersionManifest::parse(
            br#"{
                "latest": { "release": "1.20", "snapshot": "23w51a" },
                "versions": [
                    { "id": "23w51a", "url": "http://x/snap.json" },
                    { "id": "1.19.4", "url": "http://x/old.json" },
                    { "id": "1.20", "url": "http://x/meta.json" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.latest_release(), "1.20");
        assert_eq!(
            manifest.find_version("1.20").unwrap().url.as_deref(),
            Some("http://x/meta.json")
        );
        assert!(manifest.find_version("1.21").is_none());
    }

    #[test]
    fn missing_latest_is_a_structure_error() {
        let err = VersionManifest::parse(br#"{ "versions": [] }"#).unwrap_err();
        assert!(matches!(err, LauncherError::ManifestStructure(_)));

        let err = VersionManifest::parse(br#"{ "latest": {}, "versions": [] }"#).unwrap_err();
        assert!(matches!(err, LauncherError::ManifestStructure(_)));
    }
}
