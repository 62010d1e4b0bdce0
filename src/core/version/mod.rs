pub mod manifest;
pub mod resolver;
pub mod version_file;

pub use manifest::{LatestVersions, VersionEntry, VersionManifest};
pub use resolver::{ResolvedServer, VersionResolver};
pub use version_file::{DownloadArtifact, JavaVersionInfo, VersionDownloads, VersionJson};
