use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the server manager.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-1 mismatch for {path:?}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── Manifest / version metadata ─────────────────────
    #[error("Error parsing version manifest, the structure might have changed: {0}")]
    ManifestStructure(String),

    #[error("Could not find URL for version {0}")]
    VersionNotFound(String),

    #[error("Server download URL not found in version data for {0}")]
    ServerDownloadMissing(String),

    // ── Java ────────────────────────────────────────────
    #[error("Java executable not found: {0:?}")]
    JavaNotFound(PathBuf),

    #[error("Java execution failed: {0}")]
    JavaExecution(String),

    // ── EULA ────────────────────────────────────────────
    #[error("The EULA must be accepted to run the server")]
    EulaDeclined,

    #[error("{0:?} not found after the initial run, run the server manually once")]
    EulaMissing(PathBuf),

    // ── Console / config ────────────────────────────────
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

/// Coarse classification of a failure, as reported to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport failure or non-success status on an HTTP call.
    Network,
    /// Manifest or version metadata lacks the expected structure.
    Parse,
    /// The Java executable could not be started.
    MissingRuntime,
    /// The operator did not accept the EULA.
    Declined,
    /// Local filesystem, integrity, prompt or config problems.
    Local,
}

impl LauncherError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            LauncherError::Http(_) | LauncherError::DownloadFailed { .. } => ErrorCategory::Network,
            LauncherError::ManifestStructure(_)
            | LauncherError::VersionNotFound(_)
            | LauncherError::ServerDownloadMissing(_) => ErrorCategory::Parse,
            LauncherError::JavaNotFound(_) => ErrorCategory::MissingRuntime,
            LauncherError::EulaDeclined | LauncherError::EulaMissing(_) => ErrorCategory::Declined,
            LauncherError::Io { .. }
            | LauncherError::Sha1Mismatch { .. }
            | LauncherError::JavaExecution(_)
            | LauncherError::Prompt(_)
            | LauncherError::Config(_) => ErrorCategory::Local,
        }
    }
}

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
