// ─── Manager Configuration ───
// Every path and tunable the pipeline touches. Loaded from an optional JSON
// file, then overridden by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::java::MemoryAllocation;

pub const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Directory holding the server jar, eula.txt and the world.
    pub work_dir: PathBuf,
    pub server_jar: String,
    pub eula_file: String,
    /// Heap size used when the operator input is empty or malformed.
    pub default_memory: String,
    /// Preset heap size; when set the memory prompt is skipped.
    pub memory: Option<String>,
    pub manifest_url: String,
    pub java_bin: PathBuf,
    pub generation_timeout_secs: u64,
    pub shutdown_grace_secs: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            server_jar: "server.jar".to_string(),
            eula_file: "eula.txt".to_string(),
            default_memory: "2G".to_string(),
            memory: None,
            manifest_url: VERSION_MANIFEST_URL.to_string(),
            java_bin: PathBuf::from("java"),
            generation_timeout_secs: 30,
            shutdown_grace_secs: 10,
        }
    }
}

impl ManagerConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LauncherResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| LauncherError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ManagerConfig = serde_json::from_str(&raw)
            .map_err(|e| LauncherError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn validate(&self) -> LauncherResult<()> {
        if MemoryAllocation::parse(&self.default_memory).is_none() {
            return Err(LauncherError::Config(format!(
                "default_memory must look like 2G or 1024M, got {:?}",
                self.default_memory
            )));
        }
        if self.server_jar.trim().is_empty() || self.eula_file.trim().is_empty() {
            return Err(LauncherError::Config(
                "server_jar and eula_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn server_jar_path(&self) -> PathBuf {
        self.work_dir.join(&self.server_jar)
    }

    pub fn eula_path(&self) -> PathBuf {
        self.work_dir.join(&self.eula_file)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    /// The configured default as a validated allocation.
    pub fn default_allocation(&self) -> LauncherResult<MemoryAllocation> {
        MemoryAllocation::parse(&self.default_memory).ok_or_else(|| {
            LauncherError::Config(format!("invalid default_memory {:?}", self.default_memory))
        })
    }
}
