use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::core::error::{LauncherError, LauncherResult};

const ACCEPTED_MARKER: &str = "eula=true";

/// The server's `eula.txt`, as read from disk.
#[derive(Debug, Clone)]
pub struct LicenseRecord {
    path: PathBuf,
    content: String,
}

impl LicenseRecord {
    /// Read the record, `None` if the file does not exist.
    pub async fn read(path: &Path) -> LauncherResult<Option<Self>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(Self {
                path: path.to_path_buf(),
                content,
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LauncherError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.content.contains(ACCEPTED_MARKER)
    }

    /// Flip the flag to true and write the file back.
    pub async fn accept(&mut self) -> LauncherResult<()> {
        let updated = accepted_content(&self.content, Utc::now());
        tokio::fs::write(&self.path, &updated)
            .await
            .map_err(|source| LauncherError::Io {
                path: self.path.clone(),
                source,
            })?;
        self.content = updated;
        Ok(())
    }
}

/// Replace every `eula=` line with `eula=true`, keeping the comments the
/// server wrote. Appends the flag if the file has no such line.
fn accepted_content(current: &str, now: DateTime<Utc>) -> String {
    let stamp = format!("#Accepted by the operator on {}", now.to_rfc3339());
    let mut lines = Vec::new();
    let mut replaced = false;

    for line in current.lines() {
        if line.trim_start().starts_with("eula=") {
            if !replaced {
                lines.push(stamp.clone());
            }
            lines.push(ACCEPTED_MARKER.to_string());
            replaced = true;
        } else {
            lines.push(line.to_string());
        }
    }

    if !replaced {
        lines.push(stamp);
        lines.push(ACCEPTED_MARKER.to_string());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
