use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaInstallation {
    pub path: PathBuf,
    pub version: String,
    pub major: u32,
    pub vendor: String,
}

/// Run `<java> -version` and parse what it reports.
///
/// Returns `None` when the binary cannot be started or prints nothing
/// recognisable; starting the server reports the real error in that case.
#[instrument]
pub async fn inspect_java_binary(path: &Path) -> Option<JavaInstallation> {
    let output = Command::new(path).arg("-version").output().await.ok()?;

    // `java -version` writes to stderr on every vendor we know of.
    let version_output = format!(
        "{}\n{}",
        String::from_utf8_lossy(&output.stderr),
        String::from_utf8_lossy(&output.stdout)
    );
    debug!(
        "Inspecting {:?}: {}",
        path,
        version_output.lines().next().unwrap_or("")
    );

    parse_version_output(path, &version_output)
}

fn parse_version_output(path: &Path, output: &str) -> Option<JavaInstallation> {
    let version = parse_version_string(output)?;
    Some(JavaInstallation {
        path: path.to_path_buf(),
        major: parse_major_version(&version),
        vendor: parse_vendor(output),
        version,
    })
}

fn parse_version_string(output: &str) -> Option<String> {
    for line in output.lines() {
        if let Some(start) = line.find('"') {
            if let Some(end) = line[start + 1..].find('"') {
                return Some(line[start + 1..start + 1 + end].to_string());
            }
        }
    }
    None
}

fn parse_vendor(output: &str) -> String {
    for line in output.lines() {
        if line.contains("Temurin") {
            return "Temurin".to_string();
        }
        if line.contains("Zulu") {
            return "Zulu".to_string();
        }
        if line.contains("GraalVM") {
            return "GraalVM".to_string();
        }
        if line.contains("OpenJDK") {
            return "OpenJDK".to_string();
        }
        if line.contains("Java(TM)") {
            return "Oracle".to_string();
        }
    }
    "unknown".to_string()
}

/// `"17.0.8"` → 17, legacy `"1.8.0_392"` → 8.
pub fn parse_major_version(version: &str) -> u32 {
    let first_part = version.split('.').next().unwrap_or("0");
    let major: u32 = first_part.parse().unwrap_or(0);

    if major == 1 {
        version
            .split('.')
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(major)
    } else {
        major
    }
}

/// Java major a server release needs, for version JSONs that do not say.
pub fn required_java_for_minecraft_version(minecraft_version: &str) -> u32 {
    let lower = minecraft_version.to_ascii_lowercase();
    if let Some(week_pos) = lower.find('w') {
        let year_hint = &lower[..week_pos];
        // Snapshot ids are ASCII ("24w14a"); anything else is not one.
        if year_hint.is_ascii() && year_hint.len() >= 2 {
            let year_suffix = &year_hint[year_hint.len() - 2..];
            if let Ok(snapshot_year) = year_suffix.parse::<u32>() {
                if snapshot_year >= 24 {
                    return 21;
                }
                return 17;
            }
        }
    }

    let mut parts = minecraft_version.split('.');
    let major = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(1);
    let minor = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(20);
    let patch = parts
        .next()
        .and_then(|p| p.parse::<u32>().ok())
        .unwrap_or(0);

    if major > 1 || minor >= 21 || (minor == 20 && patch >= 5) {
        21
    } else if minor >= 17 {
        17
    } else {
        8
    }
}
