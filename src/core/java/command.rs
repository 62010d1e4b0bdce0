use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

/// Heap size in the JVM's `-Xmx` notation: digits followed by `M` or `G`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAllocation(String);

impl MemoryAllocation {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if memory_pattern().is_match(raw) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemoryAllocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn memory_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)^\d+[MG]$").expect("memory pattern is valid"))
}

/// A `java ... -jar <server> nogui` invocation, run from the server directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub current_dir: PathBuf,
}

impl JavaCommand {
    /// Bare start used to make the server write its files (eula.txt).
    /// `jar` is relative to `work_dir`.
    pub fn generation_run(java_bin: &Path, work_dir: &Path, jar: &str) -> Self {
        Self {
            program: java_bin.to_path_buf(),
            args: vec!["-jar".into(), jar.to_string(), "nogui".into()],
            current_dir: work_dir.to_path_buf(),
        }
    }

    /// Server start with the same initial and maximum heap.
    pub fn server(java_bin: &Path, work_dir: &Path, jar: &str, memory: &MemoryAllocation) -> Self {
        Self {
            program: java_bin.to_path_buf(),
            args: vec![
                format!("-Xmx{memory}"),
                format!("-Xms{memory}"),
                "-jar".into(),
                jar.to_string(),
                "nogui".into(),
            ],
            current_dir: work_dir.to_path_buf(),
        }
    }

    /// Shell-like rendering for logs and the operator.
    pub fn display(&self) -> String {
        let program = shell_escape(&self.program.to_string_lossy());
        let args = self
            .args
            .iter()
            .map(|arg| shell_escape(arg))
            .collect::<Vec<_>>()
            .join(" ");

        if args.is_empty() {
            program
        } else {
            format!("{} {}", program, args)
        }
    }
}

fn shell_escape(raw: &str) -> String {
    if raw.is_empty() {
        return "\"\"".to_string();
    }

    if raw.chars().all(|ch| {
        ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '\\' | '=')
    }) {
        return raw.to_string();
    }

    format!("\"{}\"", raw.replace('"', "\\\""))
}
