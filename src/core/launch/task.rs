// ─── Launch Task ───
// Asks for the heap size and runs the server attached to the terminal.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::core::config::ManagerConfig;
use crate::core::console::Console;
use crate::core::error::LauncherResult;
use crate::core::java::{self, JavaCommand, MemoryAllocation, ProcessRunner, RunOutcome};

pub struct ServerLauncher {
    java_bin: PathBuf,
    work_dir: PathBuf,
    server_jar: String,
    default_memory: MemoryAllocation,
    preset_memory: Option<String>,
    required_java: Option<u32>,
}

impl ServerLauncher {
    pub fn new(config: &ManagerConfig) -> LauncherResult<Self> {
        Ok(Self {
            java_bin: config.java_bin.clone(),
            work_dir: config.work_dir.clone(),
            server_jar: config.server_jar.clone(),
            default_memory: config.default_allocation()?,
            preset_memory: config.memory.clone(),
            required_java: None,
        })
    }

    /// Warn before launch when the configured Java is older than `major`.
    pub fn with_required_java(mut self, major: u32) -> Self {
        self.required_java = Some(major);
        self
    }

    /// Heap size from the preset or the operator; never fails on bad input.
    pub async fn choose_memory(&self, console: &dyn Console) -> LauncherResult<MemoryAllocation> {
        let raw = match &self.preset_memory {
            Some(preset) => preset.clone(),
            None => {
                console
                    .ask(&format!(
                        "Enter RAM to allocate (e.g., 2G, 1024M) [default: {}]",
                        self.default_memory
                    ))
                    .await?
            }
        };
        Ok(resolve_memory(&raw, &self.default_memory))
    }

    pub async fn launch(
        &self,
        console: &dyn Console,
        runner: &dyn ProcessRunner,
    ) -> LauncherResult<RunOutcome> {
        let memory = self.choose_memory(console).await?;
        let command = JavaCommand::server(&self.java_bin, &self.work_dir, &self.server_jar, &memory);

        if let Some(required) = self.required_java {
            self.check_java(required).await;
        }

        console.say("");
        console.say("Starting server with command:");
        console.say(&format!("  {}", command.display()));
        console.say("To stop the server, type 'stop' in the console that appears.");
        console.say("----------------------------------------------------");
        console.say("");

        info!("Launching server with {} heap from {:?}", memory, self.work_dir);
        let outcome = runner.run(&command, None).await?;

        match outcome {
            RunOutcome::Exited(Some(0)) => info!("Server process finished."),
            RunOutcome::Exited(Some(code)) => warn!("Server exited with status {}", code),
            RunOutcome::Exited(None) => warn!("Server was terminated by a signal"),
            RunOutcome::Interrupted => {
                info!("Server process interrupted by user. Shutting down.")
            }
            RunOutcome::TimedOut => warn!("Server run hit its time limit"),
        }
        Ok(outcome)
    }

    async fn check_java(&self, required: u32) {
        match java::inspect_java_binary(&self.java_bin).await {
            Some(installed) if installed.major < required => warn!(
                "Java {} ({}) at {:?} is older than the Java {} this server needs",
                installed.version, installed.vendor, installed.path, required
            ),
            Some(installed) => debug!("Using Java {} ({})", installed.version, installed.vendor),
            None => debug!("Could not determine the version of {:?}", self.java_bin),
        }
    }
}

/// Empty input means the default. Malformed input also means the default,
/// with a warning.
pub fn resolve_memory(input: &str, default: &MemoryAllocation) -> MemoryAllocation {
    let input = input.trim();
    if input.is_empty() {
        return default.clone();
    }
    match MemoryAllocation::parse(input) {
        Some(memory) => memory,
        None => {
            warn!("Invalid RAM format {:?}. Using default: {}", input, default);
            default.clone()
        }
    }
}
