use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::core::console::Console;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::java::{JavaCommand, ProcessRunner, RunOutcome};

use super::record::LicenseRecord;

pub const EULA_URL: &str = "https://account.mojang.com/documents/minecraft_eula";

/// Makes sure `eula.txt` exists and says `eula=true` before the server runs.
///
/// - no file: start the server once, bounded by `timeout`, so it writes one
/// - file without the flag: ask the operator and persist a yes
/// - file with the flag: nothing to do
pub struct LicenseGate {
    eula_path: PathBuf,
    generation: JavaCommand,
    timeout: Duration,
}

impl LicenseGate {
    pub fn new(eula_path: impl Into<PathBuf>, generation: JavaCommand, timeout: Duration) -> Self {
        Self {
            eula_path: eula_path.into(),
            generation,
            timeout,
        }
    }

    pub async fn ensure_accepted(
        &self,
        console: &dyn Console,
        runner: &dyn ProcessRunner,
    ) -> LauncherResult<()> {
        if !self.eula_path.exists() {
            self.generate(runner).await?;
        }

        let Some(mut record) = LicenseRecord::read(&self.eula_path).await? else {
            return Err(LauncherError::EulaMissing(self.eula_path.clone()));
        };

        if record.is_accepted() {
            info!("EULA already accepted.");
            return Ok(());
        }

        console.say("");
        console.say("----------------------------------------------------");
        console.say("Minecraft End User License Agreement (EULA)");
        console.say("By continuing, you are indicating your agreement to the EULA.");
        console.say(&format!("You can read the EULA at: {EULA_URL}"));

        let answer = console.ask("Do you accept the EULA? (yes/no)").await?;
        if !is_affirmative(&answer) {
            warn!("EULA declined by the operator");
            return Err(LauncherError::EulaDeclined);
        }

        record.accept().await?;
        info!("EULA accepted.");
        Ok(())
    }

    async fn generate(&self, runner: &dyn ProcessRunner) -> LauncherResult<()> {
        info!("EULA file not found at {:?}.", self.eula_path);
        info!("Running the server once to generate the EULA file...");

        match runner.run(&self.generation, Some(self.timeout)).await? {
            RunOutcome::TimedOut | RunOutcome::Interrupted => {
                info!("Server stopped. EULA file should now be present.");
            }
            RunOutcome::Exited(code) => {
                debug!("Generation run exited with {:?}", code);
            }
        }
        Ok(())
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}
