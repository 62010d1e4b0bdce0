// ─── Process Runner ───
// Spawns the server attached to the operator's terminal and waits for it.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tracing::{debug, info, warn};

use crate::core::error::{LauncherError, LauncherResult};

use super::command::JavaCommand;

/// How a supervised run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process exited by itself. `None` when killed by a signal.
    Exited(Option<i32>),
    /// The time limit elapsed and the process was killed.
    TimedOut,
    /// The operator pressed Ctrl-C while waiting.
    Interrupted,
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `command` with inherited stdio until it exits, `limit` elapses
    /// or the operator interrupts.
    async fn run(&self, command: &JavaCommand, limit: Option<Duration>)
        -> LauncherResult<RunOutcome>;
}

/// Runs real child processes with `tokio::process`.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    /// Time an interrupted unbounded run gets to shut down before it is killed.
    shutdown_grace: Duration,
}

impl SystemRunner {
    pub fn new(shutdown_grace: Duration) -> Self {
        Self { shutdown_grace }
    }

    fn spawn(command: &JavaCommand) -> LauncherResult<Child> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .current_dir(&command.current_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        debug!("Command: {}", command.display());

        cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LauncherError::JavaNotFound(command.program.clone())
            } else {
                LauncherError::JavaExecution(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(
        &self,
        command: &JavaCommand,
        limit: Option<Duration>,
    ) -> LauncherResult<RunOutcome> {
        let mut child = Self::spawn(command)?;

        let deadline = async {
            match limit {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending::<()>().await,
            }
        };
        let interrupt = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            status = child.wait() => {
                let status = status.map_err(|e| LauncherError::JavaExecution(e.to_string()))?;
                debug!("Process exited with {}", status);
                Ok(RunOutcome::Exited(status.code()))
            }
            _ = deadline => {
                info!("Process still running after {:?}, stopping it", limit.unwrap_or_default());
                stop(&mut child).await;
                Ok(RunOutcome::TimedOut)
            }
            _ = interrupt => {
                settle_after_interrupt(&mut child, limit, self.shutdown_grace).await;
                Ok(RunOutcome::Interrupted)
            }
        }
    }
}

/// What became of the child once the operator interrupted the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterInterrupt {
    Stopped,
    Killed,
}

/// The child shares our terminal and got the same SIGINT. An unbounded run
/// (the real server) gets `grace` to save and stop; a bounded run is killed.
async fn settle_after_interrupt(
    child: &mut Child,
    limit: Option<Duration>,
    grace: Duration,
) -> AfterInterrupt {
    if limit.is_some() {
        stop(child).await;
        return AfterInterrupt::Killed;
    }

    match tokio::time::timeout(grace, child.wait()).await {
        Ok(_) => {
            debug!("Process stopped after interrupt");
            AfterInterrupt::Stopped
        }
        Err(_) => {
            warn!("Process did not stop within {:?}, killing it", grace);
            stop(child).await;
            AfterInterrupt::Killed
        }
    }
}

async fn stop(child: &mut Child) {
    if let Err(e) = child.kill().await {
        warn!("Could not kill child process: {}", e);
    }
}
