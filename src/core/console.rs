// ─── Operator Console ───
// The two interactive prompts and the license banner go through `Console`
// so the pipeline can run against a scripted operator in tests.

use async_trait::async_trait;
use dialoguer::Input;

use crate::core::error::{LauncherError, LauncherResult};

#[async_trait]
pub trait Console: Send + Sync {
    /// Ask a free-text question. Returns the raw answer, untrimmed.
    async fn ask(&self, prompt: &str) -> LauncherResult<String>;

    /// Print a line for the operator, independent of the log level.
    fn say(&self, line: &str);
}

/// Interactive console on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConsole;

#[async_trait]
impl Console for TerminalConsole {
    async fn ask(&self, prompt: &str) -> LauncherResult<String> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(LauncherError::from)
        })
        .await
        .map_err(|e| LauncherError::from(std::io::Error::other(e.to_string())))?
    }

    fn say(&self, line: &str) {
        println!("{line}");
    }
}
