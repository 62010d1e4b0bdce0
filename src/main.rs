use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use mcserver_lib::core::console::TerminalConsole;
use mcserver_lib::core::http::build_http_client;
use mcserver_lib::core::java::SystemRunner;
use mcserver_lib::{ErrorCategory, LauncherError, LauncherResult, ManagerConfig, ServerManager};

/// Download, license and start the latest Minecraft dedicated server.
#[derive(Parser, Debug)]
#[command(name = "mcserver", version, about, long_about = None)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding server.jar, eula.txt and the world
    #[arg(short = 'd', long)]
    dir: Option<PathBuf>,

    /// Heap size (e.g. 2G, 1024M); skips the prompt
    #[arg(short, long)]
    memory: Option<String>,

    /// Heap size used when the answer is empty or invalid
    #[arg(long)]
    default_memory: Option<String>,

    /// Java executable to run the server with
    #[arg(long)]
    java: Option<PathBuf>,

    /// Version manifest URL
    #[arg(long)]
    manifest_url: Option<String>,

    /// Seconds the EULA generation run may take before it is stopped
    #[arg(long)]
    generation_timeout: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> LauncherResult<ManagerConfig> {
        let mut config = match &self.config {
            Some(path) => ManagerConfig::load(path)?,
            None => ManagerConfig::default(),
        };

        if let Some(dir) = self.dir {
            config.work_dir = dir;
        }
        if let Some(memory) = self.memory {
            config.memory = Some(memory);
        }
        if let Some(default_memory) = self.default_memory {
            config.default_memory = default_memory;
        }
        if let Some(java) = self.java {
            config.java_bin = java;
        }
        if let Some(url) = self.manifest_url {
            config.manifest_url = url;
        }
        if let Some(secs) = self.generation_timeout {
            config.generation_timeout_secs = secs;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    mcserver_lib::init_tracing(cli.verbose);

    println!("--- Minecraft Server Manager ---");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> LauncherResult<()> {
    let config = cli.into_config()?;
    let http_client = build_http_client()?;
    let runner = SystemRunner::new(config.shutdown_grace());

    let manager = ServerManager::new(
        config,
        http_client,
        Arc::new(TerminalConsole),
        Arc::new(runner),
    )?;
    manager.run().await?;
    Ok(())
}

fn report(err: &LauncherError) {
    match err.category() {
        ErrorCategory::MissingRuntime => {
            error!("{}", err);
            error!("Please make sure you have Java installed and in your system's PATH.");
        }
        _ => error!("{}", err),
    }
}
