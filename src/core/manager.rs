// ─── Server Manager ───
// resolve → download → EULA → launch. The first failure ends the run.

use std::sync::Arc;

use tracing::info;

use crate::core::config::ManagerConfig;
use crate::core::console::Console;
use crate::core::downloader::ArtifactFetcher;
use crate::core::error::LauncherResult;
use crate::core::eula::LicenseGate;
use crate::core::java::{JavaCommand, ProcessRunner, RunOutcome};
use crate::core::launch::ServerLauncher;
use crate::core::version::VersionResolver;

pub struct ServerManager {
    config: ManagerConfig,
    http_client: reqwest::Client,
    console: Arc<dyn Console>,
    runner: Arc<dyn ProcessRunner>,
}

impl ServerManager {
    pub fn new(
        config: ManagerConfig,
        http_client: reqwest::Client,
        console: Arc<dyn Console>,
        runner: Arc<dyn ProcessRunner>,
    ) -> LauncherResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            http_client,
            console,
            runner,
        })
    }

    pub async fn run(&self) -> LauncherResult<RunOutcome> {
        let config = &self.config;

        // 1. Latest release → server download
        let resolver = VersionResolver::new(self.http_client.clone(), &config.manifest_url);
        let server = resolver.resolve().await?;

        // 2. server.jar, once
        let fetcher = ArtifactFetcher::new(self.http_client.clone(), config.server_jar_path())
            .with_expected_size(server.size);
        fetcher.ensure(&server.url, server.sha1.as_deref()).await?;

        // 3. EULA
        let generation =
            JavaCommand::generation_run(&config.java_bin, &config.work_dir, &config.server_jar);
        let gate = LicenseGate::new(config.eula_path(), generation, config.generation_timeout());
        gate.ensure_accepted(self.console.as_ref(), self.runner.as_ref())
            .await?;

        // 4. Launch
        info!("Starting Minecraft {} server", server.version);
        ServerLauncher::new(config)?
            .with_required_java(server.java_major)
            .launch(self.console.as_ref(), self.runner.as_ref())
            .await
    }
}
