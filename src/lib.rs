pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::config::ManagerConfig;
pub use crate::core::error::{ErrorCategory, LauncherError, LauncherResult};
pub use crate::core::manager::ServerManager;

/// Initialize structured logging. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,mcserver_lib=debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .without_time()
        .init();
}
