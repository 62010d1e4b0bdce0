pub mod task;

pub use task::{resolve_memory, ServerLauncher};
