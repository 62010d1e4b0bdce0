pub mod command;
pub mod process;
pub mod runtime;

pub use command::{JavaCommand, MemoryAllocation};
pub use process::{ProcessRunner, RunOutcome, SystemRunner};
pub use runtime::inspect_java_binary;
pub use runtime::required_java_for_minecraft_version;
pub use runtime::JavaInstallation;
