pub mod client;

pub use client::{ArtifactFetcher, FetchOutcome};
