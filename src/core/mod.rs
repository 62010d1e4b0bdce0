// ─── Server Manager Core ───
// Fetches, licenses and launches the vanilla Minecraft dedicated server.
//
// Architecture:
//   core/
//     version/    — Mojang manifest + version JSON → server download
//     downloader/ — one-shot server.jar download with SHA-1 validation
//     eula/       — eula.txt record + acceptance gate
//     java/       — command building, process supervision, Java probing
//     launch/     — heap prompt + server start
//     manager     — the linear pipeline tying the steps together

pub mod config;
pub mod console;
pub mod downloader;
pub mod error;
pub mod eula;
pub mod http;
pub mod java;
pub mod launch;
pub mod manager;
pub mod version;
