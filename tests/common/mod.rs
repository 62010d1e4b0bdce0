#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::StatusCode;
use axum::routing::{get, MethodRouter};
use axum::Router;
use tokio::net::TcpListener;

use mcserver_lib::core::console::Console;
use mcserver_lib::core::java::{JavaCommand, ProcessRunner, RunOutcome};
use mcserver_lib::LauncherResult;

/// Request counter shared between a route and the test.
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// GET route answering `body` and counting requests.
pub fn counted(body: impl Into<Vec<u8>>, hits: &Hits) -> MethodRouter {
    let body: Vec<u8> = body.into();
    let hits = hits.clone();
    get(move || async move {
        hits.0.fetch_add(1, Ordering::SeqCst);
        body
    })
}

/// GET route streaming `body` in chunks. The response has no Content-Length.
pub fn chunked(body: Vec<u8>, hits: &Hits) -> MethodRouter {
    let hits = hits.clone();
    get(move || async move {
        hits.0.fetch_add(1, Ordering::SeqCst);
        let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
            body.chunks(64 * 1024).map(|c| Ok(c.to_vec())).collect();
        Body::from_stream(futures_util::stream::iter(chunks))
    })
}

/// GET route answering a bare status code.
pub fn failing(status: StatusCode, hits: &Hits) -> MethodRouter {
    let hits = hits.clone();
    get(move || async move {
        hits.0.fetch_add(1, Ordering::SeqCst);
        status
    })
}

/// Bind to an ephemeral port, build the router knowing its address, serve it.
pub async fn serve(build: impl FnOnce(SocketAddr) -> Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build(addr);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn manifest_json(release: &str, entries: &[(&str, String)]) -> String {
    let versions: Vec<serde_json::Value> = entries
        .iter()
        .map(|(id, url)| serde_json::json!({ "id": id, "type": "release", "url": url }))
        .collect();
    serde_json::json!({
        "latest": { "release": release, "snapshot": release },
        "versions": versions,
    })
    .to_string()
}

pub fn metadata_json(server_url: &str) -> String {
    serde_json::json!({ "downloads": { "server": { "url": server_url } } }).to_string()
}

/// Operator that answers from a script.
#[derive(Default)]
pub struct ScriptedConsole {
    pub answers: Mutex<Vec<String>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedConsole {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().rev().map(|a| a.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn ask(&self, prompt: &str) -> LauncherResult<String> {
        self.asked.lock().unwrap().push(prompt.to_string());
        Ok(self.answers.lock().unwrap().pop().unwrap_or_default())
    }

    fn say(&self, _line: &str) {}
}

/// Records commands instead of starting Java.
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: Mutex<Vec<(JavaCommand, Option<Duration>)>>,
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(
        &self,
        command: &JavaCommand,
        limit: Option<Duration>,
    ) -> LauncherResult<RunOutcome> {
        self.calls.lock().unwrap().push((command.clone(), limit));
        Ok(RunOutcome::Exited(Some(0)))
    }
}
