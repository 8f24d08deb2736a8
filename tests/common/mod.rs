//! Shared test doubles: a scripted backend and an in-memory clipboard.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use shortlink_client::api::{ApiClient, ApiRequest, RawResponse, Transport};
use shortlink_client::errors::{ClientError, Result};
use shortlink_client::flows::ClipboardProvider;
use shortlink_client::session::{Credential, MemoryCredentialStore, SessionContext};

pub const BASE_URL: &str = "http://localhost:8080/api";
pub const PUBLIC_BASE_URL: &str = "http://localhost:8080";
pub const TOKEN: &str = "tok-123";

enum Reply {
    Response { status: u16, body: String },
    Unreachable(String),
}

struct Scripted {
    reply: Reply,
    delay: Duration,
}

/// Answers requests from a FIFO script and records every request it sees.
/// An exhausted script answers with a network error.
#[derive(Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: Value) -> &Self {
        self.respond_raw(status, &body.to_string())
    }

    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.push(
            Reply::Response {
                status,
                body: body.to_string(),
            },
            Duration::ZERO,
        )
    }

    pub fn respond_after(&self, delay: Duration, status: u16, body: Value) -> &Self {
        self.push(
            Reply::Response {
                status,
                body: body.to_string(),
            },
            delay,
        )
    }

    pub fn fail(&self, msg: &str) -> &Self {
        self.push(Reply::Unreachable(msg.to_string()), Duration::ZERO)
    }

    fn push(&self, reply: Reply, delay: Duration) -> &Self {
        self.script.lock().push_back(Scripted { reply, delay });
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests.lock().push(request);
        let next = self.script.lock().pop_front();
        let Some(scripted) = next else {
            return Err(ClientError::network("no scripted response"));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        match scripted.reply {
            Reply::Response { status, body } => Ok(RawResponse { status, body }),
            Reply::Unreachable(msg) => Err(ClientError::network(msg)),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Records copied values; can be switched to always fail.
#[derive(Default)]
pub struct MemoryClipboard {
    writes: Mutex<Vec<String>>,
    broken: bool,
}

impl MemoryClipboard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn broken() -> Arc<Self> {
        Arc::new(Self {
            writes: Mutex::new(Vec::new()),
            broken: true,
        })
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.broken {
            return Err(ClientError::capability("clipboard denied"));
        }
        self.writes.lock().push(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

pub fn signed_out_session() -> Arc<SessionContext> {
    Arc::new(SessionContext::in_memory())
}

pub fn signed_in_session() -> Arc<SessionContext> {
    let credential = Credential::new(TOKEN).expect("non-empty token");
    Arc::new(SessionContext::new(Arc::new(
        MemoryCredentialStore::with_credential(credential),
    )))
}

pub fn api_client(
    transport: Arc<ScriptedTransport>,
    session: Arc<SessionContext>,
) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(BASE_URL, transport, session).expect("valid base url"))
}

pub fn link_json(id: i64, code: &str, clicks: u64) -> Value {
    serde_json::json!({
        "id": id,
        "short_code": code,
        "original_url": format!("https://example.com/{}", code),
        "clicks": clicks,
        "created_at": "2025-03-01T12:00:00Z",
        "expires_at": null
    })
}
