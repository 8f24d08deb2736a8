use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;
use ureq::Agent;

use crate::errors::{ClientError, Result};
use crate::session::Credential;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// Fully resolved outbound request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub credential: Option<Credential>,
    pub body: Option<Value>,
}

/// Whatever the backend answered, before status interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// HTTP seam under [`super::ApiClient`].
///
/// Implementations return `Ok` for every response received, whatever its
/// status; `Err` only when no response was received.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;

    fn name(&self) -> &'static str;
}

/// ureq-backed transport; each call runs on the blocking pool.
pub struct UreqTransport {
    agent: Arc<Agent>,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent: Arc::new(agent),
        }
    }

    fn send_sync(agent: &Agent, request: ApiRequest) -> Result<RawResponse> {
        let auth = request.credential.as_ref().map(Credential::bearer_header);

        let response = match request.method {
            Method::Get => {
                let mut builder = agent.get(&request.url).header("Accept", "application/json");
                if let Some(auth) = &auth {
                    builder = builder.header("Authorization", auth);
                }
                builder.call()?
            }
            Method::Post => {
                let mut builder = agent.post(&request.url).header("Accept", "application/json");
                if let Some(auth) = &auth {
                    builder = builder.header("Authorization", auth);
                }
                let body = request.body.unwrap_or(Value::Null);
                builder.send_json(&body)?
            }
        };

        let status = response.status().as_u16();
        let body = response.into_body().read_to_string()?;
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || Self::send_sync(&agent, request))
            .await
            .unwrap_or_else(|e| {
                warn!("HTTP spawn_blocking failed: {}", e);
                Err(ClientError::network(format!("request task failed: {}", e)))
            })
    }

    fn name(&self) -> &'static str {
        "ureq"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nothing listens on port 9 of localhost in CI; the connection is refused.
    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let transport = UreqTransport::new(Duration::from_secs(2));
        let result = transport
            .send(ApiRequest {
                method: Method::Get,
                url: "http://127.0.0.1:9/api/my-urls".to_string(),
                credential: None,
                body: None,
            })
            .await;
        assert!(matches!(result, Err(ClientError::Network(_))));
    }

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
    }
}
