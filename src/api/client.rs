use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use super::transport::{ApiRequest, Method, RawResponse, Transport};
use crate::errors::{ClientError, Result};
use crate::session::SessionContext;

/// Backend API client.
///
/// Resolves paths against one base URL and attaches the session credential
/// (when present) to every request. Never logs the credential.
pub struct ApiClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
    session: Arc<SessionContext>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        transport: Arc<dyn Transport>,
        session: Arc<SessionContext>,
    ) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::config(format!(
                "API base URL cannot be a base: {}",
                base_url
            )));
        }
        // join() replaces the last segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            transport,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Absolute URL for a backend path
    pub fn resolve(&self, path: &str) -> Result<String> {
        Ok(self
            .base_url
            .join(path.trim_start_matches('/'))?
            .to_string())
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.execute(Method::Get, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let body = serde_json::to_value(body)
            .map_err(|e| ClientError::validation(format!("unserializable request body: {}", e)))?;
        self.execute(Method::Post, path, Some(body)).await
    }

    /// `get` followed by a typed decode; a mismatch is a `Shape` error
    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get(path).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// `post` followed by a typed decode; a mismatch is a `Shape` error
    pub async fn post_as<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let value = self.post(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.resolve(path)?;
        let credential = self.session.credential();
        trace!(
            "{} {} (authorized: {})",
            method,
            url,
            credential.is_some()
        );

        let response = self
            .transport
            .send(ApiRequest {
                method,
                url,
                credential,
                body,
            })
            .await?;

        debug!("{} {} -> {}", method, path, response.status);
        interpret(response)
    }
}

/// Map a raw response onto the success/`Api` error contract.
///
/// An empty success body becomes `null`; a non-JSON body is kept as a string
/// so that shape checks downstream treat it as unrecognized.
fn interpret(response: RawResponse) -> Result<Value> {
    let body = parse_body(&response.body);
    if (200..300).contains(&response.status) {
        Ok(body.unwrap_or(Value::Null))
    } else {
        Err(ClientError::api(response.status, body))
    }
}

fn parse_body(raw: &str) -> Option<Value> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())))
}
