//! Wire and domain types exchanged with the shortening backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A short link owned by the signed-in user.
///
/// Read-only snapshot; the backend owns and mutates the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Absolute short URL; empty when the backend omitted it
    #[serde(default)]
    pub short_url: String,
}

/// Click statistics for a single short code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    /// Not always echoed by the backend; filled from the requested code
    #[serde(default)]
    pub short_code: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
    pub original_url: String,
    #[serde(default)]
    pub short_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// `POST /shorten` request body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_hrs: Option<u32>,
}

impl ShortenRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_custom_code(mut self, code: impl Into<String>) -> Self {
        self.custom_code = Some(code.into());
        self
    }

    pub fn with_expiry_hours(mut self, hours: u32) -> Self {
        self.expires_in_hrs = Some(hours);
        self
    }
}

impl From<&str> for ShortenRequest {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for ShortenRequest {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

/// `POST /shorten` success body. Only `short_url` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Account as returned by `/login`, `/register` and `/profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"***")
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_link_from_backend_record() {
        let link: ShortLink = serde_json::from_value(json!({
            "id": 7,
            "short_code": "abc123",
            "original_url": "https://example.com/very/long",
            "user_id": 3,
            "clicks": 12,
            "created_at": "2025-01-02T03:04:05Z",
            "short_url": "http://localhost:8080/abc123"
        }))
        .unwrap();
        assert_eq!(link.id, 7);
        assert_eq!(link.clicks, 12);
        assert!(link.expires_at.is_none());
        assert_eq!(link.short_url, "http://localhost:8080/abc123");
    }

    #[test]
    fn test_short_link_without_short_url() {
        let link: ShortLink = serde_json::from_value(json!({
            "id": 1,
            "short_code": "x",
            "original_url": "https://e.com",
            "clicks": 0,
            "created_at": "2025-01-02T03:04:05Z"
        }))
        .unwrap();
        assert!(link.short_url.is_empty());
    }

    #[test]
    fn test_negative_clicks_rejected() {
        let result = serde_json::from_value::<ShortLink>(json!({
            "id": 1,
            "short_code": "x",
            "original_url": "https://e.com",
            "clicks": -1,
            "created_at": "2025-01-02T03:04:05Z"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_shorten_request_omits_unset_options() {
        let body = serde_json::to_value(ShortenRequest::new("https://e.com")).unwrap();
        assert_eq!(body, json!({"url": "https://e.com"}));

        let body = serde_json::to_value(
            ShortenRequest::new("https://e.com")
                .with_custom_code("mine")
                .with_expiry_hours(24),
        )
        .unwrap();
        assert_eq!(
            body,
            json!({"url": "https://e.com", "custom_code": "mine", "expires_in_hrs": 24})
        );
    }

    #[test]
    fn test_auth_response_debug_hides_token() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "token": "secret-jwt",
            "user": {"id": 1, "username": "u", "email": "u@e.com"}
        }))
        .unwrap();
        assert!(!format!("{:?}", resp).contains("secret-jwt"));
    }
}
