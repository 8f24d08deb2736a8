use std::fmt;

/// Opaque bearer token proving ownership of a set of short links.
///
/// The value is never printed: `Debug` and `Display` both redact it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for blank tokens; a blank value counts as absent.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Raw token, for the storage layer and the `Authorization` header only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// `Authorization` header value
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_token_is_absent() {
        assert!(Credential::new("").is_none());
        assert!(Credential::new("   ").is_none());
        assert!(Credential::new("abc").is_some());
    }

    #[test]
    fn test_redacted_formatting() {
        let cred = Credential::new("super-secret").unwrap();
        assert!(!format!("{:?}", cred).contains("super-secret"));
        assert!(!cred.to_string().contains("super-secret"));
        assert_eq!(cred.bearer_header(), "Bearer super-secret");
    }
}
