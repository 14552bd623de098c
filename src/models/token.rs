use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A bearer token issued by the token service, together with the time it was fetched.
#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct Token {
    pub token: String,
    pub fetched_at: DateTime<Utc>,
}

impl Token {
    pub fn new(token: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Token {
            token: token.into(),
            fetched_at,
        }
    }

    /// Value for an `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }
}

// Keeps the credential out of logs.
impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("token", &"<redacted>")
            .field("fetched_at", &self.fetched_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_token() {
        let token = Token::new("s3cr3t", Utc::now());
        let rendered = format!("{:?}", token);
        assert!(!rendered.contains("s3cr3t"));
        assert_eq!(token.bearer(), "Bearer s3cr3t");
    }
}
