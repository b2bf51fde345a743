//! Authenticated session state.
//!
//! Data-fetching clients take an explicit `Session` instead of reading a
//! token from ambient global storage. The session carries the bearer token
//! and, when known, the signed-in user's email for "my schedule" filtering.

use crate::config::Config;
use crate::error::AuthError;

/// An authenticated API session.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    user_email: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_email: None,
        }
    }

    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    /// Build a session from config, honoring the environment override.
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        let token = config
            .api
            .token
            .clone()
            .ok_or(AuthError::TokenMissing)?;
        if token.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(Self::new(token))
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }
}
