//! Bearer token handling for the identity service.
//!
//! The token is obtained outside this crate (for example with
//! `gcloud auth print-access-token`) and handed in directly or through an
//! environment variable.

use campus_core::error::{CampusError, Result};

/// Token accepted by the local Auth emulator for admin requests.
pub const EMULATOR_TOKEN: &str = "owner";

/// Holds an OAuth2 bearer token for identity service requests.
pub struct IdentityAuth {
    token: String,
}

impl IdentityAuth {
    /// Create a new auth instance with the given bearer token.
    pub fn new(token: String) -> Self {
        Self { token }
    }

    /// Read the bearer token from the environment variable `var`.
    pub fn from_env(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(Self::new(token.trim().to_string())),
            _ => Err(CampusError::Auth(format!(
                "environment variable {var} is not set or empty"
            ))),
        }
    }

    /// Auth for the local emulator, which ignores real credentials.
    pub fn emulator() -> Self {
        Self::new(EMULATOR_TOKEN.to_string())
    }

    /// Returns the current bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}
