//! Identity Toolkit request/response structs.

use serde::{Deserialize, Serialize};

use campus_core::error::Result;

use crate::claims::{decode_claims, CustomClaims};

/// A user account as stored by the identity service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
    pub local_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Custom claims, JSON-encoded as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<String>,
    /// Seconds since the epoch before which refresh tokens are rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
}

impl IdentityUser {
    /// The user's opaque ID.
    pub fn uid(&self) -> &str {
        &self.local_id
    }

    /// Decoded custom claims; empty when none are set.
    pub fn custom_claims(&self) -> Result<CustomClaims> {
        decode_claims(self.custom_attributes.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SignUpRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignUpResponse {
    pub local_id: String,
}

/// Lookup by either email or uid; exactly one field is set.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LookupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    #[serde(default)]
    pub users: Option<Vec<IdentityUser>>,
}

/// One page of the user listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    #[serde(default)]
    pub users: Option<Vec<IdentityUser>>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// Partial account update. Unset fields are left unchanged by the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub local_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_since: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<String>,
}

impl UpdateAccountRequest {
    pub fn valid_since(local_id: &str, epoch_secs: i64) -> Self {
        Self {
            local_id: local_id.to_string(),
            valid_since: Some(epoch_secs),
            custom_attributes: None,
        }
    }

    pub fn custom_attributes(local_id: &str, encoded_claims: String) -> Self {
        Self {
            local_id: local_id.to_string(),
            valid_since: None,
            custom_attributes: Some(encoded_claims),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}
