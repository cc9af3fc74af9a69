//! Custom claims: the admin/scopes payload and its wire encoding.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use campus_core::error::{CampusError, Result};

/// Arbitrary custom claims attached to a user.
pub type CustomClaims = serde_json::Map<String, Value>;

/// Largest serialized claims payload the service accepts.
pub const MAX_CLAIMS_PAYLOAD_BYTES: usize = 1000;

/// Claim names owned by the token format; they cannot be set as custom claims.
const RESERVED_CLAIMS: &[&str] = &[
    "acr", "amr", "at_hash", "aud", "auth_time", "azp", "cnf", "c_hash", "exp", "firebase",
    "iat", "iss", "jti", "nbf", "nonce", "sub",
];

/// Authorization claims written by `set_scopes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeClaims {
    pub is_admin: bool,
    pub scopes: Vec<String>,
}

impl ScopeClaims {
    /// Any scope at all makes the user an admin.
    pub fn from_scopes(scopes: Vec<String>) -> Self {
        Self {
            is_admin: !scopes.is_empty(),
            scopes,
        }
    }

    /// Read scope claims back out of a user's custom claims, if present.
    pub fn from_claims(claims: &CustomClaims) -> Option<Self> {
        serde_json::from_value(Value::Object(claims.clone())).ok()
    }

    pub fn to_claims(&self) -> CustomClaims {
        let mut claims = CustomClaims::new();
        claims.insert("isAdmin".into(), Value::Bool(self.is_admin));
        claims.insert("scopes".into(), Value::from(self.scopes.clone()));
        claims
    }
}

/// Serialize claims for the `customAttributes` field.
pub fn encode_claims(claims: &CustomClaims) -> Result<String> {
    if let Some(key) = claims.keys().find(|k| RESERVED_CLAIMS.contains(&k.as_str())) {
        return Err(CampusError::Claims(format!(
            "claim \"{key}\" is reserved and cannot be set"
        )));
    }

    let encoded = serde_json::to_string(claims)
        .map_err(|e| CampusError::Serialization(format!("claims encode failed: {e}")))?;

    if encoded.len() > MAX_CLAIMS_PAYLOAD_BYTES {
        return Err(CampusError::Claims(format!(
            "claims payload is {} bytes, limit is {MAX_CLAIMS_PAYLOAD_BYTES}",
            encoded.len()
        )));
    }

    Ok(encoded)
}

/// Parse a `customAttributes` string. Missing or blank means no claims.
pub fn decode_claims(raw: Option<&str>) -> Result<CustomClaims> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(CustomClaims::new());
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CampusError::Claims(format!(
            "expected a JSON object, got {other}"
        ))),
        Err(e) => Err(CampusError::Serialization(format!(
            "claims decode failed: {e}"
        ))),
    }
}
