//! User accounts, custom claims, and token revocation for Campus.
//!
//! This crate talks to the Identity Toolkit v1 REST API (the backend behind
//! Firebase Authentication) using a pre-issued OAuth2 bearer token.

pub mod accounts;
pub mod auth;
pub mod claims;
pub mod client;
pub mod models;

pub use accounts::UserAccounts;
pub use claims::{CustomClaims, ScopeClaims};
pub use client::IdentityClient;
pub use models::IdentityUser;
