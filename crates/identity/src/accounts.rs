//! User account operations: get-or-create, listing, claims, and revocation.

use chrono::Utc;
use futures_util::stream::{self, Stream, TryStreamExt};
use tracing::{debug, info, warn};

use campus_core::error::{CampusError, Result};

use crate::claims::{encode_claims, CustomClaims, ScopeClaims};
use crate::client::IdentityClient;
use crate::models::{IdentityUser, UpdateAccountRequest};

/// Page size for user listing; the service maximum.
pub const MAX_LIST_USERS_RESULTS: u32 = 1000;

enum PageCursor {
    First,
    Next(String),
    Done,
}

/// Account operations layered over [`IdentityClient`].
pub struct UserAccounts {
    client: IdentityClient,
}

impl UserAccounts {
    pub fn new(client: IdentityClient) -> Self {
        Self { client }
    }

    /// Create a user identified by `email` and return the stored account.
    pub async fn create_user(&self, email: &str) -> Result<IdentityUser> {
        validate_email(email)?;
        let uid = self.client.sign_up(email).await?;
        info!(%uid, email, "created identity user");

        self.client.lookup_by_uid(&uid).await?.ok_or_else(|| {
            CampusError::Identity(format!("user {uid} was created but could not be read back"))
        })
    }

    /// Look up a user by email without creating one.
    pub async fn find_user(&self, email: &str) -> Result<Option<IdentityUser>> {
        validate_email(email)?;
        match self.client.lookup_by_email(email).await {
            Err(CampusError::UserNotFound(_)) => Ok(None),
            other => other,
        }
    }

    /// Look up a user by email, creating the account if none exists.
    pub async fn get_user(&self, email: &str) -> Result<IdentityUser> {
        match self.find_user(email).await? {
            Some(user) => Ok(user),
            None => {
                warn!(email, "no identity user for email, creating one");
                self.create_user(email).await
            }
        }
    }

    /// Every user in the project, fetched lazily one page at a time.
    ///
    /// Each call starts again from the first page.
    pub fn list_users(&self) -> impl Stream<Item = Result<IdentityUser>> + '_ {
        stream::try_unfold(PageCursor::First, move |cursor| self.next_page(cursor))
            .map_ok(|users| stream::iter(users.into_iter().map(Ok::<_, CampusError>)))
            .try_flatten()
    }

    async fn next_page(
        &self,
        cursor: PageCursor,
    ) -> Result<Option<(Vec<IdentityUser>, PageCursor)>> {
        let page_token = match cursor {
            PageCursor::First => None,
            PageCursor::Next(token) => Some(token),
            PageCursor::Done => return Ok(None),
        };

        let page = self
            .client
            .batch_get(page_token.as_deref(), MAX_LIST_USERS_RESULTS)
            .await?;

        let next = match page.next_page_token {
            Some(token) if !token.is_empty() => PageCursor::Next(token),
            _ => PageCursor::Done,
        };
        let users = page.users.unwrap_or_default();
        debug!(count = users.len(), "fetched user page");

        Ok(Some((users, next)))
    }

    /// Invalidate every refresh token issued to `user` before now.
    pub async fn revoke_token(&self, user: &IdentityUser) -> Result<()> {
        validate_uid(&user.local_id)?;
        let now = Utc::now().timestamp();
        self.client
            .update_account(&UpdateAccountRequest::valid_since(&user.local_id, now))
            .await?;
        info!(uid = %user.local_id, valid_since = now, "revoked refresh tokens");
        Ok(())
    }

    /// Custom claims of the user with `email` (created if missing).
    pub async fn get_claims(&self, email: &str) -> Result<CustomClaims> {
        self.get_user(email).await?.custom_claims()
    }

    /// Replace the user's custom claims with `{isAdmin, scopes}`.
    ///
    /// Existing claims are overwritten, not merged.
    pub async fn set_scopes(&self, email: &str, scopes: &[String]) -> Result<()> {
        let claims = ScopeClaims::from_scopes(scopes.to_vec());
        let encoded = encode_claims(&claims.to_claims())?;

        let user = self.get_user(email).await?;
        self.client
            .update_account(&UpdateAccountRequest::custom_attributes(
                &user.local_id,
                encoded,
            ))
            .await?;

        info!(
            uid = %user.local_id,
            is_admin = claims.is_admin,
            scopes = claims.scopes.len(),
            "set user scopes"
        );
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CampusError::InvalidArgument(format!(
            "malformed email address: {email:?}"
        ))),
    }
}

fn validate_uid(uid: &str) -> Result<()> {
    if uid.is_empty() || uid.len() > 128 {
        return Err(CampusError::InvalidArgument(
            "uid must be a non-empty string of at most 128 characters".into(),
        ));
    }
    Ok(())
}
