//! Typed reqwest wrapper for the Identity Toolkit v1 account endpoints.

use campus_core::config::IdentityConfig;
use campus_core::error::{CampusError, Result};
use reqwest::Response;
use tracing::debug;

use crate::auth::IdentityAuth;
use crate::models::{
    ErrorResponse, IdentityUser, LookupRequest, LookupResponse, SignUpRequest, SignUpResponse,
    UpdateAccountRequest, UserPage,
};

const IDENTITY_TOOLKIT_API_BASE: &str = "https://identitytoolkit.googleapis.com";

/// Error message the service uses when an account does not exist.
const USER_NOT_FOUND: &str = "USER_NOT_FOUND";

/// HTTP client for account operations within one project.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
    auth_token: String,
    project_id: String,
}

impl IdentityClient {
    /// Create a new client with the given auth token and project ID.
    pub fn new(auth_token: &str, project_id: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: IDENTITY_TOOLKIT_API_BASE.to_string(),
            auth_token: auth_token.to_string(),
            project_id: project_id.to_string(),
        }
    }

    /// Client for a local Auth emulator listening on `host` (`host:port`).
    pub fn for_emulator(host: &str, project_id: &str) -> Self {
        Self::new(IdentityAuth::emulator().token(), project_id)
            .with_base_url(&format!("http://{host}/identitytoolkit.googleapis.com"))
    }

    /// Build a client from configuration. The emulator, when configured,
    /// takes precedence; otherwise the token is read from the environment.
    pub fn from_config(config: &IdentityConfig) -> Result<Self> {
        if config.project_id.is_empty() {
            return Err(CampusError::Config(
                "identity.project_id must be set".into(),
            ));
        }

        if let Some(host) = config.resolved_emulator_host() {
            debug!(%host, "using Auth emulator");
            return Ok(Self::for_emulator(&host, &config.project_id));
        }

        let auth = IdentityAuth::from_env(&config.access_token_env)?;
        let client = Self::new(auth.token(), &config.project_id);
        Ok(match config.base_url.as_deref() {
            Some(url) => client.with_base_url(url),
            None => client,
        })
    }

    /// Override the base URL (for testing with wiremock).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn accounts_url(&self, method: &str) -> String {
        format!(
            "{}/v1/projects/{}/accounts{}",
            self.base_url, self.project_id, method
        )
    }

    /// Create an account for `email`, returning the new uid.
    pub async fn sign_up(&self, email: &str) -> Result<String> {
        debug!(email, "creating account");
        let resp = self
            .http
            .post(self.accounts_url(""))
            .bearer_auth(&self.auth_token)
            .json(&SignUpRequest { email })
            .send()
            .await
            .map_err(|e| CampusError::Identity(format!("create user request failed: {e}")))?;

        let resp = check_status("create user", resp).await?;
        let body = resp
            .json::<SignUpResponse>()
            .await
            .map_err(|e| CampusError::Identity(format!("create user parse failed: {e}")))?;
        Ok(body.local_id)
    }

    /// Get an account by email. Returns None if no account exists.
    pub async fn lookup_by_email(&self, email: &str) -> Result<Option<IdentityUser>> {
        self.lookup(&LookupRequest {
            email: Some(vec![email.to_string()]),
            ..Default::default()
        })
        .await
    }

    /// Get an account by uid. Returns None if no account exists.
    pub async fn lookup_by_uid(&self, uid: &str) -> Result<Option<IdentityUser>> {
        self.lookup(&LookupRequest {
            local_id: Some(vec![uid.to_string()]),
            ..Default::default()
        })
        .await
    }

    async fn lookup(&self, request: &LookupRequest) -> Result<Option<IdentityUser>> {
        debug!(?request, "looking up account");
        let resp = self
            .http
            .post(self.accounts_url(":lookup"))
            .bearer_auth(&self.auth_token)
            .json(request)
            .send()
            .await
            .map_err(|e| CampusError::Identity(format!("get user request failed: {e}")))?;

        let resp = check_status("get user", resp).await?;
        let body = resp
            .json::<LookupResponse>()
            .await
            .map_err(|e| CampusError::Identity(format!("get user parse failed: {e}")))?;
        Ok(body.users.and_then(|users| users.into_iter().next()))
    }

    /// Fetch one page of accounts.
    pub async fn batch_get(&self, page_token: Option<&str>, max_results: u32) -> Result<UserPage> {
        let mut req = self
            .http
            .get(self.accounts_url(":batchGet"))
            .bearer_auth(&self.auth_token)
            .query(&[("maxResults", max_results)]);

        if let Some(token) = page_token {
            req = req.query(&[("nextPageToken", token)]);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| CampusError::Identity(format!("list users request failed: {e}")))?;

        let resp = check_status("list users", resp).await?;
        resp.json::<UserPage>()
            .await
            .map_err(|e| CampusError::Identity(format!("list users parse failed: {e}")))
    }

    /// Apply a partial update to an account.
    pub async fn update_account(&self, request: &UpdateAccountRequest) -> Result<()> {
        debug!(uid = %request.local_id, "updating account");
        let resp = self
            .http
            .post(self.accounts_url(":update"))
            .bearer_auth(&self.auth_token)
            .json(request)
            .send()
            .await
            .map_err(|e| CampusError::Identity(format!("update user request failed: {e}")))?;

        check_status("update user", resp).await?;
        Ok(())
    }
}

/// Pass successful responses through; turn the rest into errors, keeping
/// "user not found" distinguishable.
async fn check_status(op: &str, resp: Response) -> Result<Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }

    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let message = format!("{op} failed ({status}): {body}");

    if is_user_not_found(&body) {
        return Err(CampusError::UserNotFound(message));
    }
    Err(CampusError::Identity(message))
}

fn is_user_not_found(body: &str) -> bool {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|r| r.error.message.starts_with(USER_NOT_FOUND))
        .unwrap_or(false)
}
