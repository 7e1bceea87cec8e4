//! HTTP client for the Dream API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use super::DreamApi;
use super::error::{Error, Result};
use super::types::{
    AuthState, CheckoutRequest, Credential, ErrorBody, PortalRequest, RedirectTarget,
    RefreshResponse, ResolveSessionRequest, TierList, TrackResult, UsageSnapshot, User,
    UserResponse,
};

/// Header carrying the publishable key on every request.
pub const PUBLISHABLE_KEY_HEADER: &str = "x-dream-publishable-key";

/// HTTP client for the Dream API.
///
/// # Example
///
/// ```rust,no_run
/// use saas_starter::dream::{DreamApi, DreamClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = DreamClient::new(
///     "pk_test_123",
///     "https://api.dream-api.com",
///     "https://auth.dream-api.com",
/// )?;
/// let tiers = client.list_tiers().await?;
/// println!("{} tiers", tiers.tiers.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DreamClient {
    base_url: Url,
    auth_url: Url,
    publishable_key: String,
    http: reqwest::Client,
}

/// Parse a base URL so that relative joins land below its path.
fn directory(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(Error::Configuration(format!("{raw} cannot be used as a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl DreamClient {
    /// Create a new client.
    ///
    /// Fails with [`Error::Configuration`] when the publishable key is empty.
    pub fn new(
        publishable_key: impl Into<String>,
        base_url: impl AsRef<str>,
        auth_url: impl AsRef<str>,
    ) -> Result<Self> {
        Self::with_timeout(publishable_key, base_url, auth_url, Duration::from_secs(15))
    }

    /// Create a new client with a request timeout.
    pub fn with_timeout(
        publishable_key: impl Into<String>,
        base_url: impl AsRef<str>,
        auth_url: impl AsRef<str>,
        timeout: Duration,
    ) -> Result<Self> {
        let publishable_key = publishable_key.into();
        if publishable_key.trim().is_empty() {
            return Err(Error::Configuration(
                "DREAM_PUBLISHABLE_KEY is required. Copy .env.example to .env and add your key."
                    .to_string(),
            ));
        }

        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(&publishable_key).map_err(|e| {
            Error::Configuration(format!("publishable key is not a valid header value: {e}"))
        })?;
        headers.insert(PUBLISHABLE_KEY_HEADER, key_value);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: directory(base_url.as_ref())?,
            auth_url: directory(auth_url.as_ref())?,
            publishable_key,
            http,
        })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve an endpoint path below the base URL, keeping any path prefix.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn hosted_page(&self, path: &str, redirect: Option<&str>) -> String {
        let mut url = self
            .auth_url
            .join(path)
            .unwrap_or_else(|_| self.auth_url.clone());
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("publishable_key", &self.publishable_key);
            if let Some(redirect) = redirect {
                query.append_pair("redirect_url", redirect);
            }
        }
        url.to_string()
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            let (code, message) = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => (body.code, body.error.unwrap_or_else(|| text.clone())),
                Err(_) => (None, text),
            };
            Err(Error::Api {
                status: status.as_u16(),
                code,
                message,
            })
        }
    }

    async fn handle_empty(response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            return Ok(());
        }
        Self::handle_response::<serde_json::Value>(response)
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl DreamApi for DreamClient {
    fn sign_up_url(&self, redirect: &str) -> String {
        self.hosted_page("sign-up", Some(redirect))
    }

    fn sign_in_url(&self, redirect: &str) -> String {
        self.hosted_page("sign-in", Some(redirect))
    }

    fn customer_portal_url(&self) -> String {
        self.hosted_page("user", None)
    }

    async fn list_tiers(&self) -> Result<TierList> {
        let response = self.http.get(self.url("v1/products/tiers")?).send().await?;
        Self::handle_response(response).await
    }

    async fn resolve_session(
        &self,
        credential: Option<&Credential>,
        ticket: Option<&str>,
    ) -> Result<AuthState> {
        if credential.is_none() && ticket.is_none() {
            return Ok(AuthState::signed_out());
        }
        let body = ResolveSessionRequest {
            token: credential.cloned(),
            ticket: ticket.map(str::to_string),
        };
        let response = self
            .http
            .post(self.url("v1/auth/session")?)
            .json(&body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn get_user(&self, credential: &Credential) -> Result<Option<User>> {
        let response = self
            .http
            .get(self.url("v1/auth/user")?)
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        let body: UserResponse = Self::handle_response(response).await?;
        Ok(body.user)
    }

    async fn refresh_token(&self, credential: &Credential) -> Result<Credential> {
        let response = self
            .http
            .post(self.url("v1/auth/refresh")?)
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        let body: RefreshResponse = Self::handle_response(response).await?;
        Ok(body.token)
    }

    async fn sign_out(&self, credential: &Credential) -> Result<()> {
        let response = self
            .http
            .post(self.url("v1/auth/sign-out")?)
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        Self::handle_empty(response).await
    }

    async fn check_usage(&self, credential: &Credential) -> Result<UsageSnapshot> {
        let response = self
            .http
            .get(self.url("v1/usage")?)
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn track_usage(&self, credential: &Credential) -> Result<TrackResult> {
        let response = self
            .http
            .post(self.url("v1/usage/track")?)
            .bearer_auth(credential.as_str())
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create_checkout(
        &self,
        credential: &Credential,
        request: &CheckoutRequest,
    ) -> Result<RedirectTarget> {
        let response = self
            .http
            .post(self.url("v1/billing/checkout")?)
            .bearer_auth(credential.as_str())
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn open_portal(
        &self,
        credential: &Credential,
        request: &PortalRequest,
    ) -> Result<RedirectTarget> {
        let response = self
            .http
            .post(self.url("v1/billing/portal")?)
            .bearer_auth(credential.as_str())
            .json(request)
            .send()
            .await?;
        Self::handle_response(response).await
    }
}
