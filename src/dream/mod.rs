//! Dream API integration.
//!
//! The Dream API wraps authentication (sign-up, sign-in, session) and billing
//! (checkout, customer portal) behind a small HTTP API. This module provides:
//!
//! - [`DreamApi`]: the collaborator contract every page depends on
//! - [`DreamClient`]: the reqwest implementation
//! - [`DreamFacade`]: pass-through used by pages, inert when no client exists
//!
//! # Example
//!
//! ```rust
//! use saas_starter::dream::DreamFacade;
//!
//! // A facade without a client never fails: URLs degrade to "#".
//! let facade = DreamFacade::detached();
//! assert_eq!(facade.sign_up_url("http://localhost:3000/choose-plan"), "#");
//! assert!(facade.client().is_err());
//! ```

mod client;
mod error;
mod types;

use std::sync::Arc;

use async_trait::async_trait;

pub use client::{DreamClient, PUBLISHABLE_KEY_HEADER};
pub use error::{Error, Result};
pub use types::*;

/// Placeholder href used when no client can build a real URL.
pub const PLACEHOLDER_URL: &str = "#";

/// Collaborator contract for the Dream API.
///
/// URL builders are synchronous; every other method is a single request with
/// no retry, caching or batching.
#[async_trait]
pub trait DreamApi: Send + Sync + std::fmt::Debug {
    /// Hosted sign-up page returning to `redirect`.
    fn sign_up_url(&self, redirect: &str) -> String;

    /// Hosted sign-in page returning to `redirect`.
    fn sign_in_url(&self, redirect: &str) -> String;

    /// Hosted account settings page.
    fn customer_portal_url(&self) -> String;

    /// List the tiers on sale.
    async fn list_tiers(&self) -> Result<TierList>;

    /// Resolve the visitor's session, consuming a one-time login ticket.
    async fn resolve_session(
        &self,
        credential: Option<&Credential>,
        ticket: Option<&str>,
    ) -> Result<AuthState>;

    /// Read the user record behind a credential.
    async fn get_user(&self, credential: &Credential) -> Result<Option<User>>;

    /// Exchange a credential for a fresh one.
    async fn refresh_token(&self, credential: &Credential) -> Result<Credential>;

    /// Invalidate the remote session.
    async fn sign_out(&self, credential: &Credential) -> Result<()>;

    /// Read the current usage snapshot.
    async fn check_usage(&self, credential: &Credential) -> Result<UsageSnapshot>;

    /// Record one unit of usage.
    async fn track_usage(&self, credential: &Credential) -> Result<TrackResult>;

    /// Create a checkout session for a priced tier.
    async fn create_checkout(
        &self,
        credential: &Credential,
        request: &CheckoutRequest,
    ) -> Result<RedirectTarget>;

    /// Open the billing portal.
    async fn open_portal(
        &self,
        credential: &Credential,
        request: &PortalRequest,
    ) -> Result<RedirectTarget>;
}

/// Pass-through to the Dream API that pages share.
///
/// Built once at startup and cloned into every page load. A facade without a
/// client (static prerender) returns inert defaults from the entry points a
/// page renders with and a configuration error from everything else.
#[derive(Debug, Clone, Default)]
pub struct DreamFacade {
    client: Option<Arc<dyn DreamApi>>,
}

impl DreamFacade {
    /// Wrap a live client.
    pub fn new(client: Arc<dyn DreamApi>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A facade with no client.
    pub fn detached() -> Self {
        Self { client: None }
    }

    /// Build the HTTP client from a publishable key.
    ///
    /// A missing key is a [`Error::Configuration`].
    pub fn connect(
        publishable_key: Option<&str>,
        base_url: &str,
        auth_url: &str,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let key = publishable_key.ok_or_else(|| {
            Error::Configuration(
                "DREAM_PUBLISHABLE_KEY is required. Copy .env.example to .env and add your key."
                    .to_string(),
            )
        })?;
        let client = DreamClient::with_timeout(key, base_url, auth_url, timeout)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Whether a live client is available.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// The live client, for code paths that cannot degrade.
    pub fn client(&self) -> Result<Arc<dyn DreamApi>> {
        self.client.clone().ok_or_else(|| {
            Error::Configuration("the Dream API client is not available".to_string())
        })
    }

    pub fn sign_up_url(&self, redirect: &str) -> String {
        self.client
            .as_ref()
            .map_or_else(|| PLACEHOLDER_URL.to_string(), |c| c.sign_up_url(redirect))
    }

    pub fn sign_in_url(&self, redirect: &str) -> String {
        self.client
            .as_ref()
            .map_or_else(|| PLACEHOLDER_URL.to_string(), |c| c.sign_in_url(redirect))
    }

    pub fn customer_portal_url(&self) -> String {
        self.client
            .as_ref()
            .map_or_else(|| PLACEHOLDER_URL.to_string(), |c| c.customer_portal_url())
    }

    /// List tiers; an empty list when no client exists.
    pub async fn list_tiers(&self) -> Result<TierList> {
        match &self.client {
            Some(client) => client.list_tiers().await,
            None => Ok(TierList::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn detached_facade_degrades() {
        let facade = DreamFacade::detached();
        assert_eq!(facade.sign_in_url("/dashboard"), "#");
        assert_eq!(facade.customer_portal_url(), "#");
        assert!(facade.list_tiers().await.unwrap().tiers.is_empty());
        assert!(matches!(facade.client(), Err(Error::Configuration(_))));
    }

    #[test]
    fn connect_without_key_is_fatal() {
        let err = DreamFacade::connect(
            None,
            "https://api.example.test",
            "https://auth.example.test",
            Duration::from_secs(5),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn connected_facade_builds_real_urls() {
        let facade = DreamFacade::connect(
            Some("pk_live_1"),
            "https://api.example.test",
            "https://auth.example.test",
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(facade.is_connected());
        assert!(
            facade
                .sign_up_url("http://x/choose-plan")
                .starts_with("https://auth.example.test/sign-up?")
        );
    }
}
