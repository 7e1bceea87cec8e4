//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use saas_starter::AppState;
use saas_starter::branding::Branding;
use saas_starter::config::{AppConfig, DreamConfig, LogConfig, LogFormat, ServerConfig, UiConfig};
use saas_starter::dream::{
    self, AuthState, CheckoutRequest, Credential, DreamApi, DreamFacade, PortalRequest,
    RedirectTarget, Tier, TierLimit, TierList, TrackResult, UsageLimit, UsageSnapshot, User,
};

pub const FREE_TOKEN: &str = "tok-free";
pub const PRO_TOKEN: &str = "tok-pro";
pub const CHECKOUT_URL: &str = "https://billing.example.test/checkout/cs_1";
pub const PORTAL_URL: &str = "https://billing.example.test/portal/ps_1";

/// What the fake returns from `create_checkout`.
#[derive(Debug, Clone)]
pub enum Checkout {
    Url,
    Missing,
    Fail(String),
}

/// In-memory Dream API that records every call.
#[derive(Debug)]
pub struct FakeDream {
    pub tiers: Vec<Tier>,
    pub checkout: Checkout,
    pub track: Result<TrackResult, (u16, String)>,
    pub fail_portal: bool,
    /// Answer every session lookup with a 503.
    pub fail_resolve: bool,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeDream {
    fn default() -> Self {
        Self {
            tiers: vec![
                tier("team", 5000, TierLimit::Unlimited),
                tier("free", 0, TierLimit::Requests(100)),
                tier("pro", 2000, TierLimit::Requests(10_000)),
            ],
            checkout: Checkout::Url,
            track: Ok(TrackResult {
                success: true,
                error: None,
            }),
            fail_portal: false,
            fail_resolve: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeDream {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn user_for(credential: &Credential) -> Option<User> {
        let plan = match credential.as_str() {
            FREE_TOKEN => "free",
            PRO_TOKEN | "tok-pro-refreshed" => "pro",
            _ => return None,
        };
        Some(User {
            email: "ada@example.com".into(),
            plan: plan.into(),
        })
    }
}

pub fn tier(name: &str, price: u64, limit: TierLimit) -> Tier {
    Tier {
        name: name.into(),
        display_name: None,
        price,
        limit,
        features: vec![format!("{name} feature")],
        popular: false,
        price_id: format!("price_{name}"),
    }
}

fn api_error(status: u16, message: &str) -> dream::Error {
    dream::Error::Api {
        status,
        code: None,
        message: message.to_string(),
    }
}

#[async_trait]
impl DreamApi for FakeDream {
    fn sign_up_url(&self, redirect: &str) -> String {
        format!("https://auth.example.test/sign-up?redirect_url={redirect}")
    }

    fn sign_in_url(&self, redirect: &str) -> String {
        format!("https://auth.example.test/sign-in?redirect_url={redirect}")
    }

    fn customer_portal_url(&self) -> String {
        "https://auth.example.test/user".into()
    }

    async fn list_tiers(&self) -> dream::Result<TierList> {
        self.record("list_tiers");
        Ok(TierList {
            tiers: self.tiers.clone(),
        })
    }

    async fn resolve_session(
        &self,
        credential: Option<&Credential>,
        ticket: Option<&str>,
    ) -> dream::Result<AuthState> {
        self.record("resolve");
        if self.fail_resolve {
            return Err(api_error(503, "auth backend unavailable"));
        }
        let credential = match (credential, ticket) {
            (_, Some("ticket-free")) => Some(Credential::new(FREE_TOKEN)),
            (Some(credential), _) => Some(credential.clone()),
            _ => None,
        };
        let Some(credential) = credential else {
            return Ok(AuthState::signed_out());
        };
        match Self::user_for(&credential) {
            Some(user) => Ok(AuthState {
                signed_in: true,
                token: Some(credential),
                user: Some(user),
            }),
            None => Ok(AuthState::signed_out()),
        }
    }

    async fn get_user(&self, credential: &Credential) -> dream::Result<Option<User>> {
        self.record("get_user");
        Ok(Self::user_for(credential))
    }

    async fn refresh_token(&self, credential: &Credential) -> dream::Result<Credential> {
        self.record("refresh");
        Ok(Credential::new(format!("{}-refreshed", credential.as_str())))
    }

    async fn sign_out(&self, _credential: &Credential) -> dream::Result<()> {
        self.record("sign_out");
        Ok(())
    }

    async fn check_usage(&self, credential: &Credential) -> dream::Result<UsageSnapshot> {
        self.record("check_usage");
        let plan = Self::user_for(credential).map_or_else(|| "free".to_string(), |u| u.plan);
        Ok(UsageSnapshot {
            usage_count: 42,
            limit: UsageLimit::Limited(100),
            remaining: UsageLimit::Limited(58),
            plan,
        })
    }

    async fn track_usage(&self, _credential: &Credential) -> dream::Result<TrackResult> {
        self.record("track_usage");
        self.track
            .clone()
            .map_err(|(status, message)| api_error(status, &message))
    }

    async fn create_checkout(
        &self,
        _credential: &Credential,
        request: &CheckoutRequest,
    ) -> dream::Result<RedirectTarget> {
        self.record(&format!("checkout:{}", request.tier));
        match &self.checkout {
            Checkout::Url => Ok(RedirectTarget {
                url: Some(CHECKOUT_URL.into()),
            }),
            Checkout::Missing => Ok(RedirectTarget::default()),
            Checkout::Fail(message) => Err(api_error(500, message)),
        }
    }

    async fn open_portal(
        &self,
        _credential: &Credential,
        request: &PortalRequest,
    ) -> dream::Result<RedirectTarget> {
        self.record(&format!("portal:{}", request.return_url));
        if self.fail_portal {
            return Err(api_error(502, "portal unavailable"));
        }
        Ok(RedirectTarget {
            url: Some(PORTAL_URL.into()),
        })
    }
}

pub fn test_config(branding: Branding) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            public_url: "http://app.example.test".into(),
            static_dir: PathBuf::from("static"),
            secure_cookies: false,
        },
        dream: DreamConfig {
            base_url: "http://127.0.0.1:9".into(),
            auth_url: "http://127.0.0.1:9".into(),
            publishable_key: Some("pk_test".into()),
            timeout_secs: 1,
        },
        log: LogConfig {
            format: LogFormat::Pretty,
        },
        ui: UiConfig {
            success_settle_ms: 0,
            notice_ms: 3000,
            complete_redirect_ms: 500,
        },
        branding,
        export: None,
    }
}

/// App state backed by `fake`, with default branding.
pub fn state_with(fake: Arc<FakeDream>) -> AppState {
    state_with_branding(fake, Branding::default())
}

pub fn state_with_branding(fake: Arc<FakeDream>, branding: Branding) -> AppState {
    AppState::new(Arc::new(test_config(branding)), DreamFacade::new(fake))
}

pub fn session_cookie(token: &str) -> String {
    format!("dream_session={token}")
}
