//! Request and response types for the Dream API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Plan name assumed when the service omits one.
pub const FREE_PLAN: &str = "free";

fn default_plan() -> String {
    FREE_PLAN.to_string()
}

// =============================================================================
// Auth
// =============================================================================

/// Signed-in user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_plan")]
    pub plan: String,
}

impl User {
    /// Whether the user is on the free plan.
    pub fn is_free(&self) -> bool {
        self.plan == FREE_PLAN
    }

    /// Upper-cased first character of the email, or `?` without one.
    pub fn initial(&self) -> String {
        self.email
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }
}

/// Opaque session token issued by the service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Body of `POST /v1/auth/session`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Credential>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<String>,
}

/// Result of the service's session-resolution step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    #[serde(default)]
    pub signed_in: bool,
    #[serde(default)]
    pub token: Option<Credential>,
    #[serde(default)]
    pub user: Option<User>,
}

impl AuthState {
    /// A visitor with no session.
    pub fn signed_out() -> Self {
        Self::default()
    }
}

/// Response of `POST /v1/auth/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub token: Credential,
}

/// Response of `GET /v1/auth/user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(default)]
    pub user: Option<User>,
}

// =============================================================================
// Products
// =============================================================================

/// Request limit of a tier. `-1` on the wire means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum TierLimit {
    Requests(u64),
    Unlimited,
}

impl From<i64> for TierLimit {
    fn from(raw: i64) -> Self {
        u64::try_from(raw).map_or(Self::Unlimited, Self::Requests)
    }
}

impl From<TierLimit> for i64 {
    fn from(limit: TierLimit) -> Self {
        match limit {
            TierLimit::Requests(n) => i64::try_from(n).unwrap_or(i64::MAX),
            TierLimit::Unlimited => -1,
        }
    }
}

/// A priced subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Price in minor currency units (cents).
    pub price: u64,
    pub limit: TierLimit,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub price_id: String,
}

impl Tier {
    /// Label shown on pricing cards.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }

    /// Whether choosing this tier skips billing entirely.
    pub fn is_free(&self) -> bool {
        self.price == 0 || self.name == FREE_PLAN
    }
}

/// Response of `GET /v1/products/tiers`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierList {
    #[serde(default)]
    pub tiers: Vec<Tier>,
}

// =============================================================================
// Usage
// =============================================================================

/// Usage quota value: a number or unlimited.
///
/// Accepts a non-negative number, a negative number, `"unlimited"` or null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UsageLimit {
    Limited(u64),
    #[default]
    Unlimited,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLimit {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for UsageLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawLimit>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawLimit::Number(n)) => u64::try_from(n).map_or(Self::Unlimited, Self::Limited),
            Some(RawLimit::Text(text)) => text
                .trim()
                .parse::<u64>()
                .map_or(Self::Unlimited, Self::Limited),
            None => Self::Unlimited,
        })
    }
}

impl Serialize for UsageLimit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Limited(n) => serializer.serialize_u64(*n),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

/// Point-in-time read of consumption against the plan's limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSnapshot {
    #[serde(default)]
    pub usage_count: u64,
    #[serde(default)]
    pub limit: UsageLimit,
    #[serde(default)]
    pub remaining: UsageLimit,
    #[serde(default = "default_plan")]
    pub plan: String,
}

impl UsageSnapshot {
    /// Progress bar fill in percent, capped at 100.
    pub fn percent_used(&self) -> Option<f64> {
        match self.limit {
            UsageLimit::Unlimited => None,
            UsageLimit::Limited(0) => Some(if self.usage_count > 0 { 100.0 } else { 0.0 }),
            #[allow(clippy::cast_precision_loss)]
            UsageLimit::Limited(limit) => {
                Some((self.usage_count as f64 / limit as f64 * 100.0).min(100.0))
            }
        }
    }
}

/// Response of `POST /v1/usage/track`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Billing
// =============================================================================

/// Body of `POST /v1/billing/checkout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub tier: String,
    pub price_id: String,
    pub success_url: String,
    pub cancel_url: String,
}

/// Body of `POST /v1/billing/portal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalRequest {
    pub return_url: String,
}

/// A collaborator-issued URL to hand the visitor to, if one was issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    #[serde(default)]
    pub url: Option<String>,
}

/// Error body returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default, alias = "message")]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_plan_defaults_to_free() {
        let user: User = serde_json::from_str(r#"{"email":"a@b.co"}"#).unwrap();
        assert_eq!(user.plan, "free");
        assert!(user.is_free());
    }

    #[test]
    fn initial_is_uppercased_first_char() {
        let user = User {
            email: "zoe@example.com".into(),
            plan: "pro".into(),
        };
        assert_eq!(user.initial(), "Z");
        let anonymous = User {
            email: String::new(),
            plan: "pro".into(),
        };
        assert_eq!(anonymous.initial(), "?");
    }

    #[test]
    fn tier_limit_minus_one_is_unlimited() {
        let tier: Tier = serde_json::from_str(
            r#"{"name":"team","price":5000,"limit":-1,"priceId":"price_team"}"#,
        )
        .unwrap();
        assert_eq!(tier.limit, TierLimit::Unlimited);
        assert_eq!(tier.label(), "team");
        assert!(!tier.popular);
    }

    #[test]
    fn usage_limit_accepts_mixed_wire_shapes() {
        let snap: UsageSnapshot = serde_json::from_str(
            r#"{"usageCount":3,"limit":100,"remaining":"unlimited","plan":"pro"}"#,
        )
        .unwrap();
        assert_eq!(snap.limit, UsageLimit::Limited(100));
        assert_eq!(snap.remaining, UsageLimit::Unlimited);

        let snap: UsageSnapshot = serde_json::from_str(r#"{"limit":null}"#).unwrap();
        assert_eq!(snap.usage_count, 0);
        assert_eq!(snap.limit, UsageLimit::Unlimited);
        assert_eq!(snap.plan, "free");
    }

    #[test]
    fn percent_used_is_capped() {
        let snap = UsageSnapshot {
            usage_count: 150,
            limit: UsageLimit::Limited(100),
            remaining: UsageLimit::Limited(0),
            plan: "free".into(),
        };
        assert_eq!(snap.percent_used(), Some(100.0));

        let half = UsageSnapshot {
            usage_count: 50,
            ..snap.clone()
        };
        assert_eq!(half.percent_used(), Some(50.0));

        let unlimited = UsageSnapshot {
            limit: UsageLimit::Unlimited,
            ..snap
        };
        assert_eq!(unlimited.percent_used(), None);
    }

    #[test]
    fn credential_debug_is_redacted() {
        let cred = Credential::new("secret-token");
        assert_eq!(format!("{cred:?}"), "Credential(***)");
    }
}
