//! Plan chooser state: what selecting a tier does and how each card renders.

use crate::dream::{CheckoutRequest, Tier};
use crate::pricing::{popular_flags, sort_by_price};

/// What selecting a tier leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Free tiers go straight to the dashboard; no billing call.
    GoToDashboard,
    /// Priced tiers start a checkout session.
    Checkout(CheckoutRequest),
}

/// Decide the action for a selected tier.
///
/// `public_url` is the externally visible origin used for the billing
/// provider's return URLs.
pub fn select(tier: &Tier, public_url: &str) -> PlanAction {
    if tier.is_free() {
        return PlanAction::GoToDashboard;
    }
    let origin = public_url.trim_end_matches('/');
    PlanAction::Checkout(CheckoutRequest {
        tier: tier.name.clone(),
        price_id: tier.price_id.clone(),
        success_url: format!("{origin}/dashboard?success=true"),
        cancel_url: format!("{origin}/choose-plan?canceled=true"),
    })
}

/// Page-scoped state of the plan chooser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChooserState {
    /// Tier whose checkout is in flight.
    pub upgrading: Option<String>,
    /// Page-level error banner.
    pub error: Option<String>,
}

impl ChooserState {
    /// Mark a tier as upgrading and clear any previous error.
    pub fn begin_upgrade(&mut self, tier: &str) {
        self.upgrading = Some(tier.to_string());
        self.error = None;
    }

    /// Surface an error and make the buttons clickable again.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.upgrading = None;
        self.error = Some(message.into());
    }
}

/// Everything a pricing card on the chooser needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCard {
    pub tier: Tier,
    pub is_current: bool,
    pub is_popular: bool,
    pub is_upgrading: bool,
}

impl PlanCard {
    /// The current plan and an in-flight upgrade cannot be selected.
    pub fn disabled(&self) -> bool {
        self.is_current || self.is_upgrading
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_current {
            "Current Plan"
        } else if self.is_upgrading {
            "Processing..."
        } else if self.tier.price == 0 {
            "Select Free"
        } else {
            "Upgrade"
        }
    }
}

/// Build the chooser's cards in ascending price order.
pub fn plan_cards(tiers: &[Tier], current_plan: &str, state: &ChooserState) -> Vec<PlanCard> {
    let sorted = sort_by_price(tiers);
    let popular = popular_flags(&sorted);
    sorted
        .into_iter()
        .zip(popular)
        .map(|(tier, is_popular)| PlanCard {
            is_current: tier.name == current_plan,
            is_upgrading: state.upgrading.as_deref() == Some(tier.name.as_str()),
            is_popular,
            tier,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dream::TierLimit;

    fn tier(name: &str, price: u64) -> Tier {
        Tier {
            name: name.to_string(),
            display_name: None,
            price,
            limit: TierLimit::Requests(1000),
            features: vec![],
            popular: false,
            price_id: format!("price_{name}"),
        }
    }

    fn scenario() -> Vec<Tier> {
        vec![tier("free", 0), tier("pro", 2000), tier("team", 5000)]
    }

    #[test]
    fn free_tier_skips_checkout() {
        assert_eq!(select(&tier("free", 0), "http://localhost:3000"), PlanAction::GoToDashboard);
        assert_eq!(select(&tier("starter", 0), "http://localhost:3000"), PlanAction::GoToDashboard);
    }

    #[test]
    fn priced_tier_builds_checkout_urls() {
        let action = select(&tier("pro", 2000), "https://app.example.com/");
        let PlanAction::Checkout(req) = action else {
            panic!("expected checkout");
        };
        assert_eq!(req.tier, "pro");
        assert_eq!(req.price_id, "price_pro");
        assert_eq!(req.success_url, "https://app.example.com/dashboard?success=true");
        assert_eq!(req.cancel_url, "https://app.example.com/choose-plan?canceled=true");
    }

    #[test]
    fn current_plan_scenario() {
        let cards = plan_cards(&scenario(), "pro", &ChooserState::default());
        assert_eq!(cards.iter().filter(|c| c.is_current).count(), 1);
        assert_eq!(cards.iter().filter(|c| c.is_popular).count(), 1);

        let pro = cards.iter().find(|c| c.tier.name == "pro").unwrap();
        assert!(pro.is_current);
        assert!(pro.disabled());
        assert_eq!(pro.button_label(), "Current Plan");

        let free = cards.iter().find(|c| c.tier.name == "free").unwrap();
        assert!(!free.disabled());
        assert_eq!(free.button_label(), "Select Free");
    }

    #[test]
    fn upgrading_card_is_busy_until_failure() {
        let mut state = ChooserState::default();
        state.begin_upgrade("team");
        let cards = plan_cards(&scenario(), "free", &state);
        let team = cards.iter().find(|c| c.tier.name == "team").unwrap();
        assert!(team.disabled());
        assert_eq!(team.button_label(), "Processing...");

        state.fail("Failed to create checkout session");
        assert!(state.upgrading.is_none());
        let cards = plan_cards(&scenario(), "free", &state);
        let team = cards.iter().find(|c| c.tier.name == "team").unwrap();
        assert!(!team.disabled());
        assert_eq!(team.button_label(), "Upgrade");
    }
}
