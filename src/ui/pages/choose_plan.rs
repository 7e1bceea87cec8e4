//! Plan chooser page.

use leptos::prelude::*;

use crate::plans::PlanCard;
use crate::pricing::{GridLayout, format_limit, format_price};
use crate::session::Session;
use crate::ui::components::{Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card};
use crate::ui::nav::Nav;
use crate::ui::pages::landing::FeatureChecklist;
use crate::ui::use_branding;

/// Notice shown when the visitor returns from a canceled checkout.
pub const CANCELED_NOTICE: &str = "Checkout canceled. Your plan has not changed.";

/// Plan chooser: one card per tier, ascending by price.
#[component]
pub fn ChoosePlanPage(
    /// Session snapshot of the current page load.
    session: Session,
    /// Cards built by [`crate::plans::plan_cards`].
    cards: Vec<PlanCard>,
    /// Page-level error banner.
    #[prop(default = None)]
    error: Option<String>,
    /// Visitor came back from a canceled checkout.
    #[prop(default = false)]
    canceled: bool,
    /// Hosted sign-in page.
    #[prop(into)]
    sign_in_url: String,
    /// Hosted sign-up page.
    #[prop(into)]
    sign_up_url: String,
) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();
    let current_plan = session
        .is_signed_in
        .then(|| session.plan().to_uppercase());
    let layout = GridLayout::for_count(cards.len());

    let current = current_plan.map(|plan| {
        view! {
            <p class={format!("mt-2 text-sm {}", theme.muted)}>
                "Current plan: "
                <span class={accent.text}>{plan}</span>
            </p>
        }
    });

    let banner = error.map(|message| {
        view! {
            <div class="mb-8 max-w-md mx-auto bg-red-950/50 border border-red-900 rounded-lg p-4" role="alert">
                <p class="text-red-400 text-center text-sm">{message}</p>
            </div>
        }
    });

    let notice = canceled.then(|| {
        view! {
            <div class={format!("mb-8 max-w-md mx-auto rounded-lg p-4 {}", theme.card_bg)} role="status">
                <p class={format!("text-center text-sm {}", theme.body)}>{CANCELED_NOTICE}</p>
            </div>
        }
    });

    let cards = cards.into_iter().map(|card| view! { <PlanCardView card=card /> }).collect_view();

    view! {
        <div class="min-h-screen">
            <Nav session=session sign_in_url=sign_in_url sign_up_url=sign_up_url />
            <main class="max-w-5xl mx-auto px-6 py-16">
                <div class="text-center mb-12">
                    <h1 class={format!("text-3xl font-light mb-3 {}", theme.heading)}>"Choose Your Plan"</h1>
                    <p class={theme.body}>"Upgrade or change your subscription"</p>
                    {current}
                </div>
                {banner}
                {notice}
                <div class={format!("grid gap-6 {}", layout.classes())} data-testid="plan-grid">{cards}</div>
                <div class="mt-10 text-center">
                    <p class={format!("text-sm {}", theme.muted)}>"All plans include core features · Cancel anytime"</p>
                </div>
            </main>
        </div>
    }
}

#[component]
fn PlanCardView(card: PlanCard) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();

    let frame = if card.is_current {
        format!("border-2 {}", accent.border)
    } else if card.is_popular {
        format!("border-2 {} opacity-80", accent.border)
    } else {
        theme.card_hover.to_string()
    };

    let popular = card.is_popular.then(|| {
        view! {
            <span data-badge="popular">
                <Badge class="absolute -top-3 left-1/2 -translate-x-1/2">"POPULAR"</Badge>
            </span>
        }
    });
    let current = card.is_current.then(|| {
        view! {
            <div data-badge="current">
                <Badge variant={BadgeVariant::Neutral} class="mb-4">"CURRENT"</Badge>
            </div>
        }
    });

    let variant = if card.tier.price == 0 {
        ButtonVariant::Secondary
    } else {
        ButtonVariant::Primary
    };
    let label = card.button_label();
    let action = if card.disabled() {
        view! {
            <Button disabled=true size={ButtonSize::Block} class="text-sm">{label}</Button>
        }
        .into_any()
    } else {
        view! {
            <form method="post" action="/choose-plan" x-data="{ busy: false }" x-on:submit="busy = true">
                <input type="hidden" name="tier" value={card.tier.name.clone()} />
                <Button variant=variant size={ButtonSize::Block} button_type="submit" class="text-sm">
                    <span x-show="!busy">{label}</span>
                    <span x-show="busy" x-cloak>"Processing..."</span>
                </Button>
            </form>
        }
        .into_any()
    };

    view! {
        <Card class={format!("relative p-6 {frame}")}>
            {popular}
            {current}
            <h3 class={format!("text-lg font-medium mb-2 {}", theme.heading)}>{card.tier.label().to_string()}</h3>
            <div class="mb-4">
                <span class={format!("text-3xl font-light {}", theme.heading)}>{format_price(card.tier.price)}</span>
                <span class={format!("text-sm {}", theme.body)}>"/month"</span>
            </div>
            <p class={format!("text-sm mb-6 {}", theme.body)}>{format_limit(card.tier.limit, "month")}</p>
            {action}
            <FeatureChecklist features={card.tier.features} />
        </Card>
    }
}
