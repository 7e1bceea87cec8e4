//! Public marketing page.

use leptos::prelude::*;

use crate::branding::{FaqItem, Feature, LogoRef, Step};
use crate::dream::Tier;
use crate::pricing::{GridLayout, format_limit, format_price, popular_flags, sort_by_price};
use crate::session::Session;
use crate::ui::components::{
    Badge, ButtonSize, ButtonVariant, Card, ChevronDownIcon, Icon, IconName, LinkButton,
};
use crate::ui::nav::Nav;
use crate::ui::use_branding;

/// Landing page: hero, social proof, steps, features, pricing, FAQ, final
/// call-to-action and footer.
#[component]
pub fn LandingPage(
    /// Session snapshot of the current page load.
    session: Session,
    /// Tiers as listed by the service, in any order.
    tiers: Vec<Tier>,
    /// Hosted sign-up page redirecting back to the plan chooser.
    #[prop(into)]
    sign_up_url: String,
    /// Hosted sign-in page.
    #[prop(into)]
    sign_in_url: String,
    /// Year shown in the footer copyright.
    year: i32,
) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let signed_in = session.is_signed_in;

    view! {
        <div class={format!("min-h-screen {}", theme.heading)}>
            <Nav session=session sign_in_url=sign_in_url sign_up_url={sign_up_url.clone()} show_anchors=true />
            <Hero signed_in=signed_in sign_up_url={sign_up_url.clone()} />
            <SocialProofSection />
            <HowItWorksSection />
            <FeaturesSection />
            <PricingSection tiers=tiers signed_in=signed_in sign_up_url={sign_up_url.clone()} />
            <FaqSection />
            <FinalCtaSection signed_in=signed_in sign_up_url=sign_up_url />
            <SiteFooter year=year />
        </div>
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sections
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn Hero(signed_in: bool, sign_up_url: String) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let hero = branding.hero.clone();
    let has_image = hero.image.is_some();

    let grid = if has_image { "grid lg:grid-cols-2 gap-12 items-center" } else { "grid" };
    let copy = if has_image { "" } else { "text-center max-w-4xl mx-auto" };
    let actions = if has_image {
        "flex flex-col sm:flex-row gap-4"
    } else {
        "flex flex-col sm:flex-row gap-4 justify-center"
    };

    let cta = if signed_in {
        view! { <LinkButton href="/dashboard" size={ButtonSize::Lg}>"Go to Dashboard"</LinkButton> }.into_any()
    } else {
        view! { <LinkButton href=sign_up_url size={ButtonSize::Lg}>{hero.cta.clone()}</LinkButton> }.into_any()
    };

    let subtext = hero.cta_subtext.clone().map(|text| {
        view! { <p class={format!("mt-4 text-sm {}", theme.muted)}>{text}</p> }
    });

    let image = hero.image.clone().map(|src| {
        view! {
            <div class="relative">
                <img src=src alt="Product" class={format!("rounded-xl shadow-2xl {}", theme.card_bg)} />
            </div>
        }
    });

    view! {
        <section class="py-20 px-6">
            <div class="max-w-6xl mx-auto">
                <div class=grid data-testid="hero-grid">
                    <div class=copy>
                        <h1 class={format!("text-4xl md:text-5xl lg:text-6xl font-semibold tracking-tight mb-6 {}", theme.heading)}>
                            {hero.headline.clone()}
                        </h1>
                        <p class={format!("text-lg md:text-xl mb-10 max-w-2xl {}", theme.body)}>
                            {hero.subheadline.clone()}
                        </p>
                        <div class=actions>{cta}</div>
                        {subtext}
                    </div>
                    {image}
                </div>
            </div>
        </section>
    }
}

#[component]
fn SocialProofSection() -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let proof = &branding.social_proof;

    proof.is_visible().then(|| {
        let logos = proof
            .logos
            .iter()
            .cloned()
            .map(|LogoRef { name, src }| {
                view! {
                    <img
                        src=src
                        alt=name
                        class="h-8 md:h-10 opacity-50 hover:opacity-80 transition-opacity grayscale"
                    />
                }
            })
            .collect_view();

        view! {
            <section class={format!("py-12 px-6 border-y {}", theme.dropdown_divider)}>
                <div class="max-w-6xl mx-auto text-center">
                    <p class={format!("text-sm mb-8 {}", theme.muted)}>{proof.headline.clone()}</p>
                    <div class="flex flex-wrap justify-center items-center gap-8 md:gap-12">{logos}</div>
                </div>
            </section>
        }
    })
}

#[component]
fn HowItWorksSection() -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();
    let section = branding.how_it_works.clone();

    let steps = section
        .steps
        .into_iter()
        .map(|Step { number, title, description, icon }| {
            view! {
                <div class="text-center">
                    <div class={format!(
                        "w-14 h-14 rounded-xl flex items-center justify-center mx-auto mb-4 {} {}",
                        theme.card_bg,
                        accent.text
                    )}>
                        <Icon name=icon class="w-6 h-6" />
                    </div>
                    <div class={format!("text-xs font-medium mb-2 {}", theme.muted)}>{format!("STEP {number}")}</div>
                    <h3 class={format!("text-lg font-medium mb-2 {}", theme.heading)}>{title}</h3>
                    <p class={format!("text-sm {}", theme.body)}>{description}</p>
                </div>
            }
        })
        .collect_view();

    view! {
        <section class="py-24 px-6">
            <div class="max-w-4xl mx-auto">
                <SectionHeading headline={section.headline} subheadline={section.subheadline} />
                <div class="grid md:grid-cols-3 gap-8">{steps}</div>
            </div>
        </section>
    }
}

#[component]
fn FeaturesSection() -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();
    let section = branding.features.clone();

    let items = section
        .items
        .into_iter()
        .map(|Feature { title, description, icon }| {
            view! {
                <Card class="p-6" hoverable=true>
                    <div class={format!("w-10 h-10 rounded-lg flex items-center justify-center mb-4 {}", accent.bg)}>
                        <Icon name=icon class="w-5 h-5 text-white" />
                    </div>
                    <h3 class={format!("text-lg font-medium mb-2 {}", theme.heading)}>{title}</h3>
                    <p class={format!("text-sm {}", theme.body)}>{description}</p>
                </Card>
            }
        })
        .collect_view();

    view! {
        <section id="features" class={format!("py-24 px-6 {}", theme.section_alt_bg)}>
            <div class="max-w-6xl mx-auto">
                <SectionHeading headline={section.headline} subheadline={section.subheadline} />
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">{items}</div>
            </div>
        </section>
    }
}

#[component]
fn PricingSection(tiers: Vec<Tier>, signed_in: bool, sign_up_url: String) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();
    let copy = branding.pricing.clone();

    let sorted = sort_by_price(&tiers);
    let popular = popular_flags(&sorted);
    let layout = GridLayout::for_count(sorted.len());

    let cards = sorted
        .into_iter()
        .zip(popular)
        .map(|(tier, is_popular)| {
            let frame = if is_popular {
                format!("border-2 {}", accent.border)
            } else {
                theme.card_hover.to_string()
            };
            let (href, label) = match (signed_in, tier.price == 0) {
                (true, true) => ("/choose-plan".to_string(), "Start Free"),
                (true, false) => ("/choose-plan".to_string(), "Upgrade"),
                (false, true) => (sign_up_url.clone(), "Start Free"),
                (false, false) => (sign_up_url.clone(), "Get Started"),
            };
            let variant = if is_popular {
                ButtonVariant::Primary
            } else {
                ButtonVariant::Secondary
            };

            view! {
                <Card class={format!("relative p-6 {frame}")} >
                    {is_popular.then(|| view! {
                        <Badge class="absolute -top-3 left-1/2 -translate-x-1/2">"POPULAR"</Badge>
                    })}
                    <h3 class={format!("text-lg font-medium mb-2 {}", theme.heading)}>{tier.label().to_string()}</h3>
                    <div class="mb-4">
                        <span class={format!("text-4xl font-light {}", theme.heading)}>{format_price(tier.price)}</span>
                        <span class={theme.body}>"/mo"</span>
                    </div>
                    <p class={format!("text-sm mb-6 {}", theme.body)}>{format_limit(tier.limit, "mo")}</p>
                    <LinkButton href=href variant=variant size={ButtonSize::Block} class="text-sm">{label}</LinkButton>
                    <FeatureChecklist features={tier.features} />
                </Card>
            }
        })
        .collect_view();

    view! {
        <section id="pricing" class="py-24 px-6">
            <div class="max-w-5xl mx-auto">
                <SectionHeading headline={copy.headline} subheadline={copy.subheadline} />
                <div class={format!("grid gap-6 {}", layout.classes())} data-testid="pricing-grid">{cards}</div>
            </div>
        </section>
    }
}

#[component]
fn FaqSection() -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let faq = branding.faq.clone();

    let items = faq
        .items
        .into_iter()
        .enumerate()
        .map(|(i, FaqItem { question, answer })| {
            view! {
                <Card class="overflow-hidden">
                    <button
                        type="button"
                        class={format!("w-full px-6 py-4 text-left flex justify-between items-center transition-colors {}", theme.button_hover)}
                        x-on:click={format!("openFaq = openFaq === {i} ? null : {i}")}
                    >
                        <span class={format!("font-medium {}", theme.heading)}>{question}</span>
                        <span
                            class={format!("transition-transform {}", theme.muted)}
                            x-bind:class={format!("openFaq === {i} && 'rotate-180'")}
                        >
                            <ChevronDownIcon class="w-5 h-5" />
                        </span>
                    </button>
                    <div class="px-6 pb-4" x-show={format!("openFaq === {i}")} x-cloak>
                        <p class={format!("text-sm {}", theme.body)}>{answer}</p>
                    </div>
                </Card>
            }
        })
        .collect_view();

    view! {
        <section id="faq" class={format!("py-24 px-6 {}", theme.section_alt_bg)}>
            <div class="max-w-3xl mx-auto">
                <div class="text-center mb-16">
                    <h2 class={format!("text-3xl font-light mb-3 {}", theme.heading)}>{faq.headline}</h2>
                </div>
                <div class="space-y-4" x-data="{ openFaq: null }">{items}</div>
            </div>
        </section>
    }
}

#[component]
fn FinalCtaSection(signed_in: bool, sign_up_url: String) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let cta = branding.final_cta.clone();

    let action = if signed_in {
        view! { <LinkButton href="/dashboard">"Go to Dashboard"</LinkButton> }.into_any()
    } else {
        view! { <LinkButton href=sign_up_url>{cta.cta}</LinkButton> }.into_any()
    };

    view! {
        <section class="py-24 px-6">
            <div class="max-w-4xl mx-auto text-center">
                <h2 class={format!("text-3xl font-light mb-3 {}", theme.heading)}>{cta.headline}</h2>
                <p class={format!("mb-8 {}", theme.body)}>{cta.subheadline}</p>
                {action}
            </div>
        </section>
    }
}

#[component]
fn SiteFooter(year: i32) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let link_classes = format!("text-sm transition-colors {}", theme.link);

    let links = (!branding.footer.links.is_empty()).then(|| {
        let links = branding
            .footer
            .links
            .iter()
            .map(|link| {
                view! { <a href={link.href.clone()} class={link_classes.clone()}>{link.label.clone()}</a> }
            })
            .collect_view();
        view! { <div class="flex gap-6">{links}</div> }
    });

    view! {
        <footer class={format!("py-8 px-6 {}", theme.footer_bg)}>
            <div class="max-w-6xl mx-auto flex flex-col sm:flex-row justify-between items-center gap-4">
                <p class={format!("text-sm {}", theme.muted)}>{format!("© {year} {}", branding.app_name)}</p>
                {links}
            </div>
        </footer>
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared pieces
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn SectionHeading(headline: String, subheadline: String) -> impl IntoView {
    let theme = use_branding().theme();

    view! {
        <div class="text-center mb-16">
            <h2 class={format!("text-3xl font-light mb-3 {}", theme.heading)}>{headline}</h2>
            <p class={theme.body}>{subheadline}</p>
        </div>
    }
}

/// Check-marked feature list of a pricing card; nothing without features.
#[component]
pub fn FeatureChecklist(features: Vec<String>) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();

    (!features.is_empty()).then(|| {
        let items = features
            .into_iter()
            .map(|feature| {
                view! {
                    <li class={format!("flex items-start gap-2 text-sm {}", theme.body)}>
                        <Icon name={IconName::Check} class={format!("w-4 h-4 mt-0.5 flex-shrink-0 {}", accent.text)} />
                        {feature}
                    </li>
                }
            })
            .collect_view();
        view! { <ul class="mt-6 space-y-2">{items}</ul> }
    })
}
