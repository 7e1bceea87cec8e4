//! Branding and page content.
//!
//! Every page reads its copy, accent color and theme from a single
//! [`Branding`] value loaded from the `branding` section of the application
//! configuration. Accent and theme are closed enums: an unknown key fails
//! configuration loading instead of silently falling back.

use serde::Deserialize;

use crate::ui::components::IconName;

/// Branding and marketing content for every page.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Product name shown in the navigation and footer.
    pub app_name: String,
    /// Short tagline used as the page description.
    pub tagline: String,
    /// Logo path (served from the static directory). `None` renders text only.
    pub logo: Option<String>,
    /// Color theme.
    pub theme: Theme,
    /// Primary accent color.
    pub accent_color: Accent,
    pub hero: Hero,
    pub social_proof: SocialProof,
    pub how_it_works: HowItWorks,
    pub features: Features,
    pub pricing: PricingCopy,
    pub faq: Faq,
    pub final_cta: FinalCta,
    pub footer: Footer,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub headline: String,
    pub subheadline: String,
    pub cta: String,
    pub cta_subtext: Option<String>,
    /// Hero image path. When absent the hero is a single centered column.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocialProof {
    pub enabled: bool,
    pub headline: String,
    pub logos: Vec<LogoRef>,
}

impl SocialProof {
    /// The strip renders only when enabled and there is something to show.
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.logos.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogoRef {
    pub name: String,
    pub src: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HowItWorks {
    pub headline: String,
    pub subheadline: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub number: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: IconName,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Features {
    pub headline: String,
    pub subheadline: String,
    pub items: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: IconName,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingCopy {
    pub headline: String,
    pub subheadline: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Faq {
    pub headline: String,
    pub items: Vec<FaqItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FinalCta {
    pub headline: String,
    pub subheadline: String,
    pub cta: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub links: Vec<FooterLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FooterLink {
    pub label: String,
    pub href: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            app_name: "My SaaS".to_string(),
            tagline: "Your tagline here".to_string(),
            logo: None,
            theme: Theme::default(),
            accent_color: Accent::default(),
            hero: Hero::default(),
            social_proof: SocialProof::default(),
            how_it_works: HowItWorks::default(),
            features: Features::default(),
            pricing: PricingCopy::default(),
            faq: Faq::default(),
            final_cta: FinalCta::default(),
            footer: Footer::default(),
        }
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self {
            headline: "Build something amazing".to_string(),
            subheadline: "A brief description of what your product does and why customers will love it."
                .to_string(),
            cta: "Get Started".to_string(),
            cta_subtext: Some("Free to start".to_string()),
            image: None,
        }
    }
}

impl Default for SocialProof {
    fn default() -> Self {
        Self {
            enabled: false,
            headline: "Trusted by teams at".to_string(),
            logos: Vec::new(),
        }
    }
}

impl Default for HowItWorks {
    fn default() -> Self {
        let step = |number: &str, title: &str, description: &str, icon| Step {
            number: number.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon,
        };
        Self {
            headline: "How It Works".to_string(),
            subheadline: "Get started in minutes".to_string(),
            steps: vec![
                step("1", "Sign Up", "Create your free account in seconds.", IconName::User),
                step(
                    "2",
                    "Configure",
                    "Set up your preferences and get started.",
                    IconName::Settings,
                ),
                step("3", "Launch", "Start using the platform immediately.", IconName::Rocket),
            ],
        }
    }
}

impl Default for Features {
    fn default() -> Self {
        let feature = |title: &str, description: &str, icon| Feature {
            title: title.to_string(),
            description: description.to_string(),
            icon,
        };
        Self {
            headline: "Everything You Need".to_string(),
            subheadline: "Powerful features to help you succeed".to_string(),
            items: vec![
                feature(
                    "Easy to Use",
                    "Intuitive interface that anyone can master quickly.",
                    IconName::Check,
                ),
                feature(
                    "Secure",
                    "Enterprise-grade security to protect your data.",
                    IconName::Shield,
                ),
                feature(
                    "Fast",
                    "Lightning-fast performance you can count on.",
                    IconName::Lightning,
                ),
                feature("Analytics", "Detailed insights to track your progress.", IconName::Chart),
                feature("Support", "Friendly support team ready to help.", IconName::User),
                feature("Integrations", "Connect with your favorite tools.", IconName::Globe),
            ],
        }
    }
}

impl Default for PricingCopy {
    fn default() -> Self {
        Self {
            headline: "Simple Pricing".to_string(),
            subheadline: "Start free, upgrade when you need more".to_string(),
        }
    }
}

impl Default for Faq {
    fn default() -> Self {
        let item = |question: &str, answer: &str| FaqItem {
            question: question.to_string(),
            answer: answer.to_string(),
        };
        Self {
            headline: "Frequently Asked Questions".to_string(),
            items: vec![
                item(
                    "How do I get started?",
                    "Simply sign up for a free account and follow our quick setup guide. You will be up and running in minutes.",
                ),
                item(
                    "Can I cancel anytime?",
                    "Yes, you can cancel your subscription at any time. No long-term contracts or hidden fees.",
                ),
                item(
                    "Is my data secure?",
                    "Absolutely. We use industry-standard encryption and security practices to keep your data safe.",
                ),
                item(
                    "Do you offer support?",
                    "Yes, we offer support via email for all plans, with priority support for paid plans.",
                ),
            ],
        }
    }
}

impl Default for FinalCta {
    fn default() -> Self {
        Self {
            headline: "Ready to get started?".to_string(),
            subheadline: "Join thousands of happy customers today.".to_string(),
            cta: "Start Free Trial".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Palettes
// ─────────────────────────────────────────────────────────────────────────────

/// Accent color key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Emerald,
    Sky,
    Violet,
    Rose,
    Amber,
    Zinc,
}

/// Utility classes for an accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentPalette {
    pub bg: &'static str,
    pub bg_hover: &'static str,
    pub text: &'static str,
    pub text_hover: &'static str,
    pub border: &'static str,
    pub hex: &'static str,
}

impl Accent {
    /// Get the class palette for this accent.
    #[must_use]
    pub fn palette(self) -> AccentPalette {
        match self {
            Self::Emerald => AccentPalette {
                bg: "bg-emerald-600",
                bg_hover: "hover:bg-emerald-500",
                text: "text-emerald-600",
                text_hover: "hover:text-emerald-500",
                border: "border-emerald-600",
                hex: "#059669",
            },
            Self::Sky => AccentPalette {
                bg: "bg-sky-600",
                bg_hover: "hover:bg-sky-500",
                text: "text-sky-600",
                text_hover: "hover:text-sky-500",
                border: "border-sky-600",
                hex: "#0284c7",
            },
            Self::Violet => AccentPalette {
                bg: "bg-violet-600",
                bg_hover: "hover:bg-violet-500",
                text: "text-violet-600",
                text_hover: "hover:text-violet-500",
                border: "border-violet-600",
                hex: "#7c3aed",
            },
            Self::Rose => AccentPalette {
                bg: "bg-rose-600",
                bg_hover: "hover:bg-rose-500",
                text: "text-rose-600",
                text_hover: "hover:text-rose-500",
                border: "border-rose-600",
                hex: "#e11d48",
            },
            Self::Amber => AccentPalette {
                bg: "bg-amber-600",
                bg_hover: "hover:bg-amber-500",
                text: "text-amber-600",
                text_hover: "hover:text-amber-500",
                border: "border-amber-600",
                hex: "#d97706",
            },
            Self::Zinc => AccentPalette {
                bg: "bg-zinc-800",
                bg_hover: "hover:bg-zinc-700",
                text: "text-zinc-800",
                text_hover: "hover:text-zinc-700",
                border: "border-zinc-800",
                hex: "#27272a",
            },
        }
    }
}

/// Color theme key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Professional, clean.
    #[default]
    Light,
    /// Modern, bold.
    Dark,
}

/// Utility classes for a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub page_bg: &'static str,
    pub nav_bg: &'static str,
    pub card_bg: &'static str,
    pub section_alt_bg: &'static str,
    pub footer_bg: &'static str,
    pub heading: &'static str,
    pub body: &'static str,
    pub muted: &'static str,
    pub card_hover: &'static str,
    pub link: &'static str,
    pub dropdown_bg: &'static str,
    pub dropdown_divider: &'static str,
    pub dropdown_item: &'static str,
    pub button_hover: &'static str,
    pub danger_item: &'static str,
    pub progress_bg: &'static str,
    pub button_disabled: &'static str,
    pub button_secondary: &'static str,
}

impl Theme {
    /// Get the class palette for this theme.
    #[must_use]
    pub fn palette(self) -> ThemePalette {
        match self {
            Self::Light => ThemePalette {
                page_bg: "bg-slate-50",
                nav_bg: "bg-white border-b border-slate-200",
                card_bg: "bg-white border border-slate-200",
                section_alt_bg: "bg-white",
                footer_bg: "bg-slate-100 border-t border-slate-200",
                heading: "text-slate-900",
                body: "text-slate-600",
                muted: "text-slate-400",
                card_hover: "hover:border-slate-300 hover:shadow-md",
                link: "text-slate-600 hover:text-slate-900",
                dropdown_bg: "bg-white border border-slate-200",
                dropdown_divider: "border-slate-200",
                dropdown_item: "text-slate-600 hover:text-slate-900 hover:bg-slate-100",
                button_hover: "hover:bg-slate-100",
                danger_item: "text-red-600 hover:text-red-700 hover:bg-red-50",
                progress_bg: "bg-slate-200",
                button_disabled: "bg-slate-200 text-slate-400",
                button_secondary: "border border-slate-300 text-slate-600 hover:text-slate-900 hover:border-slate-400",
            },
            Self::Dark => ThemePalette {
                page_bg: "bg-zinc-950",
                nav_bg: "bg-zinc-950/80 backdrop-blur-md border-b border-zinc-800/50",
                card_bg: "bg-zinc-900/70 border border-zinc-700/50",
                section_alt_bg: "bg-zinc-900/40",
                footer_bg: "bg-zinc-950 border-t border-zinc-800",
                heading: "text-white",
                body: "text-zinc-300",
                muted: "text-zinc-500",
                card_hover: "hover:border-zinc-700",
                link: "text-zinc-500 hover:text-zinc-300",
                dropdown_bg: "bg-zinc-900 border border-zinc-800",
                dropdown_divider: "border-zinc-800",
                dropdown_item: "text-zinc-400 hover:text-zinc-100 hover:bg-zinc-800",
                button_hover: "hover:bg-zinc-900",
                danger_item: "text-red-400 hover:text-red-300 hover:bg-zinc-800",
                progress_bg: "bg-zinc-800",
                button_disabled: "bg-zinc-800 text-zinc-500",
                button_secondary: "border border-zinc-700 text-zinc-400 hover:text-zinc-200 hover:border-zinc-600",
            },
        }
    }
}

impl Branding {
    /// Accent palette selected by `accent_color`.
    pub fn accent(&self) -> AccentPalette {
        self.accent_color.palette()
    }

    /// Theme palette selected by `theme`.
    pub fn theme(&self) -> ThemePalette {
        self.theme.palette()
    }
}
