//! Badge component for pricing and plan labels.

use leptos::prelude::*;

use crate::ui::use_branding;

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Accent fill, used for POPULAR.
    #[default]
    Accent,
    /// Neutral fill, used for CURRENT.
    Neutral,
    /// Accent text on a tinted background, used for the plan name.
    Subtle,
}

/// Badge component for displaying status or labels.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Badge variant=BadgeVariant::Accent>"POPULAR"</Badge>
/// }
/// ```
#[component]
pub fn Badge(
    /// Badge variant.
    #[prop(default = BadgeVariant::Accent)]
    variant: BadgeVariant,
    /// Additional CSS classes.
    #[prop(into, default = String::new())]
    class: String,
    /// Badge content.
    children: Children,
) -> impl IntoView {
    let branding = use_branding();
    let accent = branding.accent();
    let variant_classes = match variant {
        BadgeVariant::Accent => format!("{} text-white", accent.bg),
        BadgeVariant::Neutral => "bg-slate-500 text-white".to_string(),
        BadgeVariant::Subtle => format!("{} bg-slate-500/10", accent.text),
    };
    let classes = format!(
        "inline-flex items-center rounded-full px-3 py-1 text-xs font-bold {variant_classes} {class}"
    );

    view! {
        <span class=classes>
            {children()}
        </span>
    }
}
