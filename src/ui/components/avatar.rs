//! Initial-letter avatar.

use leptos::prelude::*;

use crate::ui::use_branding;

/// Round avatar showing a single initial on the accent color.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Avatar initial=user.initial() />
/// }
/// ```
#[component]
pub fn Avatar(
    /// Text shown in the circle.
    #[prop(into)]
    initial: String,
    /// Size class (e.g., "h-8 w-8").
    #[prop(default = "h-8 w-8")]
    size: &'static str,
) -> impl IntoView {
    let accent = use_branding().accent();
    let classes = format!(
        "flex shrink-0 items-center justify-center rounded-full text-sm font-medium text-white {size} {}",
        accent.bg
    );

    view! {
        <span class=classes>{initial}</span>
    }
}
