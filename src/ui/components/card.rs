//! Card container themed by the branding palette.

use leptos::prelude::*;

use crate::ui::use_branding;

/// Card container component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Card class="p-6">
///         <h3>"Usage This Month"</h3>
///     </Card>
/// }
/// ```
#[component]
pub fn Card(
    /// Additional CSS classes.
    #[prop(into, default = String::new())]
    class: String,
    /// Whether the card lifts on hover.
    #[prop(default = false)]
    hoverable: bool,
    /// Card content.
    children: Children,
) -> impl IntoView {
    let theme = use_branding().theme();
    let hover = if hoverable { theme.card_hover } else { "" };
    let classes = format!("rounded-xl transition-all {} {hover} {class}", theme.card_bg);

    view! {
        <div class=classes>
            {children()}
        </div>
    }
}
