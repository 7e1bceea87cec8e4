//! Button and link-button components with variants and sizes.

use leptos::prelude::*;

use crate::branding::{AccentPalette, ThemePalette};
use crate::ui::use_branding;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled with the accent color.
    #[default]
    Primary,
    /// Bordered, theme colored.
    Secondary,
    /// Text-only, theme colored.
    Ghost,
    /// Greyed out and inert.
    Disabled,
}

impl ButtonVariant {
    /// Get CSS classes for this variant under the given palettes.
    #[must_use]
    pub fn classes(self, accent: &AccentPalette, theme: &ThemePalette) -> String {
        match self {
            Self::Primary => format!("{} {} text-white", accent.bg, accent.bg_hover),
            Self::Secondary => theme.button_secondary.to_string(),
            Self::Ghost => format!("{} {}", theme.link, theme.button_hover),
            Self::Disabled => format!("{} cursor-not-allowed", theme.button_disabled),
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Small button.
    Sm,
    /// Medium button (default).
    #[default]
    Md,
    /// Large call-to-action.
    Lg,
    /// Full card width.
    Block,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "px-4 py-2 text-sm",
            Self::Md => "px-6 py-3",
            Self::Lg => "px-8 py-4 text-lg",
            Self::Block => "w-full py-3",
        }
    }
}

const BASE_CLASSES: &str = "inline-flex items-center justify-center gap-2 rounded-lg font-semibold \
                            transition-colors focus-visible:outline-none focus-visible:ring-2 \
                            focus-visible:ring-offset-2";

fn classes(variant: ButtonVariant, size: ButtonSize, extra: &str) -> String {
    let branding = use_branding();
    format!(
        "{BASE_CLASSES} {} {} {extra}",
        variant.classes(&branding.accent(), &branding.theme()),
        size.classes()
    )
}

/// Form or action button.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button variant=ButtonVariant::Primary button_type="submit">
///         "Track Usage"
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Md)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes.
    #[prop(into, default = String::new())]
    class: String,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let variant = if disabled { ButtonVariant::Disabled } else { variant };

    view! {
        <button type=button_type class={classes(variant, size, &class)} disabled=disabled>
            {children()}
        </button>
    }
}

/// Anchor styled as a button.
#[component]
pub fn LinkButton(
    /// Link target.
    #[prop(into)]
    href: String,
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Md)]
    size: ButtonSize,
    /// Additional CSS classes.
    #[prop(into, default = String::new())]
    class: String,
    /// Link content.
    children: Children,
) -> impl IntoView {
    view! {
        <a href=href class={classes(variant, size, &class)}>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branding::{Accent, Theme};

    #[test]
    fn primary_uses_accent_fill() {
        let classes =
            ButtonVariant::Primary.classes(&Accent::Sky.palette(), &Theme::Dark.palette());
        assert!(classes.contains("bg-sky-600"));
        assert!(classes.contains("text-white"));
    }

    #[test]
    fn disabled_button_renders_inert() {
        let html = view! { <Button disabled=true>"Current Plan"</Button> }.to_html();
        assert!(html.contains("disabled"));
        assert!(html.contains("cursor-not-allowed"));
        assert!(html.contains("Current Plan"));
    }
}
