//! Post-sign-up landing spot.

use leptos::prelude::*;

use crate::ui::components::LoaderIcon;
use crate::ui::use_branding;

/// Spinner page that forwards to the dashboard after `redirect_ms`.
#[component]
pub fn CompletePage(
    /// Delay before redirecting, in milliseconds.
    redirect_ms: u64,
) -> impl IntoView {
    let theme = use_branding().theme();

    view! {
        <div
            class="min-h-screen flex items-center justify-center"
            x-data
            x-init={format!("setTimeout(() => window.location.replace('/dashboard'), {redirect_ms})")}
        >
            <div class="text-center">
                <LoaderIcon class={format!("h-8 w-8 mx-auto mb-4 {}", theme.body)} />
                <p class={theme.body}>"Setting up your account..."</p>
                <noscript>
                    <a href="/dashboard" class="underline">"Continue to dashboard"</a>
                </noscript>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirects_after_delay() {
        let html = view! { <CompletePage redirect_ms=500 /> }.to_html();
        assert!(html.contains("Setting up your account..."));
        assert!(html.contains("/dashboard"));
        assert!(html.contains("500)"));
    }
}
