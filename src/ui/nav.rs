//! Shared navigation bar.
//!
//! The account popover is an Alpine.js toggle: it opens from the avatar
//! button, closes on any pointer interaction outside it, and closes when one
//! of its actions is chosen.

use leptos::prelude::*;

use crate::session::Session;
use crate::ui::components::{Avatar, ButtonSize, ChevronDownIcon, LinkButton};
use crate::ui::use_branding;

/// Landing-page section anchors.
const ANCHORS: [(&str, &str); 3] = [
    ("#features", "Features"),
    ("#pricing", "Pricing"),
    ("#faq", "FAQ"),
];

/// Top navigation bar.
#[component]
pub fn Nav(
    /// Session snapshot of the current page load.
    session: Session,
    /// Hosted sign-in page, `#` without a client.
    #[prop(into)]
    sign_in_url: String,
    /// Hosted sign-up page, `#` without a client.
    #[prop(into)]
    sign_up_url: String,
    /// Show the landing section anchors.
    #[prop(default = false)]
    show_anchors: bool,
) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let nav_classes = format!("sticky top-0 z-50 w-full {}", theme.nav_bg);
    let link_classes = format!("text-sm transition-colors {}", theme.link);

    let brand = match branding.logo.clone() {
        Some(src) => view! {
            <img src=src alt={branding.app_name.clone()} class="h-8 w-auto" />
        }
        .into_any(),
        None => view! {
            <span class={format!("text-xl font-bold {}", theme.heading)}>{branding.app_name.clone()}</span>
        }
        .into_any(),
    };

    let anchors = show_anchors.then(|| {
        ANCHORS
            .iter()
            .map(|(href, label)| {
                view! { <a href={*href} class={link_classes.clone()}>{*label}</a> }
            })
            .collect_view()
    });

    let account = if !session.is_ready {
        view! { <span class={format!("text-sm {}", theme.muted)}>"..."</span> }.into_any()
    } else if session.is_signed_in {
        view! { <AccountMenu session=session /> }.into_any()
    } else {
        view! {
            <div class="flex items-center gap-4">
                <a href=sign_in_url class={link_classes.clone()}>"Sign In"</a>
                <LinkButton href=sign_up_url size={ButtonSize::Sm}>"Get Started"</LinkButton>
            </div>
        }
        .into_any()
    };

    view! {
        <header class=nav_classes>
            <nav class="mx-auto flex h-16 max-w-6xl items-center justify-between px-6">
                <a href="/" class="flex items-center gap-2">{brand}</a>
                <div class="hidden md:flex items-center gap-8">{anchors}</div>
                {account}
            </nav>
        </header>
    }
}

/// Avatar button and its popover for a signed-in visitor.
#[component]
fn AccountMenu(session: Session) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();

    let (email, initial, plan, is_free) = match &session.user {
        Some(user) => (user.email.clone(), user.initial(), user.plan.clone(), user.is_free()),
        None => (String::new(), "?".to_string(), session.plan().to_string(), true),
    };

    let item = format!("block w-full px-4 py-2 text-left text-sm {}", theme.dropdown_item);
    let danger = format!("block w-full px-4 py-2 text-left text-sm {}", theme.danger_item);
    let panel = format!(
        "absolute right-0 mt-2 w-56 rounded-lg py-1 shadow-lg {}",
        theme.dropdown_bg
    );
    let divider = format!("my-1 border-t {}", theme.dropdown_divider);
    let upgrade_label = if is_free { "Upgrade Plan" } else { "Change Plan" };

    let billing = (!is_free).then(|| {
        view! {
            <form method="post" action="/billing/portal">
                <button type="submit" class={item.clone()} x-on:click="open = false">"Billing"</button>
            </form>
        }
    });

    view! {
        <div class="relative" x-data="{ open: false }" x-on:click.outside="open = false">
            <button
                type="button"
                class={format!("flex items-center gap-2 rounded-lg p-1 {}", theme.button_hover)}
                x-on:click="open = !open"
                aria-haspopup="menu"
                x-bind:aria-expanded="open"
            >
                <Avatar initial=initial />
                <ChevronDownIcon class={theme.muted} />
            </button>
            <div class=panel x-show="open" x-cloak x-transition role="menu">
                <div class="px-4 py-3">
                    <p class={format!("truncate text-sm font-medium {}", theme.heading)}>{email}</p>
                    <p class={format!("text-xs {}", theme.muted)}>
                        "Plan: "
                        <span class={format!("font-semibold uppercase {}", accent.text)}>{plan}</span>
                    </p>
                </div>
                <div class={divider.clone()}></div>
                <a href="/dashboard" class={item.clone()} x-on:click="open = false">"Dashboard"</a>
                <a href="/choose-plan" class={item.clone()} x-on:click="open = false">{upgrade_label}</a>
                <a href="/account" class={item.clone()} x-on:click="open = false">"Account Settings"</a>
                {billing}
                <div class=divider></div>
                <form method="post" action="/sign-out">
                    <button type="submit" class=danger x-on:click="open = false">"Sign Out"</button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dream::User;

    fn render(session: Session) -> String {
        view! { <Nav session=session sign_in_url="https://auth/sign-in" sign_up_url="https://auth/sign-up" /> }
            .to_html()
    }

    fn signed_in(plan: &str) -> Session {
        Session {
            is_ready: true,
            is_signed_in: true,
            user: Some(User {
                email: "grace@example.com".into(),
                plan: plan.into(),
            }),
        }
    }

    #[test]
    fn placeholder_before_ready() {
        let html = render(Session::default());
        assert!(html.contains("..."));
        assert!(!html.contains("Sign In"));
    }

    #[test]
    fn signed_out_links_to_hosted_pages() {
        let html = render(Session {
            is_ready: true,
            ..Session::default()
        });
        assert!(html.contains("https://auth/sign-in"));
        assert!(html.contains("Get Started"));
    }

    #[test]
    fn paid_plan_menu_has_billing() {
        let html = render(signed_in("pro"));
        assert!(html.contains("grace@example.com"));
        assert!(html.contains("Change Plan"));
        assert!(html.contains("Billing"));
        assert!(html.contains("Sign Out"));
        assert!(html.contains("x-on:click.outside"));
    }

    #[test]
    fn free_plan_menu_has_no_billing() {
        let html = render(signed_in("free"));
        assert!(html.contains("Upgrade Plan"));
        assert!(!html.contains("/billing/portal"));
    }
}
