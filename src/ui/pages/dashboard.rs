//! Usage dashboard page.

use leptos::prelude::*;

use crate::dashboard::{DashboardState, Notice, NoticeKind};
use crate::dream::{UsageLimit, UsageSnapshot};
use crate::session::Session;
use crate::ui::components::{Badge, Button, ButtonSize, ButtonVariant, Card, LinkButton};
use crate::ui::nav::Nav;
use crate::ui::use_branding;

/// Element id swapped by the Track Usage action.
pub const BODY_ID: &str = "dashboard-body";

/// Dashboard: usage card, demo action and upgrade call-to-action.
#[component]
pub fn DashboardPage(
    /// Session snapshot of the current page load.
    session: Session,
    /// Loaded usage and notice.
    state: DashboardState,
    /// Milliseconds before the notice hides itself.
    notice_ms: u64,
    /// Remove `success=true` from the address bar.
    #[prop(default = false)]
    strip_query: bool,
    /// Hosted sign-in page.
    #[prop(into)]
    sign_in_url: String,
    /// Hosted sign-up page.
    #[prop(into)]
    sign_up_url: String,
) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let email = session.email().unwrap_or_default().to_string();
    let plan = session.plan().to_string();
    let is_free = session.user.as_ref().is_none_or(|u| u.is_free());

    let change_label = if is_free { "Upgrade" } else { "Change Plan" };
    let billing = (!is_free).then(|| {
        view! {
            <form method="post" action="/billing/portal">
                <Button variant={ButtonVariant::Secondary} size={ButtonSize::Sm} button_type="submit">"Billing"</Button>
            </form>
        }
    });

    let strip = strip_query.then(|| {
        view! { <div x-data x-init="history.replaceState(null, '', window.location.pathname)"></div> }
    });

    view! {
        <div class="min-h-screen">
            <Nav session=session sign_in_url=sign_in_url sign_up_url=sign_up_url />
            {strip}
            <main class="max-w-4xl mx-auto px-6 py-12">
                <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-4 mb-8">
                    <div>
                        <h1 class={format!("text-2xl font-light mb-1 {}", theme.heading)}>"Dashboard"</h1>
                        <p class={theme.body}>{format!("Welcome back, {email}")}</p>
                    </div>
                    <div class="flex gap-3">
                        <LinkButton href="/choose-plan" variant={ButtonVariant::Secondary} size={ButtonSize::Sm}>
                            {change_label}
                        </LinkButton>
                        {billing}
                    </div>
                </div>
                <DashboardBody plan={plan.clone()} state=state notice_ms=notice_ms />
                {is_free.then(|| view! { <UpgradeCta /> })}
            </main>
        </div>
    }
}

/// Notice, usage card and demo action; the HTMX swap target.
#[component]
pub fn DashboardBody(
    /// Plan shown on the usage card.
    #[prop(into)]
    plan: String,
    /// Loaded usage and notice.
    state: DashboardState,
    /// Milliseconds before the notice hides itself.
    notice_ms: u64,
) -> impl IntoView {
    let theme = use_branding().theme();
    let notice = state
        .notice
        .map(|notice| view! { <NoticeBanner notice=notice notice_ms=notice_ms /> });
    let heading = format!("text-xs font-medium uppercase tracking-wider mb-4 {}", theme.muted);
    let action_heading = heading.clone();

    view! {
        <div id=BODY_ID>
            {notice}
            <div class="grid md:grid-cols-2 gap-6">
                <Card class="p-6">
                    <h2 class=heading>"Usage This Month"</h2>
                    <UsageSummary usage={state.usage} plan=plan />
                </Card>
                <Card class="p-6">
                    <h2 class=action_heading>"Demo Action"</h2>
                    <p class={format!("text-sm mb-4 {}", theme.body)}>
                        "Replace this with your product's main action. Each click tracks usage."
                    </p>
                    <form
                        method="post"
                        action="/dashboard/track"
                        hx-post="/dashboard/track"
                        hx-target={format!("#{BODY_ID}")}
                        hx-swap="outerHTML"
                        hx-disabled-elt="find button"
                        x-data="{ busy: false }"
                        x-on:submit="busy = true"
                    >
                        <Button size={ButtonSize::Block} button_type="submit" class="text-sm">
                            <span x-show="!busy">"Track Usage"</span>
                            <span x-show="busy" x-cloak>"Processing..."</span>
                        </Button>
                    </form>
                </Card>
            </div>
        </div>
    }
}

#[component]
fn UsageSummary(usage: Option<UsageSnapshot>, plan: String) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let accent = branding.accent();

    let Some(usage) = usage else {
        return view! { <div class={theme.body}>"Loading..."</div> }.into_any();
    };

    let limit = match usage.limit {
        UsageLimit::Limited(limit) => Some(limit),
        UsageLimit::Unlimited => None,
    };
    let of_limit = limit.map(|limit| {
        view! { <span class={format!("text-lg {}", theme.body)}>{format!(" / {limit}")}</span> }
    });
    let progress = usage.percent_used().map(|percent| {
        view! {
            <div class={format!("w-full rounded-full h-2 mb-4 {}", theme.progress_bg)}>
                <div
                    class={format!("h-2 rounded-full transition-all {}", accent.bg)}
                    style={format!("width: {percent:.1}%")}
                    role="progressbar"
                ></div>
            </div>
        }
    });

    view! {
        <div class={format!("text-3xl font-light mb-2 {}", theme.heading)}>
            {usage.usage_count.to_string()}
            {of_limit}
        </div>
        {progress}
        <div class="flex items-center gap-2">
            <span class={format!("text-sm {}", theme.body)}>"Plan:"</span>
            <Badge class="rounded">{plan.to_uppercase()}</Badge>
        </div>
    }
    .into_any()
}

#[component]
fn NoticeBanner(notice: Notice, notice_ms: u64) -> impl IntoView {
    let tone = match notice.kind {
        NoticeKind::Success => "bg-emerald-950/50 border border-emerald-900 text-emerald-400",
        NoticeKind::Error => "bg-red-950/50 border border-red-900 text-red-400",
    };

    view! {
        <div
            class={format!("mb-6 px-4 py-3 rounded-lg text-sm {tone}")}
            role="status"
            x-data="{ show: true }"
            x-init={format!("setTimeout(() => show = false, {notice_ms})")}
            x-show="show"
            x-transition
        >
            {notice.text}
        </div>
    }
}

#[component]
fn UpgradeCta() -> impl IntoView {
    let theme = use_branding().theme();

    view! {
        <Card class="mt-8 p-6 text-center">
            <h3 class={format!("text-lg font-medium mb-2 {}", theme.heading)}>"Upgrade Your Plan"</h3>
            <p class={format!("text-sm mb-4 {}", theme.body)}>"Remove limits and unlock all features"</p>
            <LinkButton href="/choose-plan" size={ButtonSize::Sm}>"View Plans"</LinkButton>
        </Card>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{LIMIT_REACHED, UPGRADE_SUCCESS};
    use crate::dream::User;

    fn session(plan: &str) -> Session {
        Session {
            is_ready: true,
            is_signed_in: true,
            user: Some(User {
                email: "ada@example.com".into(),
                plan: plan.into(),
            }),
        }
    }

    fn usage(count: u64, limit: UsageLimit) -> UsageSnapshot {
        UsageSnapshot {
            usage_count: count,
            limit,
            remaining: UsageLimit::Unlimited,
            plan: "free".into(),
        }
    }

    fn render(session: Session, state: DashboardState, strip_query: bool) -> String {
        view! {
            <DashboardPage
                session=session
                state=state
                notice_ms=3000
                strip_query=strip_query
                sign_in_url="#"
                sign_up_url="#"
            />
        }
        .to_html()
    }

    #[test]
    fn free_plan_gets_upgrade_cta_and_no_billing() {
        let html = render(session("free"), DashboardState::default(), false);
        assert!(html.contains("Welcome back, ada@example.com"));
        assert!(html.contains("Upgrade Your Plan"));
        assert!(!html.contains("/billing/portal"));
        assert!(html.contains("Loading..."));
    }

    #[test]
    fn paid_plan_gets_billing() {
        let html = render(session("pro"), DashboardState::default(), false);
        assert!(html.contains("/billing/portal"));
        assert!(html.contains("Change Plan"));
        assert!(!html.contains("Upgrade Your Plan"));
    }

    #[test]
    fn progress_is_capped() {
        let state = DashboardState {
            usage: Some(usage(250, UsageLimit::Limited(100))),
            ..DashboardState::default()
        };
        let html = render(session("free"), state, false);
        assert!(html.contains("width: 100.0%"));
        assert!(html.contains(" / 100"));
    }

    #[test]
    fn unlimited_usage_has_no_bar() {
        let state = DashboardState {
            usage: Some(usage(7, UsageLimit::Unlimited)),
            ..DashboardState::default()
        };
        let html = render(session("pro"), state, false);
        assert!(!html.contains("progressbar"));
    }

    #[test]
    fn notices_are_transient() {
        let state = DashboardState {
            notice: Some(Notice::success(UPGRADE_SUCCESS)),
            ..DashboardState::default()
        };
        let html = render(session("pro"), state, true);
        assert!(html.contains(UPGRADE_SUCCESS));
        assert!(
            html.contains("setTimeout(() =&gt; show = false, 3000)")
                || html.contains("setTimeout(() => show = false, 3000)")
        );
        assert!(html.contains("history.replaceState"));
    }

    #[test]
    fn limit_notice_uses_error_tone() {
        let state = DashboardState {
            notice: Some(Notice::error(LIMIT_REACHED)),
            ..DashboardState::default()
        };
        let html = view! { <DashboardBody plan="free" state=state notice_ms=3000 /> }.to_html();
        assert!(html.contains(LIMIT_REACHED));
        assert!(html.contains("text-red-400"));
    }
}
