use axum::{
    Form, Router,
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Datelike;
use leptos::prelude::*;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use tracing::{error, info, warn};

use crate::AppState;
use crate::config::AppConfig;
use crate::dashboard::{DashboardController, DashboardState};
use crate::dream::{DreamFacade, PortalRequest, Tier};
use crate::plans::{ChooserState, PlanAction, plan_cards, select};
use crate::session::{SessionContainer, cookie};
use crate::ui::app::render_fragment;
use crate::ui::pages::{ChoosePlanPage, CompletePage, DashboardBody, DashboardPage, LandingPage};
use crate::ui::render_page;

/// Banner shown when checkout returns without a redirect URL.
pub const CHECKOUT_FAILED: &str = "Failed to create checkout session";

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let api = DreamFacade::connect(
        config.dream.publishable_key(),
        &config.dream.base_url,
        &config.dream.auth_url,
        config.dream.timeout(),
    )?;

    info!(
        name: "dream.config.loaded",
        base_url = %config.dream.base_url,
        auth_url = %config.dream.auth_url,
        "Dream API client configured"
    );

    let state = AppState::new(Arc::clone(&config), api);
    let app = router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        public_url = %config.server.public_url,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .route("/", get(landing))
        .route("/choose-plan", get(choose_plan).post(select_plan))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/track", post(track_usage))
        .route("/complete", get(complete))
        .route("/account", get(account))
        .route("/billing/portal", post(billing_portal))
        .route("/sign-out", post(sign_out))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Render the public pages to `dir` without starting a server.
///
/// Without a publishable key the pages render against a detached facade:
/// hosted auth links become `#` and the pricing section is empty.
pub async fn export_static(config: Arc<AppConfig>, dir: &Path) -> anyhow::Result<()> {
    let api = match config.dream.publishable_key() {
        Some(_) => DreamFacade::connect(
            config.dream.publishable_key(),
            &config.dream.base_url,
            &config.dream.auth_url,
            config.dream.timeout(),
        )?,
        None => {
            warn!(name: "export.detached", "No publishable key; exporting with placeholder links");
            DreamFacade::detached()
        }
    };
    let state = AppState::new(config, api);

    let tiers = load_tiers(&state.api).await;
    let session = SessionContainer::new(state.api.clone()).snapshot();
    let sign_up_url = state.api.sign_up_url(&state.url("/choose-plan"));
    let sign_in_url = state.api.sign_in_url(&state.url("/dashboard"));
    let year = chrono::Utc::now().year();

    let landing = render_page(Arc::clone(&state.branding), "Home", move || {
        view! {
            <LandingPage
                session=session
                tiers=tiers
                sign_up_url=sign_up_url
                sign_in_url=sign_in_url
                year=year
            />
        }
    });
    let redirect_ms = state.config.ui.complete_redirect_ms;
    let complete = render_page(Arc::clone(&state.branding), "Welcome", move || {
        view! { <CompletePage redirect_ms=redirect_ms /> }
    });

    tokio::fs::create_dir_all(dir.join("complete")).await?;
    tokio::fs::write(dir.join("index.html"), landing).await?;
    tokio::fs::write(dir.join("complete").join("index.html"), complete).await?;

    info!(name: "export.finished", dir = %dir.display(), "Static pages written");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Page-load helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters every page understands.
#[derive(Debug, Default, Deserialize)]
struct AuthQuery {
    #[serde(rename = "__clerk_ticket")]
    ticket: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DashboardQuery {
    success: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChooserQuery {
    canceled: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SelectPlan {
    tier: String,
}

fn flag_set(value: Option<&str>) -> bool {
    value == Some("true")
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("hx-request")
}

/// Redirect that also works for HTMX requests.
fn redirect(headers: &HeaderMap, to: &str) -> Response {
    if is_htmx(headers) {
        [("HX-Redirect", to.to_string())].into_response()
    } else {
        Redirect::to(to).into_response()
    }
}

/// One page load's session: built from the cookie and an optional ticket.
async fn open_session(state: &AppState, jar: &CookieJar, ticket: Option<&str>) -> SessionContainer {
    let session = SessionContainer::new(state.api.clone());
    if let Err(e) = session
        .initialize(cookie::credential_from(jar), ticket)
        .await
    {
        error!(name: "session.unavailable", error = %e, "Session could not be initialized");
    }
    session
}

async fn load_tiers(api: &DreamFacade) -> Vec<Tier> {
    match api.list_tiers().await {
        Ok(list) => list.tiers,
        Err(e) => {
            error!(name: "tiers.load.failed", error = %e, "Failed to load tiers");
            Vec::new()
        }
    }
}

struct AuthLinks {
    sign_in: String,
    sign_up: String,
}

fn auth_links(state: &AppState) -> AuthLinks {
    AuthLinks {
        sign_in: state.api.sign_in_url(&state.url("/dashboard")),
        sign_up: state.api.sign_up_url(&state.url("/choose-plan")),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET / - Marketing landing page.
async fn landing(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(auth): Query<AuthQuery>,
) -> Response {
    let session = open_session(&state, &jar, auth.ticket.as_deref()).await;
    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);

    let tiers = load_tiers(&state.api).await;
    let links = auth_links(&state);
    let snapshot = session.snapshot();
    let year = chrono::Utc::now().year();

    let html = render_page(Arc::clone(&state.branding), "Home", move || {
        view! {
            <LandingPage
                session=snapshot
                tiers=tiers
                sign_up_url={links.sign_up}
                sign_in_url={links.sign_in}
                year=year
            />
        }
    });
    (jar, Html(html)).into_response()
}

/// GET /choose-plan - Plan chooser.
async fn choose_plan(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(auth): Query<AuthQuery>,
    Query(query): Query<ChooserQuery>,
) -> Response {
    let session = open_session(&state, &jar, auth.ticket.as_deref()).await;
    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);
    let canceled = flag_set(query.canceled.as_deref());
    let tiers = load_tiers(&state.api).await;
    let html = render_chooser(&state, &session, &tiers, ChooserState::default(), canceled);
    (jar, Html(html)).into_response()
}

/// POST /choose-plan - Select a tier.
async fn select_plan(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Form(form): Form<SelectPlan>,
) -> Response {
    let session = open_session(&state, &jar, None).await;
    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);

    if !session.is_signed_in() {
        let sign_in = state.api.sign_in_url(&state.url("/choose-plan"));
        return (jar, redirect(&headers, &sign_in)).into_response();
    }

    let tiers = load_tiers(&state.api).await;
    let mut chooser = ChooserState::default();
    let Some(tier) = tiers.iter().find(|t| t.name == form.tier) else {
        chooser.fail(format!("Unknown plan: {}", form.tier));
        let html = render_chooser(&state, &session, &tiers, chooser, false);
        return (jar, Html(html)).into_response();
    };

    let request = match select(tier, &state.config.server.public_url) {
        PlanAction::GoToDashboard => return (jar, redirect(&headers, "/dashboard")).into_response(),
        PlanAction::Checkout(request) => request,
    };

    chooser.begin_upgrade(&tier.name);
    match session.create_checkout(&request).await {
        Ok(target) => match target.url {
            Some(url) => {
                info!(name: "checkout.created", tier = %request.tier, "Checkout session created");
                return (jar, redirect(&headers, &url)).into_response();
            }
            None => {
                warn!(
                    name: "checkout.missing_url",
                    tier = %request.tier,
                    "Checkout returned no URL"
                );
                chooser.fail(CHECKOUT_FAILED);
            }
        },
        Err(e) => {
            error!(name: "checkout.failed", tier = %request.tier, error = %e, "Checkout failed");
            chooser.fail(e.user_message());
        }
    }

    let html = render_chooser(&state, &session, &tiers, chooser, false);
    (jar, Html(html)).into_response()
}

fn render_chooser(
    state: &AppState,
    session: &SessionContainer,
    tiers: &[Tier],
    chooser: ChooserState,
    canceled: bool,
) -> String {
    let snapshot = session.snapshot();
    let current_plan = if snapshot.is_signed_in {
        snapshot.plan().to_string()
    } else {
        String::new()
    };
    let cards = plan_cards(tiers, &current_plan, &chooser);
    let links = auth_links(state);
    let error = chooser.error;

    render_page(Arc::clone(&state.branding), "Choose Your Plan", move || {
        view! {
            <ChoosePlanPage
                session=snapshot
                cards=cards
                error=error
                canceled=canceled
                sign_in_url={links.sign_in}
                sign_up_url={links.sign_up}
            />
        }
    })
}

/// GET /dashboard - Usage dashboard.
async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(auth): Query<AuthQuery>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let session = open_session(&state, &jar, auth.ticket.as_deref()).await;
    if !session.is_signed_in() {
        let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);
        return (jar, Redirect::to("/")).into_response();
    }

    let success = flag_set(query.success.as_deref());
    let controller = DashboardController::new(session.clone(), state.config.ui.success_settle());
    let mut dash = DashboardState::default();
    controller.load(&mut dash, success).await;

    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);
    let html = render_dashboard(&state, &session, dash, success);
    (jar, Html(html)).into_response()
}

/// POST /dashboard/track - Demo action; HTMX gets the swapped fragment.
async fn track_usage(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    let session = open_session(&state, &jar, None).await;
    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);
    if !session.is_signed_in() {
        return (jar, redirect(&headers, "/")).into_response();
    }

    let controller = DashboardController::new(session.clone(), state.config.ui.success_settle());
    let mut dash = DashboardState::default();
    controller.track(&mut dash).await;
    if dash.usage.is_none() {
        controller.fetch_usage(&mut dash).await;
    }

    let html = if is_htmx(&headers) {
        let plan = session.snapshot().plan().to_string();
        let notice_ms = state.config.ui.notice_ms;
        render_fragment(Arc::clone(&state.branding), move || {
            view! { <DashboardBody plan=plan state=dash notice_ms=notice_ms /> }
        })
    } else {
        render_dashboard(&state, &session, dash, false)
    };
    (jar, Html(html)).into_response()
}

fn render_dashboard(
    state: &AppState,
    session: &SessionContainer,
    dash: DashboardState,
    strip_query: bool,
) -> String {
    let snapshot = session.snapshot();
    let links = auth_links(state);
    let notice_ms = state.config.ui.notice_ms;

    render_page(Arc::clone(&state.branding), "Dashboard", move || {
        view! {
            <DashboardPage
                session=snapshot
                state=dash
                notice_ms=notice_ms
                strip_query=strip_query
                sign_in_url={links.sign_in}
                sign_up_url={links.sign_up}
            />
        }
    })
}

/// GET /complete - Post-sign-up hand-off to the dashboard.
async fn complete(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(auth): Query<AuthQuery>,
) -> Response {
    let session = open_session(&state, &jar, auth.ticket.as_deref()).await;
    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);
    let redirect_ms = state.config.ui.complete_redirect_ms;
    let html = render_page(Arc::clone(&state.branding), "Welcome", move || {
        view! { <CompletePage redirect_ms=redirect_ms /> }
    });
    (jar, Html(html)).into_response()
}

/// GET /account - Hosted account settings.
async fn account(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.api.customer_portal_url())
}

/// POST /billing/portal - Open the billing portal.
async fn billing_portal(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Response {
    let session = open_session(&state, &jar, None).await;
    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);
    if !session.is_signed_in() {
        return (jar, redirect(&headers, "/")).into_response();
    }

    let request = PortalRequest {
        return_url: state.url("/dashboard"),
    };
    let target = match session.open_portal(&request).await {
        Ok(target) => target.url,
        Err(e) => {
            error!(name: "billing.portal.failed", error = %e, "Failed to open billing portal");
            None
        }
    };
    let to = target.unwrap_or_else(|| "/dashboard".to_string());
    (jar, redirect(&headers, &to)).into_response()
}

/// POST /sign-out - End the session and go home.
async fn sign_out(State(state): State<AppState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let session = open_session(&state, &jar, None).await;
    if let Err(e) = session.sign_out().await {
        warn!(
            name: "session.sign_out.failed",
            error = %e,
            "Remote sign-out failed; cleared locally"
        );
    }
    let jar = cookie::sync(jar, &session, state.config.server.secure_cookies);
    (jar, redirect(&headers, "/")).into_response()
}
