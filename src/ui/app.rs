//! Document shell and the render entry point.

use std::sync::Arc;

use leptos::prelude::*;

use crate::branding::Branding;
use crate::ui::use_branding;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";
const HTMX_SRC: &str = "https://unpkg.com/htmx.org@2.0.8";
const ALPINE_SRC: &str = "https://unpkg.com/alpinejs@3.14.9/dist/cdn.min.js";
const CLOAK_STYLE: &str = "[x-cloak]{display:none !important}";

/// Render a full HTML page with `branding` in scope for every component.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use leptos::prelude::*;
/// use saas_starter::branding::Branding;
/// use saas_starter::ui::render_page;
///
/// let html = render_page(Arc::new(Branding::default()), "Home", || {
///     view! { <p>"Hello"</p> }
/// });
/// assert!(html.starts_with("<!DOCTYPE html>"));
/// assert!(html.contains("Hello"));
/// ```
pub fn render_page<F, V>(branding: Arc<Branding>, title: &str, body: F) -> String
where
    F: FnOnce() -> V + Send + 'static,
    V: IntoView + 'static,
{
    let title = title.to_string();
    let owner = Owner::new();
    owner.with(move || {
        provide_context(branding);
        let html = view! { <Document title=title>{body()}</Document> }.to_html();
        format!("<!DOCTYPE html>{html}")
    })
}

/// Render a page fragment (e.g. an HTMX swap target) with `branding` in scope.
pub fn render_fragment<F, V>(branding: Arc<Branding>, body: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView + 'static,
{
    let owner = Owner::new();
    owner.with(move || {
        provide_context(branding);
        body().to_html()
    })
}

/// HTML document with head assets and the themed body.
#[component]
fn Document(
    /// Page title, shown before the app name.
    title: String,
    /// Page content.
    children: Children,
) -> impl IntoView {
    let branding = use_branding();
    let theme = branding.theme();
    let full_title = if title.is_empty() {
        branding.app_name.clone()
    } else {
        format!("{title} | {}", branding.app_name)
    };
    let body_classes = format!("min-h-screen antialiased {} {}", theme.page_bg, theme.body);

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name="description" content={branding.tagline.clone()} />
                <meta name="theme-color" content={branding.accent().hex} />
                <title>{full_title}</title>
                <link rel="icon" href="/static/favicon.svg" type="image/svg+xml" />
                <style inner_html=CLOAK_STYLE></style>
                <script src=TAILWIND_CDN></script>
                <script src=HTMX_SRC></script>
                <script defer src=ALPINE_SRC></script>
            </head>
            <body class=body_classes>
                {children()}
            </body>
        </html>
    }
}
