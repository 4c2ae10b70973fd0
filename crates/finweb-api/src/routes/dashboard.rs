//! Dashboard routes - Form sidebar, live content and session reset
//!
//! The page itself is static; everything that depends on the ledger lives
//! in `/dashboard/content`, which reloads whenever a response fires the
//! `ledger-changed` event.

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{Html, IntoResponse, Response};

use super::charts::render_charts;
use super::reports::{render_metrics, render_report};
use super::transactions::{render_success, render_transaction_form, render_transaction_table};
use crate::session::{expired_cookie, session_cookie, SessionHandle};
use crate::{AppState, LEDGER_CHANGED_EVENT};
use finweb_core::ReportSettings;

/// Dashboard page with the add-transaction form
pub async fn page_dashboard(headers: HeaderMap) -> Html<String> {
    let today = chrono::Local::now().date_naive();

    let inner_content = format!(
        r#"<div class='mb-6 flex items-center justify-between'>
            <h2 class='text-2xl font-bold'>Personal Finance Dashboard</h2>
            <button hx-post='/session/reset' hx-target='#form-result' hx-confirm='Clear all transactions?' class='px-3 py-2 text-sm border rounded-lg hover:bg-gray-50'>Clear Session</button>
        </div>
        <div class='grid grid-cols-1 lg:grid-cols-4 gap-6'>
            <div class='bg-white rounded-xl shadow-sm p-6 lg:col-span-1'>{}</div>
            <div id='dashboard-content' class='lg:col-span-3 space-y-6' hx-get='/dashboard/content' hx-trigger='load, {} from:body'>
                <p class='text-gray-500 text-center'>Loading...</p>
            </div>
        </div>"#,
        render_transaction_form(today),
        LEDGER_CHANGED_EVENT
    );

    Html(crate::page_response(&headers, "Dashboard", "/dashboard", &inner_content))
}

/// Everything that depends on the ledger, as one fragment
pub fn render_dashboard_content(state: &AppState, ledger: &finweb_core::Ledger) -> String {
    if ledger.is_empty() {
        return "<div class='bg-white rounded-xl shadow-sm p-12 text-center text-gray-500'><p>No transactions added yet.</p></div>".to_string();
    }

    let config = &state.config;
    let summary = ledger.summary();
    let report = ledger.report(&ReportSettings::from_config(config), chrono::Local::now().naive_local());

    [
        render_metrics(&summary, &config.currency.symbol),
        render_transaction_table(&ledger.rows(), &config.currency.symbol),
        render_charts(&summary, &config.charts),
        render_report(&report.render()),
    ]
    .concat()
}

/// HTMX: Dashboard content partial
pub async fn htmx_dashboard_content(State(state): State<AppState>, session: SessionHandle) -> Response {
    let html = state
        .sessions
        .read_ledger(&session, |ledger| render_dashboard_content(&state, ledger))
        .await;
    session.attach(Html(html))
}

/// End the browser's session and forget its cookie
pub async fn session_reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_name = state.sessions.cookie_name().to_string();
    if let Some(id) = session_cookie(&headers, &cookie_name) {
        state.sessions.end(&id).await;
    }

    (
        [
            (header::SET_COOKIE, expired_cookie(&cookie_name)),
            (header::HeaderName::from_static("hx-trigger"), LEDGER_CHANGED_EVENT.to_string()),
        ],
        Html(render_success("Session cleared")),
    )
        .into_response()
}
