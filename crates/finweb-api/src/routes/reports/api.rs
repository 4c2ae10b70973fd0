//! Reports API endpoints - JSON summary, report text and download

use axum::extract::State;
use axum::http::header;
use axum::response::Response;
use axum::Json;
use finweb_core::{FinanceReport, ReportSettings, REPORT_MIME_TYPE};

use crate::session::SessionHandle;
use crate::AppState;

/// Build the report for the session's ledger, stamped with the local time
pub async fn session_report(state: &AppState, session: &SessionHandle) -> FinanceReport {
    let settings = ReportSettings::from_config(&state.config);
    let generated_at = chrono::Local::now().naive_local();
    state
        .sessions
        .read_ledger(session, |ledger| ledger.report(&settings, generated_at))
        .await
}

/// Get ledger summary (JSON API)
pub async fn api_summary(State(state): State<AppState>, session: SessionHandle) -> Response {
    let summary = state.sessions.read_ledger(&session, |ledger| ledger.summary()).await;
    session.attach(Json(summary))
}

/// Get the report as plain text
pub async fn api_report(State(state): State<AppState>, session: SessionHandle) -> Response {
    let report = session_report(&state, &session).await;
    session.attach((
        [(header::CONTENT_TYPE, format!("{}; charset=utf-8", REPORT_MIME_TYPE))],
        report.render(),
    ))
}

/// Download the report as a text attachment
pub async fn download_report(State(state): State<AppState>, session: SessionHandle) -> Response {
    let report = session_report(&state, &session).await;
    let file_name = &state.config.report.file_name;
    log::debug!("Report download as {}", file_name);

    session.attach((
        [
            (header::CONTENT_TYPE, format!("{}; charset=utf-8", REPORT_MIME_TYPE)),
            (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", file_name)),
        ],
        report.render(),
    ))
}
