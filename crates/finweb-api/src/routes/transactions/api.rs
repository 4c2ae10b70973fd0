//! Transaction API endpoints - JSON API and HTMX form submit
//!
//! Endpoints:
//! - api_transactions: List rows (JSON)
//! - api_create_transaction: Append from JSON, 422 on rejection
//! - htmx_transaction_store: Append from the dashboard form (HTMX)

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use finweb_core::{NewTransaction, TransactionRow};
use std::collections::HashMap;

use super::page::{render_error, render_success};
use crate::session::SessionHandle;
use crate::{ApiError, AppState, LEDGER_CHANGED_EVENT};

/// List transactions in insertion order (JSON API)
pub async fn api_transactions(State(state): State<AppState>, session: SessionHandle) -> Response {
    let rows = state.sessions.read_ledger(&session, |ledger| ledger.rows()).await;
    session.attach(Json(rows))
}

/// Append a transaction (JSON API)
///
/// `amount` may be a decimal string ("1500.50") or a JSON number.
pub async fn api_create_transaction(
    State(state): State<AppState>,
    session: SessionHandle,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Response {
    let result = create_transaction(&state, &session, payload).await;
    session.attach(result)
}

async fn create_transaction(
    state: &AppState,
    session: &SessionHandle,
    payload: Result<Json<NewTransaction>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionRow>), ApiError> {
    let Json(input) = payload.map_err(|rejection| ApiError::BadRequest {
        message: rejection.body_text(),
    })?;
    let transaction = input.parse()?;
    let row = transaction.to_row();

    state
        .sessions
        .with_ledger(session, |ledger| ledger.append(transaction))
        .await?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// Decode an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let decode = |s: &str| {
        let s = s.replace('+', " ");
        urlencoding::decode(&s).map(|v| v.into_owned()).unwrap_or(s)
    };

    let mut params = HashMap::new();
    for pair in body.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            params.insert(decode(key), decode(value));
        }
    }
    params
}

/// HTMX: Store a transaction submitted from the dashboard form
///
/// On success the reply carries `HX-Trigger: ledger-changed` so the
/// dashboard content reloads.
pub async fn htmx_transaction_store(
    State(state): State<AppState>,
    session: SessionHandle,
    body: String,
) -> Response {
    let params = parse_form(&body);
    let field = |name: &str| params.get(name).cloned().unwrap_or_default();
    let input = NewTransaction {
        date: field("date"),
        kind: field("kind"),
        category: field("category"),
        amount: field("amount"),
    };

    let outcome = match input.parse() {
        Ok(transaction) => state.sessions.with_ledger(&session, |ledger| ledger.append(transaction)).await,
        Err(error) => {
            error.log("transactions.store");
            Err(error)
        }
    };

    let response = match outcome {
        Ok(()) => (
            [("HX-Trigger", LEDGER_CHANGED_EVENT)],
            Html(render_success("Transaction Added")),
        )
            .into_response(),
        Err(error) => Html(render_error(&error.to_string())).into_response(),
    };
    session.attach(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_decodes_fields() {
        let params = parse_form("date=2024-01-12&kind=Expense&category=Food&amount=3000.50&note=rent+%26+bills");

        assert_eq!(params["date"], "2024-01-12");
        assert_eq!(params["kind"], "Expense");
        assert_eq!(params["amount"], "3000.50");
        assert_eq!(params["note"], "rent & bills");
    }

    #[test]
    fn test_parse_form_skips_malformed_pairs() {
        let params = parse_form("amount&kind=Income&");
        assert_eq!(params.len(), 1);
        assert_eq!(params["kind"], "Income");
    }
}
