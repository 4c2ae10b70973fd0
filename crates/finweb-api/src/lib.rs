//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Dashboard page, content partial, session reset
//! - routes::transactions: Add-transaction form and JSON endpoints
//! - routes::reports: Summary, report text and download
//! - routes::charts: Server-rendered SVG charts
//! - routes::settings: Configuration display

pub mod error;
pub mod routes;
pub mod session;

use axum::{
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use finweb_config::Config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

pub use error::ApiError;
pub use session::{SessionHandle, SessionStore};

/// HTMX event fired after the ledger changes
pub const LEDGER_CHANGED_EVENT: &str = "ledger-changed";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(&config.session)),
            config,
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::charts::api_chart_data;
    use routes::dashboard::{htmx_dashboard_content, page_dashboard, session_reset};
    use routes::reports::{api_report, api_summary, download_report};
    use routes::settings::{api_settings, page_settings};
    use routes::transactions::{api_create_transaction, api_transactions, htmx_transaction_store};

    let cors = state.config.server.cors;

    let router = Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/transactions", get(api_transactions).post(api_create_transaction))
        .route("/api/summary", get(api_summary))
        .route("/api/report", get(api_report))
        .route("/api/charts/:name", get(api_chart_data))
        .route("/api/settings", get(api_settings))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/dashboard/content", get(htmx_dashboard_content))
        .route("/transactions", post(htmx_transaction_store))
        .route("/report/download", get(download_report))
        .route("/session/reset", post(session_reset))
        .with_state(state);

    if cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Finweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [("/dashboard", "Dashboard", "📊"), ("/settings", "Settings", "⚙️")];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>Finweb</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, icon) in &links {
        let is_active = current_path.starts_with(path);
        let active_class = if is_active { "bg-indigo-50 text-indigo-600" } else { "text-gray-600 hover:bg-gray-50" };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#, inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is stopped.
pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let router = create_router(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Finweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /report/download (Text report)");
    log::info!("  - /settings (Configuration)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    fn session_cookie_pair(response: &Response) -> String {
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn form_post(body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .uri("/transactions")
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("hx-request", "true");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri).method(Method::GET);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(AppState::new(Config::default()));
        let response = app.oneshot(get("/api/health", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn test_dashboard_page_loads_content_partial() {
        let app = create_router(AppState::new(Config::default()));
        let response = app.oneshot(get("/", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("hx-get='/dashboard/content'"));
        assert!(html.contains("ledger-changed from:body"));
        assert!(html.contains("hx-post='/transactions'"));
    }

    #[tokio::test]
    async fn test_form_post_adds_transaction_to_session() {
        let state = AppState::new(Config::default());
        let app = create_router(state.clone());

        let response = app
            .clone()
            .oneshot(form_post("date=2024-01-01&kind=Income&category=Salary&amount=50000", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("hx-trigger").unwrap(), LEDGER_CHANGED_EVENT);
        let cookie = session_cookie_pair(&response);
        assert!(cookie.starts_with("finweb_session="));
        assert!(body_text(response).await.contains("Transaction Added"));

        let response = app.clone().oneshot(get("/dashboard/content", Some(&cookie))).await.unwrap();
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        let html = body_text(response).await;
        assert!(html.contains("₹ 50,000"));
        assert!(html.contains("Salary"));
        assert!(html.contains("Download Report"));
        assert!(html.contains("<svg"));

        // a browser without the cookie sees its own, empty ledger
        let response = app.oneshot(get("/dashboard/content", None)).await.unwrap();
        assert!(body_text(response).await.contains("No transactions added yet."));
        assert_eq!(state.sessions.len().await, 2);
    }

    #[tokio::test]
    async fn test_zero_amount_rejected_without_change() {
        let app = create_router(AppState::new(Config::default()));

        let response = app
            .clone()
            .oneshot(form_post("date=2024-01-01&kind=Expense&category=Food&amount=0", None))
            .await
            .unwrap();
        assert!(response.headers().get("hx-trigger").is_none());
        let cookie = session_cookie_pair(&response);
        let html = body_text(response).await;
        assert!(html.contains("Amount must be positive"));
        assert!(html.contains("bg-red-50"));

        let response = app.oneshot(get("/api/transactions", Some(&cookie))).await.unwrap();
        let rows: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_json_create_and_summary() {
        let app = create_router(AppState::new(Config::default()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/transactions")
                    .method(Method::POST)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"date":"2024-01-10","kind":"Expense","category":"Rent","amount":"15000"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = session_cookie_pair(&response);

        let response = app.oneshot(get("/api/summary", Some(&cookie))).await.unwrap();
        let summary: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(summary["total_expense"], "15000");
        assert_eq!(summary["balance"], "-15000");
        assert_eq!(summary["expense_by_category"]["Rent"], "15000");
    }

    fn json_post(body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .uri("/api/transactions")
            .method(Method::POST)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_json_create_accepts_numeric_amount() {
        let app = create_router(AppState::new(Config::default()));

        let response = app
            .clone()
            .oneshot(json_post(r#"{"date":"2024-01-10","kind":"Expense","category":"Rent","amount":15000}"#, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = session_cookie_pair(&response);

        let response = app.oneshot(get("/api/summary", Some(&cookie))).await.unwrap();
        let summary: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(summary["total_expense"], "15000");
    }

    #[tokio::test]
    async fn test_json_create_rejects_amount_past_ledger_range() {
        let app = create_router(AppState::new(Config::default()));
        let big = r#"{"date":"2024-01-01","kind":"Income","category":"Salary","amount":"50000000000000000000000000000"}"#;

        let response = app.clone().oneshot(json_post(big, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookie = session_cookie_pair(&response);

        let response = app.clone().oneshot(json_post(big, Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["message"], "Amount too large for this ledger");

        let response = app.oneshot(get("/dashboard/content", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("<svg"));
    }

    #[tokio::test]
    async fn test_json_create_rejects_non_positive_amount() {
        let app = create_router(AppState::new(Config::default()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/transactions")
                    .method(Method::POST)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"date":"2024-01-01","kind":"Expense","category":"Food","amount":"-5"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_report_download_headers() {
        let app = create_router(AppState::new(Config::default()));
        let response = app
            .clone()
            .oneshot(form_post("date=2024-01-12&kind=Expense&category=Food&amount=3000", None))
            .await
            .unwrap();
        let cookie = session_cookie_pair(&response);

        let response = app.oneshot(get("/report/download", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"Finance_Report.txt\""
        );

        let text = body_text(response).await;
        assert!(text.starts_with("PERSONAL FINANCE REPORT\n"));
        assert!(text.contains("Total Expense : ₹ 3000\n"));
        assert!(text.contains("Savings/Loss  : ₹ -3000\n"));
        assert!(text.contains("  Food        : ₹ 3000\n"));
    }

    #[tokio::test]
    async fn test_chart_data_endpoint() {
        let app = create_router(AppState::new(Config::default()));

        let response = app.clone().oneshot(get("/api/charts/income-expense", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let chart: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(chart["chart_type"], "bar");
        assert_eq!(chart["data_points"].as_array().unwrap().len(), 2);

        let response = app.oneshot(get("/api/charts/histogram", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_session_reset_clears_ledger() {
        let state = AppState::new(Config::default());
        let app = create_router(state.clone());
        let response = app
            .clone()
            .oneshot(form_post("date=2024-01-01&kind=Income&category=Salary&amount=100", None))
            .await
            .unwrap();
        let cookie = session_cookie_pair(&response);
        assert_eq!(state.sessions.len().await, 1);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/session/reset")
                    .method(Method::POST)
                    .header(header::COOKIE, &cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_settings_api() {
        let app = create_router(AppState::new(Config::default()));
        let response = app.oneshot(get("/api/settings", None)).await.unwrap();

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["session"]["cookie_name"], "finweb_session");
        assert_eq!(json["report"]["file_name"], "Finance_Report.txt");
    }
}
