//! Settings page rendering - Full page endpoints

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use finweb_utils::escape_html;

use crate::AppState;

fn setting(label: &str, value: &str) -> String {
    format!(
        "<div><p class='text-sm text-gray-500'>{}</p><p class='font-medium'>{}</p></div>",
        label,
        escape_html(value)
    )
}

fn section(title: &str, items: &[String]) -> String {
    format!(
        "<div class='bg-white rounded-xl shadow-sm p-6 mb-6'><h3 class='text-lg font-semibold mb-4'>{}</h3><div class='grid grid-cols-2 gap-4'>{}</div></div>",
        title,
        items.join("")
    )
}

pub async fn page_settings(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let config = &state.config;

    let inner_content = [
        "<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>".to_string(),
        section(
            "Server",
            &[
                setting("Host", &config.server.host),
                setting("Port", &config.server.port.to_string()),
                setting("CORS", if config.server.cors { "Enabled" } else { "Disabled" }),
            ],
        ),
        section(
            "Sessions",
            &[
                setting("Cookie", &config.session.cookie_name),
                setting("Idle timeout", &format!("{} min", config.session.idle_timeout_minutes)),
                setting("Max sessions", &config.session.max_sessions.to_string()),
            ],
        ),
        section(
            "Report",
            &[
                setting("Title", &config.report.title),
                setting("File name", &config.report.file_name),
                setting("Timestamp format", &config.report.timestamp_format),
                setting("Currency symbol", &config.currency.symbol),
            ],
        ),
        section(
            "Charts",
            &[
                setting("Size", &format!("{} x {}", config.charts.width, config.charts.height)),
                setting("Palette", &config.charts.colors.join(", ")),
            ],
        ),
    ]
    .concat();

    Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}
