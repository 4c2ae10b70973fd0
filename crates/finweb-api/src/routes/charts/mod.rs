//! Chart routes - Income/expense bars and expense-by-category pie
//!
//! Structure:
//! - svg.rs: server-side SVG rendering with plotters

pub mod svg;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use finweb_config::ChartConfig;
use finweb_core::{ChartData, Summary};

use crate::session::SessionHandle;
use crate::{ApiError, AppState};

pub use svg::{render_bar_chart, render_pie_chart, ChartResult};

/// Chart names accepted by `/api/charts/:name`
pub const CHART_NAMES: [&str; 2] = ["income-expense", "expense-category"];

/// Chart data for a named chart
pub fn chart_by_name(summary: &Summary, name: &str, config: &ChartConfig) -> Option<ChartData> {
    match name {
        "income-expense" => Some(summary.income_expense_chart(config)),
        "expense-category" => Some(summary.expense_category_chart(config)),
        _ => None,
    }
}

/// Both dashboard charts; the pie is left out when nothing has been spent
pub fn render_charts(summary: &Summary, config: &ChartConfig) -> String {
    let mut html = String::from("<div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>");
    html.push_str(&chart_panel("income-expense", render_bar_chart(&summary.income_expense_chart(config), config)));

    let pie = summary.expense_category_chart(config);
    if !pie.is_empty() {
        html.push_str(&chart_panel("expense-category", render_pie_chart(&pie, config)));
    }
    html.push_str("</div>");
    html
}

fn chart_panel(name: &str, rendered: ChartResult) -> String {
    match rendered {
        Ok(svg) => format!("<div class='bg-white rounded-xl shadow-sm p-4'>{}</div>", svg),
        Err(e) => {
            log::error!("Failed to render {} chart: {}", name, e);
            "<div class='bg-white rounded-xl shadow-sm p-4'><p class='text-sm text-gray-500'>Chart unavailable</p></div>"
                .to_string()
        }
    }
}

/// Get chart data (JSON API)
pub async fn api_chart_data(
    State(state): State<AppState>,
    session: SessionHandle,
    Path(name): Path<String>,
) -> Response {
    let summary = state.sessions.read_ledger(&session, |ledger| ledger.summary()).await;
    let result = chart_by_name(&summary, &name, &state.config.charts)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("chart '{}' (expected one of: {})", name, CHART_NAMES.join(", ")),
        });
    session.attach(result)
}
