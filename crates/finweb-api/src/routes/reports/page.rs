//! Summary metrics and report fragments

use finweb_core::Summary;
use finweb_utils::{escape_html, with_currency};

/// Total Income, Total Expense and Savings cards, with the overspend warning
pub fn render_metrics(summary: &Summary, currency: &str) -> String {
    let savings_color = if summary.balance < rust_decimal::Decimal::ZERO { "text-red-700" } else { "text-indigo-700" };

    let mut html = format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='bg-green-50 p-4 rounded-lg border border-green-200'><p class='text-sm text-green-600'>Total Income</p><p class='text-2xl font-bold text-green-700'>{}</p></div>
            <div class='bg-red-50 p-4 rounded-lg border border-red-200'><p class='text-sm text-red-600'>Total Expense</p><p class='text-2xl font-bold text-red-700'>{}</p></div>
            <div class='bg-indigo-50 p-4 rounded-lg border border-indigo-200'><p class='text-sm text-indigo-600'>Savings</p><p class='text-2xl font-bold {}'>{}</p></div>
        </div>"#,
        escape_html(&with_currency(currency, summary.total_income)),
        escape_html(&with_currency(currency, summary.total_expense)),
        savings_color,
        escape_html(&with_currency(currency, summary.balance)),
    );

    if summary.expenses_exceed_income() {
        html.push_str(
            r#"<div class='bg-yellow-50 border border-yellow-300 text-yellow-800 rounded-lg p-4 mb-6'>⚠ Warning: Expenses exceed Income!</div>"#,
        );
    }
    html
}

/// Preformatted report text with the download link
pub fn render_report(report_text: &str) -> String {
    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <div class='flex items-center justify-between mb-4'>
                <h3 class='text-lg font-semibold'>Report</h3>
                <a href='/report/download' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Download Report</a>
            </div>
            <pre class='font-mono text-sm bg-gray-50 p-4 rounded-lg overflow-x-auto'>{}</pre>
        </div>"#,
        escape_html(report_text)
    )
}
