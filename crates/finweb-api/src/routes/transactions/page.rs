//! Transaction form and table rendering

use chrono::NaiveDate;
use finweb_core::{Category, TransactionKind, TransactionRow};
use finweb_utils::{escape_html, with_currency};

/// Add-transaction form, posted by HTMX to `/transactions`
pub fn render_transaction_form(today: NaiveDate) -> String {
    let kind_options: String = TransactionKind::ALL
        .iter()
        .map(|kind| format!("<option value='{0}'>{0}</option>", kind.label()))
        .collect();
    let category_options: String = Category::ALL
        .iter()
        .map(|category| format!("<option value='{0}'>{0}</option>", category.as_str()))
        .collect();

    format!(
        r#"<form hx-post='/transactions' hx-target='#form-result' hx-swap='innerHTML' class='space-y-4'>
            <h3 class='text-lg font-semibold'>Add Transaction</h3>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Date</label>
                <input type='date' name='date' value='{}' required class='w-full px-3 py-2 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Type</label>
                <select name='kind' class='w-full px-3 py-2 border rounded-lg focus:ring-2 focus:ring-indigo-500'>{}</select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Category</label>
                <select name='category' class='w-full px-3 py-2 border rounded-lg focus:ring-2 focus:ring-indigo-500'>{}</select>
            </div>
            <div>
                <label class='block text-sm font-medium text-gray-700 mb-1'>Amount</label>
                <input type='number' name='amount' min='0' step='0.01' value='0' required class='w-full px-3 py-2 border rounded-lg focus:ring-2 focus:ring-indigo-500'>
            </div>
            <button type='submit' class='w-full px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Add Transaction</button>
        </form>
        <div id='form-result' class='mt-4'></div>"#,
        today.format("%Y-%m-%d"),
        kind_options,
        category_options
    )
}

/// Table of all rows in insertion order
pub fn render_transaction_table(rows: &[TransactionRow], currency: &str) -> String {
    let mut html = String::from(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
        <h3 class='text-lg font-semibold mb-4'>Transactions</h3>
        <div class='overflow-x-auto'><table class='w-full text-sm'>
        <thead class='bg-gray-50'><tr>
            <th class='px-4 py-2 text-left'>Date</th>
            <th class='px-4 py-2 text-left'>Type</th>
            <th class='px-4 py-2 text-left'>Category</th>
            <th class='px-4 py-2 text-right'>Amount</th>
        </tr></thead><tbody>"#,
    );

    for row in rows {
        let color = match row.kind {
            TransactionKind::Income => "text-green-600",
            TransactionKind::Expense => "text-red-600",
        };
        html.push_str(&format!(
            r#"<tr class='border-b'><td class='px-4 py-2'>{}</td><td class='px-4 py-2'>{}</td><td class='px-4 py-2'>{}</td><td class='px-4 py-2 text-right font-medium {}'>{}</td></tr>"#,
            row.date.format("%Y-%m-%d"),
            row.kind,
            row.category,
            color,
            escape_html(&with_currency(currency, row.amount))
        ));
    }

    html.push_str("</tbody></table></div></div>");
    html
}

/// Green confirmation shown under the form
pub fn render_success(message: &str) -> String {
    format!(
        r#"<div class='bg-green-50 border border-green-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-green-600'>✓</span><span class='font-medium text-green-800'>{}</span></div></div>"#,
        escape_html(message)
    )
}

/// Red alert shown under the form
pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-lg p-4'><div class='flex items-center gap-2'><span class='text-red-600'>✗</span><span class='font-medium text-red-800'>{}</span></div></div>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_form_lists_kinds_and_categories() {
        let html = render_transaction_form(NaiveDate::from_ymd_opt(2024, 1, 12).unwrap());

        assert!(html.contains("value='2024-01-12'"));
        assert!(html.contains("<option value='Expense'>Expense</option>"));
        for category in Category::ALL {
            assert!(html.contains(&format!("<option value='{}'>", category)));
        }
        assert!(html.contains("min='0'"));
    }

    #[test]
    fn test_table_rows_in_order() {
        let rows = vec![
            TransactionRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
                kind: TransactionKind::Expense,
                category: Category::Rent,
                amount: Decimal::from(15000),
            },
            TransactionRow {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                kind: TransactionKind::Income,
                category: Category::Salary,
                amount: Decimal::from(50000),
            },
        ];
        let html = render_transaction_table(&rows, "₹");

        let rent = html.find("Rent").unwrap();
        let salary = html.find("Salary").unwrap();
        assert!(rent < salary);
        assert!(html.contains("₹ 15,000"));
    }

    #[test]
    fn test_error_fragment_escapes_message() {
        let html = render_error("Invalid category: <b>");
        assert!(html.contains("Invalid category: &lt;b&gt;"));
        assert!(html.contains("bg-red-50"));
    }
}
