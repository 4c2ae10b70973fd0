//! Aggregation, chart data and the text report

use chrono::NaiveDateTime;
use finweb_config::{ChartConfig, Config};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::models::Transaction;
use super::types::{Category, TransactionKind};

/// Suggested download name for the report
pub const REPORT_FILE_NAME: &str = "Finance_Report.txt";

/// MIME type of the report download
pub const REPORT_MIME_TYPE: &str = "text/plain";

// ==================== Aggregates ====================

/// Aggregate values derived from the full ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    /// Expense totals per category, unordered
    pub expense_by_category: HashMap<Category, Decimal>,
    pub transaction_count: usize,
}

impl Summary {
    /// Reduce a transaction sequence to its aggregates
    ///
    /// Only the public transaction contract is used: the signed amount gives
    /// the magnitude, the kind label decides which total it lands in. Sums
    /// saturate at `Decimal::MAX`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut total_income = Decimal::ZERO;
        let mut total_expense = Decimal::ZERO;
        let mut expense_by_category: HashMap<Category, Decimal> = HashMap::new();

        for tx in transactions {
            let amount = tx.signed_amount().abs();
            if tx.kind_label() == TransactionKind::Income.label() {
                total_income = total_income.saturating_add(amount);
            } else {
                total_expense = total_expense.saturating_add(amount);
                let slot = expense_by_category.entry(tx.category()).or_insert(Decimal::ZERO);
                *slot = slot.saturating_add(amount);
            }
        }

        Self {
            total_income,
            total_expense,
            balance: total_income - total_expense,
            expense_by_category,
            transaction_count: transactions.len(),
        }
    }

    /// True when spending is larger than earnings
    pub fn expenses_exceed_income(&self) -> bool {
        self.total_expense > self.total_income
    }

    /// Expense categories sorted by amount (largest first, ties in category order)
    pub fn category_breakdown(&self) -> Vec<CategoryBreakdown> {
        let total = self.total_expense;
        let mut entries: Vec<CategoryBreakdown> = self
            .expense_by_category
            .iter()
            .map(|(category, amount)| CategoryBreakdown {
                category: *category,
                amount: *amount,
                percentage: percentage_of(*amount, total),
            })
            .collect();

        entries.sort_by(|a, b| b.amount.cmp(&a.amount).then(a.category.cmp(&b.category)));
        entries
    }

    /// Two-bar comparison of total income and total expense
    pub fn income_expense_chart(&self, charts: &ChartConfig) -> ChartData {
        let total = self.total_income.saturating_add(self.total_expense);
        let bars = [
            (TransactionKind::Income, self.total_income, &charts.income_color),
            (TransactionKind::Expense, self.total_expense, &charts.expense_color),
        ];

        ChartData {
            chart_type: ChartType::Bar,
            title: "Income vs Expense".to_string(),
            data_points: bars
                .iter()
                .map(|(kind, amount, color)| ChartDataPoint {
                    label: kind.label().to_string(),
                    value: amount.to_f64().unwrap_or(0.0),
                    percentage: percentage_of(*amount, total),
                    color: color.to_string(),
                })
                .collect(),
        }
    }

    /// Pie slices of expenses per category
    ///
    /// Each category keeps the same palette colour no matter which other
    /// categories are present.
    pub fn expense_category_chart(&self, charts: &ChartConfig) -> ChartData {
        let data_points = self
            .category_breakdown()
            .into_iter()
            .map(|entry| ChartDataPoint {
                label: entry.category.to_string(),
                value: entry.amount.to_f64().unwrap_or(0.0),
                percentage: entry.percentage,
                color: palette_color(charts, entry.category),
            })
            .collect();

        ChartData {
            chart_type: ChartType::Pie,
            title: "Expenses by Category".to_string(),
            data_points,
        }
    }
}

fn percentage_of(amount: Decimal, total: Decimal) -> f64 {
    if total > Decimal::ZERO {
        (amount / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
    } else {
        0.0
    }
}

fn palette_color(charts: &ChartConfig, category: Category) -> String {
    let index = Category::ALL.iter().position(|c| *c == category).unwrap_or(0);
    charts
        .colors
        .get(index % charts.colors.len().max(1))
        .cloned()
        .unwrap_or_else(|| "#C9CBCF".to_string())
}

/// One expense category with its share of total expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub amount: Decimal,
    pub percentage: f64,
}

// ==================== Chart Data ====================

/// Chart type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Pie,
}

/// Chart data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    pub label: String,
    pub value: f64,
    /// Share of the chart total, 0-100
    pub percentage: f64,
    pub color: String,
}

impl ChartDataPoint {
    /// Label in the `12.5%` form shown on pie slices
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Chart data for visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub chart_type: ChartType,
    pub title: String,
    pub data_points: Vec<ChartDataPoint>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }

    /// Largest value in the chart, used to scale bars
    pub fn max_value(&self) -> f64 {
        self.data_points.iter().map(|p| p.value).fold(0.0, f64::max)
    }
}

// ==================== Text Report ====================

/// Presentation settings for the text report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    pub title: String,
    pub currency_symbol: String,
    pub timestamp_format: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ReportSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: config.report.title.clone(),
            currency_symbol: config.currency.symbol.clone(),
            timestamp_format: config.report.timestamp_format.clone(),
        }
    }

    fn money(&self, amount: Decimal) -> String {
        if self.currency_symbol.is_empty() {
            amount.to_string()
        } else {
            format!("{} {}", self.currency_symbol, amount)
        }
    }
}

/// Formatted summary of the ledger with its generation time
#[derive(Debug, Clone)]
pub struct FinanceReport {
    pub summary: Summary,
    pub generated_at: NaiveDateTime,
    settings: ReportSettings,
}

impl FinanceReport {
    pub fn new(summary: Summary, settings: ReportSettings, generated_at: NaiveDateTime) -> Self {
        Self { summary, generated_at, settings }
    }

    /// Render the plain-text report
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for FinanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = &self.settings;
        writeln!(f, "{}", s.title)?;
        writeln!(f, "{}", "-".repeat(s.title.chars().count() + 1))?;
        writeln!(f, "Total Income  : {}", s.money(self.summary.total_income))?;
        writeln!(f, "Total Expense : {}", s.money(self.summary.total_expense))?;
        writeln!(f, "Savings/Loss  : {}", s.money(self.summary.balance))?;
        writeln!(f)?;
        writeln!(f, "Expense Breakdown")?;
        let breakdown = self.summary.category_breakdown();
        if breakdown.is_empty() {
            writeln!(f, "  (no expenses)")?;
        }
        for entry in breakdown {
            writeln!(f, "  {:<12}: {}", entry.category.as_str(), s.money(entry.amount))?;
        }
        writeln!(f)?;
        writeln!(f, "Generated on  : {}", self.generated_at.format(&s.timestamp_format))
    }
}
