//! Core data models for the ledger

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::{CoreError, CoreResult};
use super::types::{Category, TransactionKind};

/// Fields shared by both transaction variants
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    date: NaiveDate,
    category: Category,
    amount: Decimal,
}

/// A single dated income or expense
///
/// Instances only exist with a strictly positive amount; use
/// [`Transaction::income`], [`Transaction::expense`] or [`Transaction::new`].
#[derive(Debug, Clone, PartialEq)]
pub enum Transaction {
    Income(Entry),
    Expense(Entry),
}

impl Transaction {
    /// Create a transaction of the given kind
    pub fn new(kind: TransactionKind, date: NaiveDate, category: Category, amount: Decimal) -> CoreResult<Self> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::non_positive_amount());
        }
        let entry = Entry { date, category, amount };
        Ok(match kind {
            TransactionKind::Income => Transaction::Income(entry),
            TransactionKind::Expense => Transaction::Expense(entry),
        })
    }

    pub fn income(date: NaiveDate, category: Category, amount: Decimal) -> CoreResult<Self> {
        Self::new(TransactionKind::Income, date, category, amount)
    }

    pub fn expense(date: NaiveDate, category: Category, amount: Decimal) -> CoreResult<Self> {
        Self::new(TransactionKind::Expense, date, category, amount)
    }

    fn entry(&self) -> &Entry {
        match self {
            Transaction::Income(entry) | Transaction::Expense(entry) => entry,
        }
    }

    /// Contribution to the running balance: `+amount` for income, `-amount` for expenses
    pub fn signed_amount(&self) -> Decimal {
        match self {
            Transaction::Income(entry) => entry.amount,
            Transaction::Expense(entry) => -entry.amount,
        }
    }

    /// Kind name used for grouping ("Income" or "Expense")
    pub fn kind_label(&self) -> &'static str {
        self.kind().label()
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Income(_) => TransactionKind::Income,
            Transaction::Expense(_) => TransactionKind::Expense,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.entry().date
    }

    pub fn category(&self) -> Category {
        self.entry().category
    }

    /// Unsigned amount, always greater than zero
    pub fn amount(&self) -> Decimal {
        self.entry().amount
    }

    /// Build a transaction without the amount check, for exercising the ledger's own guard
    #[cfg(test)]
    pub(crate) fn unchecked(kind: TransactionKind, date: NaiveDate, category: Category, amount: Decimal) -> Self {
        let entry = Entry { date, category, amount };
        match kind {
            TransactionKind::Income => Transaction::Income(entry),
            TransactionKind::Expense => Transaction::Expense(entry),
        }
    }

    /// Flat row for tables and JSON responses
    pub fn to_row(&self) -> TransactionRow {
        TransactionRow {
            date: self.date(),
            kind: self.kind(),
            category: self.category(),
            amount: self.amount(),
        }
    }
}

/// Table row view of a transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: Category,
    pub amount: Decimal,
}

/// Raw transaction input as submitted by the add-transaction form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Date in YYYY-MM-DD form
    pub date: String,
    /// "Income" or "Expense"
    pub kind: String,
    /// One of the category names
    pub category: String,
    /// Decimal amount, e.g. "1500.50"; JSON clients may also send a number
    #[serde(deserialize_with = "amount_text")]
    pub amount: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AmountInput {
    Text(String),
    Number(serde_json::Number),
}

/// Accept the amount as a string or a JSON number, keeping its text
fn amount_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match AmountInput::deserialize(deserializer)? {
        AmountInput::Text(text) => text,
        AmountInput::Number(number) => number.to_string(),
    })
}

impl NewTransaction {
    /// Validate the raw fields and build a transaction
    pub fn parse(&self) -> CoreResult<Transaction> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidFormat {
                message: format!("Invalid date: {}", self.date),
            })?;
        let kind = TransactionKind::from_str(&self.kind)
            .map_err(|message| CoreError::InvalidFormat { message })?;
        let category = Category::from_str(&self.category)
            .map_err(|message| CoreError::InvalidFormat { message })?;
        let amount = Decimal::from_str(self.amount.trim())
            .map_err(|_| CoreError::InvalidFormat {
                message: format!("Invalid amount: {}", self.amount),
            })?;

        Transaction::new(kind, date, category, amount)
    }
}
