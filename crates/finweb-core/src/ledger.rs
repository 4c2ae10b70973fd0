//! Session-scoped, append-only transaction ledger

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::error::{CoreError, CoreResult};
use super::models::{Transaction, TransactionRow};
use super::reports::{FinanceReport, ReportSettings, Summary};

/// Ordered sequence of transactions recorded during one session
///
/// Insertion order is preserved and there is no edit or delete; the ledger
/// lives exactly as long as the session that owns it.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    /// Sum of every amount, income and expense alike
    turnover: Decimal,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction
    ///
    /// Rejects non-positive amounts even though `Transaction` constructors
    /// already do, and amounts that would push the turnover past
    /// `Decimal::MAX`. On error the ledger is left untouched.
    ///
    /// Every total, the balance and income + expense are bounded by the
    /// turnover, so the aggregates never overflow.
    pub fn append(&mut self, transaction: Transaction) -> CoreResult<()> {
        if transaction.amount() <= Decimal::ZERO {
            let error = CoreError::non_positive_amount();
            error.log("ledger.append");
            return Err(error);
        }
        let Some(turnover) = self.turnover.checked_add(transaction.amount()) else {
            let error = CoreError::amount_overflow();
            error.log("ledger.append");
            return Err(error);
        };

        log::debug!(
            "Appending {} {} {} on {}",
            transaction.kind_label(),
            transaction.category(),
            transaction.amount(),
            transaction.date()
        );
        self.transactions.push(transaction);
        self.turnover = turnover;
        Ok(())
    }

    /// All transactions in insertion order
    pub fn all_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Table rows in insertion order
    pub fn rows(&self) -> Vec<TransactionRow> {
        self.transactions.iter().map(Transaction::to_row).collect()
    }

    /// Aggregates over the whole ledger
    pub fn summary(&self) -> Summary {
        Summary::from_transactions(&self.transactions)
    }

    /// Text report of the current aggregates
    pub fn report(&self, settings: &ReportSettings, generated_at: NaiveDateTime) -> FinanceReport {
        FinanceReport::new(self.summary(), settings.clone(), generated_at)
    }
}
