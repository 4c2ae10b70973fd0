//! Core ledger processing and business logic

pub mod error;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod types;

pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use ledger::Ledger;
pub use models::{NewTransaction, Transaction, TransactionRow};
pub use reports::{
    CategoryBreakdown, ChartData, ChartDataPoint, ChartType, FinanceReport, ReportSettings, Summary,
    REPORT_FILE_NAME, REPORT_MIME_TYPE,
};
pub use types::{Category, TransactionKind};
