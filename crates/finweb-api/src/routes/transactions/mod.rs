//! Transaction routes - Add-transaction form, table, JSON list/create
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Form, table and alert fragments

pub mod api;
pub mod page;

pub use api::{api_create_transaction, api_transactions, htmx_transaction_store, parse_form};
pub use page::{render_error, render_success, render_transaction_form, render_transaction_table};
