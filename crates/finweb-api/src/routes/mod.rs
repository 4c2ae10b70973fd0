//! Route modules for the API server
//!
//! - dashboard: Dashboard page, content partial, session reset
//! - transactions: Add-transaction form, table, JSON list/create
//! - reports: Summary metrics, report text and download
//! - charts: SVG charts and chart data
//! - settings: Settings page
//!
//! Multi-file modules follow the same layout:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - page.rs: HTML rendering

pub mod charts;
pub mod dashboard;
pub mod reports;
pub mod settings;
pub mod transactions;
