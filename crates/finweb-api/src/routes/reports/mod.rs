//! Report routes - Summary metrics, report text and download
//!
//! Structure:
//! - api.rs: JSON API, text and download endpoints
//! - page.rs: Metrics and report fragments

pub mod api;
pub mod page;

pub use api::{api_report, api_summary, download_report, session_report};
pub use page::{render_metrics, render_report};
