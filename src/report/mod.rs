//! Reporting for the expense tracking application.
//!
//! This module contains the read-only views over a user's entries:
//! - Pure aggregation functions shared by the pages
//! - The monthly charts page (ECharts via charming)
//! - The pivoted date report and the monthly summary

pub mod aggregation;
mod chart_page;
mod month;
mod report_page;
mod summary_page;

pub use chart_page::get_chart_page;
pub use report_page::get_report_page;
pub use summary_page::get_summary_page;
