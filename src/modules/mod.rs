//! UI Modules
//!
//! Each module handles its own key input and returns an `Action`:
//! - grid: card cursor over the filtered reports
//! - detail: side panel actions for the open report
//! - export: CSV export of the filtered view

pub mod detail;
pub mod export;
pub mod grid;
