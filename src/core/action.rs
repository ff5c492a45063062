//! Actions that modules can return to communicate with the app

use std::path::PathBuf;

use crate::domain::{Category, ReportId, Status};

/// Actions returned by modules to communicate state changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Open the detail panel for a report
    Open(ReportId),

    /// Close the detail panel and clear the selection
    CloseDetail,

    /// Flip the urgency flag
    ToggleUrgent(ReportId),

    /// Write a status, no transition check
    SetStatus(ReportId, Status),

    /// Start editing the admin note of a report
    EditNote(ReportId),

    /// Change the grid filter
    Filter(FilterChange),

    /// Export the filtered grid, optionally to an explicit path
    Export(Option<PathBuf>),

    /// Copy text to the system clipboard
    Copy(String),

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Toggle the help popup
    Help,

    /// Request quit
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Category(Option<Category>),
    Status(Option<Status>),
    Search(String),
    Clear,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
