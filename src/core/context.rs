//! Shared context passed to modules

use chrono::{DateTime, Utc};

use crate::domain::{Report, ReportId};

/// Currently selected item in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selected {
    #[default]
    None,
    Report(ReportId),
}

/// Shared context available to all modules
#[derive(Debug, Clone)]
pub struct Context {
    /// Report open in the detail panel
    pub selected: Selected,

    /// Snapshot of the open report, refreshed from the list by `App::sync_context`
    pub open_report: Option<Report>,

    /// Ids in the filtered grid, in display order
    pub visible: Vec<ReportId>,

    /// Number of card columns at the last draw
    pub grid_columns: usize,

    /// Last text copied through the app
    pub clipboard: Option<String>,

    /// Reference time for relative dates
    pub now: DateTime<Utc>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            selected: Selected::None,
            open_report: None,
            visible: Vec::new(),
            grid_columns: 1,
            clipboard: None,
            now: Utc::now(),
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_id(&self) -> Option<ReportId> {
        match self.selected {
            Selected::Report(id) => Some(id),
            Selected::None => None,
        }
    }

    pub fn set_clipboard(&mut self, content: String) {
        self.clipboard = Some(content);
    }
}
