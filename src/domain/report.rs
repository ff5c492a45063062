//! Community report records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ReportId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Category {
    Security,
    Environment,
    Health,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Security,
        Category::Environment,
        Category::Health,
        Category::Other,
    ];

    /// Wire name used in fixtures and CSV export.
    pub fn id(&self) -> &'static str {
        match self {
            Category::Security => "security",
            Category::Environment => "environment",
            Category::Health => "health",
            Category::Other => "other",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Category::Security => "Security",
            Category::Environment => "Environment",
            Category::Health => "Health",
            Category::Other => "Other",
        }
    }

    /// Unknown names fall back to `Other`.
    pub fn from_id(value: &str) -> Self {
        Self::parse(value).unwrap_or(Category::Other)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| {
                category.id().eq_ignore_ascii_case(value)
                    || category.title().eq_ignore_ascii_case(value)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Status {
    Pending,
    InProgress,
    Resolved,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Resolved];

    pub fn id(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Resolved => "resolved",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Resolved => "Resolved",
        }
    }

    /// Unknown names fall back to `Pending`.
    pub fn from_id(value: &str) -> Self {
        Self::parse(value).unwrap_or(Status::Pending)
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let compact = value.replace([' ', '_'], "-");
        Self::ALL.iter().copied().find(|status| {
            status.id().eq_ignore_ascii_case(&compact) || status.title().eq_ignore_ascii_case(value)
        })
    }

    /// The status action offered by the detail panel, if any.
    ///
    /// Only the forward step is exposed; a resolved report has none.
    pub fn next_action(&self) -> Option<StatusAction> {
        match self {
            Status::Pending => Some(StatusAction::StartWork),
            Status::InProgress => Some(StatusAction::Resolve),
            Status::Resolved => None,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_id(&value)
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.id()
    }
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        Status::from_id(&value)
    }
}

impl From<Status> for &'static str {
    fn from(status: Status) -> Self {
        status.id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusAction {
    StartWork,
    Resolve,
}

impl StatusAction {
    pub fn label(&self) -> &'static str {
        match self {
            StatusAction::StartWork => "Start Work",
            StatusAction::Resolve => "Resolve",
        }
    }

    pub fn key(&self) -> char {
        match self {
            StatusAction::StartWork => 'w',
            StatusAction::Resolve => 'r',
        }
    }

    pub fn target(&self) -> Status {
        match self {
            StatusAction::StartWork => Status::InProgress,
            StatusAction::Resolve => Status::Resolved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub ward: String,
    pub category: Category,
    pub status: Status,
    pub date_reported: DateTime<Utc>,
    pub votes: u32,
    pub reporter: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_urgent: bool,
}

impl Report {
    pub fn urgency_label(&self) -> &'static str {
        if self.is_urgent {
            "Unmark Urgent"
        } else {
            "Mark as Urgent"
        }
    }
}

/// Coarse "time ago" label used on report cards.
pub fn format_time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - date).num_hours();
    if hours < 1 {
        return "Just now".to_string();
    }
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 7 {
        return format!("{days}d ago");
    }
    format!("{}w ago", days / 7)
}
