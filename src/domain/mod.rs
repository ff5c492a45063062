pub mod filter;
pub mod report;
pub mod stats;

pub use filter::ReportFilter;
pub use report::{format_time_ago, Category, Report, ReportId, Status, StatusAction};
pub use stats::ReportStats;
