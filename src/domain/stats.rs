use super::report::{Report, Status};

/// Headline counts for the stat tiles, taken over the full list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportStats {
    pub total: usize,
    pub pending: usize,
    pub urgent: usize,
    pub resolved: usize,
}

impl ReportStats {
    pub fn collect(reports: &[Report]) -> Self {
        reports.iter().fold(Self::default(), |mut stats, report| {
            stats.total += 1;
            match report.status {
                Status::Pending => stats.pending += 1,
                Status::Resolved => stats.resolved += 1,
                Status::InProgress => {}
            }
            if report.is_urgent {
                stats.urgent += 1;
            }
            stats
        })
    }

    /// (label, value) pairs in tile order.
    pub fn tiles(&self) -> [(&'static str, usize); 4] {
        [
            ("Total Reports", self.total),
            ("Pending", self.pending),
            ("Urgent", self.urgent),
            ("Resolved", self.resolved),
        ]
    }
}
