//! Report filter predicates

use super::report::{Category, Report, Status};

/// Category, status, and free-text predicates, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub category: Option<Category>,
    pub status: Option<Status>,
    pub search: String,
}

impl ReportFilter {
    pub fn is_active(&self) -> bool {
        self.category.is_some() || self.status.is_some() || !self.search.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, report: &Report) -> bool {
        if let Some(category) = self.category {
            if report.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if report.status != status {
                return false;
            }
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        contains_case_insensitive(&report.title, &needle)
            || contains_case_insensitive(&report.ward, &needle)
            || contains_case_insensitive(&report.reporter, &needle)
    }

    /// Indices of matching reports, in source order.
    pub fn apply(&self, reports: &[Report]) -> Vec<usize> {
        reports
            .iter()
            .enumerate()
            .filter(|(_, report)| self.matches(report))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// All → Security → Environment → Health → Other → All
    pub fn cycle_category(&mut self) {
        self.category = cycle(&Category::ALL, self.category);
    }

    /// All → Pending → In Progress → Resolved → All
    pub fn cycle_status(&mut self) {
        self.status = cycle(&Status::ALL, self.status);
    }

    pub fn category_label(&self) -> &'static str {
        self.category
            .map(|category| category.title())
            .unwrap_or("All Categories")
    }

    pub fn status_label(&self) -> &'static str {
        self.status.map(|status| status.title()).unwrap_or("All Status")
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: Option<T>) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let idx = all.iter().position(|item| *item == value)?;
            all.get(idx + 1).copied()
        }
    }
}

fn contains_case_insensitive(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture::builtin_reports;

    fn ids(filter: &ReportFilter, reports: &[Report]) -> Vec<u32> {
        filter
            .apply(reports)
            .into_iter()
            .map(|idx| reports[idx].id)
            .collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let reports = builtin_reports();
        let filter = ReportFilter::default();
        assert!(!filter.is_active());
        assert_eq!(ids(&filter, &reports), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_status_resolved() {
        let reports = builtin_reports();
        let filter = ReportFilter {
            status: Some(Status::Resolved),
            ..Default::default()
        };
        assert_eq!(ids(&filter, &reports), vec![3]);
    }

    #[test]
    fn test_search_matches_title_ward_reporter() {
        let reports = builtin_reports();
        let mut filter = ReportFilter {
            search: "WATER".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter, &reports), vec![5]);

        filter.search = "lindi".to_string();
        assert_eq!(ids(&filter, &reports), vec![1, 6]);

        filter.search = "wanjiku".to_string();
        assert_eq!(ids(&filter, &reports), vec![2]);

        // Description is not searched.
        filter.search = "200 families".to_string();
        assert!(ids(&filter, &reports).is_empty());
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let reports = builtin_reports();
        let filter = ReportFilter {
            category: Some(Category::Environment),
            status: Some(Status::Pending),
            search: "garbage".to_string(),
        };
        assert_eq!(ids(&filter, &reports), vec![4]);

        let filter = ReportFilter {
            category: Some(Category::Security),
            status: Some(Status::Pending),
            search: String::new(),
        };
        assert!(ids(&filter, &reports).is_empty());
    }

    #[test]
    fn test_every_combination_matches_manual_scan() {
        let reports = builtin_reports();
        let categories = std::iter::once(None).chain(Category::ALL.iter().copied().map(Some));
        for category in categories {
            let statuses = std::iter::once(None).chain(Status::ALL.iter().copied().map(Some));
            for status in statuses {
                for search in ["", "main", "LINDI", "peter", "zzz"] {
                    let filter = ReportFilter {
                        category,
                        status,
                        search: search.to_string(),
                    };
                    let expected: Vec<u32> = reports
                        .iter()
                        .filter(|r| category.map_or(true, |c| r.category == c))
                        .filter(|r| status.map_or(true, |s| r.status == s))
                        .filter(|r| {
                            let s = search.to_lowercase();
                            r.title.to_lowercase().contains(&s)
                                || r.ward.to_lowercase().contains(&s)
                                || r.reporter.to_lowercase().contains(&s)
                        })
                        .map(|r| r.id)
                        .collect();
                    assert_eq!(ids(&filter, &reports), expected);
                }
            }
        }
    }

    #[test]
    fn test_cycles_wrap_to_all() {
        let mut filter = ReportFilter::default();
        filter.cycle_status();
        assert_eq!(filter.status, Some(Status::Pending));
        filter.cycle_status();
        filter.cycle_status();
        assert_eq!(filter.status, Some(Status::Resolved));
        filter.cycle_status();
        assert_eq!(filter.status, None);
        assert_eq!(filter.status_label(), "All Status");

        for _ in 0..4 {
            filter.cycle_category();
        }
        assert_eq!(filter.category, Some(Category::Other));
        filter.cycle_category();
        assert_eq!(filter.category, None);
    }
}
