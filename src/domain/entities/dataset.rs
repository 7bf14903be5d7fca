use crate::domain::entities::record::{Record, QUALITY_REVIEWER, REVIEWER};

pub const ALL_REVIEWERS: &str = "All Reviewers";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn position_of(&self, ticket_id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.ticket_id() == ticket_id)
    }

    pub fn find(&self, ticket_id: &str) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.ticket_id() == ticket_id)
    }

    /// Distinct non-empty values of `column`, in first-seen order.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for record in &self.records {
            let value = record.text(column);
            if !value.is_empty() && !seen.iter().any(|v| v == value) {
                seen.push(value.to_string());
            }
        }
        seen
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Reviewer,
    QualityReviewer,
}

impl FilterKind {
    pub fn column(self) -> &'static str {
        match self {
            FilterKind::Reviewer => REVIEWER,
            FilterKind::QualityReviewer => QUALITY_REVIEWER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filters {
    pub reviewer: Option<String>,
    pub quality_reviewer: Option<String>,
}

impl Filters {
    pub fn set(&mut self, kind: FilterKind, value: &str) {
        let normalized = if value == ALL_REVIEWERS || value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        match kind {
            FilterKind::Reviewer => self.reviewer = normalized,
            FilterKind::QualityReviewer => self.quality_reviewer = normalized,
        }
    }

    pub fn get(&self, kind: FilterKind) -> Option<&str> {
        match kind {
            FilterKind::Reviewer => self.reviewer.as_deref(),
            FilterKind::QualityReviewer => self.quality_reviewer.as_deref(),
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        [FilterKind::Reviewer, FilterKind::QualityReviewer]
            .into_iter()
            .all(|kind| match self.get(kind) {
                Some(wanted) => record.text(kind.column()) == wanted,
                None => true,
            })
    }
}
