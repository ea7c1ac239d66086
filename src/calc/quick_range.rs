use crate::calc::grid::days_in_month;
use chrono::{Datelike, Duration, NaiveDate};

/// One-shot range presets. Evaluation reads a caller-supplied "today" so
/// repeated invocations on different days yield different results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickRange {
    Today,
    Last7Days,
    ThisMonth,
}

impl QuickRange {
    pub fn label(self) -> &'static str {
        match self {
            QuickRange::Today => "Today",
            QuickRange::Last7Days => "Last 7 Days",
            QuickRange::ThisMonth => "This Month",
        }
    }

    /// Start/end pair for the preset, pure given `today`.
    pub fn evaluate(self, today: NaiveDate) -> DateRange {
        match self {
            QuickRange::Today => DateRange {
                start: today,
                end: today,
            },
            QuickRange::Last7Days => DateRange {
                start: today - Duration::days(7),
                end: today,
            },
            QuickRange::ThisMonth => {
                let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                    .unwrap_or(today);
                let last = NaiveDate::from_ymd_opt(
                    today.year(),
                    today.month(),
                    days_in_month(today.year(), today.month0()),
                )
                .unwrap_or(today);
                DateRange { start: first, end: last }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
