use crate::model::Task;
use crate::{Error, Result};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive calendar window.
///
/// Callers keep `start <= end`; nothing here reorders a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Signed whole-day difference `end - start`.
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Widens the window by `before` days on the left and `after` days on the right.
    ///
    /// Saturates at chrono's representable bounds instead of overflowing.
    pub fn padded(&self, before: i64, after: i64) -> Self {
        Self {
            start: shift_days(self.start, -before),
            end: shift_days(self.end, after),
        }
    }

    /// The min start .. max end across all tasks, or `None` for an empty snapshot.
    ///
    /// Milestones contribute their start date on both ends.
    pub fn project_span(tasks: &[Task]) -> Option<Self> {
        let start = tasks.iter().map(|t| t.start).min()?;
        let end = tasks
            .iter()
            .map(|t| t.effective_end())
            .max()
            .unwrap_or(start);
        Some(Self {
            start,
            end: end.max(start),
        })
    }

    /// Parses `<start>..<end>` with ISO dates on both sides.
    pub fn parse(s: &str) -> Result<Self> {
        let Some((a, b)) = s.trim().split_once("..") else {
            return Err(Error::InvalidDateRange {
                value: s.to_string(),
            });
        };
        let start = parse_date(a)?;
        let end = parse_date(b)?;
        if end < start {
            return Err(Error::InvalidDateRange {
                value: s.to_string(),
            });
        }
        Ok(Self { start, end })
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::InvalidDate {
        value: s.to_string(),
    })
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}
