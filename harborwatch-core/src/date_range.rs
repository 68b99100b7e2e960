use chrono::{DateTime, Duration, Months, Utc};

use crate::{DateRangeError, error::DateRangeSnafu};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<DateRange, DateRangeError> {
        if start > end {
            DateRangeSnafu { start, end }.fail()
        } else {
            Ok(DateRange { start, end })
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start && timestamp <= self.end
    }

    /// The equivalent range exactly one calendar year earlier, used for
    /// year-over-year comparisons. `None` if either boundary does not exist
    /// in the prior year (Feb 29).
    pub fn prior_year(&self) -> Option<DateRange> {
        let start = self.start.checked_sub_months(Months::new(12))?;
        let end = self.end.checked_sub_months(Months::new(12))?;
        Some(DateRange { start, end })
    }
}
