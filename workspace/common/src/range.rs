use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    /// First date in the range (inclusive)
    pub start: NaiveDate,
    /// Last date in the range (inclusive)
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` falls within the range, both ends inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// A range whose end precedes its start matches nothing and is
    /// rejected by the filter layer.
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn contains_is_inclusive_on_both_ends() {
        let range = DateRange::new(date(2023, 1, 2), date(2023, 1, 4));
        assert!(!range.contains(date(2023, 1, 1)));
        assert!(range.contains(date(2023, 1, 2)));
        assert!(range.contains(date(2023, 1, 3)));
        assert!(range.contains(date(2023, 1, 4)));
        assert!(!range.contains(date(2023, 1, 5)));
    }

    #[test]
    fn reversed_range_is_not_ordered() {
        let range = DateRange::new(date(2023, 1, 4), date(2023, 1, 2));
        assert!(!range.is_ordered());
        assert!(!range.contains(date(2023, 1, 3)));
    }

    #[test]
    fn serializes_as_iso_dates() {
        let range = DateRange::new(date(2023, 1, 2), date(2023, 1, 4));
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"start":"2023-01-02","end":"2023-01-04"}"#);
    }
}
