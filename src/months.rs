// Calendar-month bucketing.
//
// Every view that groups by month keys its rows on `MonthBucket`, whose
// ordering is the calendar position of the month. Sorting on it therefore
// yields January..December regardless of how the rows were produced.
use chrono::{Datelike, Month, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Month names in calendar order.
pub const MONTH_ORDER: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthBucket(Month);

impl MonthBucket {
    pub fn of(ts: &NaiveDateTime) -> Self {
        // `month()` is always 1..=12 so the fallback is unreachable.
        let month = Month::try_from(ts.month() as u8).unwrap_or(Month::January);
        MonthBucket(month)
    }

    /// Full month name, e.g. `"March"`.
    pub fn name(&self) -> &'static str {
        MONTH_ORDER[self.sort_key() as usize]
    }

    /// 0-based calendar position, used as the sort key.
    pub fn sort_key(&self) -> u32 {
        self.0.number_from_month() - 1
    }

    #[cfg(test)]
    pub fn from_name(name: &str) -> Option<Self> {
        let idx = MONTH_ORDER.iter().position(|m| m.eq_ignore_ascii_case(name.trim()))?;
        Month::try_from(idx as u8 + 1).ok().map(MonthBucket)
    }
}

impl Ord for MonthBucket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for MonthBucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MonthBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for MonthBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Stable sort of `rows` into calendar order; rows sharing a month keep
/// their relative order.
pub fn sort_by_month<T>(rows: &mut [T], month_of: impl Fn(&T) -> MonthBucket) {
    rows.sort_by_key(|r| month_of(r).sort_key());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn bucket_names_follow_timestamp_month() {
        assert_eq!(MonthBucket::of(&at(2020, 1, 5)).name(), "January");
        assert_eq!(MonthBucket::of(&at(2021, 9, 30)).name(), "September");
        assert_eq!(MonthBucket::of(&at(2019, 12, 31)).name(), "December");
    }

    #[test]
    fn ordering_is_calendar_not_alphabetical() {
        let mut months: Vec<MonthBucket> = ["October", "April", "February", "August", "December"]
            .iter()
            .filter_map(|n| MonthBucket::from_name(n))
            .collect();
        months.sort();
        let names: Vec<&str> = months.iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["February", "April", "August", "October", "December"]);
    }

    #[test]
    fn sort_by_month_is_stable() {
        let mut rows = vec![
            (MonthBucket::from_name("May").unwrap(), "b"),
            (MonthBucket::from_name("January").unwrap(), "z"),
            (MonthBucket::from_name("May").unwrap(), "a"),
            (MonthBucket::from_name("January").unwrap(), "y"),
        ];
        sort_by_month(&mut rows, |r| r.0);
        let tags: Vec<&str> = rows.iter().map(|r| r.1).collect();
        assert_eq!(tags, vec!["z", "y", "b", "a"]);
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert!(MonthBucket::from_name("Smarch").is_none());
        assert_eq!(MonthBucket::from_name(" june ").unwrap().sort_key(), 5);
    }

    #[test]
    fn canonical_order_matches_chrono() {
        let mut m = Month::January;
        for name in MONTH_ORDER {
            assert_eq!(m.name(), name);
            m = m.succ();
        }
    }

    #[test]
    fn serializes_as_name() {
        let m = MonthBucket::from_name("July").unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"July\"");
    }
}
