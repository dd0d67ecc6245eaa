//! Calendar month keys
//!
//! A [`MonthKey`] identifies one calendar month and is the lookup key into the
//! budget ledger. Its string form is `"<year>-<zero-based month index>"` with
//! the index zero-padded to two digits, so `"2024-00"` is January 2024 and
//! `"2024-11"` is December 2024.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a calendar month
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month_index: u32,
}

impl MonthKey {
    pub const MIN_YEAR: i32 = 1;
    pub const MAX_YEAR: i32 = 9999;

    /// Create a key from a year and a zero-based month index (0 = January)
    pub fn new(year: i32, month_index: u32) -> Result<Self, MonthKeyParseError> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(MonthKeyParseError::YearOutOfRange(year));
        }
        if month_index > 11 {
            return Err(MonthKeyParseError::MonthOutOfRange(month_index));
        }
        Ok(Self { year, month_index })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month_index: date.month0(),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index (0 = January, 11 = December)
    pub fn month_index(&self) -> u32 {
        self.month_index
    }

    /// One-based calendar month (1 = January)
    pub fn month(&self) -> u32 {
        self.month_index + 1
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month(), 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let first_of_next = self.next().first_day();
        first_of_next.pred_opt().unwrap_or(first_of_next)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month_index
    }

    pub fn next(&self) -> Self {
        if self.month_index == 11 {
            Self {
                year: self.year + 1,
                month_index: 0,
            }
        } else {
            Self {
                year: self.year,
                month_index: self.month_index + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month_index == 0 {
            Self {
                year: self.year - 1,
                month_index: 11,
            }
        } else {
            Self {
                year: self.year,
                month_index: self.month_index - 1,
            }
        }
    }

    /// Human-readable label, e.g. "January 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// The `count` months ending with this one, oldest first
    pub fn trailing(&self, count: usize) -> Vec<Self> {
        let mut months = Vec::with_capacity(count);
        let mut month = *self;
        for _ in 0..count {
            months.push(month);
            month = month.prev();
        }
        months.reverse();
        months
    }

    /// The `count` months ending with the current one, oldest first
    pub fn recent(count: usize) -> Vec<Self> {
        Self::current().trailing(count)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month_index)
    }
}

impl FromStr for MonthKey {
    type Err = MonthKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year_str, month_str) = s
            .split_once('-')
            .ok_or_else(|| MonthKeyParseError::InvalidFormat(s.to_string()))?;

        if year_str.is_empty()
            || month_str.len() != 2
            || !year_str.bytes().all(|b| b.is_ascii_digit())
            || !month_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(MonthKeyParseError::InvalidFormat(s.to_string()));
        }

        let year: i32 = year_str
            .parse()
            .map_err(|_| MonthKeyParseError::InvalidFormat(s.to_string()))?;
        let month_index: u32 = month_str
            .parse()
            .map_err(|_| MonthKeyParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month_index)
    }
}

impl TryFrom<String> for MonthKey {
    type Error = MonthKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// Error type for month key parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonthKeyParseError {
    #[error("Invalid month key '{0}': expected YYYY-MM with a zero-based month (00-11)")]
    InvalidFormat(String),

    #[error("Month index {0} is out of range (expected 00-11)")]
    MonthOutOfRange(u32),

    #[error("Year {0} is out of range")]
    YearOutOfRange(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_zero_based_display() {
        let jan = MonthKey::new(2024, 0).unwrap();
        assert_eq!(jan.to_string(), "2024-00");

        let dec = MonthKey::new(2024, 11).unwrap();
        assert_eq!(dec.to_string(), "2024-11");
    }

    #[test]
    fn test_parse() {
        let key: MonthKey = "2024-05".parse().unwrap();
        assert_eq!(key.year(), 2024);
        assert_eq!(key.month_index(), 5);
        assert_eq!(key.month(), 6);
    }

    #[test]
    fn test_parse_rejects_one_based_december() {
        assert_eq!(
            "2024-12".parse::<MonthKey>(),
            Err(MonthKeyParseError::MonthOutOfRange(12))
        );
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        assert!("2024".parse::<MonthKey>().is_err());
        assert!("2024-1".parse::<MonthKey>().is_err());
        assert!("2024-001".parse::<MonthKey>().is_err());
        assert!("abcd-01".parse::<MonthKey>().is_err());
        assert!("-2024-01".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_from_date_uses_zero_based_index() {
        let key = MonthKey::from_date(date(2024, 1, 15));
        assert_eq!(key.to_string(), "2024-00");
    }

    #[test]
    fn test_first_and_last_day() {
        let feb = MonthKey::new(2024, 1).unwrap();
        assert_eq!(feb.first_day(), date(2024, 2, 1));
        assert_eq!(feb.last_day(), date(2024, 2, 29));

        let dec = MonthKey::new(2023, 11).unwrap();
        assert_eq!(dec.last_day(), date(2023, 12, 31));
    }

    #[test]
    fn test_contains() {
        let jan = MonthKey::new(2024, 0).unwrap();
        assert!(jan.contains(date(2024, 1, 1)));
        assert!(jan.contains(date(2024, 1, 31)));
        assert!(!jan.contains(date(2024, 2, 1)));
        assert!(!jan.contains(date(2023, 1, 15)));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let dec = MonthKey::new(2023, 11).unwrap();
        assert_eq!(dec.next().to_string(), "2024-00");
        assert_eq!(dec.next().prev(), dec);

        let jan = MonthKey::new(2024, 0).unwrap();
        assert_eq!(jan.prev().to_string(), "2023-11");
    }

    #[test]
    fn test_label() {
        let jan = MonthKey::new(2024, 0).unwrap();
        assert_eq!(jan.label(), "January 2024");
    }

    #[test]
    fn test_trailing() {
        let feb = MonthKey::new(2024, 1).unwrap();
        let months: Vec<String> = feb.trailing(3).iter().map(|m| m.to_string()).collect();
        assert_eq!(months, vec!["2023-11", "2024-00", "2024-01"]);
        assert!(feb.trailing(0).is_empty());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a: MonthKey = "2023-11".parse().unwrap();
        let b: MonthKey = "2024-00".parse().unwrap();
        let c: MonthKey = "2024-10".parse().unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthKey::new(2024, 3).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"2024-03\"");

        let parsed: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);

        assert!(serde_json::from_str::<MonthKey>("\"2024-13\"").is_err());
    }
}
