//! Calendar-day and timestamp newtypes with CBOR codecs.
//!
//! Leave requests work in inclusive calendar days (`YYYY-MM-DD`), while
//! history and audit rows carry full UTC timestamps. Both wrap chrono
//! types because the chrono types do not implement the minicbor traits.

use crate::error::{EngineError, Result};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::fmt;

/// An ISO calendar date. Ranges over leave requests are closed on both
/// ends, so `Day` ordering and arithmetic are in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    /// Parse a `YYYY-MM-DD` string as supplied by the API boundary.
    pub fn parse(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Day)
            .map_err(|_| EngineError::Validation(format!("invalid date {s:?}, expected YYYY-MM-DD")))
    }

    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Day(NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date"))
    }

    pub fn today() -> Self {
        Day(Utc::now().date_naive())
    }

    pub fn plus_days(self, n: i64) -> Self {
        Day(self.0 + chrono::Duration::days(n))
    }

    /// Inclusive day count of the range `[self, end]`. Negative ranges are
    /// a validation error, not a silent zero.
    pub fn inclusive_days_until(self, end: Day) -> Result<i64> {
        let days = (end.0 - self.0).num_days() + 1;
        if days < 1 {
            return Err(EngineError::Validation(format!(
                "end date {end} precedes start date {self}"
            )));
        }
        Ok(days)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // NaiveDate renders as %Y-%m-%d already
        self.0.fmt(f)
    }
}

impl<C> minicbor::Encode<C> for Day {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> std::result::Result<(), minicbor::encode::Error<W::Error>> {
        e.i32(self.0.num_days_from_ce())?.ok()
    }
}

impl<'b, C> minicbor::Decode<'b, C> for Day {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _: &mut C,
    ) -> std::result::Result<Self, minicbor::decode::Error> {
        let days = d.i32()?;
        NaiveDate::from_num_days_from_ce_opt(days)
            .map(Day)
            .ok_or(minicbor::decode::Error::message(
                "day count out of calendar range",
            ))
    }
}

/// A UTC instant, recorded on creation and on each stage decision.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct TimeStamp(DateTime<Utc>);

impl TimeStamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn to_datetime_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C> minicbor::Encode<C> for TimeStamp {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _: &mut C,
    ) -> std::result::Result<(), minicbor::encode::Error<W::Error>> {
        if let Some(nsec) = self.0.timestamp_nanos_opt() {
            return e.i64(nsec)?.ok();
        }

        Err(minicbor::encode::Error::message(
            "failed to encode timestamp. timestamp_nanos_opt returned None",
        ))
    }
}

impl<'b, C> minicbor::Decode<'b, C> for TimeStamp {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _: &mut C,
    ) -> std::result::Result<Self, minicbor::decode::Error> {
        let nsecs = d.i64()?;

        Ok(TimeStamp(DateTime::from_timestamp_nanos(nsecs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_dates() {
        let d = Day::parse("2025-01-10").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2025, 1, 10));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Day::parse("10/01/2025").is_err());
        assert!(Day::parse("2025-13-40").is_err());
        assert!(Day::parse("").is_err());
    }

    #[test]
    fn inclusive_day_count() {
        let start = Day::new(2025, 1, 10);
        let end = Day::new(2025, 1, 12);
        assert_eq!(start.inclusive_days_until(end).unwrap(), 3);
        assert_eq!(start.inclusive_days_until(start).unwrap(), 1);
        assert!(end.inclusive_days_until(start).is_err());
    }

    #[test]
    fn plus_days_is_inclusive_end() {
        let start = Day::new(2025, 2, 1);
        assert_eq!(start.plus_days(7 - 1), Day::new(2025, 2, 7));
    }

    #[test]
    fn day_cbor_roundtrip() {
        let original = Day::new(2025, 6, 15);
        let encoded = minicbor::to_vec(original).unwrap();
        let decoded: Day = minicbor::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }

    #[test]
    fn timestamp_cbor_roundtrip() {
        let original = TimeStamp::now();
        let encoded = minicbor::to_vec(original).unwrap();
        let decoded: TimeStamp = minicbor::decode(&encoded).unwrap();
        assert_eq!(original, decoded);
    }
}
