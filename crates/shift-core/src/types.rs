use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ShiftTime
// ---------------------------------------------------------------------------

/// The fixed set of shift types a staff member can be assigned.
///
/// Variants are declared in the order they appear on the roster, which is
/// also their sort order in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftTime {
    #[serde(rename = "①朝番")]
    Morning,
    #[serde(rename = "②日勤")]
    Day,
    #[serde(rename = "③昼番")]
    Midday,
    #[serde(rename = "④夜勤")]
    Evening,
    #[serde(rename = "⑤夜番")]
    Night,
    #[serde(rename = "⑥夜支援員")]
    NightSupport,
}

impl ShiftTime {
    pub fn all() -> &'static [ShiftTime] {
        &[
            ShiftTime::Morning,
            ShiftTime::Day,
            ShiftTime::Midday,
            ShiftTime::Evening,
            ShiftTime::Night,
            ShiftTime::NightSupport,
        ]
    }

    /// Roster label, also the persisted form.
    pub fn label(self) -> &'static str {
        match self {
            ShiftTime::Morning => "①朝番",
            ShiftTime::Day => "②日勤",
            ShiftTime::Midday => "③昼番",
            ShiftTime::Evening => "④夜勤",
            ShiftTime::Night => "⑤夜番",
            ShiftTime::NightSupport => "⑥夜支援員",
        }
    }

    /// ASCII alias accepted on the command line.
    pub fn alias(self) -> &'static str {
        match self {
            ShiftTime::Morning => "morning",
            ShiftTime::Day => "day",
            ShiftTime::Midday => "midday",
            ShiftTime::Evening => "evening",
            ShiftTime::Night => "night",
            ShiftTime::NightSupport => "night-support",
        }
    }

    pub fn start(self) -> NaiveTime {
        let (h, _) = self.hours();
        hour(h)
    }

    pub fn end(self) -> NaiveTime {
        let (_, h) = self.hours();
        hour(h)
    }

    /// True when the shift ends on the following calendar day.
    pub fn is_overnight(self) -> bool {
        self.end() <= self.start()
    }

    fn hours(self) -> (u32, u32) {
        match self {
            ShiftTime::Morning => (6, 11),
            ShiftTime::Day => (9, 18),
            ShiftTime::Midday => (11, 16),
            ShiftTime::Evening => (16, 20),
            ShiftTime::Night => (19, 22),
            ShiftTime::NightSupport => (22, 6),
        }
    }
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or(NaiveTime::MIN)
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ShiftTime {
    type Err = crate::error::ShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ShiftTime::all()
            .iter()
            .copied()
            .find(|t| t.label() == needle || t.alias().eq_ignore_ascii_case(needle))
            .ok_or_else(|| crate::error::ShiftError::InvalidShiftTime(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Weekdays
// ---------------------------------------------------------------------------

pub const DAYS_PER_WEEK: usize = 7;

const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Day-of-week index with Sunday as 0, the numbering NG shifts are stored in.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

pub fn weekday_name(day: u8) -> &'static str {
    WEEKDAY_NAMES.get(day as usize).copied().unwrap_or("?")
}

pub fn validate_day_of_week(day: u8) -> crate::error::Result<u8> {
    if (day as usize) < DAYS_PER_WEEK {
        Ok(day)
    } else {
        Err(crate::error::ShiftError::InvalidDayOfWeek(day))
    }
}

// ---------------------------------------------------------------------------
// Calendar date serde helpers
// ---------------------------------------------------------------------------

/// Parse a persisted calendar date.
///
/// Accepts plain `YYYY-MM-DD` as well as full ISO-8601 timestamps, which is
/// how records written by the browser build carried their dates.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

pub mod calendar_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format("%Y-%m-%d"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_calendar_date(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid calendar date '{raw}'")))
    }
}

pub mod calendar_dates {
    use chrono::NaiveDate;
    use serde::{de::Error, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dates: &[NaiveDate], s: S) -> Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(dates.len()))?;
        for date in dates {
            seq.serialize_element(&date.format("%Y-%m-%d").to_string())?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<NaiveDate>, D::Error> {
        let raw = Vec::<String>::deserialize(d)?;
        raw.iter()
            .map(|s| {
                super::parse_calendar_date(s)
                    .ok_or_else(|| D::Error::custom(format!("invalid calendar date '{s}'")))
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_time_parses_label_and_alias() {
        assert_eq!("①朝番".parse::<ShiftTime>().unwrap(), ShiftTime::Morning);
        assert_eq!("night-support".parse::<ShiftTime>().unwrap(), ShiftTime::NightSupport);
        assert_eq!("Evening".parse::<ShiftTime>().unwrap(), ShiftTime::Evening);
        assert!("brunch".parse::<ShiftTime>().is_err());
    }

    #[test]
    fn shift_time_serializes_as_label() {
        let json = serde_json::to_string(&ShiftTime::Day).unwrap();
        assert_eq!(json, "\"②日勤\"");
        let parsed: ShiftTime = serde_json::from_str("\"⑤夜番\"").unwrap();
        assert_eq!(parsed, ShiftTime::Night);
    }

    #[test]
    fn shift_hours() {
        assert_eq!(ShiftTime::Morning.start(), NaiveTime::from_hms_opt(6, 0, 0).unwrap());
        assert_eq!(ShiftTime::Day.end(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert!(ShiftTime::NightSupport.is_overnight());
        assert!(!ShiftTime::Night.is_overnight());
    }

    #[test]
    fn day_of_week_is_sunday_based() {
        // 2024-06-02 was a Sunday.
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()), 0);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()), 6);
        assert_eq!(weekday_name(1), "Mon");
        assert!(validate_day_of_week(7).is_err());
    }

    #[test]
    fn calendar_dates_accept_legacy_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(parse_calendar_date("2024-06-01"), Some(expected));
        assert_eq!(parse_calendar_date("2024-06-01T00:00:00.000Z"), Some(expected));
        assert_eq!(parse_calendar_date("2024-06-01T09:30:00"), Some(expected));
        assert_eq!(parse_calendar_date("June 1st"), None);
    }
}
