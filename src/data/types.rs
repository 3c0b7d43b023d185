use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::consts::TIME_FORMAT;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Semester {
    pub(crate) id: u64,
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Course {
    pub(crate) id: u64,
    pub(crate) name: String,
    pub(crate) planned_hours_per_week: u64,
    pub(crate) semester_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScheduleItem {
    pub(crate) id: u64,
    pub(crate) day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub(crate) start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub(crate) end_time: NaiveTime,
    pub(crate) course_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AbsenceRecord {
    pub(crate) id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) note: Option<String>,
    pub(crate) course_id: u64,
}

/// Day of the week as the planner stores it ("Monday" .. "Sunday")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub(crate) enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// Monday first
    pub(crate) const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    /// Days after Monday
    pub(crate) fn offset(self) -> i64 {
        self as i64
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = AppError;

    /// Full names or three-letter abbreviations, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| {
                let name = day.name();
                name.eq_ignore_ascii_case(trimmed) || name[..3].eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| AppError::InvalidDay {
                input: trimmed.to_string(),
            })
    }
}

pub(crate) fn parse_time(s: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(s.trim(), TIME_FORMAT).map_err(|_| AppError::InvalidTime {
        input: s.trim().to_string(),
    })
}

/// Serde adapter for "HH:MM" times
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::consts::TIME_FORMAT;

    pub(super) fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&time.format(TIME_FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parses_names_and_abbreviations() {
        assert_eq!("Monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("sun".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
        assert_eq!(" WED ".parse::<DayOfWeek>().unwrap(), DayOfWeek::Wednesday);
        assert!("Caturday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn day_offsets_start_monday() {
        assert_eq!(DayOfWeek::Monday.offset(), 0);
        assert_eq!(DayOfWeek::Sunday.offset(), 6);
    }

    #[test]
    fn parse_time_rejects_garbage() {
        assert_eq!(
            parse_time("09:30").unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap()
        );
        assert!(parse_time("25:00").is_err());
        assert!(parse_time("nine").is_err());
    }

    #[test]
    fn schedule_item_uses_actor_field_names() {
        let item = ScheduleItem {
            id: 3,
            day_of_week: DayOfWeek::Tuesday,
            start_time: parse_time("09:00").unwrap(),
            end_time: parse_time("10:30").unwrap(),
            course_id: 1,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["dayOfWeek"], "Tuesday");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:30");
        assert_eq!(json["courseId"], 1);
    }

    #[test]
    fn absence_note_is_optional() {
        let record: AbsenceRecord = serde_json::from_str(r#"{"id":1,"courseId":2}"#).unwrap();
        assert_eq!(record.note, None);
        assert!(!serde_json::to_string(&record).unwrap().contains("note"));
    }

    #[test]
    fn bad_time_in_json_is_an_error() {
        let raw = r#"{"id":1,"dayOfWeek":"Monday","startTime":"9am","endTime":"10:00","courseId":1}"#;
        assert!(serde_json::from_str::<ScheduleItem>(raw).is_err());
    }
}
