use chrono::{Datelike, Days, NaiveDate};

use crate::consts::{DATE_FORMAT, SHORT_DATE_FORMAT};
use crate::error::AppError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let s = s.trim();
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Shift `date` by `n` calendar days, saturating at chrono's date range.
pub(crate) fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_days(Days::new(n.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Monday of the week containing `date`. Weeks run Monday through Sunday.
pub(crate) fn monday_of(date: NaiveDate) -> NaiveDate {
    let day = i64::from(date.weekday().num_days_from_sunday());
    let offset = if day == 0 { -6 } else { 1 - day };
    add_days(date, offset)
}

/// "Jan 1, 2024"
pub(crate) fn format_short(date: NaiveDate) -> String {
    date.format(SHORT_DATE_FORMAT).to_string()
}

/// "Jan 1, 2024 - Jan 7, 2024"
pub(crate) fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_short(start), format_short(end))
}
