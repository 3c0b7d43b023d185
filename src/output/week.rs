use chrono::NaiveDate;
use serde_json::json;

use crate::consts::DATE_FORMAT;
use crate::utils::format_range;

use super::format::to_json_string;

pub(crate) fn print_week(range: &str, use_color: bool) {
    if use_color {
        println!("\x1b[1m{range}\x1b[0m");
    } else {
        println!("{range}");
    }
}

pub(crate) fn output_week_json(week_start: NaiveDate, week_end: NaiveDate) -> String {
    to_json_string(&json!({
        "week_start": week_start.format(DATE_FORMAT).to_string(),
        "week_end": week_end.format(DATE_FORMAT).to_string(),
        "label": format_range(week_start, week_end),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_json_fields() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output_week_json(start, end)).unwrap();
        assert_eq!(value["week_start"], "2024-01-01");
        assert_eq!(value["week_end"], "2024-01-07");
        assert_eq!(value["label"], "Jan 1, 2024 - Jan 7, 2024");
    }
}
