use chrono::NaiveDate;
use comfy_table::{Color, Table};
use serde_json::json;

use crate::consts::{DATE_FORMAT, TIME_FORMAT};
use crate::data::Course;
use crate::data::schedule::{DaySchedule, course_name};
use crate::utils::format_range;

use super::format::{color_if, create_styled_table, header_cell, styled_cell, to_json_string};

fn build_schedule_table(days: &[DaySchedule<'_>], courses: &[Course], use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Day", use_color),
        header_cell("Date", use_color),
        header_cell("Time", use_color),
        header_cell("Course", use_color),
        header_cell("Id", use_color),
    ]);

    for day in days {
        let date = day.date.format("%b %-d").to_string();
        if day.items.is_empty() {
            table.add_row(vec![
                styled_cell(day.day.name(), None, true),
                styled_cell(&date, None, false),
                styled_cell("No items", color_if(use_color, Color::DarkGrey), false),
                styled_cell("", None, false),
                styled_cell("", None, false),
            ]);
            continue;
        }
        for (i, item) in day.items.iter().enumerate() {
            let (label, date_label) = if i == 0 {
                (day.day.name(), date.as_str())
            } else {
                ("", "")
            };
            let time = format!(
                "{} - {}",
                item.start_time.format(TIME_FORMAT),
                item.end_time.format(TIME_FORMAT)
            );
            table.add_row(vec![
                styled_cell(label, None, true),
                styled_cell(date_label, None, false),
                styled_cell(&time, None, false),
                styled_cell(course_name(courses, item.course_id), None, false),
                styled_cell(&item.id.to_string(), color_if(use_color, Color::DarkGrey), false),
            ]);
        }
    }

    table
}

pub(crate) fn print_schedule_table(
    week_start: NaiveDate,
    week_end: NaiveDate,
    days: &[DaySchedule<'_>],
    courses: &[Course],
    use_color: bool,
) {
    let total: usize = days.iter().map(|d| d.items.len()).sum();
    println!("\n  Weekly Schedule ({})\n", format_range(week_start, week_end));
    println!("{}", build_schedule_table(days, courses, use_color));
    println!("\n  {total} items\n");
}

pub(crate) fn output_schedule_json(
    week_start: NaiveDate,
    week_end: NaiveDate,
    days: &[DaySchedule<'_>],
    courses: &[Course],
) -> String {
    let days: Vec<serde_json::Value> = days
        .iter()
        .map(|day| {
            json!({
                "day": day.day.name(),
                "date": day.date.format(DATE_FORMAT).to_string(),
                "items": day.items.iter().map(|item| json!({
                    "id": item.id,
                    "course_id": item.course_id,
                    "course": course_name(courses, item.course_id),
                    "start_time": item.start_time.format(TIME_FORMAT).to_string(),
                    "end_time": item.end_time.format(TIME_FORMAT).to_string(),
                })).collect::<Vec<_>>(),
            })
        })
        .collect();
    to_json_string(&json!({
        "week_start": week_start.format(DATE_FORMAT).to_string(),
        "week_end": week_end.format(DATE_FORMAT).to_string(),
        "days": days,
    }))
}
