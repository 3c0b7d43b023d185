use comfy_table::{Color, Table};
use serde_json::json;

use crate::data::report::AbsenceReport;
use crate::data::schedule::course_name;
use crate::data::{AbsenceRecord, Course, absence_noun};

use super::format::{
    color_if, create_styled_table, format_share, header_cell, right_cell, styled_cell,
    to_json_string,
};

const NO_NOTE: &str = "No note provided";

fn build_summary_table(report: &AbsenceReport, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Course", use_color),
        header_cell("Absences", use_color),
        header_cell("Share", use_color),
    ]);
    for row in &report.by_course {
        let color = (row.count > 0 && row.count == report.most_absences)
            .then_some(Color::Yellow)
            .filter(|_| use_color);
        table.add_row(vec![
            styled_cell(&row.course, None, false),
            right_cell(
                &format!("{} {}", row.count, absence_noun(row.count)),
                color,
                false,
            ),
            right_cell(&format_share(row.share), None, false),
        ]);
    }
    table
}

fn build_list_table(absences: &[AbsenceRecord], courses: &[Course], use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Id", use_color),
        header_cell("Course", use_color),
        header_cell("Note", use_color),
    ]);
    for absence in absences {
        let (note, color) = match absence.note.as_deref() {
            Some(note) => (note, None),
            None => (NO_NOTE, color_if(use_color, Color::DarkGrey)),
        };
        table.add_row(vec![
            right_cell(&absence.id.to_string(), None, false),
            styled_cell(course_name(courses, absence.course_id), None, true),
            styled_cell(note, color, false),
        ]);
    }
    table
}

pub(crate) fn print_absences(
    report: &AbsenceReport,
    absences: &[AbsenceRecord],
    courses: &[Course],
    use_color: bool,
) {
    println!("\n  Semester absences\n");
    println!("{}", build_summary_table(report, use_color));
    if absences.is_empty() {
        println!("\n  No absences recorded yet\n");
        return;
    }
    println!("\n  All absences\n");
    println!("{}", build_list_table(absences, courses, use_color));
    println!();
}

pub(crate) fn output_absences_json(
    report: &AbsenceReport,
    absences: &[AbsenceRecord],
    courses: &[Course],
) -> String {
    let records: Vec<serde_json::Value> = absences
        .iter()
        .map(|a| {
            json!({
                "id": a.id,
                "course_id": a.course_id,
                "course": course_name(courses, a.course_id),
                "note": a.note,
            })
        })
        .collect();
    to_json_string(&json!({
        "by_course": report.by_course,
        "absences": records,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Vec<Course>, Vec<AbsenceRecord>) {
        let courses = vec![Course {
            id: 1,
            name: "Algebra".to_string(),
            planned_hours_per_week: 3,
            semester_id: 1,
        }];
        let absences = vec![
            AbsenceRecord {
                id: 5,
                note: None,
                course_id: 1,
            },
            AbsenceRecord {
                id: 6,
                note: Some("dentist".to_string()),
                course_id: 9,
            },
        ];
        (courses, absences)
    }

    #[test]
    fn list_shows_placeholder_note_and_unknown_course() {
        let (courses, absences) = fixtures();
        let rendered = build_list_table(&absences, &courses, false).to_string();
        assert!(rendered.contains(NO_NOTE));
        assert!(rendered.contains("dentist"));
        assert!(rendered.contains("Unknown Course"));
    }

    #[test]
    fn summary_uses_singular_noun() {
        let (courses, absences) = fixtures();
        let report = AbsenceReport::build(&courses, &absences);
        let rendered = build_summary_table(&report, false).to_string();
        assert!(rendered.contains("1 absence "));
        assert!(rendered.contains("50.0%"));
    }

    #[test]
    fn json_keeps_null_notes() {
        let (courses, absences) = fixtures();
        let report = AbsenceReport::build(&courses, &absences);
        let value: serde_json::Value =
            serde_json::from_str(&output_absences_json(&report, &absences, &courses)).unwrap();
        assert!(value["absences"][0]["note"].is_null());
        assert_eq!(value["absences"][1]["course"], "Unknown Course");
        assert_eq!(value["by_course"][0]["count"], 1);
    }
}
