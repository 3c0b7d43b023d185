use comfy_table::{Color, Table};
use serde_json::json;

use crate::consts::UNKNOWN_SEMESTER;
use crate::data::{Course, Semester};

use super::format::{
    color_if, create_styled_table, header_cell, right_cell, styled_cell, to_json_string,
};

fn semester_name(semesters: &[Semester], id: u64) -> &str {
    semesters
        .iter()
        .find(|s| s.id == id)
        .map_or(UNKNOWN_SEMESTER, |s| s.name.as_str())
}

fn course_count(courses: &[Course], semester_id: u64) -> usize {
    courses.iter().filter(|c| c.semester_id == semester_id).count()
}

fn build_semester_table(
    semesters: &[Semester],
    courses: &[Course],
    selected: Option<u64>,
    use_color: bool,
) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Id", use_color),
        header_cell("Semester Name", use_color),
        header_cell("Courses", use_color),
        header_cell("Selected", use_color),
    ]);
    for semester in semesters {
        let is_selected = selected == Some(semester.id);
        table.add_row(vec![
            right_cell(&semester.id.to_string(), None, false),
            styled_cell(
                &semester.name,
                color_if(use_color && is_selected, Color::Green),
                is_selected,
            ),
            right_cell(&course_count(courses, semester.id).to_string(), None, false),
            styled_cell(if is_selected { "*" } else { "" }, None, false),
        ]);
    }
    table
}

fn build_course_table(courses: &[Course], semesters: &[Semester], use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Id", use_color),
        header_cell("Course Name", use_color),
        header_cell("Semester", use_color),
        header_cell("Planned", use_color),
    ]);
    for course in courses {
        table.add_row(vec![
            right_cell(&course.id.to_string(), None, false),
            styled_cell(&course.name, None, true),
            styled_cell(semester_name(semesters, course.semester_id), None, false),
            right_cell(&format!("{}h", course.planned_hours_per_week), None, false),
        ]);
    }
    table
}

pub(crate) fn print_semester_table(
    semesters: &[Semester],
    courses: &[Course],
    selected: Option<u64>,
    use_color: bool,
) {
    println!("{}", build_semester_table(semesters, courses, selected, use_color));
}

pub(crate) fn print_course_table(courses: &[Course], semesters: &[Semester], use_color: bool) {
    println!("{}", build_course_table(courses, semesters, use_color));
}

pub(crate) fn output_semester_json(
    semesters: &[Semester],
    courses: &[Course],
    selected: Option<u64>,
) -> String {
    let rows: Vec<serde_json::Value> = semesters
        .iter()
        .map(|s| {
            json!({
                "id": s.id,
                "name": s.name,
                "courses": course_count(courses, s.id),
                "selected": selected == Some(s.id),
            })
        })
        .collect();
    to_json_string(&rows)
}

pub(crate) fn output_course_json(courses: &[Course], semesters: &[Semester]) -> String {
    let rows: Vec<serde_json::Value> = courses
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "semester_id": c.semester_id,
                "semester": semester_name(semesters, c.semester_id),
                "planned_hours_per_week": c.planned_hours_per_week,
            })
        })
        .collect();
    to_json_string(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semesters() -> Vec<Semester> {
        vec![
            Semester {
                id: 1,
                name: "Fall 2024".to_string(),
            },
            Semester {
                id: 2,
                name: "Spring 2025".to_string(),
            },
        ]
    }

    #[test]
    fn selected_semester_is_flagged() {
        let value: serde_json::Value =
            serde_json::from_str(&output_semester_json(&semesters(), &[], Some(2))).unwrap();
        assert_eq!(value[0]["selected"], false);
        assert_eq!(value[1]["selected"], true);
    }

    #[test]
    fn course_table_shows_hours_and_unknown_semester() {
        let courses = vec![Course {
            id: 3,
            name: "Physics".to_string(),
            planned_hours_per_week: 5,
            semester_id: 42,
        }];
        let rendered = build_course_table(&courses, &semesters(), false).to_string();
        assert!(rendered.contains("5h"));
        assert!(rendered.contains(UNKNOWN_SEMESTER));
    }

    #[test]
    fn semester_table_marks_selection() {
        let rendered = build_semester_table(&semesters(), &[], Some(1), false).to_string();
        assert!(rendered.contains('*'));
        assert!(rendered.contains("Spring 2025"));
    }

    #[test]
    fn semesters_count_their_courses() {
        let course = |id, semester_id| Course {
            id,
            name: format!("Course {id}"),
            planned_hours_per_week: 2,
            semester_id,
        };
        let courses = vec![course(10, 1), course(11, 1), course(12, 42)];

        let value: serde_json::Value =
            serde_json::from_str(&output_semester_json(&semesters(), &courses, None)).unwrap();
        assert_eq!(value[0]["courses"], 2);
        assert_eq!(value[1]["courses"], 0);

        let rendered = build_semester_table(&semesters(), &courses, None, false).to_string();
        assert!(rendered.contains("Courses"));
        let fall_row = rendered
            .lines()
            .find(|line| line.contains("Fall 2024"))
            .unwrap();
        assert!(fall_row.contains(" 2 "), "{fall_row}");
    }
}
