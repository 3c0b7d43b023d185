use comfy_table::{Color, Table};

use crate::data::report::AbsenceReport;

use super::format::{
    color_if, create_styled_table, format_share, header_cell, right_cell, styled_cell,
    to_json_string,
};

fn build_totals_table(report: &AbsenceReport, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Total Courses", use_color),
        header_cell("Total Absences", use_color),
        header_cell("Avg. Absences/Course", use_color),
        header_cell("Most Absences", use_color),
    ]);
    table.add_row(vec![
        right_cell(&report.total_courses.to_string(), None, true),
        right_cell(&report.total_absences.to_string(), None, true),
        right_cell(&report.average_label(), None, true),
        right_cell(
            &report.most_absences.to_string(),
            color_if(use_color, Color::Yellow),
            true,
        ),
    ]);
    table
}

fn build_breakdown_table(report: &AbsenceReport, use_color: bool) -> Table {
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("Course", use_color),
        header_cell("Absences", use_color),
        header_cell("Share", use_color),
    ]);
    for row in &report.by_course {
        table.add_row(vec![
            styled_cell(&row.course, None, false),
            right_cell(&row.count.to_string(), None, false),
            right_cell(&format_share(row.share), None, false),
        ]);
    }
    table
}

pub(crate) fn print_report(report: &AbsenceReport, use_color: bool) {
    println!("\n  Semester Report\n");
    println!("{}", build_totals_table(report, use_color));
    println!("\n  Absences by Course\n");
    println!("{}", build_breakdown_table(report, use_color));
    println!();
}

pub(crate) fn output_report_json(report: &AbsenceReport) -> String {
    to_json_string(report)
}
