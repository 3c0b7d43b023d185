mod absences;
mod format;
mod manage;
mod report;
mod schedule;
mod view;
mod week;

pub(crate) use absences::{output_absences_json, print_absences};
pub(crate) use manage::{
    output_course_json, output_semester_json, print_course_table, print_semester_table,
};
pub(crate) use report::{output_report_json, print_report};
pub(crate) use schedule::{output_schedule_json, print_schedule_table};
pub(crate) use view::ViewState;
pub(crate) use week::{output_week_json, print_week};
