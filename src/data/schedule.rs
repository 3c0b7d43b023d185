use chrono::NaiveDate;

use crate::consts::UNKNOWN_COURSE;
use crate::error::AppError;
use crate::utils::add_days;

use super::types::{AbsenceRecord, Course, DayOfWeek, ScheduleItem, Semester};

/// One day of the weekly schedule
#[derive(Debug)]
pub(crate) struct DaySchedule<'a> {
    pub(crate) day: DayOfWeek,
    pub(crate) date: NaiveDate,
    pub(crate) items: Vec<&'a ScheduleItem>,
}

/// Bucket items into Monday..Sunday of the week starting at `week_start`,
/// each day ordered by start time.
pub(crate) fn group_by_day(items: &[ScheduleItem], week_start: NaiveDate) -> Vec<DaySchedule<'_>> {
    DayOfWeek::ALL
        .into_iter()
        .map(|day| {
            let mut day_items: Vec<&ScheduleItem> =
                items.iter().filter(|item| item.day_of_week == day).collect();
            day_items.sort_by_key(|item| (item.start_time, item.end_time));
            DaySchedule {
                day,
                date: add_days(week_start, day.offset()),
                items: day_items,
            }
        })
        .collect()
}

pub(crate) fn course_name(courses: &[Course], id: u64) -> &str {
    courses
        .iter()
        .find(|c| c.id == id)
        .map_or(UNKNOWN_COURSE, |c| c.name.as_str())
}

/// Courses belonging to `semester_id`, or all courses when none is selected.
pub(crate) fn courses_in_semester(courses: &[Course], semester_id: Option<u64>) -> Vec<Course> {
    courses
        .iter()
        .filter(|c| semester_id.is_none_or(|id| c.semester_id == id))
        .cloned()
        .collect()
}

pub(crate) fn validate_semester(semester: &Semester) -> Result<(), AppError> {
    if semester.name.trim().is_empty() {
        return Err(AppError::validation("Please enter a semester name"));
    }
    Ok(())
}

pub(crate) fn validate_course(course: &Course) -> Result<(), AppError> {
    if course.name.trim().is_empty() {
        return Err(AppError::validation("Please enter a course name"));
    }
    if course.planned_hours_per_week == 0 {
        return Err(AppError::validation(
            "Planned hours must be a positive number",
        ));
    }
    Ok(())
}

pub(crate) fn validate_schedule_item(item: &ScheduleItem) -> Result<(), AppError> {
    if item.start_time >= item.end_time {
        return Err(AppError::validation("End time must be after start time"));
    }
    Ok(())
}

/// Trim the note; a blank note is no note.
pub(crate) fn absence_record(course_id: u64, note: Option<&str>) -> AbsenceRecord {
    let note = note
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string);
    AbsenceRecord {
        id: 0,
        note,
        course_id,
    }
}
