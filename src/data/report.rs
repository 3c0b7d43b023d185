use serde::Serialize;

use super::types::{AbsenceRecord, Course};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CourseAbsences {
    pub(crate) course_id: u64,
    pub(crate) course: String,
    pub(crate) count: usize,
    /// Share of all absences, in percent
    pub(crate) share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AbsenceReport {
    pub(crate) total_courses: usize,
    pub(crate) total_absences: usize,
    pub(crate) average_per_course: f64,
    pub(crate) most_absences: usize,
    pub(crate) by_course: Vec<CourseAbsences>,
}

impl AbsenceReport {
    /// Absences for courses outside `courses` still count toward the total.
    pub(crate) fn build(courses: &[Course], absences: &[AbsenceRecord]) -> Self {
        let total_absences = absences.len();
        let by_course: Vec<CourseAbsences> = courses
            .iter()
            .map(|course| {
                let count = absences.iter().filter(|a| a.course_id == course.id).count();
                let share = if total_absences > 0 {
                    count as f64 / total_absences as f64 * 100.0
                } else {
                    0.0
                };
                CourseAbsences {
                    course_id: course.id,
                    course: course.name.clone(),
                    count,
                    share,
                }
            })
            .collect();

        let average_per_course = if courses.is_empty() {
            0.0
        } else {
            total_absences as f64 / courses.len() as f64
        };

        Self {
            total_courses: courses.len(),
            total_absences,
            average_per_course,
            most_absences: by_course.iter().map(|c| c.count).max().unwrap_or(0),
            by_course,
        }
    }

    /// One decimal, or "0" when there are no courses
    pub(crate) fn average_label(&self) -> String {
        if self.total_courses == 0 {
            "0".to_string()
        } else {
            format!("{:.1}", self.average_per_course)
        }
    }
}

/// "1 absence", "3 absences"
pub(crate) fn absence_noun(count: usize) -> &'static str {
    if count == 1 { "absence" } else { "absences" }
}
