pub(crate) mod backend;
pub(crate) mod report;
pub(crate) mod schedule;
pub(crate) mod types;

pub(crate) use backend::{JsonFileBackend, PlannerBackend};
pub(crate) use report::{AbsenceReport, absence_noun};
pub(crate) use types::{AbsenceRecord, Course, DayOfWeek, ScheduleItem, Semester, parse_time};
