//! Planner data access
//!
//! `PlannerBackend` mirrors the remote actor's request/response surface.
//! `JsonFileBackend` satisfies it from a JSON document on disk, rewriting
//! the whole document after every mutation.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;

use super::types::{AbsenceRecord, Course, ScheduleItem, Semester};

pub(crate) const PLANNER_FILE: &str = "planner.json";

pub(crate) trait PlannerBackend {
    fn semesters(&self) -> Result<Vec<Semester>, AppError>;
    fn courses(&self) -> Result<Vec<Course>, AppError>;
    fn schedule_items(&self) -> Result<Vec<ScheduleItem>, AppError>;
    fn absences(&self) -> Result<Vec<AbsenceRecord>, AppError>;

    /// Each create ignores the submitted id and returns the assigned one.
    fn create_semester(&mut self, semester: Semester) -> Result<u64, AppError>;
    fn create_course(&mut self, course: Course) -> Result<u64, AppError>;
    fn create_schedule_item(&mut self, item: ScheduleItem) -> Result<u64, AppError>;
    fn add_absence(&mut self, record: AbsenceRecord) -> Result<u64, AppError>;

    /// Each delete reports whether a record was removed.
    fn delete_semester(&mut self, id: u64) -> Result<bool, AppError>;
    fn delete_course(&mut self, id: u64) -> Result<bool, AppError>;
    fn delete_schedule_item(&mut self, id: u64) -> Result<bool, AppError>;
    fn delete_absence(&mut self, id: u64) -> Result<bool, AppError>;
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlannerDocument {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    semesters: Vec<Semester>,
    #[serde(default)]
    courses: Vec<Course>,
    #[serde(default)]
    schedule_items: Vec<ScheduleItem>,
    #[serde(default)]
    absences: Vec<AbsenceRecord>,
}

impl PlannerDocument {
    fn allocate_id(&mut self) -> Result<u64, AppError> {
        let highest = self
            .semesters
            .iter()
            .map(|s| s.id)
            .chain(self.courses.iter().map(|c| c.id))
            .chain(self.schedule_items.iter().map(|i| i.id))
            .chain(self.absences.iter().map(|a| a.id))
            .max()
            .unwrap_or(0);
        self.next_id = self
            .next_id
            .max(highest)
            .checked_add(1)
            .ok_or_else(|| AppError::validation("No more record ids are available"))?;
        Ok(self.next_id)
    }

    fn require_semester(&self, id: u64) -> Result<(), AppError> {
        if self.semesters.iter().any(|s| s.id == id) {
            Ok(())
        } else {
            Err(AppError::NotFound {
                kind: "Semester",
                id,
            })
        }
    }

    fn require_course(&self, id: u64) -> Result<(), AppError> {
        if self.courses.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(AppError::NotFound { kind: "Course", id })
        }
    }
}

fn remove_by_id<T>(items: &mut Vec<T>, id: u64, id_of: impl Fn(&T) -> u64) -> bool {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    items.len() != before
}

#[derive(Debug)]
pub(crate) struct JsonFileBackend {
    path: PathBuf,
    doc: PlannerDocument,
}

impl JsonFileBackend {
    /// Open the planner document. A missing file is an empty planner; a
    /// malformed one is an error so it is never silently overwritten.
    pub(crate) fn open(path: PathBuf) -> Result<Self, AppError> {
        let doc = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                AppError::Malformed {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PlannerDocument::default(),
            Err(source) => return Err(AppError::Read { path, source }),
        };
        tracing::debug!(
            path = %path.display(),
            semesters = doc.semesters.len(),
            courses = doc.courses.len(),
            "opened planner"
        );
        Ok(Self { path, doc })
    }

    pub(crate) fn in_dir(dir: &Path) -> Result<Self, AppError> {
        Self::open(dir.join(PLANNER_FILE))
    }

    /// Apply `change` to a copy of the document, save it, then commit.
    fn mutate<T>(
        &mut self,
        change: impl FnOnce(&mut PlannerDocument) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut next = self.doc.clone();
        let result = change(&mut next)?;
        self.save(&next)?;
        self.doc = next;
        Ok(result)
    }

    fn save(&self, doc: &PlannerDocument) -> Result<(), AppError> {
        let write_err = |source| AppError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let file = File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, doc)?;
        writer.flush().map_err(write_err)
    }
}

impl PlannerBackend for JsonFileBackend {
    fn semesters(&self) -> Result<Vec<Semester>, AppError> {
        Ok(self.doc.semesters.clone())
    }

    fn courses(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.doc.courses.clone())
    }

    fn schedule_items(&self) -> Result<Vec<ScheduleItem>, AppError> {
        Ok(self.doc.schedule_items.clone())
    }

    fn absences(&self) -> Result<Vec<AbsenceRecord>, AppError> {
        Ok(self.doc.absences.clone())
    }

    fn create_semester(&mut self, semester: Semester) -> Result<u64, AppError> {
        self.mutate(|doc| {
            let id = doc.allocate_id()?;
            doc.semesters.push(Semester { id, ..semester });
            Ok(id)
        })
    }

    fn create_course(&mut self, course: Course) -> Result<u64, AppError> {
        self.mutate(|doc| {
            doc.require_semester(course.semester_id)?;
            let id = doc.allocate_id()?;
            doc.courses.push(Course { id, ..course });
            Ok(id)
        })
    }

    fn create_schedule_item(&mut self, item: ScheduleItem) -> Result<u64, AppError> {
        self.mutate(|doc| {
            doc.require_course(item.course_id)?;
            let id = doc.allocate_id()?;
            doc.schedule_items.push(ScheduleItem { id, ..item });
            Ok(id)
        })
    }

    fn add_absence(&mut self, record: AbsenceRecord) -> Result<u64, AppError> {
        self.mutate(|doc| {
            doc.require_course(record.course_id)?;
            let id = doc.allocate_id()?;
            doc.absences.push(AbsenceRecord { id, ..record });
            Ok(id)
        })
    }

    fn delete_semester(&mut self, id: u64) -> Result<bool, AppError> {
        self.mutate(|doc| Ok(remove_by_id(&mut doc.semesters, id, |s| s.id)))
    }

    fn delete_course(&mut self, id: u64) -> Result<bool, AppError> {
        self.mutate(|doc| Ok(remove_by_id(&mut doc.courses, id, |c| c.id)))
    }

    fn delete_schedule_item(&mut self, id: u64) -> Result<bool, AppError> {
        self.mutate(|doc| Ok(remove_by_id(&mut doc.schedule_items, id, |i| i.id)))
    }

    fn delete_absence(&mut self, id: u64) -> Result<bool, AppError> {
        self.mutate(|doc| Ok(remove_by_id(&mut doc.absences, id, |a| a.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::{DayOfWeek, parse_time};

    fn semester(name: &str) -> Semester {
        Semester {
            id: 0,
            name: name.to_string(),
        }
    }

    fn course(name: &str, semester_id: u64) -> Course {
        Course {
            id: 0,
            name: name.to_string(),
            planned_hours_per_week: 4,
            semester_id,
        }
    }

    #[test]
    fn missing_file_is_empty_planner() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::in_dir(dir.path()).unwrap();
        assert!(backend.semesters().unwrap().is_empty());
        assert!(backend.absences().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PLANNER_FILE), "[1,2").unwrap();
        let err = JsonFileBackend::in_dir(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("Malformed planner data"));
    }

    #[test]
    fn creates_assign_fresh_ids_and_persist() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::in_dir(dir.path()).unwrap();
        let fall = backend.create_semester(semester("Fall 2024")).unwrap();
        let algebra = backend.create_course(course("Algebra", fall)).unwrap();
        assert_ne!(fall, algebra);

        let item = ScheduleItem {
            id: 0,
            day_of_week: DayOfWeek::Monday,
            start_time: parse_time("09:00").unwrap(),
            end_time: parse_time("10:00").unwrap(),
            course_id: algebra,
        };
        let slot = backend.create_schedule_item(item).unwrap();
        let absence = backend
            .add_absence(AbsenceRecord {
                id: 0,
                note: Some("sick".to_string()),
                course_id: algebra,
            })
            .unwrap();

        let reopened = JsonFileBackend::in_dir(dir.path()).unwrap();
        assert_eq!(reopened.semesters().unwrap()[0].id, fall);
        assert_eq!(reopened.courses().unwrap()[0].semester_id, fall);
        assert_eq!(reopened.schedule_items().unwrap()[0].id, slot);
        assert_eq!(reopened.absences().unwrap()[0].id, absence);
    }

    #[test]
    fn course_requires_existing_semester() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::in_dir(dir.path()).unwrap();
        let err = backend.create_course(course("Orphan", 99)).unwrap_err();
        assert_eq!(err.to_string(), "Semester 99 not found");
        assert!(backend.courses().unwrap().is_empty());
        assert!(!dir.path().join(PLANNER_FILE).exists());
    }

    #[test]
    fn absence_requires_existing_course() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::in_dir(dir.path()).unwrap();
        let err = backend
            .add_absence(AbsenceRecord {
                id: 0,
                note: None,
                course_id: 5,
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Course 5 not found");
    }

    #[test]
    fn delete_reports_whether_removed() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::in_dir(dir.path()).unwrap();
        let id = backend.create_semester(semester("Spring")).unwrap();
        assert!(backend.delete_semester(id).unwrap());
        assert!(!backend.delete_semester(id).unwrap());
        assert!(backend.semesters().unwrap().is_empty());
    }

    #[test]
    fn exhausted_ids_fail_without_touching_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PLANNER_FILE);
        let original = format!(r#"{{"semesters":[{{"id":{},"name":"Last"}}]}}"#, u64::MAX);
        std::fs::write(&path, &original).unwrap();

        let mut backend = JsonFileBackend::in_dir(dir.path()).unwrap();
        let err = backend.create_semester(semester("Overflow")).unwrap_err();
        assert_eq!(err.to_string(), "No more record ids are available");
        assert_eq!(backend.semesters().unwrap().len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let dir = tempfile::tempdir().unwrap();
        let mut backend = JsonFileBackend::in_dir(dir.path()).unwrap();
        let first = backend.create_semester(semester("A")).unwrap();
        backend.delete_semester(first).unwrap();
        let second = backend.create_semester(semester("B")).unwrap();
        assert!(second > first);
    }
}
