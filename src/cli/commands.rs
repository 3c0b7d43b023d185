//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Debug, Clone, Subcommand)]
pub(crate) enum Commands {
    /// Show or move the selected week (default)
    Week {
        #[command(subcommand)]
        action: Option<WeekAction>,
    },
    /// Show the selected week's class schedule
    Schedule,
    /// Show absences per course and the full list
    Absences,
    /// Show the absence report
    Report,
    /// Manage semesters
    Semester {
        #[command(subcommand)]
        action: SemesterAction,
    },
    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseAction,
    },
    /// Manage schedule items
    Slot {
        #[command(subcommand)]
        action: SlotAction,
    },
    /// Record or remove absences
    Absence {
        #[command(subcommand)]
        action: AbsenceAction,
    },
    /// Turn a failure value (JSON or plain text) into a readable message
    ExplainError {
        /// Failure value; omit for "undefined"
        value: Option<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum WeekAction {
    /// Show the selected week (default)
    Show,
    /// Move to the next week
    Next,
    /// Move to the previous week
    Prev,
    /// Move to the week containing DATE (YYYYMMDD or YYYY-MM-DD)
    Jump { date: String },
    /// Move to the current week
    Today,
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum SemesterAction {
    /// List semesters
    List,
    /// Create a semester
    Add { name: String },
    /// Make a semester the working selection
    Select { id: u64 },
    /// Clear the working selection
    Clear,
    /// Delete a semester
    Delete { id: u64 },
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum CourseAction {
    /// List courses in the selected semester (all when none is selected)
    List {
        /// List courses from every semester
        #[arg(long)]
        all: bool,
    },
    /// Create a course
    Add {
        name: String,
        /// Semester id (defaults to the selected semester)
        #[arg(long)]
        semester: Option<u64>,
        /// Planned study hours per week
        #[arg(long)]
        hours: u64,
    },
    /// Delete a course
    Delete { id: u64 },
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum SlotAction {
    /// Add a weekly class slot
    Add {
        #[arg(long)]
        course: u64,
        /// Day of week (e.g. Monday, tue)
        #[arg(long, default_value = "Monday")]
        day: String,
        /// Start time (HH:MM)
        #[arg(long, default_value = "09:00")]
        start: String,
        /// End time (HH:MM)
        #[arg(long, default_value = "10:00")]
        end: String,
    },
    /// Delete a class slot
    Delete { id: u64 },
}

#[derive(Debug, Clone, Subcommand)]
pub(crate) enum AbsenceAction {
    /// Record an absence
    Add {
        #[arg(long)]
        course: u64,
        #[arg(long)]
        note: Option<String>,
    },
    /// Delete an absence record
    Delete { id: u64 },
}

impl Commands {
    /// What the command was trying to do, for "Failed to ..." messages
    pub(crate) fn action(&self) -> &'static str {
        match self {
            Commands::Week { .. } => "update week selection",
            Commands::Schedule => "load schedule",
            Commands::Absences => "load absences",
            Commands::Report => "load report",
            Commands::Semester { action } => match action {
                SemesterAction::List => "load semesters",
                SemesterAction::Add { .. } => "create semester",
                SemesterAction::Select { .. } | SemesterAction::Clear => {
                    "update semester selection"
                }
                SemesterAction::Delete { .. } => "delete semester",
            },
            Commands::Course { action } => match action {
                CourseAction::List { .. } => "load courses",
                CourseAction::Add { .. } => "create course",
                CourseAction::Delete { .. } => "delete course",
            },
            Commands::Slot { action } => match action {
                SlotAction::Add { .. } => "save schedule item",
                SlotAction::Delete { .. } => "delete schedule item",
            },
            Commands::Absence { action } => match action {
                AbsenceAction::Add { .. } => "record absence",
                AbsenceAction::Delete { .. } => "delete absence",
            },
            Commands::ExplainError { .. } => "explain error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_name_the_operation() {
        let add = Commands::Semester {
            action: SemesterAction::Add {
                name: "Fall".to_string(),
            },
        };
        assert_eq!(add.action(), "create semester");
        let course = Commands::Course {
            action: CourseAction::Add {
                name: "Algebra".to_string(),
                semester: None,
                hours: 3,
            },
        };
        assert_eq!(course.action(), "create course");
        assert_eq!(Commands::Schedule.action(), "load schedule");
    }
}
