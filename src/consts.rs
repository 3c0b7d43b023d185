/// Standard date format used throughout the codebase: "2025-01-15"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Short display format for week ranges: "Jan 1, 2024"
pub(crate) const SHORT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Schedule times are stored as "HH:MM"
pub(crate) const TIME_FORMAT: &str = "%H:%M";

/// Storage key for the Monday of the selected week
pub(crate) const SELECTED_WEEK_START_KEY: &str = "selectedWeekStart";

/// Storage key for the selected semester id
pub(crate) const SELECTED_SEMESTER_KEY: &str = "selectedSemesterId";

/// Terminal fallback of error normalization
pub(crate) const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// Shown when an error view has nothing more specific to say
pub(crate) const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Fallback label when a course id has no matching course
pub(crate) const UNKNOWN_COURSE: &str = "Unknown Course";

/// Fallback label when a semester id has no matching semester
pub(crate) const UNKNOWN_SEMESTER: &str = "Unknown Semester";

/// Environment variable overriding the data directory
pub(crate) const HOME_ENV: &str = "SEMPLAN_HOME";
