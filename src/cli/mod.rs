pub(crate) mod args;
pub(crate) mod commands;

pub(crate) use args::Cli;
pub(crate) use commands::{
    AbsenceAction, Commands, CourseAction, SemesterAction, SlotAction, WeekAction,
};
