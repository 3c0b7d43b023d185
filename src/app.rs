use std::path::PathBuf;

use crate::cli::{
    AbsenceAction, Cli, Commands, CourseAction, SemesterAction, SlotAction, WeekAction,
};
use crate::data::schedule::{
    absence_record, courses_in_semester, group_by_day, validate_course, validate_schedule_item,
    validate_semester,
};
use crate::data::{
    AbsenceRecord, AbsenceReport, Course, DayOfWeek, JsonFileBackend, PlannerBackend,
    ScheduleItem, Semester, parse_time,
};
use crate::error::AppError;
use crate::failure::{Failure, normalize};
use crate::output::{
    ViewState, output_absences_json, output_course_json, output_report_json,
    output_schedule_json, output_semester_json, output_week_json, print_absences,
    print_course_table, print_report, print_schedule_table, print_semester_table, print_week,
};
use crate::state::{FileStore, SemesterSelection, WeekWindow};
use crate::utils::{Timezone, parse_date};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) timezone: Timezone,
    pub(crate) data_dir: PathBuf,
}

impl CommandContext<'_> {
    fn store(&self) -> FileStore {
        FileStore::in_dir(&self.data_dir)
    }

    fn backend(&self) -> Result<JsonFileBackend, AppError> {
        JsonFileBackend::in_dir(&self.data_dir)
    }

    fn week(&self) -> WeekWindow<FileStore> {
        WeekWindow::load(self.store(), self.timezone.today(), self.timezone)
    }
}

/// Print a view's error state and stop with a failing exit status
fn exit_on_error(state: &ViewState) {
    if let ViewState::Error(_) = state {
        state.print();
        std::process::exit(1);
    }
}

fn handle_week(action: Option<WeekAction>, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let mut week = ctx.week();
    match action.unwrap_or(WeekAction::Show) {
        WeekAction::Show => {
            // Remember the fallback week the first time it is shown
            if let Err(e) = week.save() {
                tracing::warn!(error = %e, "could not persist week selection");
            }
        }
        WeekAction::Next => week.go_to_next_week()?,
        WeekAction::Prev => week.go_to_previous_week()?,
        WeekAction::Jump { date } => week.jump_to(parse_date(&date)?)?,
        WeekAction::Today => week.jump_to(ctx.timezone.today())?,
    }

    if ctx.cli.json {
        println!("{}", output_week_json(week.week_start(), week.week_end()));
    } else {
        print_week(&week.format_range(), ctx.cli.use_color());
    }
    Ok(())
}

fn load_schedule(ctx: &CommandContext<'_>) -> Result<(Vec<ScheduleItem>, Vec<Course>), AppError> {
    let backend = ctx.backend()?;
    Ok((backend.schedule_items()?, backend.courses()?))
}

fn handle_schedule(ctx: &CommandContext<'_>) {
    let week = ctx.week();
    let loaded = load_schedule(ctx).map_err(Failure::native);
    let state = ViewState::resolve(
        &loaded,
        |(items, _)| items.is_empty(),
        "No schedule items yet. Add your first class or activity!",
    );
    exit_on_error(&state);
    let Ok((items, courses)) = loaded else {
        return;
    };

    let days = group_by_day(&items, week.week_start());
    if ctx.cli.json {
        println!(
            "{}",
            output_schedule_json(week.week_start(), week.week_end(), &days, &courses)
        );
        return;
    }
    if state.print() {
        print_schedule_table(
            week.week_start(),
            week.week_end(),
            &days,
            &courses,
            ctx.cli.use_color(),
        );
    }
}

fn load_absences(ctx: &CommandContext<'_>) -> Result<(Vec<Course>, Vec<AbsenceRecord>), AppError> {
    let backend = ctx.backend()?;
    Ok((backend.courses()?, backend.absences()?))
}

fn handle_absences(ctx: &CommandContext<'_>) {
    let loaded = load_absences(ctx).map_err(Failure::native);
    let state = ViewState::resolve(
        &loaded,
        |(courses, _)| courses.is_empty(),
        "No courses available. Add courses in the Manage section to start tracking absences.",
    );
    exit_on_error(&state);
    let Ok((courses, absences)) = loaded else {
        return;
    };

    let report = AbsenceReport::build(&courses, &absences);
    if ctx.cli.json {
        println!("{}", output_absences_json(&report, &absences, &courses));
    } else if state.print() {
        print_absences(&report, &absences, &courses, ctx.cli.use_color());
    }
}

fn handle_report(ctx: &CommandContext<'_>) {
    let loaded = load_absences(ctx).map_err(Failure::native);
    let state = ViewState::resolve(
        &loaded,
        |(courses, _)| courses.is_empty(),
        "No data to report yet",
    );
    exit_on_error(&state);
    let Ok((courses, absences)) = loaded else {
        return;
    };

    let report = AbsenceReport::build(&courses, &absences);
    if ctx.cli.json {
        println!("{}", output_report_json(&report));
    } else if state.print() {
        print_report(&report, ctx.cli.use_color());
    }
}

fn report_deleted(kind: &str, id: u64, removed: bool) -> Result<(), AppError> {
    if removed {
        println!("{kind} {id} deleted");
        Ok(())
    } else {
        Err(AppError::validation(&format!("{kind} {id} does not exist")))
    }
}

fn handle_semester(action: SemesterAction, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let mut selection = SemesterSelection::load(ctx.store());
    match action {
        SemesterAction::List => {
            let backend = ctx.backend()?;
            let semesters = backend.semesters()?;
            let courses = backend.courses()?;
            if ctx.cli.json {
                println!(
                    "{}",
                    output_semester_json(&semesters, &courses, selection.selected())
                );
            } else if semesters.is_empty() {
                println!("No semesters yet. Create your first semester to get started.");
            } else {
                print_semester_table(
                    &semesters,
                    &courses,
                    selection.selected(),
                    ctx.cli.use_color(),
                );
            }
        }
        SemesterAction::Add { name } => {
            let semester = Semester {
                id: 0,
                name: name.trim().to_string(),
            };
            validate_semester(&semester)?;
            let id = ctx.backend()?.create_semester(semester)?;
            println!("Semester created successfully (id {id})");
        }
        SemesterAction::Select { id } => {
            if !ctx.backend()?.semesters()?.iter().any(|s| s.id == id) {
                return Err(AppError::NotFound {
                    kind: "Semester",
                    id,
                });
            }
            selection.select(id)?;
            println!("Selected semester {id}");
        }
        SemesterAction::Clear => {
            selection.clear()?;
            println!("Semester selection cleared");
        }
        SemesterAction::Delete { id } => {
            let removed = ctx.backend()?.delete_semester(id)?;
            if removed && selection.selected() == Some(id) {
                selection.clear()?;
            }
            report_deleted("Semester", id, removed)?;
        }
    }
    Ok(())
}

fn handle_course(action: CourseAction, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match action {
        CourseAction::List { all } => {
            let backend = ctx.backend()?;
            let selected = if all {
                None
            } else {
                SemesterSelection::load(ctx.store()).selected()
            };
            let courses = courses_in_semester(&backend.courses()?, selected);
            let semesters = backend.semesters()?;
            if ctx.cli.json {
                println!("{}", output_course_json(&courses, &semesters));
            } else if courses.is_empty() {
                println!("No courses yet. Add a course to a semester to get started.");
            } else {
                print_course_table(&courses, &semesters, ctx.cli.use_color());
            }
        }
        CourseAction::Add {
            name,
            semester,
            hours,
        } => {
            let semester_id = semester
                .or_else(|| SemesterSelection::load(ctx.store()).selected())
                .ok_or_else(|| AppError::validation("Please select a semester"))?;
            let course = Course {
                id: 0,
                name: name.trim().to_string(),
                planned_hours_per_week: hours,
                semester_id,
            };
            validate_course(&course)?;
            let id = ctx.backend()?.create_course(course)?;
            println!("Course created successfully (id {id})");
        }
        CourseAction::Delete { id } => {
            let removed = ctx.backend()?.delete_course(id)?;
            report_deleted("Course", id, removed)?;
        }
    }
    Ok(())
}

fn handle_slot(action: SlotAction, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match action {
        SlotAction::Add {
            course,
            day,
            start,
            end,
        } => {
            let item = ScheduleItem {
                id: 0,
                day_of_week: day.parse::<DayOfWeek>()?,
                start_time: parse_time(&start)?,
                end_time: parse_time(&end)?,
                course_id: course,
            };
            validate_schedule_item(&item)?;
            let id = ctx.backend()?.create_schedule_item(item)?;
            println!("Schedule item created (id {id})");
        }
        SlotAction::Delete { id } => {
            let removed = ctx.backend()?.delete_schedule_item(id)?;
            report_deleted("Schedule item", id, removed)?;
        }
    }
    Ok(())
}

fn handle_absence(action: AbsenceAction, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match action {
        AbsenceAction::Add { course, note } => {
            let record = absence_record(course, note.as_deref());
            let id = ctx.backend()?.add_absence(record)?;
            println!("Absence recorded (id {id})");
        }
        AbsenceAction::Delete { id } => {
            let removed = ctx.backend()?.delete_absence(id)?;
            report_deleted("Absence", id, removed)?;
        }
    }
    Ok(())
}

fn handle_explain_error(value: Option<&str>) {
    println!("{}", normalize(&Failure::parse(value)));
}

/// Run one command. Errors come back for the caller to normalize and report.
pub(crate) fn run(command: Commands, ctx: &CommandContext<'_>) -> Result<(), AppError> {
    tracing::debug!(?command, data_dir = %ctx.data_dir.display(), "running command");
    match command {
        Commands::Week { action } => handle_week(action, ctx)?,
        Commands::Schedule => handle_schedule(ctx),
        Commands::Absences => handle_absences(ctx),
        Commands::Report => handle_report(ctx),
        Commands::Semester { action } => handle_semester(action, ctx)?,
        Commands::Course { action } => handle_course(action, ctx)?,
        Commands::Slot { action } => handle_slot(action, ctx)?,
        Commands::Absence { action } => handle_absence(action, ctx)?,
        Commands::ExplainError { value } => handle_explain_error(value.as_deref()),
    }
    Ok(())
}
