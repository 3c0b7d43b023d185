use chrono::{DateTime, NaiveDate, Utc};

use crate::consts::{DATE_FORMAT, SELECTED_WEEK_START_KEY};
use crate::error::AppError;
use crate::utils::{Timezone, add_days, format_range, monday_of};

use super::KeyValueStore;

/// The Monday-to-Sunday week currently being viewed.
///
/// `week_start` is always a Monday. Each transition is written to the store
/// before it becomes visible, so a completed call never leaves memory and
/// storage disagreeing.
#[derive(Debug)]
pub(crate) struct WeekWindow<S: KeyValueStore> {
    week_start: NaiveDate,
    store: S,
}

impl<S: KeyValueStore> WeekWindow<S> {
    /// Restore the persisted week, or fall back to the week containing `today`.
    pub(crate) fn load(store: S, today: NaiveDate, timezone: Timezone) -> Self {
        let week_start = store
            .get(SELECTED_WEEK_START_KEY)
            .and_then(|raw| parse_stored(&raw, timezone))
            .map(monday_of)
            .unwrap_or_else(|| monday_of(today));
        tracing::debug!(%week_start, "week window loaded");
        Self { week_start, store }
    }

    pub(crate) fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub(crate) fn week_end(&self) -> NaiveDate {
        add_days(self.week_start, 6)
    }

    /// "Jan 1, 2024 - Jan 7, 2024"
    pub(crate) fn format_range(&self) -> String {
        format_range(self.week_start, self.week_end())
    }

    pub(crate) fn go_to_previous_week(&mut self) -> Result<(), AppError> {
        self.set_week_start(add_days(self.week_start, -7))
    }

    pub(crate) fn go_to_next_week(&mut self) -> Result<(), AppError> {
        self.set_week_start(add_days(self.week_start, 7))
    }

    /// Show the week containing `date`.
    pub(crate) fn jump_to(&mut self, date: NaiveDate) -> Result<(), AppError> {
        self.set_week_start(date)
    }

    /// Write the current selection back, e.g. after falling back to today.
    pub(crate) fn save(&mut self) -> Result<(), AppError> {
        self.set_week_start(self.week_start)
    }

    fn set_week_start(&mut self, date: NaiveDate) -> Result<(), AppError> {
        let monday = monday_of(date);
        self.store.set(
            SELECTED_WEEK_START_KEY,
            &monday.format(DATE_FORMAT).to_string(),
        )?;
        self.week_start = monday;
        tracing::debug!(week_start = %monday, "week window persisted");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn into_store(self) -> S {
        self.store
    }
}

/// Accepts a plain ISO date, or a full ISO date-time read in `timezone`.
fn parse_stored(raw: &str, timezone: Timezone) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(timezone.date_of(dt.with_timezone(&Utc))),
        Err(_) => {
            tracing::debug!(value = raw, "ignoring unparseable stored week start");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;
    use chrono::{Datelike, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn utc() -> Timezone {
        Timezone::Named(chrono_tz::UTC)
    }

    fn stored(value: &str) -> MemoryStore {
        MemoryStore::with_entry(SELECTED_WEEK_START_KEY, value)
    }

    #[test]
    fn empty_store_falls_back_to_monday_of_today() {
        let week = WeekWindow::load(MemoryStore::default(), d(2024, 1, 10), utc());
        assert_eq!(week.week_start(), d(2024, 1, 8));
        assert_eq!(week.week_end(), d(2024, 1, 14));
    }

    #[test]
    fn malformed_value_falls_back_to_today() {
        let week = WeekWindow::load(stored("garbage"), d(2024, 1, 10), utc());
        assert_eq!(week.week_start(), d(2024, 1, 8));
    }

    #[test]
    fn stored_value_wins_over_today() {
        let week = WeekWindow::load(stored("2024-01-01"), d(2024, 6, 10), utc());
        assert_eq!(week.week_start(), d(2024, 1, 1));
    }

    #[test]
    fn stored_non_monday_is_normalized() {
        // 2024-01-04 is a Thursday
        let week = WeekWindow::load(stored("2024-01-04"), d(2024, 6, 10), utc());
        assert_eq!(week.week_start(), d(2024, 1, 1));
    }

    #[test]
    fn stored_datetime_is_read_in_timezone() {
        // Monday midnight in Berlin, serialized as UTC
        let berlin = Timezone::parse(Some("Europe/Berlin")).unwrap();
        let week = WeekWindow::load(stored("2024-01-07T23:00:00.000Z"), d(2024, 6, 10), berlin);
        assert_eq!(week.week_start(), d(2024, 1, 8));
    }

    #[test]
    fn scenario_next_week_from_jan_first() {
        let mut week = WeekWindow::load(stored("2024-01-01"), d(2024, 6, 10), utc());
        assert_eq!(week.format_range(), "Jan 1, 2024 - Jan 7, 2024");
        week.go_to_next_week().unwrap();
        assert_eq!(week.week_start(), d(2024, 1, 8));
        assert_eq!(week.format_range(), "Jan 8, 2024 - Jan 14, 2024");
    }

    #[test]
    fn next_then_previous_restores_start() {
        let mut week = WeekWindow::load(stored("2024-02-26"), d(2024, 6, 10), utc());
        week.go_to_next_week().unwrap();
        assert_eq!(week.week_start(), d(2024, 3, 4));
        week.go_to_previous_week().unwrap();
        assert_eq!(week.week_start(), d(2024, 2, 26));
    }

    #[test]
    fn previous_week_crosses_year() {
        let mut week = WeekWindow::load(stored("2024-01-01"), d(2024, 6, 10), utc());
        week.go_to_previous_week().unwrap();
        assert_eq!(week.week_start(), d(2023, 12, 25));
        assert_eq!(week.week_end(), d(2023, 12, 31));
    }

    #[test]
    fn jump_to_normalizes_to_monday() {
        let mut week = WeekWindow::load(MemoryStore::default(), d(2024, 1, 10), utc());
        week.jump_to(d(2024, 9, 1)).unwrap();
        assert_eq!(week.week_start(), d(2024, 8, 26));
        assert_eq!(week.week_start().weekday(), Weekday::Mon);
        assert_eq!(week.week_end().weekday(), Weekday::Sun);
    }

    #[test]
    fn every_mutation_round_trips_through_store() {
        let mut week = WeekWindow::load(MemoryStore::default(), d(2024, 1, 10), utc());
        week.go_to_next_week().unwrap();
        week.go_to_next_week().unwrap();
        week.go_to_previous_week().unwrap();
        let expected = week.week_start();

        let store = week.into_store();
        assert_eq!(
            store.get(SELECTED_WEEK_START_KEY).as_deref(),
            Some("2024-01-15")
        );
        let reloaded = WeekWindow::load(store, d(2030, 1, 1), utc());
        assert_eq!(reloaded.week_start(), expected);
    }

    #[test]
    fn failed_write_keeps_previous_week() {
        let mut week = WeekWindow::load(MemoryStore::failing(), d(2024, 1, 10), utc());
        assert!(week.go_to_next_week().is_err());
        assert_eq!(week.week_start(), d(2024, 1, 8));
    }

    #[test]
    fn save_persists_fallback() {
        let mut week = WeekWindow::load(MemoryStore::default(), d(2024, 1, 10), utc());
        week.save().unwrap();
        let store = week.into_store();
        assert_eq!(
            store.get(SELECTED_WEEK_START_KEY).as_deref(),
            Some("2024-01-08")
        );
    }
}
