use crate::consts::SELECTED_SEMESTER_KEY;
use crate::error::AppError;

use super::KeyValueStore;

/// Persisted id of the semester the user is working in.
#[derive(Debug)]
pub(crate) struct SemesterSelection<S: KeyValueStore> {
    selected: Option<u64>,
    store: S,
}

impl<S: KeyValueStore> SemesterSelection<S> {
    pub(crate) fn load(store: S) -> Self {
        let selected = store
            .get(SELECTED_SEMESTER_KEY)
            .and_then(|raw| raw.trim().parse().ok());
        Self { selected, store }
    }

    pub(crate) fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub(crate) fn select(&mut self, id: u64) -> Result<(), AppError> {
        self.store.set(SELECTED_SEMESTER_KEY, &id.to_string())?;
        self.selected = Some(id);
        Ok(())
    }

    pub(crate) fn clear(&mut self) -> Result<(), AppError> {
        self.store.remove(SELECTED_SEMESTER_KEY)?;
        self.selected = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;

    #[test]
    fn empty_store_has_no_selection() {
        let selection = SemesterSelection::load(MemoryStore::default());
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn blank_or_garbage_reads_as_none() {
        for raw in ["", "   ", "abc", "-1"] {
            let selection =
                SemesterSelection::load(MemoryStore::with_entry(SELECTED_SEMESTER_KEY, raw));
            assert_eq!(selection.selected(), None, "{raw:?}");
        }
    }

    #[test]
    fn select_then_clear() {
        let mut store = MemoryStore::default();
        let mut selection = SemesterSelection::load(&mut store);
        selection.select(4).unwrap();
        assert_eq!(selection.selected(), Some(4));
        assert_eq!(store.get(SELECTED_SEMESTER_KEY).as_deref(), Some("4"));

        let mut selection = SemesterSelection::load(&mut store);
        assert_eq!(selection.selected(), Some(4));
        selection.clear().unwrap();
        assert_eq!(selection.selected(), None);
        assert_eq!(store.get(SELECTED_SEMESTER_KEY), None);
    }

    #[test]
    fn failed_write_keeps_selection() {
        let mut selection = SemesterSelection::load(MemoryStore::failing());
        assert!(selection.select(1).is_err());
        assert_eq!(selection.selected(), None);
    }
}
