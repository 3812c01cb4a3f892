/*
Generic record repository.
One Collection per entity lives inside models::Db; handlers go through
these methods instead of touching the backing Vec directly, so every
entity gets the same id assignment, timestamp stamping, and not-found
behavior.
*/

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

// Implemented by every stored entity (see models.rs).
pub trait Record: Clone {
    const NAME: &'static str;

    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
    fn created_at(&self) -> Option<DateTime<FixedOffset>>;
    fn set_created_at(&mut self, at: Option<DateTime<FixedOffset>>);
    fn set_updated_at(&mut self, at: Option<DateTime<FixedOffset>>);
}

// Insertion-ordered backing collection. Serializes as a plain JSON array
// so the database file stays readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    // Defensive copy of every record, insertion order.
    pub fn all(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn get(&self, id: u32) -> AppResult<T> {
        self.items
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(AppError::NotFound(T::NAME))
    }

    // Ids are one plus the current maximum, 1 for an empty collection.
    // Never reassigned afterwards.
    pub fn create(&mut self, mut record: T, now: DateTime<FixedOffset>) -> T {
        let id = self.items.iter().map(Record::id).max().unwrap_or(0) + 1;
        record.set_id(id);
        record.set_created_at(Some(now));
        record.set_updated_at(None);
        self.items.push(record.clone());
        record
    }

    // Full-record replace: the stored record's fields become `record`'s,
    // keeping the id and original created_at.
    pub fn update(&mut self, id: u32, mut record: T, now: DateTime<FixedOffset>) -> AppResult<T> {
        let Some(slot) = self.items.iter_mut().find(|r| r.id() == id) else {
            return Err(AppError::NotFound(T::NAME));
        };
        record.set_id(id);
        record.set_created_at(slot.created_at());
        record.set_updated_at(Some(now));
        *slot = record.clone();
        Ok(record)
    }

    // In-place mutation for transitions that are not full replaces
    // (e.g. completing a task). Does not stamp updated_at.
    pub fn modify(&mut self, id: u32, f: impl FnOnce(&mut T)) -> AppResult<T> {
        let Some(slot) = self.items.iter_mut().find(|r| r.id() == id) else {
            return Err(AppError::NotFound(T::NAME));
        };
        f(slot);
        Ok(slot.clone())
    }

    // A second delete of the same id is NotFound again, not a no-op.
    pub fn delete(&mut self, id: u32) -> AppResult<()> {
        let before = self.items.len();
        self.items.retain(|r| r.id() != id);
        if self.items.len() == before {
            return Err(AppError::NotFound(T::NAME));
        }
        Ok(())
    }

    pub fn filter(&self, pred: impl Fn(&T) -> bool) -> Vec<T> {
        self.items.iter().filter(|r| pred(r)).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: u32,
        text: String,
        created_at: Option<DateTime<FixedOffset>>,
        updated_at: Option<DateTime<FixedOffset>>,
    }

    impl Record for Note {
        const NAME: &'static str = "Note";

        fn id(&self) -> u32 {
            self.id
        }
        fn set_id(&mut self, id: u32) {
            self.id = id;
        }
        fn created_at(&self) -> Option<DateTime<FixedOffset>> {
            self.created_at
        }
        fn set_created_at(&mut self, at: Option<DateTime<FixedOffset>>) {
            self.created_at = at;
        }
        fn set_updated_at(&mut self, at: Option<DateTime<FixedOffset>>) {
            self.updated_at = at;
        }
    }

    fn note(text: &str) -> Note {
        Note {
            id: 0,
            text: text.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 20, 12, 0, 0)
            .unwrap()
    }

    #[test]
    fn create_assigns_sequential_ids_and_stamps_created_at() {
        let mut notes = Collection::default();
        let a = notes.create(note("a"), now());
        let b = notes.create(note("b"), now());

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, Some(now()));
        assert_eq!(a.updated_at, None);
    }

    #[test]
    fn create_after_delete_reuses_max_plus_one() {
        let mut notes = Collection::default();
        notes.create(note("a"), now());
        let b = notes.create(note("b"), now());
        notes.delete(b.id).unwrap();

        // max remaining id is 1, so the next id is 2 again
        let c = notes.create(note("c"), now());
        assert_eq!(c.id, 2);
    }

    #[test]
    fn round_trip_create_then_get() {
        let mut notes = Collection::default();
        let created = notes.create(note("hello"), now());
        let fetched = notes.get(created.id).unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.text, "hello");
    }

    #[test]
    fn get_missing_id_is_not_found() {
        let notes: Collection<Note> = Collection::default();
        assert!(matches!(notes.get(42), Err(AppError::NotFound("Note"))));
    }

    #[test]
    fn update_keeps_id_and_created_at_and_stamps_updated_at() {
        let mut notes = Collection::default();
        let created = notes.create(note("old"), now());

        let later = now() + chrono::Duration::hours(1);
        let updated = notes.update(created.id, note("new"), later).unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.text, "new");
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, Some(later));
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut notes: Collection<Note> = Collection::default();
        assert!(notes.update(7, note("x"), now()).is_err());
    }

    #[test]
    fn delete_then_get_is_not_found_and_second_delete_fails_too() {
        let mut notes = Collection::default();
        let created = notes.create(note("doomed"), now());

        notes.delete(created.id).unwrap();
        assert!(notes.get(created.id).is_err());
        assert!(matches!(
            notes.delete(created.id),
            Err(AppError::NotFound("Note"))
        ));
    }

    #[test]
    fn all_preserves_insertion_order() {
        let mut notes = Collection::default();
        notes.create(note("first"), now());
        notes.create(note("second"), now());
        notes.create(note("third"), now());

        let texts: Vec<_> = notes.all().into_iter().map(|n| n.text).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn filter_is_a_pure_predicate_over_clones() {
        let mut notes = Collection::default();
        notes.create(note("keep"), now());
        notes.create(note("drop"), now());
        notes.create(note("keep"), now());

        let kept = notes.filter(|n| n.text == "keep");
        assert_eq!(kept.len(), 2);
        assert_eq!(notes.len(), 3);
    }
}
