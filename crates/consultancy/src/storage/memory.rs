use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::RepositoryError;

/// Anything stored in a [`MemoryTable`].
pub trait Record: Clone + Send + Sync + 'static {
    fn record_id(&self) -> &str;
}

/// Mutex-guarded map keyed by record id. Clones share the same rows.
#[derive(Debug)]
pub struct MemoryTable<T> {
    rows: Arc<Mutex<BTreeMap<String, T>>>,
}

impl<T> Clone for MemoryTable<T> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
        }
    }
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<String, T>>, RepositoryError> {
        self.rows
            .lock()
            .map_err(|_| RepositoryError::Unavailable("memory table lock poisoned".to_string()))
    }

    pub fn insert(&self, record: T) -> Result<T, RepositoryError> {
        let mut rows = self.rows()?;
        let id = record.record_id().to_string();
        if rows.contains_key(&id) {
            return Err(RepositoryError::Conflict(id));
        }
        rows.insert(id, record.clone());
        Ok(record)
    }

    pub fn update(&self, record: T) -> Result<(), RepositoryError> {
        let mut rows = self.rows()?;
        match rows.get_mut(record.record_id()) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    /// Read-modify-write under a single guard. The row is replaced only when
    /// `apply` succeeds.
    pub fn modify<E, F>(&self, id: &str, apply: F) -> Result<T, E>
    where
        E: From<RepositoryError>,
        F: FnOnce(&mut T) -> Result<(), E>,
    {
        let mut rows = self.rows()?;
        let slot = rows.get_mut(id).ok_or(RepositoryError::NotFound)?;
        let mut draft = slot.clone();
        apply(&mut draft)?;
        *slot = draft.clone();
        Ok(draft)
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        Ok(self.rows()?.get(id).cloned())
    }

    pub fn remove(&self, id: &str) -> Result<T, RepositoryError> {
        self.rows()?.remove(id).ok_or(RepositoryError::NotFound)
    }

    pub fn find<P>(&self, predicate: P) -> Result<Option<T>, RepositoryError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self.rows()?.values().find(|row| predicate(row)).cloned())
    }

    pub fn filter<P>(&self, predicate: P) -> Result<Vec<T>, RepositoryError>
    where
        P: Fn(&T) -> bool,
    {
        Ok(self
            .rows()?
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect())
    }

    pub fn all(&self) -> Result<Vec<T>, RepositoryError> {
        self.filter(|_| true)
    }

    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.rows()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.rows()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        value: u32,
    }

    impl Record for Row {
        fn record_id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, value: u32) -> Row {
        Row {
            id: id.to_string(),
            value,
        }
    }

    #[test]
    fn insert_rejects_duplicate_ids() {
        let table = MemoryTable::default();
        table.insert(row("a", 1)).expect("first insert");
        assert!(matches!(
            table.insert(row("a", 2)),
            Err(RepositoryError::Conflict(id)) if id == "a"
        ));
        assert_eq!(table.get("a").unwrap(), Some(row("a", 1)));
    }

    #[test]
    fn update_requires_existing_row() {
        let table = MemoryTable::default();
        assert!(matches!(
            table.update(row("missing", 1)),
            Err(RepositoryError::NotFound)
        ));
        table.insert(row("a", 1)).unwrap();
        table.update(row("a", 7)).unwrap();
        assert_eq!(table.get("a").unwrap().map(|r| r.value), Some(7));
    }

    #[test]
    fn modify_commits_only_on_success() {
        let table = MemoryTable::default();
        table.insert(row("a", 1)).unwrap();

        let updated: Result<Row, RepositoryError> = table.modify("a", |r| {
            r.value += 1;
            Ok(())
        });
        assert_eq!(updated.unwrap().value, 2);

        let rejected: Result<Row, RepositoryError> = table.modify("a", |r| {
            r.value = 99;
            Err(RepositoryError::Conflict("a".to_string()))
        });
        assert!(rejected.is_err());
        assert_eq!(table.get("a").unwrap().map(|r| r.value), Some(2));

        let missing: Result<Row, RepositoryError> = table.modify("b", |_| Ok(()));
        assert!(matches!(missing, Err(RepositoryError::NotFound)));
    }

    #[test]
    fn concurrent_modifies_are_not_lost() {
        let table = MemoryTable::default();
        table.insert(row("a", 0)).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        let _: Result<Row, RepositoryError> = table.modify("a", |r| {
                            r.value += 1;
                            Ok(())
                        });
                    }
                });
            }
        });

        assert_eq!(table.get("a").unwrap().map(|r| r.value), Some(800));
    }

    #[test]
    fn clones_share_rows() {
        let table = MemoryTable::default();
        let other = table.clone();
        table.insert(row("a", 1)).unwrap();
        assert_eq!(other.len().unwrap(), 1);
        assert_eq!(other.filter(|r| r.value > 0).unwrap().len(), 1);
        other.remove("a").unwrap();
        assert!(table.is_empty().unwrap());
    }
}
