use crate::{
    store::{Row, StoreError},
    types::Id,
};
use std::{
    collections::BTreeMap,
    ops::Deref,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

///
/// StorePool
///
/// Cloneable pooled handle over the shared store. Each read path acquires its
/// own connection, so the windowed fetch and the count query are independent
/// reads with no shared snapshot.
///

#[derive(Clone, Debug, Default)]
pub struct StorePool {
    shared: Arc<MemoryStore>,
}

impl StorePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn conn(&self) -> StoreConn {
        StoreConn {
            shared: Arc::clone(&self.shared),
        }
    }
}

///
/// StoreConn
/// One checked-out handle on the shared store.
///

#[derive(Debug)]
pub struct StoreConn {
    shared: Arc<MemoryStore>,
}

impl Deref for StoreConn {
    type Target = MemoryStore;

    fn deref(&self) -> &Self::Target {
        &self.shared
    }
}

type Relations = BTreeMap<&'static str, BTreeMap<Id, Row>>;

///
/// MemoryStore
///
/// In-memory row store keyed by `(relation, id)`. Relations materialize on
/// first write; reading an untouched relation yields no rows.
///
/// Conditioned writes (`update_where`, `remove_where`) evaluate their guard
/// and apply the mutation under one write guard, so there is no separate
/// check-then-act window.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    relations: RwLock<Relations>,
}

impl MemoryStore {
    fn read(&self) -> Result<RwLockReadGuard<'_, Relations>, StoreError> {
        self.relations.read().map_err(|_| StoreError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Relations>, StoreError> {
        self.relations.write().map_err(|_| StoreError::LockPoisoned)
    }

    /// Fetch one row by id.
    pub fn get(&self, relation: &str, id: Id) -> Result<Option<Row>, StoreError> {
        let relations = self.read()?;

        Ok(relations
            .get(relation)
            .and_then(|rows| rows.get(&id))
            .cloned())
    }

    /// Materialize every row of a relation for filtering and ordering.
    pub fn scan(&self, relation: &str) -> Result<Vec<Row>, StoreError> {
        let relations = self.read()?;

        Ok(relations
            .get(relation)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    /// Count rows matching a predicate without materializing them.
    pub fn count_where(
        &self,
        relation: &str,
        predicate: impl Fn(&Row) -> bool,
    ) -> Result<u64, StoreError> {
        let relations = self.read()?;
        let count = relations
            .get(relation)
            .map_or(0, |rows| rows.values().filter(|row| predicate(row)).count());

        Ok(count as u64)
    }

    /// Insert a fresh row; duplicate ids are a wiring bug, not a client error.
    pub fn insert(&self, relation: &'static str, id: Id, row: Row) -> Result<(), StoreError> {
        let mut relations = self.write()?;
        let rows = relations.entry(relation).or_default();
        if rows.contains_key(&id) {
            return Err(StoreError::DuplicateId { relation, id });
        }

        rows.insert(id, row);
        Ok(())
    }

    /// Conditioned update: mutate the row only if `guard` accepts it, in one
    /// atomic step. Returns the updated row, or `None` when the id is absent
    /// or the guard rejects.
    pub fn update_where(
        &self,
        relation: &str,
        id: Id,
        guard: impl FnOnce(&Row) -> bool,
        apply: impl FnOnce(&mut Row),
    ) -> Result<Option<Row>, StoreError> {
        let mut relations = self.write()?;
        let Some(row) = relations.get_mut(relation).and_then(|rows| rows.get_mut(&id)) else {
            return Ok(None);
        };
        if !guard(row) {
            return Ok(None);
        }

        apply(row);
        Ok(Some(row.clone()))
    }

    /// Conditioned delete: remove the row only if `guard` accepts it, in one
    /// atomic step. Returns the removed row.
    pub fn remove_where(
        &self,
        relation: &str,
        id: Id,
        guard: impl FnOnce(&Row) -> bool,
    ) -> Result<Option<Row>, StoreError> {
        let mut relations = self.write()?;
        let Some(rows) = relations.get_mut(relation) else {
            return Ok(None);
        };
        if !rows.get(&id).is_some_and(|row| guard(row)) {
            return Ok(None);
        }

        Ok(rows.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::OWNER_COLUMN, value::Value};

    fn owned_row(owner: &str) -> Row {
        let mut row = Row::new();
        row.set(OWNER_COLUMN, Value::Text(owner.to_string()));
        row
    }

    #[test]
    fn scan_of_untouched_relation_is_empty() {
        let pool = StorePool::new();
        assert!(pool.conn().scan("nothing").unwrap().is_empty());
    }

    #[test]
    fn conditioned_update_rejects_failed_guard() {
        let pool = StorePool::new();
        let id = Id::generate();
        pool.conn().insert("note", id, owned_row("alice")).unwrap();

        let updated = pool
            .conn()
            .update_where("note", id, |row| row.owner() == Some("bob"), |_| {})
            .unwrap();
        assert!(updated.is_none(), "guard mismatch must behave like absence");

        let updated = pool
            .conn()
            .update_where("note", id, |row| row.owner() == Some("alice"), |_| {})
            .unwrap();
        assert!(updated.is_some());
    }

    #[test]
    fn conditioned_remove_returns_removed_row() {
        let pool = StorePool::new();
        let id = Id::generate();
        pool.conn().insert("note", id, owned_row("alice")).unwrap();

        let removed = pool
            .conn()
            .remove_where("note", id, |row| row.owner() == Some("alice"))
            .unwrap();
        assert!(removed.is_some());
        assert!(pool.conn().get("note", id).unwrap().is_none());
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let pool = StorePool::new();
        let id = Id::generate();
        pool.conn().insert("note", id, owned_row("a")).unwrap();

        let err = pool.conn().insert("note", id, owned_row("a")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
    }
}
