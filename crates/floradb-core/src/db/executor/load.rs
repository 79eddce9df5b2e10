//!
//! Module: db::executor::load
//! Responsibility: scoped read execution, counting and windowing.
//!

use crate::{
    db::{Db, Record, ResultPage},
    error::Error,
    model::EntityModel,
    query::{Caller, ScopedQuery, SortOrder},
    store::Row,
    types::Id,
    value::{Value, canonical_cmp},
};
use std::cmp::Ordering;

///
/// LoadExecutor
///
/// Executes a [`ScopedQuery`]: one count pass and one independent windowed
/// fetch pass, each on its own connection. The two reads may interleave with
/// writers; the envelope total is best-effort, not a snapshot.
///

pub(crate) struct LoadExecutor<'a> {
    db: &'a Db,
}

impl<'a> LoadExecutor<'a> {
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub(crate) fn execute(&self, query: &ScopedQuery) -> Result<ResultPage<Record>, Error> {
        let entity = query.entity();
        let predicate = query.predicate();

        let total = self
            .db
            .pool()
            .conn()
            .count_where(entity.relation, |row| predicate.matches(row))?;

        let mut rows: Vec<Row> = self
            .db
            .pool()
            .conn()
            .scan(entity.relation)?
            .into_iter()
            .filter(|row| predicate.matches(row))
            .collect();
        rows.sort_by(|a, b| compare_rows(query.order(), a, b));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let items = rows
            .into_iter()
            .skip(offset)
            .take(query.page_size() as usize)
            .map(Record::from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            entity = entity.name,
            total,
            page = query.page(),
            rows = items.len(),
            "load executed"
        );

        Ok(ResultPage::new(
            items,
            total,
            query.page(),
            query.page_size(),
        ))
    }

    /// Fetch one record by id within the caller's scope. Absence and foreign
    /// ownership collapse to the same `NotFound`.
    pub(crate) fn get_one(
        &self,
        caller: &Caller,
        entity: &'static EntityModel,
        id: Id,
    ) -> Result<Record, Error> {
        let row = self.db.pool().conn().get(entity.relation, id)?;

        match row {
            Some(row) if row.owner() == Some(caller.owner().as_str()) => Record::from_row(row),
            _ => Err(Error::NotFound),
        }
    }
}

/// Lexicographic comparison over the spec's sort keys, with missing columns
/// ranked as `Null` under the canonical cross-type order.
fn compare_rows(order: &[(&'static str, SortOrder)], a: &Row, b: &Row) -> Ordering {
    for (field, direction) in order {
        let av = a.get(field).unwrap_or(&Value::Null);
        let bv = b.get(field).unwrap_or(&Value::Null);
        let cmp = match direction {
            SortOrder::Asc => canonical_cmp(av, bv),
            SortOrder::Desc => canonical_cmp(av, bv).reverse(),
        };
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    Ordering::Equal
}

///
/// TESTS
///
