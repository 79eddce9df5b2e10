//!
//! Module: db::executor::save
//! Responsibility: validated create and owner-guarded update.
//!

use crate::{
    db::{Db, Record, validate},
    error::Error,
    model::{CREATED_AT_COLUMN, EntityModel, ID_COLUMN, OWNER_COLUMN},
    query::Caller,
    store::Row,
    types::{Id, Timestamp},
    value::Value,
};
use serde_json::Value as Json;

///
/// SaveExecutor
///

pub(crate) struct SaveExecutor<'a> {
    db: &'a Db,
}

impl<'a> SaveExecutor<'a> {
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Create a standalone record. Dependent-only entities are rejected here;
    /// their rows exist only through the fan-out path.
    pub(crate) fn create(
        &self,
        caller: &Caller,
        entity: &'static EntityModel,
        payload: &Json,
    ) -> Result<Record, Error> {
        if entity.parent.is_some() {
            return Err(Error::invalid_argument(format!(
                "entity '{}' is created only through its parent",
                entity.name
            )));
        }

        self.insert_row(caller, entity, payload, None)
    }

    /// Validate and insert one row, stamping the reserved columns and, when
    /// given, the parent link.
    pub(crate) fn insert_row(
        &self,
        caller: &Caller,
        entity: &'static EntityModel,
        payload: &Json,
        parent_id: Option<Id>,
    ) -> Result<Record, Error> {
        let values = validate::validate_create(entity, payload)?;
        let id = Id::generate();

        let mut row: Row = values.into_iter().collect();
        row.set(ID_COLUMN, Value::Id(id));
        row.set(
            OWNER_COLUMN,
            Value::Text(caller.owner().as_str().to_string()),
        );
        row.set(CREATED_AT_COLUMN, Value::Timestamp(Timestamp::now()));
        if let Some(parent_id) = parent_id {
            let Some(parent) = entity.parent else {
                return Err(Error::internal(format!(
                    "parent id supplied for non-dependent entity '{}'",
                    entity.name
                )));
            };
            row.set(parent.field, Value::Id(parent_id));
        }

        self.db.pool().conn().insert(entity.relation, id, row.clone())?;
        tracing::debug!(entity = entity.name, %id, "row created");

        Record::from_row(row)
    }

    /// Partial update guarded on ownership; guard and mutation run as one
    /// conditioned write. A guard miss is indistinguishable from absence.
    pub(crate) fn update(
        &self,
        caller: &Caller,
        entity: &'static EntityModel,
        id: Id,
        payload: &Json,
    ) -> Result<Record, Error> {
        let values = validate::validate_update(entity, payload)?;
        let owner = caller.owner().as_str().to_string();

        let updated = self.db.pool().conn().update_where(
            entity.relation,
            id,
            |row| row.owner() == Some(owner.as_str()),
            move |row| {
                for (field, value) in values {
                    row.set(field, value);
                }
            },
        )?;

        match updated {
            Some(row) => {
                tracing::debug!(entity = entity.name, %id, "row updated");
                Record::from_row(row)
            }
            None => Err(Error::NotFound),
        }
    }
}
