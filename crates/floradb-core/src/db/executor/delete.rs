use crate::{
    db::{Db, Record},
    error::Error,
    model::EntityModel,
    query::Caller,
    types::Id,
};

///
/// DeleteExecutor
///
/// Owner-guarded delete; guard and removal run as one conditioned write.
///

pub(crate) struct DeleteExecutor<'a> {
    db: &'a Db,
}

impl<'a> DeleteExecutor<'a> {
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub(crate) fn execute(
        &self,
        caller: &Caller,
        entity: &'static EntityModel,
        id: Id,
    ) -> Result<Record, Error> {
        let owner = caller.owner().as_str().to_string();
        let removed = self.db.pool().conn().remove_where(entity.relation, id, |row| {
            row.owner() == Some(owner.as_str())
        })?;

        match removed {
            Some(row) => {
                tracing::debug!(entity = entity.name, %id, "row deleted");
                Record::from_row(row)
            }
            None => Err(Error::NotFound),
        }
    }
}
