//!
//! Module: db::executor::fanout
//! Responsibility: parent-plus-dependents write with independent dependent
//! outcomes.
//!

use crate::{
    db::{Db, Record, RecordView, executor::SaveExecutor},
    error::Error,
    model::EntityModel,
    query::Caller,
};
use serde::Serialize;
use serde_json::Value as Json;

///
/// DependentFailure
/// One dependent write that did not commit during a fan-out.
///

#[derive(Debug)]
pub struct DependentFailure {
    pub entity: &'static str,
    pub error: Error,
}

///
/// FanoutOutcome
///
/// Client-facing result of a fan-out write. The parent is always committed;
/// each dependent either appears in `dependents` or is accounted for in
/// `failures`. There is no rollback.
///

#[derive(Debug, Serialize)]
pub struct FanoutOutcome {
    pub parent: RecordView,
    pub dependents: Vec<RecordView>,
    #[serde(skip)]
    pub failures: Vec<DependentFailure>,
}

/// Committed rows of a fan-out, before formatting. Each dependent record is
/// paired with its model so the formatter knows its shape.
pub(crate) struct FanoutWrite {
    pub(crate) parent: Record,
    pub(crate) dependents: Vec<(&'static EntityModel, Record)>,
    pub(crate) failures: Vec<DependentFailure>,
}

///
/// FanoutExecutor
///

pub(crate) struct FanoutExecutor<'a> {
    db: &'a Db,
}

impl<'a> FanoutExecutor<'a> {
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Create the parent, then each dependent independently.
    ///
    /// Dependent names are resolved before the parent commits, so a
    /// mis-addressed batch fails whole. After the parent is in, a dependent
    /// failure is recorded and the remaining dependents still run.
    pub(crate) fn execute(
        &self,
        caller: &Caller,
        entity: &'static EntityModel,
        payload: &Json,
        dependents: &[(&str, Json)],
    ) -> Result<FanoutWrite, Error> {
        let mut resolved = Vec::with_capacity(dependents.len());
        for (name, dep_payload) in dependents {
            let model = self.db.registry().resolve(name)?;
            if !entity.dependents.iter().any(|d| d.entity == model.name) {
                return Err(Error::invalid_argument(format!(
                    "entity '{}' is not a dependent of '{}'",
                    model.name, entity.name
                )));
            }
            resolved.push((model, dep_payload));
        }

        let save = SaveExecutor::new(self.db);
        let parent = save.create(caller, entity, payload)?;

        let mut created = Vec::new();
        let mut failures = Vec::new();
        for (model, dep_payload) in resolved {
            match save.insert_row(caller, model, dep_payload, Some(parent.id)) {
                Ok(record) => created.push((model, record)),
                Err(error) => {
                    // Partial success is the contract: the parent and any
                    // committed dependents stay.
                    tracing::warn!(
                        parent = %parent.id,
                        dependent = model.name,
                        %error,
                        "dependent write failed; parent retained"
                    );
                    failures.push(DependentFailure {
                        entity: model.name,
                        error,
                    });
                }
            }
        }

        Ok(FanoutWrite {
            parent,
            dependents: created,
            failures,
        })
    }
}
