//!
//! Module: db::session
//! Responsibility: the caller-bound facade over query and mutation execution.
//!

use crate::{
    db::{
        Db, FanoutOutcome, RecordView, ResultPage,
        executor::{DeleteExecutor, FanoutExecutor, LoadExecutor, SaveExecutor},
        format::Formatter,
    },
    error::Error,
    query::{Caller, QueryRequest, QuerySpec},
    types::Id,
};
use serde_json::Value as Json;

///
/// Session
///
/// Every operation resolves the entity by logical name, executes as the bound
/// caller, and returns formatted views. This is the only public surface over
/// the executors, so no read or write can skip owner scoping.
///

pub struct Session<'a> {
    db: &'a Db,
    caller: Caller,
}

impl<'a> Session<'a> {
    pub(crate) const fn new(db: &'a Db, caller: Caller) -> Self {
        Self { db, caller }
    }

    #[must_use]
    pub const fn caller(&self) -> &Caller {
        &self.caller
    }

    /// Paginated scoped read.
    pub fn get_many(
        &self,
        entity: &str,
        request: &QueryRequest,
    ) -> Result<ResultPage<RecordView>, Error> {
        let model = self.db.registry().resolve(entity)?;
        let spec = QuerySpec::build(model, request, self.db.limits())?;
        let page = LoadExecutor::new(self.db).execute(&self.caller.scope(spec))?;

        Formatter::new(self.db).format_page(model, page)
    }

    /// Single scoped read by id.
    pub fn get_one(&self, entity: &str, id: Id) -> Result<RecordView, Error> {
        let model = self.db.registry().resolve(entity)?;
        let record = LoadExecutor::new(self.db).get_one(&self.caller, model, id)?;

        Formatter::new(self.db).format_record(model, &record)
    }

    /// Create a standalone record owned by the caller.
    pub fn create(&self, entity: &str, payload: &Json) -> Result<RecordView, Error> {
        let model = self.db.registry().resolve(entity)?;
        let record = SaveExecutor::new(self.db).create(&self.caller, model, payload)?;

        Formatter::new(self.db).format_record(model, &record)
    }

    /// Partial update of a caller-owned record.
    pub fn update(&self, entity: &str, id: Id, payload: &Json) -> Result<RecordView, Error> {
        let model = self.db.registry().resolve(entity)?;
        let record = SaveExecutor::new(self.db).update(&self.caller, model, id, payload)?;

        Formatter::new(self.db).format_record(model, &record)
    }

    /// Delete a caller-owned record, returning its last state.
    pub fn delete(&self, entity: &str, id: Id) -> Result<RecordView, Error> {
        let model = self.db.registry().resolve(entity)?;
        let record = DeleteExecutor::new(self.db).execute(&self.caller, model, id)?;

        Formatter::new(self.db).format_record(model, &record)
    }

    /// Fan-out write: create a parent and its dependent records together.
    /// Dependent payloads are `(entity name, payload)` pairs.
    pub fn create_with_dependents(
        &self,
        entity: &str,
        payload: &Json,
        dependents: &[(&str, Json)],
    ) -> Result<FanoutOutcome, Error> {
        let model = self.db.registry().resolve(entity)?;
        let write =
            FanoutExecutor::new(self.db).execute(&self.caller, model, payload, dependents)?;

        let formatter = Formatter::new(self.db);
        let parent = formatter.format_record(model, &write.parent)?;
        let mut views = Vec::with_capacity(write.dependents.len());
        for (dep_model, record) in &write.dependents {
            views.push(formatter.format_record(dep_model, record)?);
        }

        Ok(FanoutOutcome {
            parent,
            dependents: views,
            failures: write.failures,
        })
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use crate::test_support;
    use serde_json::{Value as Json, json};
    use std::str::FromStr;

    use crate::types::Id;

    fn note(title: &str, pinned: bool) -> Json {
        json!({ "title": title, "pinned": pinned, "priority": 1 })
    }

    fn id_of(view: &crate::db::RecordView) -> Id {
        Id::from_str(view.get("id").unwrap().as_str().unwrap()).unwrap()
    }

    #[test]
    fn create_then_get_one_roundtrip() {
        let db = test_support::db();
        let session = db.session(test_support::caller("alice"));

        let view = session.create("notes", &note("pruning schedule", false)).unwrap();
        let fetched = session.get_one("notes", id_of(&view)).unwrap();

        assert_eq!(fetched.get("title"), Some(&json!("pruning schedule")));
        assert_eq!(fetched.get("owner_id"), Some(&json!("alice")));
        assert_eq!(fetched.get("tag_count"), Some(&json!(0)));
    }

    #[test]
    fn foreign_records_are_invisible() {
        let db = test_support::db();
        let alice = db.session(test_support::caller("alice"));
        let bob = db.session(test_support::caller("bob"));

        let id = id_of(&alice.create("notes", &note("secret", false)).unwrap());

        assert!(bob.get_one("notes", id).unwrap_err().is_not_found());
        assert!(
            bob.update("notes", id, &json!({ "pinned": true }))
                .unwrap_err()
                .is_not_found()
        );
        assert!(bob.delete("notes", id).unwrap_err().is_not_found());

        let page = bob
            .get_many("notes", &crate::query::QueryRequest::new())
            .unwrap();
        assert_eq!(page.total, 0, "scoped list must not count foreign rows");
    }

    #[test]
    fn fanout_partial_failure_keeps_parent_and_survivors() {
        let db = test_support::db();
        let session = db.session(test_support::caller("alice"));

        let outcome = session
            .create_with_dependents(
                "notes",
                &note("harvest plan", true),
                &[
                    ("note_tags", json!({ "label": "urgent" })),
                    ("note_tags", json!({ "label": 7 })),
                ],
            )
            .unwrap();

        assert_eq!(outcome.dependents.len(), 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].error.is_validation());
        assert_eq!(
            outcome.parent.get("tag_count"),
            Some(&json!(1)),
            "derived count must reflect only committed dependents"
        );
    }

    #[test]
    fn standalone_create_of_dependent_is_rejected() {
        let db = test_support::db();
        let session = db.session(test_support::caller("alice"));

        let err = session
            .create("note_tags", &json!({ "label": "orphan" }))
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidArgument(_)));
    }

    #[test]
    fn undeclared_dependent_fails_before_parent_commits() {
        let db = test_support::db();
        let session = db.session(test_support::caller("alice"));

        let err = session
            .create_with_dependents(
                "notes",
                &note("misrouted", false),
                &[("notes", json!({ "title": "nested" }))],
            )
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidArgument(_)));

        let page = session
            .get_many("notes", &crate::query::QueryRequest::new())
            .unwrap();
        assert_eq!(page.total, 0, "parent must not commit when fan-out addressing is invalid");
    }
}
