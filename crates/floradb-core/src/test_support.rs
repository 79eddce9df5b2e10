//! Shared fixtures: a small note-taking schema exercising every model
//! feature (search, filter, sort, required fields, fan-out, derived counts).

use crate::{
    db::Db,
    model::{DependentRef, DerivedColumn, EntityModel, FieldModel},
    query::Caller,
    schema::SchemaRegistry,
    types::OwnerId,
};

static NOTE_FIELDS: [FieldModel; 4] = [
    FieldModel::text("title").required().searchable().sortable(),
    FieldModel::text("body").searchable(),
    FieldModel::uint("priority").filterable().sortable(),
    FieldModel::boolean("pinned").filterable(),
];
static NOTE_DEPENDENTS: [DependentRef; 1] = [DependentRef::new("note_tags")];
static NOTE_DERIVED: [DerivedColumn; 1] = [DerivedColumn::dependent_count("tag_count", "note_tags")];

pub(crate) static NOTES: EntityModel = EntityModel::new("notes", "note", &NOTE_FIELDS)
    .with_dependents(&NOTE_DEPENDENTS)
    .with_derived(&NOTE_DERIVED);

static TAG_FIELDS: [FieldModel; 2] = [
    FieldModel::id_ref("note_id").filterable(),
    FieldModel::text("label").required(),
];

pub(crate) static NOTE_TAGS: EntityModel =
    EntityModel::new("note_tags", "note_tag", &TAG_FIELDS).with_parent("notes", "note_id");

pub(crate) fn registry() -> SchemaRegistry {
    SchemaRegistry::builder()
        .register(&NOTES)
        .unwrap()
        .register(&NOTE_TAGS)
        .unwrap()
        .finish()
        .unwrap()
}

pub(crate) fn db() -> Db {
    Db::new(registry())
}

pub(crate) fn caller(owner: &str) -> Caller {
    Caller::new(OwnerId::new(owner))
}
