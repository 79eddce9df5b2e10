//!
//! Module: db::format
//! Responsibility: shape records into client-facing JSON views, attaching
//! derived columns at read time.
//!

use crate::{
    db::{Db, Record, ResultPage},
    error::Error,
    model::{CREATED_AT_COLUMN, DerivedSource, EntityModel, ID_COLUMN, OWNER_COLUMN},
    value::Value,
};
use serde::Serialize;
use serde_json::{Map, Number, Value as Json};

///
/// RecordView
///
/// One formatted record: reserved columns, declared fields, then derived
/// columns, all as JSON values.
///

#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct RecordView(Map<String, Json>);

impl RecordView {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Json> {
        self.0.get(key)
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Json> {
        &self.0
    }
}

///
/// Formatter
/// Read-side record shaping, including derived dependent counts.
///

pub(crate) struct Formatter<'a> {
    db: &'a Db,
}

impl<'a> Formatter<'a> {
    pub(crate) const fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub(crate) fn format_page(
        &self,
        entity: &'static EntityModel,
        page: ResultPage<Record>,
    ) -> Result<ResultPage<RecordView>, Error> {
        let ResultPage {
            items,
            total,
            page,
            page_size,
            total_pages,
        } = page;
        let items = items
            .iter()
            .map(|record| self.format_record(entity, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ResultPage {
            items,
            total,
            page,
            page_size,
            total_pages,
        })
    }

    pub(crate) fn format_record(
        &self,
        entity: &'static EntityModel,
        record: &Record,
    ) -> Result<RecordView, Error> {
        let mut view = Map::new();
        view.insert(ID_COLUMN.to_string(), Json::String(record.id.to_string()));
        view.insert(
            OWNER_COLUMN.to_string(),
            Json::String(record.owner.as_str().to_string()),
        );
        view.insert(
            CREATED_AT_COLUMN.to_string(),
            Json::String(record.created_at.to_rfc3339()),
        );

        for field in entity.fields {
            let value = record.row().get(field.name).unwrap_or(&Value::Null);
            view.insert(field.name.to_string(), value_to_json(value));
        }

        for derived in entity.derived {
            let DerivedSource::DependentCount { entity: dep_name } = derived.source;
            let count = self.dependent_count(dep_name, record)?;
            view.insert(derived.name.to_string(), Json::Number(count.into()));
        }

        Ok(RecordView(view))
    }

    /// Correlated count over a dependent relation, matched on the parent
    /// link column. One count query per derived column per record.
    fn dependent_count(&self, dep_name: &'static str, record: &Record) -> Result<u64, Error> {
        let dependent = self.db.registry().expect(dep_name)?;
        let Some(parent) = dependent.parent else {
            return Err(Error::internal(format!(
                "derived count source '{dep_name}' has no parent link"
            )));
        };

        let parent_id = Value::Id(record.id);
        let count = self
            .db
            .pool()
            .conn()
            .count_where(dependent.relation, |row| {
                row.get(parent.field) == Some(&parent_id)
            })?;

        Ok(count)
    }
}

fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::Number((*i).into()),
        Value::Uint(u) => Json::Number((*u).into()),
        // Non-finite floats have no JSON form; they degrade to null.
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::Text(s) => Json::String(s.clone()),
        Value::Timestamp(ts) => Json::String(ts.to_rfc3339()),
        Value::Id(id) => Json::String(id.to_string()),
    }
}

///
/// TESTS
///
