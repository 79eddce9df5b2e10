//! Core runtime for FloraDB: the schema registry, query specification
//! builder, owner-scoped execution engine, result formatter, and mutation
//! gateway, with the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod db;
pub mod error;
pub mod model;
pub mod query;
pub mod schema;
pub mod store;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Smallest page size a caller may request.
pub const MIN_PAGE_SIZE: u32 = 1;

/// Largest page size a caller may request.
///
/// Requests outside `[MIN_PAGE_SIZE, MAX_PAGE_SIZE]` fail with
/// `InvalidArgument` rather than being silently clamped; a wrong page size is
/// a caller bug worth surfacing.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size applied when the request leaves it unset.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No executors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{Db, FanoutOutcome, RecordView, ResultPage, Session},
        error::Error,
        model::{DependentRef, DerivedColumn, EntityModel, FieldModel},
        query::{Caller, QueryRequest, SortOrder},
        schema::SchemaRegistry,
        types::{Id, OwnerId, Timestamp},
        value::Value,
    };
}
