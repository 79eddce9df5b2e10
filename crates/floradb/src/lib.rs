//! FloraDB: owner-scoped query and mutation layer for the plant advisory
//! backend, with the application catalog wired in.
//!
//! The `floradb-core` crate is domain-agnostic; this crate declares the
//! advisory entities (agents, meetings, plant analyses and their dependent
//! observations) and exposes a ready-to-open database handle.

pub mod catalog;

pub use floradb_core::prelude::*;
pub use floradb_core::schema::SchemaError;

/// Build a database handle over the full advisory catalog.
pub fn open() -> Result<Db, SchemaError> {
    Ok(Db::new(catalog::registry()?))
}

pub mod prelude {
    pub use crate::{catalog, open};
    pub use floradb_core::prelude::*;
}
