mod memory;
mod row;

pub use memory::{MemoryStore, StoreConn, StorePool};
pub use row::Row;

use crate::types::Id;
use thiserror::Error as ThisError;

///
/// StoreError
///
/// Store-level failures. These never reach a caller directly; they convert
/// into the public `Internal` error with a correlation id.
///

#[derive(Debug, ThisError)]
pub enum StoreError {
    #[error("duplicate row id {id} in relation '{relation}'")]
    DuplicateId { relation: &'static str, id: Id },

    #[error("store lock poisoned")]
    LockPoisoned,
}
