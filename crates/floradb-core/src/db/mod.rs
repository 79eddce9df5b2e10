pub(crate) mod executor;
mod format;
mod response;
mod session;
pub(crate) mod validate;

pub use executor::fanout::{DependentFailure, FanoutOutcome};
pub use format::RecordView;
pub use response::ResultPage;
pub use session::Session;
pub use validate::{FieldIssue, ValidationError};

use crate::{
    error::Error,
    query::{Caller, PageLimits},
    schema::SchemaRegistry,
    store::{Row, StorePool},
    types::{Id, OwnerId, Timestamp},
};

///
/// Db
///
/// Process-wide handle: the immutable schema registry, the pooled store, and
/// the configured page limits. Sessions borrow the handle and bind it to one
/// caller identity.
///

#[derive(Debug)]
pub struct Db {
    registry: SchemaRegistry,
    pool: StorePool,
    limits: PageLimits,
}

impl Db {
    #[must_use]
    pub fn new(registry: SchemaRegistry) -> Self {
        Self {
            registry,
            pool: StorePool::new(),
            limits: PageLimits::default(),
        }
    }

    #[must_use]
    pub const fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    #[must_use]
    pub const fn limits(&self) -> &PageLimits {
        &self.limits
    }

    #[must_use]
    pub(crate) const fn pool(&self) -> &StorePool {
        &self.pool
    }

    /// Open a session acting as the given caller.
    #[must_use]
    pub const fn session(&self, caller: Caller) -> Session<'_> {
        Session::new(self, caller)
    }
}

///
/// Record
///
/// One materialized entity record: the reserved columns lifted out, plus the
/// full stored row.
///

#[derive(Clone, Debug)]
pub struct Record {
    pub id: Id,
    pub owner: OwnerId,
    pub created_at: Timestamp,
    row: Row,
}

impl Record {
    /// Lift a stored row into a record. A row missing a reserved column is
    /// store corruption, not a client error.
    pub(crate) fn from_row(row: Row) -> Result<Self, Error> {
        let id = row
            .id()
            .ok_or_else(|| Error::internal("stored row missing id column"))?;
        let owner = row
            .owner()
            .map(OwnerId::new)
            .ok_or_else(|| Error::internal("stored row missing owner column"))?;
        let created_at = row
            .created_at()
            .ok_or_else(|| Error::internal("stored row missing created_at column"))?;

        Ok(Self {
            id,
            owner,
            created_at,
            row,
        })
    }

    #[must_use]
    pub const fn row(&self) -> &Row {
        &self.row
    }
}
