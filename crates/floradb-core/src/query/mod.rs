mod predicate;
mod request;
mod scope;
mod spec;

pub use predicate::Predicate;
pub use request::{QueryRequest, SortOrder};
pub use scope::{Caller, ScopedQuery};
pub use spec::{PageLimits, QuerySpec};
