use crate::{
    model::{EntityModel, OWNER_COLUMN},
    query::{Predicate, QuerySpec, SortOrder},
    types::OwnerId,
};

///
/// Caller
///
/// The authenticated identity a session acts as. Scoping every spec through
/// a caller is the single authorization boundary for reads: the engine only
/// executes [`ScopedQuery`] values, and this is the only way to make one.
///

#[derive(Clone, Debug)]
pub struct Caller {
    owner: OwnerId,
}

impl Caller {
    #[must_use]
    pub const fn new(owner: OwnerId) -> Self {
        Self { owner }
    }

    #[must_use]
    pub const fn owner(&self) -> &OwnerId {
        &self.owner
    }

    /// Bind a spec to this caller's ownership scope.
    #[must_use]
    pub fn scope(&self, spec: QuerySpec) -> ScopedQuery {
        ScopedQuery {
            spec,
            owner: self.owner.clone(),
        }
    }
}

///
/// ScopedQuery
///
/// A `QuerySpec` bound to an owner. The owner predicate is engine-generated
/// from the caller identity and ANDed above any client predicate; client
/// filters can never target or override it (the owner column is reserved and
/// never filterable).
///

#[derive(Clone, Debug)]
pub struct ScopedQuery {
    spec: QuerySpec,
    owner: OwnerId,
}

impl ScopedQuery {
    /// The full predicate: owner equality AND the client predicate, if any.
    #[must_use]
    pub(crate) fn predicate(&self) -> Predicate {
        let owner_eq = Predicate::eq(OWNER_COLUMN, self.owner.as_str());

        match self.spec.predicate() {
            Some(client) => Predicate::And(vec![owner_eq, client.clone()]),
            None => owner_eq,
        }
    }

    #[must_use]
    pub(crate) const fn entity(&self) -> &'static EntityModel {
        self.spec.entity()
    }

    #[must_use]
    pub(crate) fn order(&self) -> &[(&'static str, SortOrder)] {
        self.spec.order()
    }

    #[must_use]
    pub(crate) const fn page(&self) -> u32 {
        self.spec.page()
    }

    #[must_use]
    pub(crate) const fn page_size(&self) -> u32 {
        self.spec.page_size()
    }

    #[must_use]
    pub(crate) const fn offset(&self) -> u64 {
        self.spec.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        query::{PageLimits, QueryRequest},
        test_support::NOTES,
        value::Value,
    };

    #[test]
    fn owner_predicate_wraps_client_predicate() {
        let caller = Caller::new(OwnerId::new("alice"));
        let request = QueryRequest::new().with_filter("pinned", "true");
        let spec = QuerySpec::build(&NOTES, &request, &PageLimits::default()).unwrap();

        let Predicate::And(parts) = caller.scope(spec).predicate() else {
            panic!("scoped predicate must be a conjunction");
        };
        assert_eq!(
            parts[0],
            Predicate::Eq {
                field: OWNER_COLUMN,
                value: Value::Text("alice".to_string()),
            },
            "owner equality must come from the caller identity"
        );
    }

    #[test]
    fn empty_spec_still_gets_owner_predicate() {
        let caller = Caller::new(OwnerId::new("alice"));
        let spec = QuerySpec::build(&NOTES, &QueryRequest::new(), &PageLimits::default()).unwrap();

        assert_eq!(
            caller.scope(spec).predicate(),
            Predicate::Eq {
                field: OWNER_COLUMN,
                value: Value::Text("alice".to_string()),
            }
        );
    }
}
