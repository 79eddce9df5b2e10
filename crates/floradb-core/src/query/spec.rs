use crate::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
    error::Error,
    model::{CREATED_AT_COLUMN, Capability, EntityModel, ID_COLUMN},
    query::{Predicate, QueryRequest, SortOrder},
};

///
/// PageLimits
///
/// Configured window bounds. `page_size` outside `[min, max]` is an
/// `InvalidArgument`, never a silent clamp.
///

#[derive(Clone, Copy, Debug)]
pub struct PageLimits {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            min: MIN_PAGE_SIZE,
            max: MAX_PAGE_SIZE,
            default: DEFAULT_PAGE_SIZE,
        }
    }
}

///
/// QuerySpec
///
/// Immutable specification of one read against one entity, constructed fresh
/// per request by [`QuerySpec::build`]. The spec carries only the client's
/// intent; owner scoping is layered on by `Caller::scope` before execution.
///

#[derive(Clone, Debug)]
pub struct QuerySpec {
    entity: &'static EntityModel,
    predicate: Option<Predicate>,
    order: Vec<(&'static str, SortOrder)>,
    page: u32,
    page_size: u32,
}

impl QuerySpec {
    /// Validate a raw request into a spec.
    ///
    /// - blank search → no predicate; otherwise OR of case-insensitive
    ///   contains over every searchable field
    /// - unknown or non-filterable filter keys are silently ignored
    ///   (forward-compatible contract); a recognized key whose value cannot
    ///   be coerced to the field type is an `InvalidArgument`
    /// - an absent or non-sortable sort field falls back to newest-first by
    ///   creation timestamp; the id tie-break is always appended so
    ///   pagination stays deterministic under duplicate sort values
    /// - page is clamped to ≥ 1; page_size outside the configured limits
    ///   fails
    pub fn build(
        entity: &'static EntityModel,
        request: &QueryRequest,
        limits: &PageLimits,
    ) -> Result<Self, Error> {
        let page = request.page.unwrap_or(1).max(1);
        let page_size = request.page_size.unwrap_or(limits.default);
        if page_size < limits.min || page_size > limits.max {
            return Err(Error::invalid_argument(format!(
                "page_size {page_size} outside [{}, {}]",
                limits.min, limits.max
            )));
        }

        let mut clauses = Vec::new();
        if let Some(search) = request.search.as_deref() {
            let needle = search.trim();
            if !needle.is_empty() {
                clauses.push(Predicate::Or(
                    entity
                        .columns(Capability::Searchable)
                        .map(|field| Predicate::contains_ci(field.name, needle))
                        .collect(),
                ));
            }
        }
        for (key, raw) in &request.filters {
            // Unknown keys stay inert so old clients survive schema growth;
            // the owner column is never filterable, so a hostile filter on it
            // is dropped here as well.
            let Some(field) = entity.column(key, Capability::Filterable) else {
                continue;
            };
            let value = field
                .kind
                .coerce(raw)
                .map_err(|msg| Error::invalid_argument(format!("filter '{key}': {msg}")))?;
            clauses.push(Predicate::Eq {
                field: field.name,
                value,
            });
        }
        let predicate = if clauses.is_empty() {
            None
        } else {
            Some(Predicate::And(clauses))
        };

        let direction = request.sort_order.unwrap_or_default();
        let primary = request
            .sort_field
            .as_deref()
            .and_then(|name| resolve_sort_field(entity, name))
            .map_or((CREATED_AT_COLUMN, SortOrder::Desc), |field| {
                (field, direction)
            });
        let mut order = vec![primary];
        order.push((ID_COLUMN, SortOrder::Desc));

        Ok(Self {
            entity,
            predicate,
            order,
            page,
            page_size,
        })
    }

    #[must_use]
    pub const fn entity(&self) -> &'static EntityModel {
        self.entity
    }

    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    #[must_use]
    pub fn order(&self) -> &[(&'static str, SortOrder)] {
        &self.order
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Window start for the fetch: `(page - 1) * page_size`.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

// `created_at` is engine-owned rather than declared, but it is the default
// sort key and stays addressable as an explicit one.
fn resolve_sort_field(entity: &EntityModel, name: &str) -> Option<&'static str> {
    if name == CREATED_AT_COLUMN {
        return Some(CREATED_AT_COLUMN);
    }

    entity.column(name, Capability::Sortable).map(|f| f.name)
}
