use crate::model::field::{Capability, FieldModel};

/// Unique identifier column, present on every entity.
pub const ID_COLUMN: &str = "id";

/// Owner column, present on every entity and never exposed to client input.
pub const OWNER_COLUMN: &str = "owner_id";

/// Creation timestamp column, the default sort key.
pub const CREATED_AT_COLUMN: &str = "created_at";

/// Columns owned by the engine; never declared as fields, never
/// client-writable, and (except `created_at` for sorting) never addressable
/// from client input.
pub const RESERVED_COLUMNS: [&str; 3] = [ID_COLUMN, OWNER_COLUMN, CREATED_AT_COLUMN];

///
/// ParentRef
///
/// Declares an entity as dependent-only: its rows are created exclusively by
/// the fan-out write path, with `field` carrying the parent record id.
///

#[derive(Clone, Copy, Debug)]
pub struct ParentRef {
    pub entity: &'static str,
    pub field: &'static str,
}

///
/// DependentRef
/// Fan-out target declared on a parent entity.
///

#[derive(Clone, Copy, Debug)]
pub struct DependentRef {
    pub entity: &'static str,
}

impl DependentRef {
    #[must_use]
    pub const fn new(entity: &'static str) -> Self {
        Self { entity }
    }
}

///
/// DerivedColumn
///
/// Declared per-row derived response column, computed by the result
/// formatter. A dependent count is a correlated count over the dependent
/// relation, never a row-multiplying join.
///

#[derive(Clone, Copy, Debug)]
pub struct DerivedColumn {
    pub name: &'static str,
    pub source: DerivedSource,
}

#[derive(Clone, Copy, Debug)]
pub enum DerivedSource {
    DependentCount { entity: &'static str },
}

impl DerivedColumn {
    #[must_use]
    pub const fn dependent_count(name: &'static str, entity: &'static str) -> Self {
        Self {
            name,
            source: DerivedSource::DependentCount { entity },
        }
    }
}

///
/// EntityModel
/// Static runtime model for one logical entity.
///

#[derive(Debug)]
pub struct EntityModel {
    /// Stable logical name clients address the entity by.
    pub name: &'static str,
    /// Physical relation name in the store.
    pub relation: &'static str,
    /// Ordered declared field list (reserved columns are implicit).
    pub fields: &'static [FieldModel],
    /// Set when this entity exists only as a fan-out dependent.
    pub parent: Option<ParentRef>,
    /// Fan-out targets created together with this entity.
    pub dependents: &'static [DependentRef],
    /// Derived response columns attached by the formatter.
    pub derived: &'static [DerivedColumn],
}

impl EntityModel {
    #[must_use]
    pub const fn new(
        name: &'static str,
        relation: &'static str,
        fields: &'static [FieldModel],
    ) -> Self {
        Self {
            name,
            relation,
            fields,
            parent: None,
            dependents: &[],
            derived: &[],
        }
    }

    #[must_use]
    pub const fn with_parent(mut self, entity: &'static str, field: &'static str) -> Self {
        self.parent = Some(ParentRef { entity, field });
        self
    }

    #[must_use]
    pub const fn with_dependents(mut self, dependents: &'static [DependentRef]) -> Self {
        self.dependents = dependents;
        self
    }

    #[must_use]
    pub const fn with_derived(mut self, derived: &'static [DerivedColumn]) -> Self {
        self.derived = derived;
        self
    }

    /// Look up a declared field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Declared fields carrying the given capability.
    pub fn columns(&self, capability: Capability) -> impl Iterator<Item = &FieldModel> {
        self.fields.iter().filter(move |f| f.has(capability))
    }

    /// Declared field by name, only if it carries the capability.
    #[must_use]
    pub fn column(&self, name: &str, capability: Capability) -> Option<&FieldModel> {
        self.field(name).filter(|f| f.has(capability))
    }

    /// Whether a payload may write this field. Reserved columns and the
    /// parent link are engine-owned.
    #[must_use]
    pub fn is_writable(&self, name: &str) -> bool {
        if self.is_parent_link(name) {
            return false;
        }

        self.field(name).is_some()
    }

    #[must_use]
    pub fn is_parent_link(&self, name: &str) -> bool {
        self.parent.is_some_and(|parent| parent.field == name)
    }
}
