use crate::{
    types::{Id, Timestamp},
    value::Value,
};
use std::str::FromStr;

///
/// FieldKind
///
/// Runtime type shape of one declared column. This is the whole type surface
/// the query layer needs; richer presentation typing is a caller concern.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Bool,
    Float,
    Int,
    Uint,
    Text,
    Timestamp,
    Id,
}

impl FieldKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Id => "id",
        }
    }

    /// Coerce a client-supplied filter string into a typed value.
    pub(crate) fn coerce(self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Bool => match raw {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(format!("expected 'true' or 'false', got '{raw}'")),
            },
            Self::Float => raw
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| format!("expected a float: {e}")),
            Self::Int => raw
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| format!("expected an integer: {e}")),
            Self::Uint => raw
                .parse::<u64>()
                .map(Value::Uint)
                .map_err(|e| format!("expected an unsigned integer: {e}")),
            Self::Text => Ok(Value::Text(raw.to_string())),
            Self::Timestamp => Timestamp::parse_flexible(raw)
                .map(Value::Timestamp)
                .map_err(|e| e.to_string()),
            Self::Id => Id::from_str(raw)
                .map(Value::Id)
                .map_err(|e| format!("expected a ulid: {e}")),
        }
    }
}

///
/// Capability
///
/// Column capability axes declared per field and consulted by the query
/// specification builder.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Capability {
    Searchable,
    Filterable,
    Sortable,
}

///
/// FieldModel
/// Runtime field metadata used by query building and payload validation.
///

#[derive(Debug)]
pub struct FieldModel {
    /// Field name as used in predicates, sorting, and payloads.
    pub name: &'static str,
    /// Runtime type shape.
    pub kind: FieldKind,

    searchable: bool,
    filterable: bool,
    sortable: bool,
    required: bool,
}

impl FieldModel {
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            searchable: false,
            filterable: false,
            sortable: false,
            required: false,
        }
    }

    #[must_use]
    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    #[must_use]
    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    #[must_use]
    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    #[must_use]
    pub const fn int(name: &'static str) -> Self {
        Self::new(name, FieldKind::Int)
    }

    #[must_use]
    pub const fn uint(name: &'static str) -> Self {
        Self::new(name, FieldKind::Uint)
    }

    #[must_use]
    pub const fn timestamp(name: &'static str) -> Self {
        Self::new(name, FieldKind::Timestamp)
    }

    #[must_use]
    pub const fn id_ref(name: &'static str) -> Self {
        Self::new(name, FieldKind::Id)
    }

    #[must_use]
    pub const fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    #[must_use]
    pub const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Searchable => self.searchable,
            Capability::Filterable => self.filterable,
            Capability::Sortable => self.sortable,
        }
    }
}
