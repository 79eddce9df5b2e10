mod entity;
mod field;

pub use entity::{
    CREATED_AT_COLUMN, DependentRef, DerivedColumn, DerivedSource, EntityModel, ID_COLUMN,
    OWNER_COLUMN, ParentRef, RESERVED_COLUMNS,
};
pub use field::{Capability, FieldKind, FieldModel};
