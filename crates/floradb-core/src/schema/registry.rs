use crate::{
    error::Error,
    model::{EntityModel, FieldKind, RESERVED_COLUMNS},
};
use std::collections::HashMap;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Startup-time schema wiring failures. These abort process start; they are
/// never surfaced to a request.
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("entity '{0}' already registered")]
    DuplicateEntity(&'static str),

    #[error("entity '{entity}' declares reserved field '{field}'")]
    ReservedField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("entity '{entity}' declares field '{field}' twice")]
    DuplicateField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("entity '{entity}' declares unknown parent entity '{parent}'")]
    UnknownParent {
        entity: &'static str,
        parent: &'static str,
    },

    #[error("entity '{entity}' parent link '{field}' must be a declared id field")]
    InvalidParentLink {
        entity: &'static str,
        field: &'static str,
    },

    #[error("entity '{entity}' declares unknown dependent entity '{dependent}'")]
    UnknownDependent {
        entity: &'static str,
        dependent: &'static str,
    },

    #[error("entity '{dependent}' is not a dependent of '{entity}'")]
    NotADependent {
        entity: &'static str,
        dependent: &'static str,
    },

    #[error(
        "derived column '{column}' on '{entity}' counts '{source_entity}', which is not its dependent"
    )]
    InvalidDerivedSource {
        entity: &'static str,
        column: &'static str,
        source_entity: &'static str,
    },
}

///
/// SchemaRegistry
///
/// Process-wide, read-only map from logical entity name to its static model.
/// Populated once at startup via [`SchemaBuilder`]; the only translation
/// point from a client-supplied entity name to a physical relation.
///

#[derive(Debug, Default)]
pub struct SchemaRegistry {
    entities: HashMap<&'static str, &'static EntityModel>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Resolve a client-supplied entity name.
    ///
    /// Free-text names never reach query construction directly; anything
    /// unregistered fails here with `UnknownEntity`.
    pub fn resolve(&self, name: &str) -> Result<&'static EntityModel, Error> {
        self.entities
            .get(name)
            .copied()
            .ok_or_else(|| Error::unknown_entity(name))
    }

    /// Iterate registered entities (diagnostics only).
    pub fn entities(&self) -> impl Iterator<Item = &'static EntityModel> + '_ {
        self.entities.values().copied()
    }

    // Internal lookup for names that came from validated static models, not
    // from client input. A miss here is a wiring bug.
    pub(crate) fn expect(&self, name: &'static str) -> Result<&'static EntityModel, Error> {
        self.entities
            .get(name)
            .copied()
            .ok_or_else(|| Error::internal(format!("entity '{name}' missing from registry")))
    }
}

///
/// SchemaBuilder
///
/// Accumulates entity registrations and validates the full graph in
/// `finish`: field hygiene per entity, then parent / dependent / derived
/// cross-references once every entity is present.
///

#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entities: HashMap<&'static str, &'static EntityModel>,
}

impl SchemaBuilder {
    pub fn register(mut self, model: &'static EntityModel) -> Result<Self, SchemaError> {
        if self.entities.contains_key(model.name) {
            return Err(SchemaError::DuplicateEntity(model.name));
        }
        validate_fields(model)?;

        self.entities.insert(model.name, model);
        Ok(self)
    }

    pub fn finish(self) -> Result<SchemaRegistry, SchemaError> {
        for model in self.entities.values() {
            self.validate_links(model)?;
        }

        Ok(SchemaRegistry {
            entities: self.entities,
        })
    }

    fn validate_links(&self, model: &EntityModel) -> Result<(), SchemaError> {
        if let Some(parent) = model.parent {
            if !self.entities.contains_key(parent.entity) {
                return Err(SchemaError::UnknownParent {
                    entity: model.name,
                    parent: parent.entity,
                });
            }

            // The link field carries the parent id; it must be declared so
            // reads can filter on it, and typed as an id.
            let link_ok = model
                .field(parent.field)
                .is_some_and(|f| f.kind == FieldKind::Id);
            if !link_ok {
                return Err(SchemaError::InvalidParentLink {
                    entity: model.name,
                    field: parent.field,
                });
            }
        }

        for dependent in model.dependents {
            let child = self.entities.get(dependent.entity).copied().ok_or(
                SchemaError::UnknownDependent {
                    entity: model.name,
                    dependent: dependent.entity,
                },
            )?;
            let points_back = child.parent.is_some_and(|p| p.entity == model.name);
            if !points_back {
                return Err(SchemaError::NotADependent {
                    entity: model.name,
                    dependent: dependent.entity,
                });
            }
        }

        for derived in model.derived {
            let crate::model::DerivedSource::DependentCount { entity } = derived.source;
            let counted = self.entities.get(entity).copied();
            let valid = counted.is_some_and(|c| c.parent.is_some_and(|p| p.entity == model.name));
            if !valid {
                return Err(SchemaError::InvalidDerivedSource {
                    entity: model.name,
                    column: derived.name,
                    source_entity: entity,
                });
            }
        }

        Ok(())
    }
}

fn validate_fields(model: &EntityModel) -> Result<(), SchemaError> {
    for (i, field) in model.fields.iter().enumerate() {
        if RESERVED_COLUMNS.contains(&field.name) {
            return Err(SchemaError::ReservedField {
                entity: model.name,
                field: field.name,
            });
        }
        if model.fields[..i].iter().any(|f| f.name == field.name) {
            return Err(SchemaError::DuplicateField {
                entity: model.name,
                field: field.name,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DependentRef, DerivedColumn, FieldModel};

    static PARENT_FIELDS: [FieldModel; 1] = [FieldModel::text("title").searchable()];
    static CHILD_FIELDS: [FieldModel; 2] = [
        FieldModel::id_ref("parent_id").filterable(),
        FieldModel::text("label"),
    ];
    static PARENT_DEPENDENTS: [DependentRef; 1] = [DependentRef::new("children")];
    static PARENT_DERIVED: [DerivedColumn; 1] =
        [DerivedColumn::dependent_count("child_count", "children")];

    static PARENT: EntityModel = EntityModel::new("parents", "parent", &PARENT_FIELDS)
        .with_dependents(&PARENT_DEPENDENTS)
        .with_derived(&PARENT_DERIVED);
    static CHILD: EntityModel =
        EntityModel::new("children", "child", &CHILD_FIELDS).with_parent("parents", "parent_id");

    #[test]
    fn resolve_rejects_unregistered_names() {
        let registry = SchemaRegistry::builder()
            .register(&PARENT)
            .unwrap()
            .register(&CHILD)
            .unwrap()
            .finish()
            .unwrap();

        assert!(registry.resolve("parents").is_ok());
        let err = registry.resolve("users; drop table").unwrap_err();
        assert!(
            matches!(err, Error::UnknownEntity(_)),
            "raw names must never pass through: {err}"
        );
    }

    #[test]
    fn reserved_field_names_are_rejected() {
        static BAD_FIELDS: [FieldModel; 1] = [FieldModel::text("owner_id")];
        static BAD: EntityModel = EntityModel::new("bad", "bad", &BAD_FIELDS);

        let err = SchemaRegistry::builder().register(&BAD).unwrap_err();
        assert!(matches!(err, SchemaError::ReservedField { .. }));
    }

    #[test]
    fn dependent_must_point_back_at_parent() {
        static LONER_FIELDS: [FieldModel; 1] = [FieldModel::text("label")];
        static LONER: EntityModel = EntityModel::new("children", "child", &LONER_FIELDS);

        let err = SchemaRegistry::builder()
            .register(&PARENT)
            .unwrap()
            .register(&LONER)
            .unwrap()
            .finish()
            .unwrap_err();
        assert!(matches!(err, SchemaError::NotADependent { .. }));
    }

    #[test]
    fn parent_link_must_be_declared_id_field() {
        static BAD_CHILD_FIELDS: [FieldModel; 1] = [FieldModel::text("parent_id")];
        static BAD_CHILD: EntityModel = EntityModel::new("children", "child", &BAD_CHILD_FIELDS)
            .with_parent("parents", "parent_id");

        let err = SchemaRegistry::builder()
            .register(&PARENT)
            .unwrap()
            .register(&BAD_CHILD)
            .unwrap()
            .finish()
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidParentLink { .. }));
    }
}
