use crate::{store::Row, value::Value};

///
/// Predicate
///
/// Minimal predicate algebra evaluated per row: equality filters, the
/// case-insensitive search fan-out, and the AND/OR combinators that join
/// them. Field names are always model-owned (`&'static`); client strings
/// never reach this type directly.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Eq {
        field: &'static str,
        value: Value,
    },
    ContainsCi {
        field: &'static str,
        needle: String,
    },
}

impl Predicate {
    #[must_use]
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    /// Case-insensitive containment; the needle is lowercased once here.
    #[must_use]
    pub fn contains_ci(field: &'static str, needle: &str) -> Self {
        Self::ContainsCi {
            field,
            needle: needle.to_lowercase(),
        }
    }

    /// Evaluate against one row.
    ///
    /// An empty AND matches everything; an empty OR matches nothing.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Self::And(parts) => parts.iter().all(|p| p.matches(row)),
            Self::Or(parts) => parts.iter().any(|p| p.matches(row)),
            Self::Eq { field, value } => row.get(field).is_some_and(|v| v == value),
            Self::ContainsCi { field, needle } => {
                row.get(field).is_some_and(|v| v.contains_ci(needle))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> Row {
        [
            ("plant_name", Value::Text("Cherry Tomato".to_string())),
            ("healthy", Value::Bool(false)),
            ("severity", Value::Float(0.8)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn eq_matches_typed_values() {
        assert!(Predicate::eq("healthy", false).matches(&row()));
        assert!(!Predicate::eq("healthy", true).matches(&row()));
        assert!(!Predicate::eq("missing", true).matches(&row()));
    }

    #[test]
    fn contains_ci_ignores_case() {
        assert!(Predicate::contains_ci("plant_name", "TOMATO").matches(&row()));
        assert!(!Predicate::contains_ci("plant_name", "basil").matches(&row()));
    }

    #[test]
    fn combinator_identity_semantics() {
        assert!(Predicate::And(vec![]).matches(&row()));
        assert!(!Predicate::Or(vec![]).matches(&row()));
        assert!(
            Predicate::And(vec![
                Predicate::eq("healthy", false),
                Predicate::contains_ci("plant_name", "tomato"),
            ])
            .matches(&row())
        );
    }
}
