//! Names: identifiers, qualified names and qualified operators.

use std::fmt;

use super::NodeError;

/// A single name, already case-folded or taken verbatim from double quotes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier(String);

impl Identifier {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A possibly qualified name of a relation, function, type or collation.
///
/// At most three parts: `catalog.schema.relation`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub catalog: Option<Identifier>,
    pub schema: Option<Identifier>,
    pub relation: Identifier,
}

impl QualifiedName {
    /// Creates an unqualified name.
    #[must_use]
    pub fn new(relation: impl Into<Identifier>) -> Self {
        Self {
            catalog: None,
            schema: None,
            relation: relation.into(),
        }
    }

    /// Creates a schema-qualified name.
    #[must_use]
    pub fn with_schema(schema: impl Into<Identifier>, relation: impl Into<Identifier>) -> Self {
        Self {
            catalog: None,
            schema: Some(schema.into()),
            relation: relation.into(),
        }
    }

    /// Builds a name from one to three parts.
    ///
    /// # Errors
    ///
    /// Returns `NodeError::TooManyNameParts` for more than three parts and
    /// `NodeError::InvalidName` for none.
    pub fn from_parts(parts: Vec<Identifier>) -> Result<Self, NodeError> {
        let mut parts = parts.into_iter();
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(relation), None, None, None) => Ok(Self::new(relation)),
            (Some(schema), Some(relation), None, None) => Ok(Self::with_schema(schema, relation)),
            (Some(catalog), Some(schema), Some(relation), None) => Ok(Self {
                catalog: Some(catalog),
                schema: Some(schema),
                relation,
            }),
            (None, ..) => Err(NodeError::InvalidName(String::from("empty qualified name"))),
            (Some(first), Some(second), Some(third), Some(fourth)) => {
                let mut all = vec![first, second, third, fourth];
                all.extend(parts);
                let joined: Vec<&str> = all.iter().map(Identifier::as_str).collect();
                Err(NodeError::TooManyNameParts(joined.join(".")))
            }
            _ => Err(NodeError::InvalidName(String::from("malformed qualified name"))),
        }
    }

    /// Returns the parts of the name, outermost first.
    #[must_use]
    pub fn parts(&self) -> Vec<&Identifier> {
        self.catalog
            .iter()
            .chain(self.schema.iter())
            .chain(std::iter::once(&self.relation))
            .collect()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = self.parts().into_iter().map(Identifier::as_str).collect();
        f.write_str(&parts.join("."))
    }
}

/// An operator written as `OPERATOR(schema.op)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedOperator {
    pub catalog: Option<Identifier>,
    pub schema: Option<Identifier>,
    pub operator: String,
}

impl QualifiedOperator {
    #[must_use]
    pub fn new(schema: Option<Identifier>, operator: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema,
            operator: operator.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        let name = QualifiedName::from_parts(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(name, QualifiedName::with_schema("a", "b"));
        assert_eq!(name.to_string(), "a.b");

        let full = QualifiedName::from_parts(vec!["c".into(), "s".into(), "r".into()]).unwrap();
        assert_eq!(full.parts().len(), 3);
    }

    #[test]
    fn test_from_parts_rejects_bad_input() {
        assert!(matches!(
            QualifiedName::from_parts(vec![]),
            Err(NodeError::InvalidName(_))
        ));
        let err = QualifiedName::from_parts(vec!["a".into(), "b".into(), "c".into(), "d".into()])
            .unwrap_err();
        assert_eq!(err, NodeError::TooManyNameParts("a.b.c.d".into()));
    }
}
