//! Schema generation errors.
//!
//! ```rust
//! use fschema::{SchemaError, SchemaErrorKind};
//!
//! let err = SchemaError::unsupported("java.time.LocalTime");
//! assert_eq!(err.kind, SchemaErrorKind::Unsupported);
//! assert!(err.to_string().contains("LocalTime"));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorKind {
    Unsupported,
    UnresolvedReference,
    DuplicateProperty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    pub message: String,
    pub type_name: Option<String>,
}

impl SchemaError {
    pub fn new(kind: SchemaErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            type_name: None,
        }
    }

    pub fn unsupported(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self::new(
            SchemaErrorKind::Unsupported,
            format!("type '{type_name}' has no JSON schema mapping"),
        )
        .with_type_name(type_name)
    }

    pub fn unresolved_reference(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self::new(
            SchemaErrorKind::UnresolvedReference,
            format!("reference to undeclared object type '{type_name}'"),
        )
        .with_type_name(type_name)
    }

    pub fn duplicate_property(owner: impl Into<String>, property: &str) -> Self {
        let owner = owner.into();
        Self::new(
            SchemaErrorKind::DuplicateProperty,
            format!("property '{property}' is declared more than once"),
        )
        .with_type_name(owner)
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.type_name {
            Some(type_name) => write!(f, "{:?} [type={}]: {}", self.kind, type_name, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for SchemaError {}
