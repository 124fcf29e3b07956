//! JSON schema element model and its wire rendering.
//!
//! ```rust
//! use fschema::JsonSchemaElement;
//!
//! let schema = JsonSchemaElement::object_builder()
//!     .property("arg0", JsonSchemaElement::integer())
//!     .property("arg1", JsonSchemaElement::integer())
//!     .required(["arg0", "arg1"])
//!     .build();
//!
//! assert_eq!(
//!     schema.to_json(),
//!     serde_json::json!({
//!         "type": "object",
//!         "properties": {
//!             "arg0": {"type": "integer"},
//!             "arg1": {"type": "integer"}
//!         },
//!         "required": ["arg0", "arg1"]
//!     })
//! );
//! ```

use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Prefix used when rendering [`JsonSchemaElement::Reference`] ids.
pub const DEFINITIONS_POINTER: &str = "#/$defs/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonSchemaElement {
    Object {
        properties: Vec<(String, JsonSchemaElement)>,
        required: Vec<String>,
        description: Option<String>,
    },
    Array {
        items: Box<JsonSchemaElement>,
        description: Option<String>,
    },
    String {
        description: Option<String>,
    },
    Integer {
        description: Option<String>,
    },
    Number {
        description: Option<String>,
    },
    Boolean {
        description: Option<String>,
    },
    Enum {
        values: Vec<String>,
        description: Option<String>,
    },
    Reference {
        id: String,
    },
}

impl JsonSchemaElement {
    pub fn string() -> Self {
        Self::String { description: None }
    }

    pub fn integer() -> Self {
        Self::Integer { description: None }
    }

    pub fn number() -> Self {
        Self::Number { description: None }
    }

    pub fn boolean() -> Self {
        Self::Boolean { description: None }
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            values: values.into_iter().map(Into::into).collect(),
            description: None,
        }
    }

    pub fn array(items: JsonSchemaElement) -> Self {
        Self::Array {
            items: Box::new(items),
            description: None,
        }
    }

    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference { id: id.into() }
    }

    /// An object with no declared properties.
    pub fn empty_object() -> Self {
        Self::object_builder().build()
    }

    pub fn object_builder() -> ObjectSchemaBuilder {
        ObjectSchemaBuilder::default()
    }

    /// Attaches a description. References cannot carry one and are returned
    /// unchanged.
    pub fn with_description(mut self, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Object { description, .. }
            | Self::Array { description, .. }
            | Self::String { description }
            | Self::Integer { description }
            | Self::Number { description }
            | Self::Boolean { description }
            | Self::Enum { description, .. } => *description = Some(value.into()),
            Self::Reference { .. } => {}
        }
        self
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Object { description, .. }
            | Self::Array { description, .. }
            | Self::String { description }
            | Self::Integer { description }
            | Self::Number { description }
            | Self::Boolean { description }
            | Self::Enum { description, .. } => description.as_deref(),
            Self::Reference { .. } => None,
        }
    }

    /// Looks up an object property by name.
    pub fn property(&self, name: &str) -> Option<&JsonSchemaElement> {
        match self {
            Self::Object { properties, .. } => properties
                .iter()
                .find(|(property, _)| property == name)
                .map(|(_, schema)| schema),
            _ => None,
        }
    }

    pub fn required_names(&self) -> &[String] {
        match self {
            Self::Object { required, .. } => required,
            _ => &[],
        }
    }

    pub fn to_json(&self) -> Value {
        let mut value = match self {
            Self::Object {
                properties,
                required,
                ..
            } => {
                let properties = properties
                    .iter()
                    .map(|(name, schema)| (name.clone(), schema.to_json()))
                    .collect::<Map<_, _>>();

                let mut object = json!({ "type": "object", "properties": properties });
                if !required.is_empty() {
                    object["required"] = json!(required);
                }
                object
            }
            Self::Array { items, .. } => json!({ "type": "array", "items": items.to_json() }),
            Self::String { .. } => json!({ "type": "string" }),
            Self::Integer { .. } => json!({ "type": "integer" }),
            Self::Number { .. } => json!({ "type": "number" }),
            Self::Boolean { .. } => json!({ "type": "boolean" }),
            Self::Enum { values, .. } => json!({ "type": "string", "enum": values }),
            Self::Reference { id } => json!({ "$ref": format!("{DEFINITIONS_POINTER}{id}") }),
        };

        if let Some(description) = self.description() {
            value["description"] = json!(description);
        }

        value
    }
}

impl Serialize for JsonSchemaElement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectSchemaBuilder {
    properties: Vec<(String, JsonSchemaElement)>,
    required: Vec<String>,
    description: Option<String>,
}

impl ObjectSchemaBuilder {
    pub fn property(mut self, name: impl Into<String>, schema: JsonSchemaElement) -> Self {
        self.properties.push((name.into(), schema));
        self
    }

    pub fn required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> JsonSchemaElement {
        JsonSchemaElement::Object {
            properties: self.properties,
            required: self.required,
            description: self.description,
        }
    }
}
