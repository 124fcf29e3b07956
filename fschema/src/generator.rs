//! Schema generation from [`TypeShape`] descriptors.
//!
//! A [`SchemaGenerator`] is one generation session: object schemas are cached
//! by type name, recursive occurrences become [`JsonSchemaElement::Reference`]
//! nodes, and referenced types are collected into the session's definitions.
//!
//! ```rust
//! use fschema::{JsonSchemaElement, ObjectShape, SchemaGenerator, TypeShape, reference_id};
//!
//! let node = TypeShape::object(
//!     ObjectShape::new("app.Node")
//!         .field("name", TypeShape::String)
//!         .field("children", TypeShape::list(TypeShape::reference("app.Node"))),
//! );
//!
//! let mut generator = SchemaGenerator::new();
//! let schema = generator.generate(&node).expect("node is describable");
//! let id = reference_id("app.Node");
//!
//! assert_eq!(
//!     schema.property("children"),
//!     Some(&JsonSchemaElement::array(JsonSchemaElement::reference(id.clone())))
//! );
//! assert_eq!(generator.definitions().get(&id), Some(&schema));
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::{JsonSchemaElement, ObjectShape, SchemaError, ShapeIndex, TypeShape};

/// Stable reference id for a fully qualified type name.
///
/// Name-based UUID (v5, OID namespace), so the same name yields the same id in
/// every process.
pub fn reference_id(type_name: &str) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, type_name.as_bytes()).to_string()
}

/// A single declared tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterShape {
    pub name: Option<String>,
    pub shape: TypeShape,
    pub description: Option<String>,
    pub optional: bool,
}

impl ParameterShape {
    pub fn new(shape: TypeShape) -> Self {
        Self {
            name: None,
            shape,
            description: None,
            optional: false,
        }
    }

    pub fn named(name: impl Into<String>, shape: TypeShape) -> Self {
        Self::new(shape).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Property name used in the wrapper schema: the explicit name, or
    /// `arg{position}`.
    pub fn assigned_name(&self, position: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("arg{position}"))
    }
}

/// Result of a complete generation: the root schema plus every definition its
/// references point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSchema {
    pub schema: JsonSchemaElement,
    pub definitions: BTreeMap<String, JsonSchemaElement>,
}

/// Generates the schema of one shape in a fresh session.
pub fn generate(shape: &TypeShape) -> Result<GeneratedSchema, SchemaError> {
    let mut generator = SchemaGenerator::with_index(ShapeIndex::collect([shape]));
    let schema = generator.generate(shape)?;
    Ok(GeneratedSchema {
        schema,
        definitions: generator.into_definitions(),
    })
}

/// Generates the wrapper object schema for a tool's parameter list.
///
/// Returns `Ok(None)` when the tool declares no parameters.
pub fn generate_parameters(
    parameters: &[ParameterShape],
) -> Result<Option<GeneratedSchema>, SchemaError> {
    let index = ShapeIndex::collect(parameters.iter().map(|parameter| &parameter.shape));
    generate_parameters_with(parameters, &index)
}

/// Like [`generate_parameters`], resolving references through an index the
/// caller already collected from the same parameters.
pub fn generate_parameters_with(
    parameters: &[ParameterShape],
    index: &ShapeIndex,
) -> Result<Option<GeneratedSchema>, SchemaError> {
    if parameters.is_empty() {
        return Ok(None);
    }

    let mut generator = SchemaGenerator::with_index(index.clone());
    let mut properties = Vec::with_capacity(parameters.len());
    let mut required = Vec::new();

    for (position, parameter) in parameters.iter().enumerate() {
        let name = parameter.assigned_name(position);
        if properties.iter().any(|(existing, _)| existing == &name) {
            return Err(SchemaError::duplicate_property("parameters", &name));
        }

        let mut schema = generator.generate(&parameter.shape)?;
        if let Some(description) = &parameter.description {
            schema = schema.with_description(description.clone());
        }

        if !parameter.optional {
            required.push(name.clone());
        }
        properties.push((name, schema));
    }

    Ok(Some(GeneratedSchema {
        schema: JsonSchemaElement::Object {
            properties,
            required,
            description: None,
        },
        definitions: generator.into_definitions(),
    }))
}

#[derive(Debug, Default)]
pub struct SchemaGenerator {
    index: ShapeIndex,
    expanding: HashSet<String>,
    referenced: HashSet<String>,
    cache: HashMap<String, JsonSchemaElement>,
    definitions: BTreeMap<String, JsonSchemaElement>,
}

impl SchemaGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session able to resolve [`TypeShape::Ref`] to any object in
    /// `index`, even before that object has been expanded.
    pub fn with_index(index: ShapeIndex) -> Self {
        Self {
            index,
            ..Self::default()
        }
    }

    pub fn generate(&mut self, shape: &TypeShape) -> Result<JsonSchemaElement, SchemaError> {
        match shape {
            TypeShape::Integer(_) => Ok(JsonSchemaElement::integer()),
            TypeShape::Number(_) => Ok(JsonSchemaElement::number()),
            TypeShape::Boolean => Ok(JsonSchemaElement::boolean()),
            TypeShape::String => Ok(JsonSchemaElement::string()),
            TypeShape::Enum(shape) => Ok(JsonSchemaElement::enumeration(
                shape.variants.iter().cloned(),
            )),
            TypeShape::List(item) | TypeShape::Set(item) => {
                Ok(JsonSchemaElement::array(self.generate(item)?))
            }
            TypeShape::Map(value) => {
                self.check_bindable(value, &mut HashSet::new())?;
                Ok(JsonSchemaElement::empty_object())
            }
            TypeShape::Object(object) => self.object(object),
            TypeShape::Ref(name) => self.reference(name),
            TypeShape::Opaque(name) => Err(SchemaError::unsupported(name.clone())),
        }
    }

    pub fn definitions(&self) -> &BTreeMap<String, JsonSchemaElement> {
        &self.definitions
    }

    pub fn into_definitions(self) -> BTreeMap<String, JsonSchemaElement> {
        self.definitions
    }

    fn reference(&mut self, name: &str) -> Result<JsonSchemaElement, SchemaError> {
        if self.expanding.contains(name) {
            let id = reference_id(name);
            self.referenced.insert(id.clone());
            return Ok(JsonSchemaElement::reference(id));
        }

        if let Some(cached) = self.cache.get(name) {
            return Ok(cached.clone());
        }

        let object = self
            .index
            .resolve(name)
            .cloned()
            .ok_or_else(|| SchemaError::unresolved_reference(name))?;
        self.object(&object)
    }

    fn object(&mut self, object: &Arc<ObjectShape>) -> Result<JsonSchemaElement, SchemaError> {
        let name = object.name.as_str();
        if self.expanding.contains(name) {
            return self.reference(name);
        }

        if let Some(cached) = self.cache.get(name) {
            return Ok(cached.clone());
        }

        let id = reference_id(name);
        self.expanding.insert(name.to_string());
        let built = self.fields(object);
        self.expanding.remove(name);
        let schema = built?;

        if self.referenced.contains(&id) {
            self.definitions.entry(id).or_insert_with(|| schema.clone());
        }

        self.cache.insert(name.to_string(), schema.clone());
        Ok(schema)
    }

    /// Map values never reach the schema, but they are still bound at call
    /// time, so every shape under them must resolve and be bindable.
    fn check_bindable(
        &self,
        shape: &TypeShape,
        seen: &mut HashSet<String>,
    ) -> Result<(), SchemaError> {
        match shape {
            TypeShape::Integer(_)
            | TypeShape::Number(_)
            | TypeShape::Boolean
            | TypeShape::String
            | TypeShape::Enum(_) => Ok(()),
            TypeShape::List(item) | TypeShape::Set(item) | TypeShape::Map(item) => {
                self.check_bindable(item, seen)
            }
            TypeShape::Object(object) => self.check_object_bindable(object, seen),
            TypeShape::Ref(name) => {
                if self.expanding.contains(name)
                    || self.cache.contains_key(name)
                    || seen.contains(name)
                {
                    return Ok(());
                }
                let object = self
                    .index
                    .resolve(name)
                    .ok_or_else(|| SchemaError::unresolved_reference(name))?;
                self.check_object_bindable(object, seen)
            }
            TypeShape::Opaque(name) => Err(SchemaError::unsupported(name.clone())),
        }
    }

    fn check_object_bindable(
        &self,
        object: &ObjectShape,
        seen: &mut HashSet<String>,
    ) -> Result<(), SchemaError> {
        if !seen.insert(object.name.clone()) {
            return Ok(());
        }
        object
            .fields
            .iter()
            .try_for_each(|field| self.check_bindable(&field.shape, seen))
    }

    fn fields(&mut self, object: &ObjectShape) -> Result<JsonSchemaElement, SchemaError> {
        let mut properties: Vec<(String, JsonSchemaElement)> =
            Vec::with_capacity(object.fields.len());

        for field in &object.fields {
            if properties.iter().any(|(existing, _)| existing == &field.name) {
                return Err(SchemaError::duplicate_property(
                    object.name.clone(),
                    &field.name,
                ));
            }

            let mut schema = self.generate(&field.shape)?;
            if let Some(description) = &field.description {
                schema = schema.with_description(description.clone());
            }
            properties.push((field.name.clone(), schema));
        }

        let required = object.fields.iter().map(|field| field.name.clone()).collect();
        Ok(JsonSchemaElement::Object {
            properties,
            required,
            description: None,
        })
    }
}
