//! Parameter shape descriptors and JSON schema generation for tools.
//!
//! ```rust
//! use fschema::{JsonSchemaElement, ParameterShape, TypeShape, generate_parameters};
//!
//! let generated = generate_parameters(&[
//!     ParameterShape::new(TypeShape::String),
//!     ParameterShape::new(TypeShape::list(TypeShape::i32())),
//! ])
//! .expect("shapes are supported")
//! .expect("tool declares parameters");
//!
//! assert_eq!(generated.schema.required_names(), ["arg0", "arg1"]);
//! assert_eq!(
//!     generated.schema.property("arg1"),
//!     Some(&JsonSchemaElement::array(JsonSchemaElement::integer()))
//! );
//! ```

mod element;
mod error;
mod generator;
mod shape;

pub mod prelude {
    pub use crate::{
        FieldShape, GeneratedSchema, JsonSchemaElement, ObjectShape, ParameterShape,
        SchemaError, SchemaErrorKind, SchemaGenerator, TypeShape,
    };
}

pub use element::{DEFINITIONS_POINTER, JsonSchemaElement, ObjectSchemaBuilder};
pub use error::{SchemaError, SchemaErrorKind};
pub use generator::{
    GeneratedSchema, ParameterShape, SchemaGenerator, generate, generate_parameters,
    generate_parameters_with, reference_id,
};
pub use shape::{
    EnumShape, FieldShape, FloatKind, IntegerKind, ObjectShape, ShapeIndex, TypeShape,
};
