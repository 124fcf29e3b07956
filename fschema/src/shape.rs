//! Structural descriptors for tool parameter types.
//!
//! A [`TypeShape`] stands in for runtime type information: callers describe
//! each parameter once, and both schema generation and argument binding work
//! from that description.
//!
//! ```rust
//! use fschema::{ObjectShape, TypeShape};
//!
//! let person = ObjectShape::new("app.Person")
//!     .field("name", TypeShape::String)
//!     .field("children", TypeShape::list(TypeShape::reference("app.Person")));
//!
//! assert_eq!(person.fields.len(), 2);
//! assert_eq!(person.field_named("name").map(|f| f.nullable), Some(false));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerKind {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntegerKind {
    /// Inclusive bounds of the kind, widened to `i128`.
    pub fn bounds(self) -> (i128, i128) {
        match self {
            Self::I8 => (i8::MIN as i128, i8::MAX as i128),
            Self::I16 => (i16::MIN as i128, i16::MAX as i128),
            Self::I32 => (i32::MIN as i128, i32::MAX as i128),
            Self::I64 => (i64::MIN as i128, i64::MAX as i128),
            Self::U8 => (0, u8::MAX as i128),
            Self::U16 => (0, u16::MAX as i128),
            Self::U32 => (0, u32::MAX as i128),
            Self::U64 => (0, u64::MAX as i128),
        }
    }

    pub fn contains(self, value: i128) -> bool {
        let (min, max) = self.bounds();
        (min..=max).contains(&value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

impl FloatKind {
    /// Whether `value` is finite once narrowed to this kind.
    pub fn contains(self, value: f64) -> bool {
        match self {
            Self::F32 => (value as f32).is_finite(),
            Self::F64 => value.is_finite(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumShape {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumShape {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_variant(&self, candidate: &str) -> bool {
        self.variants.iter().any(|variant| variant == candidate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldShape {
    pub name: String,
    pub shape: TypeShape,
    pub description: Option<String>,
    pub nullable: bool,
}

impl FieldShape {
    pub fn new(name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            shape,
            description: None,
            nullable: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

/// A declared record type. `name` is the fully qualified logical type name and
/// identifies the type for cycle detection and reference ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectShape {
    pub name: String,
    pub fields: Vec<FieldShape>,
}

impl ObjectShape {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(self, name: impl Into<String>, shape: TypeShape) -> Self {
        self.with_field(FieldShape::new(name, shape))
    }

    pub fn nullable_field(self, name: impl Into<String>, shape: TypeShape) -> Self {
        self.with_field(FieldShape::new(name, shape).nullable())
    }

    pub fn with_field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldShape> {
        self.fields.iter().find(|field| field.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Integer(IntegerKind),
    Number(FloatKind),
    Boolean,
    String,
    Enum(Arc<EnumShape>),
    Object(Arc<ObjectShape>),
    List(Box<TypeShape>),
    Set(Box<TypeShape>),
    /// String-keyed map; only the value shape is declared.
    Map(Box<TypeShape>),
    /// Back-reference to an object shape by its logical name.
    Ref(String),
    /// A type with no structural description.
    Opaque(String),
}

impl TypeShape {
    pub fn i32() -> Self {
        Self::Integer(IntegerKind::I32)
    }

    pub fn i64() -> Self {
        Self::Integer(IntegerKind::I64)
    }

    pub fn f32() -> Self {
        Self::Number(FloatKind::F32)
    }

    pub fn f64() -> Self {
        Self::Number(FloatKind::F64)
    }

    pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(Arc::new(EnumShape::new(name, variants)))
    }

    pub fn object(shape: ObjectShape) -> Self {
        Self::Object(Arc::new(shape))
    }

    pub fn list(item: TypeShape) -> Self {
        Self::List(Box::new(item))
    }

    pub fn set(item: TypeShape) -> Self {
        Self::Set(Box::new(item))
    }

    pub fn map(value: TypeShape) -> Self {
        Self::Map(Box::new(value))
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::Ref(name.into())
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self::Opaque(name.into())
    }
}

/// Every named object shape reachable from a set of root shapes.
///
/// Used to resolve [`TypeShape::Ref`] during both schema generation and
/// argument binding. The first shape seen under a name wins.
#[derive(Debug, Clone, Default)]
pub struct ShapeIndex {
    objects: HashMap<String, Arc<ObjectShape>>,
}

impl ShapeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect<'a, I>(roots: I) -> Self
    where
        I: IntoIterator<Item = &'a TypeShape>,
    {
        let mut index = Self::new();
        for root in roots {
            index.visit(root);
        }
        index
    }

    pub fn resolve(&self, name: &str) -> Option<&Arc<ObjectShape>> {
        self.objects.get(name)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn visit(&mut self, shape: &TypeShape) {
        match shape {
            TypeShape::Object(object) => {
                if self.objects.contains_key(&object.name) {
                    return;
                }

                self.objects.insert(object.name.clone(), Arc::clone(object));
                for field in &object.fields {
                    self.visit(&field.shape);
                }
            }
            TypeShape::List(item) | TypeShape::Set(item) | TypeShape::Map(item) => {
                self.visit(item)
            }
            _ => {}
        }
    }
}
