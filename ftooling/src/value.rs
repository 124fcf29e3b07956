//! Bound argument values handed to tools and the values tools return.
//!
//! ```rust
//! use ftooling::{ArgumentValue, ToolOutput};
//!
//! let value = ArgumentValue::List(vec![ArgumentValue::Integer(37), ArgumentValue::Integer(73)]);
//! assert_eq!(value.to_json(), serde_json::json!([37, 73]));
//!
//! assert_eq!(ToolOutput::from(124).to_text(), "124");
//! assert_eq!(ToolOutput::from(5.0).to_text(), "5");
//! assert_eq!(ToolOutput::from(true).to_text(), "true");
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

use crate::ToolError;

#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    Null,
    Integer(i128),
    Number(f64),
    Boolean(bool),
    String(String),
    Enum(String),
    List(Vec<ArgumentValue>),
    /// Distinct elements in order of first occurrence.
    Set(Vec<ArgumentValue>),
    Map(BTreeMap<String, ArgumentValue>),
    Object(Vec<(String, ArgumentValue)>),
}

impl ArgumentValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer()
            .and_then(|value| i64::try_from(value).ok())
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Text of a string or enum constant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) | Self::Enum(value) => Some(value),
            _ => None,
        }
    }

    /// Elements of a list or set.
    pub fn as_slice(&self) -> Option<&[ArgumentValue]> {
        match self {
            Self::List(items) | Self::Set(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, ArgumentValue>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn field(&self, name: &str) -> Option<&ArgumentValue> {
        match self {
            Self::Object(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// JSON form of the value, as a model would send it.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Integer(value) => integer_json(*value),
            Self::Number(value) => Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Boolean(value) => Value::Bool(*value),
            Self::String(value) | Self::Enum(value) => Value::String(value.clone()),
            Self::List(items) | Self::Set(items) => {
                Value::Array(items.iter().map(Self::to_json).collect())
            }
            Self::Map(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
            Self::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

fn integer_json(value: i128) -> Value {
    if let Ok(value) = i64::try_from(value) {
        return Value::from(value);
    }

    if let Ok(value) = u64::try_from(value) {
        return Value::from(value);
    }

    Value::from(value as f64)
}

/// Bound parameters of one tool call, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolArguments {
    values: Vec<(String, ArgumentValue)>,
}

impl ToolArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: ArgumentValue) {
        self.values.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.values
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value)
    }

    pub fn at(&self, position: usize) -> Option<&ArgumentValue> {
        self.values.get(position).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, name: &str) -> Result<&ArgumentValue, ToolError> {
        self.get(name)
            .filter(|value| !value.is_null())
            .ok_or_else(|| ToolError::missing_field(name))
    }

    pub fn i64(&self, name: &str) -> Result<i64, ToolError> {
        self.value(name)?
            .as_i64()
            .ok_or_else(|| ToolError::coercion(name, "expected a 64-bit integer"))
    }

    pub fn f64(&self, name: &str) -> Result<f64, ToolError> {
        self.value(name)?
            .as_f64()
            .ok_or_else(|| ToolError::coercion(name, "expected a number"))
    }

    pub fn bool(&self, name: &str) -> Result<bool, ToolError> {
        self.value(name)?
            .as_bool()
            .ok_or_else(|| ToolError::coercion(name, "expected a boolean"))
    }

    pub fn str(&self, name: &str) -> Result<&str, ToolError> {
        self.value(name)?
            .as_str()
            .ok_or_else(|| ToolError::coercion(name, "expected a string"))
    }
}

/// Value returned by a tool body.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Unit,
    Integer(i128),
    Number(f64),
    Boolean(bool),
    Text(String),
    List(Vec<ToolOutput>),
    Record {
        name: String,
        fields: Vec<(String, ToolOutput)>,
    },
    Json(Value),
}

impl ToolOutput {
    pub fn record<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, ToolOutput)>,
        S: Into<String>,
    {
        Self::Record {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        }
    }

    /// Text handed back to the model as the tool result.
    pub fn to_text(&self) -> String {
        match self {
            Self::Unit => "Success".to_string(),
            Self::Integer(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
            Self::Boolean(value) => value.to_string(),
            Self::Text(value) => value.clone(),
            Self::List(items) => format!(
                "[{}]",
                items
                    .iter()
                    .map(Self::to_text)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Record { name, fields } => format!(
                "{name}[{}]",
                fields
                    .iter()
                    .map(|(field, value)| format!("{field}={}", value.to_text()))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Json(Value::String(value)) => value.clone(),
            Self::Json(value) => value.to_string(),
        }
    }
}

macro_rules! integer_output {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for ToolOutput {
                fn from(value: $source) -> Self {
                    Self::Integer(value as i128)
                }
            }
        )+
    };
}

integer_output!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<f64> for ToolOutput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for ToolOutput {
    fn from(value: f32) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for ToolOutput {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<String> for ToolOutput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ToolOutput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<()> for ToolOutput {
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

impl From<Value> for ToolOutput {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl<T> From<Vec<T>> for ToolOutput
where
    T: Into<ToolOutput>,
{
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}
