//! Binding of model-supplied JSON arguments to declared parameter shapes.
//!
//! ```rust
//! use fschema::{ParameterShape, ShapeIndex, TypeShape};
//! use ftooling::{ArgumentValue, bind_arguments};
//!
//! let parameters = vec![
//!     ParameterShape::new(TypeShape::i32()),
//!     ParameterShape::new(TypeShape::i32()),
//! ];
//! let shapes = ShapeIndex::collect(parameters.iter().map(|p| &p.shape));
//!
//! let args = bind_arguments(&parameters, &shapes, r#"{"arg0":37,"arg1":87}"#)
//!     .expect("arguments should bind");
//! assert_eq!(args.get("arg1"), Some(&ArgumentValue::Integer(87)));
//! ```

use std::collections::BTreeMap;

use fschema::{IntegerKind, ObjectShape, ParameterShape, ShapeIndex, TypeShape};
use serde_json::{Map, Value};

use crate::{ArgumentValue, ToolArguments, ToolError};

pub fn parse_json_value(args_json: &str) -> Result<Value, ToolError> {
    serde_json::from_str(args_json)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid JSON arguments: {err}")))
}

/// Parses the arguments text of a tool call.
///
/// Blank text and a JSON `null` both count as an empty object.
pub fn parse_json_object(args_json: &str) -> Result<Map<String, Value>, ToolError> {
    if args_json.trim().is_empty() {
        return Ok(Map::new());
    }

    match parse_json_value(args_json)? {
        Value::Object(object) => Ok(object),
        Value::Null => Ok(Map::new()),
        _ => Err(ToolError::invalid_arguments("expected JSON object arguments")),
    }
}

/// Binds the arguments text against the declared parameters, in declaration
/// order. Unknown properties are ignored.
pub fn bind_arguments(
    parameters: &[ParameterShape],
    shapes: &ShapeIndex,
    args_json: &str,
) -> Result<ToolArguments, ToolError> {
    let object = parse_json_object(args_json)?;
    let mut arguments = ToolArguments::new();

    for (position, parameter) in parameters.iter().enumerate() {
        let name = parameter.assigned_name(position);
        let value = match object.get(&name) {
            None | Some(Value::Null) if parameter.optional => ArgumentValue::Null,
            None | Some(Value::Null) => return Err(ToolError::missing_field(&name)),
            Some(value) => coerce(value, &parameter.shape, shapes, &name)?,
        };
        arguments.push(name, value);
    }

    Ok(arguments)
}

fn coerce(
    value: &Value,
    shape: &TypeShape,
    shapes: &ShapeIndex,
    path: &str,
) -> Result<ArgumentValue, ToolError> {
    match shape {
        TypeShape::Integer(kind) => coerce_integer(value, *kind, path),
        TypeShape::Number(kind) => {
            let number = value
                .as_f64()
                .ok_or_else(|| mismatch(path, "a number", value))?;
            if !kind.contains(number) {
                return Err(ToolError::coercion(
                    path,
                    format!("{number} is out of range for {kind:?}"),
                ));
            }
            Ok(ArgumentValue::Number(number))
        }
        TypeShape::Boolean => value
            .as_bool()
            .map(ArgumentValue::Boolean)
            .ok_or_else(|| mismatch(path, "a boolean", value)),
        TypeShape::String => value
            .as_str()
            .map(|text| ArgumentValue::String(text.to_string()))
            .ok_or_else(|| mismatch(path, "a string", value)),
        TypeShape::Enum(enumeration) => {
            let constant = value
                .as_str()
                .ok_or_else(|| mismatch(path, "an enum constant", value))?;
            if !enumeration.has_variant(constant) {
                return Err(ToolError::coercion(
                    path,
                    format!("'{constant}' is not a constant of {}", enumeration.name),
                ));
            }
            Ok(ArgumentValue::Enum(constant.to_string()))
        }
        TypeShape::Object(object) => coerce_object(value, object, shapes, path),
        TypeShape::Ref(name) => {
            let object = shapes.resolve(name).ok_or_else(|| {
                ToolError::coercion(path, format!("type '{name}' is not declared"))
            })?;
            coerce_object(value, object, shapes, path)
        }
        TypeShape::List(item) => {
            let items = coerce_items(value, item, shapes, path)?;
            Ok(ArgumentValue::List(items))
        }
        TypeShape::Set(item) => {
            let mut distinct: Vec<ArgumentValue> = Vec::new();
            for element in coerce_items(value, item, shapes, path)? {
                if !distinct.contains(&element) {
                    distinct.push(element);
                }
            }
            Ok(ArgumentValue::Set(distinct))
        }
        TypeShape::Map(value_shape) => {
            let entries = value
                .as_object()
                .ok_or_else(|| mismatch(path, "an object", value))?;
            let mut map = BTreeMap::new();
            for (key, entry) in entries {
                let entry_path = format!("{path}.{key}");
                let bound = match entry {
                    Value::Null => ArgumentValue::Null,
                    entry => coerce(entry, value_shape, shapes, &entry_path)?,
                };
                map.insert(key.clone(), bound);
            }
            Ok(ArgumentValue::Map(map))
        }
        TypeShape::Opaque(name) => Err(ToolError::coercion(
            path,
            format!("type '{name}' cannot be bound"),
        )),
    }
}

fn coerce_integer(value: &Value, kind: IntegerKind, path: &str) -> Result<ArgumentValue, ToolError> {
    let Value::Number(number) = value else {
        return Err(mismatch(path, "an integer", value));
    };

    let exact = if let Some(signed) = number.as_i64() {
        Some(signed as i128)
    } else if let Some(unsigned) = number.as_u64() {
        Some(unsigned as i128)
    } else {
        number
            .as_f64()
            .filter(|float| float.is_finite() && float.fract() == 0.0)
            .filter(|float| float.abs() < 2f64.powi(64))
            .map(|float| float as i128)
    };

    let exact = exact.ok_or_else(|| {
        ToolError::coercion(path, format!("{number} is not an exact integer"))
    })?;

    if !kind.contains(exact) {
        return Err(ToolError::coercion(
            path,
            format!("{exact} is out of range for {kind:?}"),
        ));
    }

    Ok(ArgumentValue::Integer(exact))
}

fn coerce_object(
    value: &Value,
    object: &ObjectShape,
    shapes: &ShapeIndex,
    path: &str,
) -> Result<ArgumentValue, ToolError> {
    let properties = value
        .as_object()
        .ok_or_else(|| mismatch(path, "an object", value))?;

    let mut fields = Vec::with_capacity(object.fields.len());
    for field in &object.fields {
        let field_path = format!("{path}.{}", field.name);
        let bound = match properties.get(&field.name) {
            None | Some(Value::Null) if field.nullable => ArgumentValue::Null,
            None | Some(Value::Null) => return Err(ToolError::missing_field(&field_path)),
            Some(property) => coerce(property, &field.shape, shapes, &field_path)?,
        };
        fields.push((field.name.clone(), bound));
    }

    Ok(ArgumentValue::Object(fields))
}

fn coerce_items(
    value: &Value,
    item: &TypeShape,
    shapes: &ShapeIndex,
    path: &str,
) -> Result<Vec<ArgumentValue>, ToolError> {
    let elements = value
        .as_array()
        .ok_or_else(|| mismatch(path, "an array", value))?;

    elements
        .iter()
        .enumerate()
        .map(|(position, element)| coerce(element, item, shapes, &format!("{path}[{position}]")))
        .collect()
}

fn mismatch(path: &str, expected: &str, found: &Value) -> ToolError {
    ToolError::coercion(path, format!("expected {expected}, found {}", json_kind(found)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
