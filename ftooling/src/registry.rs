//! Tool registry: generated specifications plus execution metadata, keyed by
//! tool name in registration order.
//!
//! ```rust
//! use fschema::{ParameterShape, TypeShape};
//! use ftooling::{ToolDescriptor, ToolOutput, ToolRegistry};
//!
//! let registry = ToolRegistry::from_descriptors([
//!     ToolDescriptor::sync("add", |args, _| Ok(ToolOutput::from(args.i64("arg0")? + args.i64("arg1")?)))
//!         .parameter(ParameterShape::new(TypeShape::i32()))
//!         .parameter(ParameterShape::new(TypeShape::i32())),
//!     ToolDescriptor::sync("now", |_, _| Ok(ToolOutput::from("17:11:45"))),
//! ])
//! .expect("registry should build");
//!
//! let specifications = registry.specifications();
//! assert_eq!(specifications[0].name, "add");
//! assert!(specifications[1].parameters.is_none());
//! ```

use std::sync::Arc;

use fcommon::Registry;
use fprovider::ToolSpecification;
use fschema::{ParameterShape, ShapeIndex, generate_parameters_with};

use crate::tool::ToolHandler;
use crate::{ToolArguments, ToolDescriptor, ToolError, bind_arguments};

/// A registered tool. Shared read-only for the registry's lifetime.
pub struct ToolEntry {
    specification: ToolSpecification,
    parameters: Vec<ParameterShape>,
    shapes: ShapeIndex,
    handler: Arc<ToolHandler>,
    return_raw: bool,
    propagate_errors: bool,
}

impl ToolEntry {
    fn build(descriptor: ToolDescriptor) -> Result<Self, ToolError> {
        let name = descriptor.name().to_string();
        if name.trim().is_empty() {
            return Err(ToolError::invalid_definition("tool name must not be empty"));
        }

        let mut specification = ToolSpecification::new(&name);
        if let Some(description) = descriptor.description() {
            specification = specification.with_description(description);
        }

        let parameters = descriptor.parameters().to_vec();
        let shapes = ShapeIndex::collect(parameters.iter().map(|parameter| &parameter.shape));

        let generated = generate_parameters_with(&parameters, &shapes)
            .map_err(|err| ToolError::from(err).with_tool_name(&name))?;
        if let Some(generated) = generated {
            specification = specification.with_parameters(generated);
        }

        Ok(Self {
            specification,
            parameters,
            shapes,
            handler: descriptor.handler(),
            return_raw: descriptor.is_return_raw(),
            propagate_errors: descriptor.is_propagate_errors(),
        })
    }

    pub fn name(&self) -> &str {
        &self.specification.name
    }

    pub fn specification(&self) -> &ToolSpecification {
        &self.specification
    }

    pub fn parameters(&self) -> &[ParameterShape] {
        &self.parameters
    }

    pub fn return_raw(&self) -> bool {
        self.return_raw
    }

    pub fn propagate_errors(&self) -> bool {
        self.propagate_errors
    }

    /// Binds a call's arguments text against this tool's parameters.
    pub fn bind(&self, args_json: &str) -> Result<ToolArguments, ToolError> {
        bind_arguments(&self.parameters, &self.shapes, args_json)
    }

    pub(crate) fn handler(&self) -> &ToolHandler {
        self.handler.as_ref()
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("specification", &self.specification)
            .field("return_raw", &self.return_raw)
            .field("propagate_errors", &self.propagate_errors)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<ToolEntry>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_descriptors<I>(descriptors: I) -> Result<Self, ToolError>
    where
        I: IntoIterator<Item = ToolDescriptor>,
    {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, descriptor: ToolDescriptor) -> Result<(), ToolError> {
        if self.contains(descriptor.name()) {
            return Err(ToolError::duplicate_name(descriptor.name()));
        }

        let entry = ToolEntry::build(descriptor)?;
        let name = entry.name().to_string();
        self.tools
            .try_insert(name.clone(), Arc::new(entry))
            .map_err(|_| ToolError::duplicate_name(name))
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<ToolEntry>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn specifications(&self) -> Vec<ToolSpecification> {
        self.tools
            .values()
            .map(|entry| entry.specification.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
