//! Schema types and builders for tfplug
//!
//! This module provides the schema system for declaring resource and
//! provider schemas: attribute types, nested list blocks, defaults and
//! configuration validation.

use crate::types::{AttributePath, Config, Diagnostic, Diagnostics};
use crate::validator::Validator;
use serde_json::{Map, Value};
use std::sync::Arc;

/// AttributeType defines the type system for Terraform attributes
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Number,
    Bool,
    List(Box<AttributeType>),
}

/// Schema is returned by providers and resources
/// Version is used for state migration
#[derive(Debug, Clone)]
pub struct Schema {
    pub version: i64,
    pub block: Block,
}

impl Schema {
    /// Validates a configuration against the root block
    pub fn validate(&self, config: &Config) -> Diagnostics {
        let mut diagnostics = Diagnostics::new();
        self.block
            .validate(config, &AttributePath::root(), &mut diagnostics);
        diagnostics
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.block.attributes.iter().find(|a| a.name == name)
    }

    pub fn block_type(&self, name: &str) -> Option<&NestedBlock> {
        self.block.block_types.iter().find(|b| b.type_name == name)
    }
}

/// Block represents a configuration block
#[derive(Debug, Clone, Default)]
pub struct Block {
    pub attributes: Vec<Attribute>,
    pub block_types: Vec<NestedBlock>,
    pub description: String,
}

impl Block {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn block_type(&self, name: &str) -> Option<&NestedBlock> {
        self.block_types.iter().find(|b| b.type_name == name)
    }

    fn validate(
        &self,
        values: &Map<String, Value>,
        base: &AttributePath,
        diagnostics: &mut Diagnostics,
    ) {
        for attr in &self.attributes {
            let path = base.clone().attribute(&attr.name);
            match values.get(&attr.name).filter(|v| !v.is_null()) {
                None => {
                    if attr.required {
                        diagnostics.push(
                            Diagnostic::error(
                                "Missing required argument",
                                format!(
                                    "The argument \"{}\" is required, but no definition was found.",
                                    path
                                ),
                            )
                            .with_attribute(path),
                        );
                    }
                }
                Some(value) => {
                    if attr.computed && !attr.optional && !attr.required {
                        diagnostics.push(
                            Diagnostic::error(
                                "Value for unconfigurable attribute",
                                format!("Can't configure a value for \"{}\": its value will be decided automatically.", path),
                            )
                            .with_attribute(path),
                        );
                        continue;
                    }
                    for validator in &attr.validators {
                        validator.validate(value, &path, diagnostics);
                    }
                    if let Some(items) = value.as_array() {
                        for (idx, item) in items.iter().enumerate() {
                            let item_path = path.clone().index(idx);
                            for validator in &attr.element_validators {
                                validator.validate(item, &item_path, diagnostics);
                            }
                        }
                    }
                }
            }
        }

        for nested in &self.block_types {
            let path = base.clone().attribute(&nested.type_name);
            let items: Vec<&Map<String, Value>> = match values.get(&nested.type_name) {
                None | Some(Value::Null) => Vec::new(),
                Some(Value::Array(items)) => items.iter().filter_map(Value::as_object).collect(),
                Some(_) => {
                    diagnostics.push(
                        Diagnostic::error(
                            "Incorrect attribute value type",
                            format!("Inappropriate value for block \"{}\"", path),
                        )
                        .with_attribute(path),
                    );
                    continue;
                }
            };

            if items.len() < nested.min_items {
                diagnostics.push(
                    Diagnostic::error(
                        format!("Insufficient {} blocks", nested.type_name),
                        format!(
                            "At least {} \"{}\" blocks are required.",
                            nested.min_items, nested.type_name
                        ),
                    )
                    .with_attribute(path.clone()),
                );
            }
            if nested.max_items > 0 && items.len() > nested.max_items {
                diagnostics.push(
                    Diagnostic::error(
                        format!("Too many {} blocks", nested.type_name),
                        format!(
                            "No more than {} \"{}\" blocks are allowed.",
                            nested.max_items, nested.type_name
                        ),
                    )
                    .with_attribute(path.clone()),
                );
            }

            for (idx, item) in items.into_iter().enumerate() {
                nested
                    .block
                    .validate(item, &path.clone().index(idx), diagnostics);
            }
        }
    }
}

/// Attribute represents a single configuration attribute
#[derive(Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub default: Option<Value>,
    pub validators: Vec<Arc<dyn Validator>>,
    /// Applied to every element of a list attribute
    pub element_validators: Vec<Arc<dyn Validator>>,
}

// Manual Debug implementation since validators don't implement Debug
impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field("default", &self.default)
            .field(
                "validators",
                &format!(
                    "{} validators",
                    self.validators.len() + self.element_validators.len()
                ),
            )
            .finish()
    }
}

/// NestedBlock represents a nested list of configuration blocks
#[derive(Debug, Clone)]
pub struct NestedBlock {
    pub type_name: String,
    pub block: Block,
    pub min_items: usize,
    /// Zero means unbounded
    pub max_items: usize,
    pub computed: bool,
}

impl NestedBlock {
    pub fn list(type_name: &str, block: Block) -> Self {
        Self {
            type_name: type_name.to_string(),
            block,
            min_items: 0,
            max_items: 0,
            computed: false,
        }
    }

    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = min;
        self
    }

    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = max;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }
}

/// AttributeBuilder provides fluent API for building attributes
pub struct AttributeBuilder {
    attribute: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attribute: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                default: None,
                validators: Vec::new(),
                element_validators: Vec::new(),
            },
        }
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.attribute.description = desc.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.attribute.required = true;
        self.attribute.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attribute.optional = true;
        self.attribute.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attribute.computed = true;
        self
    }

    /// Mark as sensitive (hidden)
    pub fn sensitive(mut self) -> Self {
        self.attribute.sensitive = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.attribute.default = Some(value.into());
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.attribute.validators.push(Arc::new(validator));
        self
    }

    pub fn element_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.attribute.element_validators.push(Arc::new(validator));
        self
    }

    pub fn build(self) -> Attribute {
        self.attribute
    }
}

/// BlockBuilder provides fluent API for nested block contents
#[derive(Default)]
pub struct BlockBuilder {
    block: Block,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.block.attributes.push(attr);
        self
    }

    pub fn block(mut self, nested: NestedBlock) -> Self {
        self.block.block_types.push(nested);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.block.description = desc.to_string();
        self
    }

    pub fn build(self) -> Block {
        self.block
    }
}

/// SchemaBuilder provides fluent API for building schemas
#[derive(Default)]
pub struct SchemaBuilder {
    version: i64,
    block: BlockBuilder,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.block = self.block.attribute(attr);
        self
    }

    pub fn block(mut self, nested: NestedBlock) -> Self {
        self.block = self.block.block(nested);
        self
    }

    pub fn description(mut self, desc: &str) -> Self {
        self.block = self.block.description(desc);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            version: self.version,
            block: self.block.build(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::StringLengthValidator;
    use serde_json::json;

    fn config(value: Value) -> Config {
        value.as_object().cloned().unwrap()
    }

    fn sample_schema() -> Schema {
        SchemaBuilder::new()
            .version(1)
            .description("Test resource schema")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("name", AttributeType::String)
                    .required()
                    .validator(StringLengthValidator::between(1, 5))
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("tags", AttributeType::List(Box::new(AttributeType::String)))
                    .optional()
                    .element_validator(StringLengthValidator::between(1, 3))
                    .build(),
            )
            .block(
                NestedBlock::list(
                    "options",
                    BlockBuilder::new()
                        .attribute(
                            AttributeBuilder::new("enabled", AttributeType::Bool)
                                .optional()
                                .default(false)
                                .build(),
                        )
                        .block(
                            NestedBlock::list(
                                "inner",
                                BlockBuilder::new()
                                    .attribute(
                                        AttributeBuilder::new("flag", AttributeType::Bool)
                                            .optional()
                                            .build(),
                                    )
                                    .build(),
                            )
                            .min_items(1)
                            .max_items(1),
                        )
                        .build(),
                )
                .max_items(1)
                .computed(),
            )
            .build()
    }

    #[test]
    fn attribute_builder_creates_required_string() {
        let attr = AttributeBuilder::new("name", AttributeType::String)
            .description("The name of the resource")
            .required()
            .build();

        assert_eq!(attr.name, "name");
        assert!(matches!(attr.r#type, AttributeType::String));
        assert!(attr.required);
        assert!(!attr.optional);
        assert_eq!(attr.description, "The name of the resource");
    }

    #[test]
    fn schema_builder_creates_schema_with_attributes() {
        let schema = sample_schema();

        assert_eq!(schema.version, 1);
        assert_eq!(schema.block.attributes.len(), 3);
        assert_eq!(schema.block.description, "Test resource schema");
        assert!(schema.attribute("id").unwrap().computed);
        let options = schema.block_type("options").unwrap();
        assert_eq!(options.max_items, 1);
        assert_eq!(
            options.block.attribute("enabled").unwrap().default,
            Some(json!(false))
        );
    }

    #[test]
    fn validate_accepts_valid_config() {
        let diags = sample_schema().validate(&config(json!({
            "name": "abc",
            "tags": ["a", "bc"],
            "options": [{"enabled": true, "inner": [{"flag": true}]}]
        })));
        assert!(diags.is_empty(), "{:?}", diags);
    }

    #[test]
    fn validate_reports_missing_required_and_computed_only() {
        let diags = sample_schema().validate(&config(json!({"id": "x"})));

        let summaries: Vec<_> = diags.iter().map(|d| d.summary.as_str()).collect();
        assert!(summaries.contains(&"Missing required argument"));
        assert!(summaries.contains(&"Value for unconfigurable attribute"));
    }

    #[test]
    fn validate_runs_element_validators_with_index_paths() {
        let diags = sample_schema().validate(&config(json!({
            "name": "abc",
            "tags": ["ok", "toolong"]
        })));

        assert_eq!(diags.errors().count(), 1);
        let attribute = diags.iter().next().unwrap().attribute.clone().unwrap();
        assert_eq!(attribute.to_string(), "tags.1");
    }

    #[test]
    fn validate_checks_nested_block_counts() {
        let diags = sample_schema().validate(&config(json!({
            "name": "abc",
            "options": [{"enabled": true}, {"enabled": false, "inner": [{}]}]
        })));

        let summaries: Vec<_> = diags.iter().map(|d| d.summary.clone()).collect();
        assert!(summaries.contains(&"Too many options blocks".to_string()));
        assert!(summaries.contains(&"Insufficient inner blocks".to_string()));
    }
}
