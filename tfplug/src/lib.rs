//! tfplug - Terraform Plugin Framework for Rust
//!
//! The provider-facing surface of the plugin framework: schemas, resource
//! data with change tracking, diagnostics, validators and the resource and
//! provider traits. Wire protocol and plan computation live in Terraform.

// Core modules
pub mod error;
pub mod resource_data;
pub mod schema;
pub mod types;

// Provider API modules
pub mod provider;
pub mod resource;

// Helper modules
pub mod import;
pub mod validator;

// Re-exports for convenience
pub use error::{Result, TfplugError};
pub use import::import_state_passthrough;
pub use provider::Provider;
pub use resource::{Resource, ResourceWithImportState};
pub use resource_data::ResourceData;
pub use schema::{
    AttributeBuilder, AttributeType, Block, BlockBuilder, NestedBlock, Schema, SchemaBuilder,
};
pub use types::{AttributePath, Config, Diagnostic, DiagnosticSeverity, Diagnostics, State};
pub use validator::{
    NumberRangeValidator, StringInSliceValidator, StringLengthValidator, StringPatternValidator,
    Validator,
};
