//! Resource trait and related types
//!
//! Resources receive a `ResourceData` for every operation and report the
//! outcome through `Diagnostics`. Planning and diffing stay with Terraform.

use crate::resource_data::ResourceData;
use crate::schema::Schema;
use crate::types::{Config, Diagnostics};
use async_trait::async_trait;

/// Base trait for resources - implement CRUD operations
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name should be constant (e.g., "datadog_organization_settings")
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Called during plan to validate configuration
    fn validate(&self, config: &Config) -> Diagnostics {
        self.schema().validate(config)
    }

    /// MUST set the id and populate all computed attributes
    async fn create(&self, data: &mut ResourceData) -> Diagnostics;

    /// MUST clear the id when the remote object no longer exists
    async fn read(&self, data: &mut ResourceData) -> Diagnostics;

    async fn update(&self, data: &mut ResourceData) -> Diagnostics;

    async fn delete(&self, data: &mut ResourceData) -> Diagnostics;
}

/// Optional interface for import functionality
#[async_trait]
pub trait ResourceWithImportState: Resource {
    /// Called during "terraform import"; returns None when nothing was found
    async fn import_state(&self, id: &str) -> (Option<ResourceData>, Diagnostics);
}
