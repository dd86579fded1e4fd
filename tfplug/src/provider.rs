use crate::resource::Resource;
use crate::schema::Schema;
use crate::types::{Config, Diagnostics};
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Provider trait - configure once, then hand out configured resources
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider type name (e.g., "datadog")
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Called once with the provider block before any resource operation
    async fn configure(&mut self, config: Config) -> Diagnostics;

    /// Instantiate a configured resource by type name
    fn create_resource(&self, name: &str) -> Result<Box<dyn Resource>>;

    fn resource_schemas(&self) -> HashMap<String, Schema>;
}
