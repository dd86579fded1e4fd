use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use tfplug::{
    import_state_passthrough, AttributeBuilder, AttributeType, Diagnostic, Diagnostics,
    Resource, ResourceData, Schema, SchemaBuilder, StringLengthValidator,
};

/// Keeps remote objects in memory and counts writes
#[derive(Default)]
struct InMemoryResource {
    objects: Mutex<HashMap<String, String>>,
    writes: Mutex<usize>,
}

impl InMemoryResource {
    fn store(&self, id: &str, label: String) {
        self.objects.lock().unwrap().insert(id.to_string(), label);
        *self.writes.lock().unwrap() += 1;
    }

    fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }
}

#[async_trait]
impl Resource for InMemoryResource {
    fn type_name(&self) -> &str {
        "memory_object"
    }

    fn schema(&self) -> Schema {
        SchemaBuilder::new()
            .attribute(
                AttributeBuilder::new("label", AttributeType::String)
                    .optional()
                    .computed()
                    .validator(StringLengthValidator::between(1, 8))
                    .build(),
            )
            .build()
    }

    async fn create(&self, data: &mut ResourceData) -> Diagnostics {
        data.set_id("obj-1");
        self.store("obj-1", "default".to_string());
        let diags = self.read(data).await;
        if diags.has_error() {
            return diags;
        }
        self.update(data).await
    }

    async fn read(&self, data: &mut ResourceData) -> Diagnostics {
        let label = self.objects.lock().unwrap().get(data.id()).cloned();
        match label {
            Some(label) => match data.set("label", label) {
                Ok(()) => Diagnostics::new(),
                Err(e) => Diagnostic::error("failed to set label", e.to_string()).into(),
            },
            None => {
                data.clear_id();
                Diagnostics::new()
            }
        }
    }

    async fn update(&self, data: &mut ResourceData) -> Diagnostics {
        if !data.has_change("label") {
            return Diagnostics::new();
        }
        match data.planned_as::<String>("label") {
            Ok(Some(label)) => {
                self.store(data.id(), label.clone());
                match data.set("label", label) {
                    Ok(()) => Diagnostics::new(),
                    Err(e) => Diagnostic::error("failed to set label", e.to_string()).into(),
                }
            }
            Ok(None) => Diagnostics::new(),
            Err(e) => Diagnostic::error("invalid label", e.to_string()).into(),
        }
    }

    async fn delete(&self, data: &mut ResourceData) -> Diagnostics {
        self.objects.lock().unwrap().remove(data.id());
        Diagnostics::new()
    }
}

fn config(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn create_skips_write_when_plan_matches_seeded_value() {
    let resource = InMemoryResource::default();
    let mut data = ResourceData::new_resource(config(json!({"label": "default"})));

    let diags = resource.create(&mut data).await;

    assert!(!diags.has_error());
    assert_eq!(resource.writes(), 1);
    let state = data.into_state().unwrap();
    assert_eq!(state.get("label"), Some(&json!("default")));
    assert_eq!(state.get("id"), Some(&json!("obj-1")));
}

#[tokio::test]
async fn create_writes_when_plan_differs_from_seeded_value() {
    let resource = InMemoryResource::default();
    let mut data = ResourceData::new_resource(config(json!({"label": "custom"})));

    let diags = resource.create(&mut data).await;

    assert!(!diags.has_error());
    assert_eq!(resource.writes(), 2);
    assert_eq!(
        data.get_string("label").unwrap().as_deref(),
        Some("custom")
    );
}

#[tokio::test]
async fn update_without_planned_attribute_makes_no_write() {
    let resource = InMemoryResource::default();
    resource.store("obj-1", "kept".to_string());

    let prior = config(json!({"id": "obj-1", "label": "kept"}));
    let mut data = ResourceData::for_update(prior, Map::new());
    let diags = resource.update(&mut data).await;

    assert!(diags.is_empty());
    assert_eq!(resource.writes(), 1);
}

#[tokio::test]
async fn import_passthrough_reads_existing_object() {
    let resource = InMemoryResource::default();
    resource.store("obj-9", "imported".to_string());

    let (data, diags) = import_state_passthrough(&resource, "obj-9").await;

    assert!(diags.is_empty());
    let data = data.unwrap();
    assert_eq!(data.id(), "obj-9");
    assert!(!data.is_new_resource());
    assert_eq!(data.get_string("label").unwrap().as_deref(), Some("imported"));
}

#[tokio::test]
async fn import_passthrough_rejects_missing_object() {
    let resource = InMemoryResource::default();

    let (data, diags) = import_state_passthrough(&resource, "nope").await;

    assert!(data.is_none());
    assert!(diags.has_error());
    assert!(diags
        .errors()
        .any(|d| d.summary == "Cannot import non-existent remote object"));
}

#[test]
fn default_validate_uses_schema() {
    let resource = InMemoryResource::default();

    let diags = resource.validate(&config(json!({"label": "much-too-long"})));
    assert!(diags.has_error());
    assert_eq!(diags.iter().next().unwrap().summary, "label must have maximum length of 8");
}
