//! Per-operation view of a resource instance
//!
//! `ResourceData` layers three maps: the prior state recorded by Terraform,
//! the planned values coming from configuration, and the values observed
//! from the remote API during the current operation. Reads see observed
//! values first, then planned, then prior.

use crate::error::{Result, TfplugError};
use crate::types::State;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub const ID_ATTRIBUTE: &str = "id";

#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    id: String,
    prior: Map<String, Value>,
    planned: Map<String, Value>,
    observed: Map<String, Value>,
    new_resource: bool,
}

impl ResourceData {
    /// Data for a resource that does not exist yet
    pub fn new_resource(planned: Map<String, Value>) -> Self {
        Self {
            planned,
            new_resource: true,
            ..Self::default()
        }
    }

    /// Data for refresh and delete of an existing resource
    pub fn from_state(prior: State) -> Self {
        let id = prior
            .get(ID_ATTRIBUTE)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            id,
            prior,
            ..Self::default()
        }
    }

    /// Data for an in-place update from `prior` towards `planned`
    pub fn for_update(prior: State, planned: Map<String, Value>) -> Self {
        Self {
            planned,
            ..Self::from_state(prior)
        }
    }

    /// Data holding nothing but an identifier, as produced by import
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// An empty id tells Terraform the remote object is gone
    pub fn clear_id(&mut self) {
        self.id.clear();
    }

    pub fn is_new_resource(&self) -> bool {
        self.new_resource
    }

    /// Value as seen by the provider: observed, then planned, then prior
    pub fn get(&self, key: &str) -> Option<&Value> {
        non_null(self.observed.get(key))
            .or_else(|| non_null(self.planned.get(key)))
            .or_else(|| non_null(self.prior.get(key)))
    }

    /// Like `get`, but zero values (empty strings, empty lists, false) count as unset
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !is_zero(v))
    }

    /// Last value recorded for the remote object, ignoring the plan
    pub fn recorded(&self, key: &str) -> Option<&Value> {
        non_null(self.observed.get(key)).or_else(|| non_null(self.prior.get(key)))
    }

    /// Value requested by configuration, if any
    pub fn planned(&self, key: &str) -> Option<&Value> {
        non_null(self.planned.get(key))
    }

    /// Returns (recorded, planned)
    pub fn get_change(&self, key: &str) -> (Option<&Value>, Option<&Value>) {
        (self.recorded(key), self.planned(key))
    }

    /// True when configuration asks for a value that differs from the recorded one.
    /// Attributes left out of the configuration never count as changed.
    pub fn has_change(&self, key: &str) -> bool {
        match self.get_change(key) {
            (_, None) => false,
            (recorded, Some(planned)) => recorded != Some(planned),
        }
    }

    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.get(key).map(|v| decode(key, v)).transpose()
    }

    pub fn planned_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        self.planned(key).map(|v| decode(key, v)).transpose()
    }

    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        self.get_as(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.get_as(key)
    }

    /// Records a value observed from the remote API
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value)
            .map_err(|e| TfplugError::EncodingError(format!("{}: {}", key, e)))?;
        tracing::trace!("setting attribute {}", key);
        self.observed.insert(key.to_string(), value);
        Ok(())
    }

    /// Final state to persist, or None when the resource no longer exists
    pub fn into_state(self) -> Option<State> {
        if self.id.is_empty() {
            return None;
        }

        let mut state = self.prior;
        for (key, value) in self.planned.into_iter().chain(self.observed) {
            if !value.is_null() {
                state.insert(key, value);
            }
        }
        state.insert(ID_ATTRIBUTE.to_string(), Value::String(self.id));
        Some(state)
    }
}

fn non_null(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
    serde_json::from_value(value.clone()).map_err(|e| TfplugError::TypeMismatch {
        attribute: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn new_resource_reports_planned_values_as_changes() {
        let data = ResourceData::new_resource(map(json!({"name": "acme"})));

        assert!(data.is_new_resource());
        assert!(data.id().is_empty());
        assert!(data.has_change("name"));
        assert!(!data.has_change("description"));
        assert_eq!(data.get_string("name").unwrap().as_deref(), Some("acme"));
    }

    #[test]
    fn observed_value_becomes_the_recorded_baseline() {
        let mut data =
            ResourceData::new_resource(map(json!({"contacts": ["a@x.com"]})));

        data.set("contacts", vec!["a@x.com"]).unwrap();
        assert!(!data.has_change("contacts"));

        data.set("contacts", vec!["b@x.com"]).unwrap();
        assert!(data.has_change("contacts"));
        let (old, new) = data.get_change("contacts");
        assert_eq!(old, Some(&json!(["b@x.com"])));
        assert_eq!(new, Some(&json!(["a@x.com"])));
    }

    #[test]
    fn update_compares_plan_against_prior_state() {
        let prior = map(json!({"id": "abc", "name": "old", "contacts": ["a@x.com"]}));
        let planned = map(json!({"name": "new", "contacts": ["a@x.com"]}));
        let data = ResourceData::for_update(prior, planned);

        assert_eq!(data.id(), "abc");
        assert!(!data.is_new_resource());
        assert!(data.has_change("name"));
        assert!(!data.has_change("contacts"));
    }

    #[test]
    fn unplanned_attribute_falls_back_to_prior() {
        let prior = map(json!({"id": "abc", "description": "computed"}));
        let data = ResourceData::for_update(prior, Map::new());

        assert!(!data.has_change("description"));
        assert_eq!(
            data.get_string("description").unwrap().as_deref(),
            Some("computed")
        );
    }

    #[test]
    fn get_ok_skips_zero_values() {
        let data = ResourceData::new_resource(map(json!({"name": "", "flag": false, "n": 1})));

        assert!(data.get("name").is_some());
        assert!(data.get_ok("name").is_none());
        assert!(data.get_ok("flag").is_none());
        assert!(data.get_ok("n").is_some());
    }

    #[test]
    fn get_as_reports_type_mismatch() {
        let data = ResourceData::new_resource(map(json!({"name": 42})));

        let err = data.get_string("name").unwrap_err();
        assert!(matches!(err, TfplugError::TypeMismatch { ref attribute, .. } if attribute == "name"));
    }

    #[test]
    fn into_state_merges_layers_and_id() {
        let prior = map(json!({"id": "abc", "a": 1, "b": 1}));
        let planned = map(json!({"b": 2, "c": 2}));
        let mut data = ResourceData::for_update(prior, planned);
        data.set("c", 3).unwrap();

        let state = data.into_state().unwrap();
        assert_eq!(state.get("a"), Some(&json!(1)));
        assert_eq!(state.get("b"), Some(&json!(2)));
        assert_eq!(state.get("c"), Some(&json!(3)));
        assert_eq!(state.get("id"), Some(&json!("abc")));
    }

    #[test]
    fn cleared_id_drops_state() {
        let mut data = ResourceData::from_state(map(json!({"id": "abc"})));
        data.clear_id();

        assert!(data.into_state().is_none());
    }
}
