//! Session-scoped store of named JSON payloads shared between charts.
//!
//! A large payload (typically a GeoJSON boundary set) is registered once
//! under an id and emitted as a hidden element, `shared-data-<id>`. Chart
//! fragments then reference the id instead of embedding the payload; the
//! merge happens in the browser when the chart is drawn.
//!
//! Lookups are two-tier: an id registered in this store resolves to its
//! `shared-data-<id>` element, and any other id is passed through verbatim as
//! a document-global element id that is expected to exist elsewhere in the
//! final document.
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::shared_data::{DataElementRef, SharedDataStore, SharedDataType};
//! use serde_json::json;
//!
//! let mut store = SharedDataStore::new();
//! store
//!     .register("geo1", json!({"type": "FeatureCollection", "features": []}), SharedDataType::Geojson)
//!     .unwrap();
//!
//! assert!(store.has("geo1"));
//! assert_eq!(store.resolve("geo1"), DataElementRef::Local("shared-data-geo1".to_string()));
//! assert_eq!(store.resolve("world"), DataElementRef::Global("world".to_string()));
//! ```

mod types;

pub use types::{
    DataElementRef, JsonExport, SHARED_DATA_PREFIX, SharedDataError, SharedDataResult,
    SharedDataType, SharedDatum, SharedPayload,
};

use std::collections::HashMap;

use serde_json::Value;

/// Named JSON payloads for one rendering session.
///
/// Entries keep their first-registration order; re-registering an id
/// replaces its payload in place (last write wins, no merge).
#[derive(Debug, Clone, Default)]
pub struct SharedDataStore {
    entries: Vec<SharedDatum>,
    index: HashMap<String, usize>,
}

impl SharedDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `payload` under `id`.
    ///
    /// JSON text and exported JSON are parsed and re-serialized compactly so
    /// that every stored payload is canonical.
    ///
    /// ## Errors
    ///
    /// Returns [`SharedDataError::SerializationError`] when the payload is a
    /// JSON scalar, text that is not valid JSON, or an object whose export
    /// fails.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        payload: impl Into<SharedPayload>,
        data_type: SharedDataType,
    ) -> SharedDataResult<&SharedDatum> {
        let id = id.into();
        let json = canonicalize(&id, payload.into())?;

        tracing::debug!(id = %id, %data_type, bytes = json.len(), "Registered shared data");

        let datum = SharedDatum {
            id: id.clone(),
            json,
            data_type,
        };

        let slot = match self.index.get(&id) {
            Some(&slot) => {
                tracing::debug!(id = %id, "Replacing previously registered shared data");
                self.entries[slot] = datum;
                slot
            }
            None => {
                self.entries.push(datum);
                let slot = self.entries.len() - 1;
                self.index.insert(id, slot);
                slot
            }
        };

        Ok(&self.entries[slot])
    }

    /// Returns `true` if `id` is registered in this store.
    pub fn has(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&SharedDatum> {
        self.index.get(id).map(|&slot| &self.entries[slot])
    }

    /// Resolves `id` to the element a chart script should read.
    ///
    /// Never fails: unknown ids fall back to [`DataElementRef::Global`].
    pub fn resolve(&self, id: &str) -> DataElementRef {
        match self.get(id) {
            Some(datum) => DataElementRef::Local(datum.element_id()),
            None => {
                tracing::warn!(
                    id = %id,
                    "Shared data id is not registered in this session; referencing it as a global element id"
                );
                DataElementRef::Global(id.to_string())
            }
        }
    }

    /// Iterates registered payloads in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &SharedDatum> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every registration.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// The hidden elements for every registered payload, concatenated.
    pub fn elements_html(&self) -> String {
        self.entries.iter().map(SharedDatum::to_element).collect()
    }
}

fn canonicalize(id: &str, payload: SharedPayload) -> SharedDataResult<String> {
    let rejected = |reason: String| SharedDataError::SerializationError {
        id: id.to_string(),
        reason,
    };

    let value = match payload {
        SharedPayload::Json(value) => value,
        SharedPayload::Text(text) => serde_json::from_str(&text)
            .map_err(|e| rejected(format!("text is not valid JSON: {e}")))?,
        SharedPayload::Export(object) => {
            let text = object
                .to_json()
                .map_err(|e| rejected(format!("JSON export failed: {e}")))?;
            serde_json::from_str(&text)
                .map_err(|e| rejected(format!("exported text is not valid JSON: {e}")))?
        }
    };

    match value {
        Value::Object(_) | Value::Array(_) => Ok(value.to_string()),
        other => Err(rejected(format!(
            "expected a JSON object or array, found `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PlotlyChart;
    use serde_json::json;
    use tracing_test::traced_test;

    #[test]
    fn test_register_and_get() {
        let mut store = SharedDataStore::new();
        let datum = store
            .register("geo1", json!({"type": "FeatureCollection", "features": []}), SharedDataType::Geojson)
            .unwrap();

        assert_eq!(datum.element_id(), "shared-data-geo1");
        assert_eq!(datum.data_type(), SharedDataType::Geojson);
        assert!(store.has("geo1"));
        assert_eq!(
            store.get("geo1").unwrap().json(),
            r#"{"type":"FeatureCollection","features":[]}"#
        );
    }

    #[test]
    fn test_element_carries_id_and_type() {
        let mut store = SharedDataStore::new();
        let element = store
            .register("geo1", json!({"features": []}), SharedDataType::Geojson)
            .unwrap()
            .to_element();

        assert!(element.contains(r#"id="shared-data-geo1""#));
        assert!(element.contains(r#"data-type="geojson""#));
        assert!(element.contains(r#"style="display:none;""#));
    }

    #[test]
    fn test_text_payload_is_canonicalized() {
        let mut store = SharedDataStore::new();
        store
            .register("cfg", "{ \"a\" : [1, 2] }", SharedDataType::Json)
            .unwrap();
        assert_eq!(store.get("cfg").unwrap().json(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_exported_payload() {
        let mut store = SharedDataStore::new();
        let chart = PlotlyChart::new(vec![json!({"type": "bar"})], json!({}));
        store.register("chart", chart, SharedDataType::Json).unwrap();
        assert_eq!(
            store.get("chart").unwrap().json(),
            r#"{"data":[{"type":"bar"}],"layout":{}}"#
        );
    }

    #[test]
    fn test_invalid_payloads_are_rejected() {
        let mut store = SharedDataStore::new();

        let err = store.register("n", json!(42), SharedDataType::Json).unwrap_err();
        assert!(matches!(err, SharedDataError::SerializationError { ref id, .. } if id == "n"));

        assert!(store.register("t", "not json", SharedDataType::Json).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_reregistration_overwrites_in_place() {
        let mut store = SharedDataStore::new();
        store.register("a", json!({"v": 1}), SharedDataType::Json).unwrap();
        store.register("b", json!({"v": 2}), SharedDataType::Json).unwrap();
        store.register("a", json!({"v": 3}), SharedDataType::Geojson).unwrap();

        assert_eq!(store.len(), 2);
        let ids: Vec<_> = store.iter().map(SharedDatum::id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().json(), r#"{"v":3}"#);
        assert_eq!(store.get("a").unwrap().data_type(), SharedDataType::Geojson);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = SharedDataStore::new();
        store.register("a", json!([1]), SharedDataType::Json).unwrap();
        store.clear();
        assert!(!store.has("a"));
        assert_eq!(store.elements_html(), "");
    }

    #[test]
    fn test_resolve_local() {
        let mut store = SharedDataStore::new();
        store.register("geo1", json!({}), SharedDataType::Geojson).unwrap();
        assert_eq!(
            store.resolve("geo1"),
            DataElementRef::Local("shared-data-geo1".to_string())
        );
    }

    #[traced_test]
    #[test]
    fn test_resolve_falls_back_to_global() {
        let store = SharedDataStore::new();
        assert_eq!(
            store.resolve("world-borders"),
            DataElementRef::Global("world-borders".to_string())
        );
        assert!(logs_contain("referencing it as a global element id"));
    }

    #[test]
    fn test_elements_html_in_registration_order() {
        let mut store = SharedDataStore::new();
        store.register("first", json!({}), SharedDataType::Json).unwrap();
        store.register("second", json!([]), SharedDataType::Json).unwrap();
        let html = store.elements_html();
        let first = html.find("shared-data-first").unwrap();
        let second = html.find("shared-data-second").unwrap();
        assert!(first < second);
    }
}
