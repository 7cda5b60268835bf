//! Type definitions for the shared data module.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

use crate::content::{PlotlyChart, PlotlyFigure};

/// Prefix of the element id that carries a locally registered payload.
pub const SHARED_DATA_PREFIX: &str = "shared-data-";

/// Errors that can occur when registering shared data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedDataError {
    /// The payload is not a JSON object/array, JSON text, or JSON-exporting
    /// object.
    #[error("Shared data `{id}` is not JSON-serializable: {reason}")]
    SerializationError {
        /// The id the payload was registered under.
        id: String,
        /// Why the payload was rejected.
        reason: String,
    },

    /// The type tag is not `json` or `geojson`.
    #[error("Unknown shared data type: {0} (expected `json` or `geojson`)")]
    UnknownType(String),
}

/// Result type for shared data operations.
pub type SharedDataResult<T> = Result<T, SharedDataError>;

/// Type tag carried by a shared payload as its `data-type` attribute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SharedDataType {
    #[default]
    Json,
    Geojson,
}

impl SharedDataType {
    /// Parses a type tag, case-insensitively.
    pub fn parse(tag: &str) -> SharedDataResult<Self> {
        tag.to_ascii_lowercase()
            .parse()
            .map_err(|_| SharedDataError::UnknownType(tag.to_string()))
    }
}

/// An object that can export itself as JSON text.
pub trait JsonExport: fmt::Debug {
    fn to_json(&self) -> Result<String, serde_json::Error>;
}

impl<T: PlotlyFigure> JsonExport for T {
    fn to_json(&self) -> Result<String, serde_json::Error> {
        PlotlyFigure::to_json(self)
    }
}

/// A payload accepted by [`SharedDataStore::register`](super::SharedDataStore::register).
#[derive(Debug)]
pub enum SharedPayload {
    /// A parsed JSON object or array.
    Json(Value),
    /// Already-serialized JSON text.
    Text(String),
    /// An object with a JSON export capability.
    Export(Box<dyn JsonExport>),
}

impl From<Value> for SharedPayload {
    fn from(value: Value) -> Self {
        SharedPayload::Json(value)
    }
}

impl From<String> for SharedPayload {
    fn from(text: String) -> Self {
        SharedPayload::Text(text)
    }
}

impl From<&str> for SharedPayload {
    fn from(text: &str) -> Self {
        SharedPayload::Text(text.to_string())
    }
}

impl From<PlotlyChart> for SharedPayload {
    fn from(chart: PlotlyChart) -> Self {
        SharedPayload::Export(Box::new(chart))
    }
}

/// A named payload, canonicalized once at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedDatum {
    pub(super) id: String,
    pub(super) json: String,
    pub(super) data_type: SharedDataType,
}

impl SharedDatum {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The canonical (compact) JSON text of the payload.
    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn data_type(&self) -> SharedDataType {
        self.data_type
    }

    /// The id of the hidden element carrying this payload.
    pub fn element_id(&self) -> String {
        format!("{SHARED_DATA_PREFIX}{}", self.id)
    }

    /// The hidden element that carries this payload in the document.
    ///
    /// The payload is the element's text content, so markup-significant
    /// characters are entity-encoded; `textContent` decodes them again.
    pub fn to_element(&self) -> String {
        format!(
            r#"<div id="{}" style="display:none;" data-type="{}">{}</div>"#,
            html_escape::encode_double_quoted_attribute(&self.element_id()),
            self.data_type,
            html_escape::encode_text(&self.json)
        )
    }
}

/// Which element a chart script reads its shared data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataElementRef {
    /// Registered in this session; the element id is `shared-data-<id>`.
    Local(String),
    /// Unknown locally; the id is used verbatim as a document-global element id.
    Global(String),
}

impl DataElementRef {
    pub fn element_id(&self) -> &str {
        match self {
            DataElementRef::Local(id) | DataElementRef::Global(id) => id,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, DataElementRef::Local(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_data_type_names() {
        assert_eq!(SharedDataType::Geojson.to_string(), "geojson");
        assert_eq!(SharedDataType::from_str("json").unwrap(), SharedDataType::Json);
        assert_eq!(SharedDataType::parse("GeoJSON").unwrap(), SharedDataType::Geojson);
    }

    #[test]
    fn test_unknown_data_type() {
        assert_eq!(
            SharedDataType::parse("csv"),
            Err(SharedDataError::UnknownType("csv".to_string()))
        );
    }

    #[test]
    fn test_element_escapes_markup_in_payload() {
        let datum = SharedDatum {
            id: "notes".to_string(),
            json: r#"{"html":"<b>x</b>"}"#.to_string(),
            data_type: SharedDataType::Json,
        };
        let element = datum.to_element();
        assert!(element.starts_with(r#"<div id="shared-data-notes" style="display:none;" data-type="json">"#));
        assert!(element.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(!element.contains("<b>"));
    }

    #[test]
    fn test_data_element_ref() {
        let local = DataElementRef::Local("shared-data-geo".to_string());
        let global = DataElementRef::Global("geo".to_string());
        assert!(local.is_local());
        assert!(!global.is_local());
        assert_eq!(global.element_id(), "geo");
    }
}
