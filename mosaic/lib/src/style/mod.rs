//! Style and class specifications encoded as HTML attribute text.
//!
//! A [`StyleSpec`] is an ordered mapping from attribute name to value. The
//! `class` key is special: its value is a string or a list of strings that
//! becomes a single `class` attribute. Every other key is a CSS property
//! name written with underscores (`font_size`) and is emitted with hyphens
//! (`font-size`) inside one `style` attribute.
//!
//! ## Examples
//!
//! ```
//! use mosaic_lib::style::{StyleSpec, encode};
//!
//! let spec = StyleSpec::new()
//!     .with("font_size", "20px")
//!     .with("color", "blue")
//!     .with_class("lead");
//!
//! assert_eq!(
//!     encode(&spec).unwrap(),
//!     "style='font-size: 20px;color: blue;' class='lead'"
//! );
//! ```

mod types;

pub use types::{StyleError, StyleResult};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The class every image-bearing fragment carries.
pub const IMG_FLUID: &str = "img-fluid";

/// An ordered style/class specification.
///
/// Values are kept as JSON values so that callers (and the CLI, which reads
/// styles as JSON) can hand over anything; validation happens in [`encode`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSpec(Map<String, Value>);

impl StyleSpec {
    /// Creates an empty specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value for that key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Appends a class to the `class` entry.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.append_class(class);
        self
    }

    /// Sets `key` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Appends `class` to the `class` entry.
    ///
    /// A missing entry becomes a one-element list and a string entry becomes
    /// a list holding the original string followed by the new class. An entry
    /// of any other shape is left untouched so that [`encode`] reports it.
    pub fn append_class(&mut self, class: impl Into<String>) {
        let class = Value::String(class.into());
        match self.0.get_mut("class") {
            Some(Value::Array(classes)) => classes.push(class),
            Some(existing) if existing.is_string() => {
                let previous = existing.take();
                *existing = Value::Array(vec![previous, class]);
            }
            Some(_) => {}
            None => {
                self.0.insert("class".to_string(), Value::Array(vec![class]));
            }
        }
    }

    /// Merges `other` into this specification.
    ///
    /// Classes from `other` are appended to this specification's classes;
    /// every other key from `other` replaces the existing value. A malformed
    /// class in `other` replaces the class entry so that [`encode`] reports
    /// it.
    pub fn merge(&mut self, other: &StyleSpec) {
        for (key, value) in other.iter() {
            if key != "class" {
                self.insert(key.clone(), value.clone());
                continue;
            }
            match value {
                Value::String(classes) => {
                    for class in classes.split_whitespace() {
                        self.append_class(class);
                    }
                }
                Value::Array(classes) if classes.iter().all(Value::is_string) => {
                    for class in classes.iter().filter_map(Value::as_str) {
                        self.append_class(class);
                    }
                }
                malformed => {
                    self.insert("class", malformed.clone());
                }
            }
        }
    }

    /// Encodes this specification as attribute text. See [`encode`].
    pub fn encode(&self) -> StyleResult<String> {
        encode(self)
    }
}

impl From<Map<String, Value>> for StyleSpec {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for StyleSpec {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Encodes a [`StyleSpec`] as HTML attribute text.
///
/// Non-class entries are collected into `style='k: v;...'` (underscores in
/// keys become hyphens) and the class entry becomes `class='a b'`. The style
/// attribute comes first. An empty specification encodes to an empty string.
///
/// ## Errors
///
/// Returns [`StyleError::InvalidStyleValue`] when a non-class value is not a
/// string or a number, or when the class value is not a string or a list of
/// strings.
///
/// ## Examples
///
/// ```
/// use mosaic_lib::style::{StyleSpec, encode};
///
/// let list = StyleSpec::new().with("class", vec!["a", "b"]);
/// let text = StyleSpec::new().with("class", "a b");
/// assert_eq!(encode(&list).unwrap(), "class='a b'");
/// assert_eq!(encode(&list).unwrap(), encode(&text).unwrap());
///
/// let bad = StyleSpec::new().with("font_size", vec![1, 2]);
/// assert!(encode(&bad).is_err());
/// ```
pub fn encode(spec: &StyleSpec) -> StyleResult<String> {
    let mut style = String::new();
    let mut class: Option<String> = None;

    for (key, value) in spec.iter() {
        if key == "class" {
            class = Some(encode_class(value)?);
            continue;
        }

        let css_value = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => {
                return Err(StyleError::InvalidStyleValue {
                    key: key.clone(),
                    reason: "the value must be a string or a number",
                });
            }
        };
        style.push_str(&key.replace('_', "-"));
        style.push_str(": ");
        style.push_str(&css_value);
        style.push(';');
    }

    let mut parts = Vec::with_capacity(2);
    if !style.is_empty() {
        parts.push(format!(
            "style='{}'",
            html_escape::encode_single_quoted_attribute(&style)
        ));
    }
    if let Some(class) = class {
        parts.push(format!(
            "class='{}'",
            html_escape::encode_single_quoted_attribute(&class)
        ));
    }

    Ok(parts.join(" "))
}

fn encode_class(value: &Value) -> StyleResult<String> {
    let invalid = || StyleError::InvalidStyleValue {
        key: "class".to_string(),
        reason: "the class must be a string or a list of strings",
    };

    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().ok_or_else(invalid))
            .collect::<StyleResult<Vec<_>>>()
            .map(|classes| classes.join(" ")),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_spec_encodes_to_nothing() {
        assert_eq!(encode(&StyleSpec::new()).unwrap(), "");
    }

    #[test]
    fn test_class_list_and_string_are_equivalent() {
        let list = StyleSpec::new().with("class", json!(["a", "b"]));
        let text = StyleSpec::new().with("class", "a b");

        assert_eq!(encode(&list).unwrap(), "class='a b'");
        assert_eq!(encode(&text).unwrap(), "class='a b'");
    }

    #[test]
    fn test_underscores_become_hyphens() {
        let spec = StyleSpec::new().with("background_color", "white");
        assert_eq!(encode(&spec).unwrap(), "style='background-color: white;'");
    }

    #[test]
    fn test_numbers_are_scalars() {
        let spec = StyleSpec::new().with("opacity", 0.5).with("z_index", 3);
        assert_eq!(encode(&spec).unwrap(), "style='opacity: 0.5;z-index: 3;'");
    }

    #[test]
    fn test_style_precedes_class_regardless_of_order() {
        let spec = StyleSpec::new().with_class("lead").with("color", "red");
        assert_eq!(encode(&spec).unwrap(), "style='color: red;' class='lead'");
    }

    #[test]
    fn test_list_value_is_rejected() {
        let spec = StyleSpec::new().with("font_size", json!([1, 2]));
        let err = encode(&spec).unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidStyleValue {
                key: "font_size".to_string(),
                reason: "the value must be a string or a number",
            }
        );
    }

    #[test]
    fn test_bool_and_null_values_are_rejected() {
        assert!(encode(&StyleSpec::new().with("hidden", true)).is_err());
        assert!(encode(&StyleSpec::new().with("color", Value::Null)).is_err());
    }

    #[test]
    fn test_malformed_class_is_rejected() {
        assert!(encode(&StyleSpec::new().with("class", 3)).is_err());
        assert!(encode(&StyleSpec::new().with("class", json!(["a", 1]))).is_err());
    }

    #[test]
    fn test_single_quotes_are_escaped() {
        let spec = StyleSpec::new().with("font_family", "'Fira Sans'");
        let encoded = encode(&spec).unwrap();
        assert!(!encoded.contains("''"));
        assert!(encoded.starts_with("style='font-family: "));
    }

    #[test]
    fn test_append_class_to_missing_entry() {
        let mut spec = StyleSpec::new();
        spec.append_class(IMG_FLUID);
        assert_eq!(spec.get("class"), Some(&json!(["img-fluid"])));
    }

    #[test]
    fn test_append_class_to_string_entry() {
        let mut spec = StyleSpec::new().with("class", "card");
        spec.append_class(IMG_FLUID);
        assert_eq!(encode(&spec).unwrap(), "class='card img-fluid'");
    }

    #[test]
    fn test_append_class_keeps_invalid_entry_for_encode() {
        let mut spec = StyleSpec::new().with("class", 7);
        spec.append_class(IMG_FLUID);
        assert!(encode(&spec).is_err());
    }

    #[test]
    fn test_merge_appends_classes_and_overrides_styles() {
        let mut spec = StyleSpec::new().with_class("col-md-6").with("color", "red");
        spec.merge(&StyleSpec::new().with("color", "blue").with("class", "lead small"));
        assert_eq!(
            encode(&spec).unwrap(),
            "style='color: blue;' class='col-md-6 lead small'"
        );
    }

    #[test]
    fn test_merge_keeps_malformed_class_for_encode() {
        let mut spec = StyleSpec::new().with_class("row");
        spec.merge(&StyleSpec::new().with("class", json!([1])));
        assert!(encode(&spec).is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let spec: StyleSpec =
            serde_json::from_str(r#"{"color":"blue","class":["x","y"]}"#).unwrap();
        assert_eq!(encode(&spec).unwrap(), "style='color: blue;' class='x y'");
    }
}
