//! The record type shared across all feed sources.
//!
//! A `FeedItem` is one acquisition event: a flat, ordered mapping from field
//! name to value.  The field set is fixed by the feed (event metadata,
//! acquirer / acquiree company attributes, article metadata) but nothing in
//! the application depends on it; the table derives its columns from
//! whatever keys actually arrive.
//!
//! ## For contributors
//!
//! Values are kept as raw [`serde_json::Value`]s so unknown fields survive a
//! round trip untouched.  Formatting for display happens in
//! [`render_value`], not at parse time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single feed record, keys in the order the source sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedItem(Map<String, Value>);

impl FeedItem {
    /// Field names in their natural order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

/// The two-part "type / subtype" value carried by the `Acquisition Type`
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Categorical {
    #[serde(rename = "Acquisition Type")]
    pub kind: String,
    #[serde(rename = "Acquisition Sub Type", default)]
    pub sub_kind: Option<String>,
}

impl Categorical {
    /// Recognise a categorical pair by shape.  Anything that is not an
    /// object with a string `Acquisition Type` is rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        object.get("Acquisition Type")?.as_str()?;
        serde_json::from_value(value.clone()).ok()
    }

    pub fn label(&self) -> String {
        match self.sub_kind.as_deref() {
            Some(sub) if !sub.is_empty() => format!("{} - {sub}", self.kind),
            _ => self.kind.clone(),
        }
    }
}

/// Render one cell value as display text.
pub fn render_value(value: &Value) -> String {
    if let Some(pair) = Categorical::from_value(value) {
        return pair.label();
    }
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
