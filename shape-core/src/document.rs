//! Scene document - the JSON form of a scene used for export and import.
//!
//! A document is a JSON array with one object per shape, in registry order:
//!
//! ```json
//! [
//!   { "type": "rect", "position": [1.0, 2.0, 0.0], "color": [0.1, 0.2, 0.3] }
//! ]
//! ```
//!
//! Import is lenient per entry: an entry that fails validation is reported
//! in [`ImportReport::rejected`] and the rest of the document still loads.
//! Only a payload that is not a JSON array fails as a whole.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{Color, EditorError, EditorResult, Position, Shape, ShapeKind};

/// One shape as stored in a scene document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeDocument {
    /// Shape kind literal.
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    /// Position as `[x, y, z]`.
    pub position: Position,
    /// Color as `[r, g, b]`.
    pub color: Color,
}

impl From<&Shape> for ShapeDocument {
    fn from(shape: &Shape) -> Self {
        Self {
            kind: shape.kind,
            position: shape.position,
            color: shape.color,
        }
    }
}

/// Wire form of an entry before range checks.
#[derive(Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: ShapeKind,
    position: [f64; 3],
    color: [f64; 3],
}

impl TryFrom<Value> for ShapeDocument {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let raw: RawEntry = serde_json::from_value(value).map_err(|e| e.to_string())?;
        let color = Color::try_from_array(raw.color)
            .ok_or_else(|| format!("color {:?} out of range [0, 1]", raw.color))?;
        Ok(Self {
            kind: raw.kind,
            position: raw.position.into(),
            color,
        })
    }
}

/// A document entry that was skipped during import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entry {index}: {reason}")]
pub struct EntryError {
    /// Zero-based position of the entry in the document array.
    pub index: usize,
    /// Why the entry was rejected.
    pub reason: String,
}

/// Result of parsing a scene document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Valid entries, in document order.
    pub entries: Vec<ShapeDocument>,
    /// Entries that failed validation.
    pub rejected: Vec<EntryError>,
}

/// Convert shapes to document entries, preserving order.
#[must_use]
pub fn export_all<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Vec<ShapeDocument> {
    shapes.into_iter().map(ShapeDocument::from).collect()
}

/// Render document entries as JSON text.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(entries: &[ShapeDocument], pretty: bool) -> EditorResult<String> {
    let json = if pretty {
        serde_json::to_string_pretty(entries)?
    } else {
        serde_json::to_string(entries)?
    };
    Ok(json)
}

/// Parse a scene document.
///
/// Each array element is validated independently; failures are logged and
/// collected rather than aborting the import.
///
/// # Errors
///
/// Returns [`EditorError::MalformedDocument`] if `bytes` is not JSON or the
/// top-level value is not an array.
pub fn import_all(bytes: &[u8]) -> EditorResult<ImportReport> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| EditorError::MalformedDocument(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(EditorError::MalformedDocument(format!(
                "expected a JSON array, found {}",
                value_kind(&other)
            )));
        }
    };

    let mut report = ImportReport::default();
    for (index, item) in items.into_iter().enumerate() {
        match ShapeDocument::try_from(item) {
            Ok(entry) => report.entries.push(entry),
            Err(reason) => {
                let err = EntryError { index, reason };
                tracing::warn!("Skipping invalid shape: {err}");
                report.rejected.push(err);
            }
        }
    }
    Ok(report)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
