//! Payload rendering helpers for the drill-down JSON panels.
//!
//! Payloads are opaque structured documents; the viewer assumes nothing
//! about their schema beyond "JSON-serializable". Object key order is
//! preserved end to end (`serde_json` with `preserve_order`), so documents
//! render in the order the data source wrote them.

use serde_json::Value;

use crate::error::Result;

/// Which side of an entry a JSON panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// The raw request document.
    Request,
    /// The raw response document.
    Response,
}

impl PayloadKind {
    /// Returns the display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Request => "Request",
            Self::Response => "Response",
        }
    }
}

/// Pretty-prints a payload document for display (2-space indentation).
///
/// # Errors
///
/// Returns [`crate::LogError::Serialization`] if the value cannot be
/// serialized.
pub fn pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Formats the title of a JSON panel: `"<endpoint> - Request|Response"`.
#[must_use]
pub fn panel_title(endpoint: &str, kind: PayloadKind) -> String {
    format!("{endpoint} - {}", kind.as_str())
}
