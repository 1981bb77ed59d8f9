//! Core types for the request-log model.
//!
//! This module provides:
//! - [`LogId`] — Opaque unique identifier for log entries
//! - [`Method`] — Request method enumeration
//! - [`StatusCategory`] — Coarse status-code classification for display
//! - [`LogEntry`] — A single log record, optionally owning child operations
//! - [`SearchQuery`] — Normalized query for root-level filtering

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Timestamp format used on the wire: millisecond precision, no timezone.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Serde adapter for the `YYYY-MM-DD HH:MM:SS.mmm` timestamp strings.
mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Opaque unique identifier for a log entry.
///
/// Ids are supplied by the data source and are expected to be unique across
/// the entire forest, nested children included. They are stable keys, not
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogId(String);

impl LogId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Request method of a log entry.
///
/// Entries produced by internal operations (`db.*`, `cache.*`) reuse the
/// HTTP verbs. Unknown method strings deserialize to [`Method::Other`]
/// instead of failing, so malformed data degrades to default styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", from = "String")]
pub enum Method {
    /// Read operation.
    Get,
    /// Create operation.
    Post,
    /// Replace operation.
    Put,
    /// Delete operation.
    Delete,
    /// Partial update.
    Patch,
    /// Fallback for method strings outside the known set.
    Other,
}

impl From<String> for Method {
    fn from(raw: String) -> Self {
        match raw.to_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "DELETE" => Self::Delete,
            "PATCH" => Self::Patch,
            _ => Self::Other,
        }
    }
}

impl Method {
    /// Returns the canonical uppercase string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Other => "OTHER",
        }
    }
}

/// Coarse classification of a status code, used for display styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    /// 2xx codes.
    Success,
    /// 4xx codes.
    Warning,
    /// 5xx and above.
    Error,
    /// Everything else (1xx, 3xx, non-HTTP values).
    Info,
}

impl StatusCategory {
    /// Classifies a status code.
    #[must_use]
    pub const fn of(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            400..=499 => Self::Warning,
            s if s >= 500 => Self::Error,
            _ => Self::Info,
        }
    }

    /// Returns the category name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

/// A normalized search query over top-level log entries.
///
/// The raw input is trimmed and lowercased once at construction; matching is
/// a plain case-insensitive substring test with no locale folding. A query
/// that trims to nothing is the identity filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
}

impl SearchQuery {
    /// Normalizes a raw query string.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            text: raw.trim().to_lowercase(),
        }
    }

    /// Returns true if this query matches every entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the normalized query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// A single request/response log record.
///
/// Entries form an ordered forest: each entry may own child operations
/// (database calls, cache operations, downstream requests) triggered by it,
/// nested to arbitrary depth. The forest is immutable once supplied; all
/// view state lives outside the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique identifier, stable across the forest.
    pub id: LogId,
    /// Log-creation time, millisecond precision, no timezone.
    #[serde(with = "timestamp")]
    pub timestamp: NaiveDateTime,
    /// Request method.
    pub method: Method,
    /// HTTP path or dotted pseudo-path (`db.users.insert`).
    pub endpoint: String,
    /// Status code, conventionally HTTP-style but not validated.
    pub status: u16,
    /// Duration in milliseconds.
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    /// Raw request payload, schema unknown.
    pub request: serde_json::Value,
    /// Raw response payload, schema unknown.
    pub response: serde_json::Value,
    /// Child operations in display order; absent and empty are equivalent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<LogEntry>,
}

impl LogEntry {
    /// Creates a new log entry builder.
    #[must_use]
    pub fn builder() -> LogEntryBuilder {
        LogEntryBuilder::default()
    }

    /// Checks whether this entry matches the given query.
    ///
    /// A match is a case-insensitive substring hit on the endpoint, the
    /// method name, the id, or the decimal string form of the status code
    /// (so "0" matches 200, 401, and 500). Children are never consulted.
    #[must_use]
    pub fn matches(&self, query: &SearchQuery) -> bool {
        if query.is_empty() {
            return true;
        }
        let q = query.as_str();
        self.endpoint.to_lowercase().contains(q)
            || self.method.as_str().to_lowercase().contains(q)
            || self.id.as_str().to_lowercase().contains(q)
            || self.status.to_string().contains(q)
    }

    /// Counts every node strictly below this entry, recursively.
    ///
    /// The entry itself is never counted; a leaf yields 0. Observed depths
    /// are small, so plain recursion is fine here.
    #[must_use]
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns true if this entry owns child operations.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the display category of this entry's status code.
    #[must_use]
    pub const fn status_category(&self) -> StatusCategory {
        StatusCategory::of(self.status)
    }
}

/// Builder for constructing log entries.
#[derive(Debug, Default)]
pub struct LogEntryBuilder {
    id: Option<LogId>,
    timestamp: Option<NaiveDateTime>,
    method: Option<Method>,
    endpoint: Option<String>,
    status: Option<u16>,
    duration_ms: Option<u64>,
    request: serde_json::Value,
    response: serde_json::Value,
    children: Vec<LogEntry>,
}

impl LogEntryBuilder {
    /// Sets the entry id.
    #[must_use]
    pub fn id(mut self, id: impl Into<LogId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub const fn timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sets the method.
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the status code.
    #[must_use]
    pub const fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the duration in milliseconds.
    #[must_use]
    pub const fn duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Sets the request payload.
    #[must_use]
    pub fn request(mut self, request: serde_json::Value) -> Self {
        self.request = request;
        self
    }

    /// Sets the response payload.
    #[must_use]
    pub fn response(mut self, response: serde_json::Value) -> Self {
        self.response = response;
        self
    }

    /// Appends a child operation.
    #[must_use]
    pub fn child(mut self, child: LogEntry) -> Self {
        self.children.push(child);
        self
    }

    /// Builds the entry.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::MissingField`] if any required field is not set.
    /// Payloads default to JSON null and children to none.
    pub fn build(self) -> crate::error::Result<LogEntry> {
        let id = self.id.ok_or(LogError::MissingField("id"))?;
        let timestamp = self.timestamp.ok_or(LogError::MissingField("timestamp"))?;
        let method = self.method.ok_or(LogError::MissingField("method"))?;
        let endpoint = self.endpoint.ok_or(LogError::MissingField("endpoint"))?;
        let status = self.status.ok_or(LogError::MissingField("status"))?;
        let duration_ms = self
            .duration_ms
            .ok_or(LogError::MissingField("duration"))?;

        Ok(LogEntry {
            id,
            timestamp,
            method,
            endpoint,
            status,
            duration_ms,
            request: self.request,
            response: self.response,
            children: self.children,
        })
    }
}
