//! JSON output for compiled queries.
//!
//! - **Compact output** via [`to_json()`] - minimal whitespace, suitable for a request body
//! - **Pretty output** via [`to_json_pretty()`] - 2-space indentation for reading
//! - **Search body** via [`search_body()`] - the query wrapped as `{"query": ...}`
//!
//! # Examples
//!
//! ```
//! use esfilter::es::Query;
//! use esfilter::output::to_json;
//!
//! let query = Query::Exists { field: "ip".to_string() };
//! assert_eq!(to_json(&query), r#"{"exists":{"field":"ip"}}"#);
//! ```

use crate::es::Query;

/// Converts a query to its compact JSON form.
pub fn to_json(query: &Query) -> String {
    query.to_json().to_string()
}

/// Converts a query to indented JSON.
///
/// ```
/// use esfilter::es::Query;
/// use esfilter::output::to_json_pretty;
///
/// let query = Query::Exists { field: "ip".to_string() };
/// assert_eq!(to_json_pretty(&query), "{\n  \"exists\": {\n    \"field\": \"ip\"\n  }\n}");
/// ```
pub fn to_json_pretty(query: &Query) -> String {
    // serializing a `serde_json::Value` cannot fail
    serde_json::to_string_pretty(&query.to_json()).unwrap_or_default()
}

/// Wraps a query into a search request body.
pub fn search_body(query: &Query) -> serde_json::Value {
    serde_json::json!({ "query": query.to_json() })
}
