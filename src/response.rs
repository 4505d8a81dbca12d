//! Extraction from raw response bodies.
//!
//! This is the boundary a request layer talks to: it hands over the body text
//! and the caller's paths and gets back JSON ready to use. Transport concerns
//! (connections, status codes, timeouts) stay with the caller.

use crate::document::parser::{from_json, to_json};
use crate::document::value::Value;
use crate::querypath::{Paths, Resolver};

/// Decodes a body as JSON, keeping it as an opaque string when it is not.
pub fn decode_body(content: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(json) => from_json(&json),
        Err(err) => {
            log::debug!("body is not JSON ({}), keeping it as text", err);
            Value::String(content.to_string())
        }
    }
}

/// Decodes `content` and extracts `paths` from it.
///
/// Without paths, or with an empty path string or list, the whole decoded
/// body is returned.
///
/// # Example
///
/// ```
/// use pathquill::querypath::{Paths, Resolver};
/// use pathquill::response::handle_body;
///
/// let body = r#"{"data": {"items": [{"id": 1}, {"id": 2}]}}"#;
/// let ids = handle_body(body, Some(&Paths::from("data.items[*].id")), &Resolver::new());
/// assert_eq!(ids, serde_json::json!([1, 2]));
///
/// let text = handle_body("plain text", None, &Resolver::new());
/// assert_eq!(text, serde_json::json!("plain text"));
/// ```
pub fn handle_body(
    content: &str,
    paths: Option<&Paths>,
    resolver: &Resolver,
) -> serde_json::Value {
    let data = decode_body(content);
    match paths {
        Some(paths) if !paths.is_empty() => resolver.extract(&data, paths).to_json(),
        _ => to_json(&data),
    }
}
