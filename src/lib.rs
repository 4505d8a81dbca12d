//! PathQuill - extract values from decoded JSON and YAML documents with
//! compact dotted paths such as `data.items[*].id` or `rows[1:3]`.
//!
//! # Example
//!
//! ```
//! use pathquill::document::parser::parse_json;
//! use pathquill::querypath::{extract, Paths};
//!
//! let doc = parse_json(r#"{"data": {"items": [{"id": 1}, {"id": 2}, {"id": 3}]}}"#).unwrap();
//!
//! let ids = extract(&doc, &Paths::from("data.items[::2].id"));
//! assert_eq!(ids.to_json(), serde_json::json!([1, 3]));
//! ```

pub mod config;
pub mod document;
pub mod file;
pub mod querypath;
pub mod response;
