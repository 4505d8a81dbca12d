//! One-or-many path extraction.

use super::resolver::{Resolution, Resolver};
use super::tokenizer::tokenize;
use crate::document::value::Value;

/// The paths a caller asked for: a single path or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paths {
    Single(String),
    Many(Vec<String>),
}

impl Paths {
    /// True for an empty path string or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Paths::Single(path) => path.is_empty(),
            Paths::Many(paths) => paths.is_empty(),
        }
    }
}

impl From<&str> for Paths {
    fn from(path: &str) -> Self {
        Paths::Single(path.to_string())
    }
}

impl From<String> for Paths {
    fn from(path: String) -> Self {
        Paths::Single(path)
    }
}

impl From<Vec<String>> for Paths {
    fn from(paths: Vec<String>) -> Self {
        Paths::Many(paths)
    }
}

impl From<&[&str]> for Paths {
    fn from(paths: &[&str]) -> Self {
        Paths::Many(paths.iter().map(|p| p.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Paths {
    fn from(paths: [&str; N]) -> Self {
        Paths::Many(paths.iter().map(|p| p.to_string()).collect())
    }
}

/// Result of an extraction, shaped like the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<'a> {
    /// The natural result of a single path, unwrapped.
    One(Resolution<'a>),
    /// One result per requested path, in request order.
    Each(Vec<Resolution<'a>>),
}

impl<'a> Extraction<'a> {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Extraction::One(resolution) => resolution.to_json(),
            Extraction::Each(resolutions) => {
                serde_json::Value::Array(resolutions.iter().map(Resolution::to_json).collect())
            }
        }
    }
}

impl Resolver {
    /// Tokenizes and resolves every requested path independently.
    ///
    /// # Example
    ///
    /// ```
    /// use pathquill::document::parser::parse_json;
    /// use pathquill::querypath::Resolver;
    ///
    /// let doc = parse_json(r#"{"a": 1, "b": 2}"#).unwrap();
    /// let resolver = Resolver::new();
    ///
    /// assert_eq!(resolver.extract(&doc, &"b".into()).to_json(), serde_json::json!(2));
    /// assert_eq!(
    ///     resolver.extract(&doc, &["a", "b"].into()).to_json(),
    ///     serde_json::json!([1, 2])
    /// );
    /// ```
    pub fn extract<'a>(&self, value: &'a Value, paths: &Paths) -> Extraction<'a> {
        match paths {
            Paths::Single(path) => Extraction::One(self.resolve(value, &tokenize(path))),
            Paths::Many(paths) => Extraction::Each(
                paths
                    .iter()
                    .map(|path| self.resolve(value, &tokenize(path)))
                    .collect(),
            ),
        }
    }
}

/// Extracts `paths` from `value` with the default resolver.
pub fn extract<'a>(value: &'a Value, paths: &Paths) -> Extraction<'a> {
    Resolver::new().extract(value, paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::from_json;
    use serde_json::json;

    #[test]
    fn test_single_path_is_unwrapped() {
        let value = from_json(&json!({"a": {"b": [1, 2]}}));
        let result = extract(&value, &Paths::from("a.b"));
        assert!(matches!(result, Extraction::One(Resolution::Found(_))));
        assert_eq!(result.to_json(), json!([1, 2]));
    }

    #[test]
    fn test_many_paths_keep_order() {
        let value = from_json(&json!({"a": 1, "b": 2}));
        assert_eq!(extract(&value, &["b", "a"].into()).to_json(), json!([2, 1]));
    }

    #[test]
    fn test_one_absent_path_does_not_affect_others() {
        let value = from_json(&json!({"a": 1, "b": [1, 2]}));
        let result = extract(&value, &["a", "missing", "b[*]"].into());
        match &result {
            Extraction::Each(items) => {
                assert_eq!(items.len(), 3);
                assert!(items[1].is_absent());
            }
            _ => panic!("Expected one result per path"),
        }
        assert_eq!(result.to_json(), json!([1, null, [1, 2]]));
    }

    #[test]
    fn test_single_element_list_stays_a_list() {
        let value = from_json(&json!({"a": 1}));
        assert_eq!(extract(&value, &vec!["a".to_string()].into()).to_json(), json!([1]));
    }

    #[test]
    fn test_empty_list() {
        let value = from_json(&json!({"a": 1}));
        let paths = Paths::Many(vec![]);
        assert!(paths.is_empty());
        assert_eq!(extract(&value, &paths), Extraction::Each(vec![]));
    }

    #[test]
    fn test_paths_is_empty() {
        assert!(Paths::from("").is_empty());
        assert!(!Paths::from("a").is_empty());
    }
}
