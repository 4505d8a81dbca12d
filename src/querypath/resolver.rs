//! Resolves tokenized paths against a `Value` tree.
//!
//! Resolution is best-effort: a missing key, an out-of-range index, a bracket
//! that failed to tokenize or a wildcard over a non-array all end in
//! `Resolution::Absent`. Nothing here returns an error.

use super::ast::{IndexOp, PathExpression, Segment, SliceSpec};
use super::tokenizer::{parse_component, split_components};
use crate::document::parser::to_json;
use crate::document::value::Value;
use std::borrow::Cow;

/// Nesting limit for wildcard and slice expansions.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Outcome of resolving one path.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    /// The path could not be followed.
    Absent,
    /// A single value, possibly `Value::Null`.
    Found(&'a Value),
    /// Output of a wildcard or slice expansion, flattened one level.
    /// `None` marks an element whose own resolution was absent.
    Many(Vec<Option<&'a Value>>),
}

impl<'a> Resolution<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolution::Absent)
    }

    /// Returns the single found value, if any.
    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Resolution::Found(value) => Some(*value),
            _ => None,
        }
    }

    /// Renders the resolution as JSON.
    ///
    /// `Absent` becomes `null`, so at this boundary a missing path and a
    /// path that resolved to null look the same.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Resolution::Absent => serde_json::Value::Null,
            Resolution::Found(value) => to_json(value),
            Resolution::Many(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(|item| item.map(to_json).unwrap_or(serde_json::Value::Null))
                    .collect(),
            ),
        }
    }
}

/// Result of looking a plain field up on the current value.
enum Step<'a> {
    Descend(&'a Value),
    Resplit,
    Missing,
}

/// Walks values along path segments.
///
/// The resolver holds no state besides its depth limit and can be shared
/// freely.
///
/// # Example
///
/// ```
/// use pathquill::document::parser::parse_json;
/// use pathquill::querypath::resolver::Resolver;
/// use pathquill::querypath::tokenizer::tokenize;
///
/// let doc = parse_json(r#"{"users": [{"name": "Alice"}, {"name": "Bob"}]}"#).unwrap();
/// let names = Resolver::new().resolve(&doc, &tokenize("users[*].name"));
/// assert_eq!(names.to_json(), serde_json::json!(["Alice", "Bob"]));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolver {
    max_depth: usize,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver that allows at most `max_depth` nested expansions.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolves `path` against `value`.
    pub fn resolve<'a>(&self, value: &'a Value, path: &PathExpression) -> Resolution<'a> {
        self.walk(value, &path.segments, 0)
    }

    fn walk<'a>(&self, value: &'a Value, segments: &[Segment], depth: usize) -> Resolution<'a> {
        let mut current = value;
        let mut pending: Cow<'_, [Segment]> = Cow::Borrowed(segments);
        let mut pos = 0;

        loop {
            let Some(head) = pending.get(pos) else {
                return Resolution::Found(current);
            };
            if current.is_null() {
                return Resolution::Found(current);
            }
            let rest = pos + 1;

            if head.index == IndexOp::None {
                let Some(field) = head.field.as_deref() else {
                    pos = rest;
                    continue;
                };
                match step_into(current, field) {
                    Step::Descend(child) => {
                        current = child;
                        pos = rest;
                    }
                    Step::Resplit => {
                        log::debug!("re-splitting dotted field '{}'", field);
                        let mut queue: Vec<Segment> =
                            split_components(field).map(parse_component).collect();
                        queue.extend_from_slice(&pending[rest..]);
                        pending = Cow::Owned(queue);
                        pos = 0;
                    }
                    Step::Missing => return Resolution::Absent,
                }
                continue;
            }

            if let Some(field) = head.field.as_deref() {
                match descend_field(current, field) {
                    Some(child) => current = child,
                    None => return Resolution::Absent,
                }
            }

            match &head.index {
                IndexOp::Wildcard => {
                    let Value::Array(items) = current else {
                        log::debug!("wildcard over {}, expected array", current.type_name());
                        return Resolution::Absent;
                    };
                    return self.expand(items.iter(), &pending[rest..], depth);
                }
                IndexOp::Slice(spec) => {
                    let Value::Array(items) = current else {
                        return Resolution::Absent;
                    };
                    let Some(positions) = slice_positions(items.len(), *spec) else {
                        return Resolution::Absent;
                    };
                    let selected = positions.into_iter().map(|i| &items[i]);
                    return self.expand(selected, &pending[rest..], depth);
                }
                IndexOp::Single(idx) => match element_at(current, *idx) {
                    Some(element) => {
                        current = element;
                        pos = rest;
                    }
                    None => return Resolution::Absent,
                },
                IndexOp::Invalid(_) | IndexOp::None => return Resolution::Absent,
            }
        }
    }

    /// Resolves `tail` against every item and flattens one level.
    ///
    /// With a non-empty tail, an array found at the end of a branch is
    /// spliced like a nested expansion. Without a tail the items are
    /// returned as they are.
    fn expand<'a>(
        &self,
        items: impl Iterator<Item = &'a Value>,
        tail: &[Segment],
        depth: usize,
    ) -> Resolution<'a> {
        if depth >= self.max_depth {
            log::warn!(
                "expansion depth limit of {} reached, dropping branch",
                self.max_depth
            );
            return Resolution::Absent;
        }

        let mut results = Vec::new();
        for item in items {
            match self.walk(item, tail, depth + 1) {
                Resolution::Many(inner) => results.extend(inner),
                Resolution::Found(Value::Array(inner)) if !tail.is_empty() => {
                    results.extend(inner.iter().map(Some))
                }
                Resolution::Found(value) => results.push(Some(value)),
                Resolution::Absent => results.push(None),
            }
        }
        Resolution::Many(results)
    }
}

/// Plain field lookup: object key, then numeric array index, then dotted
/// field re-splitting.
fn step_into<'a>(value: &'a Value, field: &str) -> Step<'a> {
    match value {
        Value::Object(map) => {
            if let Some(child) = map.get(field) {
                return Step::Descend(child);
            }
        }
        Value::Array(items) if is_digits(field) => {
            return match field.parse::<usize>().ok().and_then(|i| items.get(i)) {
                Some(child) => Step::Descend(child),
                None => Step::Missing,
            };
        }
        _ => {}
    }

    if field.contains('.') {
        Step::Resplit
    } else {
        Step::Missing
    }
}

/// Field descent before a bracket. A field that does not apply leaves the
/// value unchanged; only an out-of-range numeric field on an array is absent.
fn descend_field<'a>(value: &'a Value, field: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => Some(map.get(field).unwrap_or(value)),
        Value::Array(items) if is_digits(field) => {
            field.parse::<usize>().ok().and_then(|i| items.get(i))
        }
        _ => Some(value),
    }
}

fn element_at(value: &Value, idx: i64) -> Option<&Value> {
    let Value::Array(items) = value else {
        return None;
    };
    let len = items.len() as i64;
    let normalized = if idx < 0 { len + idx } else { idx };
    if normalized < 0 {
        return None;
    }
    items.get(usize::try_from(normalized).ok()?)
}

fn is_digits(field: &str) -> bool {
    !field.is_empty() && field.bytes().all(|b| b.is_ascii_digit())
}

/// Positions selected by a slice over `len` items, or `None` for a zero step.
///
/// Bounds follow sequence slicing rules: negative bounds count from the end
/// and are clamped into range. A missing start is 0 and a missing end is
/// `len` regardless of the step's sign, so a backwards slice needs both
/// bounds: `[::-1]` selects nothing while `[-1:-100:-1]` walks the whole
/// array backwards.
fn slice_positions(len: usize, spec: SliceSpec) -> Option<Vec<usize>> {
    let step = spec.step.unwrap_or(1);
    if step == 0 {
        return None;
    }

    let len = len as i64;
    let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
    let clamp = |bound: i64| {
        if bound < 0 {
            bound.saturating_add(len).max(lower)
        } else {
            bound.min(upper)
        }
    };

    let mut i = clamp(spec.start.unwrap_or(0));
    let stop = clamp(spec.end.unwrap_or(len));
    let mut positions = Vec::new();
    while (step > 0 && i < stop) || (step < 0 && i > stop) {
        positions.push(i as usize);
        i = i.saturating_add(step);
    }
    Some(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::from_json;
    use crate::querypath::tokenizer::tokenize;
    use serde_json::json;

    fn resolve_json(doc: serde_json::Value, path: &str) -> serde_json::Value {
        let value = from_json(&doc);
        Resolver::new().resolve(&value, &tokenize(path)).to_json()
    }

    fn is_absent(doc: serde_json::Value, path: &str) -> bool {
        let value = from_json(&doc);
        Resolver::new().resolve(&value, &tokenize(path)).is_absent()
    }

    fn positions(len: usize, start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Vec<usize> {
        slice_positions(len, SliceSpec::new(start, end, step)).unwrap()
    }

    #[test]
    fn test_empty_path_returns_value() {
        let value = from_json(&json!({"a": 1}));
        let result = Resolver::new().resolve(&value, &tokenize(""));
        assert_eq!(result, Resolution::Found(&value));
    }

    #[test]
    fn test_nested_fields() {
        assert_eq!(resolve_json(json!({"a": {"b": {"c": 5}}}), "a.b.c"), json!(5));
    }

    #[test]
    fn test_null_stops_resolution() {
        let value = from_json(&json!({"a": null}));
        let result = Resolver::new().resolve(&value, &tokenize("a.b.c"));
        assert_eq!(result, Resolution::Found(&Value::Null));
    }

    #[test]
    fn test_missing_key_is_absent() {
        assert!(is_absent(json!({"a": 1}), "x.y"));
    }

    #[test]
    fn test_scalar_cannot_be_descended() {
        assert!(is_absent(json!({"a": 1}), "a.b"));
    }

    #[test]
    fn test_numeric_field_on_array() {
        assert_eq!(resolve_json(json!({"a": [9, 8, 7]}), "a.0"), json!(9));
        assert!(is_absent(json!({"a": [9, 8, 7]}), "a.3"));
    }

    #[test]
    fn test_numeric_key_on_object() {
        assert_eq!(resolve_json(json!({"a": {"0": "zero"}}), "a.0"), json!("zero"));
    }

    #[test]
    fn test_single_index() {
        assert_eq!(resolve_json(json!({"a": [1, 2, 3]}), "a[1]"), json!(2));
        assert_eq!(resolve_json(json!({"a": [1, 2, 3]}), "a[-1]"), json!(3));
        assert!(is_absent(json!([1, 2, 3]), "[10]"));
        assert!(is_absent(json!([1, 2, 3]), "[-4]"));
    }

    #[test]
    fn test_single_index_on_non_array() {
        assert!(is_absent(json!({"a": {"b": 1}}), "a[0]"));
        assert!(is_absent(json!({"a": "text"}), "a[0]"));
    }

    #[test]
    fn test_single_index_does_not_flatten() {
        assert_eq!(
            resolve_json(json!({"a": [[1, 2], [3]]}), "a[0]"),
            json!([1, 2])
        );
    }

    #[test]
    fn test_wildcard_with_tail() {
        assert_eq!(
            resolve_json(json!([{"x": 1}, {"x": 2}]), "[*].x"),
            json!([1, 2])
        );
    }

    #[test]
    fn test_wildcard_without_tail_keeps_arrays() {
        assert_eq!(
            resolve_json(json!([[1, 2], [3, 4]]), "[*]"),
            json!([[1, 2], [3, 4]])
        );
    }

    #[test]
    fn test_nested_wildcards_flatten_one_level() {
        let doc = json!({"groups": [
            {"users": [{"name": "a"}, {"name": "b"}]},
            {"users": [{"name": "c"}]}
        ]});
        assert_eq!(
            resolve_json(doc, "groups[*].users[*].name"),
            json!(["a", "b", "c"])
        );
    }

    #[test]
    fn test_array_at_end_of_tail_is_spliced() {
        let doc = json!({"items": [{"tags": ["a", "b"]}, {"tags": []}, {"tags": ["c"]}]});
        assert_eq!(resolve_json(doc.clone(), "items[*].tags"), json!(["a", "b", "c"]));
        assert_eq!(resolve_json(doc, "items[1:].tags"), json!(["c"]));
    }

    #[test]
    fn test_spliced_arrays_flatten_only_one_level() {
        let doc = json!([{"m": [[1, 2], [3]]}, {"m": [[4]]}]);
        assert_eq!(resolve_json(doc, "[*].m"), json!([[1, 2], [3], [4]]));
    }

    #[test]
    fn test_single_index_tail_result_is_spliced() {
        assert_eq!(
            resolve_json(json!([[[1, 2]], [[3]]]), "[*].[0]"),
            json!([1, 2, 3])
        );
    }

    #[test]
    fn test_wildcard_keeps_absent_entries() {
        let value = from_json(&json!([{"x": 1}, {"y": 2}]));
        let result = Resolver::new().resolve(&value, &tokenize("[*].x"));
        assert_eq!(result, Resolution::Many(vec![Some(&Value::from(1)), None]));
        assert_eq!(result.to_json(), json!([1, null]));
    }

    #[test]
    fn test_wildcard_on_non_array() {
        assert!(is_absent(json!({"a": {"b": 1}}), "a[*]"));
    }

    #[test]
    fn test_wildcard_on_empty_array() {
        assert_eq!(resolve_json(json!({"a": []}), "a[*]"), json!([]));
    }

    #[test]
    fn test_slices() {
        let doc = json!([10, 20, 30, 40, 50]);
        assert_eq!(resolve_json(doc.clone(), "[1:3]"), json!([20, 30]));
        assert_eq!(resolve_json(doc.clone(), "[::2]"), json!([10, 30, 50]));
        assert_eq!(resolve_json(doc.clone(), "[-2:]"), json!([40, 50]));
        assert_eq!(resolve_json(doc.clone(), "[:100]"), json!([10, 20, 30, 40, 50]));
        assert_eq!(resolve_json(doc, "[3:1]"), json!([]));
    }

    #[test]
    fn test_slice_negative_step() {
        let doc = json!([10, 20, 30]);
        assert_eq!(resolve_json(doc.clone(), "[-1:-100:-1]"), json!([30, 20, 10]));
        assert_eq!(resolve_json(doc.clone(), "[-1::-1]"), json!([]));
        assert_eq!(resolve_json(doc, "[::-1]"), json!([]));
    }

    #[test]
    fn test_slice_zero_step_is_absent() {
        assert!(is_absent(json!([1, 2, 3]), "[::0]"));
    }

    #[test]
    fn test_malformed_slice_is_absent() {
        assert!(is_absent(json!([1, 2, 3]), "[a:b]"));
        assert!(is_absent(json!([1, 2, 3]), "[1:b]"));
    }

    #[test]
    fn test_slice_on_non_array() {
        assert!(is_absent(json!({"a": "text"}), "a[0:2]"));
    }

    #[test]
    fn test_strings_are_not_indexable() {
        let doc = json!({"s": "hello", "rows": ["ab", "cd"]});
        assert!(is_absent(doc.clone(), "s[0]"));
        assert!(is_absent(doc.clone(), "s[1:3]"));
        assert!(is_absent(doc.clone(), "s[*]"));
        assert!(is_absent(doc.clone(), "s.0"));
        assert_eq!(resolve_json(doc, "rows[*].[0]"), json!([null, null]));
    }

    #[test]
    fn test_slice_with_tail() {
        let doc = json!({"items": [{"id": 1}, {"id": 2}, {"id": 3}]});
        assert_eq!(resolve_json(doc, "items[1:].id"), json!([2, 3]));
    }

    #[test]
    fn test_inapplicable_field_before_bracket_is_ignored() {
        assert_eq!(resolve_json(json!([1, 2, 3]), "missing[0]"), json!(1));
        assert_eq!(resolve_json(json!({"a": [5, 6]}), "zzz[0]"), json!(null));
    }

    #[test]
    fn test_numeric_field_before_bracket() {
        assert_eq!(resolve_json(json!([[1, 2], [3, 4]]), "1[0]"), json!(3));
        assert!(is_absent(json!([[1, 2]]), "5[0]"));
    }

    #[test]
    fn test_dotted_field_is_resplit() {
        let value = from_json(&json!({"a": {"b": [1, 2]}}));
        let path = PathExpression::from_components(["a.b", "1"]);
        let result = Resolver::new().resolve(&value, &path);
        assert_eq!(result, Resolution::Found(&Value::from(2)));
    }

    #[test]
    fn test_dotted_key_matches_before_resplit() {
        let value = from_json(&json!({"a.b": "literal", "a": {"b": "nested"}}));
        let path = PathExpression::from_components(["a.b"]);
        let result = Resolver::new().resolve(&value, &path);
        assert_eq!(result.to_json(), json!("literal"));
    }

    #[test]
    fn test_dotted_field_before_bracket_is_not_resplit() {
        let value = from_json(&json!({"a": {"b": [1, 2, 3]}}));
        let path = PathExpression::from_components(["a.b[1:]"]);
        let result = Resolver::new().resolve(&value, &path);
        assert!(result.is_absent());
    }

    #[test]
    fn test_depth_limit() {
        let doc = json!([[1, 2], [3]]);
        let value = from_json(&doc);
        let path = tokenize("[*].[*]");

        let result = Resolver::with_max_depth(1).resolve(&value, &path);
        assert_eq!(result, Resolution::Many(vec![None, None]));

        let result = Resolver::with_max_depth(2).resolve(&value, &path);
        assert_eq!(result.to_json(), json!([1, 2, 3]));

        let result = Resolver::with_max_depth(0).resolve(&value, &path);
        assert!(result.is_absent());
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let value = from_json(&json!({"a": {"b": 5}}));
        let path = tokenize("a.b");
        let resolver = Resolver::new();
        let first = resolver.resolve(&value, &path);
        let second = resolver.resolve(&value, &path);
        assert_eq!(first, second);
        assert_eq!(first.value(), Some(&Value::from(5)));
    }

    #[test]
    fn test_slice_positions_python_rules() {
        assert_eq!(positions(5, Some(1), Some(3), None), vec![1, 2]);
        assert_eq!(positions(5, None, None, Some(2)), vec![0, 2, 4]);
        assert_eq!(positions(5, Some(-100), Some(2), None), vec![0, 1]);
        assert_eq!(positions(5, Some(4), Some(-100), Some(-2)), vec![4, 2, 0]);
        assert_eq!(positions(5, Some(10), Some(-6), Some(-1)), vec![4, 3, 2, 1, 0]);
        assert_eq!(positions(5, Some(10), None, Some(-1)), Vec::<usize>::new());
        assert_eq!(positions(0, None, None, None), Vec::<usize>::new());
        assert_eq!(positions(3, Some(0), None, Some(i64::MAX)), vec![0]);
    }
}
