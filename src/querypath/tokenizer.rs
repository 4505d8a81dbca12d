//! Path string tokenizer.
//!
//! Tokenizing is total: a malformed bracket never fails here, it becomes
//! `IndexOp::Invalid` and resolves to absent later.

use super::ast::{IndexOp, PathExpression, Segment, SliceSpec};
use regex::Regex;
use std::sync::OnceLock;

/// First bracket group of a component, matched lazily (`a[0][1]` sees `0`).
fn bracket_pattern() -> &'static Regex {
    static BRACKET_RE: OnceLock<Regex> = OnceLock::new();
    BRACKET_RE.get_or_init(|| Regex::new(r"\[(.*?)\]").expect("bracket pattern is valid"))
}

/// Tokenizes a dotted path into a `PathExpression`.
///
/// The path is split on `.` before brackets are looked at, so a `.` inside
/// brackets is not supported: `a[1.5]` becomes the components `a[1` and `5]`.
///
/// # Example
///
/// ```
/// use pathquill::querypath::ast::{IndexOp, Segment, SliceSpec};
/// use pathquill::querypath::tokenizer::tokenize;
///
/// let path = tokenize("data.items[1:3].name");
/// assert_eq!(path.segments, vec![
///     Segment::field("data"),
///     Segment::indexed(Some("items"), IndexOp::Slice(SliceSpec::new(Some(1), Some(3), None))),
///     Segment::field("name"),
/// ]);
/// ```
pub fn tokenize(path: &str) -> PathExpression {
    PathExpression::new(split_components(path).map(parse_component).collect())
}

/// Splits on `.`, trims each piece and drops the empty ones.
pub fn split_components(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').map(str::trim).filter(|part| !part.is_empty())
}

/// Parses one component (already split and trimmed) into a `Segment`.
///
/// The component is not split on `.`; a field that still carries a dot is
/// re-split by the resolver if it does not match as-is.
pub fn parse_component(component: &str) -> Segment {
    match bracket_pattern().captures(component) {
        Some(caps) => {
            let (Some(whole), Some(expr)) = (caps.get(0), caps.get(1)) else {
                return Segment::field(component);
            };
            let field = component[..whole.start()].trim();
            let field = if field.is_empty() { None } else { Some(field) };
            Segment::indexed(field, classify_index(expr.as_str()))
        }
        None => Segment::field(component),
    }
}

/// Classifies the text between the brackets.
fn classify_index(expr: &str) -> IndexOp {
    if expr == "*" {
        return IndexOp::Wildcard;
    }

    if expr.contains(':') {
        let mut parts = expr.split(':');
        let bounds = (
            parse_bound(parts.next()),
            parse_bound(parts.next()),
            parse_bound(parts.next()),
        );
        return match bounds {
            (Ok(start), Ok(end), Ok(step)) => IndexOp::Slice(SliceSpec::new(start, end, step)),
            _ => {
                log::debug!("slice bounds in [{}] are not integers", expr);
                IndexOp::Invalid(expr.to_string())
            }
        };
    }

    match parse_integer(expr) {
        Some(idx) => IndexOp::Single(idx),
        None => {
            log::debug!("index [{}] is not an integer", expr);
            IndexOp::Invalid(expr.to_string())
        }
    }
}

/// A missing or empty bound is `None`; anything else must be an integer.
fn parse_bound(part: Option<&str>) -> Result<Option<i64>, ()> {
    match part {
        None | Some("") => Ok(None),
        Some(text) => parse_integer(text).map(Some).ok_or(()),
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

impl PathExpression {
    /// Builds an expression from components that were split by the caller.
    ///
    /// Components are trimmed and empty ones skipped, but they are not split
    /// on `.`. A component such as `"a.b"` is kept as one field and only
    /// re-split during resolution if no key `"a.b"` exists.
    pub fn from_components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let segments = components
            .into_iter()
            .filter_map(|component| {
                let component = component.as_ref().trim();
                if component.is_empty() {
                    None
                } else {
                    Some(parse_component(component))
                }
            })
            .collect();
        PathExpression::new(segments)
    }
}

impl From<&str> for PathExpression {
    fn from(path: &str) -> Self {
        tokenize(path)
    }
}
