//! Types for tokenized path expressions.

/// Bounds of a bracketed slice (`[start:end:step]`).
///
/// Missing bounds take their defaults at resolution time: `start = 0`,
/// `end = len`, `step = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSpec {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub step: Option<i64>,
}

impl SliceSpec {
    pub fn new(start: Option<i64>, end: Option<i64>, step: Option<i64>) -> Self {
        Self { start, end, step }
    }
}

/// The bracketed operation applied after optional field descent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOp {
    /// No bracket; the field itself is the navigation key.
    None,
    /// Single index (`[2]`, `[-1]`)
    Single(i64),
    /// Slice (`[1:3]`, `[::2]`)
    Slice(SliceSpec),
    /// Wildcard (`[*]`) - every element of an array
    Wildcard,
    /// A bracket whose contents are not an integer, slice or `*`.
    /// Kept verbatim; it always resolves to absent.
    Invalid(String),
}

/// One dot-separated component of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Key to descend into before the index operation is applied.
    pub field: Option<String>,
    pub index: IndexOp,
}

impl Segment {
    /// A plain field segment without brackets (`name`, `0`).
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            field: Some(name.into()),
            index: IndexOp::None,
        }
    }

    /// A bracket segment, optionally preceded by a field (`items[0]`, `[1:3]`).
    pub fn indexed(field: Option<&str>, index: IndexOp) -> Self {
        Self {
            field: field.map(str::to_string),
            index,
        }
    }
}

/// A tokenized path: segments in left-to-right traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathExpression {
    pub segments: Vec<Segment>,
}

impl PathExpression {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}
