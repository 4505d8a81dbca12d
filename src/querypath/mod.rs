//! Dotted-path queries for extracting values from decoded documents.
//!
//! # Supported Syntax
//!
//! - `a.b.c` - Object keys, one per dot-separated component
//! - `a.3` - Numeric component indexes into an array
//! - `a[2]` - Array index (supports negative indices)
//! - `a[*]` - All elements (wildcard), flattened one level
//! - `a[start:end:step]` - Array slicing, each bound optional
//! - `[1:3]` - Bracket without a field applies to the current value
//!
//! Only one bracket per component is recognised and there are no filters,
//! unions or recursive descent. Failures never raise; they resolve to
//! `Resolution::Absent`.
//!
//! # Examples
//!
//! ```
//! // data.items[*].id - every item id
//! // data.items[0:3] - first 3 items
//! // data.items[::2].name - names of every other item
//! // meta.pages.0 - first page
//! ```

pub mod ast;
pub mod batch;
pub mod resolver;
pub mod tokenizer;

pub use ast::{IndexOp, PathExpression, Segment, SliceSpec};
pub use batch::{extract, Extraction, Paths};
pub use resolver::{Resolution, Resolver, DEFAULT_MAX_DEPTH};
pub use tokenizer::tokenize;
