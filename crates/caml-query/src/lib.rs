//! # caml-query
//!
//! Filter expressions serialized to CAML query markup.
//!
//! A query is built bottom-up: filters first, then `And`/`Or` groups around
//! them, then a `Where` root which can carry an `OrderBy` clause. Rendering
//! is one-directional; nothing here parses markup back into a tree.
//!
//! ## Structure
//!
//! - `operators` - Operator tags and value type tags
//! - `values` - Scalar inputs and their typed `<Value>` form
//! - `nodes` - Field references, value lists and operator elements
//! - `filters` - Single-condition filter expressions
//! - `groups` - Logical `And`/`Or` blocks
//! - `query` - The `Where` root and ordering
//! - `builder` - JSON query definitions and presets
//!
//! ## Example
//!
//! ```
//! use caml_query::{Filter, Group, Query};
//!
//! let query = Query::new(Group::and([
//!     Filter::different("Title", "My book"),
//!     Filter::lower_or_equal("Price", 200),
//! ]))
//! .order_by_asc("Created");
//!
//! assert_eq!(
//!     query.query_text(),
//!     concat!(
//!         r#"<Where><And><Neq><FieldRef Name="Title" /><Value Type="Text">My book</Value></Neq>"#,
//!         r#"<Leq><FieldRef Name="Price" /><Value Type="Integer">200</Value></Leq></And></Where>"#,
//!         r#"<OrderBy><FieldRef Name="Created" Ascending="True" /></OrderBy>"#,
//!     )
//! );
//! ```

pub mod operators;
pub mod values;
pub mod nodes;
pub mod filters;
pub mod groups;
pub mod query;
pub mod builder;

// Re-exports for convenience
pub use caml_core::{CamlError, CamlResult};
pub use operators::{Arity, OperatorKind, ValueKind};
pub use values::{ScalarInput, ScalarValue};
pub use nodes::{FieldRef, OperatorNode, Render, ValueList, ValuePart};
pub use filters::Filter;
pub use groups::{Expression, Group, LogicalKind};
pub use query::{OrderBy, Query};
pub use builder::{presets, QueryDefinition};
