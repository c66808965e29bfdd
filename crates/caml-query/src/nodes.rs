//! Markup nodes
//!
//! The leaf and intermediate elements of a query: `<FieldRef>`, `<Value>`,
//! `<Values>` and the operator element that ties them together. Output is
//! byte-exact; the consuming service compares attribute order and the
//! self-closing form literally.

use crate::operators::{OperatorKind, ValueKind};
use crate::values::ScalarValue;

/// Anything that can write itself as CAML markup
pub trait Render {
    /// Append the markup for this node to `out`
    fn render_to(&self, out: &mut String);

    /// Render this node into a fresh string
    fn render(&self) -> String {
        let mut out = String::new();
        self.render_to(&mut out);
        out
    }
}

/// Reference to a named field: `<FieldRef Name="Title" />`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    name: String,
}

impl FieldRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Render for FieldRef {
    fn render_to(&self, out: &mut String) {
        out.push_str("<FieldRef Name=\"");
        out.push_str(&self.name);
        out.push_str("\" />");
    }
}

impl Render for ScalarValue {
    fn render_to(&self, out: &mut String) {
        match self.kind() {
            ValueKind::DateTime => {
                out.push_str("<Value IncludeTimeValue=\"");
                out.push_str(if self.has_time_component() { "TRUE" } else { "FALSE" });
                out.push_str("\" Type=\"DateTime\">");
            }
            kind => {
                out.push_str("<Value Type=\"");
                out.push_str(kind.as_str());
                out.push_str("\">");
            }
        }
        out.push_str(self.rendered());
        out.push_str("</Value>");
    }
}

/// Ordered list of values wrapped in `<Values>`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueList {
    values: Vec<ScalarValue>,
}

impl ValueList {
    pub fn new(values: Vec<ScalarValue>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[ScalarValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Render for ValueList {
    fn render_to(&self, out: &mut String) {
        out.push_str("<Values>");
        for value in &self.values {
            value.render_to(out);
        }
        out.push_str("</Values>");
    }
}

/// Value content of an operator element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePart {
    /// A bare `<Value>`
    Single(ScalarValue),
    /// A `<Values>` wrapper
    List(ValueList),
}

impl ValuePart {
    /// Pick the shape from the number of values: none, bare, or wrapped
    pub fn from_values(mut values: Vec<ScalarValue>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::Single),
            _ => Some(Self::List(ValueList::new(values))),
        }
    }

    pub fn values(&self) -> &[ScalarValue] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(list) => list.values(),
        }
    }
}

impl Render for ValuePart {
    fn render_to(&self, out: &mut String) {
        match self {
            Self::Single(value) => value.render_to(out),
            Self::List(list) => list.render_to(out),
        }
    }
}

/// Operator element: field reference first, then the optional value part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorNode {
    kind: OperatorKind,
    field: FieldRef,
    value: Option<ValuePart>,
}

impl OperatorNode {
    pub fn new(kind: OperatorKind, field: FieldRef, value: Option<ValuePart>) -> Self {
        Self { kind, field, value }
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    pub fn field(&self) -> &FieldRef {
        &self.field
    }

    pub fn value(&self) -> Option<&ValuePart> {
        self.value.as_ref()
    }
}

impl Render for OperatorNode {
    fn render_to(&self, out: &mut String) {
        let tag = self.kind.tag();
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.field.render_to(out);
        if let Some(value) = &self.value {
            value.render_to(out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}
