//! Query root
//!
//! Wraps one top-level filter or group in `<Where>` and optionally appends an
//! `<OrderBy>` clause right after it. The result is a markup fragment, not a
//! document: no XML declaration, no namespaces.

use std::fmt;

use crate::groups::Expression;
use crate::nodes::Render;

/// Sort clause appended after `</Where>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub ascending: bool,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, ascending: bool) -> Self {
        Self {
            field: field.into(),
            ascending,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, true)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, false)
    }
}

impl Render for OrderBy {
    fn render_to(&self, out: &mut String) {
        out.push_str("<OrderBy><FieldRef Name=\"");
        out.push_str(&self.field);
        out.push_str("\" Ascending=\"");
        out.push_str(if self.ascending { "True" } else { "False" });
        out.push_str("\" /></OrderBy>");
    }
}

/// A complete query: the `Where` clause and its optional ordering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    root: Expression,
    order: Option<OrderBy>,
}

impl Query {
    pub fn new(root: impl Into<Expression>) -> Self {
        Self {
            root: root.into(),
            order: None,
        }
    }

    /// Sort the results, returning the query (builder pattern)
    pub fn order_by(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.set_order_by(field, ascending);
        self
    }

    /// Sort the results in ascending order
    pub fn order_by_asc(self, field: impl Into<String>) -> Self {
        self.order_by(field, true)
    }

    /// Set the ordering in place, replacing any previous one
    pub fn set_order_by(&mut self, field: impl Into<String>, ascending: bool) -> &mut Self {
        self.order = Some(OrderBy::new(field, ascending));
        self
    }

    pub fn root(&self) -> &Expression {
        &self.root
    }

    pub fn order(&self) -> Option<&OrderBy> {
        self.order.as_ref()
    }

    pub fn is_ordered(&self) -> bool {
        self.order.is_some()
    }

    /// The serialized markup to send to the list service
    pub fn query_text(&self) -> String {
        let text = self.render();
        tracing::trace!(len = text.len(), ordered = self.is_ordered(), "Rendered query");
        text
    }
}

impl Render for Query {
    fn render_to(&self, out: &mut String) {
        out.push_str("<Where>");
        self.root.render_to(out);
        out.push_str("</Where>");
        if let Some(order) = &self.order {
            order.render_to(out);
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
