//! Logical groups
//!
//! `And` and `Or` blocks own an ordered list of children. Groups nest
//! freely and are never flattened: `And(Or(a, b), c)` renders exactly that
//! bracket structure.

use crate::filters::Filter;
use crate::nodes::Render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKind {
    And,
    Or,
}

impl LogicalKind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::And => "And",
            Self::Or => "Or",
        }
    }
}

/// A node that can sit inside a group or at the root of a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Filter(Filter),
    Group(Group),
}

impl From<Filter> for Expression {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}

impl From<Group> for Expression {
    fn from(group: Group) -> Self {
        Self::Group(group)
    }
}

impl Render for Expression {
    fn render_to(&self, out: &mut String) {
        match self {
            Self::Filter(filter) => filter.render_to(out),
            Self::Group(group) => group.render_to(out),
        }
    }
}

/// `And`/`Or` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    kind: LogicalKind,
    children: Vec<Expression>,
}

impl Group {
    pub fn new<I>(kind: LogicalKind, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        Self {
            kind,
            children: children.into_iter().map(Into::into).collect(),
        }
    }

    /// All children must match
    pub fn and<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        Self::new(LogicalKind::And, children)
    }

    /// At least one child must match
    pub fn or<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expression>,
    {
        Self::new(LogicalKind::Or, children)
    }

    /// Append a filter or group
    pub fn add(&mut self, child: impl Into<Expression>) -> &mut Self {
        self.children.push(child.into());
        self
    }

    /// Append a filter or group and return self (builder pattern)
    pub fn with(mut self, child: impl Into<Expression>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn kind(&self) -> LogicalKind {
        self.kind
    }

    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every filter in the subtree, depth first
    pub fn filters(&self) -> Vec<&Filter> {
        let mut found = Vec::new();
        for child in &self.children {
            match child {
                Expression::Filter(filter) => found.push(filter),
                Expression::Group(group) => found.extend(group.filters()),
            }
        }
        found
    }
}

impl Render for Group {
    fn render_to(&self, out: &mut String) {
        let tag = self.kind.tag();
        out.push('<');
        out.push_str(tag);
        out.push('>');
        for child in &self.children {
            child.render_to(out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}
