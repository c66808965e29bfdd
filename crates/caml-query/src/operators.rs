//! Operators and value types
//!
//! Every operator maps to exactly one CAML element name, and every scalar
//! value carries one of four `Type` attribute values.

use std::fmt;
use std::str::FromStr;

use caml_core::CamlError;

/// Comparison operators that can wrap a field reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Text starts with (`BeginsWith`)
    BeginsWith,
    /// Text contains (`Contains`)
    Contains,
    /// Equals (`Eq`)
    Equal,
    /// Not equals (`Neq`)
    Different,
    /// Greater than or equal (`Geq`)
    GreaterOrEqual,
    /// Greater than (`Gt`)
    Greater,
    /// One of a list of values (`In`)
    InList,
    /// Less than or equal (`Leq`)
    LowerOrEqual,
    /// Less than (`Lt`)
    Lower,
    /// Empty (`IsNull`)
    IsNull,
    /// Not empty (`IsNotNull`)
    IsNotNull,
}

/// Number of values an operator is conventionally used with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// No value at all
    None,
    /// Exactly one value
    One,
    /// Any number of values, usually more than one
    Many,
}

impl Arity {
    /// Whether `count` values fit this arity
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::None => count == 0,
            Self::One => count == 1,
            Self::Many => count >= 1,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::None => "no value",
            Self::One => "exactly one value",
            Self::Many => "one or more values",
        }
    }
}

impl OperatorKind {
    pub const ALL: [OperatorKind; 11] = [
        Self::BeginsWith,
        Self::Contains,
        Self::Equal,
        Self::Different,
        Self::GreaterOrEqual,
        Self::Greater,
        Self::InList,
        Self::LowerOrEqual,
        Self::Lower,
        Self::IsNull,
        Self::IsNotNull,
    ];

    /// The markup element name for this operator
    pub fn tag(&self) -> &'static str {
        match self {
            Self::BeginsWith => "BeginsWith",
            Self::Contains => "Contains",
            Self::Equal => "Eq",
            Self::Different => "Neq",
            Self::GreaterOrEqual => "Geq",
            Self::Greater => "Gt",
            Self::InList => "In",
            Self::LowerOrEqual => "Leq",
            Self::Lower => "Lt",
            Self::IsNull => "IsNull",
            Self::IsNotNull => "IsNotNull",
        }
    }

    /// The Rust-side variant name, e.g. `GreaterOrEqual`
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeginsWith => "BeginsWith",
            Self::Contains => "Contains",
            Self::Equal => "Equal",
            Self::Different => "Different",
            Self::GreaterOrEqual => "GreaterOrEqual",
            Self::Greater => "Greater",
            Self::InList => "InList",
            Self::LowerOrEqual => "LowerOrEqual",
            Self::Lower => "Lower",
            Self::IsNull => "IsNull",
            Self::IsNotNull => "IsNotNull",
        }
    }

    /// Parse from a markup tag (`Eq`)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.tag() == tag)
    }

    /// Number of values this operator is normally given
    pub fn expected_arity(&self) -> Arity {
        match self {
            Self::IsNull | Self::IsNotNull => Arity::None,
            Self::InList => Arity::Many,
            _ => Arity::One,
        }
    }

    /// Check if this operator takes values
    pub fn requires_values(&self) -> bool {
        self.expected_arity() != Arity::None
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Accepts either the markup tag (`Geq`) or the variant name (`GreaterOrEqual`)
impl FromStr for OperatorKind {
    type Err = CamlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
            .or_else(|| Self::ALL.into_iter().find(|op| op.name() == s))
            .ok_or_else(|| CamlError::Definition(format!("unknown operator: {}", s)))
    }
}

/// Value type written to the `Type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Integer,
    Number,
    DateTime,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Number => "Number",
            Self::DateTime => "DateTime",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
