//! Filter expressions
//!
//! A filter is a single condition on one field. Its shape is decided by the
//! number of values it is given, never by the operator:
//!
//! - no value: `<Op><FieldRef /></Op>`
//! - one value: `<Op><FieldRef /><Value /></Op>`
//! - more: `<Op><FieldRef /><Values>...</Values></Op>`
//!
//! Operator/arity mismatches (three values on `Eq`, a value on `IsNull`) are
//! built as asked. `Filter::validate` reports them for callers that want a
//! stricter contract.

use caml_core::{CamlError, CamlResult};

use crate::nodes::{FieldRef, OperatorNode, Render, ValuePart};
use crate::operators::OperatorKind;
use crate::values::{ScalarInput, ScalarValue};

/// A single filter condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    node: OperatorNode,
}

impl Filter {
    /// Create a new filter from an operator, a field name and its values
    pub fn new<I>(operator: OperatorKind, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ScalarInput>,
    {
        let field = FieldRef::new(field);
        let values: Vec<ScalarValue> = values
            .into_iter()
            .map(|v| ScalarValue::from(v.into()))
            .collect();
        let count = values.len();

        tracing::debug!(
            operator = %operator,
            field = field.name(),
            values = count,
            "Building filter"
        );
        if !operator.expected_arity().accepts(count) {
            tracing::warn!(
                operator = %operator,
                field = field.name(),
                values = count,
                expected = operator.expected_arity().describe(),
                "Filter built with an unconventional number of values"
            );
        }

        Self {
            node: OperatorNode::new(operator, field, ValuePart::from_values(values)),
        }
    }

    /// Create a filter with exactly one value
    pub fn single(
        operator: OperatorKind,
        field: impl Into<String>,
        value: impl Into<ScalarInput>,
    ) -> Self {
        Self::new(operator, field, [value.into()])
    }

    /// Create a filter without any value
    pub fn bare(operator: OperatorKind, field: impl Into<String>) -> Self {
        Self::new(operator, field, Vec::<ScalarInput>::new())
    }

    /// Create an equals filter
    pub fn equal(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::Equal, field, value)
    }

    /// Create a not equals filter
    pub fn different(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::Different, field, value)
    }

    pub fn greater(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::Greater, field, value)
    }

    pub fn greater_or_equal(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::GreaterOrEqual, field, value)
    }

    pub fn lower(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::Lower, field, value)
    }

    pub fn lower_or_equal(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::LowerOrEqual, field, value)
    }

    /// Create a starts-with filter
    pub fn begins_with(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::BeginsWith, field, value)
    }

    /// Create a contains filter
    pub fn contains(field: impl Into<String>, value: impl Into<ScalarInput>) -> Self {
        Self::single(OperatorKind::Contains, field, value)
    }

    /// Create an `In` filter over a list of values
    pub fn in_list<I>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ScalarInput>,
    {
        Self::new(OperatorKind::InList, field, values)
    }

    /// Create an is null filter
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::bare(OperatorKind::IsNull, field)
    }

    /// Create an is not null filter
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::bare(OperatorKind::IsNotNull, field)
    }

    pub fn operator(&self) -> OperatorKind {
        self.node.kind()
    }

    pub fn field(&self) -> &str {
        self.node.field().name()
    }

    /// Values in the order they were given
    pub fn values(&self) -> &[ScalarValue] {
        self.node.value().map(ValuePart::values).unwrap_or(&[])
    }

    pub fn node(&self) -> &OperatorNode {
        &self.node
    }

    /// Check if the value count fits the operator
    pub fn is_conventional(&self) -> bool {
        self.operator().expected_arity().accepts(self.values().len())
    }

    /// Reject operator/arity mismatches
    pub fn validate(&self) -> CamlResult<()> {
        if self.is_conventional() {
            return Ok(());
        }
        Err(CamlError::ArityMismatch {
            operator: self.operator().tag().to_string(),
            expected: self.operator().expected_arity().describe(),
            found: self.values().len(),
        })
    }
}

impl Render for Filter {
    fn render_to(&self, out: &mut String) {
        self.node.render_to(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::ValueKind;

    #[test]
    fn test_filter_creation() {
        let filter = Filter::equal("Somme", 2);
        assert_eq!(filter.field(), "Somme");
        assert_eq!(filter.operator(), OperatorKind::Equal);
        assert_eq!(filter.values().len(), 1);
        assert_eq!(filter.values()[0].kind(), ValueKind::Integer);
        assert!(filter.is_conventional());
        assert_eq!(
            filter.render(),
            r#"<Eq><FieldRef Name="Somme" /><Value Type="Integer">2</Value></Eq>"#
        );
    }

    #[test]
    fn test_filter_is_null() {
        let filter = Filter::is_null("Somme");
        assert!(filter.values().is_empty());
        assert!(filter.node().value().is_none());
        assert_eq!(filter.render(), r#"<IsNull><FieldRef Name="Somme" /></IsNull>"#);
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_single_value_is_not_wrapped() {
        let filter = Filter::in_list("Somme", [10]);
        assert_eq!(
            filter.render(),
            r#"<In><FieldRef Name="Somme" /><Value Type="Integer">10</Value></In>"#
        );
    }

    #[test]
    fn test_multiple_values_are_wrapped_in_order() {
        let filter = Filter::in_list("Somme", [12, 10, 11]);
        let values: Vec<&str> = filter.values().iter().map(|v| v.rendered()).collect();
        assert_eq!(values, vec!["12", "10", "11"]);
        assert!(matches!(filter.node().value(), Some(ValuePart::List(_))));
    }

    #[test]
    fn test_mixed_inputs() {
        let filter = Filter::new(
            OperatorKind::InList,
            "Code",
            vec![ScalarInput::from("A"), ScalarInput::from(2), ScalarInput::from(false)],
        );
        assert_eq!(
            filter.render(),
            concat!(
                r#"<In><FieldRef Name="Code" /><Values>"#,
                r#"<Value Type="Text">A</Value><Value Type="Integer">2</Value><Value Type="Integer">0</Value>"#,
                r#"</Values></In>"#
            )
        );
    }

    #[test]
    fn test_unconventional_arity_is_built_permissively() {
        let filter = Filter::new(OperatorKind::Equal, "Somme", [1, 2, 3]);
        assert!(filter.render().starts_with(r#"<Eq><FieldRef Name="Somme" /><Values>"#));
        assert!(!filter.is_conventional());

        let err = filter.validate().unwrap_err();
        assert_eq!(
            err,
            CamlError::ArityMismatch {
                operator: "Eq".to_string(),
                expected: "exactly one value",
                found: 3,
            }
        );

        let with_value = Filter::single(OperatorKind::IsNull, "Somme", "x");
        assert!(with_value.validate().is_err());
        assert!(Filter::bare(OperatorKind::Equal, "Somme").validate().is_err());
    }

    #[test]
    fn test_field_ref_always_first() {
        for op in OperatorKind::ALL {
            let rendered = Filter::new(op, "F", ["a", "b"]).render();
            let field_pos = rendered.find("<FieldRef").unwrap();
            let value_pos = rendered.find("<Value").unwrap();
            assert_eq!(field_pos, op.tag().len() + 2);
            assert!(field_pos < value_pos);
        }
    }
}
