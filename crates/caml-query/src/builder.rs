//! Query definitions
//!
//! A serde model for describing a query as data, e.g. in a JSON file:
//!
//! ```json
//! {
//!   "where": {"and": [
//!     {"filter": {"operator": "Neq", "field": "Title", "values": ["My book"]}},
//!     {"filter": {"operator": "IsNull", "field": "Author"}}
//!   ]},
//!   "order_by": {"field": "Created", "ascending": false}
//! }
//! ```
//!
//! Values follow the `ScalarInput::from_json` rules, so an unsupported value
//! surfaces as `CamlError::InvalidValueType` rather than a parse error.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use caml_core::{CamlError, CamlResult};

use crate::filters::Filter;
use crate::groups::{Expression, Group, LogicalKind};
use crate::operators::OperatorKind;
use crate::query::Query;
use crate::values::ScalarInput;

/// Whole query: root node plus optional ordering
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QueryDefinition {
    #[serde(rename = "where")]
    pub root: NodeDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderByDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeDefinition {
    Filter(FilterDefinition),
    And(Vec<NodeDefinition>),
    Or(Vec<NodeDefinition>),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FilterDefinition {
    /// Markup tag (`Eq`) or operator name (`Equal`)
    pub operator: String,
    pub field: String,
    #[serde(default)]
    pub values: Vec<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderByDefinition {
    pub field: String,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl QueryDefinition {
    /// Parse a definition from JSON text
    pub fn from_json_str(text: &str) -> CamlResult<Self> {
        serde_json::from_str(text).map_err(|e| CamlError::Definition(e.to_string()))
    }

    /// Build the query, accepting any operator/arity combination
    pub fn build(&self) -> CamlResult<Query> {
        self.build_with(false)
    }

    /// Build the query, rejecting filters whose value count does not fit
    pub fn build_strict(&self) -> CamlResult<Query> {
        self.build_with(true)
    }

    fn build_with(&self, strict: bool) -> CamlResult<Query> {
        let mut query = Query::new(self.root.build(strict)?);
        if let Some(order) = &self.order_by {
            query.set_order_by(order.field.clone(), order.ascending);
        }
        Ok(query)
    }
}

impl NodeDefinition {
    fn build(&self, strict: bool) -> CamlResult<Expression> {
        match self {
            Self::Filter(def) => def.build(strict).map(Expression::from),
            Self::And(children) => Self::build_group(LogicalKind::And, children, strict),
            Self::Or(children) => Self::build_group(LogicalKind::Or, children, strict),
        }
    }

    fn build_group(
        kind: LogicalKind,
        children: &[NodeDefinition],
        strict: bool,
    ) -> CamlResult<Expression> {
        let children = children
            .iter()
            .map(|child| child.build(strict))
            .collect::<CamlResult<Vec<_>>>()?;
        Ok(Group::new(kind, children).into())
    }
}

impl FilterDefinition {
    fn build(&self, strict: bool) -> CamlResult<Filter> {
        let operator: OperatorKind = self.operator.parse()?;
        let values = self
            .values
            .iter()
            .map(ScalarInput::from_json)
            .collect::<CamlResult<Vec<_>>>()?;

        let filter = Filter::new(operator, self.field.clone(), values);
        if strict {
            filter.validate()?;
        }
        Ok(filter)
    }
}

/// Helper functions for common queries
pub mod presets {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;

    /// Items created within `[from, to]`, oldest first
    pub fn created_between(from: NaiveDate, to: NaiveDate) -> Query {
        Query::new(Group::and([
            Filter::greater_or_equal("Created", from),
            Filter::lower_or_equal("Created", to),
        ]))
        .order_by_asc("Created")
    }

    /// Items modified at or after `since`, most recent first
    pub fn modified_since(since: NaiveDateTime) -> Query {
        Query::new(Filter::greater_or_equal("Modified", since)).order_by("Modified", false)
    }

    /// Items whose title contains `text`, sorted by title
    pub fn title_search(text: impl Into<String>) -> Query {
        Query::new(Filter::contains("Title", text.into())).order_by_asc("Title")
    }

    /// Items whose `field` is one of `values`
    pub fn any_of<I>(field: impl Into<String>, values: I) -> Query
    where
        I: IntoIterator,
        I::Item: Into<ScalarInput>,
    {
        Query::new(Filter::in_list(field, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn definition(value: JsonValue) -> QueryDefinition {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_build_filter() {
        let def = definition(json!({
            "where": {"filter": {"operator": "Eq", "field": "Somme", "values": [2]}}
        }));
        assert_eq!(
            def.build().unwrap().query_text(),
            r#"<Where><Eq><FieldRef Name="Somme" /><Value Type="Integer">2</Value></Eq></Where>"#
        );
    }

    #[test]
    fn test_build_nested_with_order() {
        let def = QueryDefinition::from_json_str(
            r#"{
                "where": {"or": [
                    {"and": [
                        {"filter": {"operator": "Different", "field": "Title", "values": ["My book"]}},
                        {"filter": {"operator": "BeginsWith", "field": "Author", "values": ["Georges"]}}
                    ]},
                    {"filter": {"operator": "Leq", "field": "Price", "values": [200]}}
                ]},
                "order_by": {"field": "Created"}
            }"#,
        )
        .unwrap();

        assert_eq!(
            def.build().unwrap().query_text(),
            concat!(
                r#"<Where><Or><And><Neq><FieldRef Name="Title" /><Value Type="Text">My book</Value></Neq>"#,
                r#"<BeginsWith><FieldRef Name="Author" /><Value Type="Text">Georges</Value></BeginsWith></And>"#,
                r#"<Leq><FieldRef Name="Price" /><Value Type="Integer">200</Value></Leq></Or></Where>"#,
                r#"<OrderBy><FieldRef Name="Created" Ascending="True" /></OrderBy>"#
            )
        );
    }

    #[test]
    fn test_build_dates_and_lists() {
        let def = definition(json!({
            "where": {"and": [
                {"filter": {"operator": "Geq", "field": "Created", "values": [{"date": "2021-11-17"}]}},
                {"filter": {"operator": "In", "field": "Somme", "values": [10, 11]}},
                {"filter": {"operator": "IsNotNull", "field": "Author"}}
            ]},
            "order_by": {"field": "Created", "ascending": false}
        }));

        assert_eq!(
            def.build().unwrap().query_text(),
            concat!(
                r#"<Where><And>"#,
                r#"<Geq><FieldRef Name="Created" /><Value IncludeTimeValue="FALSE" Type="DateTime">2021-11-17</Value></Geq>"#,
                r#"<In><FieldRef Name="Somme" /><Values><Value Type="Integer">10</Value><Value Type="Integer">11</Value></Values></In>"#,
                r#"<IsNotNull><FieldRef Name="Author" /></IsNotNull>"#,
                r#"</And></Where><OrderBy><FieldRef Name="Created" Ascending="False" /></OrderBy>"#
            )
        );
    }

    #[test]
    fn test_unsupported_value_is_invalid_value_type() {
        let def = definition(json!({
            "where": {"filter": {"operator": "Eq", "field": "Somme", "values": [null]}}
        }));
        let err = def.build().unwrap_err();
        assert_eq!(err.error_code(), "invalid_value_type");
    }

    #[test]
    fn test_unknown_operator() {
        let def = definition(json!({
            "where": {"filter": {"operator": "Like", "field": "Title", "values": ["x"]}}
        }));
        assert!(matches!(def.build(), Err(CamlError::Definition(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = QueryDefinition::from_json_str(r#"{"where": {"xor": []}}"#).unwrap_err();
        assert_eq!(err.error_code(), "invalid_definition");
    }

    #[test]
    fn test_strict_build() {
        let def = definition(json!({
            "where": {"filter": {"operator": "Eq", "field": "Somme", "values": [1, 2, 3]}}
        }));
        assert!(def.build().is_ok());
        assert!(matches!(
            def.build_strict(),
            Err(CamlError::ArityMismatch { found: 3, .. })
        ));
    }

    #[test]
    fn test_definition_round_trip_through_serde() {
        let def = definition(json!({
            "where": {"filter": {"operator": "IsNull", "field": "Somme"}}
        }));
        let again: QueryDefinition =
            serde_json::from_str(&serde_json::to_string(&def).unwrap()).unwrap();
        assert_eq!(def, again);
    }

    #[test]
    fn test_presets() {
        let from = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
        let query = presets::created_between(from, to);
        assert!(query.query_text().starts_with(
            r#"<Where><And><Geq><FieldRef Name="Created" /><Value IncludeTimeValue="FALSE" Type="DateTime">2021-01-01</Value></Geq>"#
        ));
        assert!(query.is_ordered());

        let since = from.and_hms_opt(8, 30, 0).unwrap();
        assert!(presets::modified_since(since)
            .query_text()
            .ends_with(r#"<OrderBy><FieldRef Name="Modified" Ascending="False" /></OrderBy>"#));

        assert!(presets::title_search("book")
            .query_text()
            .contains(r#"<Contains><FieldRef Name="Title" /><Value Type="Text">book</Value></Contains>"#));

        assert_eq!(
            presets::any_of("Status", ["Open", "Closed"]).query_text(),
            r#"<Where><In><FieldRef Name="Status" /><Values><Value Type="Text">Open</Value><Value Type="Text">Closed</Value></Values></In></Where>"#
        );
    }
}
