//! Scalar values
//!
//! A `ScalarInput` is what a caller hands to a filter. It is converted once,
//! at filter construction, into a `ScalarValue` whose text is final.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer};
use serde_json::Value as JsonValue;

use caml_core::{CamlError, CamlResult};

use crate::operators::ValueKind;

/// Length of an ISO-8601 date without a time component (`YYYY-MM-DD`)
const DATE_ONLY_LEN: usize = 10;

/// Years that fit the four-digit ISO form
const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

/// Primitive value accepted by a filter
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarInput {
    Text(String),
    /// Rendered as Integer `1` / `0`
    Bool(bool),
    Integer(i128),
    Float(f64),
    /// Years outside 0..=9999 render with a sign and more than four digits,
    /// which reads as a time component downstream
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl ScalarInput {
    /// Classify a JSON value.
    ///
    /// Booleans are tested before numbers, integers before floats. A number
    /// written without fraction or exponent is an integer (`-0` included) and
    /// must fit in an `i128`. Dates are written as `{"date": "2021-11-17"}` or
    /// `{"datetime": "2021-11-17T20:43:33"}` so that plain strings always stay
    /// text; their year must be within 0..=9999.
    pub fn from_json(value: &JsonValue) -> CamlResult<Self> {
        match value {
            JsonValue::Bool(b) => Ok(Self::Bool(*b)),
            JsonValue::Number(n) => {
                // Number keeps its source text (arbitrary_precision)
                let text = n.to_string();
                if text.contains(['.', 'e', 'E']) {
                    n.as_f64()
                        .map(Self::Float)
                        .ok_or_else(|| CamlError::invalid_value_type(format!("number {}", text)))
                } else {
                    text.parse::<i128>().map(Self::Integer).map_err(|_| {
                        CamlError::invalid_value_type(format!("integer out of range: {}", text))
                    })
                }
            }
            JsonValue::String(s) => Ok(Self::Text(s.clone())),
            JsonValue::Object(map) if map.len() == 1 => {
                if let Some(raw) = map.get("date") {
                    let text = raw
                        .as_str()
                        .ok_or_else(|| CamlError::invalid_value_type(format!("date {}", raw)))?;
                    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
                        CamlError::invalid_value_type(format!("date {:?}: {}", text, e))
                    })?;
                    check_year(date.year(), text)?;
                    Ok(Self::Date(date))
                } else if let Some(raw) = map.get("datetime") {
                    let text = raw.as_str().ok_or_else(|| {
                        CamlError::invalid_value_type(format!("datetime {}", raw))
                    })?;
                    let at = text.parse::<NaiveDateTime>().map_err(|e| {
                        CamlError::invalid_value_type(format!("datetime {:?}: {}", text, e))
                    })?;
                    check_year(at.year(), text)?;
                    Ok(Self::DateTime(at))
                } else {
                    Err(CamlError::invalid_value_type(format!("object {}", value)))
                }
            }
            JsonValue::Null => Err(CamlError::invalid_value_type("null")),
            JsonValue::Array(_) => Err(CamlError::invalid_value_type("array")),
            JsonValue::Object(_) => Err(CamlError::invalid_value_type(format!("object {}", value))),
        }
    }
}

fn check_year(year: i32, text: &str) -> CamlResult<()> {
    if YEAR_RANGE.contains(&year) {
        Ok(())
    } else {
        Err(CamlError::invalid_value_type(format!(
            "year out of range 0..=9999: {:?}",
            text
        )))
    }
}

impl<'de> Deserialize<'de> for ScalarInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = JsonValue::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}

impl From<&str> for ScalarInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScalarInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ScalarInput {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ScalarInput {
                fn from(value: $ty) -> Self {
                    Self::Integer(i128::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

/// Widened through the shortest `f32` digits, so `2.3f32` stays `2.3`
impl From<f32> for ScalarInput {
    fn from(value: f32) -> Self {
        let widened = format!("{:e}", value)
            .parse::<f64>()
            .unwrap_or_else(|_| f64::from(value));
        Self::Float(widened)
    }
}

impl From<f64> for ScalarInput {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<NaiveDate> for ScalarInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for ScalarInput {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// A typed value with its final text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalarValue {
    kind: ValueKind,
    rendered: String,
}

impl ScalarValue {
    /// Convert any supported primitive
    pub fn new(input: impl Into<ScalarInput>) -> Self {
        Self::from(input.into())
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The value text exactly as it appears between the `<Value>` tags
    pub fn rendered(&self) -> &str {
        &self.rendered
    }

    /// Whether a DateTime value carries a time of day.
    ///
    /// Derived from the rendered text: a date-only value is exactly ten characters.
    pub fn has_time_component(&self) -> bool {
        self.kind == ValueKind::DateTime && self.rendered.len() > DATE_ONLY_LEN
    }
}

impl From<ScalarInput> for ScalarValue {
    fn from(input: ScalarInput) -> Self {
        let (kind, rendered) = match input {
            ScalarInput::Text(s) => (ValueKind::Text, s),
            ScalarInput::Bool(b) => (ValueKind::Integer, if b { "1" } else { "0" }.to_string()),
            ScalarInput::Integer(i) => (ValueKind::Integer, i.to_string()),
            ScalarInput::Float(f) => (ValueKind::Number, format_number(f)),
            ScalarInput::Date(d) => {
                if !YEAR_RANGE.contains(&d.year()) {
                    tracing::warn!(date = %d, "Date year outside 0..=9999");
                }
                (ValueKind::DateTime, d.format("%Y-%m-%d").to_string())
            }
            ScalarInput::DateTime(dt) => {
                let truncated = dt.with_nanosecond(0).unwrap_or(dt);
                (
                    ValueKind::DateTime,
                    truncated.format("%Y-%m-%dT%H:%M:%S").to_string(),
                )
            }
        };
        Self { kind, rendered }
    }
}

/// Shortest round-trip form of a float.
///
/// Integral values keep a trailing `.0`, and exponents below -4 or from 16
/// upwards switch to scientific notation (`1e+16`, `1.5e-05`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "-2.3e0"
    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut out = String::new();
    if negative {
        out.push('-');
    }

    if (-4..16).contains(&exponent) {
        if exponent >= 0 {
            let int_len = exponent as usize + 1;
            if digits.len() <= int_len {
                out.push_str(&digits);
                out.push_str(&"0".repeat(int_len - digits.len()));
                out.push_str(".0");
            } else {
                out.push_str(&digits[..int_len]);
                out.push('.');
                out.push_str(&digits[int_len..]);
            }
        } else {
            out.push_str("0.");
            out.push_str(&"0".repeat((-exponent - 1) as usize));
            out.push_str(&digits);
        }
    } else {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push_str(&format!(
            "e{}{:02}",
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        ));
    }

    out
}
