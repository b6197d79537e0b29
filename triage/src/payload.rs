//! Coercion of client requests into the external risk service contract.
//!
//! Clients send loosely typed JSON: numbers as strings, symptoms as either a
//! comma separated string or a list. The coercion rules follow the way
//! JavaScript clients treat the same values (`parseInt`, `parseFloat` and
//! truthiness), so a form that works in the browser produces the same payload
//! here.

use serde_json::Value;

use crate::models::{RiskRequestPayload, Sex, to_external_sex};

/// The fields of a prediction request that are read. Every other key the
/// client sends is dropped here and never reaches the risk service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictRequest {
    pub age: Option<Value>,
    pub gender: Option<Value>,
    pub bmi: Option<Value>,
    pub symptoms: Option<Value>,
}

impl PredictRequest {
    /// Picks the known keys out of a request body.
    ///
    /// Only an object has keys, so any other body (a list, a string, `null`)
    /// yields an empty request and fails validation.
    pub fn from_body(body: &Value) -> Self {
        let field = |key: &str| body.as_object().and_then(|o| o.get(key)).cloned();

        Self {
            age: field("age"),
            gender: field("gender"),
            bmi: field("bmi"),
            symptoms: field("symptoms"),
        }
    }
}

/// One or more required fields were missing or falsy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields: age, gender, bmi")]
pub struct MissingFields {
    /// The fields that actually failed the check.
    pub fields: Vec<&'static str>,
}

/// Whether a JSON value counts as present: not `null`, `false`, `0` or `""`.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Validates and coerces a client request into a [`RiskRequestPayload`].
pub fn build_payload(request: &PredictRequest) -> Result<RiskRequestPayload, MissingFields> {
    let fields: Vec<_> = [
        ("age", &request.age),
        ("gender", &request.gender),
        ("bmi", &request.bmi),
    ]
    .into_iter()
    .filter(|(_, value)| !is_truthy(value.as_ref()))
    .map(|(name, _)| name)
    .collect();

    if !fields.is_empty() {
        return Err(MissingFields { fields });
    }

    let sex = match &request.gender {
        Some(Value::String(gender)) => to_external_sex(gender),
        _ => Sex::Female,
    };

    Ok(RiskRequestPayload {
        age: request.age.as_ref().and_then(parse_int),
        sex,
        bmi: request.bmi.as_ref().map_or(f64::NAN, parse_float),
        symptoms: normalize_symptoms(request.symptoms.as_ref()),
    })
}

/// Integer coercion that truncates toward zero.
///
/// Strings contribute their leading integer, so `"30 years"` is `30` and
/// `"31.9"` is `31`. Returns `None` where `parseInt` would return NaN.
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .map(f64::trunc)
                .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
                .map(|v| v as i64)
        }),
        Value::String(s) => {
            let s = s.trim_start();
            let (negative, rest) = match s.as_bytes().first() {
                Some(b'-') => (true, &s[1..]),
                Some(b'+') => (false, &s[1..]),
                _ => (false, s),
            };
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());

            let magnitude = rest[..end].parse::<i64>().ok()?;
            Some(if negative { -magnitude } else { magnitude })
        }
        _ => None,
    }
}

/// Float coercion from the leading numeric prefix of a value.
///
/// Returns NaN where `parseFloat` would.
pub fn parse_float(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => float_prefix(s.trim_start()),
        _ => f64::NAN,
    }
}

fn float_prefix(s: &str) -> f64 {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    // an exponent only counts if at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

/// Normalizes the `symptoms` field into a list.
///
/// A string is split on `,` with every segment trimmed and empty segments
/// dropped. A list keeps its string elements in order. Anything else, including
/// a missing field, is an empty list.
pub fn normalize_symptoms(symptoms: Option<&Value>) -> Vec<String> {
    match symptoms {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(ToOwned::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}
