use crate::error::EvalError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Outcome of evaluating one output expression.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    /// A finite number.
    Number(f64),
    /// An infinite or NaN result, kept in its display form.
    NonFinite(String),
    Error(EvalError),
}

/// Display text of a non-finite number: `Infinity`, `-Infinity` or `NaN`.
pub fn non_finite_text(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_positive() {
        "Infinity".to_string()
    } else {
        "-Infinity".to_string()
    }
}

impl OutputValue {
    /// Negative zero is stored as `0`.
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() {
            OutputValue::Number(value + 0.0)
        } else {
            OutputValue::NonFinite(non_finite_text(value))
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OutputValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&EvalError> {
        match self {
            OutputValue::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, OutputValue::Error(_))
    }
}

impl From<Result<f64, EvalError>> for OutputValue {
    fn from(result: Result<f64, EvalError>) -> Self {
        match result {
            Ok(value) => OutputValue::from_number(value),
            Err(err) => OutputValue::Error(err),
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputValue::Number(value) => write!(f, "{}", value),
            OutputValue::NonFinite(text) => f.write_str(text),
            OutputValue::Error(_) => f.write_str("Error"),
        }
    }
}

/// One report row, named after the output it came from.
///
/// Serializes as `{"name", "value", "error"?}` where `value` is a number,
/// the non-finite text, or `"Error"`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputResult {
    pub name: String,
    pub value: OutputValue,
}

impl Serialize for OutputResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let error = self.value.error();
        let mut map = serializer.serialize_map(Some(if error.is_some() { 3 } else { 2 }))?;
        map.serialize_entry("name", &self.name)?;
        match &self.value {
            OutputValue::Number(value) => map.serialize_entry("value", value)?,
            OutputValue::NonFinite(text) => map.serialize_entry("value", text)?,
            OutputValue::Error(_) => map.serialize_entry("value", "Error")?,
        }
        if let Some(err) = error {
            map.serialize_entry("error", &err.to_string())?;
        }
        map.end()
    }
}

/// Results of one formula evaluation, in output declaration order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct EvaluationReport {
    pub outputs: Vec<OutputResult>,
    /// Formula-level failure. Per-output failures live in `outputs`, so this
    /// stays `None` for any well-formed formula.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationReport {
    pub fn has_errors(&self) -> bool {
        self.outputs.iter().any(|output| output.value.is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_number() {
        assert_eq!(OutputValue::from_number(4.0), OutputValue::Number(4.0));
        assert_eq!(
            OutputValue::from_number(f64::INFINITY),
            OutputValue::NonFinite("Infinity".to_string())
        );
        assert_eq!(
            OutputValue::from_number(f64::NEG_INFINITY),
            OutputValue::NonFinite("-Infinity".to_string())
        );
        assert_eq!(
            OutputValue::from_number(f64::NAN),
            OutputValue::NonFinite("NaN".to_string())
        );
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let value = OutputValue::from(Ok(0.0 * -1.0)).as_number().unwrap();
        assert_eq!(value, 0.0);
        assert!(value.is_sign_positive());

        let result = OutputResult {
            name: "zero".to_string(),
            value: OutputValue::from_number(-0.0),
        };
        assert_eq!(
            serde_json::to_string(&result).unwrap(),
            r#"{"name":"zero","value":0.0}"#
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(OutputValue::Number(4.0).to_string(), "4");
        assert_eq!(OutputValue::Number(0.5).to_string(), "0.5");
        assert_eq!(OutputValue::from_number(1.0 / 0.0).to_string(), "Infinity");
        assert_eq!(
            OutputValue::Error(EvalError::unbound("b")).to_string(),
            "Error"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let report = EvaluationReport {
            outputs: vec![
                OutputResult {
                    name: "a".to_string(),
                    value: OutputValue::Number(1.5),
                },
                OutputResult {
                    name: "b".to_string(),
                    value: OutputValue::from_number(f64::INFINITY),
                },
                OutputResult {
                    name: "c".to_string(),
                    value: OutputValue::Error(EvalError::unbound("z")),
                },
            ],
            error: None,
        };

        assert!(report.has_errors());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "outputs": [
                    {"name": "a", "value": 1.5},
                    {"name": "b", "value": "Infinity"},
                    {"name": "c", "value": "Error", "error": "'z' is not defined"}
                ]
            })
        );
    }
}
