//! Formula definitions and their JSON import/export shape.

use crate::error::{FormulaError, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A named numeric value: an adjustable input or a fixed constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    #[serde(rename = "display", default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(rename = "val")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Variable {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            display_label: None,
            value,
            unit: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.display_label = Some(label.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// One result row of a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputExpr {
    pub name: String,
    #[serde(rename = "expr")]
    pub expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl OutputExpr {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
            unit: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// A user-authored bundle of inputs, constants and output expressions.
///
/// Evaluation only ever borrows a `Formula`; it is a plain value owned by
/// whoever edits or stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    pub id: String,
    pub title: String,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub inputs: Vec<Variable>,
    pub constants: Vec<Variable>,
    pub outputs: Vec<OutputExpr>,
}

impl Formula {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            inputs: Vec::new(),
            constants: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_input(mut self, input: Variable) -> Self {
        self.inputs.push(input);
        self
    }

    pub fn with_constant(mut self, constant: Variable) -> Self {
        self.constants.push(constant);
        self
    }

    pub fn with_output(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.outputs.push(OutputExpr::new(name, expression));
        self
    }

    /// Declared default of every input, keyed by name. Callers use this to
    /// seed the input values before the user edits them.
    pub fn default_inputs(&self) -> HashMap<String, f64> {
        self.inputs
            .iter()
            .map(|input| (input.name.clone(), input.value))
            .collect()
    }
}

/// Parses an exported formula list.
///
/// The document must be a JSON array. Entries that do not match the formula
/// shape are skipped with a warning instead of failing the whole import.
pub fn parse_formulas(json: &str) -> Result<Vec<Formula>> {
    let document: serde_json::Value = serde_json::from_str(json)?;
    let serde_json::Value::Array(entries) = document else {
        return Err(FormulaError::NotAnArray);
    };

    let mut formulas = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Formula>(entry) {
            Ok(formula) => formulas.push(formula),
            Err(err) => warn!("Skipping invalid formula at index {}: {}", index, err),
        }
    }

    debug!("Loaded {} valid formulas", formulas.len());
    Ok(formulas)
}

/// Serializes formulas to the pretty-printed export format.
pub fn formulas_to_json(formulas: &[Formula]) -> Result<String> {
    Ok(serde_json::to_string_pretty(formulas)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORTED: &str = r#"[
        {
            "id": "ohm",
            "title": "Ohm's law",
            "desc": "Voltage from current and resistance",
            "inputs": [
                {"name": "I", "display": "Current", "val": 2, "unit": "A"},
                {"name": "R", "val": 5.5}
            ],
            "constants": [],
            "outputs": [{"name": "Voltage", "expr": "I * R", "unit": "V"}]
        },
        {"id": 7, "title": "bad id", "inputs": [], "constants": [], "outputs": []},
        {"id": "no-arrays", "title": "missing lists"},
        null,
        {"id": "bare", "title": "Bare", "inputs": [], "constants": [], "outputs": []}
    ]"#;

    #[test]
    fn test_parse_skips_invalid_entries() {
        let formulas = parse_formulas(EXPORTED).unwrap();
        let ids: Vec<&str> = formulas.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["ohm", "bare"]);

        let ohm = &formulas[0];
        assert_eq!(ohm.description.as_deref(), Some("Voltage from current and resistance"));
        assert_eq!(ohm.inputs[0].display_label.as_deref(), Some("Current"));
        assert_eq!(ohm.inputs[0].value, 2.0);
        assert_eq!(ohm.inputs[1].unit, None);
        assert_eq!(ohm.outputs[0].expression, "I * R");
        assert_eq!(ohm.outputs[0].unit.as_deref(), Some("V"));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_formulas(r#"{"id": "x"}"#),
            Err(FormulaError::NotAnArray)
        ));
        assert!(matches!(parse_formulas("not json"), Err(FormulaError::Json(_))));
    }

    #[test]
    fn test_export_uses_short_field_names() {
        let formula = Formula::new("f", "Area")
            .with_input(Variable::new("r", 1.0).with_unit("m"))
            .with_output("area", "PI * r * r");
        let json = formulas_to_json(&[formula.clone()]).unwrap();

        assert!(json.contains("\"val\""));
        assert!(json.contains("\"expr\""));
        assert!(!json.contains("\"desc\""));
        assert!(!json.contains("\"display\""));
        assert_eq!(parse_formulas(&json).unwrap(), vec![formula]);
    }

    #[test]
    fn test_default_inputs() {
        let formula = Formula::new("f", "Rect")
            .with_input(Variable::new("w", 3.0))
            .with_input(Variable::new("h", 4.0).with_label("Height"));
        let defaults = formula.default_inputs();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults["w"], 3.0);
        assert_eq!(defaults["h"], 4.0);
    }
}
