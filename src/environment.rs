//! Merges a formula's constants with caller-supplied input values.

use crate::formula::Formula;
use log::trace;
use std::collections::HashMap;

/// Flat name to value bindings for one evaluation pass.
pub type Environment = HashMap<String, f64>;

/// Builds the variable bindings for evaluating `formula`.
///
/// Constants are inserted first and then overwritten by `inputs`, so a
/// runtime input shadows a constant of the same name. Names are not
/// validated here.
pub fn build_environment(formula: &Formula, inputs: &HashMap<String, f64>) -> Environment {
    let mut environment =
        Environment::with_capacity(formula.constants.len() + inputs.len());

    for constant in &formula.constants {
        environment.insert(constant.name.clone(), constant.value);
    }

    for (name, value) in inputs {
        if let Some(previous) = environment.insert(name.clone(), *value) {
            trace!(
                "Input '{}' = {} shadows constant value {}",
                name,
                value,
                previous
            );
        }
    }

    environment
}

/// Whether `name` can be referenced from an expression: ASCII letters,
/// digits and underscores, not starting with a digit.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Variable;

    #[test]
    fn test_constants_then_inputs() {
        let formula = Formula::new("f", "Fall")
            .with_constant(Variable::new("g", 9.0))
            .with_constant(Variable::new("k", 2.0));
        let inputs = HashMap::from([("g".to_string(), 10.0), ("t".to_string(), 3.0)]);

        let environment = build_environment(&formula, &inputs);

        assert_eq!(environment.len(), 3);
        assert_eq!(environment["g"], 10.0);
        assert_eq!(environment["k"], 2.0);
        assert_eq!(environment["t"], 3.0);
    }

    #[test]
    fn test_does_not_mutate_formula() {
        let formula = Formula::new("f", "Constant").with_constant(Variable::new("c", 1.0));
        let snapshot = formula.clone();
        let _ = build_environment(&formula, &HashMap::from([("c".to_string(), 5.0)]));
        assert_eq!(formula, snapshot);
    }

    #[test]
    fn test_empty() {
        let formula = Formula::new("f", "Empty");
        assert!(build_environment(&formula, &HashMap::new()).is_empty());
    }

    #[test]
    fn test_is_identifier() {
        for valid in ["x", "_x", "mass2", "addPercent", "E"] {
            assert!(is_identifier(valid), "{}", valid);
        }
        for invalid in ["", "2x", "my var", "a-b", "π", "a.b"] {
            assert!(!is_identifier(invalid), "{}", invalid);
        }
    }
}
