//! Percentage helpers for price and tax style formulas.

use crate::ast::Evaluator;
use formulary_macros::builtin_fn;

pub fn register(evaluator: &mut Evaluator) {
    evaluator.register_function("addPercent", add_percent);
    evaluator.register_function("subtractPercent", subtract_percent);
    evaluator.register_function("percentOf", percent_of);
}

/// `value` increased by `percent` percent.
#[builtin_fn(name = "addPercent")]
pub fn add_percent(value: f64, percent: f64) -> f64 {
    value * (1.0 + percent / 100.0)
}

/// `value` decreased by `percent` percent.
#[builtin_fn(name = "subtractPercent")]
pub fn subtract_percent(value: f64, percent: f64) -> f64 {
    value * (1.0 - percent / 100.0)
}

/// `percent` percent of `value`.
#[builtin_fn(name = "percentOf")]
pub fn percent_of(value: f64, percent: f64) -> f64 {
    value * (percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_percent() {
        assert_relative_eq!(add_percent(&[100.0, 10.0]).unwrap(), 110.0);
        assert_relative_eq!(add_percent(&[80.0, -25.0]).unwrap(), 60.0);
    }

    #[test]
    fn test_subtract_percent() {
        assert_relative_eq!(subtract_percent(&[200.0, 15.0]).unwrap(), 170.0);
    }

    #[test]
    fn test_percent_of() {
        assert_relative_eq!(percent_of(&[250.0, 20.0]).unwrap(), 50.0);
        assert_eq!(percent_of(&[0.0, 50.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_arity_reports_expression_name() {
        assert_eq!(
            add_percent(&[1.0]).unwrap_err(),
            EvalError::arity("addPercent", 2, 1)
        );
        assert!(percent_of(&[1.0, 2.0, 3.0]).is_err());
    }
}
