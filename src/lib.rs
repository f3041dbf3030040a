//! # formulary-rs
//!
//! Evaluates user-defined formulas: named inputs and constants plus output
//! expressions written in a small infix arithmetic language.
//!
//! Expressions are parsed with a dedicated grammar and evaluated by walking
//! the resulting tree, so an expression can only reach its variable bindings
//! and the fixed builtin library.
//!
//! ```rust
//! use formulary_rs::{evaluate_formula, Formula, Variable};
//! use std::collections::HashMap;
//!
//! let formula = Formula::new("fall", "Free fall")
//!     .with_constant(Variable::new("g", 9.81))
//!     .with_output("distance", "0.5 * g * pow(t, 2)");
//!
//! let inputs = HashMap::from([("t".to_string(), 2.0)]);
//! let report = evaluate_formula(&formula, &inputs);
//! assert_eq!(report.outputs[0].value.as_number(), Some(19.62));
//! ```

pub mod ast;
pub mod environment;
pub mod error;
pub mod formula;
pub mod functions;
pub mod library;
pub mod options;
pub mod report;

use std::collections::HashMap;

pub use ast::Evaluator;
pub use environment::{build_environment, is_identifier, Environment};
pub use error::{ErrorKind, EvalError, FormulaError};
pub use formula::{formulas_to_json, parse_formulas, Formula, OutputExpr, Variable};
pub use library::FormulaLibrary;
pub use options::EvaluatorOptions;
pub use report::{EvaluationReport, OutputResult, OutputValue};

/// Evaluates every output of `formula` with the default evaluator.
///
/// `inputs` are layered over the formula's constants. Failures are reported
/// per output and never abort the rest of the report.
pub fn evaluate_formula(formula: &Formula, inputs: &HashMap<String, f64>) -> EvaluationReport {
    Evaluator::default().evaluate_formula(formula, inputs)
}

/// Evaluates a single expression against `context` with the default evaluator.
pub fn evaluate_expression(
    expression: &str,
    context: &HashMap<String, f64>,
) -> Result<f64, EvalError> {
    Evaluator::default().evaluate_expression(expression, context)
}
