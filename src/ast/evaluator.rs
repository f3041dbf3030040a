use crate::ast::{ASTNode, Parser};
use crate::environment::{build_environment, is_identifier, Environment};
use crate::error::EvalError;
use crate::formula::Formula;
use crate::functions::register_functions;
use crate::options::EvaluatorOptions;
use crate::report::{EvaluationReport, OutputResult, OutputValue};
use log::{debug, warn};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

pub type Function = Arc<dyn Fn(&[f64]) -> Result<f64, EvalError> + Send + Sync>;

/// Tree-walking evaluator over the fixed builtin library.
///
/// The builtin table is filled once in [`Evaluator::new`] and never changes
/// afterwards, so one evaluator can be shared across threads.
pub struct Evaluator {
    functions: HashMap<String, Function>,
    constants: HashMap<String, f64>,
    options: EvaluatorOptions,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvaluatorOptions::default())
    }
}

impl Evaluator {
    pub fn new(options: EvaluatorOptions) -> Self {
        let mut evaluator = Self {
            functions: HashMap::new(),
            constants: HashMap::new(),
            options,
        };
        register_functions(&mut evaluator);
        evaluator
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    pub(crate) fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[f64]) -> Result<f64, EvalError> + Send + Sync + 'static,
    {
        self.functions.insert(name.to_string(), Arc::new(function));
    }

    pub(crate) fn register_constant(&mut self, name: &str, value: f64) {
        self.constants.insert(name.to_string(), value);
    }

    /// Names of every builtin function and constant, sorted.
    pub fn builtin_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .functions
            .keys()
            .chain(self.constants.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    fn check_limits(&self, expression: &str) -> Result<(), EvalError> {
        let length = expression.chars().count();
        if length > self.options.max_length {
            return Err(EvalError::TooLong {
                length,
                limit: self.options.max_length,
            });
        }

        let mut depth = 0usize;
        let mut deepest = 0usize;
        for c in expression.chars() {
            match c {
                '(' => {
                    depth += 1;
                    deepest = deepest.max(depth);
                }
                ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        if deepest > self.options.max_depth {
            return Err(EvalError::TooDeep {
                depth: deepest,
                limit: self.options.max_depth,
            });
        }

        Ok(())
    }

    /// Parse an expression string into an AST after checking the configured limits.
    pub fn parse_expression(&self, expression: &str) -> Result<ASTNode, EvalError> {
        self.check_limits(expression)?;
        Parser::parse_expression(expression)
    }

    /// Evaluates a given expression string against a provided context.
    ///
    /// # Arguments
    ///
    /// * `expression` - The arithmetic expression to evaluate.
    /// * `context` - Variable bindings; these shadow builtins of the same name.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the evaluation succeeds, including non-finite results.
    /// * `Err(EvalError)` if parsing, name resolution or a builtin call fails.
    pub fn evaluate_expression(
        &self,
        expression: &str,
        context: &HashMap<String, f64>,
    ) -> Result<f64, EvalError> {
        let ast = self.parse_expression(expression)?;
        self.evaluate(&ast, context)
    }

    /// Evaluates an `ASTNode` with a given context.
    pub fn evaluate(&self, ast: &ASTNode, context: &HashMap<String, f64>) -> Result<f64, EvalError> {
        match ast {
            ASTNode::Number(n) => Ok(*n),

            ASTNode::Identifier(name) => self.resolve_value(name, context),

            ASTNode::Negate(operand) => Ok(-self.evaluate(operand, context)?),

            ASTNode::BinaryOperation { first, rest } => {
                let mut value = self.evaluate(first, context)?;
                for (operator, operand) in rest {
                    value = operator.apply(value, self.evaluate(operand, context)?);
                }
                Ok(value)
            }

            ASTNode::LogicalOperation { first, rest } => {
                let mut value = self.evaluate(first, context)?;
                for (operator, operand) in rest {
                    value = match operator.short_circuit(value) {
                        Some(decided) => decided,
                        None => self.evaluate(operand, context)?,
                    };
                }
                Ok(value)
            }

            ASTNode::FunctionCall { name, args } => {
                let function = self.resolve_function(name, context)?;
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg, context))
                    .collect::<Result<Vec<f64>, EvalError>>()?;
                function(&values)
            }
        }
    }

    fn resolve_value(&self, name: &str, context: &HashMap<String, f64>) -> Result<f64, EvalError> {
        if let Some(value) = context.get(name) {
            return Ok(*value);
        }
        if let Some(value) = self.constants.get(name) {
            return Ok(*value);
        }
        if self.functions.contains_key(name) {
            return Err(EvalError::NotAValue {
                name: name.to_string(),
            });
        }
        Err(EvalError::unbound(name))
    }

    fn resolve_function(
        &self,
        name: &str,
        context: &HashMap<String, f64>,
    ) -> Result<&Function, EvalError> {
        if context.contains_key(name) || self.constants.contains_key(name) {
            return Err(EvalError::NotCallable {
                name: name.to_string(),
            });
        }
        self.functions
            .get(name)
            .ok_or_else(|| EvalError::unbound(name))
    }

    /// Evaluates every output of `formula` in declaration order.
    ///
    /// Each output is isolated: a failing expression becomes an error row and
    /// the remaining outputs are still evaluated.
    pub fn evaluate_formula(
        &self,
        formula: &Formula,
        inputs: &HashMap<String, f64>,
    ) -> EvaluationReport {
        let environment = build_environment(formula, inputs);
        self.evaluate_outputs(formula, &environment)
    }

    /// Evaluates the outputs of `formula` against an already merged environment.
    pub fn evaluate_outputs(&self, formula: &Formula, environment: &Environment) -> EvaluationReport {
        for name in environment.keys().filter(|name| !is_identifier(name)) {
            warn!(
                "Formula '{}': binding '{}' is not a valid identifier and cannot be referenced",
                formula.id, name
            );
        }

        let outputs = formula
            .outputs
            .iter()
            .map(|output| {
                let result = self.evaluate_expression(&output.expression, environment);
                if let Err(err) = &result {
                    debug!(
                        "Formula '{}': output '{}' failed: {}",
                        formula.id, output.name, err
                    );
                }
                OutputResult {
                    name: output.name.clone(),
                    value: OutputValue::from(result),
                }
            })
            .collect();

        EvaluationReport {
            outputs,
            error: None,
        }
    }

    /// Evaluates the same formula against many input sets in parallel.
    /// Reports come back in the order of `input_sets`.
    pub fn evaluate_many(
        &self,
        formula: &Formula,
        input_sets: &[HashMap<String, f64>],
    ) -> Vec<EvaluationReport> {
        input_sets
            .par_iter()
            .map(|inputs| self.evaluate_formula(formula, inputs))
            .collect()
    }
}
