//! Evaluator configuration.

/// Limits applied to every expression before it is parsed.
///
/// Formulas may come from imported files, so the evaluator bounds both the
/// raw length of an expression and how deeply it nests parentheses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvaluatorOptions {
    /// Maximum number of characters in one expression.
    pub max_length: usize,
    /// Maximum parenthesis nesting, function-call parentheses included.
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            max_length: 4096,
            max_depth: 64,
        }
    }
}

impl EvaluatorOptions {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
