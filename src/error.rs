use thiserror::Error;

/// Broad classification of a failed expression, used by callers that only
/// need to tell syntax problems apart from binding problems.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    UnboundIdentifier,
    ArityOrType,
    LimitExceeded,
}

/// Failure while parsing or evaluating a single expression.
///
/// These never escape a formula evaluation: the batch evaluator turns each
/// one into an error row for the output that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// The expression does not parse under the arithmetic grammar.
    #[error("syntax error: {message}")]
    Syntax { message: String },

    /// The expression references a name with no variable, constant or builtin.
    #[error("'{name}' is not defined")]
    UnboundIdentifier { name: String },

    /// A builtin was called with the wrong number of arguments.
    #[error("{function} expects {expected} argument(s), got {found}")]
    Arity {
        function: String,
        expected: String,
        found: usize,
    },

    /// Call syntax was applied to something that is not a builtin function.
    #[error("'{name}' is not a function")]
    NotCallable { name: String },

    /// A builtin function was used where a number is required.
    #[error("'{name}' is a function and cannot be used as a value")]
    NotAValue { name: String },

    #[error("expression is {length} characters long, limit is {limit}")]
    TooLong { length: usize, limit: usize },

    #[error("expression nests {depth} levels deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },
}

impl EvalError {
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
        }
    }

    pub fn unbound(name: impl Into<String>) -> Self {
        Self::UnboundIdentifier { name: name.into() }
    }

    /// Arity error for a builtin taking exactly `expected` arguments.
    pub fn arity(function: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::Arity {
            function: function.into(),
            expected: expected.to_string(),
            found,
        }
    }

    /// Arity error for a variadic builtin taking at least `minimum` arguments.
    pub fn arity_at_least(function: impl Into<String>, minimum: usize, found: usize) -> Self {
        Self::Arity {
            function: function.into(),
            expected: format!("at least {}", minimum),
            found,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Syntax { .. } => ErrorKind::Syntax,
            EvalError::UnboundIdentifier { .. } => ErrorKind::UnboundIdentifier,
            EvalError::Arity { .. } | EvalError::NotCallable { .. } | EvalError::NotAValue { .. } => {
                ErrorKind::ArityOrType
            }
            EvalError::TooLong { .. } | EvalError::TooDeep { .. } => ErrorKind::LimitExceeded,
        }
    }
}

/// Errors raised by the formula collection and its JSON import/export.
#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("invalid formula JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("formula document must be a JSON array")]
    NotAnArray,

    #[error("formula `{id}` not found")]
    NotFound { id: String },

    #[error("formula `{id}` already exists")]
    DuplicateId { id: String },
}

pub type Result<T> = std::result::Result<T, FormulaError>;
