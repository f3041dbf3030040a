use crate::error::EvalError;

mod evaluator;
mod parser;

pub use evaluator::{Evaluator, Function};
pub use parser::ExpressionParser as Parser;

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    Identifier(String),
    Negate(Box<ASTNode>),
    /// A left-associative run of operators from one precedence level,
    /// `first op rest[0] op rest[1] ...`. Kept flat so long chains do not
    /// deepen the tree.
    BinaryOperation {
        first: Box<ASTNode>,
        rest: Vec<(Operator, ASTNode)>,
    },
    LogicalOperation {
        first: Box<ASTNode>,
        rest: Vec<(LogicalOperator, ASTNode)>,
    },
    FunctionCall {
        name: String,
        args: Vec<ASTNode>,
    },
}

impl ASTNode {
    pub fn binary(left: ASTNode, operator: Operator, right: ASTNode) -> Self {
        Self::chain(left, vec![(operator, right)])
    }

    pub fn chain(first: ASTNode, rest: Vec<(Operator, ASTNode)>) -> Self {
        ASTNode::BinaryOperation {
            first: Box::new(first),
            rest,
        }
    }

    pub fn logical(left: ASTNode, operator: LogicalOperator, right: ASTNode) -> Self {
        Self::logical_chain(left, vec![(operator, right)])
    }

    pub fn logical_chain(first: ASTNode, rest: Vec<(LogicalOperator, ASTNode)>) -> Self {
        ASTNode::LogicalOperation {
            first: Box::new(first),
            rest,
        }
    }

    pub fn negate(operand: ASTNode) -> Self {
        ASTNode::Negate(Box::new(operand))
    }

    pub fn identifier(name: &str) -> Self {
        ASTNode::Identifier(name.to_string())
    }

    pub fn call(name: &str, args: Vec<ASTNode>) -> Self {
        ASTNode::FunctionCall {
            name: name.to_string(),
            args,
        }
    }
}

/// Numeric truthiness: zero and NaN are false.
pub fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}

fn from_bool(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Short-circuiting operators. The result is one of the operand values,
/// not a normalized 0/1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    /// Returns the left value when it alone decides the result.
    pub fn short_circuit(&self, left: f64) -> Option<f64> {
        match self {
            LogicalOperator::And if !is_truthy(left) => Some(left),
            LogicalOperator::Or if is_truthy(left) => Some(left),
            _ => None,
        }
    }
}

impl TryFrom<&str> for LogicalOperator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "&&" => Ok(LogicalOperator::And),
            "||" => Ok(LogicalOperator::Or),
            _ => Err(EvalError::syntax(format!(
                "Unknown logical operator: {}",
                value
            ))),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
    NotEqual,
}

impl Operator {
    /// IEEE arithmetic: division by zero yields an infinity or NaN, never an error.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Subtract => left - right,
            Operator::Multiply => left * right,
            Operator::Divide => left / right,
            Operator::Modulo => left % right,
            Operator::GreaterThan => from_bool(left > right),
            Operator::LessThan => from_bool(left < right),
            Operator::GreaterThanOrEqual => from_bool(left >= right),
            Operator::LessThanOrEqual => from_bool(left <= right),
            Operator::Equal => from_bool(left == right),
            Operator::NotEqual => from_bool(left != right),
        }
    }
}

impl TryFrom<&str> for Operator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Subtract),
            "*" => Ok(Operator::Multiply),
            "/" => Ok(Operator::Divide),
            "%" => Ok(Operator::Modulo),
            ">" => Ok(Operator::GreaterThan),
            "<" => Ok(Operator::LessThan),
            ">=" => Ok(Operator::GreaterThanOrEqual),
            "<=" => Ok(Operator::LessThanOrEqual),
            "===" | "==" => Ok(Operator::Equal),
            "!==" | "!=" => Ok(Operator::NotEqual),
            _ => Err(EvalError::syntax(format!("Unknown operator: {}", value))),
        }
    }
}
