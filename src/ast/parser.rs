use crate::ast::{ASTNode, LogicalOperator, Operator};
use crate::error::EvalError;
use log::{debug, trace};
use pest::error::LineColLocation;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "expression.pest"]
pub struct ExpressionParser;

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, expected: &str) -> Result<Pair<'i, Rule>, EvalError> {
    pairs
        .next()
        .ok_or_else(|| EvalError::syntax(format!("Expected {}", expected)))
}

fn rule_label(rule: &Rule) -> String {
    match rule {
        Rule::EOI => "end of expression",
        Rule::OR => "'||'",
        Rule::AND => "'&&'",
        Rule::comparison_operator => "comparison operator",
        Rule::additive_operator => "'+' or '-'",
        Rule::multiplicative_operator => "'*', '/' or '%'",
        Rule::unary_operator => "sign",
        Rule::number => "number",
        Rule::identifier => "identifier",
        Rule::function_call => "function call",
        Rule::group => "parenthesis",
        Rule::arguments => "arguments",
        _ => "expression",
    }
    .to_string()
}

fn describe_parse_error(error: pest::error::Error<Rule>) -> EvalError {
    let column = match error.line_col {
        LineColLocation::Pos((_, column)) => column,
        LineColLocation::Span((_, column), _) => column,
    };
    let error = error.renamed_rules(rule_label);
    EvalError::syntax(format!("{} at column {}", error.variant.message(), column))
}

impl ExpressionParser {
    pub fn parse_expression(input: &str) -> Result<ASTNode, EvalError> {
        debug!("Parsing expression: {}", input);
        let parse_result = ExpressionParser::parse(Rule::expression, input)
            .map_err(describe_parse_error)?
            .next()
            .ok_or_else(|| EvalError::syntax("Failed to parse expression"))?;

        trace!("Parse result: {:#?}", parse_result);
        let mut pairs = parse_result.into_inner();
        Self::build_or_expression(next_pair(&mut pairs, "expression")?)
    }

    fn build_or_expression(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        let mut pairs = pair.into_inner();
        let first = Self::build_and_expression(next_pair(&mut pairs, "operand")?)?;
        let mut rest = Vec::new();

        while let Some(operator_pair) = pairs.next() {
            let operator = LogicalOperator::try_from(operator_pair.as_str())?;
            let operand = Self::build_and_expression(next_pair(&mut pairs, "operand after '||'")?)?;
            rest.push((operator, operand));
        }

        Ok(if rest.is_empty() {
            first
        } else {
            ASTNode::logical_chain(first, rest)
        })
    }

    fn build_and_expression(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        let mut pairs = pair.into_inner();
        let first = Self::build_comparison(next_pair(&mut pairs, "operand")?)?;
        let mut rest = Vec::new();

        while let Some(operator_pair) = pairs.next() {
            let operator = LogicalOperator::try_from(operator_pair.as_str())?;
            let operand = Self::build_comparison(next_pair(&mut pairs, "operand after '&&'")?)?;
            rest.push((operator, operand));
        }

        Ok(if rest.is_empty() {
            first
        } else {
            ASTNode::logical_chain(first, rest)
        })
    }

    fn build_comparison(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        let mut pairs = pair.into_inner();
        let first = Self::build_additive(next_pair(&mut pairs, "operand")?)?;
        let mut rest = Vec::new();

        while let Some(operator_pair) = pairs.next() {
            let operator = Operator::try_from(operator_pair.as_str())?;
            let operand = Self::build_additive(next_pair(&mut pairs, "operand after comparison")?)?;
            rest.push((operator, operand));
        }

        Ok(if rest.is_empty() {
            first
        } else {
            ASTNode::chain(first, rest)
        })
    }

    fn build_additive(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        let mut pairs = pair.into_inner();
        let first = Self::build_term(next_pair(&mut pairs, "operand")?)?;
        let mut rest = Vec::new();

        while let Some(operator_pair) = pairs.next() {
            let operator = Operator::try_from(operator_pair.as_str())?;
            let operand = Self::build_term(next_pair(&mut pairs, "operand after operator")?)?;
            rest.push((operator, operand));
        }

        Ok(if rest.is_empty() {
            first
        } else {
            ASTNode::chain(first, rest)
        })
    }

    fn build_term(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        let mut pairs = pair.into_inner();
        let first = Self::build_unary(next_pair(&mut pairs, "operand")?)?;
        let mut rest = Vec::new();

        while let Some(operator_pair) = pairs.next() {
            let operator = Operator::try_from(operator_pair.as_str())?;
            let operand = Self::build_unary(next_pair(&mut pairs, "operand after operator")?)?;
            rest.push((operator, operand));
        }

        Ok(if rest.is_empty() {
            first
        } else {
            ASTNode::chain(first, rest)
        })
    }

    /// Sign chains collapse to at most one negation, so `- - -x` costs one node.
    fn build_unary(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        let mut negations = 0usize;

        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::unary_operator => match inner.as_str() {
                    "-" => negations += 1,
                    "+" => {}
                    other => {
                        return Err(EvalError::syntax(format!("Unknown sign: {}", other)));
                    }
                },
                _ => {
                    let node = Self::build_primary_expression(inner)?;
                    return Ok(if negations % 2 == 1 {
                        ASTNode::negate(node)
                    } else {
                        node
                    });
                }
            }
        }

        Err(EvalError::syntax("Expected an operand after sign"))
    }

    fn build_primary_expression(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        match pair.as_rule() {
            Rule::number => pair
                .as_str()
                .parse::<f64>()
                .map(ASTNode::Number)
                .map_err(|e| EvalError::syntax(format!("Invalid number '{}': {}", pair.as_str(), e))),
            Rule::identifier => Ok(ASTNode::Identifier(pair.as_str().to_string())),
            Rule::group => {
                let mut inner = pair.into_inner();
                Self::build_or_expression(next_pair(&mut inner, "expression inside parentheses")?)
            }
            Rule::function_call => Self::build_function_call(pair),
            rule => {
                debug!("Unexpected rule in primary expression: {:?}", rule);
                Err(EvalError::syntax(format!(
                    "Unexpected {} in primary expression",
                    rule_label(&rule)
                )))
            }
        }
    }

    fn build_function_call(pair: Pair<Rule>) -> Result<ASTNode, EvalError> {
        let mut inner = pair.into_inner();
        let name = next_pair(&mut inner, "function name")?.as_str().to_string();
        let args = match inner.next() {
            Some(arguments) => arguments
                .into_inner()
                .map(Self::build_or_expression)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        Ok(ASTNode::FunctionCall { name, args })
    }
}
