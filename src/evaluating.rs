use crate::error_handling::*;
use crate::parsing::*;
use crate::scanning::*;
use tracing::debug;

/// How a line of text gets reduced to a number. Input with parentheses goes
/// through the shunting yard and honors precedence; anything else is folded
/// strictly left to right, so "2+3x4" is 20 there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    flat_left_to_right,
    precedence_aware,
}

impl Strategy {
    pub fn for_input(input: &str) -> Self {
        if has_parentheses(input) {
            Self::precedence_aware
        } else {
            Self::flat_left_to_right
        }
    }

    pub fn evaluate(self, input: &str) -> Result<f64> {
        match self {
            Self::flat_left_to_right => evaluate_flat(input),
            Self::precedence_aware => evaluate(input),
        }
    }
}

/// Evaluates an expression with the usual precedence rules and parentheses.
pub fn evaluate(expression: &str) -> Result<f64> {
    let result = parse(expression);
    debug!(expression, ?result, "evaluated with precedence");
    result
}

fn operand(token: Option<&Token>) -> Result<f64> {
    let token = token.ok_or(CalcError::abrupt_end)?;
    token
        .content
        .parse::<f64>()
        .ok()
        // spelled-out "inf" or "nan" is not a number; an overflowing run of
        // digits is, and reaches the screen as the error sentinel
        .filter(|_| token.content.contains(|c: char| c.is_ascii_digit()))
        .ok_or_else(|| CalcError::invalid_number(token.content.clone()))
}

/// Evaluates a parenthesis-free expression from left to right, ignoring
/// precedence. Needs at least two operands and one operator.
pub fn evaluate_flat(expression: &str) -> Result<f64> {
    let mut source = SimpleScanner::new(split_flat(expression));

    let count = source.len();
    if count < 3 || count % 2 == 0 {
        return Err(CalcError::wrong_operand_count(count));
    }

    let mut result = operand(source.get_current())?;
    source.advance()?;

    while source.is_valid() {
        let operator: BinaryOperator = match source.get_current() {
            Some(token) if token.kind == TokenKind::operator => token.content.parse()?,
            Some(token) => return Err(CalcError::did_not_expect(token.content.clone())),
            None => return Err(CalcError::abrupt_end),
        };
        source.advance()?;

        let right = operand(source.get_current())?;
        source.advance()?;

        result = operator.apply(result, right)?;
    }

    debug!(expression, result, "evaluated left to right");
    Ok(result)
}
