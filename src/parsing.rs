use crate::error_handling::*;
use crate::scanning::*;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    square_root,
    percent,
    reciprocal,
}

impl UnaryOperator {
    /// Plain IEEE result; NaN and infinities are left for the caller to judge.
    pub fn call(&self, value: f64) -> f64 {
        use UnaryOperator::*;
        match self {
            square_root => value.sqrt(),
            percent => value / 100.0,
            reciprocal => 1.0 / value,
        }
    }

    pub fn symbol(&self) -> &'static str {
        use UnaryOperator::*;
        match self {
            square_root => "√",
            percent => "%",
            reciprocal => "1/x",
        }
    }
}

impl FromStr for UnaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use UnaryOperator::*;
        match s {
            "√" | "sqrt" => Ok(square_root),
            "%" => Ok(percent),
            "1/x" => Ok(reciprocal),
            _ => Err(CalcError::invalid_operator(s.into())),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
}

impl BinaryOperator {
    /// Plain IEEE arithmetic, so dividing by zero gives an infinity or NaN.
    pub fn call(&self, left: f64, right: f64) -> f64 {
        use BinaryOperator::*;

        match self {
            addition => left + right,
            subtraction => left - right,
            multiplication => left * right,
            division => left / right,
        }
    }

    /// Like `call`, but a zero divisor is an error.
    pub fn apply(&self, left: f64, right: f64) -> Result<f64> {
        if *self == BinaryOperator::division && right == 0.0 {
            return Err(CalcError::divide_by_zero);
        }
        Ok(self.call(left, right))
    }

    pub fn precedence(&self) -> i32 {
        use BinaryOperator::*;
        match self {
            addition | subtraction => 1,
            multiplication | division => 2,
        }
    }

    pub fn symbol(&self) -> &'static str {
        use BinaryOperator::*;
        match self {
            addition => "+",
            subtraction => "-",
            multiplication => "x",
            division => "/",
        }
    }
}

impl FromStr for BinaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            "x" | "X" | "*" | "×" => Ok(multiplication),
            "/" | "÷" => Ok(division),
            _ => Err(CalcError::invalid_operator(s.into())),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub enum Punctuation {
    paren,
}

pub enum StackNode {
    operator(BinaryOperator),
    punctuation(Punctuation),
}

/// Shunting yard that reduces as it goes: operators wait on `stack` and
/// operands on `values`, and every pop of an operator is applied at once.
pub struct Yard {
    values: Vec<f64>,
    stack: Vec<StackNode>,
}

impl Default for Yard {
    fn default() -> Self {
        Self::new()
    }
}

impl Yard {
    pub fn new() -> Self {
        Self{values: Vec::new(), stack: Vec::new()}
    }

    fn add_number(&mut self, content: &str) -> Result<()> {
        let value = content
            .parse::<f64>()
            .map_err(|_| CalcError::invalid_number(content.into()))?;
        self.values.push(value);
        Ok(())
    }

    fn reduce(&mut self, operator: BinaryOperator) -> Result<()> {
        let right = self.values.pop().ok_or(CalcError::abrupt_end)?;
        let left = self.values.pop().ok_or(CalcError::abrupt_end)?;
        let result = operator.apply(left, right)?;
        trace!(left, right, %operator, result, "reduced");
        self.values.push(result);
        Ok(())
    }

    fn pop_higher_operator(&mut self, precedence: i32) -> Option<BinaryOperator> {
        let operator = match self.stack.last() {
            Some(StackNode::operator(operator)) if operator.precedence() >= precedence => *operator,
            _ => return None,
        };
        self.stack.pop();
        Some(operator)
    }

    fn add_operator(&mut self, content: &str) -> Result<()> {
        let operator: BinaryOperator = content.parse()?;

        while let Some(pending) = self.pop_higher_operator(operator.precedence()) {
            self.reduce(pending)?;
        }
        self.stack.push(StackNode::operator(operator));
        Ok(())
    }

    fn add_left_paren(&mut self) {
        self.stack.push(StackNode::punctuation(Punctuation::paren));
    }

    fn add_right_paren(&mut self) -> Result<()> {
        while let Some(stack_node) = self.stack.pop() {
            match stack_node {
                StackNode::punctuation(Punctuation::paren) => return Ok(()),
                StackNode::operator(operator) => self.reduce(operator)?,
            }
        }
        Err(CalcError::could_not_find("(".into()))
    }

    pub fn finish(mut self) -> Result<f64> {
        while let Some(stack_node) = self.stack.pop() {
            match stack_node {
                StackNode::punctuation(Punctuation::paren) => {
                    return Err(CalcError::could_not_find(")".into()));
                },
                StackNode::operator(operator) => self.reduce(operator)?,
            }
        }

        match self.values.as_slice() {
            [result] => Ok(*result),
            [] => Err(CalcError::abrupt_end),
            [_, extra, ..] => Err(CalcError::did_not_expect(extra.to_string())),
        }
    }
}

/// Handles a token where an operand is expected. Returns true once the
/// operand is complete.
pub fn handle_edge(yard: &mut Yard, token: &Token) -> Result<bool> {
    use TokenKind::*;
    match token.kind {
        number => {
            yard.add_number(&token.content)?;
            Ok(true)
        },
        punctuation => {
            match token.content.as_str() {
                "(" => yard.add_left_paren(),
                other => return Err(CalcError::did_not_expect(other.into())),
            }
            Ok(false)
        },
        operator => Err(CalcError::invalid_operator(token.content.clone())),
    }
}

/// Handles a token that follows a complete operand. Returns true once an
/// operator has been accepted and another operand is expected.
pub fn handle_middle(yard: &mut Yard, token: &Token) -> Result<bool> {
    use TokenKind::*;
    match token.kind {
        operator => {
            yard.add_operator(&token.content)?;
            Ok(true)
        },
        punctuation => {
            match token.content.as_str() {
                ")" => yard.add_right_paren()?,
                other => return Err(CalcError::did_not_expect(other.into())),
            }
            Ok(false)
        },
        number => Err(CalcError::did_not_expect(token.content.clone())),
    }
}

/// Evaluates an expression honoring precedence and parentheses.
pub fn parse(expression: &str) -> Result<f64> {
    let mut source = StringScanner::new(expression)?;

    let mut is_edge = true;
    let mut yard = Yard::new();

    while let Some(token) = source.get_current().cloned() {
        if is_edge {
            if handle_edge(&mut yard, &token)? {
                is_edge = false;
            }
        } else if handle_middle(&mut yard, &token)? {
            is_edge = true;
        }
        source.advance()?;
    }

    if is_edge {
        return Err(CalcError::abrupt_end);
    }
    yard.finish()
}
