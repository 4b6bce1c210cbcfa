use crate::error_handling::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    number, operator, punctuation
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(content: String, kind: TokenKind) -> Self {
        Self{content, kind}
    }
}

pub trait Scanner {
    fn get_current(&self) -> Option<&Token>;
    fn advance(&mut self) -> Result<()>;
    fn is_valid(&self) -> bool;
}

/// Walks a token list that has already been produced.
pub struct SimpleScanner {
    tokens: Vec<Token>,
    index: usize,
}

impl SimpleScanner {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self{tokens, index: 0}
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Scanner for SimpleScanner {
    fn get_current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) -> Result<()> {
        self.index += 1;
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.index < self.tokens.len()
    }
}

/// Lexes an expression one token at a time. Whitespace is removed up front,
/// so "1 2" scans as the single number 12.
pub struct StringScanner {
    chars: Vec<char>,
    token: Option<Token>,
    index: usize,
}

pub fn is_operator(character: char) -> bool {
    matches!(character, '+' | '-' | 'x' | 'X' | '*' | '×' | '/' | '÷')
}

pub fn is_punctuation(character: char) -> bool {
    matches!(character, '(' | ')')
}

fn is_digit_or_dot(character: char) -> bool {
    character.is_ascii_digit() || character == '.'
}

pub fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

pub fn has_parentheses(input: &str) -> bool {
    input.contains(is_punctuation)
}

impl StringScanner {
    pub fn new(string: &str) -> Result<Self> {
        let mut source = Self {
            chars: strip_whitespace(string).chars().collect(),
            token: None,
            index: 0,
        };
        source.advance()?;
        Ok(source)
    }

    fn count<P: Fn(char) -> bool>(&self, predicate: P) -> usize {
        self.chars[self.index..]
            .iter()
            .take_while(|c| predicate(**c))
            .count()
    }

    fn take(&self, count: usize) -> String {
        self.chars[self.index..(self.index + count)].iter().collect()
    }

    fn get_token(&self) -> Result<Option<Token>> {
        let Some(&current) = self.chars.get(self.index) else {
            return Ok(None);
        };

        let token = if is_digit_or_dot(current) {
            Token::new(self.take(self.count(is_digit_or_dot)), TokenKind::number)
        } else if is_operator(current) {
            Token::new(self.take(1), TokenKind::operator)
        } else if is_punctuation(current) {
            Token::new(self.take(1), TokenKind::punctuation)
        } else {
            return Err(CalcError::invalid_character(current));
        };
        Ok(Some(token))
    }
}

impl Scanner for StringScanner {
    fn get_current(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn advance(&mut self) -> Result<()> {
        let token = self.get_token()?;
        if let Some(token) = &token {
            self.index += token.content.chars().count();
        }
        self.token = token;
        Ok(())
    }

    fn is_valid(&self) -> bool {
        self.token.is_some()
    }
}

/// Splits a parenthesis-free expression around its operator characters.
/// Everything between two operators becomes one operand token, whether or
/// not it is a well formed number.
pub fn split_flat(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut operand = String::new();

    for character in strip_whitespace(input).chars() {
        if is_operator(character) {
            if !operand.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut operand), TokenKind::number));
            }
            tokens.push(Token::new(character.to_string(), TokenKind::operator));
        } else {
            operand.push(character);
        }
    }
    if !operand.is_empty() {
        tokens.push(Token::new(operand, TokenKind::number));
    }
    tokens
}
