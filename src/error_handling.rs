use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CalcError {
    #[error("invalid character, '{0}', encountered")]
    invalid_character(char),

    #[error("'{0}' is not a valid number")]
    invalid_number(String),

    #[error("the '{0}' operator has been misplaced")]
    invalid_operator(String),

    #[error("did not expect '{0}'")]
    did_not_expect(String),

    #[error("could not find '{0}'")]
    could_not_find(String),

    #[error("two operands and one operator are required, found {0} tokens")]
    wrong_operand_count(usize),

    #[error("expression ended abruptly")]
    abrupt_end,

    #[error("division by zero")]
    divide_by_zero,
}

/// The two ways a textual evaluation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    parse,
    divide_by_zero,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::divide_by_zero => ErrorKind::divide_by_zero,
            _ => ErrorKind::parse,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
