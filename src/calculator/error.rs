//! Errors produced while evaluating an expression.

use thiserror::Error;

/// Why an expression could not be reduced to a single value.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Malformed {
    /// An operator had fewer than two operands available.
    #[error("missing an operand")]
    MissingOperand,
    /// Two operands were left without an operator between them.
    #[error("missing an operator")]
    MissingOperator,
    /// A `)` was scanned with no open `(` before it.
    #[error("closing parenthesis without a matching opening one")]
    UnmatchedClose,
    /// A `(` was still open at the end of input.
    #[error("opening parenthesis is never closed")]
    UnclosedGroup,
}

/// Failure returned by the evaluator. No partial result is ever attached.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("malformed expression: {0}")]
    MalformedExpression(Malformed),

    #[error("invalid number literal `{literal}`")]
    NumericParseFailure { literal: String },

    #[error("unexpected character `{ch}` at position {pos}")]
    UnexpectedCharacter { ch: char, pos: usize },

    #[error("result is not a finite number")]
    NonFiniteResult,
}

/// Coarse classification of [`EvalError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    DivisionByZero,
    Malformed,
    NumericParse,
    UnexpectedCharacter,
    NonFinite,
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::MalformedExpression(_) => ErrorKind::Malformed,
            Self::NumericParseFailure { .. } => ErrorKind::NumericParse,
            Self::UnexpectedCharacter { .. } => ErrorKind::UnexpectedCharacter,
            Self::NonFiniteResult => ErrorKind::NonFinite,
        }
    }
}

impl From<Malformed> for EvalError {
    fn from(reason: Malformed) -> Self {
        Self::MalformedExpression(reason)
    }
}
