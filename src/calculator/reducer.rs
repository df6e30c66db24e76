//! Two-stack precedence reduction.
//!
//! The operator stack stays precedence-ascending from bottom to top between
//! barriers. An incoming operator first reduces everything above the nearest
//! barrier with greater or equal precedence, which makes equal-precedence
//! chains left-associative.
//!
//! Operands and operators must alternate: a number or `(` is only accepted
//! where an operand is expected, an operator or `)` only after one. This keeps
//! every group reducing to exactly one value, so an operator never reaches
//! below its enclosing `(` for an operand.

use super::error::{EvalError, Malformed};
use super::operator::Operator;
use super::token::Token;

/// An entry on the operator stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Operator(Operator),
    /// An open `(`. Never reduced across.
    Barrier,
}

/// Operand and operator stacks for a single evaluation.
#[derive(Debug)]
pub struct Reducer {
    operands: Vec<f64>,
    operators: Vec<Pending>,
    /// Whether the next token must start an operand.
    expect_operand: bool,
}

impl Default for Reducer {
    fn default() -> Self {
        Self {
            operands: Vec::new(),
            operators: Vec::new(),
            expect_operand: true,
        }
    }
}

impl Reducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one token.
    pub fn push(&mut self, token: Token) -> Result<(), EvalError> {
        match token {
            Token::Number(_) | Token::LeftParen if !self.expect_operand => {
                Err(Malformed::MissingOperator.into())
            }
            Token::Operator(_) | Token::RightParen if self.expect_operand => {
                Err(Malformed::MissingOperand.into())
            }
            Token::Number(n) => {
                self.operands.push(n);
                self.expect_operand = false;
                Ok(())
            }
            Token::LeftParen => {
                self.operators.push(Pending::Barrier);
                Ok(())
            }
            Token::RightParen => self.close_group(),
            Token::Operator(op) => {
                self.push_operator(op)?;
                self.expect_operand = true;
                Ok(())
            }
        }
    }

    fn push_operator(&mut self, op: Operator) -> Result<(), EvalError> {
        while let Some(&Pending::Operator(top)) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.operators.pop();
            self.apply(top)?;
        }
        self.operators.push(Pending::Operator(op));
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), EvalError> {
        loop {
            match self.operators.pop() {
                Some(Pending::Operator(op)) => self.apply(op)?,
                Some(Pending::Barrier) => return Ok(()),
                None => return Err(Malformed::UnmatchedClose.into()),
            }
        }
    }

    /// Pop two operands, apply `op` and push the result.
    fn apply(&mut self, op: Operator) -> Result<(), EvalError> {
        let right = self.operands.pop().ok_or(Malformed::MissingOperand)?;
        let left = self.operands.pop().ok_or(Malformed::MissingOperand)?;
        self.operands.push(op.apply(left, right)?);
        Ok(())
    }

    /// Reduce everything left and return the single remaining operand.
    pub fn finish(mut self) -> Result<f64, EvalError> {
        if self.expect_operand {
            return Err(Malformed::MissingOperand.into());
        }
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Operator(op) => self.apply(op)?,
                Pending::Barrier => return Err(Malformed::UnclosedGroup.into()),
            }
        }

        let result = self.operands.pop().ok_or(Malformed::MissingOperand)?;
        if !self.operands.is_empty() {
            return Err(Malformed::MissingOperator.into());
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::token::{UnknownChars, tokenize};

    fn reduce(input: &str) -> Result<f64, EvalError> {
        let mut reducer = Reducer::new();
        for token in tokenize(input, UnknownChars::Skip)? {
            reducer.push(token)?;
        }
        reducer.finish()
    }

    fn malformed(reason: Malformed) -> Result<f64, EvalError> {
        Err(EvalError::MalformedExpression(reason))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(reduce("2+3*4"), Ok(14.0));
        assert_eq!(reduce("2*3+4"), Ok(10.0));
    }

    #[test]
    fn test_left_associative() {
        assert_eq!(reduce("8-3-2"), Ok(3.0));
        assert_eq!(reduce("16/4/2"), Ok(2.0));
        assert_eq!(reduce("2-3+4"), Ok(3.0));
    }

    #[test]
    fn test_barrier_blocks_reduction() {
        assert_eq!(reduce("2*(3+4)"), Ok(14.0));
        assert_eq!(reduce("10-(4-3)"), Ok(9.0));
    }

    #[test]
    fn test_missing_operands() {
        assert_eq!(reduce("+"), malformed(Malformed::MissingOperand));
        assert_eq!(reduce("3+"), malformed(Malformed::MissingOperand));
        assert_eq!(reduce("+5"), malformed(Malformed::MissingOperand));
        assert_eq!(reduce("()"), malformed(Malformed::MissingOperand));
        assert_eq!(reduce(""), malformed(Malformed::MissingOperand));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(reduce("(1+2"), malformed(Malformed::UnclosedGroup));
        assert_eq!(reduce("1+2)"), malformed(Malformed::UnmatchedClose));
    }

    #[test]
    fn test_adjacent_operands() {
        assert_eq!(reduce("2 3"), malformed(Malformed::MissingOperator));
        assert_eq!(reduce("(1)(2)"), malformed(Malformed::MissingOperator));
        assert_eq!(reduce("2(3)"), malformed(Malformed::MissingOperator));
    }

    #[test]
    fn test_missing_and_extra_operand_do_not_cancel() {
        assert_eq!(reduce("2(-3)"), malformed(Malformed::MissingOperator));
        assert_eq!(reduce("1 2+"), malformed(Malformed::MissingOperator));
        assert_eq!(reduce("(2)(3)*"), malformed(Malformed::MissingOperator));
        assert_eq!(reduce("(-3)"), malformed(Malformed::MissingOperand));
        assert_eq!(reduce("(3+)"), malformed(Malformed::MissingOperand));
        assert_eq!(reduce("3*+4"), malformed(Malformed::MissingOperand));
    }
}
