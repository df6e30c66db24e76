//! Scanner turning expression text into tokens.
//!
//! The input is walked once, left to right. Consecutive digits and decimal
//! points form one number literal; everything that is not a number, an
//! operator or a parenthesis is either skipped or rejected depending on
//! [`UnknownChars`].

use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::CharIndices;

use super::error::EvalError;
use super::operator::Operator;

/// A lexical unit of an expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// What to do with characters that are not part of the expression grammar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownChars {
    /// Treat them like whitespace.
    #[default]
    Skip,
    /// Fail with [`EvalError::UnexpectedCharacter`].
    Reject,
}

/// Whether `c` can be part of a number literal.
pub fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Iterator over the tokens of an expression.
pub struct Scanner<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    unknown_chars: UnknownChars,
    /// Character position, used for error reporting.
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, unknown_chars: UnknownChars) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            unknown_chars,
            pos: 0,
        }
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let next = self.chars.next();
        if next.is_some() {
            self.pos += 1;
        }
        next
    }

    /// Consume the maximal run of number characters starting at `start`.
    fn number(&mut self, start: usize) -> Result<Token, EvalError> {
        let mut end = start + 1;
        while let Some(&(i, c)) = self.chars.peek() {
            if !is_number_char(c) {
                break;
            }
            end = i + c.len_utf8();
            self.bump();
        }

        let literal = &self.input[start..end];
        if literal.matches('.').count() > 1 {
            return Err(EvalError::NumericParseFailure {
                literal: literal.to_string(),
            });
        }

        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| EvalError::NumericParseFailure {
                literal: literal.to_string(),
            })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let pos = self.pos;
            let (i, c) = self.bump()?;

            let token = match c {
                '(' => Ok(Token::LeftParen),
                ')' => Ok(Token::RightParen),
                c if is_number_char(c) => self.number(i),
                c => match Operator::from_char(c) {
                    Some(op) => Ok(Token::Operator(op)),
                    None => match self.unknown_chars {
                        UnknownChars::Skip => continue,
                        UnknownChars::Reject => {
                            Err(EvalError::UnexpectedCharacter { ch: c, pos })
                        }
                    },
                },
            };
            return Some(token);
        }
    }
}

/// Scan the whole input, stopping at the first error.
pub fn tokenize(input: &str, unknown_chars: UnknownChars) -> Result<Vec<Token>, EvalError> {
    Scanner::new(input, unknown_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Result<Vec<Token>, EvalError> {
        tokenize(input, UnknownChars::Skip)
    }

    #[test]
    fn test_numbers_are_grouped() {
        assert_eq!(
            scan("12+3.5").unwrap(),
            vec![
                Token::Number(12.0),
                Token::Operator(Operator::Add),
                Token::Number(3.5),
            ]
        );
    }

    #[test]
    fn test_parentheses() {
        assert_eq!(
            scan("(1)").unwrap(),
            vec![Token::LeftParen, Token::Number(1.0), Token::RightParen]
        );
    }

    #[test]
    fn test_leading_and_trailing_decimal_point() {
        assert_eq!(scan(".5").unwrap(), vec![Token::Number(0.5)]);
        assert_eq!(scan("5.").unwrap(), vec![Token::Number(5.0)]);
    }

    #[test]
    fn test_multiple_decimal_points_rejected() {
        assert_eq!(
            scan("1.2.3"),
            Err(EvalError::NumericParseFailure {
                literal: "1.2.3".to_string()
            })
        );
    }

    #[test]
    fn test_lone_decimal_point_rejected() {
        assert!(matches!(
            scan("."),
            Err(EvalError::NumericParseFailure { .. })
        ));
    }

    #[test]
    fn test_unknown_chars_skipped() {
        assert_eq!(
            scan(" 1 x+ 2 ").unwrap(),
            vec![
                Token::Number(1.0),
                Token::Operator(Operator::Add),
                Token::Number(2.0),
            ]
        );
    }

    #[test]
    fn test_whitespace_splits_numbers() {
        assert_eq!(
            scan("1 2").unwrap(),
            vec![Token::Number(1.0), Token::Number(2.0)]
        );
    }

    #[test]
    fn test_unknown_chars_rejected() {
        assert_eq!(
            tokenize("1 + é", UnknownChars::Reject),
            Err(EvalError::UnexpectedCharacter { ch: ' ', pos: 1 })
        );
        assert_eq!(
            tokenize("12+é", UnknownChars::Reject),
            Err(EvalError::UnexpectedCharacter { ch: 'é', pos: 3 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(scan("").unwrap(), vec![]);
    }
}
