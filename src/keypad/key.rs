//! Keypad buttons and their textual shortcuts.

use thiserror::Error;

use crate::calculator::Operator;

/// A single keypad button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// `0`-`9`, stored as the digit value.
    Digit(u8),
    Decimal,
    Operator(Operator),
    LeftParen,
    RightParen,
    /// Delete the last typed character.
    ClearEntry,
    /// Reset everything.
    AllClear,
    Equals,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown key `{ch}` at position {pos}")]
pub struct KeyError {
    pub ch: char,
    pub pos: usize,
}

impl Key {
    /// Map a character to the button it stands for.
    ///
    /// Besides the button labels, `C` or backspace is clear-entry and `A` or
    /// escape is all-clear.
    pub fn from_char(c: char) -> Option<Self> {
        let key = match c {
            '0'..='9' => Self::Digit(c as u8 - b'0'),
            '.' => Self::Decimal,
            '(' => Self::LeftParen,
            ')' => Self::RightParen,
            '=' => Self::Equals,
            'C' | 'c' | '\u{8}' | '\u{7f}' => Self::ClearEntry,
            'A' | 'a' | '\u{1b}' => Self::AllClear,
            c => Self::Operator(Operator::from_char(c)?),
        };
        Some(key)
    }

    /// Parse a scripted sequence of key presses. Whitespace is ignored.
    pub fn parse_sequence(input: &str) -> Result<Vec<Self>, KeyError> {
        input
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(pos, ch)| Self::from_char(ch).ok_or(KeyError { ch, pos }))
            .collect()
    }

    /// The character this key appends to the expression, if any.
    pub fn input_char(self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op.symbol()),
            Self::LeftParen => Some('('),
            Self::RightParen => Some(')'),
            Self::ClearEntry | Self::AllClear | Self::Equals => None,
        }
    }
}
