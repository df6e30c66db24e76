//! Calculator module for evaluating arithmetic expressions.
//!
//! This module provides functionality to:
//! - Scan expression text into numbers, operators and parentheses
//! - Reduce the tokens with operator precedence into a single value
//! - Format results for display
//! - Copy results to the clipboard

mod clipboard;
mod error;
mod evaluation;
mod operator;
mod reducer;
mod token;

pub use clipboard::{ClipboardError, copy_to_clipboard};
pub use error::{ErrorKind, EvalError, Malformed};
pub use evaluation::{CalcResult, Evaluator, evaluate, format_display, format_plain};
pub use operator::Operator;
pub use reducer::Reducer;
pub use token::{Scanner, Token, UnknownChars, is_number_char, tokenize};
