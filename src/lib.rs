//! A keypad calculator built around a stack-based expression evaluator.
//!
//! The [`calculator`] module is a pure function from text to a number; the
//! [`keypad`] module is the mutable input buffer a front end keeps around it.

pub mod calculator;
pub mod config;
pub mod keypad;

pub use calculator::{CalcResult, EvalError, Evaluator, evaluate};
pub use config::Config;
pub use keypad::{InputBuffer, Key};
