//! Keypad front end: key presses accumulated into an expression.

mod buffer;
mod key;

pub use buffer::{InputBuffer, Screen};
pub use key::{Key, KeyError};
