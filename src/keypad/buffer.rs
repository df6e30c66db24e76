//! Caller-held input buffer for a keypad calculator.
//!
//! The buffer accumulates typed characters into an expression and hands it to
//! an [`Evaluator`] on `=`. After a computation the buffer is "fresh": the next
//! digit starts a new expression, while the next operator continues from the
//! result.

use crate::calculator::{CalcResult, Evaluator};
use crate::config::DisplayConfig;

use super::key::Key;

/// What the screen currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    /// Nothing typed since the last reset.
    Placeholder,
    /// The expression being typed.
    Editing,
    /// The formatted result of the last computation.
    Result(String),
    /// The last computation failed.
    Error,
}

#[derive(Clone, Debug)]
pub struct InputBuffer {
    expression: String,
    fresh: bool,
    screen: Screen,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self {
            expression: String::new(),
            fresh: true,
            screen: Screen::Placeholder,
        }
    }
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Whether the next digit starts a new expression.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Append a digit or decimal point, replacing the expression if fresh.
    pub fn append_digit(&mut self, c: char) {
        if self.fresh {
            self.expression.clear();
            self.fresh = false;
        }
        self.expression.push(c);
        self.screen = Screen::Editing;
    }

    /// Append an operator or parenthesis, continuing the current expression.
    pub fn append_symbol(&mut self, c: char) {
        self.expression.push(c);
        self.fresh = false;
        self.screen = Screen::Editing;
    }

    /// Remove the last character, if any.
    pub fn delete_last(&mut self) {
        if self.expression.pop().is_some() {
            self.screen = Screen::Editing;
        }
    }

    /// Reset to the initial state.
    pub fn clear_all(&mut self) {
        self.expression.clear();
        self.fresh = true;
        self.screen = Screen::Placeholder;
    }

    /// Evaluate the expression once.
    ///
    /// On success the expression is replaced by the plain result text so the
    /// computation can be continued. On failure the expression is kept.
    pub fn compute(&mut self, evaluator: &Evaluator, display: &DisplayConfig) -> CalcResult {
        let result = CalcResult::from_evaluation(
            &self.expression,
            evaluator.evaluate(&self.expression),
            display,
        );

        match &result {
            CalcResult::Success {
                display_result,
                plain_result,
                ..
            } => {
                self.expression = plain_result.clone();
                self.screen = Screen::Result(display_result.clone());
            }
            CalcResult::Error { error, .. } => {
                tracing::debug!(expression = %self.expression, %error, "keypad computation failed");
                self.screen = Screen::Error;
            }
        }
        self.fresh = true;
        result
    }

    /// Handle a single key press. Returns the result when `key` is `=`.
    pub fn press(
        &mut self,
        key: Key,
        evaluator: &Evaluator,
        display: &DisplayConfig,
    ) -> Option<CalcResult> {
        match key {
            Key::Digit(_) | Key::Decimal => {
                if let Some(c) = key.input_char() {
                    self.append_digit(c);
                }
            }
            Key::Operator(_) | Key::LeftParen | Key::RightParen => {
                if let Some(c) = key.input_char() {
                    self.append_symbol(c);
                }
            }
            Key::ClearEntry => self.delete_last(),
            Key::AllClear => self.clear_all(),
            Key::Equals => return Some(self.compute(evaluator, display)),
        }
        None
    }

    /// Press every key in order and collect the screen after each `=`.
    ///
    /// If the sequence does not end with `=`, the final screen is collected
    /// as well.
    pub fn replay(
        &mut self,
        keys: &[Key],
        evaluator: &Evaluator,
        display: &DisplayConfig,
    ) -> Vec<String> {
        let mut screens = Vec::new();
        for &key in keys {
            if self.press(key, evaluator, display).is_some() {
                screens.push(self.display(display).to_string());
            }
        }
        if keys.last() != Some(&Key::Equals) {
            screens.push(self.display(display).to_string());
        }
        screens
    }

    /// Press the keys of one input line, then compute unless the buffer is
    /// already fresh. Returns the resulting screen.
    pub fn run_line<'a>(
        &'a mut self,
        keys: &[Key],
        evaluator: &Evaluator,
        display: &'a DisplayConfig,
    ) -> &'a str {
        for &key in keys {
            self.press(key, evaluator, display);
        }
        if !self.fresh {
            self.compute(evaluator, display);
        }
        self.display(display)
    }

    /// Text for the screen. An empty expression shows the placeholder.
    pub fn display<'a>(&'a self, display: &'a DisplayConfig) -> &'a str {
        match &self.screen {
            Screen::Placeholder => &display.placeholder,
            Screen::Editing if self.expression.is_empty() => &display.placeholder,
            Screen::Editing => &self.expression,
            Screen::Result(text) => text,
            Screen::Error => &display.error_message,
        }
    }
}
