//! Expression evaluation and result formatting.
//!
//! Ties the scanner and the reducer together and turns the outcome into
//! something a caller can show: either a formatted number or a generic
//! error message.

use crate::config::DisplayConfig;

use super::error::EvalError;
use super::reducer::Reducer;
use super::token::{Scanner, UnknownChars};

/// Stateless expression evaluator.
///
/// Holds only its scanning policy, so one instance can be shared freely
/// between threads and reused for any number of evaluations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Evaluator {
    pub unknown_chars: UnknownChars,
}

impl Evaluator {
    pub fn new(unknown_chars: UnknownChars) -> Self {
        Self { unknown_chars }
    }

    /// Evaluate `expression` to a single number.
    pub fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let result = self.reduce(expression);
        match &result {
            Ok(value) => tracing::debug!(expression, value, "evaluated expression"),
            Err(err) => tracing::debug!(expression, error = %err, "evaluation failed"),
        }
        result
    }

    fn reduce(&self, expression: &str) -> Result<f64, EvalError> {
        let mut reducer = Reducer::new();
        for token in Scanner::new(expression, self.unknown_chars) {
            reducer.push(token?)?;
        }

        let value = reducer.finish()?;
        if !value.is_finite() {
            return Err(EvalError::NonFiniteResult);
        }
        Ok(value)
    }
}

/// Evaluate `expression` with the default, lenient evaluator.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    Evaluator::default().evaluate(expression)
}

/// Result of evaluating a calculator expression, ready for display.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// Successful calculation with a finite numeric result.
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for display (optionally with thousand separators).
        display_result: String,
        /// Raw number that evaluates back to `value`.
        plain_result: String,
    },
    /// Evaluation failed. The error kind is kept but not shown.
    Error {
        /// The original expression.
        expression: String,
        /// Generic error message to display.
        message: String,
        error: EvalError,
    },
}

impl CalcResult {
    /// Build a displayable result from the outcome of an evaluation.
    pub fn from_evaluation(
        expression: &str,
        result: Result<f64, EvalError>,
        display: &DisplayConfig,
    ) -> Self {
        let expression = expression.to_string();
        match result {
            Ok(value) => Self::Success {
                expression,
                display_result: format_display(value, display.thousands_separator),
                plain_result: format_plain(value),
                value,
            },
            Err(error) => Self::Error {
                expression,
                message: display.error_message.clone(),
                error,
            },
        }
    }

    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display_result, .. } => display_result,
            Self::Error { message, .. } => message,
        }
    }

    /// Get the raw number text (only for successful results).
    pub fn plain(&self) -> Option<&str> {
        match self {
            Self::Success { plain_result, .. } => Some(plain_result),
            Self::Error { .. } => None,
        }
    }

    /// Get the numeric value (only for successful results).
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }
}

/// Format a number for display, optionally with thousand separators.
pub fn format_display(value: f64, thousands_separator: bool) -> String {
    let plain = format_plain(value);
    if !thousands_separator {
        return plain;
    }

    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, dec_part) = match unsigned.find('.') {
        Some(dot_pos) => unsigned.split_at(dot_pos),
        None => (unsigned, ""),
    };

    format!("{}{}{}", sign, group_thousands(int_part), dec_part)
}

/// Insert `,` between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a number as raw text that evaluates back to exactly `value`.
///
/// Uses the shortest round-tripping decimal form, never an exponent, and no
/// fraction for integral values.
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::error::{ErrorKind, Malformed};

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("((1+2)*(3+4))"), Ok(21.0));
        assert_eq!(evaluate("1.5+2.5"), Ok(4.0));
        assert_eq!(evaluate("7"), Ok(7.0));
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(evaluate("8-3-2"), Ok(3.0));
        assert_eq!(evaluate("16/4/2"), Ok(2.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5/0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5/(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("5/0.0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_malformed_input() {
        for input in ["+", "3+", "(1+2", "", "()", "+5"] {
            assert_eq!(
                evaluate(input).map_err(|e| e.kind()),
                Err(ErrorKind::Malformed),
                "input: {input:?}"
            );
        }
    }

    #[test]
    fn test_failure_leaves_no_state() {
        let evaluator = Evaluator::default();
        assert!(evaluator.evaluate("(1+").is_err());
        assert_eq!(evaluator.evaluate("1+1"), Ok(2.0));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let huge = "9".repeat(400);
        assert_eq!(evaluate(&huge), Err(EvalError::NonFiniteResult));
    }

    #[test]
    fn test_strict_evaluator() {
        let strict = Evaluator::new(UnknownChars::Reject);
        assert_eq!(
            strict.evaluate("1+a"),
            Err(EvalError::UnexpectedCharacter { ch: 'a', pos: 2 })
        );
        assert_eq!(evaluate("1+a2"), Ok(3.0));
    }

    #[test]
    fn test_result_feeds_back() {
        let inputs = [
            "2+2",
            "1/3",
            "2/3",
            "10/4",
            "0.1+0.2",
            "123456789*1000",
            "1/1000000000000",
            "100000000000*1000000000",
            "1/7*100000000000000000",
        ];
        for input in inputs {
            let value = evaluate(input).unwrap();
            assert_eq!(evaluate(&format_plain(value)), Ok(value), "{input}");
        }
    }

    #[test]
    fn test_thousand_separators() {
        assert_eq!(format_display(1_000_000.0, true), "1,000,000");
        assert_eq!(format_display(1_000_000.0, false), "1000000");
        assert_eq!(format_display(-1234.5, true), "-1,234.5");
        assert_eq!(format_display(999.0, true), "999");
    }

    #[test]
    fn test_plain_format() {
        assert_eq!(format_plain(4.0), "4");
        assert_eq!(format_plain(-0.0), "0");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(1.0 / 3.0), "0.3333333333333333");
        assert_eq!(format_plain(1e-12), "0.000000000001");
        assert_eq!(format_plain(1e20), "100000000000000000000");
    }

    #[test]
    fn test_calc_result_success() {
        let display = DisplayConfig::default();
        let result = CalcResult::from_evaluation("1000*1000", evaluate("1000*1000"), &display);
        assert!(result.is_success());
        assert_eq!(result.display(), "1,000,000");
        assert_eq!(result.plain(), Some("1000000"));
        assert_eq!(result.expression(), "1000*1000");
    }

    #[test]
    fn test_calc_result_error_is_generic() {
        let display = DisplayConfig::default();
        let div = CalcResult::from_evaluation("5/0", evaluate("5/0"), &display);
        let bad = CalcResult::from_evaluation("3+", evaluate("3+"), &display);
        assert!(!div.is_success());
        assert_eq!(div.display(), bad.display());
        assert_eq!(div.plain(), None);
        assert!(matches!(
            bad,
            CalcResult::Error {
                error: EvalError::MalformedExpression(Malformed::MissingOperand),
                ..
            }
        ));
    }
}
