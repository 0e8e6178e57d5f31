//! Expression evaluation and result formatting.
//!
//! Wraps the [`ExpressionEvaluator`] to provide a simple interface for
//! evaluating calculator input and formatting results for the display.

use crate::engine::{Bindings, ExpressionEvaluator};

/// Result of evaluating a calculator expression.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcResult {
    /// The evaluator produced a number (possibly non-finite).
    Success {
        /// The original expression.
        expression: String,
        /// The numeric value.
        value: f64,
        /// Formatted for the display and history.
        display_result: String,
    },
    /// The expression could not be parsed or evaluated.
    Error {
        /// The original expression.
        expression: String,
        /// Error message from the evaluator.
        message: String,
    },
}

impl CalcResult {
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

    /// Get the numeric value (only for successful results).
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Success { value, .. } => Some(*value),
            Self::Error { .. } => None,
        }
    }
}

/// Evaluate calculator input with no variable bindings.
pub fn evaluate_expression(evaluator: &impl ExpressionEvaluator, input: &str) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluator.evaluate(&expression, &Bindings::new()) {
        Ok(value) => CalcResult::Success {
            display_result: format_number(value),
            expression,
            value,
        },
        Err(err) => {
            tracing::debug!(%expression, error = %err, "Evaluation failed");
            CalcResult::Error {
                expression,
                message: err.to_string(),
            }
        }
    }
}

/// Format a number for the display: integers without a fraction, other
/// values with up to 10 decimals and no trailing zeros. Magnitudes too
/// large or too small for that use exponent form.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let msg = if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        };
        return msg.to_string();
    }

    if value.abs() >= 1e15 || (value != 0.0 && value.abs() < 1e-10) {
        exponent_form(value)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.10}", value);
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        // Tiny negatives round to "-0"
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// Ten significant digits in exponent form, e.g. `3.333333333e-13`.
fn exponent_form(value: f64) -> String {
    let formatted = format!("{:.9e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{}e{}", mantissa, exponent)
        }
        None => formatted,
    }
}
