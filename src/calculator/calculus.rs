//! Symbolic derivative requests.

use crate::engine::ExpressionEvaluator;

pub const DEFAULT_INPUT: &str = "x^2 + 3x + 1";
pub const DEFAULT_VARIABLE: &str = "x";

/// Shown when the input cannot be differentiated.
pub const INVALID_EXPRESSION: &str = "Invalid expression";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculusCalc {
    input: String,
    variable: String,
    result: Option<String>,
}

impl Default for CalculusCalc {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculusCalc {
    pub fn new() -> Self {
        Self {
            input: DEFAULT_INPUT.to_string(),
            variable: DEFAULT_VARIABLE.to_string(),
            result: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn set_variable(&mut self, variable: impl Into<String>) {
        self.variable = variable.into();
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Differentiate the current input and keep the rendered result.
    pub fn differentiate(&mut self, evaluator: &impl ExpressionEvaluator) -> &str {
        let text = match evaluator.derivative(&self.input, &self.variable) {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(input = %self.input, error = %err, "Derivative failed");
                INVALID_EXPRESSION.to_string()
            }
        };
        self.result.insert(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Bindings, MathEngine};

    /// Value of the rendered derivative at `var = value`.
    fn slope(text: &str, var: &str, value: f64) -> f64 {
        let mut bindings = Bindings::new();
        bindings.insert(var.to_string(), value);
        MathEngine.evaluate(text, &bindings).unwrap()
    }

    #[test]
    fn test_default_input() {
        let mut calc = CalculusCalc::new();
        assert!(calc.result().is_none());
        let text = calc.differentiate(&MathEngine).to_string();
        assert_ne!(text, INVALID_EXPRESSION);
        assert_eq!(calc.result(), Some(text.as_str()));
        // 2x + 3
        assert!((slope(&text, "x", 2.0) - 7.0).abs() < 1e-9);
        assert!((slope(&text, "x", -1.5) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_trig_input() {
        let mut calc = CalculusCalc::new();
        calc.set_input("sin(x)");
        let text = calc.differentiate(&MathEngine).to_string();
        assert!(text.contains("cos"));
        assert!((slope(&text, "x", 0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_other_variable() {
        let mut calc = CalculusCalc::new();
        calc.set_input("t^3 + x");
        calc.set_variable("t");
        let text = calc.differentiate(&MathEngine).to_string();
        assert!(!text.contains('x'));
        assert!((slope(&text, "t", 2.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_input() {
        let mut calc = CalculusCalc::new();
        calc.set_input("x +");
        assert_eq!(calc.differentiate(&MathEngine), INVALID_EXPRESSION);

        calc.set_input("");
        assert_eq!(calc.differentiate(&MathEngine), INVALID_EXPRESSION);
        assert_eq!(calc.result(), Some(INVALID_EXPRESSION));
    }

    #[test]
    fn test_deeply_nested_input() {
        let mut calc = CalculusCalc::new();
        calc.set_input(format!("{}x{}", "(".repeat(3000), ")".repeat(3000)));
        assert_eq!(calc.differentiate(&MathEngine), INVALID_EXPRESSION);
    }
}
