//! Display buffer and the basic calculator built on top of it.
//!
//! The buffer is never empty at rest: `"0"` is the reset state and
//! `"Error"` marks a failed evaluation. Both sentinels are replaced
//! wholesale by the next appended token (except that a decimal point
//! extends `"0"` into `"0."`).
//!
//! Consecutive operators are accepted as typed (`5*-2`, `3++`); malformed
//! input is left for the evaluator to reject.

use crate::calculator::evaluation::{CalcResult, evaluate_expression};
use crate::calculator::history::{HistoryEntry, HistoryLog};
use crate::calculator::keyboard::{Focus, Key, KeyAction, key_action};
use crate::engine::ExpressionEvaluator;

/// Reset sentinel.
pub const RESET: &str = "0";
/// Failed-evaluation sentinel.
pub const ERROR: &str = "Error";

/// Keypad button labels in layout order.
pub const BUTTONS: [&str; 17] = [
    "C", "/", "7", "8", "9", "*", "4", "5", "6", "-", "1", "2", "3", "+", "0", ".", "=",
];

/// Coarse state of the display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayState {
    Idle,
    Editing,
    Error,
}

/// The in-progress or last-evaluated expression text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayBuffer {
    text: String,
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayBuffer {
    pub fn new() -> Self {
        Self {
            text: RESET.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> DisplayState {
        match self.text.as_str() {
            RESET => DisplayState::Idle,
            ERROR => DisplayState::Error,
            _ => DisplayState::Editing,
        }
    }

    pub fn append(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        let replace = match self.state() {
            DisplayState::Error => true,
            DisplayState::Idle => token != ".",
            DisplayState::Editing => false,
        };
        if replace {
            self.text = token.to_string();
        } else {
            self.text.push_str(token);
        }
    }

    /// Remove the last character, falling back to `"0"` when nothing is left.
    /// The error sentinel is not editable and resets instead.
    pub fn backspace(&mut self) {
        if self.state() == DisplayState::Error {
            self.clear();
            return;
        }
        self.text.pop();
        if self.text.is_empty() {
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.text = RESET.to_string();
    }

    /// Evaluate the buffer and replace it with the result, or with the
    /// error sentinel on failure. Returns the evaluation outcome.
    pub fn evaluate(&mut self, evaluator: &impl ExpressionEvaluator) -> CalcResult {
        let result = evaluate_expression(evaluator, &self.text);
        self.text = match &result {
            CalcResult::Success { display_result, .. } => display_result.clone(),
            CalcResult::Error { .. } => ERROR.to_string(),
        };
        result
    }
}

/// Basic calculator: display buffer plus evaluation history.
#[derive(Clone, Debug, Default)]
pub struct BasicCalc {
    display: DisplayBuffer,
    history: HistoryLog,
}

impl BasicCalc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &DisplayBuffer {
        &self.display
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn append(&mut self, token: &str) {
        self.display.append(token);
    }

    pub fn backspace(&mut self) {
        self.display.backspace();
    }

    pub fn clear(&mut self) {
        self.display.clear();
    }

    /// Evaluate the display; successful results are recorded in history as
    /// `"{expression} = {result}"` using the buffer text before evaluation.
    pub fn evaluate(&mut self, evaluator: &impl ExpressionEvaluator) {
        let source = self.display.text().to_string();
        let result = self.display.evaluate(evaluator);

        match result {
            CalcResult::Success { display_result, .. } => {
                tracing::debug!(%source, result = %display_result, "Evaluated");
                self.history.record(HistoryEntry::new(source, display_result));
            }
            CalcResult::Error { message, .. } => {
                tracing::debug!(%source, %message, "Evaluation error");
            }
        }
    }

    /// Handle a keypad button: `C` clears, `=` evaluates, anything else appends.
    pub fn handle_button(&mut self, label: &str, evaluator: &impl ExpressionEvaluator) {
        match label {
            "C" => self.clear(),
            "=" => self.evaluate(evaluator),
            _ => self.append(label),
        }
    }

    /// Handle a key press. Returns `true` if the key did anything.
    pub fn handle_key(
        &mut self,
        key: Key,
        focus: Focus,
        evaluator: &impl ExpressionEvaluator,
    ) -> bool {
        let Some(action) = key_action(key, focus) else {
            return false;
        };
        match action {
            KeyAction::Append(token) => self.append(&token),
            KeyAction::Evaluate => self.evaluate(evaluator),
            KeyAction::Backspace => self.backspace(),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MathEngine;
    use proptest::prelude::*;

    fn typed(tokens: &[&str]) -> BasicCalc {
        let mut calc = BasicCalc::new();
        for token in tokens {
            calc.append(token);
        }
        calc
    }

    #[test]
    fn test_first_token_replaces_reset() {
        let calc = typed(&["7"]);
        assert_eq!(calc.display().text(), "7");
        assert_eq!(calc.display().state(), DisplayState::Editing);
    }

    #[test]
    fn test_decimal_point_extends_reset() {
        let calc = typed(&[".", "5"]);
        assert_eq!(calc.display().text(), "0.5");
    }

    #[test]
    fn test_consecutive_operators_allowed() {
        let calc = typed(&["5", "*", "-", "2"]);
        assert_eq!(calc.display().text(), "5*-2");
    }

    #[test]
    fn test_evaluate_records_history() {
        let mut calc = typed(&["2", "+", "3", "*", "4"]);
        calc.evaluate(&MathEngine);

        assert_eq!(calc.display().text(), "14");
        let entries: Vec<String> = calc.history().iter().map(ToString::to_string).collect();
        assert_eq!(entries, vec!["2+3*4 = 14"]);
    }

    #[test]
    fn test_tiny_result_keeps_its_magnitude() {
        let mut calc = typed(&["0", ".", "0000000000", "1", "*", "3"]);
        calc.evaluate(&MathEngine);

        assert_eq!(calc.display().text(), "3e-11");
        let entries: Vec<String> = calc.history().iter().map(ToString::to_string).collect();
        assert_eq!(entries, vec!["0.00000000001*3 = 3e-11"]);
    }

    #[test]
    fn test_result_becomes_new_buffer() {
        let mut calc = typed(&["2", "+", "3"]);
        calc.evaluate(&MathEngine);
        calc.append("*");
        calc.append("2");
        assert_eq!(calc.display().text(), "5*2");
    }

    #[test]
    fn test_invalid_expression_sets_error() {
        let mut calc = typed(&["2", "+"]);
        calc.evaluate(&MathEngine);

        assert_eq!(calc.display().text(), ERROR);
        assert_eq!(calc.display().state(), DisplayState::Error);
        assert!(calc.history().is_empty());
    }

    #[test]
    fn test_error_replaced_by_next_input() {
        let mut calc = typed(&["2", "+"]);
        calc.evaluate(&MathEngine);
        calc.append("9");
        assert_eq!(calc.display().text(), "9");

        let mut calc = typed(&["2", "+"]);
        calc.evaluate(&MathEngine);
        calc.append(".");
        assert_eq!(calc.display().text(), ".");
    }

    #[test]
    fn test_clear_resets_from_any_state() {
        let mut calc = typed(&["2", "+"]);
        calc.evaluate(&MathEngine);
        calc.clear();
        assert_eq!(calc.display().text(), RESET);
        assert_eq!(calc.display().state(), DisplayState::Idle);
    }

    #[test]
    fn test_backspace_stops_at_reset() {
        let mut calc = typed(&["1", "2", "3"]);
        calc.backspace();
        assert_eq!(calc.display().text(), "12");
        for _ in 0..10 {
            calc.backspace();
        }
        assert_eq!(calc.display().text(), RESET);
    }

    #[test]
    fn test_backspace_on_error_resets() {
        let mut calc = typed(&["*"]);
        calc.evaluate(&MathEngine);
        assert_eq!(calc.display().text(), ERROR);
        calc.backspace();
        assert_eq!(calc.display().text(), RESET);
    }

    #[test]
    fn test_history_window_after_seven_evaluations() {
        let mut calc = BasicCalc::new();
        for i in 1..=7 {
            calc.clear();
            calc.append(&i.to_string());
            calc.append("+");
            calc.append("1");
            calc.evaluate(&MathEngine);
        }

        let entries: Vec<String> = calc.history().iter().map(ToString::to_string).collect();
        assert_eq!(
            entries,
            vec!["3+1 = 4", "4+1 = 5", "5+1 = 6", "6+1 = 7", "7+1 = 8"]
        );
    }

    #[test]
    fn test_buttons() {
        let mut calc = BasicCalc::new();
        for label in ["9", "/", "4", "="] {
            calc.handle_button(label, &MathEngine);
        }
        assert_eq!(calc.display().text(), "2.25");
        calc.handle_button("C", &MathEngine);
        assert_eq!(calc.display().text(), RESET);
    }

    #[test]
    fn test_keys() {
        let mut calc = BasicCalc::new();
        for c in "6*7".chars() {
            assert!(calc.handle_key(Key::Char(c), Focus::None, &MathEngine));
        }
        assert!(!calc.handle_key(Key::Char('x'), Focus::None, &MathEngine));
        calc.handle_key(Key::Enter, Focus::None, &MathEngine);
        assert_eq!(calc.display().text(), "42");

        calc.handle_key(Key::Backspace, Focus::None, &MathEngine);
        assert_eq!(calc.display().text(), "4");

        assert!(!calc.handle_key(Key::Char('1'), Focus::TextInput, &MathEngine));
        assert_eq!(calc.display().text(), "4");
    }

    proptest! {
        #[test]
        fn prop_append_concatenates_after_reset(
            tokens in prop::collection::vec(
                prop::sample::select(BUTTONS[1..16].to_vec()),
                1..24,
            )
        ) {
            let mut buffer = DisplayBuffer::new();
            for token in &tokens {
                buffer.append(token);
            }

            // The reset sentinel survives only until the first non-decimal token
            let mut expected = String::from(RESET);
            for token in &tokens {
                if expected == RESET && *token != "." {
                    expected = token.to_string();
                } else {
                    expected.push_str(token);
                }
            }
            prop_assert_eq!(buffer.text(), expected.as_str());
        }

        #[test]
        fn prop_backspace_never_empties(
            tokens in prop::collection::vec(
                prop::sample::select(BUTTONS[1..16].to_vec()),
                0..16,
            ),
            presses in 0usize..32,
        ) {
            let mut buffer = DisplayBuffer::new();
            for token in &tokens {
                buffer.append(token);
            }
            for _ in 0..presses {
                buffer.backspace();
                prop_assert!(!buffer.text().is_empty());
            }
            for _ in 0..tokens.len() + 1 {
                buffer.backspace();
            }
            prop_assert_eq!(buffer.text(), RESET);
        }
    }
}
