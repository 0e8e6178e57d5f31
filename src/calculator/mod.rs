//! Calculator components driven by the mode screens.
//!
//! Each component owns its own state and delegates the math to an
//! [`ExpressionEvaluator`](crate::engine::ExpressionEvaluator):
//! - Basic calculator display, keypad and history
//! - Function sampling for the grapher
//! - 3x3 matrix editor
//! - Derivative requests

mod calculus;
mod display;
mod evaluation;
mod history;
mod keyboard;
mod matrix;
mod sweep;

pub use calculus::{CalculusCalc, INVALID_EXPRESSION};
pub use display::{BUTTONS, BasicCalc, DisplayBuffer, DisplayState, ERROR, RESET};
pub use evaluation::{CalcResult, evaluate_expression, format_number};
pub use history::{HISTORY_LIMIT, HistoryEntry, HistoryLog};
pub use keyboard::{Focus, Key, KeyAction, is_operator, key_action};
pub use matrix::{MatrixOutcome, MatrixState, parse_cell};
pub use sweep::{GraphCalc, SamplePoint, SampleSweep};
