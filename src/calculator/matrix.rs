//! 3x3 matrix editor state.

use crate::engine::{ExpressionEvaluator, Matrix3x3};
use crate::error::{CalcError, Result};
use std::fmt;

/// Grid dimension.
pub const SIZE: usize = 3;

/// Last computation shown under the grid.
#[derive(Clone, Debug, PartialEq)]
pub enum MatrixOutcome {
    Determinant(f64),
    Inverse(Matrix3x3),
    Failed(String),
}

impl fmt::Display for MatrixOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Determinant(det) => write!(f, "{:.4}", normalize_zero(*det)),
            Self::Inverse(grid) => {
                let mut cleaned = *grid;
                cleaned
                    .iter_mut()
                    .flatten()
                    .for_each(|v| *v = normalize_zero(*v));
                let json = serde_json::to_string_pretty(&cleaned).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
            Self::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Turn `-0.0` into `0.0` so it never renders with a sign.
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Parse a raw cell entry. Anything that is not a finite number becomes 0.
pub fn parse_cell(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Matrix grid plus the last result.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixState {
    cells: Matrix3x3,
    result: Option<MatrixOutcome>,
}

impl Default for MatrixState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixState {
    /// Start from the zero matrix with no result.
    pub fn new() -> Self {
        Self {
            cells: [[0.0; SIZE]; SIZE],
            result: None,
        }
    }

    pub fn cells(&self) -> &Matrix3x3 {
        &self.cells
    }

    pub fn result(&self) -> Option<&MatrixOutcome> {
        self.result.as_ref()
    }

    /// Set cell `(row, col)` from raw text. Only that cell changes.
    pub fn set_cell(&mut self, row: usize, col: usize, raw: &str) -> Result<()> {
        if row >= SIZE || col >= SIZE {
            return Err(CalcError::CellOutOfRange { row, col });
        }
        self.cells[row][col] = parse_cell(raw);
        Ok(())
    }

    /// Set a whole row from raw entries; missing entries become 0.
    pub fn set_row(&mut self, row: usize, raw: &[&str]) -> Result<()> {
        for col in 0..SIZE {
            self.set_cell(row, col, raw.get(col).copied().unwrap_or(""))?;
        }
        Ok(())
    }

    pub fn determinant(&mut self, evaluator: &impl ExpressionEvaluator) -> &MatrixOutcome {
        let outcome = match evaluator.determinant(&self.cells) {
            Ok(det) => MatrixOutcome::Determinant(det),
            Err(err) => {
                tracing::debug!(error = %err, "Determinant failed");
                MatrixOutcome::Failed(err.to_string())
            }
        };
        self.result.insert(outcome)
    }

    pub fn inverse(&mut self, evaluator: &impl ExpressionEvaluator) -> &MatrixOutcome {
        let outcome = match evaluator.inverse(&self.cells) {
            Ok(inv) => MatrixOutcome::Inverse(inv),
            Err(err) => {
                tracing::debug!(error = %err, "Inverse failed");
                MatrixOutcome::Failed(err.to_string())
            }
        };
        self.result.insert(outcome)
    }
}
