//! 3x3 determinant and inverse, backed by nalgebra.

use crate::error::{CalcError, Result};
use nalgebra::Matrix3;

/// Row-major 3x3 grid.
pub type Matrix3x3 = [[f64; 3]; 3];

/// The 3x3 identity.
pub const IDENTITY: Matrix3x3 = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

fn to_nalgebra(grid: &Matrix3x3) -> Result<Matrix3<f64>> {
    if grid.iter().flatten().any(|v| !v.is_finite()) {
        return Err(CalcError::InvalidMatrix(
            "entries must be finite numbers".to_string(),
        ));
    }
    Ok(Matrix3::from_fn(|row, col| grid[row][col]))
}

fn from_nalgebra(matrix: &Matrix3<f64>) -> Matrix3x3 {
    let mut grid = [[0.0; 3]; 3];
    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            *cell = matrix[(row, col)];
        }
    }
    grid
}

pub fn determinant(grid: &Matrix3x3) -> Result<f64> {
    Ok(to_nalgebra(grid)?.determinant())
}

/// Invert the grid, failing with [`CalcError::SingularMatrix`] when the
/// determinant is zero.
pub fn inverse(grid: &Matrix3x3) -> Result<Matrix3x3> {
    let matrix = to_nalgebra(grid)?;
    if matrix.determinant() == 0.0 {
        return Err(CalcError::SingularMatrix);
    }
    matrix
        .try_inverse()
        .map(|inv| from_nalgebra(&inv))
        .ok_or(CalcError::SingularMatrix)
}
