//! ASCII line chart for sampled functions.

use crate::calculator::{SamplePoint, format_number};

/// Placeholder when a sweep produced nothing.
pub const EMPTY_PLOT: &str = "No plottable points";

const POINT: char = '*';
const H_AXIS: char = '-';
const V_AXIS: char = '|';
const ORIGIN: char = '+';

/// Inclusive value range mapped onto `cells` columns or rows.
#[derive(Clone, Copy, Debug)]
struct Axis {
    min: f64,
    max: f64,
    cells: usize,
}

impl Axis {
    fn new(min: f64, max: f64, cells: usize) -> Self {
        // A flat range still needs a non-zero span
        let (min, max) = if max > min { (min, max) } else { (min - 1.0, max + 1.0) };
        Self {
            min,
            max,
            cells: cells.max(2),
        }
    }

    fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Cell index of `value`, 0 at `min`.
    fn cell(&self, value: f64) -> usize {
        let t = (value - self.min) / (self.max - self.min);
        let index = (t * (self.cells - 1) as f64).round();
        (index.max(0.0) as usize).min(self.cells - 1)
    }
}

/// Render `points` as `height` rows of `width` characters, followed by a
/// line naming the plotted ranges.
pub fn render(points: &[SamplePoint], width: usize, height: usize) -> Vec<String> {
    if points.is_empty() {
        return vec![EMPTY_PLOT.to_string()];
    }

    let (x_min, x_max) = bounds(points.iter().map(|p| p.x));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.y));
    let x_axis = Axis::new(x_min, x_max, width);
    let y_axis = Axis::new(y_min, y_max, height);

    let mut grid = vec![vec![' '; x_axis.cells]; y_axis.cells];
    // Rows run top to bottom, so y is flipped
    let row_of = |y: f64| y_axis.cells - 1 - y_axis.cell(y);

    if y_axis.contains(0.0) {
        let row = row_of(0.0);
        grid[row].iter_mut().for_each(|c| *c = H_AXIS);
    }
    if x_axis.contains(0.0) {
        let col = x_axis.cell(0.0);
        for row in grid.iter_mut() {
            row[col] = if row[col] == H_AXIS { ORIGIN } else { V_AXIS };
        }
    }
    for p in points {
        grid[row_of(p.y)][x_axis.cell(p.x)] = POINT;
    }

    let mut lines: Vec<String> = grid.into_iter().map(|row| row.into_iter().collect()).collect();
    lines.push(format!(
        "x: {} .. {}   y: {} .. {}",
        format_number(x_min),
        format_number(x_max),
        format_number(y_min),
        format_number(y_max)
    ));
    lines
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
