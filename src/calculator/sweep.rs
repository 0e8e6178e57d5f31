//! Function sampling for the grapher.
//!
//! A sweep evaluates an expression at evenly spaced `x` values and keeps
//! only the finite results. Abscissae come from integer ticks
//! (`x = tick / resolution`), so `x = 0` is sampled exactly and no
//! floating-point drift builds up across the domain.

use crate::engine::{Bindings, ExpressionEvaluator};
use serde::Serialize;

/// Default equation shown in the grapher.
pub const DEFAULT_EQUATION: &str = "x^2";

/// One plotted point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Sampling domain `[min, max]` with `resolution` samples per unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleSweep {
    pub min: i32,
    pub max: i32,
    pub resolution: u32,
}

impl Default for SampleSweep {
    /// `[-10, 10]` at step 0.2: 101 samples.
    fn default() -> Self {
        Self {
            min: -10,
            max: 10,
            resolution: 5,
        }
    }
}

impl SampleSweep {
    /// Distance between consecutive samples.
    pub fn step(&self) -> f64 {
        1.0 / f64::from(self.resolution.max(1))
    }

    /// Number of samples in the domain, endpoints included.
    pub fn sample_count(&self) -> usize {
        if self.max < self.min {
            return 0;
        }
        let span = i64::from(self.max) - i64::from(self.min);
        (span * i64::from(self.resolution.max(1)) + 1) as usize
    }

    /// Sample abscissae in ascending order.
    pub fn abscissae(&self) -> impl Iterator<Item = f64> + use<> {
        let resolution = i64::from(self.resolution.max(1));
        let start = i64::from(self.min) * resolution;
        let count = self.sample_count() as i64;
        (0..count).map(move |i| (start + i) as f64 / resolution as f64)
    }

    /// Evaluate `expression` at every sample, skipping samples that fail
    /// to evaluate or produce a non-finite value. Never fails.
    pub fn plot(&self, evaluator: &impl ExpressionEvaluator, expression: &str) -> Vec<SamplePoint> {
        let mut bindings = Bindings::new();
        let mut points = Vec::with_capacity(self.sample_count());
        let mut failed = 0usize;
        let mut non_finite = 0usize;

        for x in self.abscissae() {
            bindings.insert("x".to_string(), x);
            match evaluator.evaluate(expression, &bindings) {
                Ok(y) if y.is_finite() => points.push(SamplePoint { x, y }),
                Ok(_) => non_finite += 1,
                Err(_) => failed += 1,
            }
        }

        tracing::debug!(
            %expression,
            points = points.len(),
            failed,
            non_finite,
            "Sweep finished"
        );
        points
    }
}

/// Grapher state: the equation text and the last plotted points.
#[derive(Clone, Debug)]
pub struct GraphCalc {
    equation: String,
    points: Vec<SamplePoint>,
    sweep: SampleSweep,
}

impl Default for GraphCalc {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphCalc {
    pub fn new() -> Self {
        Self {
            equation: DEFAULT_EQUATION.to_string(),
            points: Vec::new(),
            sweep: SampleSweep::default(),
        }
    }

    pub fn equation(&self) -> &str {
        &self.equation
    }

    pub fn set_equation(&mut self, equation: impl Into<String>) {
        self.equation = equation.into();
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn sweep(&self) -> &SampleSweep {
        &self.sweep
    }

    /// Recompute the point set from scratch for the current equation.
    pub fn plot(&mut self, evaluator: &impl ExpressionEvaluator) -> &[SamplePoint] {
        self.points = self.sweep.plot(evaluator, &self.equation);
        &self.points
    }
}
