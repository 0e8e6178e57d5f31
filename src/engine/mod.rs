//! Expression engine used by every calculator mode.
//!
//! The calculator components only talk to the [`ExpressionEvaluator`]
//! trait; [`MathEngine`] is the implementation shipped with the crate:
//! - Numeric evaluation with variable bindings via `fasteval`
//! - Symbolic differentiation via `symb_anafis`
//! - 3x3 determinants and inverses via `nalgebra`

mod input;
mod matrix;

pub use input::{MAX_LENGTH, MAX_NESTING};
pub use matrix::{IDENTITY, Matrix3x3};

use crate::error::{CalcError, Result};
use std::collections::BTreeMap;
use std::f64::consts;

/// Variable name to value bindings for a single evaluation.
pub type Bindings = BTreeMap<String, f64>;

/// The evaluation collaborator the calculator components delegate to.
pub trait ExpressionEvaluator {
    /// Evaluate expression text to a number. Non-finite results are
    /// returned as-is; callers decide whether they are acceptable.
    fn evaluate(&self, expression: &str, bindings: &Bindings) -> Result<f64>;

    fn determinant(&self, matrix: &Matrix3x3) -> Result<f64>;

    /// Fails with `SingularMatrix` when the matrix has no inverse.
    fn inverse(&self, matrix: &Matrix3x3) -> Result<Matrix3x3>;

    /// Differentiate expression text, returning the simplified derivative
    /// as text.
    fn derivative(&self, expression: &str, with_respect_to: &str) -> Result<String>;
}

/// Named constants. Bindings shadow them.
const CONSTANTS: &[(&str, f64)] = &[
    ("pi", consts::PI),
    ("PI", consts::PI),
    ("e", consts::E),
    ("E", consts::E),
    ("tau", consts::TAU),
    ("phi", 1.618_033_988_749_895),
];

/// One-argument functions on top of the ones fasteval builds in.
fn unary_function(name: &str) -> Option<fn(f64) -> f64> {
    let f: fn(f64) -> f64 = match name {
        "sqrt" => f64::sqrt,
        "cbrt" => f64::cbrt,
        "exp" => f64::exp,
        "ln" => f64::ln,
        "log2" => f64::log2,
        "log10" => f64::log10,
        _ => return None,
    };
    Some(f)
}

fn lookup_symbol(name: &str, bindings: &Bindings) -> Result<f64> {
    if let Some(value) = bindings.get(name) {
        return Ok(*value);
    }
    CONSTANTS
        .iter()
        .find(|(constant, _)| *constant == name)
        .map(|(_, value)| *value)
        .ok_or_else(|| CalcError::undefined_symbol(name))
}

fn call_function(name: &str, args: &[f64]) -> Result<f64> {
    let f = unary_function(name).ok_or_else(|| CalcError::unknown_function(name))?;
    match args {
        [x] => Ok(f(*x)),
        _ => Err(CalcError::Arity {
            name: name.to_string(),
            expected: "1",
            found: args.len(),
        }),
    }
}

/// Default evaluator: fasteval for numbers, symb_anafis for derivatives,
/// nalgebra for matrices.
#[derive(Clone, Copy, Debug, Default)]
pub struct MathEngine;

impl MathEngine {
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionEvaluator for MathEngine {
    fn evaluate(&self, expression: &str, bindings: &Bindings) -> Result<f64> {
        let prepared = input::prepare(expression)?;

        // fasteval only reports a bare name for namespace misses
        let mut failure: Option<CalcError> = None;
        let mut namespace = |name: &str, args: Vec<f64>| -> Option<f64> {
            let found = if args.is_empty() {
                lookup_symbol(name, bindings)
            } else {
                call_function(name, &args)
            };
            match found {
                Ok(value) => Some(value),
                Err(err) => {
                    failure.get_or_insert(err);
                    None
                }
            }
        };

        match fasteval::ez_eval(&prepared, &mut namespace) {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::trace!(%prepared, error = ?err, "fasteval rejected expression");
                Err(failure.unwrap_or_else(|| CalcError::parse(format!("{:?}", err))))
            }
        }
    }

    fn determinant(&self, matrix: &Matrix3x3) -> Result<f64> {
        matrix::determinant(matrix)
    }

    fn inverse(&self, matrix: &Matrix3x3) -> Result<Matrix3x3> {
        matrix::inverse(matrix)
    }

    fn derivative(&self, expression: &str, with_respect_to: &str) -> Result<String> {
        input::check_limits(expression)?;
        symb_anafis::diff(expression, with_respect_to, &[], None).map_err(|err| {
            tracing::trace!(%expression, error = ?err, "symb_anafis rejected expression");
            CalcError::unsupported_derivative(expression)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(name: &str, value: f64) -> Bindings {
        let mut bindings = Bindings::new();
        bindings.insert(name.to_string(), value);
        bindings
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_engine_evaluate() {
        let engine = MathEngine::new();
        assert_eq!(engine.evaluate("2+3*4", &Bindings::new()).unwrap(), 14.0);
        assert_eq!(engine.evaluate("x^2 / 2", &at("x", 4.0)).unwrap(), 8.0);
        assert_eq!(engine.evaluate("3x + 1", &at("x", 2.0)).unwrap(), 7.0);
        assert_eq!(engine.evaluate("2(1 + 2)", &Bindings::new()).unwrap(), 6.0);
    }

    #[test]
    fn test_constants_and_functions() {
        let engine = MathEngine::new();
        let none = Bindings::new();
        assert!(close(engine.evaluate("pi", &none).unwrap(), consts::PI));
        assert!(close(engine.evaluate("2pi", &none).unwrap(), consts::TAU));
        assert!(close(engine.evaluate("ln(e)", &none).unwrap(), 1.0));
        assert_eq!(engine.evaluate("sqrt(16)", &none).unwrap(), 4.0);
        assert!(close(engine.evaluate("sin(0) + cos(0)", &none).unwrap(), 1.0));
        assert!(engine.evaluate("sqrt(-1)", &none).unwrap().is_nan());
        assert_eq!(engine.evaluate("1/0", &none).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_bindings_shadow_constants() {
        let engine = MathEngine::new();
        assert_eq!(engine.evaluate("e + 1", &at("e", 2.0)).unwrap(), 3.0);
    }

    #[test]
    fn test_engine_errors() {
        let engine = MathEngine::new();
        let none = Bindings::new();
        assert!(matches!(
            engine.evaluate("2+", &none),
            Err(CalcError::Parse(_))
        ));
        assert_eq!(
            engine.evaluate("y * 2", &none),
            Err(CalcError::UndefinedSymbol("y".to_string()))
        );
        assert_eq!(
            engine.evaluate("frob(2)", &none),
            Err(CalcError::UnknownFunction("frob".to_string()))
        );
        assert!(matches!(
            engine.evaluate("sqrt(1, 2)", &none),
            Err(CalcError::Arity { found: 2, .. })
        ));
        assert_eq!(
            engine.inverse(&[[0.0; 3]; 3]),
            Err(CalcError::SingularMatrix)
        );
    }

    #[test]
    fn test_engine_derivative() {
        let engine = MathEngine::new();

        // d/dx (x^2 + 3x + 1) = 2x + 3
        let derivative = engine.derivative("x^2 + 3x + 1", "x").unwrap();
        for x in [-2.0, 0.0, 1.5] {
            let slope = engine.evaluate(&derivative, &at("x", x)).unwrap();
            assert!(close(slope, 2.0 * x + 3.0), "{} at {}", derivative, x);
        }

        let derivative = engine.derivative("t^2 + x", "t").unwrap();
        assert!(!derivative.contains('x'));
        assert!(close(engine.evaluate(&derivative, &at("t", 3.0)).unwrap(), 6.0));

        assert!(engine.derivative("x +", "x").is_err());
        assert!(engine.derivative("", "x").is_err());
    }

    #[test]
    fn test_nested_powers_differentiate_correctly() {
        // (x^2)^3 = x^6, derivative 6x^5
        let engine = MathEngine::new();
        let derivative = engine.derivative("(x^2)^3", "x").unwrap();
        let slope = engine.evaluate(&derivative, &at("x", 2.0)).unwrap();
        assert!(close(slope, 192.0), "{}", derivative);
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
        let engine = MathEngine::new();
        let deep = format!("{}1{}", "(".repeat(3000), ")".repeat(3000));
        assert!(matches!(
            engine.evaluate(&deep, &Bindings::new()),
            Err(CalcError::Parse(_))
        ));
        assert!(matches!(
            engine.derivative(&deep, "x"),
            Err(CalcError::Parse(_))
        ));

        let long = "x+".repeat(MAX_LENGTH) + "x";
        assert!(engine.evaluate(&long, &at("x", 1.0)).is_err());
        assert!(engine.derivative(&long, "x").is_err());

        let shallow = format!("{}x{}", "(".repeat(8), ")".repeat(8));
        assert_eq!(engine.evaluate(&shallow, &at("x", 5.0)).unwrap(), 5.0);
    }
}
