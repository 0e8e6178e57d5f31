//! CalcFlow: a multi-mode calculator.
//!
//! The [`engine`] parses, evaluates and differentiates expressions. The
//! [`calculator`] components hold the per-mode state, [`modes`] switches
//! between them, and [`ui`] plus [`session`] drive everything from a
//! terminal.

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod modes;
pub mod session;
pub mod ui;

pub use error::{CalcError, Result};
