//! Fixed-grid ODE solvers.
//!
//! A [`Solver`] owns the time-stepping loop and delegates each step to a
//! [`Stepper`], keeping the integration method separate from the governing
//! equations (a [`Model`]).
//!
//! # Steppers
//!
//! - [`Euler`] — explicit forward Euler, first-order accurate
//!
//! [`Model`]: odestep_core::Model

mod euler;
mod evaluate;
mod stepper;

pub mod solver;

pub use euler::Euler;
pub use evaluate::{Checked, EvalError};
pub use solver::{Action, Error, Event, Solution, Solver, Status};
pub use stepper::Stepper;
