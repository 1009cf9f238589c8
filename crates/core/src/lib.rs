//! Core traits and types for stepping systems of ODEs forward in time.
//!
//! This crate defines the shared abstractions that solvers and models build
//! on:
//!
//! - [`Model`] — the right-hand side `f(u, t)` of a system `du/dt = f(u, t)`
//! - [`InitialCondition`] — the state at the first time point, scalar or vector
//! - [`TimeGrid`] — a validated, possibly non-uniform sequence of time points
//! - [`Observer`] — receives solver events and optionally returns control actions
//!
//! Models know nothing about how they are integrated. Stepping strategies
//! and the solve loop live in `odestep-solvers`.

mod initial;
mod model;
mod observer;

pub mod time_grid;

pub use initial::{InitialCondition, InitialConditionError};
pub use model::{FnModel, Model, ScalarFnModel, from_fn, scalar_fn};
pub use observer::Observer;
pub use time_grid::{TimeGrid, TimeGridError};
