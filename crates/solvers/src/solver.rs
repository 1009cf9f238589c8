//! The fixed-grid solve loop.
//!
//! A [`Solver`] binds a [`Model`] to a [`Stepper`] and integrates from an
//! initial condition across a caller-supplied grid of time points:
//!
//! ```text
//! u[0]     = U0
//! u[i + 1] = stepper.step(model, u[..=i], i, T)    for i in 0..n-1
//! ```
//!
//! # Example
//!
//! ```
//! use odestep_core::scalar_fn;
//! use odestep_solvers::Solver;
//!
//! let decay = scalar_fn(|u, _t| -u);
//! let solver = Solver::euler(&decay).with_init_conditions(1.0)?;
//!
//! let solution = solver.solve(&[0.0, 0.5, 1.0])?;
//!
//! assert_eq!(solution.times(), &[0.0, 0.5, 1.0]);
//! assert_eq!(solution.column(0).unwrap().to_vec(), vec![1.0, 0.5, 0.25]);
//! # Ok::<(), odestep_solvers::Error>(())
//! ```

mod action;
mod error;
mod event;
mod solution;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use ndarray::{Array2, s};
use tracing::{debug, debug_span, trace, warn};

use odestep_core::{InitialCondition, InitialConditionError, Model, Observer, time_grid};

use crate::{Checked, Euler, Stepper};

/// Integrates a model over a grid of time points using a stepping strategy.
///
/// The solver borrows its model, which outlives every solve. Besides the
/// model and stepper it only remembers the initial condition, so successive
/// calls to [`Solver::solve`] are independent of each other.
#[derive(Debug, Clone)]
pub struct Solver<'m, M, S = Euler> {
    model: &'m M,
    stepper: S,
    initial: Option<InitialCondition>,
}

impl<'m, M: Model> Solver<'m, M, Euler> {
    /// Creates a solver that uses the explicit Euler method.
    pub fn euler(model: &'m M) -> Self {
        Self::new(model, Euler)
    }
}

impl<'m, M: Model, S: Stepper> Solver<'m, M, S> {
    /// Creates a solver bound to `model` and `stepper`.
    pub fn new(model: &'m M, stepper: S) -> Self {
        Self {
            model,
            stepper,
            initial: None,
        }
    }

    /// Sets the initial condition, fixing the number of equations.
    ///
    /// A scalar describes one equation. A vector describes as many equations
    /// as it has values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInitialCondition`] if the initial condition is
    /// empty or holds a non-finite value. The previous initial condition is
    /// kept in that case.
    pub fn set_init_conditions(&mut self, u0: impl Into<InitialCondition>) -> Result<(), Error> {
        let u0 = u0.into();
        u0.validate()?;
        debug!(n_of_eqns = u0.n_of_eqns(), "initial condition set");
        self.initial = Some(u0);
        Ok(())
    }

    /// Builder form of [`Solver::set_init_conditions`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInitialCondition`] if the initial condition is
    /// empty or holds a non-finite value.
    pub fn with_init_conditions(mut self, u0: impl Into<InitialCondition>) -> Result<Self, Error> {
        self.set_init_conditions(u0)?;
        Ok(self)
    }

    /// Returns the number of equations, once an initial condition is set.
    #[must_use]
    pub fn n_of_eqns(&self) -> Option<usize> {
        self.initial.as_ref().map(InitialCondition::n_of_eqns)
    }

    /// Returns the initial condition, if set.
    #[must_use]
    pub fn initial_condition(&self) -> Option<&InitialCondition> {
        self.initial.as_ref()
    }

    /// Returns the bound model.
    #[must_use]
    pub fn model(&self) -> &'m M {
        self.model
    }

    /// Returns the stepping strategy.
    #[must_use]
    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    /// Integrates across `time_points`.
    ///
    /// The returned trajectory has one row per time point, and row 0 is the
    /// initial condition. A single time point returns the initial condition
    /// without stepping.
    ///
    /// # Errors
    ///
    /// Returns an error if no valid initial condition is set, the time grid is
    /// empty or decreasing, the model fails or returns a derivative of the
    /// wrong length, or a computed state is not finite.
    pub fn solve(&self, time_points: &[f64]) -> Result<Solution, Error> {
        self.solve_observed(time_points, ())
    }

    /// Integrates across `time_points`, reporting each recorded row.
    ///
    /// The observer receives an [`Event`] for the initial condition and after
    /// each integration step. It may return [`Action::StopEarly`] to end the
    /// solve, in which case the solution holds only the rows written so far
    /// and its status is [`Status::StoppedByObserver`].
    ///
    /// # Errors
    ///
    /// Same as [`Solver::solve`].
    pub fn solve_observed<Obs>(
        &self,
        time_points: &[f64],
        mut observer: Obs,
    ) -> Result<Solution, Error>
    where
        Obs: Observer<Event, Action>,
    {
        let initial = self
            .initial
            .as_ref()
            .ok_or(InitialConditionError::Missing)?;
        time_grid::validate(time_points)?;

        let n = time_points.len();
        let k = initial.n_of_eqns();

        let span = debug_span!("solve", n_of_eqns = k, points = n);
        let _guard = span.enter();
        debug!("starting integration");

        let mut trajectory = Array2::<f64>::zeros((n, k));
        trajectory.row_mut(0).assign(&initial.to_array());

        let first = Event {
            step: 0,
            time: time_points[0],
            state: trajectory.row(0).to_owned(),
        };
        if let Some(Action::StopEarly) = observer.observe(&first) {
            debug!(rows = 1, "stopped by observer");
            return Ok(truncated(trajectory, time_points, 1));
        }

        let model = Checked::new(self.model, k);

        for i in 0..n - 1 {
            let next = self
                .stepper
                .step(&model, trajectory.slice(s![..=i, ..]), i, time_points)
                .map_err(|err| Error::at_step(err, i, time_points[i]))?;

            if next.len() != k {
                return Err(Error::DimensionMismatch {
                    step: i,
                    time: time_points[i],
                    expected: k,
                    found: next.len(),
                });
            }

            let row = i + 1;
            let time = time_points[row];

            if next.iter().any(|v| !v.is_finite()) {
                warn!(row, time, "non-finite state");
                return Err(Error::NonFiniteResult { row, time });
            }

            trajectory.row_mut(row).assign(&next);
            trace!(row, time, "step accepted");

            let event = Event {
                step: row,
                time,
                state: next,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                debug!(rows = row + 1, "stopped by observer");
                return Ok(truncated(trajectory, time_points, row + 1));
            }
        }

        debug!("integration complete");
        Ok(Solution::new(
            Status::Complete,
            trajectory,
            time_points.to_vec(),
        ))
    }
}

/// Keeps the first `rows` rows of a partially written trajectory.
fn truncated(trajectory: Array2<f64>, time_points: &[f64], rows: usize) -> Solution {
    Solution::new(
        Status::StoppedByObserver,
        trajectory.slice_move(s![..rows, ..]),
        time_points[..rows].to_vec(),
    )
}
