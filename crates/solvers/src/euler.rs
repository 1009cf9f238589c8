//! Explicit (forward) Euler stepping.
//!
//! Advances the state with a single derivative evaluation per step:
//!
//! ```text
//! dt      = t_{i+1} - t_i
//! u_{i+1} = u_i + dt * f(u_i, t_i)
//! ```
//!
//! The local truncation error is O(dt²) and the global error O(dt), so halving
//! the grid spacing roughly halves the error at a fixed end time.

use ndarray::{Array1, ArrayView2};

use odestep_core::Model;

use crate::Stepper;

/// The explicit forward Euler method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl Stepper for Euler {
    fn step<M: Model + ?Sized>(
        &self,
        model: &M,
        trajectory: ArrayView2<'_, f64>,
        index: usize,
        times: &[f64],
    ) -> Result<Array1<f64>, M::Error> {
        let dt = times[index + 1] - times[index];
        let current = trajectory.row(index);
        let derivative = model.derivative(current, times[index])?;

        Ok(&current + &(derivative * dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::{array, s};
    use odestep_core::{from_fn, scalar_fn};

    #[test]
    fn single_decay_step() {
        let model = scalar_fn(|u, _t| -u);
        let trajectory = array![[1.0]];

        let next = Euler
            .step(&model, trajectory.view(), 0, &[0.0, 1.0])
            .unwrap();

        assert_eq!(next, array![0.0]);
    }

    #[test]
    fn uses_spacing_of_the_requested_interval() {
        let model = scalar_fn(|_u, _t| 1.0);
        let trajectory = array![[0.0], [1.0]];

        let next = Euler
            .step(&model, trajectory.view(), 1, &[0.0, 1.0, 3.0])
            .unwrap();

        assert_eq!(next, array![3.0]);
    }

    #[test]
    fn evaluates_model_at_current_row_and_time() {
        // du/dt = t for every component.
        let model = from_fn(|u, t| u.mapv(|_| t));
        let trajectory = array![[0.0, 10.0], [0.5, 10.5], [9.0, 9.0]];

        let next = Euler
            .step(&model, trajectory.slice(s![..2, ..]), 1, &[0.0, 2.0, 2.5])
            .unwrap();

        assert_relative_eq!(next[0], 0.5 + 0.5 * 2.0);
        assert_relative_eq!(next[1], 10.5 + 0.5 * 2.0);
    }

    fn first_step<S: Stepper>(stepper: S, u0: f64, times: &[f64]) -> Array1<f64> {
        let model = scalar_fn(|u, _t| u);
        let trajectory = array![[u0]];
        stepper.step(&model, trajectory.view(), 0, times).unwrap()
    }

    #[test]
    fn borrowed_stepper_matches_owned() {
        let times = [0.0, 0.25];

        let owned = first_step(Euler, 2.0, &times);
        let borrowed = first_step(&Euler, 2.0, &times);

        assert_eq!(owned, array![2.5]);
        assert_eq!(owned, borrowed);
    }
}
