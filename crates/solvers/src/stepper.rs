use ndarray::{Array1, ArrayView2};

use odestep_core::Model;

/// A single-step integration algorithm.
///
/// A stepper computes the state at `times[index + 1]` from the trajectory
/// recorded so far. It receives the current index explicitly and owns no
/// per-solve state, so the same stepper can be shared across solves.
///
/// The solver is generic over this trait. New methods are added by
/// implementing it, without touching the solve loop.
pub trait Stepper {
    /// Returns the state at `times[index + 1]`.
    ///
    /// `trajectory` holds rows `0..=index`, one per time point already
    /// solved, with one column per equation.
    ///
    /// # Errors
    ///
    /// Returns the model's error if any derivative evaluation fails.
    ///
    /// # Panics
    ///
    /// Panics if `index + 1` is out of bounds for `times` or `index` is out of
    /// bounds for `trajectory`, which indicates incorrect stepper use.
    fn step<M: Model + ?Sized>(
        &self,
        model: &M,
        trajectory: ArrayView2<'_, f64>,
        index: usize,
        times: &[f64],
    ) -> Result<Array1<f64>, M::Error>;
}

impl<S: Stepper + ?Sized> Stepper for &S {
    fn step<M: Model + ?Sized>(
        &self,
        model: &M,
        trajectory: ArrayView2<'_, f64>,
        index: usize,
        times: &[f64],
    ) -> Result<Array1<f64>, M::Error> {
        (**self).step(model, trajectory, index, times)
    }
}
