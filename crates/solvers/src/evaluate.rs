use ndarray::{Array1, ArrayView1};
use thiserror::Error;

use odestep_core::Model;

/// Errors that can occur when evaluating a model through [`Checked`].
#[derive(Debug, Error)]
pub enum EvalError<ME> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// The model returned a derivative of the wrong length.
    #[error("expected {expected} derivatives, model returned {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// A model wrapper that enforces the equation count on every derivative.
///
/// A derivative whose length differs from the equation count is rejected
/// rather than truncated, padded, or broadcast.
#[derive(Debug, Clone, Copy)]
pub struct Checked<M> {
    model: M,
    n_of_eqns: usize,
}

impl<M: Model> Checked<M> {
    /// Wraps `model`, requiring derivatives of length `n_of_eqns`.
    pub fn new(model: M, n_of_eqns: usize) -> Self {
        Self { model, n_of_eqns }
    }

    /// Returns the number of equations every derivative must have.
    #[must_use]
    pub fn n_of_eqns(&self) -> usize {
        self.n_of_eqns
    }
}

impl<M: Model> Model for Checked<M> {
    type Error = EvalError<M::Error>;

    fn derivative(&self, state: ArrayView1<'_, f64>, time: f64) -> Result<Array1<f64>, Self::Error> {
        let rate = self
            .model
            .derivative(state, time)
            .map_err(EvalError::Model)?;

        if rate.len() != self.n_of_eqns {
            return Err(EvalError::DimensionMismatch {
                expected: self.n_of_eqns,
                found: rate.len(),
            });
        }

        Ok(rate)
    }
}
