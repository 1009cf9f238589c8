use ndarray::Array1;
use thiserror::Error;

/// The state of a system at its first time point.
///
/// A scalar describes a single equation. A vector describes a system whose
/// equation count is the vector length. Either way the solver sees a state
/// vector, so a scalar and a one-element vector produce identical results.
#[derive(Debug, Clone, PartialEq)]
pub enum InitialCondition {
    Scalar(f64),
    Vector(Vec<f64>),
}

/// Errors that can occur when validating an initial condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InitialConditionError {
    #[error("no initial condition has been set")]
    Missing,

    #[error("initial condition must hold at least one value")]
    Empty,

    #[error("initial condition value at index {index} is not finite")]
    NonFinite { index: usize },
}

impl InitialCondition {
    /// Returns the number of equations this initial condition describes.
    #[must_use]
    pub fn n_of_eqns(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Vector(values) => values.len(),
        }
    }

    /// Checks that the initial condition is non-empty and finite.
    ///
    /// # Errors
    ///
    /// Returns [`InitialConditionError::Empty`] for a zero-length vector and
    /// [`InitialConditionError::NonFinite`] for the first NaN or infinite value.
    pub fn validate(&self) -> Result<(), InitialConditionError> {
        let values = match self {
            Self::Scalar(value) => std::slice::from_ref(value),
            Self::Vector(values) => values.as_slice(),
        };

        if values.is_empty() {
            return Err(InitialConditionError::Empty);
        }

        match values.iter().position(|v| !v.is_finite()) {
            Some(index) => Err(InitialConditionError::NonFinite { index }),
            None => Ok(()),
        }
    }

    /// Returns the initial state as a vector, lifting a scalar to length one.
    #[must_use]
    pub fn to_array(&self) -> Array1<f64> {
        match self {
            Self::Scalar(value) => Array1::from_elem(1, *value),
            Self::Vector(values) => Array1::from_vec(values.clone()),
        }
    }
}

impl From<f64> for InitialCondition {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<f64>> for InitialCondition {
    fn from(values: Vec<f64>) -> Self {
        Self::Vector(values)
    }
}

impl From<&[f64]> for InitialCondition {
    fn from(values: &[f64]) -> Self {
        Self::Vector(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for InitialCondition {
    fn from(values: [f64; N]) -> Self {
        Self::Vector(values.to_vec())
    }
}

impl From<Array1<f64>> for InitialCondition {
    fn from(values: Array1<f64>) -> Self {
        Self::Vector(values.to_vec())
    }
}
