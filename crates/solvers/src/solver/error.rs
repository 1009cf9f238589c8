use std::error::Error as StdError;

use odestep_core::{InitialConditionError, TimeGridError};

use crate::EvalError;

/// Errors that can occur while setting up or running a solve.
///
/// Errors raised during integration identify the row and time at which they
/// occurred. No partial trajectory is returned alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid initial condition: {0}")]
    InvalidInitialCondition(#[from] InitialConditionError),

    #[error("invalid time grid: {0}")]
    TimeGrid(#[from] TimeGridError),

    #[error(
        "dimension mismatch at step {step} (t = {time}): expected {expected} values, got {found}"
    )]
    DimensionMismatch {
        step: usize,
        time: f64,
        expected: usize,
        found: usize,
    },

    #[error("non-finite state at row {row} (t = {time})")]
    NonFiniteResult { row: usize, time: f64 },

    #[error("model error at step {step} (t = {time}): {source}")]
    Model {
        step: usize,
        time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    /// Attributes a checked evaluation failure to the step that caused it.
    pub(crate) fn at_step<E>(err: EvalError<E>, step: usize, time: f64) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        match err {
            EvalError::Model(source) => Self::Model {
                step,
                time,
                source: Box::new(source),
            },
            EvalError::DimensionMismatch { expected, found } => Self::DimensionMismatch {
                step,
                time,
                expected,
                found,
            },
        }
    }
}
