use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{RateTable, RateTableError, StepSchedule};

/// A model parameter that may vary with time.
///
/// Every variant is evaluated the same way, through [`Rate::at`], so a model
/// never needs to know whether a parameter is fixed or time-dependent.
#[derive(Clone)]
pub enum Rate {
    /// The same value at every time.
    Constant(f64),

    /// A piecewise-constant value.
    Schedule(StepSchedule),

    /// A linearly interpolated table of samples.
    Table(RateTable),

    /// An arbitrary function of time.
    Function(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum RateError {
    #[error("rate is not finite at t = {time}: {value}")]
    NonFinite { time: f64, value: f64 },

    #[error("rate table lookup failed at t = {time}")]
    Table {
        time: f64,
        #[source]
        source: RateTableError,
    },
}

impl Rate {
    /// Creates a rate from a function of time.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Returns the rate at `time`.
    ///
    /// # Errors
    ///
    /// Returns an error if a table lookup fails or the value is not finite.
    pub fn at(&self, time: f64) -> Result<f64, RateError> {
        let value = match self {
            Self::Constant(value) => *value,
            Self::Schedule(schedule) => schedule.value_at(time),
            Self::Table(table) => table
                .value_at(time)
                .map_err(|source| RateError::Table { time, source })?,
            Self::Function(f) => f(time),
        };

        if !value.is_finite() {
            return Err(RateError::NonFinite { time, value });
        }

        Ok(value)
    }
}

impl From<f64> for Rate {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<StepSchedule> for Rate {
    fn from(schedule: StepSchedule) -> Self {
        Self::Schedule(schedule)
    }
}

impl From<RateTable> for Rate {
    fn from(table: RateTable) -> Self {
        Self::Table(table)
    }
}

impl fmt::Debug for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Schedule(schedule) => f.debug_tuple("Schedule").field(schedule).finish(),
            Self::Table(table) => f.debug_tuple("Table").field(table).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}
