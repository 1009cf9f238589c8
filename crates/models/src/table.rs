use std::{fmt, sync::Arc};

use ndarray::Array1;
use ninterp::{
    error::{InterpolateError, ValidateError},
    interpolator::Extrapolate,
    prelude::{Interp1DOwned, Interpolator},
    strategy::Linear,
};
use thiserror::Error;

/// A value sampled at discrete times and linearly interpolated between them.
///
/// Outside the sampled range the nearest sample is used.
#[derive(Clone)]
pub struct RateTable {
    interp: Arc<Interp1DOwned<f64, Linear>>,
    start: f64,
    end: f64,
    points: usize,
}

#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("table has {times} times but {values} values")]
    LengthMismatch { times: usize, values: usize },

    #[error("table needs at least two samples, got {0}")]
    TooFewSamples(usize),

    #[error("sample {index} is not finite")]
    NonFinite { index: usize },

    #[error("sample {index} is not later than the sample before it")]
    Unordered { index: usize },

    #[error(transparent)]
    Validation(#[from] ValidateError),

    #[error(transparent)]
    Interpolation(#[from] InterpolateError),
}

impl RateTable {
    /// Creates a table from sample times and the values at those times.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs differ in length, hold fewer than two
    /// samples, contain non-finite numbers, or the times are not strictly
    /// increasing.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, RateTableError> {
        if times.len() != values.len() {
            return Err(RateTableError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.len() < 2 {
            return Err(RateTableError::TooFewSamples(times.len()));
        }
        if let Some(index) = times
            .iter()
            .zip(&values)
            .position(|(t, v)| !t.is_finite() || !v.is_finite())
        {
            return Err(RateTableError::NonFinite { index });
        }
        if let Some(i) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(RateTableError::Unordered { index: i + 1 });
        }

        let start = times[0];
        let end = times[times.len() - 1];
        let points = times.len();

        let interp = Interp1DOwned::new(
            Array1::from_vec(times),
            Array1::from_vec(values),
            Linear,
            Extrapolate::Clamp,
        )?;

        Ok(Self {
            interp: Arc::new(interp),
            start,
            end,
            points,
        })
    }

    /// Creates a table from `(time, value)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`RateTable::new`].
    pub fn from_pairs(pairs: &[[f64; 2]]) -> Result<Self, RateTableError> {
        let (times, values): (Vec<f64>, Vec<f64>) = pairs.iter().map(|[t, v]| (*t, *v)).unzip();
        Self::new(times, values)
    }

    /// Returns the interpolated value at `time`.
    ///
    /// # Errors
    ///
    /// Returns an error if interpolation fails.
    pub fn value_at(&self, time: f64) -> Result<f64, RateTableError> {
        self.interp.interpolate(&[time]).map_err(Into::into)
    }

    /// Returns the first and last sample times.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    /// Returns the number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points
    }

    /// Always `false`, since a table holds at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points == 0
    }
}

impl fmt::Debug for RateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RateTable")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("points", &self.points)
            .finish_non_exhaustive()
    }
}
