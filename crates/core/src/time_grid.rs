use thiserror::Error;

/// An ordered sequence of time points at which a trajectory is recorded.
///
/// The grid is not required to be uniform. The step size for interval `i` is
/// always `T[i + 1] - T[i]`, so each step follows the actual spacing of the
/// grid. Repeated time points are accepted and produce zero-length steps.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    points: Vec<f64>,
}

/// Errors that can occur when validating a time grid.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimeGridError {
    #[error("time grid must contain at least one point")]
    Empty,

    #[error("time point at index {index} is not finite")]
    NonFinite { index: usize },

    #[error("time point at index {index} is earlier than the point before it")]
    Decreasing { index: usize },
}

impl TimeGrid {
    /// Creates a validated time grid.
    ///
    /// # Errors
    ///
    /// Returns an error if `points` is empty, holds a non-finite value, or
    /// ever decreases.
    pub fn new(points: Vec<f64>) -> Result<Self, TimeGridError> {
        validate(&points)?;
        Ok(Self { points })
    }

    /// Creates `n` evenly spaced points from `start` to `end`, inclusive.
    ///
    /// A single point yields `[start]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is zero, an endpoint is not finite, or
    /// `end < start`.
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self, TimeGridError> {
        if n == 0 {
            return Err(TimeGridError::Empty);
        }
        if !start.is_finite() {
            return Err(TimeGridError::NonFinite { index: 0 });
        }
        if !end.is_finite() {
            return Err(TimeGridError::NonFinite { index: n - 1 });
        }
        if end < start {
            return Err(TimeGridError::Decreasing { index: n - 1 });
        }

        #[allow(clippy::cast_precision_loss)]
        let points = if n == 1 {
            vec![start]
        } else {
            let spacing = (end - start) / (n - 1) as f64;
            let mut points: Vec<f64> = (0..n).map(|i| start + spacing * i as f64).collect();
            points[n - 1] = end;
            points
        };

        Ok(Self { points })
    }

    /// Returns the number of time points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`, since a valid grid holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the time points as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.points
    }

    /// Returns the time at index `i`, if present.
    #[must_use]
    pub fn time(&self, i: usize) -> Option<f64> {
        self.points.get(i).copied()
    }

    /// Returns the step size `T[i + 1] - T[i]`, if interval `i` exists.
    #[must_use]
    pub fn dt(&self, i: usize) -> Option<f64> {
        Some(self.time(i + 1)? - self.time(i)?)
    }

    /// Consumes the grid and returns its points.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.points
    }
}

impl TryFrom<&[f64]> for TimeGrid {
    type Error = TimeGridError;

    fn try_from(points: &[f64]) -> Result<Self, Self::Error> {
        Self::new(points.to_vec())
    }
}

impl TryFrom<Vec<f64>> for TimeGrid {
    type Error = TimeGridError;

    fn try_from(points: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl AsRef<[f64]> for TimeGrid {
    fn as_ref(&self) -> &[f64] {
        &self.points
    }
}

/// Checks that `points` is a usable time grid without copying it.
///
/// # Errors
///
/// Returns an error if `points` is empty, holds a non-finite value, or ever
/// decreases.
pub fn validate(points: &[f64]) -> Result<(), TimeGridError> {
    if points.is_empty() {
        return Err(TimeGridError::Empty);
    }

    if let Some(index) = points.iter().position(|t| !t.is_finite()) {
        return Err(TimeGridError::NonFinite { index });
    }

    match points.windows(2).position(|pair| pair[1] < pair[0]) {
        Some(i) => Err(TimeGridError::Decreasing { index: i + 1 }),
        None => Ok(()),
    }
}
