use ndarray::{Array2, ArrayView1, ArrayView2};

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Integrated over every point of the time grid.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a solve.
///
/// Row `i` of the trajectory is the state at `times()[i]`, and row 0 is the
/// initial condition. The trajectory and the time points always have the same
/// length. They cover the full requested grid unless an observer stopped the
/// solve early, in which case they cover the rows written before stopping.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    status: Status,
    trajectory: Array2<f64>,
    times: Vec<f64>,
}

impl Solution {
    pub(crate) fn new(status: Status, trajectory: Array2<f64>, times: Vec<f64>) -> Self {
        debug_assert_eq!(trajectory.nrows(), times.len());
        Self {
            status,
            trajectory,
            times,
        }
    }

    /// Returns how the solver terminated.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the trajectory, one row per time point and one column per equation.
    #[must_use]
    pub fn trajectory(&self) -> ArrayView2<'_, f64> {
        self.trajectory.view()
    }

    /// Returns the time points covered by the trajectory.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the number of recorded rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always `false`, since row 0 is always recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the number of integration steps taken.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Returns the number of equations.
    #[must_use]
    pub fn n_of_eqns(&self) -> usize {
        self.trajectory.ncols()
    }

    /// Returns the state at row `i`, if present.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<ArrayView1<'_, f64>> {
        (i < self.trajectory.nrows()).then(|| self.trajectory.row(i))
    }

    /// Returns the history of equation `j` over time, if present.
    #[must_use]
    pub fn column(&self, j: usize) -> Option<ArrayView1<'_, f64>> {
        (j < self.trajectory.ncols()).then(|| self.trajectory.column(j))
    }

    /// Returns the last recorded state.
    #[must_use]
    pub fn final_state(&self) -> ArrayView1<'_, f64> {
        self.trajectory.row(self.trajectory.nrows() - 1)
    }

    /// Consumes the solution and returns the trajectory and time points.
    #[must_use]
    pub fn into_parts(self) -> (Array2<f64>, Vec<f64>) {
        (self.trajectory, self.times)
    }
}
