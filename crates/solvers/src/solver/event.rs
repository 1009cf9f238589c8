use ndarray::Array1;

/// A row of the trajectory, reported to the observer as soon as it is written.
///
/// The first event carries the initial condition with `step == 0`. Each later
/// event follows one accepted integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The row index in the trajectory (0 for the initial condition).
    pub step: usize,

    /// The time point of this row.
    pub time: f64,

    /// The state recorded at this row.
    pub state: Array1<f64>,
}
