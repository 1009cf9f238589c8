/// What an observer can ask of a running solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// End the solve after the current row.
    ///
    /// The returned [`Solution`](super::Solution) keeps every row written so
    /// far and reports [`Status::StoppedByObserver`](super::Status::StoppedByObserver).
    StopEarly,
}
