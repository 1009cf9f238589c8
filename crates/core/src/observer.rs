/// Watches a solve as it advances and may steer it.
///
/// A solver calls [`Observer::observe`] once per accepted time point. Returning
/// `Some(action)` asks the solver to act, for example to stop early, while
/// `None` lets it continue.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer. Pass `()` when no
/// observation is needed.
pub trait Observer<E, A> {
    /// Inspects one event and optionally requests an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
