use std::convert::Infallible;

use ndarray::{Array1, ArrayView1, arr1};

/// The right-hand side of a system of first-order ODEs.
///
/// A model maps the current state and time to the instantaneous rate of
/// change of every state variable. The returned vector must have the same
/// length as `state`.
///
/// Models must be deterministic, always producing the same derivative for a
/// given state and time. Anything that varies during a simulation, such as a
/// time-dependent parameter, is expressed as a function of `time` rather than
/// as mutable internal state. This keeps models independent of the stepping
/// algorithm that drives them.
pub trait Model {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the derivative of `state` at `time`.
    ///
    /// # Errors
    ///
    /// Each model defines its own `Error` type to represent domain-specific failures.
    fn derivative(&self, state: ArrayView1<'_, f64>, time: f64) -> Result<Array1<f64>, Self::Error>;
}

impl<M: Model + ?Sized> Model for &M {
    type Error = M::Error;

    fn derivative(&self, state: ArrayView1<'_, f64>, time: f64) -> Result<Array1<f64>, Self::Error> {
        (**self).derivative(state, time)
    }
}

impl<M: Model + ?Sized> Model for Box<M> {
    type Error = M::Error;

    fn derivative(&self, state: ArrayView1<'_, f64>, time: f64) -> Result<Array1<f64>, Self::Error> {
        (**self).derivative(state, time)
    }
}

/// A model backed by an infallible closure over the full state vector.
///
/// Created by [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnModel<F>(F);

/// Creates a [`Model`] from a closure `f(state, time) -> derivative`.
///
/// ```
/// use ndarray::{Array1, array};
/// use odestep_core::{Model, from_fn};
///
/// let decay = from_fn(|u, _t| u.mapv(|x| -0.5 * x));
/// let rate: Array1<f64> = decay.derivative(array![2.0, 4.0].view(), 0.0).unwrap();
/// assert_eq!(rate, array![-1.0, -2.0]);
/// ```
pub fn from_fn<F>(f: F) -> FnModel<F>
where
    F: Fn(ArrayView1<'_, f64>, f64) -> Array1<f64>,
{
    FnModel(f)
}

impl<F> Model for FnModel<F>
where
    F: Fn(ArrayView1<'_, f64>, f64) -> Array1<f64>,
{
    type Error = Infallible;

    fn derivative(&self, state: ArrayView1<'_, f64>, time: f64) -> Result<Array1<f64>, Self::Error> {
        Ok((self.0)(state, time))
    }
}

/// A single-equation model backed by a scalar closure.
///
/// Created by [`scalar_fn`].
#[derive(Debug, Clone, Copy)]
pub struct ScalarFnModel<F>(F);

/// Creates a one-equation [`Model`] from a closure `f(u, t) -> du/dt`.
///
/// The state passed to the model must hold exactly one value. Any other
/// length yields an empty derivative, which a solver reports as a dimension
/// mismatch.
pub fn scalar_fn<F>(f: F) -> ScalarFnModel<F>
where
    F: Fn(f64, f64) -> f64,
{
    ScalarFnModel(f)
}

impl<F> Model for ScalarFnModel<F>
where
    F: Fn(f64, f64) -> f64,
{
    type Error = Infallible;

    fn derivative(&self, state: ArrayView1<'_, f64>, time: f64) -> Result<Array1<f64>, Self::Error> {
        if state.len() == 1 {
            Ok(arr1(&[(self.0)(state[0], time)]))
        } else {
            Ok(Array1::zeros(0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    #[test]
    fn closure_model_sees_state_and_time() {
        let model = from_fn(|u, t| u.mapv(|x| x * t));

        let rate = model.derivative(array![1.0, -2.0].view(), 3.0).unwrap();

        assert_eq!(rate, array![3.0, -6.0]);
    }

    #[test]
    fn scalar_model_lifts_to_one_element_vector() {
        let model = scalar_fn(|u, _t| -u);

        let rate = model.derivative(array![4.0].view(), 0.0).unwrap();

        assert_eq!(rate, array![-4.0]);
    }

    #[test]
    fn scalar_model_rejects_wider_state_by_returning_empty() {
        let model = scalar_fn(|u, _t| -u);

        let rate = model.derivative(array![1.0, 2.0].view(), 0.0).unwrap();

        assert!(rate.is_empty());
    }

    #[test]
    fn references_and_boxes_forward_to_the_model() {
        let model = scalar_fn(|u, t| u + t);
        let by_ref = &model;
        let boxed: Box<dyn Model<Error = Infallible>> = Box::new(from_fn(|u, _t| u.to_owned()));

        assert_eq!(by_ref.derivative(array![1.0].view(), 2.0).unwrap(), array![3.0]);
        assert_eq!(boxed.derivative(array![5.0].view(), 0.0).unwrap(), array![5.0]);
    }
}
