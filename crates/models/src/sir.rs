//! The SIR compartmental epidemic model.
//!
//! A population is split into Susceptible, Infected, and Removed (recovered
//! or deceased) compartments. Individuals only move S → I → R:
//!
//! ```text
//! dS/dt = -beta(t) * S * I
//! dI/dt =  beta(t) * S * I - gamma(t) * I
//! dR/dt =  gamma(t) * I
//! ```
//!
//! `beta` is the contact rate and `gamma` the recovery rate, so `1 / gamma` is
//! the mean time an infected individual stays infectious. The derivatives sum
//! to zero, so the total population is constant.

use std::fmt;

use ndarray::{Array1, ArrayView1, array};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use odestep_core::Model;

use crate::{Rate, RateError};

/// Number of equations in the SIR system.
pub const SIR_EQUATIONS: usize = 3;

/// The size of each compartment at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SirState {
    pub susceptible: f64,
    pub infected: f64,
    pub removed: f64,
}

impl SirState {
    #[must_use]
    pub fn new(susceptible: f64, infected: f64, removed: f64) -> Self {
        Self {
            susceptible,
            infected,
            removed,
        }
    }

    /// Returns the total population.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.susceptible + self.infected + self.removed
    }
}

impl From<[f64; 3]> for SirState {
    fn from([susceptible, infected, removed]: [f64; 3]) -> Self {
        Self::new(susceptible, infected, removed)
    }
}

impl From<SirState> for [f64; 3] {
    fn from(state: SirState) -> Self {
        [state.susceptible, state.infected, state.removed]
    }
}

impl TryFrom<ArrayView1<'_, f64>> for SirState {
    type Error = SirError;

    fn try_from(state: ArrayView1<'_, f64>) -> Result<Self, Self::Error> {
        if state.len() != SIR_EQUATIONS {
            return Err(SirError::StateLength { found: state.len() });
        }
        Ok(Self::new(state[0], state[1], state[2]))
    }
}

#[derive(Debug, Error)]
pub enum SirError {
    #[error("SIR state must have 3 values, got {found}")]
    StateLength { found: usize },

    #[error("failed to evaluate {name}")]
    Rate {
        name: &'static str,
        #[source]
        source: RateError,
    },
}

/// The SIR model with possibly time-varying transmission parameters.
#[derive(Debug, Clone)]
pub struct Sir {
    beta: Rate,
    gamma: Rate,
    initial: SirState,
}

impl Sir {
    /// Creates a model from contact rate `beta`, recovery rate `gamma`, and
    /// the initial compartment sizes.
    ///
    /// Plain numbers become constant rates.
    pub fn new(beta: impl Into<Rate>, gamma: impl Into<Rate>, initial: SirState) -> Self {
        Self {
            beta: beta.into(),
            gamma: gamma.into(),
            initial,
        }
    }

    #[must_use]
    pub fn beta(&self) -> &Rate {
        &self.beta
    }

    #[must_use]
    pub fn gamma(&self) -> &Rate {
        &self.gamma
    }

    #[must_use]
    pub fn initial(&self) -> SirState {
        self.initial
    }

    /// Returns the initial state in `[S, I, R]` order, ready for a solver.
    #[must_use]
    pub fn initial_conditions(&self) -> [f64; 3] {
        self.initial.into()
    }

    /// Returns `(beta, gamma)` at `time`.
    ///
    /// # Errors
    ///
    /// Returns an error if either rate cannot be evaluated.
    pub fn rates_at(&self, time: f64) -> Result<(f64, f64), SirError> {
        let beta = self.beta.at(time).map_err(|source| SirError::Rate {
            name: "beta",
            source,
        })?;
        let gamma = self.gamma.at(time).map_err(|source| SirError::Rate {
            name: "gamma",
            source,
        })?;
        Ok((beta, gamma))
    }
}

impl Model for Sir {
    type Error = SirError;

    fn derivative(&self, state: ArrayView1<'_, f64>, time: f64) -> Result<Array1<f64>, Self::Error> {
        let SirState {
            susceptible: s,
            infected: i,
            ..
        } = SirState::try_from(state)?;
        let (beta, gamma) = self.rates_at(time)?;

        let infections = beta * s * i;
        let recoveries = gamma * i;

        Ok(array![-infections, infections - recoveries, recoveries])
    }
}

impl fmt::Display for Sir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial susceptible people: {}", self.initial.susceptible)?;
        write!(f, "Initial infected people: {}", self.initial.infected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{Step, StepSchedule};

    fn outbreak() -> Sir {
        Sir::new(0.0005, 0.1, SirState::new(1400.0, 1.0, 0.0))
    }

    #[test]
    fn derivative_follows_sir_equations() {
        let model = outbreak();

        let rate = model.derivative(array![1000.0, 50.0, 351.0].view(), 0.0).unwrap();

        assert_relative_eq!(rate[0], -25.0, epsilon = 1e-12);
        assert_relative_eq!(rate[1], 25.0 - 5.0, epsilon = 1e-12);
        assert_relative_eq!(rate[2], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn derivatives_sum_to_zero() {
        let model = outbreak();

        for state in [[1400.0, 1.0, 0.0], [700.0, 600.0, 101.0], [3.0, 0.5, 1397.5]] {
            let rate = model.derivative(ArrayView1::from(&state[..]), 4.0).unwrap();
            assert_relative_eq!(rate.sum(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn time_varying_beta_changes_infection_rate() {
        let beta = StepSchedule::new(
            0.0005,
            vec![Step {
                after: 10.0,
                value: 0.0001,
            }],
        )
        .unwrap();
        let model = Sir::new(beta, 0.1, SirState::new(1400.0, 1.0, 0.0));
        let state = array![1400.0, 1.0, 0.0];

        let early = model.derivative(state.view(), 5.0).unwrap();
        let late = model.derivative(state.view(), 15.0).unwrap();

        assert_relative_eq!(early[0], -0.7, epsilon = 1e-12);
        assert_relative_eq!(late[0], -0.14, epsilon = 1e-12);
    }

    #[test]
    fn rejects_wrong_state_length() {
        let model = outbreak();

        let err = model.derivative(array![1.0, 2.0].view(), 0.0).unwrap_err();

        assert!(matches!(err, SirError::StateLength { found: 2 }));
    }

    #[test]
    fn rate_failures_name_the_parameter() {
        let model = Sir::new(0.0005, Rate::function(|_| f64::NAN), outbreak().initial());

        let err = model.derivative(array![1.0, 2.0, 3.0].view(), 1.0).unwrap_err();

        assert!(matches!(err, SirError::Rate { name: "gamma", .. }));
        assert_eq!(err.to_string(), "failed to evaluate gamma");
    }

    #[test]
    fn initial_conditions_are_ordered_s_i_r() {
        let model = outbreak();

        assert_eq!(model.initial_conditions(), [1400.0, 1.0, 0.0]);
        assert_relative_eq!(model.initial().total(), 1401.0);
    }

    #[test]
    fn display_summarizes_initial_population() {
        assert_eq!(
            outbreak().to_string(),
            "Initial susceptible people: 1400\nInitial infected people: 1"
        );
    }
}
