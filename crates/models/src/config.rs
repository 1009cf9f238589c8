//! Serializable descriptions of SIR scenarios.
//!
//! A [`SirConfig`] can be read from any serde format. In TOML:
//!
//! ```toml
//! gamma = 0.1
//! beta = { initial = 0.0005, steps = [{ after = 10.0, value = 0.0001 }] }
//! initial = { susceptible = 1400.0, infected = 1.0, removed = 0.0 }
//! horizon = { days = 90.0, points = 1000 }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use odestep_core::{TimeGrid, TimeGridError};

use crate::{Rate, RateTable, RateTableError, Sir, SirState, Step, StepSchedule, StepScheduleError};

/// How a rate parameter is written in a configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateConfig {
    /// A bare number.
    Constant(f64),

    /// A piecewise-constant schedule.
    Schedule { initial: f64, steps: Vec<Step> },

    /// `[time, value]` samples, linearly interpolated.
    Table { table: Vec<[f64; 2]> },
}

/// The simulated time span, starting at day zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Horizon {
    pub days: f64,
    pub points: usize,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            days: 90.0,
            points: 1000,
        }
    }
}

/// A complete SIR scenario: rates, initial population, and time grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SirConfig {
    pub beta: RateConfig,
    pub gamma: RateConfig,
    pub initial: SirState,
    #[serde(default)]
    pub horizon: Horizon,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFiniteRate { name: &'static str, value: f64 },

    #[error("invalid {name} schedule")]
    Schedule {
        name: &'static str,
        #[source]
        source: StepScheduleError,
    },

    #[error("invalid {name} table")]
    Table {
        name: &'static str,
        #[source]
        source: RateTableError,
    },

    #[error("{compartment} population must be finite and non-negative, got {value}")]
    Population {
        compartment: &'static str,
        value: f64,
    },

    #[error("invalid horizon: {0}")]
    Horizon(#[from] TimeGridError),
}

impl Default for SirConfig {
    /// The reference outbreak: 1400 susceptible and 1 infected, with contact
    /// reduced fivefold after the first ten days.
    fn default() -> Self {
        Self {
            beta: RateConfig::Schedule {
                initial: 0.0005,
                steps: vec![Step {
                    after: 10.0,
                    value: 0.0001,
                }],
            },
            gamma: RateConfig::Constant(0.1),
            initial: SirState::new(1400.0, 1.0, 0.0),
            horizon: Horizon::default(),
        }
    }
}

impl RateConfig {
    /// Builds the rate described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is not finite or its schedule or table is
    /// invalid. `name` identifies the parameter in the error.
    pub fn build(&self, name: &'static str) -> Result<Rate, ConfigError> {
        match self {
            Self::Constant(value) if !value.is_finite() => {
                Err(ConfigError::NonFiniteRate { name, value: *value })
            }
            Self::Constant(value) => Ok(Rate::Constant(*value)),
            Self::Schedule { initial, steps } => StepSchedule::new(*initial, steps.clone())
                .map(Rate::from)
                .map_err(|source| ConfigError::Schedule { name, source }),
            Self::Table { table } => RateTable::from_pairs(table)
                .map(Rate::from)
                .map_err(|source| ConfigError::Table { name, source }),
        }
    }
}

impl SirConfig {
    /// Builds the model and the time grid for this scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if a rate, the initial population, or the horizon is
    /// invalid.
    pub fn build(&self) -> Result<(Sir, TimeGrid), ConfigError> {
        let beta = self.beta.build("beta")?;
        let gamma = self.gamma.build("gamma")?;

        let SirState {
            susceptible,
            infected,
            removed,
        } = self.initial;
        for (compartment, value) in [
            ("susceptible", susceptible),
            ("infected", infected),
            ("removed", removed),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Population { compartment, value });
            }
        }

        let grid = TimeGrid::linspace(0.0, self.horizon.days, self.horizon.points)?;

        debug!(
            days = self.horizon.days,
            points = self.horizon.points,
            "built SIR scenario"
        );

        Ok((Sir::new(beta, gamma, self.initial), grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn default_is_reference_scenario() {
        let (model, grid) = SirConfig::default().build().unwrap();

        assert_eq!(model.initial_conditions(), [1400.0, 1.0, 0.0]);
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.time(999), Some(90.0));
        assert_relative_eq!(model.beta().at(10.0).unwrap(), 0.0005);
        assert_relative_eq!(model.beta().at(11.0).unwrap(), 0.0001);
        assert_relative_eq!(model.gamma().at(50.0).unwrap(), 0.1);
    }

    #[test]
    fn reads_json() {
        let json = r#"{
            "beta": 0.0005,
            "gamma": { "table": [[0.0, 0.1], [30.0, 0.2]] },
            "initial": { "susceptible": 500.0, "infected": 5.0, "removed": 0.0 },
            "horizon": { "days": 30.0, "points": 31 }
        }"#;

        let config: SirConfig = serde_json::from_str(json).unwrap();
        let (model, grid) = config.build().unwrap();

        assert_eq!(config.beta, RateConfig::Constant(0.0005));
        assert_relative_eq!(model.gamma().at(15.0).unwrap(), 0.15, epsilon = 1e-12);
        assert_eq!(grid.len(), 31);
        assert_relative_eq!(grid.dt(0).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn reads_toml_with_default_horizon() {
        let text = r#"
            gamma = 0.1
            beta = { initial = 0.0005, steps = [{ after = 10.0, value = 0.0001 }] }
            initial = { susceptible = 1400.0, infected = 1.0, removed = 0.0 }
        "#;

        let config: SirConfig = toml::from_str(text).unwrap();

        assert_eq!(config, SirConfig::default());
    }

    #[test]
    fn partial_horizon_fills_defaults() {
        let json = r#"{
            "beta": 0.0005,
            "gamma": 0.1,
            "initial": { "susceptible": 10.0, "infected": 1.0, "removed": 0.0 },
            "horizon": { "days": 10.0 }
        }"#;

        let config: SirConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config.horizon,
            Horizon {
                days: 10.0,
                points: 1000
            }
        );
    }

    #[test]
    fn rejects_invalid_scenarios() {
        let mut config = SirConfig::default();
        config.initial.infected = -1.0;
        assert!(matches!(
            config.build(),
            Err(ConfigError::Population {
                compartment: "infected",
                ..
            })
        ));

        let mut config = SirConfig::default();
        config.gamma = RateConfig::Table {
            table: vec![[0.0, 0.1]],
        };
        assert!(matches!(
            config.build(),
            Err(ConfigError::Table { name: "gamma", .. })
        ));

        let mut config = SirConfig::default();
        config.beta = RateConfig::Schedule {
            initial: 0.1,
            steps: vec![
                Step {
                    after: 1.0,
                    value: 0.2,
                },
                Step {
                    after: 1.0,
                    value: 0.3,
                },
            ],
        };
        assert!(matches!(
            config.build(),
            Err(ConfigError::Schedule { name: "beta", .. })
        ));

        let mut config = SirConfig::default();
        config.horizon.points = 0;
        assert!(matches!(
            config.build(),
            Err(ConfigError::Horizon(TimeGridError::Empty))
        ));
    }
}
