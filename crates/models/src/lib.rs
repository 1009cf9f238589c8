//! Models for `odestep` solvers.
//!
//! - [`Sir`] — the Susceptible–Infected–Removed epidemic model
//! - [`Rate`] — a parameter that is constant, scheduled, tabulated, or an
//!   arbitrary function of time
//! - [`SirConfig`] — a serializable scenario that builds a model and time grid
//!
//! # Example
//!
//! ```
//! use odestep_models::SirConfig;
//! use odestep_solvers::Solver;
//!
//! let (model, grid) = SirConfig::default().build()?;
//! let solver = Solver::euler(&model).with_init_conditions(model.initial_conditions())?;
//!
//! let solution = solver.solve(grid.as_slice())?;
//! let infected = solution.column(1).unwrap();
//!
//! assert!(infected.iter().any(|&i| i > 100.0));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod rate;
mod schedule;
mod table;

pub mod config;
pub mod sir;

pub use config::{ConfigError, Horizon, RateConfig, SirConfig};
pub use rate::{Rate, RateError};
pub use schedule::{Step, StepSchedule, StepScheduleError};
pub use sir::{SIR_EQUATIONS, Sir, SirError, SirState};
pub use table::{RateTable, RateTableError};
