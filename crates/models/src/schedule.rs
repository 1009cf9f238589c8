use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const LINEAR_SEARCH_THRESHOLD: usize = 32;

/// A piecewise-constant value over time.
///
/// The schedule holds `initial` until the first step and switches to each
/// step's value once time passes its `after` point. A step at `after = 10`
/// therefore leaves `t = 10` on the previous value and applies from any
/// `t > 10` onward.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSchedule {
    initial: f64,
    steps: Vec<Step>,
}

/// A change of value in a [`StepSchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// The value applies for times strictly greater than this.
    pub after: f64,
    pub value: f64,
}

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum StepScheduleError {
    #[error("initial value ({0}) is not finite")]
    NonFiniteInitial(f64),

    #[error("step {index} is invalid: after ({after}) and value ({value}) must be finite")]
    NonFiniteStep { index: usize, after: f64, value: f64 },

    #[error("steps {prev_index} and {curr_index} both switch after {after}")]
    DuplicateStep {
        prev_index: usize,
        curr_index: usize,
        after: f64,
    },
}

impl StepSchedule {
    /// Creates a schedule from an initial value and a set of steps.
    ///
    /// Steps may be given in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if any value or switch time is not finite, or if two
    /// steps share the same switch time.
    pub fn new(initial: f64, mut steps: Vec<Step>) -> Result<Self, StepScheduleError> {
        if !initial.is_finite() {
            return Err(StepScheduleError::NonFiniteInitial(initial));
        }

        for (index, step) in steps.iter().enumerate() {
            if !step.after.is_finite() || !step.value.is_finite() {
                return Err(StepScheduleError::NonFiniteStep {
                    index,
                    after: step.after,
                    value: step.value,
                });
            }
        }

        steps.sort_by(|a, b| a.after.total_cmp(&b.after));

        for i in 1..steps.len() {
            if steps[i - 1].after == steps[i].after {
                return Err(StepScheduleError::DuplicateStep {
                    prev_index: i - 1,
                    curr_index: i,
                    after: steps[i].after,
                });
            }
        }

        Ok(Self { initial, steps })
    }

    /// Creates a schedule that never changes.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            initial: value,
            steps: Vec::new(),
        }
    }

    /// Returns the value before the first step.
    #[must_use]
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Returns the steps, sorted by switch time.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Returns the value in effect at `time`.
    #[must_use]
    pub fn value_at(&self, time: f64) -> f64 {
        let active = if self.steps.len() <= LINEAR_SEARCH_THRESHOLD {
            self.steps.iter().rev().find(|step| step.after < time)
        } else {
            // Index of the first step not yet in effect.
            let pending = self
                .steps
                .binary_search_by(|step| {
                    if step.after < time {
                        Ordering::Less
                    } else {
                        Ordering::Greater
                    }
                })
                .unwrap_or_else(|index| index);
            pending.checked_sub(1).map(|index| &self.steps[index])
        };

        active.map_or(self.initial, |step| step.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distancing() -> StepSchedule {
        StepSchedule::new(
            0.0005,
            vec![Step {
                after: 10.0,
                value: 0.0001,
            }],
        )
        .unwrap()
    }

    #[test]
    fn switches_strictly_after_step_time() {
        let schedule = distancing();

        assert_eq!(schedule.value_at(0.0), 0.0005);
        assert_eq!(schedule.value_at(10.0), 0.0005);
        assert_eq!(schedule.value_at(10.000_001), 0.0001);
        assert_eq!(schedule.value_at(90.0), 0.0001);
    }

    #[test]
    fn steps_are_sorted() {
        let schedule = StepSchedule::new(
            1.0,
            vec![
                Step {
                    after: 5.0,
                    value: 3.0,
                },
                Step {
                    after: 1.0,
                    value: 2.0,
                },
            ],
        )
        .unwrap();

        assert_eq!(schedule.steps()[0].after, 1.0);
        assert_eq!(schedule.value_at(0.5), 1.0);
        assert_eq!(schedule.value_at(3.0), 2.0);
        assert_eq!(schedule.value_at(6.0), 3.0);
    }

    #[test]
    fn long_schedule_matches_linear_lookup() {
        let steps: Vec<Step> = (0..100)
            .map(|i| Step {
                after: f64::from(i),
                value: f64::from(i) * 10.0,
            })
            .collect();
        let schedule = StepSchedule::new(-1.0, steps).unwrap();

        assert_eq!(schedule.value_at(-5.0), -1.0);
        assert_eq!(schedule.value_at(0.0), -1.0);
        assert_eq!(schedule.value_at(0.5), 0.0);
        assert_eq!(schedule.value_at(42.0), 410.0);
        assert_eq!(schedule.value_at(42.5), 420.0);
        assert_eq!(schedule.value_at(1e6), 990.0);
    }

    #[test]
    fn constant_schedule_never_changes() {
        let schedule = StepSchedule::constant(0.1);

        assert_eq!(schedule.value_at(-1e9), 0.1);
        assert_eq!(schedule.value_at(1e9), 0.1);
    }

    #[test]
    fn rejects_invalid_schedules() {
        assert_eq!(
            StepSchedule::new(f64::NAN, vec![]).unwrap_err().to_string(),
            "initial value (NaN) is not finite"
        );

        let err = StepSchedule::new(
            1.0,
            vec![Step {
                after: f64::INFINITY,
                value: 1.0,
            }],
        )
        .unwrap_err();
        assert!(matches!(err, StepScheduleError::NonFiniteStep { index: 0, .. }));

        let err = StepSchedule::new(
            1.0,
            vec![
                Step {
                    after: 2.0,
                    value: 1.0,
                },
                Step {
                    after: 2.0,
                    value: 3.0,
                },
            ],
        )
        .unwrap_err();
        assert!(matches!(err, StepScheduleError::DuplicateStep { after, .. } if after == 2.0));
    }
}
