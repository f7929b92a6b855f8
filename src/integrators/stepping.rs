use crate::constants::NOMINAL_FRAME_SECONDS;
use crate::errors::ScenarioError;
use hifitime::Duration;

/// Decides how far a phase angle moves during one tick.
pub trait PhaseStepper {
    fn angle_step(&self, dt: Duration) -> f64;
}

/// Frame-coupled stepping: the same increment every tick, whatever `dt` is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    pub step: f64,
}

impl FixedStep {
    pub fn new(step: f64) -> Self {
        FixedStep { step }
    }
}

impl PhaseStepper for FixedStep {
    fn angle_step(&self, _dt: Duration) -> f64 {
        self.step
    }
}

/// Elapsed-time stepping at a constant angular rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularRate {
    pub radians_per_second: f64,
}

impl AngularRate {
    pub fn new(radians_per_second: f64) -> Self {
        AngularRate { radians_per_second }
    }

    /// Rate that reproduces a per-tick step at the nominal frame rate.
    pub fn from_frame_step(step: f64) -> Self {
        AngularRate::new(step / NOMINAL_FRAME_SECONDS)
    }
}

impl PhaseStepper for AngularRate {
    fn angle_step(&self, dt: Duration) -> f64 {
        self.radians_per_second * dt.to_seconds()
    }
}

/// Stepping choice as carried by a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stepping {
    PerTick(f64),
    Rate(f64),
}

impl Stepping {
    /// Builds the stepper. Non-finite values would turn every position into
    /// NaN on the first tick, so they are rejected here.
    pub fn stepper(&self) -> Result<Box<dyn PhaseStepper>, ScenarioError> {
        match *self {
            Stepping::PerTick(step) if step.is_finite() => Ok(Box::new(FixedStep::new(step))),
            Stepping::Rate(rate) if rate.is_finite() => Ok(Box::new(AngularRate::new(rate))),
            Stepping::PerTick(value) | Stepping::Rate(value) => {
                Err(ScenarioError::NonFiniteStepping(value))
            }
        }
    }

    /// Elapsed-time equivalent: a per-tick step becomes the rate that
    /// reproduces it at the nominal frame period.
    pub fn time_based(&self) -> Stepping {
        match *self {
            Stepping::PerTick(step) => {
                Stepping::Rate(AngularRate::from_frame_step(step).radians_per_second)
            }
            rate @ Stepping::Rate(_) => rate,
        }
    }
}
