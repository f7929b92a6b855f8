use super::globe::Globe;
use super::satellite::Satellite;
use crate::constants::{GLOBE_SPIN_STEP, SATELLITE_ANGLE_STEP};
use crate::integrators::stepping::{FixedStep, PhaseStepper};
use hifitime::Duration;
use log::debug;
use nalgebra as na;

/// Snapshot of one tick's outputs, handed to the renderer side.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub elapsed: Duration,
    pub globe_rotation: f64,
    /// Satellite positions in registration order
    pub positions: Vec<na::Vector3<f64>>,
}

/// The set of satellites and the globe they circle, owned by the host.
pub struct Constellation {
    globe: Globe,
    satellites: Vec<Satellite>,
    satellite_stepper: Box<dyn PhaseStepper>,
    globe_stepper: Box<dyn PhaseStepper>,
    tick_count: u64,
    elapsed: Duration,
}

impl Constellation {
    pub fn new(
        globe: Globe,
        satellite_stepper: Box<dyn PhaseStepper>,
        globe_stepper: Box<dyn PhaseStepper>,
    ) -> Self {
        Self {
            globe,
            satellites: Vec::new(),
            satellite_stepper,
            globe_stepper,
            tick_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Registers a satellite and returns its index.
    pub fn register(&mut self, satellite: Satellite) -> usize {
        let index = self.satellites.len();
        debug!(
            "Registered satellite {}: a={}, e={}, i={}°, node={}°",
            index,
            satellite.orbit().semi_major_axis(),
            satellite.orbit().eccentricity(),
            satellite.orbit().inclination_deg(),
            satellite.orbit().ascending_node_deg(),
        );
        self.satellites.push(satellite);
        index
    }

    /// Advances everything by one tick of length `dt`.
    ///
    /// The globe spins first, then each satellite is advanced and its position
    /// refreshed, in registration order.
    pub fn tick(&mut self, dt: Duration) -> Frame {
        self.globe.spin(self.globe_stepper.angle_step(dt));

        let step = self.satellite_stepper.angle_step(dt);
        for satellite in self.satellites.iter_mut() {
            satellite.advance(step);
            satellite.refresh();
        }

        self.tick_count += 1;
        self.elapsed = self.elapsed + dt;
        self.frame()
    }

    /// Current state as a frame, without advancing.
    pub fn frame(&self) -> Frame {
        Frame {
            tick: self.tick_count,
            elapsed: self.elapsed,
            globe_rotation: self.globe.rotation,
            positions: self.satellites.iter().map(Satellite::position).collect(),
        }
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn globe(&self) -> &Globe {
        &self.globe
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}

impl Default for Constellation {
    /// Frame-coupled stepping at the original demo's rates.
    fn default() -> Self {
        Self::new(
            Globe::new(),
            Box::new(FixedStep::new(SATELLITE_ANGLE_STEP)),
            Box::new(FixedStep::new(GLOBE_SPIN_STEP)),
        )
    }
}
