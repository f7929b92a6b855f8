use crate::errors::OrbitError;
use crate::physics::orbital::Orbit;
use nalgebra as na;

/// A body following one [`Orbit`], driven by a phase angle.
#[derive(Debug, Clone)]
pub struct Satellite {
    orbit: Orbit,
    /// Phase angle [rad]. Never wrapped, so each advance adds exactly its step.
    angle: f64,
    /// Position computed on the last refresh.
    position: na::Vector3<f64>,
}

impl Satellite {
    pub fn new(orbit: Orbit) -> Self {
        let position = orbit.position_at(0.0);
        Self {
            orbit,
            angle: 0.0,
            position,
        }
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn position(&self) -> na::Vector3<f64> {
        self.position
    }

    pub fn advance(&mut self, angle_step: f64) {
        self.angle += angle_step;
    }

    /// Position for the current angle. Does not touch the cached position.
    pub fn compute_position(&self) -> na::Vector3<f64> {
        self.orbit.position_at(self.angle)
    }

    /// Recomputes the cached position from the current angle.
    pub fn refresh(&mut self) -> na::Vector3<f64> {
        self.position = self.compute_position();
        self.position
    }
}

/// Builds a satellite at phase zero from raw orbit parameters.
pub fn create_orbit(
    semi_major_axis: f64,
    eccentricity: f64,
    inclination_deg: f64,
    ascending_node_deg: f64,
) -> Result<Satellite, OrbitError> {
    Orbit::new(
        semi_major_axis,
        eccentricity,
        inclination_deg,
        ascending_node_deg,
    )
    .map(Satellite::new)
}

pub fn advance(satellite: &mut Satellite, angle_step: f64) {
    satellite.advance(angle_step);
}

pub fn compute_position(satellite: &Satellite) -> na::Vector3<f64> {
    satellite.compute_position()
}
