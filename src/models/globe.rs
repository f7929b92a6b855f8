use crate::constants::{ATMOSPHERE_RADIUS, GLOBE_RADIUS};
use nalgebra as na;

/// The central body. Only its spin is simulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Globe {
    pub radius: f64,
    pub atmosphere_radius: f64,
    /// Rotation about the polar axis [rad]
    pub rotation: f64,
}

impl Globe {
    pub fn new() -> Self {
        Self {
            radius: GLOBE_RADIUS,
            atmosphere_radius: ATMOSPHERE_RADIUS,
            rotation: 0.0,
        }
    }

    pub fn spin(&mut self, step: f64) {
        self.rotation += step;
    }

    /// Height of a point above the globe surface (negative when inside).
    pub fn surface_clearance(&self, point: &na::Vector3<f64>) -> f64 {
        point.magnitude() - self.radius
    }

    pub fn is_inside_atmosphere(&self, point: &na::Vector3<f64>) -> bool {
        point.magnitude() < self.atmosphere_radius
    }
}

impl Default for Globe {
    fn default() -> Self {
        Self::new()
    }
}
