use crate::constants::TAU;
use crate::errors::OrbitError;
use nalgebra as na;

/// Static parameters of a centered elliptical orbit.
///
/// The ellipse is centered on the origin (no focus offset) and lies in the
/// XZ plane before the plane rotations are applied:
///   1. rotation about Z by the ascending node angle
///   2. rotation about X by the inclination
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    semi_major_axis: f64,
    eccentricity: f64,
    semi_minor_axis: f64,
    inclination_deg: f64,
    ascending_node_deg: f64,
    orientation: na::Rotation3<f64>,
}

impl Orbit {
    pub fn new(
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
    ) -> Result<Self, OrbitError> {
        check_finite("semi-major axis", semi_major_axis)?;
        check_finite("eccentricity", eccentricity)?;
        check_finite("inclination", inclination_deg)?;
        check_finite("ascending node", ascending_node_deg)?;

        if semi_major_axis <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis(semi_major_axis));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidEccentricity(eccentricity));
        }

        let semi_minor_axis = semi_major_axis * (1.0 - eccentricity * eccentricity).sqrt();

        let rot_node =
            na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), ascending_node_deg.to_radians());
        let rot_i =
            na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), inclination_deg.to_radians());

        Ok(Self {
            semi_major_axis,
            eccentricity,
            semi_minor_axis,
            inclination_deg,
            ascending_node_deg,
            // Node rotation is applied first
            orientation: rot_i * rot_node,
        })
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    pub fn inclination_deg(&self) -> f64 {
        self.inclination_deg
    }

    pub fn ascending_node_deg(&self) -> f64 {
        self.ascending_node_deg
    }

    /// Point on the ellipse in its own un-rotated plane.
    pub fn plane_point(&self, angle: f64) -> na::Vector3<f64> {
        na::Vector3::new(
            self.semi_major_axis * angle.cos(),
            0.0,
            self.semi_minor_axis * angle.sin(),
        )
    }

    /// Position at the given phase angle [rad], in the central body frame.
    pub fn position_at(&self, angle: f64) -> na::Vector3<f64> {
        self.orientation * self.plane_point(angle)
    }

    /// Largest distance from the origin (centered ellipse, so this is `a`).
    pub fn apoapsis_distance(&self) -> f64 {
        self.semi_major_axis
    }

    /// Smallest distance from the origin (centered ellipse, so this is `b`).
    pub fn periapsis_distance(&self) -> f64 {
        self.semi_minor_axis
    }

    /// Samples the closed orbit path with `segments + 1` points; the last
    /// point repeats the first.
    pub fn path_points(&self, segments: usize) -> Result<Vec<na::Vector3<f64>>, OrbitError> {
        if segments == 0 {
            return Err(OrbitError::InvalidPathResolution);
        }
        Ok((0..=segments)
            .map(|i| self.position_at(TAU * i as f64 / segments as f64))
            .collect())
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), OrbitError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OrbitError::NonFiniteParameter { name, value })
    }
}
