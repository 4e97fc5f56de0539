use crate::constants::EARTH_ANGULAR_VELOCITY;
use crate::errors::AttitudeError;
use hifitime::Epoch;
use nalgebra as na;
use std::fmt;

/// Orientation of a reference frame with respect to the inertial frame.
///
/// `rotation_matrix` maps coordinates expressed in this frame to inertial
/// coordinates; `rotation_matrix_derivative` is its time derivative (1/s).
pub trait ReferenceFrame: fmt::Debug {
    fn name(&self) -> &str;

    fn rotation_matrix(&self, epoch: Epoch) -> Result<na::Matrix3<f64>, AttitudeError>;

    fn rotation_matrix_derivative(&self, epoch: Epoch) -> Result<na::Matrix3<f64>, AttitudeError>;
}

/// The inertial frame itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertialFrame;

impl ReferenceFrame for InertialFrame {
    fn name(&self) -> &str {
        "Inertial"
    }

    fn rotation_matrix(&self, _epoch: Epoch) -> Result<na::Matrix3<f64>, AttitudeError> {
        Ok(na::Matrix3::identity())
    }

    fn rotation_matrix_derivative(&self, _epoch: Epoch) -> Result<na::Matrix3<f64>, AttitudeError> {
        Ok(na::Matrix3::zeros())
    }
}

/// Frame spinning uniformly about the inertial +Z axis.
#[derive(Debug, Clone)]
pub struct RotatingFrame {
    name: String,
    rate: f64,          // rad/s
    reference_epoch: Epoch,
    initial_angle: f64, // rad, at reference_epoch
}

impl RotatingFrame {
    pub fn new(name: &str, rate: f64, reference_epoch: Epoch, initial_angle: f64) -> Self {
        RotatingFrame {
            name: name.to_string(),
            rate,
            reference_epoch,
            initial_angle,
        }
    }

    /// Earth-fixed frame with the prime meridian on the inertial +X axis at
    /// `reference_epoch` (sidereal angle reckoned from that epoch, no
    /// precession, nutation or polar motion).
    pub fn earth_fixed(reference_epoch: Epoch) -> Self {
        Self::new("EarthFixed", EARTH_ANGULAR_VELOCITY, reference_epoch, 0.0)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn angle_at(&self, epoch: Epoch) -> f64 {
        self.initial_angle + self.rate * (epoch - self.reference_epoch).to_seconds()
    }
}

impl ReferenceFrame for RotatingFrame {
    fn name(&self) -> &str {
        &self.name
    }

    fn rotation_matrix(&self, epoch: Epoch) -> Result<na::Matrix3<f64>, AttitudeError> {
        let theta = self.angle_at(epoch);
        Ok(na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), theta).into_inner())
    }

    fn rotation_matrix_derivative(&self, epoch: Epoch) -> Result<na::Matrix3<f64>, AttitudeError> {
        let (s, c) = self.angle_at(epoch).sin_cos();
        Ok(self.rate * na::Matrix3::new(-s, -c, 0.0, c, -s, 0.0, 0.0, 0.0, 0.0))
    }
}
