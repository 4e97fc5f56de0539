use super::{Baseline, LawContext};
use crate::errors::AttitudeError;
use crate::numerics::rotation::euler_axis_angle_to_dcm;
use hifitime::Epoch;
use nalgebra as na;

/// Rigid rotation at the constant body rate given at the epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantSpin {
    axis: na::Vector3<f64>,
    rate: f64,
    angular_velocity: na::Vector3<f64>,
    initial_dcm: na::Matrix3<f64>,
}

impl Default for ConstantSpin {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstantSpin {
    pub fn new() -> Self {
        ConstantSpin {
            axis: na::Vector3::x(),
            rate: 0.0,
            angular_velocity: na::Vector3::zeros(),
            initial_dcm: na::Matrix3::identity(),
        }
    }

    pub(crate) fn initialize(
        &mut self,
        ctx: &LawContext,
        baseline: &Baseline,
    ) -> Result<(), AttitudeError> {
        let r_ir = ctx.frame.rotation_matrix(ctx.epoch)?;

        self.angular_velocity = baseline.angular_velocity;
        self.rate = baseline.angular_velocity.norm();
        self.axis = if self.rate > 0.0 {
            baseline.angular_velocity / self.rate
        } else {
            na::Vector3::x()
        };
        self.initial_dcm = baseline.cosine_matrix * r_ir.transpose();
        Ok(())
    }

    pub(crate) fn compute(
        &self,
        ctx: &LawContext,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        let dt = (epoch - ctx.epoch).to_seconds();
        let step = euler_axis_angle_to_dcm(&self.axis, self.rate * dt);
        Ok((step * self.initial_dcm, self.angular_velocity))
    }
}
