use super::LawContext;
use crate::errors::AttitudeError;
use crate::numerics::rotation::skew_to_vector;
use hifitime::Epoch;
use nalgebra as na;

/// Body axes locked to the axes of the reference frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameFixed;

impl FrameFixed {
    pub fn new() -> Self {
        FrameFixed
    }

    pub(crate) fn compute(
        &self,
        ctx: &LawContext,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        let r_ir = ctx.frame.rotation_matrix(epoch)?;
        let r_ir_dot = ctx.frame.rotation_matrix_derivative(epoch)?;

        let dcm = r_ir.transpose();
        let w_cross = -(r_ir_dot.transpose() * r_ir);
        Ok((dcm, skew_to_vector(&w_cross)))
    }
}
