use super::{LawContext, Notice};
use crate::constants::{DEGENERATE_VECTOR_TOLERANCE, EULER_ANGLE_TOLERANCE};
use crate::errors::AttitudeError;
use crate::numerics::euler::{euler_angles_to_dcm, euler_rates_to_angular_velocity, EulerSequence};
use crate::numerics::rotation::alignment_dcm;
use hifitime::Epoch;
use nalgebra as na;

/// Torque-free precession of a symmetric body: the spin axis cones about a
/// fixed nutation reference vector at a constant nutation angle while the
/// body spins about that axis.
///
/// The motion is a 3-1-3 sequence (precession, nutation, spin) between a
/// nutation frame whose +Z is the reference vector and a spin frame whose +Z
/// is the body spin axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecessingSpin {
    /// Nutation reference vector in the reference frame.
    pub nutation_reference: na::Vector3<f64>,
    /// Spin axis in body coordinates.
    pub spin_axis: na::Vector3<f64>,
    pub initial_precession: f64, // rad
    pub precession_rate: f64,    // rad/s
    pub nutation: f64,           // rad
    pub initial_spin: f64,       // rad
    pub spin_rate: f64,          // rad/s

    reference_to_nutation: na::Matrix3<f64>,
    spin_frame_to_body: na::Matrix3<f64>,
    inertial_to_reference: na::Matrix3<f64>,
}

impl Default for PrecessingSpin {
    fn default() -> Self {
        PrecessingSpin {
            nutation_reference: na::Vector3::z(),
            spin_axis: na::Vector3::z(),
            initial_precession: 0.0,
            precession_rate: 1.0_f64.to_radians(),
            nutation: 15.0_f64.to_radians(),
            initial_spin: 0.0,
            spin_rate: 10.0_f64.to_radians(),
            reference_to_nutation: na::Matrix3::identity(),
            spin_frame_to_body: na::Matrix3::identity(),
            inertial_to_reference: na::Matrix3::identity(),
        }
    }
}

impl PrecessingSpin {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn validate(&self) -> Result<(), AttitudeError> {
        for (label, v) in [
            ("nutation reference vector", &self.nutation_reference),
            ("body spin axis", &self.spin_axis),
        ] {
            if v.norm() < DEGENERATE_VECTOR_TOLERANCE {
                return Err(AttitudeError::DegenerateVector(format!(
                    "the {} magnitude {:e} is below {:e}",
                    label,
                    v.norm(),
                    DEGENERATE_VECTOR_TOLERANCE
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn initialize(&mut self, ctx: &LawContext) -> Result<Vec<Notice>, AttitudeError> {
        self.validate()?;
        let mut notices = Vec::new();

        if self.nutation.sin().abs() < EULER_ANGLE_TOLERANCE {
            notices.push(Notice::NutationAngleNearZero {
                nutation: self.nutation,
            });
        }

        let to_nutation = alignment_dcm(&self.nutation_reference, &na::Vector3::z())?;
        if to_nutation.anti_parallel {
            notices.push(Notice::AntiParallelAlignment {
                alignment: "nutation reference vector to nutation frame +Z",
            });
        }
        let to_body = alignment_dcm(&na::Vector3::z(), &self.spin_axis)?;
        if to_body.anti_parallel {
            notices.push(Notice::AntiParallelAlignment {
                alignment: "spin frame +Z to body spin axis",
            });
        }

        self.reference_to_nutation = to_nutation.dcm;
        self.spin_frame_to_body = to_body.dcm;
        self.inertial_to_reference = ctx.frame.rotation_matrix(ctx.epoch)?.transpose();
        Ok(notices)
    }

    fn angles_at(&self, dt: f64) -> na::Vector3<f64> {
        na::Vector3::new(
            self.initial_precession + self.precession_rate * dt,
            self.nutation,
            self.initial_spin + self.spin_rate * dt,
        )
    }

    pub(crate) fn compute(
        &self,
        ctx: &LawContext,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        let angles = self.angles_at((epoch - ctx.epoch).to_seconds());
        let nutation_to_spin = euler_angles_to_dcm(&angles, EulerSequence::Seq313);

        let dcm = self.spin_frame_to_body
            * nutation_to_spin
            * self.reference_to_nutation
            * self.inertial_to_reference;

        let rates = na::Vector3::new(self.precession_rate, 0.0, self.spin_rate);
        let w_spin = euler_rates_to_angular_velocity(&rates, &angles, EulerSequence::Seq313);
        Ok((dcm, self.spin_frame_to_body * w_spin))
    }
}
