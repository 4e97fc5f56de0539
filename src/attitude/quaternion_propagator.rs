use super::{Baseline, LawContext};
use crate::errors::AttitudeError;
use crate::numerics::quaternion::Quaternion;
use crate::numerics::rotation::dcm_to_quaternion;
use hifitime::Epoch;
use nalgebra as na;

/// Closed-form solution of the quaternion kinematic equation for a constant
/// body rate.
#[derive(Debug, Clone, PartialEq)]
pub struct QuaternionPropagator {
    initial_quaternion: Quaternion,
    angular_velocity: na::Vector3<f64>,
}

impl Default for QuaternionPropagator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuaternionPropagator {
    pub fn new() -> Self {
        QuaternionPropagator {
            initial_quaternion: Quaternion::identity(),
            angular_velocity: na::Vector3::zeros(),
        }
    }

    pub(crate) fn initialize(
        &mut self,
        ctx: &LawContext,
        baseline: &Baseline,
    ) -> Result<(), AttitudeError> {
        let r_ir = ctx.frame.rotation_matrix(ctx.epoch)?;
        self.initial_quaternion = dcm_to_quaternion(&(baseline.cosine_matrix * r_ir.transpose()))?;
        self.angular_velocity = baseline.angular_velocity;
        Ok(())
    }

    /// `q(t) = [cos(|w| dt / 2) I + sin(|w| dt / 2) / |w| Omega(w)] q0`
    pub fn propagate(&self, dt: f64) -> Result<Quaternion, AttitudeError> {
        let rate = self.angular_velocity.norm();
        if rate == 0.0 {
            return Ok(self.initial_quaternion);
        }

        let half_angle = 0.5 * rate * dt;
        let transition = half_angle.cos() * na::Matrix4::identity()
            + (half_angle.sin() / rate) * Quaternion::omega_matrix(&self.angular_velocity);

        Quaternion {
            data: transition * self.initial_quaternion.data,
        }
        .normalize()
    }

    pub(crate) fn compute(
        &self,
        ctx: &LawContext,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        let q = self.propagate((epoch - ctx.epoch).to_seconds())?;
        Ok((q.to_cosine_matrix()?, self.angular_velocity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attitude::constant_spin::ConstantSpin;
    use crate::constants::PI;
    use crate::coordinates::reference_frame::InertialFrame;
    use crate::numerics::quaternion::compute_quaternion_derivative;
    use approx::assert_abs_diff_eq;
    use hifitime::Duration;

    fn epoch() -> Epoch {
        Epoch::from_gregorian_utc(2024, 3, 15, 0, 0, 0, 0)
    }

    fn spinning(w: na::Vector3<f64>) -> Baseline {
        Baseline {
            cosine_matrix: na::Matrix3::identity(),
            angular_velocity: w,
        }
    }

    #[test]
    fn half_turn_about_z() {
        let ctx = LawContext { epoch: epoch(), frame: &InertialFrame };
        let mut law = QuaternionPropagator::new();
        law.initialize(&ctx, &spinning(na::Vector3::new(0.0, 0.0, PI / 2.0))).unwrap();

        let q = law.propagate(2.0).unwrap();
        assert_abs_diff_eq!(q.data, na::Vector4::new(0.0, 0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_rate_is_identity_step() {
        let ctx = LawContext { epoch: epoch(), frame: &InertialFrame };
        let mut law = QuaternionPropagator::new();
        law.initialize(&ctx, &spinning(na::Vector3::zeros())).unwrap();
        assert_eq!(law.propagate(1.0e6).unwrap(), Quaternion::identity());
    }

    #[test]
    fn agrees_with_constant_spin() {
        let ctx = LawContext { epoch: epoch(), frame: &InertialFrame };
        let baseline = Baseline {
            cosine_matrix: crate::numerics::rotation::euler_axis_angle_to_dcm(&na::Vector3::x(), 0.7),
            angular_velocity: na::Vector3::new(0.05, -0.02, 0.11),
        };

        let mut propagator = QuaternionPropagator::new();
        propagator.initialize(&ctx, &baseline).unwrap();
        let mut spin = ConstantSpin::new();
        spin.initialize(&ctx, &baseline).unwrap();

        let t = epoch() + Duration::from_seconds(37.5);
        let (dcm_q, _) = propagator.compute(&ctx, t).unwrap();
        let (dcm_s, _) = spin.compute(&ctx, t).unwrap();
        assert_abs_diff_eq!(dcm_q, dcm_s, epsilon = 1e-12);
    }

    #[test]
    fn satisfies_kinematic_equation() {
        let ctx = LawContext { epoch: epoch(), frame: &InertialFrame };
        let w = na::Vector3::new(0.3, 0.1, -0.2);
        let mut law = QuaternionPropagator::new();
        law.initialize(&ctx, &spinning(w)).unwrap();

        let h = 1e-5;
        let q = law.propagate(1.0).unwrap();
        let numeric = (law.propagate(1.0 + h).unwrap().data - law.propagate(1.0 - h).unwrap().data) / (2.0 * h);
        assert_abs_diff_eq!(numeric, compute_quaternion_derivative(&q, &w).data, epsilon = 1e-9);
    }
}
