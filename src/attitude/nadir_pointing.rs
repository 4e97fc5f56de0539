use super::LawContext;
use crate::constants::DEGENERATE_VECTOR_TOLERANCE;
use crate::errors::AttitudeError;
use crate::numerics::rotation::triad;
use crate::physics::orbital::StateProvider;
use hifitime::Epoch;
use nalgebra as na;
use serde::Deserialize;

/// Secondary reference direction used to fix the rotation about nadir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ConstraintMode {
    #[default]
    OrbitNormal,
    Velocity,
}

/// Points a body axis at the central body and a second body axis as close
/// as possible to the orbit normal or the velocity.
#[derive(Debug)]
pub struct NadirPointing {
    pub body_alignment: na::Vector3<f64>,
    pub body_constraint: na::Vector3<f64>,
    pub mode: ConstraintMode,
    target: Box<dyn StateProvider>,
}

impl NadirPointing {
    /// `target` supplies the spacecraft state relative to the central body.
    pub fn new(target: Box<dyn StateProvider>) -> Self {
        NadirPointing {
            body_alignment: na::Vector3::z(),
            body_constraint: na::Vector3::y(),
            mode: ConstraintMode::default(),
            target,
        }
    }

    pub fn set_target(&mut self, target: Box<dyn StateProvider>) {
        self.target = target;
    }

    pub(crate) fn validate(&self) -> Result<(), AttitudeError> {
        check_magnitude("body alignment vector", &self.body_alignment)?;
        check_magnitude("body constraint vector", &self.body_constraint)?;
        check_not_parallel(
            "body alignment and constraint vectors",
            &self.body_alignment,
            &self.body_constraint,
        )
    }

    /// Rotation from inertial to the local orbit frame: x radial, z along the
    /// orbit angular momentum, y completing the triad (along track).
    fn local_orbit_frame(
        position: &na::Vector3<f64>,
        velocity: &na::Vector3<f64>,
    ) -> Result<na::Matrix3<f64>, AttitudeError> {
        check_magnitude("position", position)?;
        check_magnitude("velocity", velocity)?;
        check_not_parallel("position and velocity", position, velocity)?;

        let x = position.normalize();
        let z = position.cross(velocity).normalize();
        let y = z.cross(&x);
        Ok(na::Matrix3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]))
    }

    pub(crate) fn compute(
        &self,
        _ctx: &LawContext,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        let (position, velocity) = self.target.state_at(epoch)?;
        let inertial_to_orbit = Self::local_orbit_frame(&position, &velocity)?;

        let nadir = -na::Vector3::x();
        let constraint = match self.mode {
            ConstraintMode::OrbitNormal => na::Vector3::z(),
            ConstraintMode::Velocity => inertial_to_orbit * velocity.normalize(),
        };
        check_not_parallel("nadir and constraint directions", &nadir, &constraint)?;

        let orbit_to_body = triad(&nadir, &constraint, &self.body_alignment, &self.body_constraint);
        Ok((orbit_to_body * inertial_to_orbit, na::Vector3::zeros()))
    }
}

fn check_magnitude(label: &str, v: &na::Vector3<f64>) -> Result<(), AttitudeError> {
    if v.norm() < DEGENERATE_VECTOR_TOLERANCE {
        return Err(AttitudeError::DegenerateVector(format!(
            "{} magnitude {:e} is below {:e}",
            label,
            v.norm(),
            DEGENERATE_VECTOR_TOLERANCE
        )));
    }
    Ok(())
}

fn check_not_parallel(
    label: &str,
    a: &na::Vector3<f64>,
    b: &na::Vector3<f64>,
) -> Result<(), AttitudeError> {
    if a.normalize().cross(&b.normalize()).norm() < DEGENERATE_VECTOR_TOLERANCE {
        return Err(AttitudeError::DegenerateVector(format!(
            "{} are parallel",
            label
        )));
    }
    Ok(())
}
