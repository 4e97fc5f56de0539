//! Attitude models: an [`AttitudeState`] plus a kinematic law evaluated at
//! arbitrary epochs.
//!
//! Inputs are set in degrees and deg/s, read back in either unit. The model
//! re-initializes itself on the first evaluation after any change.

pub mod constant_spin;
pub mod frame_fixed;
pub mod nadir_pointing;
pub mod precessing_spin;
pub mod quaternion_propagator;

use crate::constants::ATTITUDE_TIME_TOLERANCE;
use crate::coordinates::reference_frame::{InertialFrame, ReferenceFrame};
use crate::errors::AttitudeError;
use crate::fsm::model_phases::ModelPhase;
use crate::fsm::state_machine::ModelStateMachine;
use crate::models::state::AttitudeState;
use crate::numerics::euler::{angular_velocity_to_euler_rates, dcm_to_euler_angles, EulerSequence};
use crate::numerics::quaternion::Quaternion;
use crate::numerics::rotation::{dcm_to_quaternion, quaternion_to_mrp};
use hifitime::Epoch;
use nalgebra as na;
use std::fmt;
use tracing::{debug, trace};

pub use constant_spin::ConstantSpin;
pub use frame_fixed::FrameFixed;
pub use nadir_pointing::{ConstraintMode, NadirPointing};
pub use precessing_spin::PrecessingSpin;
pub use quaternion_propagator::QuaternionPropagator;

/// Anything that can produce an inertial-to-body cosine matrix and a body
/// angular velocity (rad/s) at an epoch, whether by law or by table lookup.
pub trait AttitudeProvider {
    fn evaluate(
        &mut self,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError>;
}

/// Conditions worth reporting once per initialization. They do not stop
/// the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    NutationAngleNearZero { nutation: f64 },
    AntiParallelAlignment { alignment: &'static str },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Notice::NutationAngleNearZero { nutation } => write!(
                f,
                "nutation angle {} deg is near zero; precession and spin are not distinguishable",
                nutation.to_degrees()
            ),
            Notice::AntiParallelAlignment { alignment } => write!(
                f,
                "{} are anti-parallel; the identity is used and the alignment is approximate",
                alignment
            ),
        }
    }
}

/// Shared inputs of every law: the model epoch and its reference frame.
pub(crate) struct LawContext<'a> {
    pub epoch: Epoch,
    pub frame: &'a dyn ReferenceFrame,
}

/// Attitude (relative to the reference frame) and body rate at the model epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Baseline {
    pub cosine_matrix: na::Matrix3<f64>,
    pub angular_velocity: na::Vector3<f64>,
}

/// The kinematic law of a model.
#[derive(Debug)]
pub enum Kinematics {
    FrameFixed(FrameFixed),
    ConstantSpin(ConstantSpin),
    PrecessingSpin(PrecessingSpin),
    NadirPointing(NadirPointing),
    QuaternionPropagator(QuaternionPropagator),
}

impl Kinematics {
    pub fn name(&self) -> &'static str {
        match self {
            Kinematics::FrameFixed(_) => "FrameFixed",
            Kinematics::ConstantSpin(_) => "ConstantSpin",
            Kinematics::PrecessingSpin(_) => "PrecessingSpin",
            Kinematics::NadirPointing(_) => "NadirPointing",
            Kinematics::QuaternionPropagator(_) => "QuaternionPropagator",
        }
    }

    fn validate(&self) -> Result<(), AttitudeError> {
        match self {
            Kinematics::PrecessingSpin(law) => law.validate(),
            Kinematics::NadirPointing(law) => law.validate(),
            _ => Ok(()),
        }
    }

    fn initialize(
        &mut self,
        ctx: &LawContext,
        baseline: &Baseline,
    ) -> Result<Vec<Notice>, AttitudeError> {
        match self {
            Kinematics::ConstantSpin(law) => law.initialize(ctx, baseline)?,
            Kinematics::QuaternionPropagator(law) => law.initialize(ctx, baseline)?,
            Kinematics::PrecessingSpin(law) => return law.initialize(ctx),
            Kinematics::FrameFixed(_) | Kinematics::NadirPointing(_) => {}
        }
        Ok(Vec::new())
    }

    fn compute(
        &self,
        ctx: &LawContext,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        match self {
            Kinematics::FrameFixed(law) => law.compute(ctx, epoch),
            Kinematics::ConstantSpin(law) => law.compute(ctx, epoch),
            Kinematics::PrecessingSpin(law) => law.compute(ctx, epoch),
            Kinematics::NadirPointing(law) => law.compute(ctx, epoch),
            Kinematics::QuaternionPropagator(law) => law.compute(ctx, epoch),
        }
    }
}

impl From<FrameFixed> for Kinematics {
    fn from(law: FrameFixed) -> Self {
        Kinematics::FrameFixed(law)
    }
}

impl From<ConstantSpin> for Kinematics {
    fn from(law: ConstantSpin) -> Self {
        Kinematics::ConstantSpin(law)
    }
}

impl From<PrecessingSpin> for Kinematics {
    fn from(law: PrecessingSpin) -> Self {
        Kinematics::PrecessingSpin(law)
    }
}

impl From<NadirPointing> for Kinematics {
    fn from(law: NadirPointing) -> Self {
        Kinematics::NadirPointing(law)
    }
}

impl From<QuaternionPropagator> for Kinematics {
    fn from(law: QuaternionPropagator) -> Self {
        Kinematics::QuaternionPropagator(law)
    }
}

/// Result of the last evaluation, with representations derived from it on demand.
#[derive(Debug, Clone)]
struct Evaluation {
    epoch: Epoch,
    cosine_matrix: na::Matrix3<f64>,
    angular_velocity: na::Vector3<f64>,
    quaternion: Option<Quaternion>,
    euler_angles: Option<(EulerSequence, na::Vector3<f64>)>,
    euler_angle_rates: Option<(EulerSequence, na::Vector3<f64>)>,
}

/// An attitude model: initial state at an epoch, a reference frame and a law.
#[derive(Debug)]
pub struct Attitude {
    state: AttitudeState,
    kinematics: Kinematics,
    epoch: Epoch,
    reference_frame: Box<dyn ReferenceFrame>,
    fsm: ModelStateMachine,
    notices: Vec<Notice>,
    last: Option<Evaluation>,
}

impl Attitude {
    /// Identity attitude at rest in the inertial frame.
    pub fn new(kinematics: impl Into<Kinematics>, epoch: Epoch) -> Self {
        let kinematics = kinematics.into();
        Attitude {
            state: AttitudeState::new(),
            fsm: ModelStateMachine::new(kinematics.name()),
            kinematics,
            epoch,
            reference_frame: Box::new(InertialFrame),
            notices: Vec::new(),
            last: None,
        }
    }

    pub fn with_reference_frame(mut self, frame: Box<dyn ReferenceFrame>) -> Self {
        self.set_reference_frame(frame);
        self
    }

    pub fn model_name(&self) -> &'static str {
        self.kinematics.name()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn reference_frame(&self) -> &dyn ReferenceFrame {
        self.reference_frame.as_ref()
    }

    pub fn phase(&self) -> ModelPhase {
        match self.fsm.current_phase() {
            ModelPhase::Ready if self.state.is_stale() => ModelPhase::Stale,
            phase => phase,
        }
    }

    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    /// Law parameters; any access through here forces a re-initialization.
    pub fn kinematics_mut(&mut self) -> &mut Kinematics {
        self.invalidate();
        &mut self.kinematics
    }

    /// Radian-level access to the initial state; its setters mark the model stale.
    pub fn state_mut(&mut self) -> &mut AttitudeState {
        &mut self.state
    }

    /// Notices raised by initializations since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn invalidate(&mut self) {
        self.state.mark_stale();
        self.fsm.invalidate();
        self.last = None;
    }

    pub fn validate(&mut self) -> Result<(), AttitudeError> {
        self.state.validate()?;
        self.kinematics.validate()?;
        self.fsm.validated();
        Ok(())
    }

    /// Validates, derives the baseline at the epoch and runs the law's
    /// precomputation. Returns the notices raised on the way.
    pub fn initialize(&mut self) -> Result<Vec<Notice>, AttitudeError> {
        self.validate()?;
        let (cosine_matrix, angular_velocity) = self.state.baseline()?;
        let baseline = Baseline {
            cosine_matrix,
            angular_velocity,
        };

        let ctx = LawContext {
            epoch: self.epoch,
            frame: self.reference_frame.as_ref(),
        };
        let notices = self.kinematics.initialize(&ctx, &baseline)?;

        self.last = None;
        self.fsm.initialized();
        debug!(
            model = self.kinematics.name(),
            frame = self.reference_frame.name(),
            epoch = %self.epoch,
            notices = notices.len(),
            "attitude model initialized"
        );
        self.notices.extend(notices.iter().cloned());
        Ok(notices)
    }

    fn ensure_initialized(&mut self) -> Result<(), AttitudeError> {
        if self.state.is_stale() || self.fsm.needs_initialize() {
            self.initialize()?;
        }
        Ok(())
    }

    /// Cosine matrix (inertial to body) and body angular velocity (rad/s) at `epoch`.
    pub fn evaluate(
        &mut self,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        self.evaluation(epoch)
            .map(|e| (e.cosine_matrix, e.angular_velocity))
    }

    fn evaluation(&mut self, epoch: Epoch) -> Result<&mut Evaluation, AttitudeError> {
        self.ensure_initialized()?;

        let cached = self.last.as_ref().map_or(false, |last| {
            (epoch - last.epoch).to_seconds().abs() <= ATTITUDE_TIME_TOLERANCE
        });
        if cached {
            trace!(model = self.kinematics.name(), %epoch, "attitude cache hit");
        } else {
            let ctx = LawContext {
                epoch: self.epoch,
                frame: self.reference_frame.as_ref(),
            };
            let (cosine_matrix, angular_velocity) = self.kinematics.compute(&ctx, epoch)?;
            self.last = Some(Evaluation {
                epoch,
                cosine_matrix,
                angular_velocity,
                quaternion: None,
                euler_angles: None,
                euler_angle_rates: None,
            });
        }

        self.last
            .as_mut()
            .ok_or_else(|| AttitudeError::Frame("attitude evaluation is missing".to_string()))
    }

    pub fn cosine_matrix(&mut self, epoch: Epoch) -> Result<na::Matrix3<f64>, AttitudeError> {
        Ok(self.evaluation(epoch)?.cosine_matrix)
    }

    pub fn quaternion(&mut self, epoch: Epoch) -> Result<Quaternion, AttitudeError> {
        let evaluation = self.evaluation(epoch)?;
        if let Some(q) = evaluation.quaternion {
            return Ok(q);
        }
        let q = dcm_to_quaternion(&evaluation.cosine_matrix)?;
        evaluation.quaternion = Some(q);
        Ok(q)
    }

    pub fn mrp(&mut self, epoch: Epoch) -> Result<na::Vector3<f64>, AttitudeError> {
        let q = self.quaternion(epoch)?;
        quaternion_to_mrp(&q)
    }

    /// Euler angles (rad) in the state's current sequence.
    pub fn euler_angles(&mut self, epoch: Epoch) -> Result<na::Vector3<f64>, AttitudeError> {
        let seq = self.state.euler_sequence();
        self.euler_angles_with(epoch, seq)
    }

    pub fn euler_angles_with(
        &mut self,
        epoch: Epoch,
        seq: EulerSequence,
    ) -> Result<na::Vector3<f64>, AttitudeError> {
        let evaluation = self.evaluation(epoch)?;
        if let Some((cached_seq, angles)) = evaluation.euler_angles {
            if cached_seq == seq {
                return Ok(angles);
            }
        }
        let angles = dcm_to_euler_angles(&evaluation.cosine_matrix, seq);
        evaluation.euler_angles = Some((seq, angles));
        Ok(angles)
    }

    pub fn euler_angles_deg(&mut self, epoch: Epoch) -> Result<na::Vector3<f64>, AttitudeError> {
        Ok(self.euler_angles(epoch)?.map(f64::to_degrees))
    }

    pub fn angular_velocity(&mut self, epoch: Epoch) -> Result<na::Vector3<f64>, AttitudeError> {
        Ok(self.evaluation(epoch)?.angular_velocity)
    }

    pub fn angular_velocity_deg(&mut self, epoch: Epoch) -> Result<na::Vector3<f64>, AttitudeError> {
        Ok(self.angular_velocity(epoch)?.map(f64::to_degrees))
    }

    /// Euler angle rates (rad/s) in the state's current sequence; fails near
    /// the sequence singularity.
    pub fn euler_angle_rates(&mut self, epoch: Epoch) -> Result<na::Vector3<f64>, AttitudeError> {
        let seq = self.state.euler_sequence();
        let angles = self.euler_angles_with(epoch, seq)?;
        let evaluation = self.evaluation(epoch)?;
        if let Some((cached_seq, rates)) = evaluation.euler_angle_rates {
            if cached_seq == seq {
                return Ok(rates);
            }
        }
        let rates = angular_velocity_to_euler_rates(&evaluation.angular_velocity, &angles, seq)?;
        evaluation.euler_angle_rates = Some((seq, rates));
        Ok(rates)
    }

    pub fn euler_angle_rates_deg(&mut self, epoch: Epoch) -> Result<na::Vector3<f64>, AttitudeError> {
        Ok(self.euler_angle_rates(epoch)?.map(f64::to_degrees))
    }

    // Setters take degrees and deg/s and leave the model stale

    pub fn set_quaternion(&mut self, values: &[f64]) -> Result<(), AttitudeError> {
        let q = Quaternion::from_slice(values)?;
        self.state.set_quaternion(&q)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_quaternion_component(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        self.state.set_quaternion_component(index, value)?;
        self.invalidate();
        Ok(())
    }

    /// Nine elements in row-major order.
    pub fn set_cosine_matrix(&mut self, values: &[f64]) -> Result<(), AttitudeError> {
        check_len("cosine matrix", values, 9)?;
        self.state
            .set_cosine_matrix(&na::Matrix3::from_row_slice(values))?;
        self.invalidate();
        Ok(())
    }

    pub fn set_cosine_matrix_element(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
    ) -> Result<(), AttitudeError> {
        self.state.set_cosine_matrix_element(row, col, value)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_euler_angles_deg(&mut self, values: &[f64]) -> Result<(), AttitudeError> {
        let angles = vector3("Euler angles", values)?.map(f64::to_radians);
        self.state.set_euler_angles(&angles)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_euler_angle_deg(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        self.state.set_euler_angle(index, value.to_radians())?;
        self.invalidate();
        Ok(())
    }

    /// Accepts "321" or "3-2-1". The attitude itself is preserved.
    pub fn set_euler_sequence(&mut self, seq: &str) -> Result<(), AttitudeError> {
        let seq: EulerSequence = seq.parse()?;
        self.state.set_euler_sequence(seq)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_mrp(&mut self, values: &[f64]) -> Result<(), AttitudeError> {
        let mrp = vector3("modified Rodrigues parameters", values)?;
        self.state.set_mrp(&mrp)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_mrp_component(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        self.state.set_mrp_component(index, value)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_angular_velocity_deg(&mut self, values: &[f64]) -> Result<(), AttitudeError> {
        let w = vector3("angular velocity", values)?.map(f64::to_radians);
        self.state.set_angular_velocity(&w)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_angular_velocity_component_deg(
        &mut self,
        index: usize,
        value: f64,
    ) -> Result<(), AttitudeError> {
        self.state
            .set_angular_velocity_component(index, value.to_radians())?;
        self.invalidate();
        Ok(())
    }

    pub fn set_euler_angle_rates_deg(&mut self, values: &[f64]) -> Result<(), AttitudeError> {
        let rates = vector3("Euler angle rates", values)?.map(f64::to_radians);
        self.state.set_euler_angle_rates(&rates)?;
        self.invalidate();
        Ok(())
    }

    pub fn set_euler_angle_rate_deg(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        self.state.set_euler_angle_rate(index, value.to_radians())?;
        self.invalidate();
        Ok(())
    }

    pub fn set_epoch(&mut self, epoch: Epoch) {
        self.epoch = epoch;
        self.invalidate();
    }

    pub fn set_reference_frame(&mut self, frame: Box<dyn ReferenceFrame>) {
        self.reference_frame = frame;
        self.invalidate();
    }
}

impl AttitudeProvider for Attitude {
    fn evaluate(
        &mut self,
        epoch: Epoch,
    ) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        Attitude::evaluate(self, epoch)
    }
}

fn check_len(what: &'static str, values: &[f64], expected: usize) -> Result<(), AttitudeError> {
    if values.len() != expected {
        return Err(AttitudeError::Size {
            what,
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

fn vector3(what: &'static str, values: &[f64]) -> Result<na::Vector3<f64>, AttitudeError> {
    check_len(what, values, 3)?;
    Ok(na::Vector3::from_column_slice(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PI;
    use crate::coordinates::reference_frame::RotatingFrame;
    use crate::physics::orbital::FixedState;
    use approx::assert_abs_diff_eq;
    use hifitime::Duration;

    fn epoch() -> Epoch {
        Epoch::from_gregorian_utc(2024, 3, 15, 0, 0, 0, 0)
    }

    #[test]
    fn identity_quaternion_reads_back_as_identity() {
        let mut attitude = Attitude::new(ConstantSpin::new(), epoch());
        attitude.set_quaternion(&[0.0, 0.0, 0.0, 1.0]).unwrap();

        assert_eq!(attitude.cosine_matrix(epoch()).unwrap(), na::Matrix3::identity());
        let angles = attitude.euler_angles_with(epoch(), EulerSequence::Seq321).unwrap();
        assert_abs_diff_eq!(angles, na::Vector3::zeros(), epsilon = 1e-15);
    }

    #[test]
    fn zero_mrp_reads_back_as_identity() {
        let mut attitude = Attitude::new(QuaternionPropagator::new(), epoch());
        attitude.set_mrp(&[0.0, 0.0, 0.0]).unwrap();

        let q = attitude.quaternion(epoch()).unwrap();
        assert_abs_diff_eq!(q.data, Quaternion::identity().data, epsilon = 1e-15);
        assert_abs_diff_eq!(attitude.cosine_matrix(epoch()).unwrap(), na::Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn constant_spin_half_turn() {
        let mut attitude = Attitude::new(ConstantSpin::new(), epoch());
        attitude.set_angular_velocity_deg(&[0.0, 0.0, 90.0]).unwrap();

        let t = epoch() + Duration::from_seconds(2.0);
        let dcm = attitude.cosine_matrix(t).unwrap();
        let expected = na::Matrix3::new(-1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0);
        assert_abs_diff_eq!(dcm, expected, epsilon = 1e-12);

        let q = attitude.quaternion(t).unwrap();
        assert_abs_diff_eq!(q.data[2].abs(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(attitude.angular_velocity_deg(t).unwrap(), na::Vector3::new(0.0, 0.0, 90.0), epsilon = 1e-12);
    }

    #[test]
    fn setters_mark_stale_and_reinitialize() {
        let mut attitude = Attitude::new(ConstantSpin::new(), epoch());
        assert_eq!(attitude.phase(), ModelPhase::Uninitialized);

        attitude.evaluate(epoch()).unwrap();
        assert_eq!(attitude.phase(), ModelPhase::Ready);

        attitude.set_euler_angles_deg(&[10.0, 20.0, 30.0]).unwrap();
        assert_eq!(attitude.phase(), ModelPhase::Stale);

        let dcm = attitude.cosine_matrix(epoch()).unwrap();
        assert_eq!(attitude.phase(), ModelPhase::Ready);
        let angles = attitude.euler_angles_deg(epoch()).unwrap();
        assert_abs_diff_eq!(angles, na::Vector3::new(10.0, 20.0, 30.0), epsilon = 1e-10);
        assert_abs_diff_eq!(dcm * dcm.transpose(), na::Matrix3::identity(), epsilon = 1e-12);
    }

    #[test]
    fn radian_state_access_is_tracked() {
        let mut attitude = Attitude::new(ConstantSpin::new(), epoch());
        attitude.evaluate(epoch()).unwrap();

        attitude
            .state_mut()
            .set_angular_velocity(&na::Vector3::new(0.0, 0.0, PI / 2.0))
            .unwrap();
        assert_eq!(attitude.phase(), ModelPhase::Stale);

        let dcm = attitude.cosine_matrix(epoch() + Duration::from_seconds(1.0)).unwrap();
        assert_abs_diff_eq!(dcm[(0, 1)], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn evaluation_is_cached_within_tolerance() {
        let mut attitude = Attitude::new(ConstantSpin::new(), epoch());
        attitude.set_angular_velocity_deg(&[1.0, 2.0, 3.0]).unwrap();

        let t = epoch() + Duration::from_seconds(60.0);
        let first = attitude.quaternion(t).unwrap();
        let nearby = attitude.quaternion(t + Duration::from_seconds(1e-6)).unwrap();
        assert_eq!(first, nearby);

        let later = attitude.quaternion(t + Duration::from_seconds(1.0)).unwrap();
        assert_ne!(first, later);
    }

    #[test]
    fn wrong_sized_inputs_are_rejected() {
        let mut attitude = Attitude::new(FrameFixed::new(), epoch());
        assert_eq!(
            attitude.set_quaternion(&[0.0, 0.0, 1.0]),
            Err(AttitudeError::Size { what: "quaternion", expected: 4, actual: 3 })
        );
        assert!(matches!(
            attitude.set_cosine_matrix(&[1.0; 8]),
            Err(AttitudeError::Size { expected: 9, .. })
        ));
        assert!(matches!(
            attitude.set_euler_sequence("3-3-1"),
            Err(AttitudeError::Sequence(_))
        ));
    }

    #[test]
    fn non_finite_inputs_never_reach_the_law() {
        let mut attitude = Attitude::new(ConstantSpin::new(), epoch());
        attitude.set_euler_angles_deg(&[5.0, 10.0, 20.0]).unwrap();
        attitude.set_angular_velocity_deg(&[0.0, 1.0, 0.0]).unwrap();

        assert_eq!(
            attitude.set_euler_angles_deg(&[f64::NAN, 10.0, 20.0]),
            Err(AttitudeError::NonFinite("Euler angles"))
        );
        assert_eq!(
            attitude.set_angular_velocity_deg(&[0.0, f64::INFINITY, 0.0]),
            Err(AttitudeError::NonFinite("angular velocity"))
        );
        assert_eq!(
            attitude.set_euler_angle_rates_deg(&[f64::NAN, 0.0, 0.0]),
            Err(AttitudeError::NonFinite("Euler angle rates"))
        );

        attitude.validate().unwrap();
        let dcm = attitude.cosine_matrix(epoch() + Duration::from_seconds(3.0)).unwrap();
        assert_abs_diff_eq!(dcm * dcm.transpose(), na::Matrix3::identity(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            attitude.euler_angles_deg(epoch()).unwrap(),
            na::Vector3::new(5.0, 10.0, 20.0),
            epsilon = 1e-10
        );
    }

    #[test]
    fn euler_rates_from_angular_velocity() {
        let mut attitude = Attitude::new(ConstantSpin::new(), epoch());
        attitude.set_euler_sequence("321").unwrap();
        attitude.set_euler_angles_deg(&[30.0, 20.0, 10.0]).unwrap();
        attitude.set_angular_velocity_deg(&[5.0, 5.0, 5.0]).unwrap();

        let rates = attitude.euler_angle_rates_deg(epoch()).unwrap();
        assert_abs_diff_eq!(
            rates,
            na::Vector3::new(6.16401525910817, 4.05579787672639, 7.10821738238178),
            epsilon = 1e-9
        );
    }

    #[test]
    fn frame_fixed_follows_earth() {
        let mut attitude = Attitude::new(FrameFixed::new(), epoch())
            .with_reference_frame(Box::new(RotatingFrame::earth_fixed(epoch())));
        let w = attitude.angular_velocity(epoch() + Duration::from_seconds(10.0)).unwrap();
        assert_abs_diff_eq!(w, na::Vector3::new(0.0, 0.0, crate::constants::EARTH_ANGULAR_VELOCITY), epsilon = 1e-15);
        assert_eq!(attitude.model_name(), "FrameFixed");
    }

    #[test]
    fn notices_are_collected_once_per_initialization() {
        let mut law = PrecessingSpin::new();
        law.nutation = 0.0;
        let mut attitude = Attitude::new(law, epoch());
        attitude.evaluate(epoch()).unwrap();
        attitude.evaluate(epoch() + Duration::from_seconds(5.0)).unwrap();

        let notices = attitude.take_notices();
        assert_eq!(notices.len(), 1);
        assert!(attitude.take_notices().is_empty());

        if let Kinematics::PrecessingSpin(law) = attitude.kinematics_mut() {
            law.nutation = 0.5;
        }
        attitude.evaluate(epoch()).unwrap();
        assert!(attitude.take_notices().is_empty());
    }

    #[test]
    fn nadir_pointing_through_the_model() {
        let target = FixedState::new(na::Vector3::new(7000.0, 0.0, 0.0), na::Vector3::new(0.0, 7.5, 0.0));
        let mut attitude = Attitude::new(NadirPointing::new(Box::new(target)), epoch());

        let dcm = attitude.cosine_matrix(epoch()).unwrap();
        assert_abs_diff_eq!(dcm.row(2).transpose(), na::Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_eq!(attitude.angular_velocity(epoch()).unwrap(), na::Vector3::zeros());
    }
}
