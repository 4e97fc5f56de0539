use crate::attitude::{
    Attitude, ConstantSpin, ConstraintMode, FrameFixed, Kinematics, NadirPointing,
    PrecessingSpin, QuaternionPropagator,
};
use crate::coordinates::reference_frame::{InertialFrame, ReferenceFrame, RotatingFrame};
use crate::errors::AttitudeError;
use crate::physics::orbital::{FixedState, KeplerOrbit, StateProvider};
use hifitime::{Duration, Epoch};
use nalgebra as na;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid epoch \"{0}\": {1}")]
    Epoch(String, String),

    #[error("Invalid propagation settings: {0}")]
    Propagation(String),

    #[error(transparent)]
    Attitude(#[from] AttitudeError),
}

/// An attitude model described in TOML. Angles are degrees, rates deg/s.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AttitudeConfig {
    /// e.g. "2024-03-15T00:00:00 UTC"
    pub epoch: String,
    #[serde(default)]
    pub reference_frame: FrameConfig,
    #[serde(default = "default_sequence")]
    pub euler_sequence: String,
    pub model: ModelConfig,
    pub initial: Option<InitialAttitude>,
    pub rate: Option<InitialRate>,
    #[serde(default)]
    pub propagation: PropagationConfig,
}

fn default_sequence() -> String {
    "312".to_string()
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
pub enum FrameConfig {
    #[default]
    Inertial,
    EarthFixed,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ModelConfig {
    FrameFixed,
    ConstantSpin,
    QuaternionPropagator,
    PrecessingSpin(PrecessingSpinConfig),
    NadirPointing(NadirPointingConfig),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PrecessingSpinConfig {
    pub nutation_reference: [f64; 3],
    pub spin_axis: [f64; 3],
    pub initial_precession_deg: f64,
    pub precession_rate_deg: f64,
    pub nutation_deg: f64,
    pub initial_spin_deg: f64,
    pub spin_rate_deg: f64,
}

impl Default for PrecessingSpinConfig {
    fn default() -> Self {
        PrecessingSpinConfig {
            nutation_reference: [0.0, 0.0, 1.0],
            spin_axis: [0.0, 0.0, 1.0],
            initial_precession_deg: 0.0,
            precession_rate_deg: 1.0,
            nutation_deg: 15.0,
            initial_spin_deg: 0.0,
            spin_rate_deg: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NadirPointingConfig {
    #[serde(default = "default_alignment")]
    pub body_alignment: [f64; 3],
    #[serde(default = "default_constraint")]
    pub body_constraint: [f64; 3],
    #[serde(default)]
    pub mode: ConstraintMode,
    pub target: TargetConfig,
}

fn default_alignment() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

fn default_constraint() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

/// Spacecraft state relative to the central body.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum TargetConfig {
    Fixed {
        position: [f64; 3],
        velocity: [f64; 3],
    },
    /// Two-body orbit about the Earth; meters and degrees, elements valid at the model epoch.
    Kepler {
        semi_major_axis: f64,
        eccentricity: f64,
        inclination_deg: f64,
        raan_deg: f64,
        arg_periapsis_deg: f64,
        true_anomaly_deg: f64,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InitialAttitude {
    Quaternion { values: Vec<f64> },
    /// Row-major.
    DirectionCosineMatrix { values: Vec<f64> },
    EulerAngles { values_deg: Vec<f64> },
    ModifiedRodrigues { values: Vec<f64> },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum InitialRate {
    AngularVelocity { values_deg: Vec<f64> },
    EulerAngleRates { values_deg: Vec<f64> },
}

/// Upper bound on the number of epochs a propagation span may produce.
pub const MAX_PROPAGATION_STEPS: usize = 10_000_000;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PropagationConfig {
    pub duration: f64, // s
    pub step: f64,     // s
}

impl Default for PropagationConfig {
    fn default() -> Self {
        PropagationConfig {
            duration: 600.0,
            step: 10.0,
        }
    }
}

impl PropagationConfig {
    /// Output epochs from `start` through `start + duration`, inclusive.
    pub fn epochs(&self, start: Epoch) -> Result<Vec<Epoch>, ConfigError> {
        if !(self.step > 0.0) || !self.step.is_finite() {
            return Err(ConfigError::Propagation(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        if !(self.duration >= 0.0) || !self.duration.is_finite() {
            return Err(ConfigError::Propagation(format!(
                "duration must not be negative, got {}",
                self.duration
            )));
        }

        let ratio = self.duration / self.step + 1e-9;
        if !ratio.is_finite() || ratio >= MAX_PROPAGATION_STEPS as f64 {
            return Err(ConfigError::Propagation(format!(
                "{} s in steps of {} s exceeds {} output epochs",
                self.duration, self.step, MAX_PROPAGATION_STEPS
            )));
        }

        let steps = ratio.floor() as usize;
        Ok((0..=steps)
            .map(|i| start + Duration::from_seconds(i as f64 * self.step))
            .collect())
    }
}

impl AttitudeConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn epoch(&self) -> Result<Epoch, ConfigError> {
        self.epoch
            .parse::<Epoch>()
            .map_err(|e| ConfigError::Epoch(self.epoch.clone(), format!("{:?}", e)))
    }

    fn reference_frame(&self, epoch: Epoch) -> Box<dyn ReferenceFrame> {
        match self.reference_frame {
            FrameConfig::Inertial => Box::new(InertialFrame),
            FrameConfig::EarthFixed => Box::new(RotatingFrame::earth_fixed(epoch)),
        }
    }

    fn kinematics(&self, epoch: Epoch) -> Result<Kinematics, ConfigError> {
        let kinematics = match &self.model {
            ModelConfig::FrameFixed => FrameFixed::new().into(),
            ModelConfig::ConstantSpin => ConstantSpin::new().into(),
            ModelConfig::QuaternionPropagator => QuaternionPropagator::new().into(),
            ModelConfig::PrecessingSpin(cfg) => {
                let mut law = PrecessingSpin::new();
                law.nutation_reference = na::Vector3::from(cfg.nutation_reference);
                law.spin_axis = na::Vector3::from(cfg.spin_axis);
                law.initial_precession = cfg.initial_precession_deg.to_radians();
                law.precession_rate = cfg.precession_rate_deg.to_radians();
                law.nutation = cfg.nutation_deg.to_radians();
                law.initial_spin = cfg.initial_spin_deg.to_radians();
                law.spin_rate = cfg.spin_rate_deg.to_radians();
                law.into()
            }
            ModelConfig::NadirPointing(cfg) => {
                let mut law = NadirPointing::new(cfg.target.provider(epoch)?);
                law.body_alignment = na::Vector3::from(cfg.body_alignment);
                law.body_constraint = na::Vector3::from(cfg.body_constraint);
                law.mode = cfg.mode;
                law.into()
            }
        };
        Ok(kinematics)
    }

    /// Builds the model and applies the initial attitude and rate.
    pub fn build(&self) -> Result<Attitude, ConfigError> {
        let epoch = self.epoch()?;
        let mut attitude = Attitude::new(self.kinematics(epoch)?, epoch)
            .with_reference_frame(self.reference_frame(epoch));
        attitude.set_euler_sequence(&self.euler_sequence)?;

        match &self.initial {
            Some(InitialAttitude::Quaternion { values }) => attitude.set_quaternion(values)?,
            Some(InitialAttitude::DirectionCosineMatrix { values }) => {
                attitude.set_cosine_matrix(values)?
            }
            Some(InitialAttitude::EulerAngles { values_deg }) => {
                attitude.set_euler_angles_deg(values_deg)?
            }
            Some(InitialAttitude::ModifiedRodrigues { values }) => attitude.set_mrp(values)?,
            None => {}
        }

        match &self.rate {
            Some(InitialRate::AngularVelocity { values_deg }) => {
                attitude.set_angular_velocity_deg(values_deg)?
            }
            Some(InitialRate::EulerAngleRates { values_deg }) => {
                attitude.set_euler_angle_rates_deg(values_deg)?
            }
            None => {}
        }

        Ok(attitude)
    }
}

impl TargetConfig {
    fn provider(&self, epoch: Epoch) -> Result<Box<dyn StateProvider>, AttitudeError> {
        match self {
            TargetConfig::Fixed { position, velocity } => Ok(Box::new(FixedState::new(
                na::Vector3::from(*position),
                na::Vector3::from(*velocity),
            ))),
            TargetConfig::Kepler {
                semi_major_axis,
                eccentricity,
                inclination_deg,
                raan_deg,
                arg_periapsis_deg,
                true_anomaly_deg,
            } => {
                let elements = na::Vector6::new(
                    *semi_major_axis,
                    *eccentricity,
                    inclination_deg.to_radians(),
                    raan_deg.to_radians(),
                    arg_periapsis_deg.to_radians(),
                    true_anomaly_deg.to_radians(),
                );
                Ok(Box::new(KeplerOrbit::new(elements, epoch)?))
            }
        }
    }
}
