use crate::errors::AttitudeError;
use crate::numerics::euler::{
    angular_velocity_to_euler_rates, dcm_to_euler_angles, euler_angles_to_dcm,
    euler_rates_to_angular_velocity, EulerSequence,
};
use crate::numerics::quaternion::Quaternion;
use crate::numerics::rotation::{
    dcm_to_quaternion, mrp_to_quaternion, quaternion_to_dcm, quaternion_to_mrp,
    validate_cosine_matrix,
};
use nalgebra as na;

/// Which attitude representation was last written and is therefore authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttitudeRepresentation {
    Quaternion,
    DirectionCosineMatrix,
    EulerAngles,
    ModifiedRodrigues,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateRepresentation {
    AngularVelocity,
    EulerAngleRates,
}

impl AttitudeRepresentation {
    fn bit(self) -> u8 {
        match self {
            AttitudeRepresentation::Quaternion => 1 << 0,
            AttitudeRepresentation::DirectionCosineMatrix => 1 << 1,
            AttitudeRepresentation::EulerAngles => 1 << 2,
            AttitudeRepresentation::ModifiedRodrigues => 1 << 3,
        }
    }
}

impl RateRepresentation {
    fn bit(self) -> u8 {
        match self {
            RateRepresentation::AngularVelocity => 1 << 4,
            RateRepresentation::EulerAngleRates => 1 << 5,
        }
    }
}

const ATTITUDE_BITS: u8 = 0b0000_1111;

/// Attitude and rate of a spacecraft held in every supported representation.
///
/// One attitude and one rate representation are authoritative at a time; the
/// others are derived on demand and cached until the next write. All angles
/// are radians and all rates rad/s.
#[derive(Debug, Clone, PartialEq)]
pub struct AttitudeState {
    quaternion: Quaternion,
    cosine_matrix: na::Matrix3<f64>,
    euler_angles: na::Vector3<f64>,
    euler_sequence: EulerSequence,
    mrp: na::Vector3<f64>,
    angular_velocity: na::Vector3<f64>,
    euler_angle_rates: na::Vector3<f64>,

    attitude_input: AttitudeRepresentation,
    rate_input: RateRepresentation,
    synced: u8,
    stale: bool,
}

impl Default for AttitudeState {
    fn default() -> Self {
        Self::new()
    }
}

impl AttitudeState {
    /// Identity attitude at rest, Euler sequence 3-1-2.
    pub fn new() -> Self {
        AttitudeState {
            quaternion: Quaternion::identity(),
            cosine_matrix: na::Matrix3::identity(),
            euler_angles: na::Vector3::zeros(),
            euler_sequence: EulerSequence::default(),
            mrp: na::Vector3::zeros(),
            angular_velocity: na::Vector3::zeros(),
            euler_angle_rates: na::Vector3::zeros(),
            attitude_input: AttitudeRepresentation::Quaternion,
            rate_input: RateRepresentation::AngularVelocity,
            synced: AttitudeRepresentation::Quaternion.bit()
                | RateRepresentation::AngularVelocity.bit(),
            stale: true,
        }
    }

    pub fn attitude_input(&self) -> AttitudeRepresentation {
        self.attitude_input
    }

    pub fn rate_input(&self) -> RateRepresentation {
        self.rate_input
    }

    pub fn euler_sequence(&self) -> EulerSequence {
        self.euler_sequence
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    pub fn is_synchronized(&self, target: AttitudeRepresentation) -> bool {
        self.synced & target.bit() != 0
    }

    pub fn is_rate_synchronized(&self, target: RateRepresentation) -> bool {
        self.synced & target.bit() != 0
    }

    // Getters synchronize lazily

    pub fn quaternion(&mut self) -> Result<Quaternion, AttitudeError> {
        self.update_state(AttitudeRepresentation::Quaternion)?;
        Ok(self.quaternion)
    }

    pub fn cosine_matrix(&mut self) -> Result<na::Matrix3<f64>, AttitudeError> {
        self.update_state(AttitudeRepresentation::DirectionCosineMatrix)?;
        Ok(self.cosine_matrix)
    }

    pub fn euler_angles(&mut self) -> Result<na::Vector3<f64>, AttitudeError> {
        self.update_state(AttitudeRepresentation::EulerAngles)?;
        Ok(self.euler_angles)
    }

    pub fn mrp(&mut self) -> Result<na::Vector3<f64>, AttitudeError> {
        self.update_state(AttitudeRepresentation::ModifiedRodrigues)?;
        Ok(self.mrp)
    }

    pub fn angular_velocity(&mut self) -> Result<na::Vector3<f64>, AttitudeError> {
        self.update_rate_state(RateRepresentation::AngularVelocity)?;
        Ok(self.angular_velocity)
    }

    pub fn euler_angle_rates(&mut self) -> Result<na::Vector3<f64>, AttitudeError> {
        self.update_rate_state(RateRepresentation::EulerAngleRates)?;
        Ok(self.euler_angle_rates)
    }

    /// Brings `target` in line with the authoritative attitude.
    ///
    /// Returns `false` when it was already synchronized. Conversions pass
    /// through the direction cosine matrix, which is cached along the way.
    pub fn update_state(&mut self, target: AttitudeRepresentation) -> Result<bool, AttitudeError> {
        if self.is_synchronized(target) {
            return Ok(false);
        }

        let dcm_bit = AttitudeRepresentation::DirectionCosineMatrix.bit();
        if self.synced & dcm_bit == 0 {
            self.cosine_matrix = match self.attitude_input {
                AttitudeRepresentation::Quaternion => quaternion_to_dcm(&self.quaternion)?,
                AttitudeRepresentation::EulerAngles => {
                    euler_angles_to_dcm(&self.euler_angles, self.euler_sequence)
                }
                AttitudeRepresentation::ModifiedRodrigues => {
                    self.quaternion = mrp_to_quaternion(&self.mrp)?;
                    self.synced |= AttitudeRepresentation::Quaternion.bit();
                    quaternion_to_dcm(&self.quaternion)?
                }
                // The authoritative representation is always synchronized
                AttitudeRepresentation::DirectionCosineMatrix => self.cosine_matrix,
            };
            self.synced |= dcm_bit;
        }

        match target {
            AttitudeRepresentation::Quaternion => {
                self.quaternion = dcm_to_quaternion(&self.cosine_matrix)?;
            }
            AttitudeRepresentation::EulerAngles => {
                self.euler_angles = dcm_to_euler_angles(&self.cosine_matrix, self.euler_sequence);
            }
            AttitudeRepresentation::ModifiedRodrigues => {
                self.update_state(AttitudeRepresentation::Quaternion)?;
                self.mrp = quaternion_to_mrp(&self.quaternion)?;
            }
            AttitudeRepresentation::DirectionCosineMatrix => {}
        }
        self.synced |= target.bit();
        Ok(true)
    }

    /// Brings `target` in line with the authoritative rate, converting
    /// through the synchronized Euler angles.
    pub fn update_rate_state(&mut self, target: RateRepresentation) -> Result<bool, AttitudeError> {
        if self.is_rate_synchronized(target) {
            return Ok(false);
        }

        self.update_state(AttitudeRepresentation::EulerAngles)?;
        match target {
            RateRepresentation::AngularVelocity => {
                self.angular_velocity = euler_rates_to_angular_velocity(
                    &self.euler_angle_rates,
                    &self.euler_angles,
                    self.euler_sequence,
                );
            }
            RateRepresentation::EulerAngleRates => {
                self.euler_angle_rates = angular_velocity_to_euler_rates(
                    &self.angular_velocity,
                    &self.euler_angles,
                    self.euler_sequence,
                )?;
            }
        }
        self.synced |= target.bit();
        Ok(true)
    }

    /// Checks the authoritative representations.
    pub fn validate(&mut self) -> Result<(), AttitudeError> {
        match self.attitude_input {
            AttitudeRepresentation::Quaternion => self.quaternion.check_magnitude()?,
            AttitudeRepresentation::DirectionCosineMatrix => {
                validate_cosine_matrix(&self.cosine_matrix)?
            }
            AttitudeRepresentation::EulerAngles => {
                check_finite("Euler angles", &self.euler_angles)?;
                self.euler_sequence.check_singularity(&self.euler_angles)?
            }
            AttitudeRepresentation::ModifiedRodrigues => {
                if self.mrp.iter().any(|p| !p.is_finite()) {
                    return Err(AttitudeError::Singularity(format!(
                        "modified Rodrigues parameters ({}, {}, {}) are not finite",
                        self.mrp[0], self.mrp[1], self.mrp[2]
                    )));
                }
            }
        }

        match self.rate_input {
            RateRepresentation::AngularVelocity => {
                check_finite("angular velocity", &self.angular_velocity)?
            }
            RateRepresentation::EulerAngleRates => {
                check_finite("Euler angle rates", &self.euler_angle_rates)?
            }
        }
        if self.rate_input == RateRepresentation::EulerAngleRates {
            self.update_state(AttitudeRepresentation::EulerAngles)?;
            self.euler_sequence.check_singularity(&self.euler_angles)?;
        }
        Ok(())
    }

    /// Synchronizes the cosine matrix and angular velocity and clears the
    /// stale flag.
    pub fn baseline(&mut self) -> Result<(na::Matrix3<f64>, na::Vector3<f64>), AttitudeError> {
        let dcm = self.cosine_matrix()?;
        let angular_velocity = self.angular_velocity()?;
        self.stale = false;
        Ok((dcm, angular_velocity))
    }

    fn assign_attitude(&mut self, input: AttitudeRepresentation) {
        self.attitude_input = input;
        // Derived rates depend on the attitude through the kinematic map
        self.synced = input.bit() | self.rate_input.bit();
        self.stale = true;
    }

    fn assign_rate(&mut self, input: RateRepresentation) {
        self.rate_input = input;
        self.synced = (self.synced & ATTITUDE_BITS) | input.bit();
        self.stale = true;
    }

    pub fn set_quaternion(&mut self, q: &Quaternion) -> Result<(), AttitudeError> {
        self.quaternion = q.normalize()?;
        self.assign_attitude(AttitudeRepresentation::Quaternion);
        Ok(())
    }

    /// Sets one quaternion component and re-normalizes the result.
    pub fn set_quaternion_component(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        check_index("quaternion", index, 4)?;
        let mut q = self.quaternion()?;
        q.data[index] = value;
        self.set_quaternion(&q)
    }

    /// Elements are range checked here; orthonormality is left to [`validate`](Self::validate).
    pub fn set_cosine_matrix(&mut self, dcm: &na::Matrix3<f64>) -> Result<(), AttitudeError> {
        for value in dcm.iter() {
            check_cosine_element(*value)?;
        }
        self.cosine_matrix = *dcm;
        self.assign_attitude(AttitudeRepresentation::DirectionCosineMatrix);
        Ok(())
    }

    pub fn set_cosine_matrix_element(
        &mut self,
        row: usize,
        col: usize,
        value: f64,
    ) -> Result<(), AttitudeError> {
        check_index("cosine matrix row", row, 3)?;
        check_index("cosine matrix column", col, 3)?;
        check_cosine_element(value)?;
        let mut dcm = self.cosine_matrix()?;
        dcm[(row, col)] = value;
        self.set_cosine_matrix(&dcm)
    }

    pub fn set_euler_angles(&mut self, angles: &na::Vector3<f64>) -> Result<(), AttitudeError> {
        check_finite("Euler angles", angles)?;
        self.euler_angles = *angles;
        self.assign_attitude(AttitudeRepresentation::EulerAngles);
        Ok(())
    }

    pub fn set_euler_angle(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        check_index("Euler angles", index, 3)?;
        let mut angles = self.euler_angles()?;
        angles[index] = value;
        self.set_euler_angles(&angles)
    }

    /// Changes the sequence without changing the attitude: Euler angle and
    /// Euler rate inputs are first re-expressed as a cosine matrix and an
    /// angular velocity.
    pub fn set_euler_sequence(&mut self, seq: EulerSequence) -> Result<(), AttitudeError> {
        if seq == self.euler_sequence {
            return Ok(());
        }

        let mut next = self.clone();
        // Rates first, while the Euler angles they refer to are still in place
        if next.rate_input == RateRepresentation::EulerAngleRates {
            next.update_rate_state(RateRepresentation::AngularVelocity)?;
            next.assign_rate(RateRepresentation::AngularVelocity);
        }
        if next.attitude_input == AttitudeRepresentation::EulerAngles {
            next.update_state(AttitudeRepresentation::DirectionCosineMatrix)?;
            next.assign_attitude(AttitudeRepresentation::DirectionCosineMatrix);
        }

        next.euler_sequence = seq;
        next.synced &= !(AttitudeRepresentation::EulerAngles.bit()
            | RateRepresentation::EulerAngleRates.bit());
        next.stale = true;
        *self = next;
        Ok(())
    }

    pub fn set_mrp(&mut self, mrp: &na::Vector3<f64>) -> Result<(), AttitudeError> {
        if mrp.iter().any(|p| !p.is_finite()) {
            return Err(AttitudeError::Singularity(
                "modified Rodrigues parameters must be finite".to_string(),
            ));
        }
        self.mrp = *mrp;
        self.assign_attitude(AttitudeRepresentation::ModifiedRodrigues);
        Ok(())
    }

    pub fn set_mrp_component(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        check_index("modified Rodrigues parameters", index, 3)?;
        let mut mrp = self.mrp()?;
        mrp[index] = value;
        self.set_mrp(&mrp)
    }

    pub fn set_angular_velocity(&mut self, w: &na::Vector3<f64>) -> Result<(), AttitudeError> {
        check_finite("angular velocity", w)?;
        self.angular_velocity = *w;
        self.assign_rate(RateRepresentation::AngularVelocity);
        Ok(())
    }

    pub fn set_angular_velocity_component(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        check_index("angular velocity", index, 3)?;
        let mut w = self.angular_velocity()?;
        w[index] = value;
        self.set_angular_velocity(&w)
    }

    pub fn set_euler_angle_rates(&mut self, rates: &na::Vector3<f64>) -> Result<(), AttitudeError> {
        check_finite("Euler angle rates", rates)?;
        self.euler_angle_rates = *rates;
        self.assign_rate(RateRepresentation::EulerAngleRates);
        Ok(())
    }

    pub fn set_euler_angle_rate(&mut self, index: usize, value: f64) -> Result<(), AttitudeError> {
        check_index("Euler angle rates", index, 3)?;
        let mut rates = self.euler_angle_rates()?;
        rates[index] = value;
        self.set_euler_angle_rates(&rates)
    }
}

fn check_index(what: &'static str, index: usize, len: usize) -> Result<(), AttitudeError> {
    if index >= len {
        return Err(AttitudeError::Index { what, index, len });
    }
    Ok(())
}

fn check_finite(what: &'static str, values: &na::Vector3<f64>) -> Result<(), AttitudeError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AttitudeError::NonFinite(what))
    }
}

fn check_cosine_element(value: f64) -> Result<(), AttitudeError> {
    if !(-1.0..=1.0).contains(&value) {
        return Err(AttitudeError::Orthonormality(format!(
            "element {} is outside the range [-1, 1]",
            value
        )));
    }
    Ok(())
}
