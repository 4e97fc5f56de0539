use crate::constants::QUATERNION_MIN_MAGNITUDE;
use crate::errors::AttitudeError;
use nalgebra as na;

/// Quaternion utilities for spacecraft attitude kinematics
/// Following the CCSDS scalar-last convention: q = [q1; q2; q3; q4] = [x; y; z; w]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub data: na::Vector4<f64>,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub fn new(q1: f64, q2: f64, q3: f64, q4: f64) -> Self {
        Quaternion {
            data: na::Vector4::new(q1, q2, q3, q4),
        }
    }

    pub fn identity() -> Self {
        Quaternion::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Builds a quaternion from a slice, which must hold exactly four elements.
    pub fn from_slice(values: &[f64]) -> Result<Self, AttitudeError> {
        if values.len() != 4 {
            return Err(AttitudeError::Size {
                what: "quaternion",
                expected: 4,
                actual: values.len(),
            });
        }
        Ok(Quaternion::new(values[0], values[1], values[2], values[3]))
    }

    pub fn scalar(&self) -> f64 {
        self.data[3]
    }

    pub fn vector(&self) -> na::Vector3<f64> {
        na::Vector3::new(self.data[0], self.data[1], self.data[2])
    }

    pub fn magnitude(&self) -> f64 {
        self.data.magnitude()
    }

    pub fn check_magnitude(&self) -> Result<(), AttitudeError> {
        let magnitude = self.magnitude();
        if magnitude < QUATERNION_MIN_MAGNITUDE || !magnitude.is_finite() {
            return Err(AttitudeError::Magnitude {
                magnitude,
                minimum: QUATERNION_MIN_MAGNITUDE,
            });
        }
        Ok(())
    }

    pub fn normalize(&self) -> Result<Self, AttitudeError> {
        self.check_magnitude()?;
        Ok(Quaternion {
            data: self.data.normalize(),
        })
    }

    /// The same rotation with the opposite sign convention (q and -q are equivalent).
    pub fn negate(&self) -> Self {
        Quaternion { data: -self.data }
    }

    pub fn to_cosine_matrix(&self) -> Result<na::Matrix3<f64>, AttitudeError> {
        super::rotation::quaternion_to_dcm(self)
    }

    /// Composition with the successive-rotation ordering of direction cosine
    /// matrices: `A(self ⊗ other) = A(self) · A(other)`.
    pub fn multiply(&self, other: &Quaternion) -> Self {
        let (q4, qv) = (self.scalar(), self.vector());
        let (p4, pv) = (other.scalar(), other.vector());

        let v = p4 * qv + q4 * pv - qv.cross(&pv);
        Quaternion::new(v[0], v[1], v[2], q4 * p4 - qv.dot(&pv))
    }

    /// Kinematic matrix of the body angular velocity, `q_dot = 0.5 * Ω(ω) * q`.
    pub fn omega_matrix(w: &na::Vector3<f64>) -> na::Matrix4<f64> {
        let (wx, wy, wz) = (w[0], w[1], w[2]);

        na::Matrix4::new(
            0.0,  wz, -wy,  wx,
            -wz, 0.0,  wx,  wy,
             wy, -wx, 0.0,  wz,
            -wx, -wy, -wz, 0.0,
        )
    }
}

pub fn compute_quaternion_derivative(q: &Quaternion, w: &na::Vector3<f64>) -> Quaternion {
    Quaternion {
        data: 0.5 * Quaternion::omega_matrix(w) * q.data,
    }
}
