use thiserror::Error;

/// Failures raised by the rotation conversions and the attitude models.
///
/// All of these are input or programming errors: they are returned at the
/// point of detection and never retried or logged by the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttitudeError {
    #[error("Size error: {what} must have {expected} elements, got {actual}")]
    Size {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Size error: index {index} is out of range for {what} with {len} elements")]
    Index {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Quaternion error: magnitude {magnitude:e} is below the minimum of {minimum:e}")]
    Magnitude { magnitude: f64, minimum: f64 },

    #[error("Direction cosine matrix error: {0}")]
    Orthonormality(String),

    #[error(
        "Invalid Euler sequence \"{0}\": allowed values are \
         123 231 312 132 321 213 121 232 313 131 323 212"
    )]
    Sequence(String),

    #[error("Singularity error: {0}")]
    Singularity(String),

    #[error("Degenerate vector: {0}")]
    DegenerateVector(String),

    #[error("Non-finite input: {0} must be finite")]
    NonFinite(&'static str),

    #[error("Orbital elements error: {0}")]
    Elements(String),

    #[error("Reference frame error: {0}")]
    Frame(String),
}

impl AttitudeError {
    pub(crate) fn euler_singularity(angles: &nalgebra::Vector3<f64>) -> Self {
        AttitudeError::Singularity(format!(
            "the attitude defined by the Euler angles ({}, {}, {}) deg is near a singularity. \
             For a symmetric sequence EulerAngle2 != 0, for a non-symmetric sequence \
             EulerAngle2 != 90; the tolerance on EulerAngle2 is {:e}",
            angles[0].to_degrees(),
            angles[1].to_degrees(),
            angles[2].to_degrees(),
            crate::constants::EULER_ANGLE_TOLERANCE,
        ))
    }
}
