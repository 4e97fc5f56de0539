//! Sequence-independent rotation conversions.
//!
//! Every direction cosine matrix here is a passive (frame) rotation: it maps
//! coordinates in the source frame to coordinates in the target frame.

use super::euler::{dcm_to_euler_angles, euler_angles_to_dcm, EulerSequence};
use super::quaternion::Quaternion;
use crate::constants::{
    DCM_ORTHONORMALITY_TOLERANCE, DEGENERATE_VECTOR_TOLERANCE, EULER_AXIS_TOLERANCE,
    MRP_SINGULARITY_TOLERANCE,
};
use crate::errors::AttitudeError;
use approx::abs_diff_eq;
use nalgebra as na;

/// Cross-product matrix, `skew(a) * b == a × b`.
pub fn skew(v: &na::Vector3<f64>) -> na::Matrix3<f64> {
    na::Matrix3::new(
        0.0,   -v[2],  v[1],
        v[2],   0.0,  -v[0],
        -v[1],  v[0],  0.0,
    )
}

/// Inverse of [`skew`]; only the lower-left entries are read.
pub fn skew_to_vector(m: &na::Matrix3<f64>) -> na::Vector3<f64> {
    na::Vector3::new(m[(2, 1)], m[(0, 2)], m[(1, 0)])
}

pub fn quaternion_to_dcm(q: &Quaternion) -> Result<na::Matrix3<f64>, AttitudeError> {
    q.check_magnitude()?;

    let c = 1.0 / q.data.norm_squared();
    let (q4, qv) = (q.scalar(), q.vector());

    Ok(c * ((q4 * q4 - qv.dot(&qv)) * na::Matrix3::identity() + 2.0 * qv * qv.transpose()
        - 2.0 * q4 * skew(&qv)))
}

/// Shepperd's method: branch on the largest of the diagonal and the trace.
pub fn dcm_to_quaternion(dcm: &na::Matrix3<f64>) -> Result<Quaternion, AttitudeError> {
    let trace = dcm.trace();
    let v = [dcm[(0, 0)], dcm[(1, 1)], dcm[(2, 2)], trace];

    let mut max_i = 0;
    for i in 1..4 {
        if v[i] > v[max_i] {
            max_i = i;
        }
    }

    let q = match max_i {
        0 => Quaternion::new(
            2.0 * v[0] + 1.0 - trace,
            dcm[(0, 1)] + dcm[(1, 0)],
            dcm[(0, 2)] + dcm[(2, 0)],
            dcm[(1, 2)] - dcm[(2, 1)],
        ),
        1 => Quaternion::new(
            dcm[(1, 0)] + dcm[(0, 1)],
            2.0 * v[1] + 1.0 - trace,
            dcm[(1, 2)] + dcm[(2, 1)],
            dcm[(2, 0)] - dcm[(0, 2)],
        ),
        2 => Quaternion::new(
            dcm[(2, 0)] + dcm[(0, 2)],
            dcm[(2, 1)] + dcm[(1, 2)],
            2.0 * v[2] + 1.0 - trace,
            dcm[(0, 1)] - dcm[(1, 0)],
        ),
        _ => Quaternion::new(
            dcm[(1, 2)] - dcm[(2, 1)],
            dcm[(2, 0)] - dcm[(0, 2)],
            dcm[(0, 1)] - dcm[(1, 0)],
            1.0 + trace,
        ),
    };

    q.normalize()
}

pub fn euler_angles_to_quaternion(
    angles: &na::Vector3<f64>,
    seq: EulerSequence,
) -> Result<Quaternion, AttitudeError> {
    dcm_to_quaternion(&euler_angles_to_dcm(angles, seq))
}

pub fn quaternion_to_euler_angles(
    q: &Quaternion,
    seq: EulerSequence,
) -> Result<na::Vector3<f64>, AttitudeError> {
    Ok(dcm_to_euler_angles(&quaternion_to_dcm(q)?, seq))
}

pub fn mrp_to_quaternion(p: &na::Vector3<f64>) -> Result<Quaternion, AttitudeError> {
    let ptp = p.dot(p);
    let v = 2.0 * p / (1.0 + ptp);
    Quaternion::new(v[0], v[1], v[2], (1.0 - ptp) / (1.0 + ptp)).normalize()
}

/// Fails for a rotation of 180 degrees, where the parameters grow without bound.
pub fn quaternion_to_mrp(q: &Quaternion) -> Result<na::Vector3<f64>, AttitudeError> {
    let denominator = 1.0 + q.scalar();
    if denominator.abs() < MRP_SINGULARITY_TOLERANCE {
        return Err(AttitudeError::Singularity(format!(
            "the quaternion ({}, {}, {}, {}) is a 180 degree rotation and has no \
             modified Rodrigues parameters",
            q.data[0], q.data[1], q.data[2], q.data[3]
        )));
    }
    Ok(q.vector() / denominator)
}

/// Direction cosine matrix of a rotation by `angle` about the unit vector `axis`.
pub fn euler_axis_angle_to_dcm(axis: &na::Vector3<f64>, angle: f64) -> na::Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    c * na::Matrix3::identity() + (1.0 - c) * axis * axis.transpose() - s * skew(axis)
}

/// Euler axis and angle (radians, in [0, pi]) of `dcm`. When the angle is a
/// multiple of pi the axis cannot be recovered and (1, 0, 0) is returned.
pub fn dcm_to_euler_axis_angle(dcm: &na::Matrix3<f64>) -> (na::Vector3<f64>, f64) {
    let angle = (0.5 * (dcm.trace() - 1.0)).clamp(-1.0, 1.0).acos();
    let s = angle.sin();
    if s.abs() < EULER_AXIS_TOLERANCE {
        return (na::Vector3::x(), angle);
    }

    let axis = na::Vector3::new(
        dcm[(1, 2)] - dcm[(2, 1)],
        dcm[(2, 0)] - dcm[(0, 2)],
        dcm[(0, 1)] - dcm[(1, 0)],
    ) / (2.0 * s);
    (axis, angle)
}

/// Checks that the columns are unit length and mutually orthogonal and that
/// every element lies in [-1, 1].
pub fn validate_cosine_matrix(dcm: &na::Matrix3<f64>) -> Result<(), AttitudeError> {
    if let Some(value) = dcm.iter().find(|x| x.abs() > 1.0 || !x.is_finite()) {
        return Err(AttitudeError::Orthonormality(format!(
            "element {} is outside the range [-1, 1]",
            value
        )));
    }

    for i in 0..3 {
        let magnitude = dcm.column(i).norm();
        if !abs_diff_eq!(magnitude, 1.0, epsilon = DCM_ORTHONORMALITY_TOLERANCE) {
            return Err(AttitudeError::Orthonormality(format!(
                "column {} has magnitude {}",
                i + 1,
                magnitude
            )));
        }
        for j in (i + 1)..3 {
            let dot = dcm.column(i).dot(&dcm.column(j));
            if !abs_diff_eq!(dot, 0.0, epsilon = DCM_ORTHONORMALITY_TOLERANCE) {
                return Err(AttitudeError::Orthonormality(format!(
                    "columns {} and {} are not orthogonal (dot product {:e})",
                    i + 1,
                    j + 1,
                    dot
                )));
            }
        }
    }
    Ok(())
}

/// TRIAD attitude determination.
///
/// `v1`/`v2` are two directions expressed in frame A, `w1`/`w2` the same
/// directions expressed in frame B. The returned matrix maps frame A
/// coordinates to frame B coordinates; the primary pair is matched exactly.
pub fn triad(
    v1: &na::Vector3<f64>,
    v2: &na::Vector3<f64>,
    w1: &na::Vector3<f64>,
    w2: &na::Vector3<f64>,
) -> na::Matrix3<f64> {
    let r1 = v1.normalize();
    let r2 = v1.cross(v2).normalize();
    let r3 = r1.cross(&r2);

    let s1 = w1.normalize();
    let s2 = w1.cross(w2).normalize();
    let s3 = s1.cross(&s2);

    s1 * r1.transpose() + s2 * r2.transpose() + s3 * r3.transpose()
}

/// Result of [`alignment_dcm`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub dcm: na::Matrix3<f64>,
    /// The vectors were anti-parallel and the identity was used in place of a
    /// 180 degree rotation.
    pub anti_parallel: bool,
}

/// Single-axis rotation taking the direction of `from` onto the direction of
/// `to`. Parallel vectors give the identity; anti-parallel vectors also fall
/// back to the identity and flag it.
pub fn alignment_dcm(
    from: &na::Vector3<f64>,
    to: &na::Vector3<f64>,
) -> Result<Alignment, AttitudeError> {
    for (label, v) in [("from", from), ("to", to)] {
        if v.norm() < DEGENERATE_VECTOR_TOLERANCE {
            return Err(AttitudeError::DegenerateVector(format!(
                "alignment {} vector magnitude {:e} is below {:e}",
                label,
                v.norm(),
                DEGENERATE_VECTOR_TOLERANCE
            )));
        }
    }

    let (from_hat, to_hat) = (from.normalize(), to.normalize());
    let cross = to_hat.cross(&from_hat);
    let dot = from_hat.dot(&to_hat);

    if cross.norm() < DEGENERATE_VECTOR_TOLERANCE {
        return Ok(Alignment {
            dcm: na::Matrix3::identity(),
            anti_parallel: dot < 0.0,
        });
    }

    let angle = dot.clamp(-1.0, 1.0).acos();
    Ok(Alignment {
        dcm: euler_axis_angle_to_dcm(&cross.normalize(), angle),
        anti_parallel: false,
    })
}
