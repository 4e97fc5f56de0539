//! Euler angle sequences and the sequence-dependent conversions.
//!
//! Every sequence has its own closed-form table; there is no single formula
//! covering all twelve. Axis 1 is x, 2 is y, 3 is z. Angles are radians.

use crate::constants::EULER_ANGLE_TOLERANCE;
use crate::errors::AttitudeError;
use nalgebra as na;
use std::fmt;
use std::str::FromStr;

/// One of the twelve valid Euler rotation sequences.
///
/// Symmetric sequences repeat the first axis last (e.g. 3-1-3); asymmetric
/// ones use three distinct axes (e.g. 3-2-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EulerSequence {
    Seq123,
    Seq231,
    #[default]
    Seq312,
    Seq132,
    Seq321,
    Seq213,
    Seq121,
    Seq232,
    Seq313,
    Seq131,
    Seq323,
    Seq212,
}

impl EulerSequence {
    pub const ALL: [EulerSequence; 12] = [
        EulerSequence::Seq123,
        EulerSequence::Seq231,
        EulerSequence::Seq312,
        EulerSequence::Seq132,
        EulerSequence::Seq321,
        EulerSequence::Seq213,
        EulerSequence::Seq121,
        EulerSequence::Seq232,
        EulerSequence::Seq313,
        EulerSequence::Seq131,
        EulerSequence::Seq323,
        EulerSequence::Seq212,
    ];

    /// Builds a sequence from its axis indices. A zero index, an index above 3
    /// or a repeated adjacent axis is rejected.
    pub fn from_axes(seq1: u8, seq2: u8, seq3: u8) -> Result<Self, AttitudeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|seq| seq.axes() == [seq1, seq2, seq3])
            .ok_or_else(|| AttitudeError::Sequence(format!("{}{}{}", seq1, seq2, seq3)))
    }

    pub fn axes(&self) -> [u8; 3] {
        match self {
            EulerSequence::Seq123 => [1, 2, 3],
            EulerSequence::Seq231 => [2, 3, 1],
            EulerSequence::Seq312 => [3, 1, 2],
            EulerSequence::Seq132 => [1, 3, 2],
            EulerSequence::Seq321 => [3, 2, 1],
            EulerSequence::Seq213 => [2, 1, 3],
            EulerSequence::Seq121 => [1, 2, 1],
            EulerSequence::Seq232 => [2, 3, 2],
            EulerSequence::Seq313 => [3, 1, 3],
            EulerSequence::Seq131 => [1, 3, 1],
            EulerSequence::Seq323 => [3, 2, 3],
            EulerSequence::Seq212 => [2, 1, 2],
        }
    }

    pub fn is_symmetric(&self) -> bool {
        let axes = self.axes();
        axes[0] == axes[2]
    }

    pub fn name(&self) -> &'static str {
        match self {
            EulerSequence::Seq123 => "123",
            EulerSequence::Seq231 => "231",
            EulerSequence::Seq312 => "312",
            EulerSequence::Seq132 => "132",
            EulerSequence::Seq321 => "321",
            EulerSequence::Seq213 => "213",
            EulerSequence::Seq121 => "121",
            EulerSequence::Seq232 => "232",
            EulerSequence::Seq313 => "313",
            EulerSequence::Seq131 => "131",
            EulerSequence::Seq323 => "323",
            EulerSequence::Seq212 => "212",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(EulerSequence::name).collect()
    }

    /// The kinematic denominator for this sequence: cos(angle2) for
    /// asymmetric sequences, sin(angle2) for symmetric ones.
    fn singularity_term(&self, angle2: f64) -> f64 {
        if self.is_symmetric() {
            angle2.sin()
        } else {
            angle2.cos()
        }
    }

    /// Fails when angle 2 sits within tolerance of this sequence's singularity.
    pub fn check_singularity(&self, angles: &na::Vector3<f64>) -> Result<(), AttitudeError> {
        if self.singularity_term(angles[1]).abs() < EULER_ANGLE_TOLERANCE {
            return Err(AttitudeError::euler_singularity(angles));
        }
        Ok(())
    }
}

impl fmt::Display for EulerSequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EulerSequence {
    type Err = AttitudeError;

    /// Accepts "321" as well as the dashed form "3-2-1".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.trim().chars().filter(|c| *c != '-').collect();
        Self::ALL
            .iter()
            .copied()
            .find(|seq| seq.name() == digits)
            .ok_or_else(|| AttitudeError::Sequence(s.to_string()))
    }
}

/// Direction cosine matrix of the Euler angles rotated through `seq`.
pub fn euler_angles_to_dcm(angles: &na::Vector3<f64>, seq: EulerSequence) -> na::Matrix3<f64> {
    let (s1, c1) = angles[0].sin_cos();
    let (s2, c2) = angles[1].sin_cos();
    let (s3, c3) = angles[2].sin_cos();

    match seq {
        EulerSequence::Seq121 => na::Matrix3::new(
            c2,     s2*s1,            -s2*c1,
            s3*s2,  c3*c1-s3*c2*s1,   c3*s1+s3*c2*c1,
            c3*s2,  -s3*c1-c3*c2*s1,  -s3*s1+c3*c2*c1,
        ),
        EulerSequence::Seq123 => na::Matrix3::new(
            c3*c2,   c3*s2*s1+s3*c1,   -c3*s2*c1+s1*s3,
            -s3*c2,  -s3*s2*s1+c3*c1,  s3*s2*c1+c3*s1,
            s2,      -c2*s1,           c2*c1,
        ),
        EulerSequence::Seq131 => na::Matrix3::new(
            c2,      s2*c1,            s2*s1,
            -c3*s2,  c3*c2*c1-s3*s1,   c3*c2*s1+s3*c1,
            s3*s2,   -s3*c2*c1-c3*s1,  -s3*c2*s1+c3*c1,
        ),
        EulerSequence::Seq132 => na::Matrix3::new(
            c3*c2,  c3*s2*c1+s1*s3,  c3*s2*s1-s3*c1,
            -s2,    c2*c1,           c2*s1,
            s3*c2,  s3*s2*c1-c3*s1,  s3*s2*s1+c3*c1,
        ),
        EulerSequence::Seq212 => na::Matrix3::new(
            c3*c1-s3*c2*s1,  s3*s2,   -c3*s1-s3*c2*c1,
            s2*s1,           c2,      s2*c1,
            s3*c1+c3*c2*s1,  -c3*s2,  -s3*s1+c3*c2*c1,
        ),
        EulerSequence::Seq213 => na::Matrix3::new(
            c3*c1+s3*s2*s1,   s3*c2,  -c3*s1+s3*s2*c1,
            -s3*c1+c3*s2*s1,  c3*c2,  s3*s1+c3*s2*c1,
            c2*s1,            -s2,    c2*c1,
        ),
        EulerSequence::Seq231 => na::Matrix3::new(
            c2*c1,            s2,      -c2*s1,
            -c3*s2*c1+s3*s1,  c3*c2,   c3*s2*s1+s3*c1,
            s3*s2*c1+c3*s1,   -s3*c2,  -s3*s2*s1+c3*c1,
        ),
        EulerSequence::Seq232 => na::Matrix3::new(
            c3*c2*c1-s3*s1,  c3*s2,  -c3*c2*s1-s3*c1,
            -s2*c1,          c2,     s2*s1,
            s3*c2*c1+c3*s1,  s3*s2,  -s3*c2*s1+c3*c1,
        ),
        EulerSequence::Seq312 => na::Matrix3::new(
            c3*c1-s3*s2*s1,  c3*s1+s3*s2*c1,  -s3*c2,
            -c2*s1,          c2*c1,           s2,
            s3*c1+c3*s2*s1,  s3*s1-c3*s2*c1,  c3*c2,
        ),
        EulerSequence::Seq313 => na::Matrix3::new(
            c3*c1-s3*c2*s1,   c3*s1+s3*c2*c1,   s3*s2,
            -s3*c1-c3*c2*s1,  -s3*s1+c3*c2*c1,  c3*s2,
            s2*s1,            -s2*c1,           c2,
        ),
        EulerSequence::Seq321 => na::Matrix3::new(
            c2*c1,            c2*s1,            -s2,
            -c3*s1+s3*s2*c1,  c3*c1+s3*s2*s1,   s3*c2,
            s3*s1+c3*s2*c1,   -s3*c1+c3*s2*s1,  c3*c2,
        ),
        EulerSequence::Seq323 => na::Matrix3::new(
            c3*c2*c1-s3*s1,   c3*c2*s1+s3*c1,   -c3*s2,
            -s3*c2*c1-c3*s1,  -s3*c2*s1+c3*c1,  s3*s2,
            s2*c1,            s2*s1,            c2,
        ),
    }
}

/// Euler angles of `dcm` for the rotation sequence `seq`.
///
/// Angle 1 and angle 3 come from `atan2` and lie in (-pi, pi]; angle 2 comes
/// from `asin` for asymmetric sequences ([-pi/2, pi/2]) and `acos` for
/// symmetric ones ([0, pi]).
pub fn dcm_to_euler_angles(dcm: &na::Matrix3<f64>, seq: EulerSequence) -> na::Vector3<f64> {
    let (r11, r12, r13) = (dcm[(0, 0)], dcm[(0, 1)], dcm[(0, 2)]);
    let (r21, r22, r23) = (dcm[(1, 0)], dcm[(1, 1)], dcm[(1, 2)]);
    let (r31, r32, r33) = (dcm[(2, 0)], dcm[(2, 1)], dcm[(2, 2)]);

    // Round-off can push an entry just past +/-1
    let asin = |x: f64| x.clamp(-1.0, 1.0).asin();
    let acos = |x: f64| x.clamp(-1.0, 1.0).acos();

    let (theta1, theta2) = match seq {
        EulerSequence::Seq123 => ((-r32).atan2(r33), asin(r31)),
        EulerSequence::Seq132 => (r23.atan2(r22), asin(-r21)),
        EulerSequence::Seq231 => ((-r13).atan2(r11), asin(r12)),
        EulerSequence::Seq213 => (r31.atan2(r33), asin(-r32)),
        EulerSequence::Seq312 => ((-r21).atan2(r22), asin(r23)),
        EulerSequence::Seq321 => (r12.atan2(r11), asin(-r13)),
        EulerSequence::Seq121 => (r12.atan2(-r13), acos(r11)),
        EulerSequence::Seq131 => (r13.atan2(r12), acos(r11)),
        EulerSequence::Seq212 => (r21.atan2(r23), acos(r22)),
        EulerSequence::Seq232 => (r23.atan2(-r21), acos(r22)),
        EulerSequence::Seq313 => (r31.atan2(-r32), acos(r33)),
        EulerSequence::Seq323 => (r32.atan2(r31), acos(r33)),
    };

    let (s1, c1) = theta1.sin_cos();
    let theta3 = match seq {
        EulerSequence::Seq123 => (r13 * s1 + r12 * c1).atan2(r23 * s1 + r22 * c1),
        EulerSequence::Seq132 => (r12 * s1 - r13 * c1).atan2(-r32 * s1 + r33 * c1),
        EulerSequence::Seq231 => (r21 * s1 + r23 * c1).atan2(r31 * s1 + r33 * c1),
        EulerSequence::Seq213 => (r23 * s1 - r21 * c1).atan2(-r13 * s1 + r11 * c1),
        EulerSequence::Seq312 => (r32 * s1 + r31 * c1).atan2(r12 * s1 + r11 * c1),
        EulerSequence::Seq321 => (r31 * s1 - r32 * c1).atan2(-r21 * s1 + r22 * c1),
        EulerSequence::Seq121 => (-r33 * s1 - r32 * c1).atan2(r23 * s1 + r22 * c1),
        EulerSequence::Seq131 => (-r22 * s1 + r23 * c1).atan2(-r32 * s1 + r33 * c1),
        EulerSequence::Seq212 => (-r33 * s1 + r31 * c1).atan2(-r13 * s1 + r11 * c1),
        EulerSequence::Seq232 => (-r11 * s1 - r13 * c1).atan2(r31 * s1 + r33 * c1),
        EulerSequence::Seq313 => (-r22 * s1 - r21 * c1).atan2(r12 * s1 + r11 * c1),
        EulerSequence::Seq323 => (-r11 * s1 + r12 * c1).atan2(-r21 * s1 + r22 * c1),
    };

    na::Vector3::new(theta1, theta2, theta3)
}

/// Euler angle rates from a body angular velocity; both must belong to the
/// same epoch as `angles`.
pub fn angular_velocity_to_euler_rates(
    angular_velocity: &na::Vector3<f64>,
    angles: &na::Vector3<f64>,
    seq: EulerSequence,
) -> Result<na::Vector3<f64>, AttitudeError> {
    seq.check_singularity(angles)?;

    let (s2, c2) = angles[1].sin_cos();
    let (s3, c3) = angles[2].sin_cos();

    let s_inv = match seq {
        EulerSequence::Seq123 => na::Matrix3::new(
            c3/c2,      -s3/c2,    0.0,
            s3,         c3,        0.0,
            -c3*s2/c2,  s3*s2/c2,  1.0,
        ),
        EulerSequence::Seq132 => na::Matrix3::new(
            c3/c2,     0.0,  s3/c2,
            -s3,       0.0,  c3,
            c3*s2/c2,  1.0,  s3*s2/c2,
        ),
        EulerSequence::Seq231 => na::Matrix3::new(
            0.0,  c3/c2,      -s3/c2,
            0.0,  s3,         c3,
            1.0,  -c3*s2/c2,  s3*s2/c2,
        ),
        EulerSequence::Seq213 => na::Matrix3::new(
            s3/c2,     c3/c2,     0.0,
            c3,        -s3,       0.0,
            s3*s2/c2,  c3*s2/c2,  1.0,
        ),
        EulerSequence::Seq312 => na::Matrix3::new(
            -s3/c2,    0.0,  c3/c2,
            c3,        0.0,  s3,
            s3*s2/c2,  1.0,  -c3*s2/c2,
        ),
        EulerSequence::Seq321 => na::Matrix3::new(
            0.0,  s3/c2,     c3/c2,
            0.0,  c3,        -s3,
            1.0,  s3*s2/c2,  c3*s2/c2,
        ),
        EulerSequence::Seq121 => na::Matrix3::new(
            0.0,  s3/s2,      c3/s2,
            0.0,  c3,         -s3,
            1.0,  -s3*c2/s2,  -c3*c2/s2,
        ),
        EulerSequence::Seq131 => na::Matrix3::new(
            0.0,  -c3/s2,    s3/s2,
            0.0,  s3,        c3,
            1.0,  c3*c2/s2,  -s3*c2/s2,
        ),
        EulerSequence::Seq212 => na::Matrix3::new(
            s3/s2,      0.0,  -c3/s2,
            c3,         0.0,  s3,
            -s3*c2/s2,  1.0,  c3*c2/s2,
        ),
        EulerSequence::Seq232 => na::Matrix3::new(
            c3/s2,      0.0,  s3/s2,
            -s3,        0.0,  c3,
            -c3*c2/s2,  1.0,  -s3*c2/s2,
        ),
        EulerSequence::Seq313 => na::Matrix3::new(
            s3/s2,      c3/s2,      0.0,
            c3,         -s3,        0.0,
            -s3*c2/s2,  -c3*c2/s2,  1.0,
        ),
        EulerSequence::Seq323 => na::Matrix3::new(
            -c3/s2,    s3/s2,      0.0,
            s3,        c3,         0.0,
            c3*c2/s2,  -s3*c2/s2,  1.0,
        ),
    };

    Ok(s_inv * angular_velocity)
}

/// Body angular velocity from Euler angle rates taken at the same epoch as `angles`.
pub fn euler_rates_to_angular_velocity(
    rates: &na::Vector3<f64>,
    angles: &na::Vector3<f64>,
    seq: EulerSequence,
) -> na::Vector3<f64> {
    let (s2, c2) = angles[1].sin_cos();
    let (s3, c3) = angles[2].sin_cos();

    let s = match seq {
        EulerSequence::Seq123 => na::Matrix3::new(
            c3*c2,   s3,   0.0,
            -s3*c2,  c3,   0.0,
            s2,      0.0,  1.0,
        ),
        EulerSequence::Seq132 => na::Matrix3::new(
            c3*c2,  -s3,  0.0,
            -s2,    0.0,  1.0,
            s3*c2,  c3,   0.0,
        ),
        EulerSequence::Seq231 => na::Matrix3::new(
            s2,      0.0,  1.0,
            c3*c2,   s3,   0.0,
            -s3*c2,  c3,   0.0,
        ),
        EulerSequence::Seq213 => na::Matrix3::new(
            s3*c2,  c3,   0.0,
            c3*c2,  -s3,  0.0,
            -s2,    0.0,  1.0,
        ),
        EulerSequence::Seq312 => na::Matrix3::new(
            -s3*c2,  c3,   0.0,
            s2,      0.0,  1.0,
            c3*c2,   s3,   0.0,
        ),
        EulerSequence::Seq321 => na::Matrix3::new(
            -s2,    0.0,  1.0,
            s3*c2,  c3,   0.0,
            c3*c2,  -s3,  0.0,
        ),
        EulerSequence::Seq121 => na::Matrix3::new(
            c2,     0.0,  1.0,
            s3*s2,  c3,   0.0,
            c3*s2,  -s3,  0.0,
        ),
        EulerSequence::Seq131 => na::Matrix3::new(
            c2,      0.0,  1.0,
            -c3*s2,  s3,   0.0,
            s3*s2,   c3,   0.0,
        ),
        EulerSequence::Seq212 => na::Matrix3::new(
            s3*s2,   c3,   0.0,
            c2,      0.0,  1.0,
            -c3*s2,  s3,   0.0,
        ),
        EulerSequence::Seq232 => na::Matrix3::new(
            c3*s2,  -s3,  0.0,
            c2,     0.0,  1.0,
            s3*s2,  c3,   0.0,
        ),
        EulerSequence::Seq313 => na::Matrix3::new(
            s3*s2,  c3,   0.0,
            c3*s2,  -s3,  0.0,
            c2,     0.0,  1.0,
        ),
        EulerSequence::Seq323 => na::Matrix3::new(
            -c3*s2,  s3,   0.0,
            s3*s2,   c3,   0.0,
            c2,      0.0,  1.0,
        ),
    };

    s * rates
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_case::test_case;

    fn reference_dcm() -> na::Matrix3<f64> {
        na::Matrix3::new(
            0.813797681349374,  0.469846310392954,  -0.342020143325669,
            -0.440969610529882, 0.882564119259386,  0.163175911166535,
            0.378522306369792,  0.0180283112362973, 0.925416578398323,
        )
    }

    fn degrees(a: f64, b: f64, c: f64) -> na::Vector3<f64> {
        na::Vector3::new(a.to_radians(), b.to_radians(), c.to_radians())
    }

    #[test_case("123", -1.11605467700463, 22.2421809103095, 28.4517752565854 ; "sequence 123")]
    #[test_case("132", 10.4750381270859, 26.1657624772213, 24.944585788682 ; "sequence 132")]
    #[test_case("231", 22.7958772588585, 28.0243206736047, -1.17022943307879 ; "sequence 231")]
    #[test_case("213", 22.245989694115, -1.03300210846732, 28.0292778865611 ; "sequence 213")]
    #[test_case("312", 26.5488216029811, 9.39128580204349, 20.2835594545297 ; "sequence 312")]
    #[test_case("321", 29.9999999999999, 20.00, 9.99999999999998 ; "sequence 321")]
    #[test_case("121", 53.9476112676121, 35.5313477628041, 310.642342047956 ; "sequence 121")]
    #[test_case("131", 323.947611267612, 35.5313477628041, 40.642342047956 ; "sequence 131")]
    #[test_case("212", 290.306434286384, 28.0467644314485, 92.1973986643425 ; "sequence 212")]
    #[test_case("232", 20.3064342863842, 28.0467644314485, 2.19739866434246 ; "sequence 232")]
    #[test_case("313", 92.7268304431963, 22.2687444952968, 295.505550260983 ; "sequence 313")]
    #[test_case("323", 2.72683044319633, 22.2687444952968, 25.5055502609825 ; "sequence 323")]
    fn tables_reproduce_reference_attitude(seq: &str, a1: f64, a2: f64, a3: f64) {
        let seq: EulerSequence = seq.parse().unwrap();
        let dcm = euler_angles_to_dcm(&degrees(a1, a2, a3), seq);
        assert_abs_diff_eq!(dcm, reference_dcm(), epsilon = 1e-10);

        // The inverse tables recover the same attitude (angles may wrap by 360 deg)
        let angles = dcm_to_euler_angles(&reference_dcm(), seq);
        assert_abs_diff_eq!(euler_angles_to_dcm(&angles, seq), reference_dcm(), epsilon = 1e-10);
    }

    #[test]
    fn inverse_table_recovers_321_angles() {
        let angles = dcm_to_euler_angles(&reference_dcm(), EulerSequence::Seq321);
        assert_abs_diff_eq!(angles, degrees(30.0, 20.0, 10.0), epsilon = 1e-9);
    }

    #[test_case("123", -1.11605467700463, 22.2421809103095, 28.4517752565854, [2.1759016656915, 6.77818662316379, 4.17637268306857] ; "rates 123")]
    #[test_case("132", 10.4750381270859, 26.1657624772213, 24.944585788682, [7.40069642152502, 2.42487291788045, 8.26348221864978] ; "rates 132")]
    #[test_case("231", 22.7958772588585, 28.0243206736047, -1.17022943307879, [5.77862592877558, 4.8968424672837, 2.28493392822373] ; "rates 231")]
    #[test_case("213", 22.245989694115, -1.03300210846732, 28.0292778865611, [6.76425066505365, 2.06392447996366, 4.87805198373008] ; "rates 213")]
    #[test_case("312", 26.5488216029811, 9.39128580204349, 20.2835594545297, [2.9967754512649, 6.42327482092227, 4.51099843517834] ; "rates 312")]
    #[test_case("321", 29.9999999999999, 20.00, 9.99999999999998, [6.16401525910817, 4.05579787672639, 7.10821738238178] ; "rates 321")]
    #[test_case("313", 92.7268304431963, 22.2687444952968, 295.505550260983, [-6.22698662109642, 6.66571052442454, 10.7625566526271] ; "rates 313")]
    #[test_case("323", 2.72683044319633, 22.2687444952968, 25.5055502609825, [-6.22698662109643, 6.66571052442453, 10.7625566526272] ; "rates 323")]
    fn kinematic_map_matches_reference_rates(seq: &str, a1: f64, a2: f64, a3: f64, expected: [f64; 3]) {
        let seq: EulerSequence = seq.parse().unwrap();
        let w = na::Vector3::new(5.0, 5.0, 5.0);
        let rates = angular_velocity_to_euler_rates(&w, &degrees(a1, a2, a3), seq).unwrap();
        assert_abs_diff_eq!(rates, na::Vector3::from(expected), epsilon = 1e-9);
    }

    #[test]
    fn kinematic_maps_are_inverses_for_every_sequence() {
        let w = na::Vector3::new(0.01, -0.02, 0.03);
        let angles = degrees(40.0, 35.0, -70.0);
        for seq in EulerSequence::ALL {
            let rates = angular_velocity_to_euler_rates(&w, &angles, seq).unwrap();
            let back = euler_rates_to_angular_velocity(&rates, &angles, seq);
            assert_relative_eq!(back, w, epsilon = 1e-12);
        }
    }

    #[test]
    fn round_trip_for_every_sequence() {
        for seq in EulerSequence::ALL {
            let angles = if seq.is_symmetric() {
                degrees(-120.0, 50.0, 75.0)
            } else {
                degrees(-120.0, 40.0, 75.0)
            };
            let dcm = euler_angles_to_dcm(&angles, seq);
            assert_abs_diff_eq!(dcm_to_euler_angles(&dcm, seq), angles, epsilon = 1e-9);
        }
    }

    #[test_case(0.0 => true ; "exactly zero")]
    #[test_case(1e-11 => true ; "inside tolerance")]
    #[test_case(1e-9 => false ; "outside tolerance")]
    fn symmetric_singularity_boundary(angle2: f64) -> bool {
        let angles = na::Vector3::new(0.3, angle2, 0.2);
        let w = na::Vector3::new(0.1, 0.1, 0.1);
        matches!(
            angular_velocity_to_euler_rates(&w, &angles, EulerSequence::Seq313),
            Err(AttitudeError::Singularity(_))
        )
    }

    #[test]
    fn asymmetric_singularity_at_ninety_degrees() {
        let angles = na::Vector3::new(0.0, std::f64::consts::FRAC_PI_2, 0.0);
        let w = na::Vector3::new(0.1, 0.0, 0.0);
        assert!(angular_velocity_to_euler_rates(&w, &angles, EulerSequence::Seq321).is_err());
    }

    #[test_case(3, 2, 1 => Ok(EulerSequence::Seq321) ; "valid asymmetric")]
    #[test_case(3, 1, 3 => Ok(EulerSequence::Seq313) ; "valid symmetric")]
    #[test_case(0, 2, 1 => Err(AttitudeError::Sequence("021".to_string())) ; "zero index")]
    #[test_case(1, 1, 2 => Err(AttitudeError::Sequence("112".to_string())) ; "repeated axis")]
    fn sequence_from_axes(a: u8, b: u8, c: u8) -> Result<EulerSequence, AttitudeError> {
        EulerSequence::from_axes(a, b, c)
    }

    #[test]
    fn sequence_strings() {
        assert_eq!("3-1-3".parse::<EulerSequence>(), Ok(EulerSequence::Seq313));
        assert!("324".parse::<EulerSequence>().is_err());
        assert_eq!(EulerSequence::default().to_string(), "312");
        assert_eq!(EulerSequence::names().len(), 12);
    }
}
