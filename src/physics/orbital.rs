use crate::constants::{G, M_EARTH, PI};
use crate::errors::AttitudeError;
use hifitime::Epoch;
use nalgebra as na;
use std::fmt;

/// Spacecraft translational state relative to the central body at an epoch.
pub trait StateProvider: fmt::Debug {
    /// Position and velocity in inertial axes. Any consistent length unit works.
    fn state_at(&self, epoch: Epoch) -> Result<(na::Vector3<f64>, na::Vector3<f64>), AttitudeError>;
}

/// A state that does not change with time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedState {
    pub position: na::Vector3<f64>,
    pub velocity: na::Vector3<f64>,
}

impl FixedState {
    pub fn new(position: na::Vector3<f64>, velocity: na::Vector3<f64>) -> Self {
        FixedState { position, velocity }
    }
}

impl StateProvider for FixedState {
    fn state_at(&self, _epoch: Epoch) -> Result<(na::Vector3<f64>, na::Vector3<f64>), AttitudeError> {
        Ok((self.position, self.velocity))
    }
}

/// Two-body orbit about the Earth, in meters and m/s.
#[derive(Debug, Clone, PartialEq)]
pub struct KeplerOrbit {
    elements: na::Vector6<f64>,
    epoch: Epoch,
    mean_anomaly: f64,
}

impl KeplerOrbit {
    /// Elements as `[a, e, i, Omega, omega, nu]` (m, -, rad) valid at `epoch`.
    pub fn new(elements: na::Vector6<f64>, epoch: Epoch) -> Result<Self, AttitudeError> {
        if elements[0] <= 0.0 || !elements[0].is_finite() || !(0.0..1.0).contains(&elements[1]) {
            return Err(AttitudeError::Elements(format!(
                "Kepler orbit needs a > 0 and 0 <= e < 1, got a = {} m, e = {}",
                elements[0], elements[1]
            )));
        }
        let eccentric = OrbitalMechanics::true_to_eccentric_anomaly(elements[5], elements[1]);
        let mean_anomaly = OrbitalMechanics::eccentric_to_mean_anomaly(eccentric, elements[1]);
        Ok(KeplerOrbit {
            elements,
            epoch,
            mean_anomaly,
        })
    }

    pub fn period(&self) -> f64 {
        OrbitalMechanics::compute_orbital_period(self.elements[0])
    }
}

impl StateProvider for KeplerOrbit {
    fn state_at(&self, epoch: Epoch) -> Result<(na::Vector3<f64>, na::Vector3<f64>), AttitudeError> {
        let e = self.elements[1];
        let mean_motion = 2.0 * PI / self.period();
        let dt = (epoch - self.epoch).to_seconds();

        let mean_anomaly = (self.mean_anomaly + mean_motion * dt).rem_euclid(2.0 * PI);
        let eccentric = OrbitalMechanics::mean_to_eccentric_anomaly(mean_anomaly, e, 1e-14, 50);
        let nu = 2.0
            * ((1.0 + e).sqrt() * (eccentric / 2.0).sin())
                .atan2((1.0 - e).sqrt() * (eccentric / 2.0).cos());

        let mut elements = self.elements;
        elements[5] = nu;
        Ok(OrbitalMechanics::keplerian_to_cartesian(&elements))
    }
}

pub struct OrbitalMechanics;

#[allow(non_snake_case)]
impl OrbitalMechanics {
    pub fn compute_orbital_period(a: f64) -> f64 {
        2.0 * PI * (a.powi(3) / (G * M_EARTH)).sqrt()
    }

    pub fn true_to_eccentric_anomaly(nu: f64, e: f64) -> f64 {
        if e < 1e-11 {
            return nu.rem_euclid(2.0 * PI);
        }

        let E = ((1.0 - e * e).sqrt() * nu.sin()).atan2(e + nu.cos());
        E.rem_euclid(2.0 * PI)
    }

    pub fn eccentric_to_mean_anomaly(E: f64, e: f64) -> f64 {
        (E - e * E.sin()).rem_euclid(2.0 * PI)
    }

    /// Newton-Raphson solution of Kepler's equation.
    pub fn mean_to_eccentric_anomaly(M: f64, e: f64, tolerance: f64, max_iterations: i32) -> f64 {
        if e < 1e-11 {
            return M;
        }

        let mut E = if M < PI { M + e / 2.0 } else { M - e / 2.0 };

        for _ in 0..max_iterations {
            let delta = (E - e * E.sin() - M) / (1.0 - e * E.cos());
            E -= delta;
            if delta.abs() <= tolerance {
                break;
            }
        }

        E.rem_euclid(2.0 * PI)
    }

    /// Converts Keplerian orbital elements `[a, e, i, Omega, omega, nu]`
    /// to an inertial position and velocity [m, m/s].
    pub fn keplerian_to_cartesian(
        elements: &na::Vector6<f64>,
    ) -> (na::Vector3<f64>, na::Vector3<f64>) {
        let mu = G * M_EARTH;
        let (a, e, i, omega_cap, omega, nu) = (
            elements[0],
            elements[1],
            elements[2],
            elements[3],
            elements[4],
            elements[5],
        );

        let p = a * (1.0 - e * e);
        let r_mag = p / (1.0 + e * nu.cos());

        // Perifocal frame
        let r_orbital = na::Vector3::new(r_mag * nu.cos(), r_mag * nu.sin(), 0.0);
        let v_orbital = na::Vector3::new(
            -(mu / p).sqrt() * nu.sin(),
            (mu / p).sqrt() * (e + nu.cos()),
            0.0,
        );

        let rot_omega = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), omega);
        let rot_i = na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), i);
        let rot_omega_cap = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), omega_cap);

        let transform = rot_omega_cap * rot_i * rot_omega;
        (transform * r_orbital, transform * v_orbital)
    }
}
