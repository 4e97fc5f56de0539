use approx::assert_abs_diff_eq;
use hifitime::{Duration, Epoch};
use kosmoss_attitude::attitude::{
    Attitude, ConstantSpin, Kinematics, NadirPointing, PrecessingSpin, QuaternionPropagator,
};
use kosmoss_attitude::config::attitude::AttitudeConfig;
use kosmoss_attitude::errors::AttitudeError;
use kosmoss_attitude::fsm::model_phases::ModelPhase;
use kosmoss_attitude::output::{write_history, HEADER};
use kosmoss_attitude::physics::orbital::{KeplerOrbit, StateProvider};
use nalgebra as na;

fn start() -> Epoch {
    Epoch::from_gregorian_utc(2024, 3, 15, 0, 0, 0, 0)
}

// Full pipeline: TOML description to CSV history
#[test]
fn config_to_csv() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = AttitudeConfig::from_toml_str(
        r#"
        epoch = "2024-03-15T00:00:00 UTC"
        euler_sequence = "321"

        [model]
        type = "QuaternionPropagator"

        [initial]
        type = "Quaternion"
        values = [0.0, 0.0, 0.0, 2.0]

        [rate]
        type = "AngularVelocity"
        values_deg = [0.0, 0.0, 10.0]

        [propagation]
        duration = 60.0
        step = 6.0
        "#,
    )?;

    let mut attitude = cfg.build()?;
    let epochs = cfg.propagation.epochs(attitude.epoch())?;
    let mut buffer = Vec::new();
    let rows = write_history(&mut attitude, &epochs, &mut buffer)?;
    assert_eq!(rows, 11);

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers()?.clone();
    assert_eq!(headers.len(), HEADER.len());

    let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(records.len(), 11);

    // 10 deg/s about z: yaw grows linearly
    for (i, record) in records.iter().enumerate() {
        let elapsed: f64 = record[1].parse()?;
        let yaw: f64 = record[6].parse()?;
        let wz: f64 = record[11].parse()?;
        assert_abs_diff_eq!(elapsed, 6.0 * i as f64, epsilon = 1e-9);
        let expected = (60.0 * i as f64).to_radians();
        assert_abs_diff_eq!(yaw.to_radians().cos(), expected.cos(), epsilon = 1e-10);
        assert_abs_diff_eq!(yaw.to_radians().sin(), expected.sin(), epsilon = 1e-10);
        assert_abs_diff_eq!(wz, 10.0, epsilon = 1e-10);
    }
    Ok(())
}

#[test]
fn spin_laws_agree() {
    let mut spin = Attitude::new(ConstantSpin::new(), start());
    let mut propagator = Attitude::new(QuaternionPropagator::new(), start());
    for model in [&mut spin, &mut propagator] {
        model.set_euler_angles_deg(&[15.0, -40.0, 70.0]).unwrap();
        model.set_angular_velocity_deg(&[1.5, -2.0, 0.5]).unwrap();
    }

    for seconds in [0.0, 12.5, 300.0, 4000.0] {
        let t = start() + Duration::from_seconds(seconds);
        let a = spin.cosine_matrix(t).unwrap();
        let b = propagator.cosine_matrix(t).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-10);
    }
}

#[test]
fn precessing_spin_rate_magnitude_is_constant() {
    let mut attitude = Attitude::new(PrecessingSpin::new(), start());
    let (phi_dot, psi_dot, theta) = (1.0_f64, 10.0_f64, 15.0_f64.to_radians());
    let expected = (phi_dot.powi(2) + psi_dot.powi(2) + 2.0 * phi_dot * psi_dot * theta.cos()).sqrt();

    for seconds in [0.0, 7.0, 90.0, 1234.5] {
        let t = start() + Duration::from_seconds(seconds);
        let w = attitude.angular_velocity_deg(t).unwrap();
        assert_abs_diff_eq!(w.norm(), expected, epsilon = 1e-9);

        let dcm = attitude.cosine_matrix(t).unwrap();
        assert_abs_diff_eq!(dcm.determinant(), 1.0, epsilon = 1e-12);
    }
    assert!(attitude.take_notices().is_empty());
}

#[test]
fn nadir_pointing_tracks_an_orbit() {
    let elements = na::Vector6::new(
        7_000_000.0,
        0.01,
        51.6_f64.to_radians(),
        0.3,
        0.0,
        0.0,
    );
    let orbit = KeplerOrbit::new(elements, start()).unwrap();
    let mut attitude = Attitude::new(NadirPointing::new(Box::new(orbit.clone())), start());

    for seconds in [0.0, 600.0, 2400.0] {
        let t = start() + Duration::from_seconds(seconds);
        let (r, _) = orbit.state_at(t).unwrap();
        let dcm = attitude.cosine_matrix(t).unwrap();
        let boresight = dcm.row(2).transpose();
        assert_abs_diff_eq!(boresight, -r.normalize(), epsilon = 1e-10);
    }
}

#[test]
fn euler_singularity_stops_initialization() {
    let mut attitude = Attitude::new(ConstantSpin::new(), start());
    attitude.set_euler_sequence("3-1-3").unwrap();
    attitude.set_euler_angles_deg(&[10.0, 0.0, 20.0]).unwrap();

    assert!(matches!(
        attitude.evaluate(start()),
        Err(AttitudeError::Singularity(_))
    ));
    assert_ne!(attitude.phase(), ModelPhase::Ready);

    attitude.set_euler_angle_deg(1, 5.0).unwrap();
    assert!(attitude.evaluate(start()).is_ok());
    assert_eq!(attitude.phase(), ModelPhase::Ready);
}

#[test]
fn law_parameters_edit_in_place() {
    let mut attitude = Attitude::new(PrecessingSpin::new(), start());
    let t = start() + Duration::from_seconds(30.0);
    let before = attitude.cosine_matrix(t).unwrap();

    if let Kinematics::PrecessingSpin(law) = attitude.kinematics_mut() {
        law.spin_rate = 0.0;
    }
    assert_eq!(attitude.phase(), ModelPhase::Stale);
    let after = attitude.cosine_matrix(t).unwrap();
    assert!((before - after).norm() > 1e-3);
}
