use crate::attitude::Attitude;
use crate::errors::AttitudeError;
use csv::Writer;
use hifitime::Epoch;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Attitude(#[from] AttitudeError),
}

pub const HEADER: [&str; 12] = [
    "UTC Time",
    "Time (s)",
    "q1",
    "q2",
    "q3",
    "q4",
    "Euler Angle 1 (deg)",
    "Euler Angle 2 (deg)",
    "Euler Angle 3 (deg)",
    "Angular Velocity X (deg/s)",
    "Angular Velocity Y (deg/s)",
    "Angular Velocity Z (deg/s)",
];

/// Writes one row per epoch and returns the number of rows written.
pub fn write_history<W: Write>(
    attitude: &mut Attitude,
    epochs: &[Epoch],
    sink: W,
) -> Result<usize, OutputError> {
    let mut writer = Writer::from_writer(sink);
    writer.write_record(HEADER)?;

    let start = attitude.epoch();
    for &epoch in epochs {
        let q = attitude.quaternion(epoch)?;
        let angles = attitude.euler_angles_deg(epoch)?;
        let w = attitude.angular_velocity_deg(epoch)?;

        writer.write_record(&[
            epoch.to_string(),
            (epoch - start).to_seconds().to_string(),
            q.data[0].to_string(),
            q.data[1].to_string(),
            q.data[2].to_string(),
            q.data[3].to_string(),
            angles[0].to_string(),
            angles[1].to_string(),
            angles[2].to_string(),
            w[0].to_string(),
            w[1].to_string(),
            w[2].to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(epochs.len())
}
