pub mod state;

pub use state::{AttitudeRepresentation, AttitudeState, RateRepresentation};
