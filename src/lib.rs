//! Spacecraft attitude kinematics: attitude representations and their
//! conversions, a lazily synchronized attitude state, and kinematic laws
//! evaluated at arbitrary epochs.

pub mod attitude;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod errors;
pub mod fsm;
pub mod models;
pub mod numerics;
pub mod output;
pub mod physics;
