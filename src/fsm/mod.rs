pub mod model_phases;
pub mod state_machine;
