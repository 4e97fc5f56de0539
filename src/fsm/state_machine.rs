use super::model_phases::ModelPhase;
use tracing::debug;

/// Tracks where an attitude model is in its validate / initialize / evaluate cycle.
#[derive(Debug, Clone)]
pub struct ModelStateMachine {
    current_phase: ModelPhase,
    model_name: &'static str,
    transitions: usize,
}

impl ModelStateMachine {
    pub fn new(model_name: &'static str) -> Self {
        Self {
            current_phase: ModelPhase::Uninitialized,
            model_name,
            transitions: 0,
        }
    }

    pub fn current_phase(&self) -> ModelPhase {
        self.current_phase
    }

    /// Number of phase changes since construction.
    pub fn transitions(&self) -> usize {
        self.transitions
    }

    fn transition_to(&mut self, new_phase: ModelPhase) {
        if self.current_phase != new_phase {
            debug!(
                model = self.model_name,
                from = %self.current_phase,
                to = %new_phase,
                "attitude model phase transition"
            );
            self.current_phase = new_phase;
            self.transitions += 1;
        }
    }

    pub fn validated(&mut self) {
        // A model that is already running stays ready; validation alone does not reset it
        if self.current_phase == ModelPhase::Uninitialized {
            self.transition_to(ModelPhase::Validated);
        }
    }

    pub fn initialized(&mut self) {
        self.transition_to(ModelPhase::Ready);
    }

    /// Inputs changed. A model that never ran has nothing to invalidate.
    pub fn invalidate(&mut self) {
        match self.current_phase {
            ModelPhase::Ready => self.transition_to(ModelPhase::Stale),
            ModelPhase::Validated => self.transition_to(ModelPhase::Uninitialized),
            ModelPhase::Uninitialized | ModelPhase::Stale => {}
        }
    }

    pub fn needs_initialize(&self) -> bool {
        self.current_phase != ModelPhase::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_model_lifecycle() {
        let mut fsm = ModelStateMachine::new("ConstantSpin");
        assert_eq!(fsm.current_phase(), ModelPhase::Uninitialized);
        assert!(fsm.needs_initialize());

        fsm.validated();
        assert_eq!(fsm.current_phase(), ModelPhase::Validated);
        fsm.initialized();
        assert_eq!(fsm.current_phase(), ModelPhase::Ready);
        assert!(!fsm.needs_initialize());

        fsm.invalidate();
        assert_eq!(fsm.current_phase(), ModelPhase::Stale);
        fsm.validated();
        assert_eq!(fsm.current_phase(), ModelPhase::Stale);
        fsm.initialized();
        assert_eq!(fsm.current_phase(), ModelPhase::Ready);
        assert_eq!(fsm.transitions(), 4);
    }

    #[test]
    fn invalidating_a_fresh_model_is_a_no_op() {
        let mut fsm = ModelStateMachine::new("FrameFixed");
        fsm.invalidate();
        assert_eq!(fsm.current_phase(), ModelPhase::Uninitialized);
        assert_eq!(fsm.transitions(), 0);
        assert_eq!(ModelPhase::Stale.to_string(), "Stale");
    }
}
