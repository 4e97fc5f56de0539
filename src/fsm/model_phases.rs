use std::fmt;

/// Lifecycle of an attitude model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelPhase {
    Uninitialized,
    Validated,
    Ready,
    Stale,
}

impl fmt::Display for ModelPhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelPhase::Uninitialized => write!(f, "Uninitialized"),
            ModelPhase::Validated => write!(f, "Validated"),
            ModelPhase::Ready => write!(f, "Ready"),
            ModelPhase::Stale => write!(f, "Stale"),
        }
    }
}
