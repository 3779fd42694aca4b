//! Visual handles for speech affordances
//!
//! A handle is owned by the host (a per-message audio button, the microphone
//! button). The speech controller never owns or renders it; it only compares
//! handles for identity and pushes presentation states onto them.

use std::fmt;

/// Presentation state pushed onto a handle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisualState {
    /// Ready for a click (speaker or microphone icon)
    #[default]
    Idle,
    /// Bound utterance is being spoken (stop icon)
    Speaking,
    /// Recognition session is open (stop icon)
    Listening,
    /// Capability missing in this environment
    Disabled,
}

impl VisualState {
    /// Check if the handle currently shows an active session
    pub fn is_active(&self) -> bool {
        matches!(self, VisualState::Speaking | VisualState::Listening)
    }
}

impl fmt::Display for VisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualState::Idle => write!(f, "Idle"),
            VisualState::Speaking => write!(f, "Speaking"),
            VisualState::Listening => write!(f, "Listening"),
            VisualState::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Host-owned UI affordance the controller issues state updates against
pub trait VisualHandle: Send {
    /// Whether both values refer to the same on-screen affordance
    fn same_affordance(&self, other: &Self) -> bool;

    /// Show `state` on the affordance
    fn apply(&self, state: VisualState);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_states() {
        assert!(VisualState::Speaking.is_active());
        assert!(VisualState::Listening.is_active());
        assert!(!VisualState::Idle.is_active());
        assert!(!VisualState::Disabled.is_active());
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(VisualState::default(), VisualState::Idle);
        assert_eq!(VisualState::Speaking.to_string(), "Speaking");
    }
}
