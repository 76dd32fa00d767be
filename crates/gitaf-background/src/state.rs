//! Renderer lifecycle states

/// Lifecycle of one mount
///
/// ```text
/// Uninitialized -> Disabled                      (mobile)
/// Uninitialized -> Initializing -> Running       (desktop)
/// Initializing  -> Fallback | Stopped            (setup failed)
/// Running       -> Stopped                       (frame error or teardown)
/// any           -> Stopped                       (teardown)
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RendererState {
    #[default]
    Uninitialized,
    /// Mobile device: surface hidden, CSS fallback only
    Disabled,
    /// Desktop setup in progress
    Initializing,
    /// Frame loop active
    Running,
    /// Desktop setup failed, CSS fallback forced visible
    Fallback,
    /// Terminal until a fresh mount
    Stopped,
}

impl RendererState {
    /// Get the string ID for this state
    pub fn id(&self) -> &'static str {
        match self {
            RendererState::Uninitialized => "uninitialized",
            RendererState::Disabled => "disabled",
            RendererState::Initializing => "initializing",
            RendererState::Running => "running",
            RendererState::Fallback => "fallback",
            RendererState::Stopped => "stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default() {
        assert_eq!(RendererState::default(), RendererState::Uninitialized);
    }

    #[test]
    fn test_state_id() {
        assert_eq!(RendererState::Running.id(), "running");
        assert_eq!(RendererState::Fallback.id(), "fallback");
    }
}
