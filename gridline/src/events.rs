//! Input handling results.

/// Result of handling a user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Input was ignored (nothing to act on, or the control is disabled).
    Ignored,
    /// Input was consumed and any callbacks have run.
    Consumed,
}

impl EventResult {
    /// Check if the input was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
