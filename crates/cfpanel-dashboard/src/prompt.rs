//! Blocking user prompts.

/// Confirmation and notification capability.
///
/// Both calls may block until the user answers; the dashboard never holds
/// its state lock while prompting.
pub trait Prompt: Send + Sync {
    /// Ask a yes/no question
    fn confirm(&self, message: &str) -> bool;

    /// Show a message the user has to acknowledge
    fn notify(&self, message: &str);
}
