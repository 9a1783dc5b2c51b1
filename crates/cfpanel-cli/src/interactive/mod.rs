//! Terminal implementation of the dashboard's prompt capability.

use cfpanel::Prompt;
use colored::Colorize;
use dialoguer::Confirm;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::debug;

/// Confirms through a dialoguer prompt and prints notices to stdout.
#[derive(Debug, Clone, Copy)]
pub struct TerminalPrompt {
    assume_yes: bool,
}

impl TerminalPrompt {
    /// `assume_yes` answers every confirmation without asking
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Prompt for TerminalPrompt {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        // No terminal (piped input, tests) reads as "no"
        off_runtime(|| {
            Confirm::new()
                .with_prompt(message)
                .default(false)
                .interact()
                .unwrap_or_else(|e| {
                    debug!(error = %e, "confirmation unavailable");
                    false
                })
        })
    }

    fn notify(&self, message: &str) {
        if message.starts_with("request failed") || message.starts_with("load failed") {
            println!("{}", message.red());
        } else {
            println!("{message}");
        }
    }
}

/// Run a blocking call without stalling the other tasks on a worker thread.
fn off_runtime<R>(call: impl FnOnce() -> R) -> R {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(call)
        }
        _ => call(),
    }
}
