//! Copy-link button behavior.
//!
//! On activation the button writes its target URL to the clipboard and
//! shows a confirmation label for 1.5 seconds before reverting. The revert
//! is an explicit deadline rather than a detached timer: a second
//! activation before the deadline cancels and restarts it, so rapid
//! repeated clicks never race two reverts against each other.
//!
//! The clipboard itself sits behind a trait so the state machine is
//! testable without a host environment; a write failure is logged and
//! leaves the label untouched.

use crate::debug;
use anyhow::Result;
use std::time::{Duration, Instant};

/// How long the confirmation label stays up.
pub const REVERT_AFTER: Duration = Duration::from_millis(1500);

/// Confirmation label shown after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// Label used when the button carries no text of its own.
pub const DEFAULT_LABEL: &str = "Copy link";

/// Destination for clipboard writes.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// State of the copy-link button.
#[derive(Debug, Clone)]
pub struct CopyLinkButton {
    idle_label: String,
    label: String,
    target_url: String,
    revert_at: Option<Instant>,
}

impl CopyLinkButton {
    /// Build the button state from its scanned label and URL.
    ///
    /// The explicit `data-url` wins; the page's own location is the
    /// fallback.
    pub fn new(label: &str, data_url: Option<String>, page_url: &str) -> Self {
        let idle_label = if label.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            label.to_string()
        };
        Self {
            label: idle_label.clone(),
            idle_label,
            target_url: data_url.unwrap_or_else(|| page_url.to_string()),
            revert_at: None,
        }
    }

    /// Current visible label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// URL the button copies.
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Whether a label revert is pending.
    pub fn has_pending_revert(&self) -> bool {
        self.revert_at.is_some()
    }

    /// Handle one activation at time `now`.
    ///
    /// On success the label swaps to the confirmation text and the revert
    /// deadline is set; an activation while a revert is already pending
    /// replaces the deadline (cancel-and-restart). On clipboard failure
    /// nothing changes apart from a log line.
    pub fn activate(&mut self, clipboard: &mut dyn Clipboard, now: Instant) {
        if let Err(e) = clipboard.write_text(&self.target_url) {
            debug!("enhance"; "copy failed: {e}");
            return;
        }
        self.label = COPIED_LABEL.to_string();
        self.revert_at = Some(now + REVERT_AFTER);
    }

    /// Advance time; reverts the label once the deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.revert_at.is_some_and(|deadline| now >= deadline) {
            self.label = self.idle_label.clone();
            self.revert_at = None;
        }
    }
}
