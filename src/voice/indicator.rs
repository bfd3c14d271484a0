//! Transient on-screen indicators that hide themselves after a timeout.

use std::time::{Duration, Instant};

/// A flag that is visible until a deadline passes
#[derive(Debug, Clone, Default)]
pub struct TransientIndicator {
    visible: bool,
    /// `None` while visible means the timeout is too large to represent
    hide_at: Option<Instant>,
}

impl TransientIndicator {
    /// Show (or re-arm) until `now + ttl`
    pub fn show(&mut self, now: Instant, ttl: Duration) {
        self.visible = true;
        self.hide_at = now.checked_add(ttl);
        if self.hide_at.is_none() {
            tracing::debug!("Indicator timeout {:?} out of range; stays until hidden", ttl);
        }
    }

    /// Hide immediately. Returns true if it was visible.
    pub fn hide(&mut self) -> bool {
        self.hide_at = None;
        std::mem::take(&mut self.visible)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide if the deadline has passed. Returns true on the transition.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if self.visible && now >= deadline => self.hide(),
            _ => false,
        }
    }
}
