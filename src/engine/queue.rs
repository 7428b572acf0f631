// src/engine/queue.rs

use tracing::debug;

/// Single-slot rebuild queue.
///
/// Filesystem events can arrive faster than builds complete (an editor save
/// often produces several events at once). Rather than starting overlapping
/// builds whose output writes would race, the slot serializes them:
///
/// - A trigger while idle starts a build.
/// - A trigger while a build is in flight sets a single pending bit; any
///   number of triggers during one build collapse into exactly one
///   follow-up build.
/// - When the in-flight build finishes and the pending bit is set, one new
///   build starts immediately.
#[derive(Debug, Default)]
pub struct RebuildSlot {
    building: bool,
    pending: bool,
}

impl RebuildSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_building(&self) -> bool {
        self.building
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Record a rebuild trigger. Returns true if a build should start now;
    /// false if one is already in flight and the trigger was queued.
    pub fn on_trigger(&mut self) -> bool {
        if self.building {
            self.pending = true;
            debug!("build in flight; coalesced trigger into pending rebuild");
            false
        } else {
            self.building = true;
            true
        }
    }

    /// Record that the in-flight build finished. Returns true if a queued
    /// follow-up build should start now (the slot stays busy in that case).
    pub fn on_build_finished(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            debug!("starting queued follow-up build");
            true
        } else {
            self.building = false;
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_while_idle_starts_build() {
        let mut slot = RebuildSlot::new();
        assert!(slot.on_trigger());
        assert!(slot.is_building());
        assert!(!slot.has_pending());
    }

    #[test]
    fn triggers_while_building_coalesce() {
        let mut slot = RebuildSlot::new();
        assert!(slot.on_trigger());

        // A burst of events during the build queues exactly one follow-up.
        assert!(!slot.on_trigger());
        assert!(!slot.on_trigger());
        assert!(!slot.on_trigger());
        assert!(slot.has_pending());

        assert!(slot.on_build_finished());
        assert!(slot.is_building());
        assert!(!slot.has_pending());

        // Follow-up build finishes with nothing queued behind it.
        assert!(!slot.on_build_finished());
        assert!(!slot.is_building());
    }

    #[test]
    fn finish_without_pending_returns_to_idle() {
        let mut slot = RebuildSlot::new();
        assert!(slot.on_trigger());
        assert!(!slot.on_build_finished());
        assert!(!slot.is_building());

        // Next trigger starts a fresh build.
        assert!(slot.on_trigger());
    }
}
