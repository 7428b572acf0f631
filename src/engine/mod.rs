// src/engine/mod.rs

//! Orchestration engine for stitch.
//!
//! This module ties together:
//! - the rebuild slot (what happens when triggers arrive while a build is
//!   already in flight)
//! - the main runtime event loop that reacts to:
//!   - file-watch triggers
//!   - build completion events
//!   - shutdown signals

pub mod queue;
pub mod runtime;

pub use queue::RebuildSlot;
pub use runtime::{BuildOutcome, Runtime, RuntimeEvent, RuntimeOptions, TriggerReason};
