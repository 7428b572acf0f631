// src/watch/mod.rs

//! File watching.
//!
//! This module wires up a cross-platform filesystem watcher (`notify`) over
//! the source subtree and turns every change event into a rebuild trigger.
//! There is deliberately no path filtering and no debouncing: any event
//! under the watched root means "rebuild" — coalescing of bursts happens in
//! the engine's rebuild slot, not here.

pub mod watcher;

pub use watcher::{spawn_watcher, WatcherHandle};
