// src/watch/mod.rs

//! Snapshot change detection.
//!
//! This module is responsible for:
//! - Wiring up a cross-platform filesystem watcher (`notify`) on the snapshot.
//! - Content hashing, so the runtime can skip recomputation when a write did
//!   not actually change the snapshot.
//!
//! It does **not** know about scheduling; it only turns filesystem changes
//! into runtime events.

pub mod hash;
pub mod watcher;

pub use hash::compute_content_hash;
pub use watcher::{spawn_watcher, WatcherHandle};
