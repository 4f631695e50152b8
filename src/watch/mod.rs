// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch boundary: Kubernetes watch streams in, typed change events out.

pub mod tracker;
pub mod watcher;

pub use tracker::{ChangeTracker, WatchRegistration};
pub use watcher::ResourceWatcher;
