// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Domain types shared by the watchers and reconcilers.

pub mod resource;
pub mod workload;

pub use resource::{ChangeType, ResourceChangeEvent, WatchedResourceKind};
pub use workload::{TerminationOutcome, Workload};
