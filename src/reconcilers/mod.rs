// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation pipeline: dependent resolution, termination and the per-kind loop.

pub mod controller;
pub mod executor;
pub mod resolver;

pub use controller::{reconcile, PassOutcome, ReconcileContext, ReconcileHandle, ReconcileLoop};
pub use executor::TerminationExecutor;
pub use resolver::DependentResolver;
