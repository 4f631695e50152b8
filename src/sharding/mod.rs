// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Partitioning of watched resource names across controller replicas.

pub mod assignment;
pub mod partitioner;

pub use assignment::OwnershipAssignment;
pub use partitioner::{stable_hash, Partitioner};
