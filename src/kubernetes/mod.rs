// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes API helpers for the pods this operator restarts.

pub mod pods;

pub use pods::{delete_pod, label_selector, list_pods};
