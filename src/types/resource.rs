// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::labels;
use kube::{Resource, ResourceExt};
use std::fmt;

/// The configuration resources whose changes trigger pod restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchedResourceKind {
    ConfigMap,
    Secret,
}

impl WatchedResourceKind {
    /// Pod label key through which a workload declares a dependency on this kind
    pub fn label_key(&self) -> &'static str {
        match self {
            WatchedResourceKind::ConfigMap => labels::CONFIGMAP,
            WatchedResourceKind::Secret => labels::SECRET,
        }
    }

    /// Kubernetes API kind name
    pub fn api_kind(&self) -> &'static str {
        match self {
            WatchedResourceKind::ConfigMap => "ConfigMap",
            WatchedResourceKind::Secret => "Secret",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchedResourceKind::ConfigMap => "configmap",
            WatchedResourceKind::Secret => "secret",
        }
    }
}

impl fmt::Display for WatchedResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Updated,
    Deleted,
}

/// A change notification for a watched resource, classified at the watch boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChangeEvent {
    pub kind: WatchedResourceKind,
    pub change: ChangeType,
    pub name: String,
    pub namespace: String,
}

impl ResourceChangeEvent {
    pub fn updated(kind: WatchedResourceKind, namespace: &str, name: &str) -> Self {
        Self {
            kind,
            change: ChangeType::Updated,
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }

    pub fn deleted(kind: WatchedResourceKind, namespace: &str, name: &str) -> Self {
        Self {
            kind,
            change: ChangeType::Deleted,
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }

    /// Build an event from a watched object's metadata
    pub fn for_object<K: Resource>(kind: WatchedResourceKind, change: ChangeType, obj: &K) -> Self {
        Self {
            kind,
            change,
            name: obj.name_any(),
            namespace: obj.namespace().unwrap_or_default(),
        }
    }

    /// `namespace/name`, as used in log messages
    pub fn resource(&self) -> String {
        format!("{}/{}", self.namespace, self.name)
    }
}
