// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{AggregateError, ReloaderError};
use k8s_openapi::api::core::v1::Pod;
use kube::ResourceExt;
use std::collections::BTreeMap;
use std::fmt;

/// Read-only projection of a pod that depends on a watched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
}

impl Workload {
    /// Project a pod, falling back to `namespace` when the pod carries none
    pub fn from_pod(pod: &Pod, namespace: &str) -> Self {
        Self {
            name: pod.name_any(),
            namespace: pod.namespace().unwrap_or_else(|| namespace.to_string()),
            labels: pod.labels().clone(),
        }
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Result of one termination round: every workload attempted and what failed
#[derive(Debug, Default)]
pub struct TerminationOutcome {
    pub attempted: Vec<Workload>,
    pub failures: AggregateError,
}

impl TerminationOutcome {
    /// Workloads that were terminated successfully
    pub fn terminated(&self) -> Vec<&Workload> {
        let failed: Vec<&Workload> = self.failures.iter().map(|f| &f.workload).collect();
        self.attempted
            .iter()
            .filter(|w| !failed.contains(w))
            .collect()
    }

    pub fn into_result(self) -> Result<Vec<Workload>, ReloaderError> {
        if self.failures.is_empty() {
            Ok(self.attempted)
        } else {
            Err(ReloaderError::PartialTermination(self.failures))
        }
    }
}
