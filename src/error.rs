// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::types::{WatchedResourceKind, Workload};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReloaderError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to resolve dependents of {kind} {namespace}/{name}: {source}")]
    ResolutionError {
        kind: WatchedResourceKind,
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to terminate {} workload(s): {0}", .0.len())]
    PartialTermination(#[from] AggregateError),
}

pub type Result<T> = std::result::Result<T, ReloaderError>;

/// A single workload that could not be terminated
#[derive(Debug)]
pub struct TerminationFailure {
    pub workload: Workload,
    pub source: kube::Error,
}

impl TerminationFailure {
    /// The workload was already gone when the delete was issued
    pub fn is_not_found(&self) -> bool {
        matches!(&self.source, kube::Error::Api(err) if err.code == 404)
    }
}

impl fmt::Display for TerminationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.workload, self.source)
    }
}

/// Ordered collection of independent termination failures.
///
/// Displays every failure, separated by `; `.
#[derive(Debug, Default)]
pub struct AggregateError {
    failures: Vec<TerminationFailure>,
}

impl AggregateError {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, workload: Workload, source: kube::Error) {
        self.failures.push(TerminationFailure { workload, source });
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TerminationFailure> {
        self.failures.iter()
    }

    /// True when every failure is a not-found
    pub fn all_not_found(&self) -> bool {
        self.failures.iter().all(TerminationFailure::is_not_found)
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}
