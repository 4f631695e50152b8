// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Termination executor - deletes dependent pods so their owners recreate them.

use crate::error::AggregateError;
use crate::kubernetes::delete_pod;
use crate::types::{TerminationOutcome, Workload};
use futures::future::join_all;
use kube::Client;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct TerminationExecutor {
    client: Client,
}

impl TerminationExecutor {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Issue one delete per workload. Every workload is attempted exactly once,
    /// regardless of how the others fare.
    #[instrument(skip(self, workloads), fields(count = workloads.len()))]
    pub async fn terminate(&self, workloads: &[Workload]) -> TerminationOutcome {
        let results = join_all(
            workloads
                .iter()
                .map(|w| delete_pod(&self.client, &w.namespace, &w.name)),
        )
        .await;

        let mut failures = AggregateError::new();
        for (workload, result) in workloads.iter().zip(results) {
            match result {
                Ok(()) => debug!("Terminated pod {}", workload),
                Err(e) => failures.push(workload.clone(), e),
            }
        }

        TerminationOutcome {
            attempted: workloads.to_vec(),
            failures,
        }
    }
}
