// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Reconcile loop - turns resource change events into pod restarts.

use crate::constants::EVENT_CHANNEL_CAPACITY;
use crate::error::ReloaderError;
use crate::reconcilers::{DependentResolver, TerminationExecutor};
use crate::sharding::Partitioner;
use crate::types::{ResourceChangeEvent, WatchedResourceKind};
use kube::Client;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

/// Everything a reconcile pass needs, handed to each loop at construction
pub struct ReconcileContext {
    pub partitioner: Arc<Partitioner>,
    pub resolver: DependentResolver,
    pub executor: TerminationExecutor,
}

impl ReconcileContext {
    pub fn new(client: Client, partitioner: Arc<Partitioner>) -> Self {
        Self {
            partitioner,
            resolver: DependentResolver::new(client.clone()),
            executor: TerminationExecutor::new(client),
        }
    }
}

/// How a single reconcile pass ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Another replica owns the resource
    NotOwned,
    NoDependents,
    Terminated(usize),
    ResolutionFailed,
    PartiallyTerminated { attempted: usize, failed: usize },
}

/// Handle one change event: ownership check, dependent lookup, termination.
///
/// Updates and deletes share this pipeline. Errors are logged here and never
/// leave the pass.
#[instrument(skip(event, ctx), fields(kind = %event.kind, resource = %event.resource(), change = ?event.change))]
pub async fn reconcile(event: &ResourceChangeEvent, ctx: &ReconcileContext) -> PassOutcome {
    if !ctx.partitioner.owns(&event.name) {
        debug!(
            "Skipping {}, owned by shard {}",
            event.resource(),
            ctx.partitioner.owner_of(&event.name)
        );
        return PassOutcome::NotOwned;
    }

    debug!("Handling {} {:?}", event.resource(), event.change);

    let workloads = match ctx
        .resolver
        .resolve(event.kind, &event.namespace, &event.name)
        .await
    {
        Ok(w) => w,
        Err(e) => {
            error!("Failed to list dependent pods: {}", e);
            return PassOutcome::ResolutionFailed;
        }
    };

    if workloads.is_empty() {
        debug!("No pods depend on {} {}", event.kind, event.resource());
        return PassOutcome::NoDependents;
    }

    info!(
        "{} {} changed, restarting {} dependent pod(s)",
        event.kind,
        event.resource(),
        workloads.len()
    );

    let outcome = ctx.executor.terminate(&workloads).await;
    let attempted = outcome.attempted.len();

    match outcome.into_result() {
        Ok(terminated) => {
            info!("Restarted {} pod(s)", terminated.len());
            PassOutcome::Terminated(terminated.len())
        }
        Err(ReloaderError::PartialTermination(failures)) => {
            for failure in failures.iter() {
                if failure.is_not_found() {
                    debug!("Pod {} already gone", failure.workload);
                } else {
                    warn!("Failed to delete pod {}: {}", failure.workload, failure.source);
                }
            }
            error!(
                already_gone = failures.all_not_found(),
                "Failed to kill pods: {}", failures
            );
            PassOutcome::PartiallyTerminated {
                attempted,
                failed: failures.len(),
            }
        }
        Err(e) => {
            error!("Failed to kill pods: {}", e);
            PassOutcome::PartiallyTerminated {
                attempted,
                failed: attempted,
            }
        }
    }
}

/// Single consumer of the change events for one resource kind.
/// Events are handled serially, in delivery order.
pub struct ReconcileLoop {
    kind: WatchedResourceKind,
    ctx: Arc<ReconcileContext>,
    event_rx: mpsc::Receiver<ResourceChangeEvent>,
}

/// Handle to send events to a ReconcileLoop
#[derive(Clone)]
pub struct ReconcileHandle {
    event_tx: mpsc::Sender<ResourceChangeEvent>,
}

impl ReconcileHandle {
    pub async fn send(&self, event: ResourceChangeEvent) {
        if let Err(e) = self.event_tx.send(event).await {
            error!("Failed to send event to reconcile loop: {}", e);
        }
    }
}

impl ReconcileLoop {
    pub fn new(kind: WatchedResourceKind, ctx: Arc<ReconcileContext>) -> (Self, ReconcileHandle) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        let reconcile_loop = Self {
            kind,
            ctx,
            event_rx,
        };

        let handle = ReconcileHandle { event_tx };
        (reconcile_loop, handle)
    }

    /// Drain events until every sender is gone or shutdown is signalled.
    /// A pass that has started always runs to completion.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        info!("Reconcile loop for {}s started", self.kind);

        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => {
                    info!("Reconcile loop for {}s shutting down", self.kind);
                    break;
                }
                event = self.event_rx.recv() => match event {
                    Some(event) => event,
                    None => {
                        info!("Event channel for {}s closed", self.kind);
                        break;
                    }
                },
            };

            if event.kind != self.kind {
                warn!("Dropping {} event on the {} loop", event.kind, self.kind);
                continue;
            }

            reconcile(&event, &self.ctx).await;
        }

        Ok(())
    }
}
