// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Resource watcher - streams ConfigMap or Secret changes into a reconcile loop.

use crate::config::Config;
use crate::reconcilers::ReconcileHandle;
use crate::types::WatchedResourceKind;
use crate::watch::{ChangeTracker, WatchRegistration};
use futures::StreamExt;
use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};
use kube_runtime::watcher::{self, Config as WatcherConfig};
use kube_runtime::WatchStreamExt;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct ResourceWatcher {
    client: Client,
    kind: WatchedResourceKind,
    namespace: Option<String>,
    registration: WatchRegistration,
    handle: ReconcileHandle,
}

impl ResourceWatcher {
    pub fn new(
        client: Client,
        kind: WatchedResourceKind,
        config: &Config,
        handle: ReconcileHandle,
    ) -> Self {
        Self {
            client,
            kind,
            namespace: config.watch_namespace.clone(),
            registration: WatchRegistration {
                deletes: config.terminate_on_delete,
            },
            handle,
        }
    }

    pub async fn run(self, shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        match self.kind {
            WatchedResourceKind::ConfigMap => self.watch::<ConfigMap>(shutdown).await,
            WatchedResourceKind::Secret => self.watch::<Secret>(shutdown).await,
        }
    }

    async fn watch<K>(self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()>
    where
        K: Resource<DynamicType = (), Scope = NamespaceResourceScope>
            + Clone
            + DeserializeOwned
            + Debug
            + Send
            + Sync
            + 'static,
    {
        let api: Api<K> = match &self.namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };

        let mut tracker = ChangeTracker::new(self.kind, self.registration);
        let stream = watcher::watcher(api, WatcherConfig::default()).default_backoff();
        futures::pin_mut!(stream);

        if self.registration.deletes {
            debug!("Watching {}s for delete events", self.kind);
        }
        info!(
            "Watching {}s in {}",
            self.kind,
            self.namespace.as_deref().unwrap_or("all namespaces")
        );

        loop {
            let next = tokio::select! {
                biased;
                _ = shutdown.wait_for(|stop| *stop) => {
                    info!("Stopping {} watcher", self.kind);
                    break;
                }
                next = stream.next() => next,
            };

            match next {
                Some(Ok(event)) => {
                    for change in tracker.observe(event) {
                        self.handle.send(change).await;
                    }
                }
                Some(Err(e)) => warn!("Watch error for {}s: {}", self.kind, e),
                None => {
                    warn!("Watch stream for {}s ended", self.kind);
                    break;
                }
            }
        }

        Ok(())
    }
}
