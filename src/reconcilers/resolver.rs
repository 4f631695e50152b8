// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Dependent resolver - finds the pods that declare a dependency on a resource.

use crate::error::{ReloaderError, Result};
use crate::kubernetes::list_pods;
use crate::types::{WatchedResourceKind, Workload};
use kube::Client;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct DependentResolver {
    client: Client,
}

impl DependentResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Pods in `namespace` labelled `<kind label>=<name>`.
    ///
    /// No dependents is an empty list, not an error.
    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        kind: WatchedResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<Vec<Workload>> {
        let labels = BTreeMap::from([(kind.label_key(), name)]);

        let pods = list_pods(&self.client, namespace, &labels)
            .await
            .map_err(|source| ReloaderError::ResolutionError {
                kind,
                namespace: namespace.to_string(),
                name: name.to_string(),
                source,
            })?;

        debug!("{} {}/{} has {} dependent pod(s)", kind, namespace, name, pods.len());

        Ok(pods
            .iter()
            .map(|pod| Workload::from_pod(pod, namespace))
            .collect())
    }
}
