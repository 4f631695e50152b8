// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Pod listing and deletion

use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::{DeleteParams, ListParams},
    Api, Client,
};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Render an equality-based label selector, e.g. `reloader/configmap=app-config`
pub fn label_selector(labels: &BTreeMap<&str, &str>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(",")
}

/// List the pods in `namespace` matching every label in `labels`
#[instrument(skip(client))]
pub async fn list_pods(
    client: &Client,
    namespace: &str,
    labels: &BTreeMap<&str, &str>,
) -> Result<Vec<Pod>, kube::Error> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    let lp = ListParams::default().labels(&label_selector(labels));

    let pod_list = pods.list(&lp).await?;
    debug!("Found {} pods in {}", pod_list.items.len(), namespace);

    Ok(pod_list.items)
}

/// Delete a single pod, leaving its controller to recreate it
#[instrument(skip(client))]
pub async fn delete_pod(client: &Client, namespace: &str, name: &str) -> Result<(), kube::Error> {
    let pods: Api<Pod> = Api::namespaced(client.clone(), namespace);
    pods.delete(name, &DeleteParams::default()).await?;
    Ok(())
}
