// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking the Kubernetes pod API.

use http::{Request, Response};
use k8s_openapi::api::core::v1::{Pod, PodStatus};
use kube::api::ObjectMeta;
use kube::client::Body;
use kube::Client;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service acting as an in-memory pod store.
///
/// Serves pod list (with equality label selectors) and pod delete for
/// `/api/v1/namespaces/{ns}/pods`, and records every request it sees.
#[derive(Clone)]
pub struct MockService {
    pods: Arc<Mutex<Vec<Pod>>>,
    list_failure: Arc<Mutex<Option<(u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            pods: Arc::new(Mutex::new(Vec::new())),
            list_failure: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed the store with pods
    pub fn with_pods(self, pods: Vec<Pod>) -> Self {
        self.pods.lock().unwrap().extend(pods);
        self
    }

    /// Make every pod list request fail with the given status
    pub fn fail_lists(self, status: u16, body: &str) -> Self {
        *self.list_failure.lock().unwrap() = Some((status, body.to_string()));
        self
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// Names of the pods still present in `namespace`
    pub fn pod_names(&self, namespace: &str) -> Vec<String> {
        self.pods
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.metadata.namespace.as_deref() == Some(namespace))
            .filter_map(|p| p.metadata.name.clone())
            .collect()
    }

    /// `(method, path)` of every request received so far
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of DELETE requests received so far
    pub fn delete_count(&self) -> usize {
        self.requests()
            .iter()
            .filter(|(method, _)| method == "DELETE")
            .count()
    }

    fn handle(&self, method: &str, path: &str, query: Option<&str>) -> (u16, String) {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), path.to_string()));

        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match (method, segments.as_slice()) {
            ("GET", ["api", "v1", "namespaces", namespace, "pods"]) => {
                self.list(namespace, query)
            }
            ("DELETE", ["api", "v1", "namespaces", namespace, "pods", name]) => {
                self.delete(namespace, name)
            }
            _ => (404, not_found_json("resource", path)),
        }
    }

    fn list(&self, namespace: &str, query: Option<&str>) -> (u16, String) {
        if let Some(failure) = self.list_failure.lock().unwrap().clone() {
            return failure;
        }

        let selector = label_selector_from_query(query);
        let items: Vec<Pod> = self
            .pods
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.metadata.namespace.as_deref() == Some(namespace))
            .filter(|p| {
                let labels = p.metadata.labels.clone().unwrap_or_default();
                selector
                    .iter()
                    .all(|(k, v)| labels.get(k).is_some_and(|actual| actual == v))
            })
            .cloned()
            .collect();

        let body = serde_json::json!({
            "apiVersion": "v1",
            "kind": "PodList",
            "metadata": { "resourceVersion": "1" },
            "items": items,
        });
        (200, body.to_string())
    }

    fn delete(&self, namespace: &str, name: &str) -> (u16, String) {
        let mut pods = self.pods.lock().unwrap();
        let position = pods.iter().position(|p| {
            p.metadata.namespace.as_deref() == Some(namespace)
                && p.metadata.name.as_deref() == Some(name)
        });

        match position {
            Some(index) => {
                let pod = pods.remove(index);
                (200, serde_json::to_string(&pod).unwrap())
            }
            None => (404, not_found_json("pods", name)),
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let (status, body) = self.handle(
            req.method().as_str(),
            req.uri().path(),
            req.uri().query(),
        );

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Equality requirements of the `labelSelector` query parameter
fn label_selector_from_query(query: Option<&str>) -> Vec<(String, String)> {
    let Some(query) = query else {
        return Vec::new();
    };

    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "labelSelector")
        .flat_map(|(_, selector)| {
            selector
                .split(',')
                .filter_map(|req| req.split_once('='))
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Create a running pod with the given labels
pub fn make_pod(name: &str, namespace: &str, labels: &[(&str, &str)]) -> Pod {
    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            labels: Some(
                labels
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect::<BTreeMap<_, _>>(),
            ),
            ..Default::default()
        },
        status: Some(PodStatus {
            phase: Some("Running".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a 403 forbidden response
pub fn forbidden_json(resource: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} is forbidden: access denied", resource),
        "reason": "Forbidden",
        "code": 403
    })
    .to_string()
}
