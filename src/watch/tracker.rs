// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Classification of raw watch events into update and delete notifications

use crate::types::{ChangeType, ResourceChangeEvent, WatchedResourceKind};
use kube::{Resource, ResourceExt};
use kube_runtime::watcher::Event;
use std::collections::HashMap;

/// Which handlers are registered for a watched kind. Updates always are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchRegistration {
    pub deletes: bool,
}

type ObjectKey = (String, String);

/// Remembers the last seen resource version of every watched object, so that
/// adds and no-op resyncs can be told apart from real updates.
#[derive(Debug)]
pub struct ChangeTracker {
    kind: WatchedResourceKind,
    registration: WatchRegistration,
    known: HashMap<ObjectKey, String>,
    relist: Option<HashMap<ObjectKey, String>>,
    synced: bool,
}

impl ChangeTracker {
    pub fn new(kind: WatchedResourceKind, registration: WatchRegistration) -> Self {
        Self {
            kind,
            registration,
            known: HashMap::new(),
            relist: None,
            synced: false,
        }
    }

    /// Translate one watch event into zero or more change events.
    ///
    /// Objects of another API kind are discarded silently.
    pub fn observe<K>(&mut self, event: Event<K>) -> Vec<ResourceChangeEvent>
    where
        K: Resource<DynamicType = ()>,
    {
        if K::kind(&()) != self.kind.api_kind() {
            return Vec::new();
        }

        match event {
            Event::Init => {
                self.relist = Some(HashMap::new());
                Vec::new()
            }
            Event::InitApply(obj) => {
                let (key, version) = key_of(&obj);
                // Changed while the watch was down
                let changed = self.synced && self.known.get(&key).is_some_and(|v| *v != version);
                self.relist
                    .get_or_insert_with(HashMap::new)
                    .insert(key, version);
                if changed {
                    vec![ResourceChangeEvent::for_object(self.kind, ChangeType::Updated, &obj)]
                } else {
                    Vec::new()
                }
            }
            Event::InitDone => {
                let relisted = self.relist.take().unwrap_or_default();
                let mut events = Vec::new();
                if self.synced && self.registration.deletes {
                    let mut gone: Vec<&ObjectKey> = self
                        .known
                        .keys()
                        .filter(|key| !relisted.contains_key(*key))
                        .collect();
                    gone.sort();
                    events = gone
                        .into_iter()
                        .map(|(namespace, name)| ResourceChangeEvent::deleted(self.kind, namespace, name))
                        .collect();
                }
                self.known = relisted;
                self.synced = true;
                events
            }
            Event::Apply(obj) => {
                let (key, version) = key_of(&obj);
                match self.known.insert(key, version.clone()) {
                    Some(previous) if previous != version => {
                        vec![ResourceChangeEvent::for_object(self.kind, ChangeType::Updated, &obj)]
                    }
                    // Added, or nothing changed
                    _ => Vec::new(),
                }
            }
            Event::Delete(obj) => {
                let (key, _) = key_of(&obj);
                self.known.remove(&key);
                if self.registration.deletes {
                    vec![ResourceChangeEvent::for_object(self.kind, ChangeType::Deleted, &obj)]
                } else {
                    Vec::new()
                }
            }
        }
    }
}

fn key_of<K: Resource>(obj: &K) -> (ObjectKey, String) {
    (
        (obj.namespace().unwrap_or_default(), obj.name_any()),
        obj.resource_version().unwrap_or_default(),
    )
}
