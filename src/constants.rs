// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Pod label keys through which workloads declare their dependencies
pub mod labels {
    /// Value is the name of a ConfigMap in the pod's namespace
    pub const CONFIGMAP: &str = "reloader/configmap";
    /// Value is the name of a Secret in the pod's namespace
    pub const SECRET: &str = "reloader/secret";
}

/// The operator name, also the fallback process identity
pub const OPERATOR_NAME: &str = "reloader";

/// Environment variables read by `Config::from_env`
pub mod env {
    pub const TERMINATE_ON_DELETE: &str = "TERMINATE_ON_DELETE";
    /// Older name for `TERMINATE_ON_DELETE`
    pub const KILL_ON_DELETE: &str = "KILL_ON_DELETE";
    pub const SHARD_COUNT: &str = "SHARD_COUNT";
    pub const SHARD_INDEX: &str = "SHARD_INDEX";
    pub const POD_NAME: &str = "POD_NAME";
    pub const HOSTNAME: &str = "HOSTNAME";
    pub const WATCH_NAMESPACE: &str = "WATCH_NAMESPACE";
}

/// Capacity of the event channel between a watcher and its reconcile loop
pub const EVENT_CHANNEL_CAPACITY: usize = 256;
