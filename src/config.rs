// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{env as vars, OPERATOR_NAME};
use crate::sharding::OwnershipAssignment;
use anyhow::{Context, Result};
use std::env;
use tracing::warn;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Also restart dependents when a watched resource is deleted
    pub terminate_on_delete: bool,
    /// Restrict watches to a single namespace
    pub watch_namespace: Option<String>,
    pub shard_count: u32,
    /// Explicit shard index; derived from `identity` when unset
    pub shard_index: Option<u32>,
    /// Stable process identity, normally the pod name
    pub identity: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let terminate_on_delete = lookup(vars::TERMINATE_ON_DELETE)
            .or_else(|| lookup(vars::KILL_ON_DELETE))
            .map(|v| {
                parse_bool(&v).unwrap_or_else(|| {
                    warn!("Ignoring invalid boolean '{}' for terminate-on-delete", v);
                    false
                })
            })
            .unwrap_or(false);

        let shard_count = match lookup(vars::SHARD_COUNT) {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .with_context(|| format!("{} must be a positive integer, got '{}'", vars::SHARD_COUNT, v))?,
            None => 1,
        };

        let shard_index = lookup(vars::SHARD_INDEX)
            .map(|v| {
                v.trim()
                    .parse::<u32>()
                    .with_context(|| format!("{} must be a non-negative integer, got '{}'", vars::SHARD_INDEX, v))
            })
            .transpose()?;

        let identity = lookup(vars::POD_NAME)
            .or_else(|| lookup(vars::HOSTNAME))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| OPERATOR_NAME.to_string());

        let watch_namespace = lookup(vars::WATCH_NAMESPACE).filter(|s| !s.is_empty());

        let config = Config {
            terminate_on_delete,
            watch_namespace,
            shard_count,
            shard_index,
            identity,
        };

        // Fail at startup rather than on the first event
        config.ownership()?;

        Ok(config)
    }

    /// The shard assignment of this replica
    pub fn ownership(&self) -> Result<OwnershipAssignment> {
        let assignment = match self.shard_index {
            Some(index) => OwnershipAssignment::new(index, self.shard_count),
            None => OwnershipAssignment::from_identity(&self.identity, self.shard_count),
        };
        assignment.context("Invalid shard configuration")
    }
}

/// Boolean parsing with the spellings operators commonly use in manifests
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
