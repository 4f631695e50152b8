// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Shard assignment for a controller replica

use crate::error::{ReloaderError, Result};
use crate::sharding::stable_hash;
use std::fmt;

/// Which partition of the resource-name hash space this replica owns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipAssignment {
    pub shard_index: u32,
    pub shard_count: u32,
}

impl OwnershipAssignment {
    pub fn new(shard_index: u32, shard_count: u32) -> Result<Self> {
        if shard_count == 0 {
            return Err(ReloaderError::ConfigError(
                "shard count must be at least 1".to_string(),
            ));
        }
        if shard_index >= shard_count {
            return Err(ReloaderError::ConfigError(format!(
                "shard index {} out of range for {} shard(s)",
                shard_index, shard_count
            )));
        }
        Ok(Self {
            shard_index,
            shard_count,
        })
    }

    /// A single replica owning every name
    pub fn single() -> Self {
        Self {
            shard_index: 0,
            shard_count: 1,
        }
    }

    /// Derive the assignment from a stable process identity.
    ///
    /// StatefulSet pods (`reloader-2`) use their ordinal, anything else
    /// falls back to hashing the identity.
    pub fn from_identity(identity: &str, shard_count: u32) -> Result<Self> {
        if shard_count == 0 {
            return Self::new(0, shard_count);
        }
        let shard_index = match ordinal_suffix(identity) {
            Some(ordinal) => ordinal % shard_count,
            None => stable_hash(identity) % shard_count,
        };
        Self::new(shard_index, shard_count)
    }
}

impl fmt::Display for OwnershipAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.shard_index, self.shard_count)
    }
}

fn ordinal_suffix(identity: &str) -> Option<u32> {
    let (prefix, suffix) = identity.rsplit_once('-')?;
    if prefix.is_empty() || suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}
