// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Deterministic ownership of resource names across replicas

use crate::sharding::OwnershipAssignment;

/// CRC-32 (IEEE) of the name's bytes. Identical on every replica and across restarts.
pub fn stable_hash(name: &str) -> u32 {
    crc32fast::hash(name.as_bytes())
}

/// Decides whether this replica owns a resource name.
///
/// A name is owned iff `stable_hash(name) % shard_count == shard_index`, so for
/// a fixed shard count exactly one index owns any given name.
#[derive(Debug, Clone)]
pub struct Partitioner {
    assignment: OwnershipAssignment,
}

impl Partitioner {
    pub fn new(assignment: OwnershipAssignment) -> Self {
        Self { assignment }
    }

    pub fn assignment(&self) -> OwnershipAssignment {
        self.assignment
    }

    pub fn owns(&self, name: &str) -> bool {
        self.owner_of(name) == self.assignment.shard_index
    }

    /// The shard index owning `name` under this partitioner's shard count
    pub fn owner_of(&self, name: &str) -> u32 {
        if self.assignment.shard_count == 1 {
            return 0;
        }
        stable_hash(name) % self.assignment.shard_count
    }

    /// Move to the next shard, wrapping around. Only for tests and debugging.
    pub fn advance(&mut self) {
        self.assignment.shard_index =
            (self.assignment.shard_index + 1) % self.assignment.shard_count;
    }
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new(OwnershipAssignment::single())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: &[&str] = &[
        "in-bucket",
        "not-in-bucket",
        "app-config",
        "db-credentials",
        "tls",
        "",
        "a",
        "kube-root-ca.crt",
        "frontend-env",
        "grafana-datasources",
    ];

    fn partitioner(shard_index: u32, shard_count: u32) -> Partitioner {
        Partitioner::new(OwnershipAssignment::new(shard_index, shard_count).unwrap())
    }

    #[test]
    fn test_stable_hash_is_crc32() {
        // Standard CRC-32 check value
        assert_eq!(stable_hash("123456789"), 0xCBF4_3926);
        assert_eq!(stable_hash(""), 0);
    }

    #[test]
    fn test_exactly_one_shard_owns_each_name() {
        for shard_count in 1..=7 {
            for name in NAMES {
                let owners = (0..shard_count)
                    .filter(|&i| partitioner(i, shard_count).owns(name))
                    .count();
                assert_eq!(owners, 1, "name {:?} with {} shards", name, shard_count);
            }
        }
    }

    #[test]
    fn test_single_shard_owns_everything() {
        let p = Partitioner::default();
        for name in NAMES {
            assert!(p.owns(name));
        }
    }

    #[test]
    fn test_owner_of_matches_owns() {
        let p = partitioner(0, 5);
        for name in NAMES {
            let owner = p.owner_of(name);
            assert!(partitioner(owner, 5).owns(name));
        }
    }

    #[test]
    fn test_advance_flips_ownership_with_two_shards() {
        for name in NAMES {
            let mut p = partitioner(0, 2);
            let before = p.owns(name);
            p.advance();
            assert_eq!(p.assignment().shard_index, 1);
            assert_ne!(before, p.owns(name));
        }
    }

    #[test]
    fn test_advance_wraps_around() {
        let mut p = partitioner(2, 3);
        p.advance();
        assert_eq!(p.assignment().shard_index, 0);

        let mut single = Partitioner::default();
        single.advance();
        assert_eq!(single.assignment().shard_index, 0);
        assert!(single.owns("anything"));
    }

    #[test]
    fn test_ownership_is_deterministic() {
        let a = partitioner(1, 4);
        let b = partitioner(1, 4);
        for name in NAMES {
            assert_eq!(a.owns(name), b.owns(name));
        }
    }
}
