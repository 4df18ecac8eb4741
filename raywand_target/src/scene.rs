// Copyright 2025 the Raywand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A minimal scene registry implementing the lookup traits.

use core::hash::Hash;

use hashbrown::HashMap;

use crate::{Capability, CapabilityLookup, ParentLookup};

#[derive(Clone, Copy, Debug)]
struct Record<K> {
    parent: Option<K>,
    capabilities: Capability,
}

/// Parent links and capability sets for hosts without their own scene graph.
///
/// `SceneMap` is a flat registry: each inserted object records an optional
/// parent and a [`Capability`] set. It implements both [`ParentLookup`] and
/// [`CapabilityLookup`], so it plugs directly into a dispatcher. Removal is
/// shallow — it drops the record for one object and leaves descendants in
/// place; reparent them first if they should survive with a live chain.
#[derive(Clone, Debug)]
pub struct SceneMap<K> {
    nodes: HashMap<K, Record<K>>,
}

impl<K: Copy + Eq + Hash> SceneMap<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Register `node` with an optional parent and its capability set.
    ///
    /// Re-inserting an existing node overwrites its record.
    pub fn insert(&mut self, node: K, parent: Option<K>, capabilities: Capability) {
        self.nodes.insert(
            node,
            Record {
                parent,
                capabilities,
            },
        );
    }

    /// Replace the capability set of a registered node.
    ///
    /// Unregistered nodes are ignored.
    pub fn set_capabilities(&mut self, node: K, capabilities: Capability) {
        if let Some(rec) = self.nodes.get_mut(&node) {
            rec.capabilities = capabilities;
        }
    }

    /// Remove a node's record. Returns `true` if the node was registered.
    pub fn remove(&mut self, node: K) -> bool {
        self.nodes.remove(&node).is_some()
    }

    /// Whether `node` is registered.
    pub fn contains(&self, node: K) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Number of registered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K: Copy + Eq + Hash> Default for SceneMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> ParentLookup<K> for SceneMap<K> {
    fn parent_of(&self, node: &K) -> Option<K> {
        self.nodes.get(node).and_then(|r| r.parent)
    }
}

impl<K: Copy + Eq + Hash> CapabilityLookup<K> for SceneMap<K> {
    fn capabilities(&self, node: &K) -> Capability {
        self.nodes
            .get(node)
            .map(|r| r.capabilities)
            .unwrap_or_else(Capability::empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve_target;

    #[test]
    fn lookups_on_empty_map() {
        let map: SceneMap<u32> = SceneMap::new();
        assert!(map.is_empty());
        assert_eq!(map.parent_of(&1), None);
        assert_eq!(map.capabilities(&1), Capability::empty());
    }

    #[test]
    fn insert_and_query() {
        let mut map = SceneMap::new();
        map.insert(1, None, Capability::EVENT_TARGET | Capability::POINTER_CLICK);
        map.insert(2, Some(1), Capability::empty());

        assert_eq!(map.len(), 2);
        assert_eq!(map.parent_of(&2), Some(1));
        assert!(map.capabilities(&1).contains(Capability::POINTER_CLICK));
    }

    #[test]
    fn reinsert_overwrites() {
        let mut map = SceneMap::new();
        map.insert(1, None, Capability::SELECT);
        map.insert(1, None, Capability::DESELECT);
        assert_eq!(map.capabilities(&1), Capability::DESELECT);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn set_capabilities_ignores_unknown_nodes() {
        let mut map: SceneMap<u32> = SceneMap::new();
        map.set_capabilities(7, Capability::SELECT);
        assert!(!map.contains(7));

        map.insert(7, None, Capability::empty());
        map.set_capabilities(7, Capability::SELECT);
        assert_eq!(map.capabilities(&7), Capability::SELECT);
    }

    #[test]
    fn remove_is_shallow() {
        let mut map = SceneMap::new();
        map.insert(1, None, Capability::EVENT_TARGET);
        map.insert(2, Some(1), Capability::empty());

        assert!(map.remove(1));
        assert!(!map.remove(1));
        // The child record survives and still names the removed parent.
        assert_eq!(map.parent_of(&2), Some(1));
    }

    #[test]
    fn resolves_through_registered_chain() {
        let mut map = SceneMap::new();
        map.insert(1, None, Capability::EVENT_TARGET | Capability::POINTER_ENTER);
        map.insert(2, Some(1), Capability::empty());
        map.insert(3, Some(2), Capability::empty());

        assert_eq!(resolve_target(3, &map, &map), 1);
    }
}
