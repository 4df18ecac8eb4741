// Copyright 2025 the Raywand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability flags and ancestor target resolution.
//!
//! Scene objects declare interest in interaction events by carrying a
//! [`Capability`] set: one flag per event kind, plus the [`Capability::EVENT_TARGET`]
//! marker used only for ancestor search. A dispatcher asks "does object `O`
//! carry capability `C`" through [`CapabilityLookup`] and silently skips
//! events for flags an object does not carry — absence is never an error.
//!
//! [`resolve_target`] implements the ancestor search: a small collider on a
//! decorative child can register its owning widget as the thing that
//! receives events, without requiring every leaf to carry handlers. The walk
//! starts at the raw hit object (inclusive) and climbs the containment chain
//! via [`ParentLookup`], returning the first ancestor marked
//! [`Capability::EVENT_TARGET`]; when no ancestor is marked, the raw object
//! itself is the target — resolution narrows or redirects, it never
//! suppresses interaction.
//!
//! The core traits are generic over the node identifier `K`, so callers can
//! use any small, copyable handle (an entity id, a slotmap key, a node id).
//! Hosts without their own scene graph can use [`SceneMap`], a minimal
//! registry that implements both lookups.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;

pub use scene::SceneMap;

bitflags::bitflags! {
    /// Capability flags a scene object may carry, any subset.
    ///
    /// Each flag names one interaction event the object wants delivered.
    /// [`Capability::EVENT_TARGET`] is different: it delivers nothing by
    /// itself and only marks an object as a resolution stop for
    /// [`resolve_target`].
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capability: u32 {
        /// Receive the pointer-enter event when the pointer starts hitting this object.
        const POINTER_ENTER = 1 << 0;
        /// Receive the pointer-exit event when the pointer stops hitting this object.
        const POINTER_EXIT = 1 << 1;
        /// Receive a per-frame stay event while the pointer rests on this object.
        const POINTER_STAY = 1 << 2;
        /// Receive the primary button press.
        const POINTER_DOWN = 1 << 3;
        /// Receive the primary button release.
        const POINTER_UP = 1 << 4;
        /// Receive a click when a primary press/release pair lands on this object
        /// within the click window.
        const POINTER_CLICK = 1 << 5;
        /// Receive the secondary button press.
        const SECONDARY_DOWN = 1 << 6;
        /// Receive the secondary button release.
        const SECONDARY_UP = 1 << 7;
        /// Receive a click from the secondary button.
        const SECONDARY_CLICK = 1 << 8;
        /// Receive the select event when this object becomes the selection.
        const SELECT = 1 << 9;
        /// Receive the deselect event when this object stops being the selection.
        const DESELECT = 1 << 10;
        /// Receive a per-frame update event while this object is the selection.
        const UPDATE_SELECTED = 1 << 11;
        /// Defer drag initiation to an external decision instead of starting
        /// a drag directly on press.
        const INIT_POTENTIAL_DRAG = 1 << 12;
        /// Receive the begin-drag event; objects without this flag never drag.
        const BEGIN_DRAG = 1 << 13;
        /// Receive per-frame drag events while being dragged.
        const DRAG = 1 << 14;
        /// Receive the end-drag event when the drag completes.
        const END_DRAG = 1 << 15;
        /// Marker consulted only by ancestor resolution; see [`resolve_target`].
        const EVENT_TARGET = 1 << 16;
    }
}

/// Capability lookup: "which events does this object want?".
///
/// The dispatcher treats this as hot-path and caches the returned set for
/// each object it tracks across frames, so implementations should be cheap
/// but need not memoize.
pub trait CapabilityLookup<K> {
    /// The capability set of `node`. Unknown objects carry no capabilities.
    fn capabilities(&self, node: &K) -> Capability;
}

/// Parent lookup used to climb the containment chain.
pub trait ParentLookup<K> {
    /// The parent of `node`, or `None` at a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A [`ParentLookup`] for flat scenes: every object is a root.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}

/// Find the nearest ancestor (inclusive) marked [`Capability::EVENT_TARGET`].
///
/// Returns `None` when no object on the chain carries the marker. The caller
/// ensures acyclic ancestry.
pub fn find_event_target<K, P, C>(raw: K, parents: &P, caps: &C) -> Option<K>
where
    K: Copy,
    P: ParentLookup<K>,
    C: CapabilityLookup<K>,
{
    let mut cur = raw;
    loop {
        if caps.capabilities(&cur).contains(Capability::EVENT_TARGET) {
            return Some(cur);
        }
        match parents.parent_of(&cur) {
            Some(p) => cur = p,
            None => return None,
        }
    }
}

/// Resolve the interaction target for a raw hit object.
///
/// Applies [`find_event_target`] and falls back to the raw object itself
/// when nothing on the chain is marked — resolution never suppresses
/// interaction.
pub fn resolve_target<K, P, C>(raw: K, parents: &P, caps: &C) -> K
where
    K: Copy,
    P: ParentLookup<K>,
    C: CapabilityLookup<K>,
{
    find_event_target(raw, parents, caps).unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Chain;

    // 3 -> 2 -> 1, with 1 as root.
    impl ParentLookup<u32> for Chain {
        fn parent_of(&self, node: &u32) -> Option<u32> {
            match node {
                3 => Some(2),
                2 => Some(1),
                _ => None,
            }
        }
    }

    struct Marked(u32);

    impl CapabilityLookup<u32> for Marked {
        fn capabilities(&self, node: &u32) -> Capability {
            if *node == self.0 {
                Capability::EVENT_TARGET
            } else {
                Capability::empty()
            }
        }
    }

    #[test]
    fn marked_leaf_resolves_to_itself() {
        assert_eq!(resolve_target(3, &Chain, &Marked(3)), 3);
    }

    #[test]
    fn unmarked_leaf_resolves_to_marked_ancestor() {
        assert_eq!(resolve_target(3, &Chain, &Marked(1)), 1);
        assert_eq!(resolve_target(3, &Chain, &Marked(2)), 2);
    }

    #[test]
    fn nearest_marked_ancestor_wins() {
        struct Both;
        impl CapabilityLookup<u32> for Both {
            fn capabilities(&self, node: &u32) -> Capability {
                if *node == 1 || *node == 2 {
                    Capability::EVENT_TARGET
                } else {
                    Capability::empty()
                }
            }
        }
        assert_eq!(resolve_target(3, &Chain, &Both), 2);
    }

    #[test]
    fn unmarked_chain_falls_back_to_raw() {
        assert_eq!(find_event_target(3, &Chain, &Marked(99)), None);
        assert_eq!(resolve_target(3, &Chain, &Marked(99)), 3);
    }

    #[test]
    fn no_parent_only_considers_the_raw_object() {
        assert_eq!(resolve_target(3, &NoParent, &Marked(3)), 3);
        assert_eq!(resolve_target(3, &NoParent, &Marked(1)), 3);
    }

    #[test]
    fn event_target_marker_is_not_an_event_capability() {
        let caps = Capability::EVENT_TARGET;
        assert!(!caps.contains(Capability::POINTER_ENTER));
        assert!(!caps.contains(Capability::POINTER_CLICK));
    }
}
