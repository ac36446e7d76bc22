//! Stable-ID storage for nodes and constraints.
//!
//! Slots are allocated append-only and tombstoned on removal, so an ID is
//! never handed out twice by the same arena. Liveness checks are O(1).

use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

/// A typed index into an [`Arena`].
pub trait ArenaKey: Copy + Eq + Ord + fmt::Debug {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! arena_key {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(u32);

        impl ArenaKey for $name {
            fn from_index(index: usize) -> Self {
                $name(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

arena_key!(
    /// Stable handle to a node. Never reissued after deletion.
    NodeId,
    "node"
);
arena_key!(
    /// Stable handle to a constraint. Never reissued after deletion.
    ConstraintId,
    "constraint"
);

/// Append-only slot storage with tombstones.
#[derive(Clone, Debug)]
pub struct Arena<K: ArenaKey, T> {
    slots: Vec<Option<T>>,
    live: usize,
    _key: PhantomData<K>,
}

impl<K: ArenaKey, T> Arena<K, T> {
    pub fn new() -> Self {
        Arena { slots: Vec::new(), live: 0, _key: PhantomData }
    }

    /// The key the next insertion will receive.
    pub fn next_key(&self) -> K {
        K::from_index(self.slots.len())
    }

    pub fn insert(&mut self, value: T) -> K {
        let key = self.next_key();
        self.slots.push(Some(value));
        self.live += 1;
        key
    }

    /// Tombstone the slot. Returns `None` for dead or out-of-range keys.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let removed = self.slots.get_mut(key.index())?.take();
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.slots.get(key.index())?.as_ref()
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots.get_mut(key.index())?.as_mut()
    }

    /// Mutable access to two distinct live entries at once.
    pub fn get_pair_mut(&mut self, a: K, b: K) -> Option<(&mut T, &mut T)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia >= self.slots.len() || ib >= self.slots.len() {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.slots.split_at_mut(ib);
            Some((lo[ia].as_mut()?, hi[0].as_mut()?))
        } else {
            let (lo, hi) = self.slots.split_at_mut(ia);
            Some((hi[0].as_mut()?, lo[ib].as_mut()?))
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (K::from_index(i), v)))
    }

    /// Live keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k).collect()
    }
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}
