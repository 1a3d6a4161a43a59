//! Generational arena owning all rigid bodies.
//!
//! The world owns bodies through a [`BodySet`]; everything else holds
//! [`BodyHandle`]s. A handle is a weak reference: it carries the slot
//! generation at the time of insertion, so using it after the body was
//! removed (or its slot reused) is detected as `StaleBody` instead of
//! reading freed state.

use planar_types::{PlanarError, PlanarResult};
use serde::{Deserialize, Serialize};

use crate::body::RigidBody;

/// Weak reference to a body in a [`BodySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Raw slot index, for adjacency bookkeeping (e.g. contact-graph
    /// coloring). Only meaningful against the set that issued it.
    #[inline]
    pub fn index(self) -> usize {
        self.index as usize
    }
}

struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Arena of rigid bodies with generation-checked handles.
#[derive(Default)]
pub struct BodySet {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl BodySet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live bodies.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no bodies are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a body, reusing a freed slot if available.
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            BodyHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                body: Some(body),
            });
            BodyHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Removes a body, invalidating every outstanding handle to it.
    ///
    /// Returns the body, or `None` if the handle was already stale.
    pub fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation || slot.body.is_none() {
            return None;
        }
        slot.generation += 1;
        self.free.push(handle.index);
        self.len -= 1;
        slot.body.take()
    }

    /// True if the handle still refers to a live body.
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .is_some_and(|s| s.generation == handle.generation && s.body.is_some())
    }

    /// Borrows the body behind `handle`, failing if it expired.
    pub fn get(&self, handle: BodyHandle) -> PlanarResult<&RigidBody> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.body.as_ref())
            .ok_or(PlanarError::StaleBody {
                index: handle.index,
                generation: handle.generation,
            })
    }

    /// Mutably borrows the body behind `handle`, failing if it expired.
    pub fn get_mut(&mut self, handle: BodyHandle) -> PlanarResult<&mut RigidBody> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.body.as_mut())
            .ok_or(PlanarError::StaleBody {
                index: handle.index,
                generation: handle.generation,
            })
    }

    /// Mutably borrows two distinct bodies at once.
    ///
    /// The solver needs both ends of a contact pair mutable in the same
    /// scope; the split borrow keeps that safe without cells or cloning.
    pub fn pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> PlanarResult<(&mut RigidBody, &mut RigidBody)> {
        if a.index == b.index {
            return Err(PlanarError::InvariantViolation(
                "contact pair references the same body twice".into(),
            ));
        }
        if !self.contains(a) {
            return Err(PlanarError::StaleBody {
                index: a.index,
                generation: a.generation,
            });
        }
        if !self.contains(b) {
            return Err(PlanarError::StaleBody {
                index: b.index,
                generation: b.generation,
            });
        }

        let (ia, ib) = (a.index as usize, b.index as usize);
        let (lo, hi) = if ia < ib { (ia, ib) } else { (ib, ia) };
        let (head, tail) = self.slots.split_at_mut(hi);
        let (first, second) = (
            head[lo].body.as_mut().expect("liveness checked above"),
            tail[0].body.as_mut().expect("liveness checked above"),
        );
        if ia < ib {
            Ok((first, second))
        } else {
            Ok((second, first))
        }
    }

    /// Iterates over all live bodies with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.body.as_ref().map(|b| {
                (
                    BodyHandle {
                        index: i as u32,
                        generation: s.generation,
                    },
                    b,
                )
            })
        })
    }

    /// Iterates mutably over all live bodies.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.slots.iter_mut().enumerate().filter_map(|(i, s)| {
            let generation = s.generation;
            s.body.as_mut().map(move |b| {
                (
                    BodyHandle {
                        index: i as u32,
                        generation,
                    },
                    b,
                )
            })
        })
    }
}
