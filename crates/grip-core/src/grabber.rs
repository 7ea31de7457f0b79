#![forbid(unsafe_code)]

//! Grabbers: focus-capable targets of input, and the arena that owns them.
//!
//! A grabber answers two questions: *does this event's position fall on me?*
//! ([`Grabber::check_focus`]) and *perform this action* ([`Grabber::consume`]).
//! The engine never interprets actions; it resolves them and hands them over.
//!
//! Grabbers are owned by the host in a [`Grabbers`] arena and referred to by
//! [`GrabberId`] handles, so several agents (keyboard, mouse) can share the
//! same targets without shared ownership.
//!
//! # Identifier semantics
//!
//! - A fresh slot is allocated with generation `1`.
//! - Removing a grabber frees its slot; every `GrabberId` pointing at it goes
//!   stale.
//! - Reusing a freed slot increments its generation, producing a new, distinct
//!   id. A stale id never aliases a different live grabber.

use std::fmt;

use crate::event::Event;

/// Error type returned by grabber hooks.
pub type ConsumeError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse capability class a grabber declares at registration.
///
/// Agents route each class to one of their branches, which is how the
/// keyboard agent gives the eye and scene objects distinct key tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GrabberKind {
    /// The scene as a whole (global toggles).
    Scene,
    /// The viewpoint.
    Eye,
    /// Any other interactive object.
    #[default]
    Object,
}

/// A focus-capable target of input.
pub trait Grabber<A> {
    /// Capability class, queried once at registration.
    fn kind(&self) -> GrabberKind {
        GrabberKind::Object
    }

    /// Whether `event` (with a position) hits this grabber.
    fn check_focus(&self, event: &Event) -> bool;

    /// Perform `action` in response to `event`.
    fn consume(&mut self, action: &A, event: &Event) -> Result<(), ConsumeError>;

    /// Continue `action` under inertia after a fast release.
    fn fling(&mut self, _action: &A, _event: &Event) -> Result<(), ConsumeError> {
        Ok(())
    }

    /// Stop any inertial motion started by [`fling`](Self::fling).
    fn halt(&mut self) {}
}

impl<A, G: Grabber<A> + ?Sized> Grabber<A> for Box<G> {
    fn kind(&self) -> GrabberKind {
        (**self).kind()
    }

    fn check_focus(&self, event: &Event) -> bool {
        (**self).check_focus(event)
    }

    fn consume(&mut self, action: &A, event: &Event) -> Result<(), ConsumeError> {
        (**self).consume(action, event)
    }

    fn fling(&mut self, action: &A, event: &Event) -> Result<(), ConsumeError> {
        (**self).fling(action, event)
    }

    fn halt(&mut self) {
        (**self).halt();
    }
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

/// Generational handle to a grabber in a [`Grabbers`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrabberId {
    index: u32,
    generation: u32,
}

impl GrabberId {
    /// Slot index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation at the time the id was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for GrabberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

// ---------------------------------------------------------------------------
// Arena
// ---------------------------------------------------------------------------

struct Slot<G> {
    generation: u32,
    value: Option<G>,
}

/// Host-owned arena of grabbers.
pub struct Grabbers<G> {
    slots: Vec<Slot<G>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<G> Default for Grabbers<G> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }
}

impl<G> fmt::Debug for Grabbers<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grabbers")
            .field("len", &self.len)
            .field("slots", &self.slots.len())
            .field("free_list", &self.free_list.len())
            .finish()
    }
}

impl<G> Grabbers<G> {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a grabber, reusing a freed slot when one exists.
    pub fn insert(&mut self, grabber: G) -> GrabberId {
        self.len += 1;
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation = slot.generation.saturating_add(1);
            slot.value = Some(grabber);
            return GrabberId {
                index: idx as u32,
                generation: slot.generation,
            };
        }
        let generation = 1_u32;
        self.slots.push(Slot {
            generation,
            value: Some(grabber),
        });
        GrabberId {
            index: (self.slots.len() - 1) as u32,
            generation,
        }
    }

    /// Remove the grabber behind `id`. Stale ids return `None`.
    pub fn remove(&mut self, id: GrabberId) -> Option<G> {
        let idx = id.index as usize;
        let slot = self.slots.get_mut(idx)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(value)
    }

    /// Shared access to a live grabber.
    #[must_use]
    pub fn get(&self, id: GrabberId) -> Option<&G> {
        self.slots
            .get(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.value.as_ref())
    }

    /// Exclusive access to a live grabber.
    pub fn get_mut(&mut self, id: GrabberId) -> Option<&mut G> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|s| s.generation == id.generation)
            .and_then(|s| s.value.as_mut())
    }

    /// Whether `id` refers to a live grabber.
    #[must_use]
    pub fn contains(&self, id: GrabberId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live grabbers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the arena holds no live grabbers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterate live grabbers in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (GrabberId, &G)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value.as_ref().map(|g| {
                (
                    GrabberId {
                        index: i as u32,
                        generation: s.generation,
                    },
                    g,
                )
            })
        })
    }
}
