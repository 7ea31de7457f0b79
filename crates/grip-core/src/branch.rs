#![forbid(unsafe_code)]

//! Branches: named groups of binding tables owned by an agent.
//!
//! A branch holds one [`Profile`] per trigger kind, so the same control id can
//! carry a key binding, a wheel binding, a motion binding and per-count click
//! bindings without interference. The [`Trigger`] of an event picks the table.

use crate::profile::Profile;
use crate::shortcut::{ClickShortcut, Shortcut, Trigger};

/// Index of a branch within its agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub(crate) usize);

impl BranchId {
    /// Position of the branch in its agent's creation order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A named set of binding tables.
#[derive(Debug, Clone)]
pub struct Branch<A> {
    name: String,
    keys: Profile<Shortcut, A>,
    wheel: Profile<Shortcut, A>,
    motion: Profile<Shortcut, A>,
    clicks: Profile<ClickShortcut, A>,
}

impl<A> Branch<A> {
    /// Create an empty branch.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: Profile::new(),
            wheel: Profile::new(),
            motion: Profile::new(),
            clicks: Profile::new(),
        }
    }

    /// Branch name, unique within its agent.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind `trigger` to `action`, returning the action it replaced.
    pub fn bind(&mut self, trigger: Trigger, action: A) -> Option<A> {
        match trigger {
            Trigger::Key(s) => self.keys.bind(s, action),
            Trigger::Wheel(s) => self.wheel.bind(s, action),
            Trigger::Motion(s) => self.motion.bind(s, action),
            Trigger::Click(c) => self.clicks.bind(c, action),
        }
    }

    /// Remove the binding for `trigger`.
    pub fn unbind(&mut self, trigger: &Trigger) -> Option<A> {
        match trigger {
            Trigger::Key(s) => self.keys.unbind(s),
            Trigger::Wheel(s) => self.wheel.unbind(s),
            Trigger::Motion(s) => self.motion.unbind(s),
            Trigger::Click(c) => self.clicks.unbind(c),
        }
    }

    /// Action bound to `trigger`.
    #[must_use]
    pub fn lookup(&self, trigger: &Trigger) -> Option<&A> {
        match trigger {
            Trigger::Key(s) => self.keys.lookup(s),
            Trigger::Wheel(s) => self.wheel.lookup(s),
            Trigger::Motion(s) => self.motion.lookup(s),
            Trigger::Click(c) => self.clicks.lookup(c),
        }
    }

    /// Whether `trigger` has a binding.
    #[must_use]
    pub fn has_binding(&self, trigger: &Trigger) -> bool {
        self.lookup(trigger).is_some()
    }

    /// Whether any table binds `action`.
    #[must_use]
    pub fn is_bound(&self, action: &A) -> bool
    where
        A: PartialEq,
    {
        self.keys.is_bound(action)
            || self.wheel.is_bound(action)
            || self.motion.is_bound(action)
            || self.clicks.is_bound(action)
    }

    /// Remove every binding from every table.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.wheel.clear();
        self.motion.clear();
        self.clicks.clear();
    }

    /// Total bindings across tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len() + self.wheel.len() + self.motion.len() + self.clicks.len()
    }

    /// Whether every table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keyboard table.
    #[must_use]
    pub fn keys(&self) -> &Profile<Shortcut, A> {
        &self.keys
    }

    /// Wheel table.
    #[must_use]
    pub fn wheel(&self) -> &Profile<Shortcut, A> {
        &self.wheel
    }

    /// Pointer-motion table.
    #[must_use]
    pub fn motion(&self) -> &Profile<Shortcut, A> {
        &self.motion
    }

    /// Click table.
    #[must_use]
    pub fn clicks(&self) -> &Profile<ClickShortcut, A> {
        &self.clicks
    }
}
