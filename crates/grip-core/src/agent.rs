#![forbid(unsafe_code)]

//! Agents: focus tracking and binding resolution for one input device.
//!
//! An [`Agent`] owns a set of named [`Branch`]es, a membership list of
//! grabbers, and the current focus. Each member is routed to one branch by the
//! [`GrabberKind`] it declared at registration, and that branch's tables
//! decide which action an event resolves to.
//!
//! # Routing
//!
//! ```text
//! Event ──► update_focus (position-bearing only)
//!             │  first member whose check_focus is true, in registration
//!             │  order; otherwise the default grabber; otherwise none
//!             ▼
//!           focus ──► member.branch ──► table[event.trigger()] ──► action
//!                                                                   │
//!                                                 Grabber::consume ◄┘
//! ```
//!
//! A kind with no explicit route falls back to the first branch created.
//!
//! # Invariants
//!
//! 1. A grabber is a member at most once; re-registering is a no-op.
//! 2. Focus, when set, is a member or the default grabber.
//! 3. Unregistering clears focus and the default grabber if they referenced
//!    the removed id.
//! 4. Stale ids (removed from the arena without unregistering) are skipped by
//!    focus resolution and never receive actions.
//!
//! # Failure Modes
//!
//! - An event with no bound action yields [`Dispatched::Unbound`]; with no
//!   focused grabber, [`Dispatched::NoTarget`]. Neither is an error.
//! - A grabber hook returning `Err` surfaces as [`GripError::Consume`].

use std::fmt;

use tracing::trace;

use crate::branch::{Branch, BranchId};
use crate::error::{GripError, Result};
use crate::event::Event;
use crate::grabber::{Grabber, GrabberId, GrabberKind, Grabbers};
use crate::shortcut::Trigger;

// ---------------------------------------------------------------------------
// Dispatch outcome
// ---------------------------------------------------------------------------

/// An action delivered (or staged for delivery) to a grabber.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation<A> {
    /// Target grabber.
    pub grabber: GrabberId,
    /// Resolved action.
    pub action: A,
}

/// What happened to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched<A> {
    /// The action was consumed immediately.
    Invoked(Invocation<A>),
    /// The action was queued for delivery at release.
    Staged(Invocation<A>),
    /// A continuous action was armed; `pump` delivers it.
    Armed(Invocation<A>),
    /// A grabber has focus but nothing is bound to the event's shortcut.
    Unbound,
    /// No grabber has focus.
    NoTarget,
    /// Focus was updated without acting; carries the new focus.
    Hover(Option<GrabberId>),
}

impl<A> Dispatched<A> {
    /// The invocation, for `Invoked`, `Staged` and `Armed`.
    #[must_use]
    pub fn invocation(&self) -> Option<&Invocation<A>> {
        match self {
            Self::Invoked(i) | Self::Staged(i) | Self::Armed(i) => Some(i),
            Self::Unbound | Self::NoTarget | Self::Hover(_) => None,
        }
    }

    /// Whether a grabber consumed the action during this call.
    #[must_use]
    pub fn is_invoked(&self) -> bool {
        matches!(self, Self::Invoked(_))
    }
}

// ---------------------------------------------------------------------------
// Agent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Member {
    id: GrabberId,
    kind: GrabberKind,
    branch: Option<BranchId>,
}

/// Focus tracker and binding resolver for one device.
pub struct Agent<A> {
    name: String,
    branches: Vec<Branch<A>>,
    routes: Vec<(GrabberKind, BranchId)>,
    members: Vec<Member>,
    default_grabber: Option<GrabberId>,
    focus: Option<GrabberId>,
}

impl<A> fmt::Debug for Agent<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("name", &self.name)
            .field("branches", &self.branches.len())
            .field("members", &self.members.len())
            .field("focus", &self.focus)
            .field("default_grabber", &self.default_grabber)
            .finish()
    }
}

impl<A> Agent<A> {
    /// Create an agent with no branches.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            branches: Vec::new(),
            routes: Vec::new(),
            members: Vec::new(),
            default_grabber: None,
            focus: None,
        }
    }

    /// Agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // -- Branches ----------------------------------------------------------

    /// Add an empty branch. Names are unique per agent.
    pub fn add_branch(&mut self, name: impl Into<String>) -> Result<BranchId> {
        let name = name.into();
        if self.branch_id(&name).is_some() {
            return Err(GripError::duplicate_branch(name));
        }
        let id = BranchId(self.branches.len());
        self.branches.push(Branch::new(name));
        if id.0 == 0 {
            self.reroute_members();
        }
        Ok(id)
    }

    /// Route grabbers of `kind` to `branch`. Existing members are re-routed.
    ///
    /// Returns `false` (and changes nothing) if `branch` is unknown.
    pub fn route(&mut self, kind: GrabberKind, branch: BranchId) -> bool {
        if branch.0 >= self.branches.len() {
            return false;
        }
        match self.routes.iter_mut().find(|(k, _)| *k == kind) {
            Some(route) => route.1 = branch,
            None => self.routes.push((kind, branch)),
        }
        self.reroute_members();
        true
    }

    /// Branch that grabbers of `kind` resolve against.
    #[must_use]
    pub fn routed_branch(&self, kind: GrabberKind) -> Option<BranchId> {
        self.routes
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, b)| *b)
            .or_else(|| (!self.branches.is_empty()).then_some(BranchId(0)))
    }

    /// Look up a branch id by name.
    #[must_use]
    pub fn branch_id(&self, name: &str) -> Option<BranchId> {
        self.branches
            .iter()
            .position(|b| b.name() == name)
            .map(BranchId)
    }

    /// Shared access to a branch.
    #[must_use]
    pub fn branch(&self, id: BranchId) -> Option<&Branch<A>> {
        self.branches.get(id.0)
    }

    /// Exclusive access to a branch.
    pub fn branch_mut(&mut self, id: BranchId) -> Option<&mut Branch<A>> {
        self.branches.get_mut(id.0)
    }

    /// Iterate branches in creation order.
    pub fn branches(&self) -> impl Iterator<Item = (BranchId, &Branch<A>)> {
        self.branches
            .iter()
            .enumerate()
            .map(|(i, b)| (BranchId(i), b))
    }

    fn reroute_members(&mut self) {
        for i in 0..self.members.len() {
            let kind = self.members[i].kind;
            self.members[i].branch = self.routed_branch(kind);
        }
    }

    // -- Bindings ----------------------------------------------------------

    /// Bind `trigger` to `action` in `branch`, returning the replaced action.
    pub fn bind(&mut self, branch: BranchId, trigger: Trigger, action: A) -> Option<A> {
        self.branch_mut(branch)?.bind(trigger, action)
    }

    /// Remove the binding for `trigger` in `branch`.
    pub fn unbind(&mut self, branch: BranchId, trigger: &Trigger) -> Option<A> {
        self.branch_mut(branch)?.unbind(trigger)
    }

    /// Action bound to `trigger` in `branch`.
    #[must_use]
    pub fn action(&self, branch: BranchId, trigger: &Trigger) -> Option<&A> {
        self.branch(branch)?.lookup(trigger)
    }

    /// Whether `trigger` has a binding in `branch`.
    #[must_use]
    pub fn has_binding(&self, branch: BranchId, trigger: &Trigger) -> bool {
        self.action(branch, trigger).is_some()
    }

    /// Whether `action` is bound anywhere in `branch`.
    #[must_use]
    pub fn is_bound(&self, branch: BranchId, action: &A) -> bool
    where
        A: PartialEq,
    {
        self.branch(branch).is_some_and(|b| b.is_bound(action))
    }

    /// Remove every binding in `branch`.
    pub fn clear_bindings(&mut self, branch: BranchId) {
        if let Some(b) = self.branch_mut(branch) {
            b.clear();
        }
    }

    // -- Membership --------------------------------------------------------

    /// Add a grabber to this agent, routing it by its declared kind.
    ///
    /// Returns `false` if `id` is stale or already a member.
    pub fn register<G: Grabber<A>>(&mut self, grabbers: &Grabbers<G>, id: GrabberId) -> bool {
        if self.is_registered(id) {
            return false;
        }
        let Some(grabber) = grabbers.get(id) else {
            return false;
        };
        let kind = grabber.kind();
        let branch = self.routed_branch(kind);
        self.members.push(Member { id, kind, branch });
        trace!(agent = %self.name, grabber = %id, ?kind, ?branch, "grabber registered");
        true
    }

    /// Remove a grabber. Clears focus and the default grabber if they were `id`.
    ///
    /// Returns `false` if `id` was not a member.
    pub fn unregister(&mut self, id: GrabberId) -> bool {
        let Some(pos) = self.members.iter().position(|m| m.id == id) else {
            return false;
        };
        self.members.remove(pos);
        if self.focus == Some(id) {
            self.focus = None;
        }
        if self.default_grabber == Some(id) {
            self.default_grabber = None;
        }
        trace!(agent = %self.name, grabber = %id, "grabber unregistered");
        true
    }

    /// Whether `id` is a member.
    #[must_use]
    pub fn is_registered(&self, id: GrabberId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Members in registration order.
    pub fn members(&self) -> impl Iterator<Item = GrabberId> + '_ {
        self.members.iter().map(|m| m.id)
    }

    /// Branch a member resolves against.
    #[must_use]
    pub fn branch_of(&self, id: GrabberId) -> Option<BranchId> {
        self.members
            .iter()
            .find(|m| m.id == id)
            .and_then(|m| m.branch)
    }

    /// Make `id` the fallback focus, registering it if needed.
    ///
    /// Returns `false` (and changes nothing) if `id` is stale.
    pub fn set_default_grabber<G: Grabber<A>>(
        &mut self,
        grabbers: &Grabbers<G>,
        id: GrabberId,
    ) -> bool {
        if !self.is_registered(id) && !self.register(grabbers, id) {
            return false;
        }
        self.default_grabber = Some(id);
        true
    }

    /// Remove the fallback focus.
    pub fn clear_default_grabber(&mut self) {
        self.default_grabber = None;
    }

    /// The fallback focus.
    #[must_use]
    pub fn default_grabber(&self) -> Option<GrabberId> {
        self.default_grabber
    }

    /// The current focus.
    #[must_use]
    pub fn focus(&self) -> Option<GrabberId> {
        self.focus
    }

    // -- Focus and dispatch ------------------------------------------------

    /// Recompute focus for `event`.
    ///
    /// The first member (registration order) whose `check_focus` accepts the
    /// event wins; otherwise the default grabber, if still live.
    pub fn update_focus<G: Grabber<A>>(
        &mut self,
        grabbers: &Grabbers<G>,
        event: &Event,
    ) -> Option<GrabberId> {
        let hit = self
            .members
            .iter()
            .map(|m| m.id)
            .find(|id| grabbers.get(*id).is_some_and(|g| g.check_focus(event)));
        let next = hit.or_else(|| self.default_grabber.filter(|id| grabbers.contains(*id)));
        if next != self.focus {
            trace!(agent = %self.name, from = ?self.focus, to = ?next, "focus changed");
        }
        self.focus = next;
        next
    }

    /// Action that `event` resolves to for member `id`.
    #[must_use]
    pub fn resolve(&self, id: GrabberId, event: &Event) -> Option<&A> {
        self.resolve_trigger(id, &event.trigger())
    }

    /// Action that `trigger` resolves to for member `id`.
    #[must_use]
    pub fn resolve_trigger(&self, id: GrabberId, trigger: &Trigger) -> Option<&A> {
        let branch = self.branch_of(id)?;
        self.branches.get(branch.0)?.lookup(trigger)
    }

    /// Route `event` to the focused grabber and consume the bound action.
    ///
    /// Focus is recomputed only for position-bearing events; keys and wheel
    /// go to the grabber already in focus.
    pub fn dispatch<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        event: &Event,
    ) -> Result<Dispatched<A>>
    where
        A: Clone,
    {
        if event.position().is_some() {
            self.update_focus(grabbers, event);
        }
        let Some(target) = self.focus else {
            trace!(agent = %self.name, trigger = %event.trigger(), "no target");
            return Ok(Dispatched::NoTarget);
        };
        let Some(action) = self.resolve(target, event).cloned() else {
            trace!(agent = %self.name, grabber = %target, trigger = %event.trigger(), "unbound");
            return Ok(Dispatched::Unbound);
        };
        if !invoke(grabbers, target, &action, event)? {
            return Ok(Dispatched::NoTarget);
        }
        Ok(Dispatched::Invoked(Invocation {
            grabber: target,
            action,
        }))
    }
}

/// Hand `action` to grabber `id`. Returns `Ok(false)` if `id` is stale.
pub(crate) fn invoke<A, G: Grabber<A>>(
    grabbers: &mut Grabbers<G>,
    id: GrabberId,
    action: &A,
    event: &Event,
) -> Result<bool> {
    let Some(grabber) = grabbers.get_mut(id) else {
        return Ok(false);
    };
    grabber
        .consume(action, event)
        .map_err(|source| GripError::consume(id, source))?;
    Ok(true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
