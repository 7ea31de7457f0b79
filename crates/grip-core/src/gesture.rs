#![forbid(unsafe_code)]

//! Pointer gesture dispatch: press → drag → release with per-action policy.
//!
//! [`PointerAgent`] wraps an [`Agent`] and adds the lifecycle of a held
//! pointer button. Each bound action classifies itself through
//! [`GestureAction::mode`]:
//!
//! | Mode         | On press            | On drag        | On release         |
//! |--------------|---------------------|----------------|--------------------|
//! | `Immediate`  | consume             | consume        | (fling if inertial)|
//! | `Continuous` | arm; `pump` fires   | consume        | disarm             |
//! | `Deferred`   | stage               | nothing        | consume once       |
//!
//! # State Machine
//!
//! ```text
//!            press                drag
//!   Idle ───────────► Pressed ───────────► Dragging ─┐
//!    ▲                   │                    ▲  drag │
//!    │      release      │                    └──────┘
//!    └───────────────────┴──── release ───────┘
//!
//!   cancel / unregister(active grabber) ──► Idle (staged entries dropped)
//! ```
//!
//! # Invariants
//!
//! 1. The grabber and shortcut captured at press stay fixed for the whole
//!    gesture; drag and pump resolve against them, not the current focus.
//! 2. A staged action is consumed at most once, at release, by the grabber
//!    that was focused at press, with the release event linked back to the
//!    press sample.
//! 3. Staged actions whose grabber was unregistered are discarded, never run.
//! 4. The continuous flag is set only between a press that resolved to a
//!    continuous action and the end of that gesture.
//! 5. After `release`, `cancel`, or unregistering the active grabber, the
//!    phase is `Idle` and nothing is staged.
//!
//! # Failure Modes
//!
//! - Pressing while a gesture is active discards the old gesture (logged at
//!   `warn`) and starts a new one.
//! - A grabber hook error is returned as [`GripError::Consume`]. On release
//!   the gesture is already reset when the error surfaces; staged entries
//!   after the failing one are dropped.

use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, warn};
use web_time::{Duration, Instant};

use crate::agent::{Agent, Dispatched, Invocation, invoke};
use crate::click::ClickCounter;
use crate::error::{GripError, Result};
use crate::event::{ClickEvent, Event, Motion1Event, Motion2Event, PlainEvent};
use crate::grabber::{Grabber, GrabberId, Grabbers};
use crate::shortcut::{Shortcut, Trigger};

// ---------------------------------------------------------------------------
// Action classification
// ---------------------------------------------------------------------------

/// How a pointer action is scheduled over a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DispatchMode {
    /// Consumed on press and on every drag sample.
    #[default]
    Immediate,
    /// Re-fired by [`PointerAgent::pump`] while the button is held.
    Continuous,
    /// Staged at press and consumed once at release.
    Deferred,
}

/// Capability of action tokens used with [`PointerAgent`].
pub trait GestureAction: Clone + fmt::Debug {
    /// Scheduling policy for this action.
    fn mode(&self) -> DispatchMode {
        DispatchMode::Immediate
    }

    /// Whether a fast release hands the action off to [`Grabber::fling`].
    fn is_inertial(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Default multi-click window in milliseconds.
pub const DEFAULT_MULTI_CLICK_MS: u64 = 300;
/// Minimum multi-click window in milliseconds.
pub const MIN_MULTI_CLICK_MS: u64 = 50;
/// Maximum multi-click window in milliseconds.
pub const MAX_MULTI_CLICK_MS: u64 = 2000;
/// Maximum pump interval in milliseconds.
pub const MAX_PUMP_INTERVAL_MS: u64 = 1000;
/// Default release speed (units/s) at which inertial actions fling.
pub const DEFAULT_FLING_SPEED: f32 = 800.0;

/// Cadence of [`PointerAgent::pump`] for continuous actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PumpPolicy {
    /// Fire on every `pump` call; the host's tick sets the rate.
    #[default]
    EveryCall,
    /// Fire at most once per interval.
    Interval(Duration),
}

/// Tunables for pointer gestures.
///
/// # Environment Variables
///
/// ```bash
/// export GRIP_MULTI_CLICK_MS=400
/// export GRIP_PUMP_INTERVAL_MS=16   # 0 = every call
/// export GRIP_FLING_SPEED=0         # disable flinging
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Time window for consecutive clicks on the same button (default: 300ms).
    pub multi_click_window: Duration,
    /// Continuous-action cadence (default: every call).
    pub pump: PumpPolicy,
    /// Minimum release speed that triggers a fling; `0` disables (default: 800).
    pub fling_speed: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            multi_click_window: Duration::from_millis(DEFAULT_MULTI_CLICK_MS),
            pump: PumpPolicy::EveryCall,
            fling_speed: DEFAULT_FLING_SPEED,
        }
    }
}

impl GestureConfig {
    /// Set the multi-click window.
    #[must_use]
    pub fn with_multi_click_window(mut self, window: Duration) -> Self {
        self.multi_click_window = window;
        self
    }

    /// Set the pump cadence.
    #[must_use]
    pub fn with_pump(mut self, pump: PumpPolicy) -> Self {
        self.pump = pump;
        self
    }

    /// Set the fling speed threshold.
    #[must_use]
    pub fn with_fling_speed(mut self, speed: f32) -> Self {
        self.fling_speed = speed;
        self
    }

    /// Load config from environment variables.
    ///
    /// Reads `GRIP_MULTI_CLICK_MS`, `GRIP_PUMP_INTERVAL_MS` and
    /// `GRIP_FLING_SPEED`. Unparseable values are ignored; the result is
    /// [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = get_env("GRIP_MULTI_CLICK_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.multi_click_window = Duration::from_millis(ms);
        }

        if let Some(val) = get_env("GRIP_PUMP_INTERVAL_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.pump = match ms {
                0 => PumpPolicy::EveryCall,
                ms => PumpPolicy::Interval(Duration::from_millis(ms)),
            };
        }

        if let Some(val) = get_env("GRIP_FLING_SPEED")
            && let Ok(speed) = val.trim().parse::<f32>()
        {
            config.fling_speed = speed;
        }

        config.validated()
    }

    /// Clamp values to safe ranges.
    ///
    /// - `multi_click_window` clamped to 50-2000ms
    /// - `Interval` pump capped at 1000ms; a zero interval becomes `EveryCall`
    /// - `fling_speed` negative or non-finite becomes `0` (disabled)
    #[must_use]
    pub fn validated(mut self) -> Self {
        let window_ms = u64::try_from(self.multi_click_window.as_millis()).unwrap_or(u64::MAX);
        self.multi_click_window =
            Duration::from_millis(window_ms.clamp(MIN_MULTI_CLICK_MS, MAX_MULTI_CLICK_MS));

        if let PumpPolicy::Interval(every) = self.pump {
            self.pump = if every.is_zero() {
                PumpPolicy::EveryCall
            } else {
                PumpPolicy::Interval(every.min(Duration::from_millis(MAX_PUMP_INTERVAL_MS)))
            };
        }

        if !self.fling_speed.is_finite() || self.fling_speed < 0.0 {
            self.fling_speed = 0.0;
        }

        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let window_ms = u64::try_from(self.multi_click_window.as_millis()).unwrap_or(u64::MAX);
        let pump_ok = match self.pump {
            PumpPolicy::EveryCall => true,
            PumpPolicy::Interval(every) => {
                !every.is_zero() && every <= Duration::from_millis(MAX_PUMP_INTERVAL_MS)
            }
        };
        (MIN_MULTI_CLICK_MS..=MAX_MULTI_CLICK_MS).contains(&window_ms)
            && pump_ok
            && self.fling_speed.is_finite()
            && self.fling_speed >= 0.0
    }
}

// ---------------------------------------------------------------------------
// Internal state
// ---------------------------------------------------------------------------

/// Lifecycle phase of the held pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    /// No button held.
    #[default]
    Idle,
    /// Button pressed, no drag yet.
    Pressed,
    /// Button held and moved.
    Dragging,
}

#[derive(Debug, Clone)]
struct Staged<A> {
    press: Motion2Event,
    action: A,
    grabber: GrabberId,
}

#[derive(Debug)]
struct Session<A> {
    phase: GesturePhase,
    press: Option<Motion2Event>,
    last: Option<Motion2Event>,
    active: Option<GrabberId>,
    shortcut: Shortcut,
    action: Option<A>,
    continuous: bool,
    staged: VecDeque<Staged<A>>,
    last_pump: Option<Instant>,
}

impl<A> Default for Session<A> {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Idle,
            press: None,
            last: None,
            active: None,
            shortcut: Shortcut::default(),
            action: None,
            continuous: false,
            staged: VecDeque::new(),
            last_pump: None,
        }
    }
}

/// Outcome of [`PointerAgent::release`].
#[derive(Debug, Clone, PartialEq)]
pub struct Release<A> {
    /// Staged actions consumed, in staging order.
    pub invoked: Vec<Invocation<A>>,
    /// Staged actions dropped because their grabber was unregistered.
    pub discarded: usize,
    /// Grabber handed an inertial continuation, if any.
    pub flung: Option<GrabberId>,
}

impl<A> Default for Release<A> {
    fn default() -> Self {
        Self {
            invoked: Vec::new(),
            discarded: 0,
            flung: None,
        }
    }
}

// ---------------------------------------------------------------------------
// PointerAgent
// ---------------------------------------------------------------------------

/// Agent for pointing devices, with press/drag/release lifecycle.
pub struct PointerAgent<A> {
    agent: Agent<A>,
    config: GestureConfig,
    clicks: ClickCounter,
    session: Session<A>,
    flung: Option<GrabberId>,
}

impl<A> fmt::Debug for PointerAgent<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerAgent")
            .field("agent", &self.agent)
            .field("phase", &self.session.phase)
            .field("continuous", &self.session.continuous)
            .field("staged", &self.session.staged.len())
            .finish()
    }
}

impl<A: GestureAction> PointerAgent<A> {
    /// Wrap `agent`. The config is validated.
    #[must_use]
    pub fn new(agent: Agent<A>, config: GestureConfig) -> Self {
        let config = config.validated();
        Self {
            clicks: ClickCounter::new(config.multi_click_window),
            agent,
            config,
            session: Session::default(),
            flung: None,
        }
    }

    /// The wrapped agent.
    #[must_use]
    pub fn agent(&self) -> &Agent<A> {
        &self.agent
    }

    /// Mutable access to the wrapped agent (bindings, routing, membership).
    ///
    /// A gesture whose captured grabber is unregistered here reads as `Idle`
    /// at once and is discarded by the next `drag`, `pump` or `release`.
    pub fn agent_mut(&mut self) -> &mut Agent<A> {
        &mut self.agent
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replace the configuration. The config is validated.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config.validated();
        self.clicks.set_window(self.config.multi_click_window);
    }

    /// Current gesture phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        if self.is_orphaned() {
            return GesturePhase::Idle;
        }
        self.session.phase
    }

    /// Whether a continuous action is armed and `pump` should be called.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        self.session.continuous && !self.is_orphaned()
    }

    /// Number of staged actions awaiting release.
    #[must_use]
    pub fn pending(&self) -> usize {
        if self.is_orphaned() {
            return 0;
        }
        self.session.staged.len()
    }

    /// Event that started the current gesture.
    #[must_use]
    pub fn press_event(&self) -> Option<&Motion2Event> {
        self.session.press.as_ref()
    }

    /// Latest sample of the current gesture.
    #[must_use]
    pub fn last_event(&self) -> Option<&Motion2Event> {
        self.session.last.as_ref()
    }

    /// Grabber captured at press.
    #[must_use]
    pub fn active_grabber(&self) -> Option<GrabberId> {
        self.session.active.filter(|_| !self.is_orphaned())
    }

    /// Begin a gesture.
    pub fn press<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        event: Motion2Event,
    ) -> Result<Dispatched<A>> {
        self.halt(grabbers);
        self.abandon_orphaned();
        if self.session.phase != GesturePhase::Idle {
            warn!(
                agent = %self.agent.name(),
                staged = self.session.staged.len(),
                "press during active gesture; discarding it"
            );
            self.session = Session::default();
        }

        let ev = Event::Motion2(event);
        let target = self.agent.update_focus(grabbers, &ev);
        self.session.phase = GesturePhase::Pressed;
        self.session.press = Some(event);
        self.session.last = Some(event);
        self.session.active = target;
        self.session.shortcut = event.shortcut();

        let Some(grabber) = target else {
            debug!(agent = %self.agent.name(), shortcut = %event.shortcut(), "press without target");
            return Ok(Dispatched::NoTarget);
        };
        let Some(action) = self.agent.resolve(grabber, &ev).cloned() else {
            debug!(agent = %self.agent.name(), %grabber, shortcut = %event.shortcut(), "press unbound");
            return Ok(Dispatched::Unbound);
        };
        self.session.action = Some(action.clone());
        let invocation = Invocation {
            grabber,
            action: action.clone(),
        };

        match action.mode() {
            DispatchMode::Continuous => {
                self.session.continuous = true;
                self.session.last_pump = None;
                debug!(agent = %self.agent.name(), %grabber, ?action, "continuous action armed");
                Ok(Dispatched::Armed(invocation))
            }
            DispatchMode::Deferred => {
                self.session.staged.push_back(Staged {
                    press: event,
                    action,
                    grabber,
                });
                debug!(agent = %self.agent.name(), %grabber, action = ?invocation.action, "action staged");
                Ok(Dispatched::Staged(invocation))
            }
            DispatchMode::Immediate => {
                if !invoke(grabbers, grabber, &action, &ev)? {
                    return Ok(Dispatched::NoTarget);
                }
                Ok(Dispatched::Invoked(invocation))
            }
        }
    }

    /// Continue a gesture. Without a held button this is a hover.
    pub fn drag<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        event: Motion2Event,
    ) -> Result<Dispatched<A>> {
        if self.session.phase == GesturePhase::Idle {
            return Ok(self.hover(grabbers, event));
        }
        if self.abandon_orphaned().is_some() {
            return Ok(self.hover(grabbers, event));
        }

        let event = match (event.previous, self.session.last) {
            (None, Some(prev)) => event.following(&prev),
            _ => event,
        };
        if self.session.phase == GesturePhase::Pressed {
            debug!(agent = %self.agent.name(), "drag started");
        }
        self.session.last = Some(event);
        self.session.phase = GesturePhase::Dragging;

        let Some(grabber) = self.session.active else {
            return Ok(Dispatched::NoTarget);
        };
        let trigger = Trigger::Motion(self.session.shortcut);
        let Some(action) = self.agent.resolve_trigger(grabber, &trigger).cloned() else {
            return Ok(Dispatched::Unbound);
        };
        let invocation = Invocation {
            grabber,
            action: action.clone(),
        };
        if action.mode() == DispatchMode::Deferred {
            return Ok(Dispatched::Staged(invocation));
        }
        if !invoke(grabbers, grabber, &action, &Event::Motion2(event))? {
            return Ok(Dispatched::NoTarget);
        }
        Ok(Dispatched::Invoked(invocation))
    }

    /// End a gesture: fling, drain staged actions, and return to `Idle`.
    pub fn release<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        event: Motion2Event,
    ) -> Result<Release<A>> {
        if self.session.phase == GesturePhase::Idle {
            return Ok(Release::default());
        }
        if let Some(discarded) = self.abandon_orphaned() {
            self.agent.update_focus(grabbers, &Event::Motion2(event));
            return Ok(Release {
                discarded,
                ..Release::default()
            });
        }

        let session = std::mem::take(&mut self.session);
        let event = match (event.previous, session.last) {
            (None, Some(prev)) => event.following(&prev),
            _ => event,
        };
        let mut out = Release::default();

        if let (Some(grabber), Some(action), Some(last)) =
            (session.active, session.action.as_ref(), session.last)
            && action.is_inertial()
            && self.config.fling_speed > 0.0
            && last.speed() >= self.config.fling_speed
            && self.agent.is_registered(grabber)
            && let Some(target) = grabbers.get_mut(grabber)
        {
            target
                .fling(action, &Event::Motion2(last))
                .map_err(|source| GripError::consume(grabber, source))?;
            debug!(agent = %self.agent.name(), %grabber, speed = last.speed(), ?action, "flung");
            self.flung = Some(grabber);
            out.flung = Some(grabber);
        }

        for entry in session.staged {
            if !self.agent.is_registered(entry.grabber) || !grabbers.contains(entry.grabber) {
                warn!(
                    agent = %self.agent.name(),
                    grabber = %entry.grabber,
                    action = ?entry.action,
                    "discarding staged action for unregistered grabber"
                );
                out.discarded += 1;
                continue;
            }
            let ev = Event::Motion2(event.following(&entry.press));
            invoke(grabbers, entry.grabber, &entry.action, &ev)?;
            debug!(agent = %self.agent.name(), grabber = %entry.grabber, action = ?entry.action, "staged action consumed");
            out.invoked.push(Invocation {
                grabber: entry.grabber,
                action: entry.action,
            });
        }

        self.agent.update_focus(grabbers, &Event::Motion2(event));
        debug!(
            agent = %self.agent.name(),
            invoked = out.invoked.len(),
            discarded = out.discarded,
            "gesture released"
        );
        Ok(out)
    }

    /// Re-fire the armed continuous action, honoring the pump cadence.
    pub fn pump<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        now: Instant,
    ) -> Result<Option<Invocation<A>>> {
        if !self.session.continuous || self.abandon_orphaned().is_some() {
            return Ok(None);
        }
        if let PumpPolicy::Interval(every) = self.config.pump
            && let Some(last) = self.session.last_pump
            && now.saturating_duration_since(last) < every
        {
            return Ok(None);
        }
        let (Some(grabber), Some(event)) = (self.session.active, self.session.last) else {
            self.session.continuous = false;
            return Ok(None);
        };

        let trigger = Trigger::Motion(self.session.shortcut);
        match self.agent.resolve_trigger(grabber, &trigger).cloned() {
            Some(action) if action.mode() == DispatchMode::Continuous => {
                self.session.last_pump = Some(now);
                if !invoke(grabbers, grabber, &action, &Event::Motion2(event))? {
                    self.session.continuous = false;
                    return Ok(None);
                }
                Ok(Some(Invocation { grabber, action }))
            }
            _ => {
                debug!(agent = %self.agent.name(), %grabber, "continuous binding gone; pump stopped");
                self.session.continuous = false;
                Ok(None)
            }
        }
    }

    /// Count and dispatch a click.
    pub fn click<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        event: ClickEvent,
    ) -> Result<Dispatched<A>> {
        let count = self.clicks.register(event.id, event.timestamp);
        self.agent
            .dispatch(grabbers, &Event::Click(event.with_count(count)))
    }

    /// Dispatch a wheel event to the focused grabber.
    pub fn wheel<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        event: Motion1Event,
    ) -> Result<Dispatched<A>> {
        self.agent.dispatch(grabbers, &Event::Motion1(event))
    }

    /// Dispatch a key event to the focused grabber.
    pub fn key<G: Grabber<A>>(
        &mut self,
        grabbers: &mut Grabbers<G>,
        event: PlainEvent,
    ) -> Result<Dispatched<A>> {
        self.agent.dispatch(grabbers, &Event::Plain(event))
    }

    /// Update focus from a pointer position without acting.
    pub fn hover<G: Grabber<A>>(
        &mut self,
        grabbers: &Grabbers<G>,
        event: Motion2Event,
    ) -> Dispatched<A> {
        Dispatched::Hover(self.agent.update_focus(grabbers, &Event::Motion2(event)))
    }

    /// Abandon the current gesture. Returns the number of staged actions dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.session.staged.len();
        if self.session.phase != GesturePhase::Idle {
            debug!(agent = %self.agent.name(), dropped, "gesture cancelled");
        }
        self.session = Session::default();
        dropped
    }

    /// Forget multi-click runs.
    pub fn reset_clicks(&mut self) {
        self.clicks.reset();
    }

    /// Unregister a grabber, ending the gesture if it was the captured one.
    pub fn unregister(&mut self, id: GrabberId) -> bool {
        let removed = self.agent.unregister(id);
        if self.session.phase != GesturePhase::Idle && self.session.active == Some(id) {
            warn!(
                agent = %self.agent.name(),
                grabber = %id,
                discarded = self.session.staged.len(),
                "active grabber unregistered; gesture abandoned"
            );
            self.session = Session::default();
        } else {
            let before = self.session.staged.len();
            self.session.staged.retain(|s| s.grabber != id);
            let discarded = before - self.session.staged.len();
            if discarded > 0 {
                warn!(agent = %self.agent.name(), grabber = %id, discarded, "staged actions discarded");
            }
        }
        if self.flung == Some(id) {
            self.flung = None;
        }
        removed
    }

    fn is_orphaned(&self) -> bool {
        self.session.phase != GesturePhase::Idle
            && self
                .session
                .active
                .is_some_and(|id| !self.agent.is_registered(id))
    }

    /// End the gesture if its grabber left the agent behind our back.
    /// Returns the number of staged actions dropped.
    fn abandon_orphaned(&mut self) -> Option<usize> {
        if !self.is_orphaned() {
            return None;
        }
        let discarded = self.session.staged.len();
        warn!(
            agent = %self.agent.name(),
            grabber = ?self.session.active,
            discarded,
            "active grabber unregistered; gesture abandoned"
        );
        self.session = Session::default();
        Some(discarded)
    }

    fn halt<G: Grabber<A>>(&mut self, grabbers: &mut Grabbers<G>) {
        if let Some(id) = self.flung.take()
            && let Some(grabber) = grabbers.get_mut(id)
        {
            grabber.halt();
            debug!(agent = %self.agent.name(), grabber = %id, "fling halted");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
