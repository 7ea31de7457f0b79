#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! Hosts translate their native device events into one of the [`Event`]
//! variants. Every variant carries the [`Modifiers`] held and a control id,
//! so each can produce the [`Shortcut`] used for binding lookup.
//!
//! | Variant   | Degrees of freedom | Trigger table |
//! |-----------|--------------------|---------------|
//! | `Plain`   | 0 (keys)           | `Key`         |
//! | `Motion1` | 1 (wheel)          | `Wheel`       |
//! | `Motion2` | 2 (pointer)        | `Motion`      |
//! | `Click`   | 2 + count          | `Click`       |
//!
//! # Previous-sample links
//!
//! Motion events may carry the preceding sample of the same stream. The link
//! is a by-value [`Sample1`]/[`Sample2`] holding only position and timestamp,
//! so a chain is always exactly one step deep and an event never keeps its
//! predecessor's predecessor alive.

use web_time::{Duration, Instant};

use crate::shortcut::{ControlId, Modifiers, Shortcut, Trigger};

/// A point in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

fn elapsed_secs(now: Instant, then: Instant) -> f32 {
    now.saturating_duration_since(then).as_secs_f32()
}

// ---------------------------------------------------------------------------
// Plain (keyboard)
// ---------------------------------------------------------------------------

/// A key press with no motion component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlainEvent {
    /// Virtual key code.
    pub id: ControlId,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// When the event occurred.
    pub timestamp: Instant,
}

impl PlainEvent {
    /// Create a key event with no modifiers.
    #[must_use]
    pub const fn new(id: ControlId, timestamp: Instant) -> Self {
        Self {
            id,
            modifiers: Modifiers::NONE,
            timestamp,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The binding key.
    #[must_use]
    pub const fn shortcut(&self) -> Shortcut {
        Shortcut::with_modifiers(self.modifiers, self.id)
    }
}

// ---------------------------------------------------------------------------
// Motion1 (wheel)
// ---------------------------------------------------------------------------

/// Value and timestamp of a one-dimensional motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample1 {
    /// Absolute value.
    pub value: f32,
    /// When the sample was taken.
    pub timestamp: Instant,
}

/// One degree-of-freedom motion, such as a wheel tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion1Event {
    /// Control id (usually [`button::WHEEL`](crate::shortcut::button::WHEEL)).
    pub id: ControlId,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Absolute value.
    pub value: f32,
    /// Change relative to the previous sample, or the raw step when unlinked.
    pub delta: f32,
    /// When the event occurred.
    pub timestamp: Instant,
    /// Preceding sample of the same stream.
    pub previous: Option<Sample1>,
}

impl Motion1Event {
    /// Create an unlinked wheel event. `delta` is the step reported by the device.
    #[must_use]
    pub const fn new(id: ControlId, delta: f32, timestamp: Instant) -> Self {
        Self {
            id,
            modifiers: Modifiers::NONE,
            value: delta,
            delta,
            timestamp,
            previous: None,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Link this event to `prev`, accumulating `value` and keeping `delta`.
    #[must_use]
    pub fn following(mut self, prev: &Self) -> Self {
        self.value = prev.value + self.delta;
        self.previous = Some(prev.sample());
        self
    }

    /// Position-and-time snapshot of this event.
    #[must_use]
    pub const fn sample(&self) -> Sample1 {
        Sample1 {
            value: self.value,
            timestamp: self.timestamp,
        }
    }

    /// |delta| per second since the previous sample; `0.0` when unlinked.
    #[must_use]
    pub fn speed(&self) -> f32 {
        let Some(prev) = self.previous else {
            return 0.0;
        };
        let secs = elapsed_secs(self.timestamp, prev.timestamp);
        if secs > 0.0 {
            self.delta.abs() / secs
        } else {
            0.0
        }
    }

    /// Time since the previous sample; zero when unlinked.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.previous.map_or(Duration::ZERO, |p| {
            self.timestamp.saturating_duration_since(p.timestamp)
        })
    }

    /// The binding key.
    #[must_use]
    pub const fn shortcut(&self) -> Shortcut {
        Shortcut::with_modifiers(self.modifiers, self.id)
    }
}

// ---------------------------------------------------------------------------
// Motion2 (pointer)
// ---------------------------------------------------------------------------

/// Position and timestamp of a two-dimensional motion sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample2 {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// When the sample was taken.
    pub timestamp: Instant,
}

impl Sample2 {
    /// The sample position.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Two degree-of-freedom pointer motion: press, drag, release or hover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion2Event {
    /// Button id ([`button::NONE`](crate::shortcut::button::NONE) for hover).
    pub id: ControlId,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Horizontal change relative to `previous`.
    pub dx: f32,
    /// Vertical change relative to `previous`.
    pub dy: f32,
    /// When the event occurred.
    pub timestamp: Instant,
    /// Preceding sample of the same stream.
    pub previous: Option<Sample2>,
}

impl Motion2Event {
    /// Create an unlinked pointer event at `(x, y)`.
    #[must_use]
    pub const fn new(id: ControlId, x: f32, y: f32, timestamp: Instant) -> Self {
        Self {
            id,
            modifiers: Modifiers::NONE,
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            timestamp,
            previous: None,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Link this event to `prev` and recompute `dx`/`dy`.
    #[must_use]
    pub fn following(self, prev: &Self) -> Self {
        self.following_sample(prev.sample())
    }

    /// Link this event to a bare sample and recompute `dx`/`dy`.
    #[must_use]
    pub fn following_sample(mut self, prev: Sample2) -> Self {
        self.dx = self.x - prev.x;
        self.dy = self.y - prev.y;
        self.previous = Some(prev);
        self
    }

    /// Position-and-time snapshot of this event.
    #[must_use]
    pub const fn sample(&self) -> Sample2 {
        Sample2 {
            x: self.x,
            y: self.y,
            timestamp: self.timestamp,
        }
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Distance travelled per second since the previous sample; `0.0` when
    /// unlinked or when no time has elapsed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        let Some(prev) = self.previous else {
            return 0.0;
        };
        let secs = elapsed_secs(self.timestamp, prev.timestamp);
        if secs > 0.0 {
            self.dx.hypot(self.dy) / secs
        } else {
            0.0
        }
    }

    /// Time since the previous sample; zero when unlinked.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.previous.map_or(Duration::ZERO, |p| {
            self.timestamp.saturating_duration_since(p.timestamp)
        })
    }

    /// The binding key.
    #[must_use]
    pub const fn shortcut(&self) -> Shortcut {
        Shortcut::with_modifiers(self.modifiers, self.id)
    }
}

// ---------------------------------------------------------------------------
// Click
// ---------------------------------------------------------------------------

/// A button click at a position, with its multi-click count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Button id.
    pub id: ControlId,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
    /// Consecutive click count (1 = single click).
    pub count: u8,
    /// When the event occurred.
    pub timestamp: Instant,
}

impl ClickEvent {
    /// Create a single click at `(x, y)`.
    #[must_use]
    pub const fn new(id: ControlId, x: f32, y: f32, timestamp: Instant) -> Self {
        Self {
            id,
            modifiers: Modifiers::NONE,
            x,
            y,
            count: 1,
            timestamp,
        }
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the click count.
    #[must_use]
    pub const fn with_count(mut self, count: u8) -> Self {
        self.count = count;
        self
    }

    /// The binding key, without the count.
    #[must_use]
    pub const fn shortcut(&self) -> Shortcut {
        Shortcut::with_modifiers(self.modifiers, self.id)
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// Any input event the engine can route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Keyboard key.
    Plain(PlainEvent),
    /// Wheel or other single-axis motion.
    Motion1(Motion1Event),
    /// Pointer motion.
    Motion2(Motion2Event),
    /// Pointer click.
    Click(ClickEvent),
}

impl Event {
    /// The binding key and the table it is looked up in.
    #[must_use]
    pub const fn trigger(&self) -> Trigger {
        match self {
            Self::Plain(e) => Trigger::Key(e.shortcut()),
            Self::Motion1(e) => Trigger::Wheel(e.shortcut()),
            Self::Motion2(e) => Trigger::Motion(e.shortcut()),
            Self::Click(e) => Trigger::Click(e.shortcut().clicks(e.count)),
        }
    }

    /// The binding key without click count.
    #[must_use]
    pub const fn shortcut(&self) -> Shortcut {
        self.trigger().shortcut()
    }

    /// Modifiers held.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        match self {
            Self::Plain(e) => e.modifiers,
            Self::Motion1(e) => e.modifiers,
            Self::Motion2(e) => e.modifiers,
            Self::Click(e) => e.modifiers,
        }
    }

    /// Control id.
    #[must_use]
    pub const fn id(&self) -> ControlId {
        match self {
            Self::Plain(e) => e.id,
            Self::Motion1(e) => e.id,
            Self::Motion2(e) => e.id,
            Self::Click(e) => e.id,
        }
    }

    /// When the event occurred.
    #[must_use]
    pub const fn timestamp(&self) -> Instant {
        match self {
            Self::Plain(e) => e.timestamp,
            Self::Motion1(e) => e.timestamp,
            Self::Motion2(e) => e.timestamp,
            Self::Click(e) => e.timestamp,
        }
    }

    /// Pointer position for position-bearing events (`Motion2`, `Click`).
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Motion2(e) => Some(e.position()),
            Self::Click(e) => Some(Point::new(e.x, e.y)),
            Self::Plain(_) | Self::Motion1(_) => None,
        }
    }
}

impl From<PlainEvent> for Event {
    fn from(e: PlainEvent) -> Self {
        Self::Plain(e)
    }
}

impl From<Motion1Event> for Event {
    fn from(e: Motion1Event) -> Self {
        Self::Motion1(e)
    }
}

impl From<Motion2Event> for Event {
    fn from(e: Motion2Event) -> Self {
        Self::Motion2(e)
    }
}

impl From<ClickEvent> for Event {
    fn from(e: ClickEvent) -> Self {
        Self::Click(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::button;

    fn now() -> Instant {
        Instant::now()
    }

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn following_recomputes_deltas() {
        let t = now();
        let a = Motion2Event::new(button::LEFT, 10.0, 10.0, t);
        let b = Motion2Event::new(button::LEFT, 13.0, 14.0, t + MS_100).following(&a);
        assert_eq!(b.dx, 3.0);
        assert_eq!(b.dy, 4.0);
        assert_eq!(b.previous, Some(a.sample()));
        assert_eq!(b.delay(), MS_100);
    }

    #[test]
    fn speed_is_distance_over_time() {
        let t = now();
        let a = Motion2Event::new(button::LEFT, 0.0, 0.0, t);
        let b = Motion2Event::new(button::LEFT, 3.0, 4.0, t + MS_100).following(&a);
        assert!((b.speed() - 50.0).abs() < 1e-3);
    }

    #[test]
    fn speed_is_zero_without_previous_or_elapsed_time() {
        let t = now();
        let a = Motion2Event::new(button::LEFT, 0.0, 0.0, t);
        assert_eq!(a.speed(), 0.0);
        let b = Motion2Event::new(button::LEFT, 5.0, 0.0, t).following(&a);
        assert_eq!(b.speed(), 0.0);
    }

    #[test]
    fn chain_is_one_step_deep() {
        let t = now();
        let a = Motion2Event::new(button::LEFT, 0.0, 0.0, t);
        let b = Motion2Event::new(button::LEFT, 1.0, 0.0, t + MS_100).following(&a);
        let c = Motion2Event::new(button::LEFT, 2.0, 0.0, t + MS_100 * 2).following(&b);
        let prev = c.previous.expect("linked");
        assert_eq!(prev.position(), Point::new(1.0, 0.0));
        assert_eq!(c.dx, 1.0);
    }

    #[test]
    fn wheel_following_accumulates_value() {
        let t = now();
        let a = Motion1Event::new(button::WHEEL, 1.0, t);
        let b = Motion1Event::new(button::WHEEL, -2.0, t + MS_100).following(&a);
        assert_eq!(b.value, -1.0);
        assert_eq!(b.delta, -2.0);
        assert!((b.speed() - 20.0).abs() < 1e-3);
    }

    #[test]
    fn trigger_follows_variant() {
        let t = now();
        let key = Event::from(PlainEvent::new(65, t).with_modifiers(Modifiers::CTRL));
        assert_eq!(
            key.trigger(),
            Trigger::Key(Shortcut::with_modifiers(Modifiers::CTRL, 65))
        );
        assert_eq!(key.position(), None);

        let wheel = Event::from(Motion1Event::new(button::WHEEL, 1.0, t));
        assert_eq!(wheel.trigger(), Trigger::Wheel(Shortcut::new(button::WHEEL)));

        let click = Event::from(ClickEvent::new(button::LEFT, 2.0, 3.0, t).with_count(2));
        assert_eq!(
            click.trigger(),
            Trigger::Click(Shortcut::new(button::LEFT).clicks(2))
        );
        assert_eq!(click.position(), Some(Point::new(2.0, 3.0)));
        assert_eq!(click.shortcut(), Shortcut::new(button::LEFT));
    }

    #[test]
    fn accessors_agree_across_variants() {
        let t = now();
        let e = Event::from(
            Motion2Event::new(button::RIGHT, 1.0, 2.0, t).with_modifiers(Modifiers::SHIFT),
        );
        assert_eq!(e.id(), button::RIGHT);
        assert_eq!(e.modifiers(), Modifiers::SHIFT);
        assert_eq!(e.timestamp(), t);
        assert_eq!(e.position(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn point_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
