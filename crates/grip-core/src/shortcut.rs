#![forbid(unsafe_code)]

//! Shortcut keys: the identity used to look up bindings.
//!
//! A [`Shortcut`] pairs a [`Modifiers`] mask with a device-specific
//! [`ControlId`] (a mouse button, a virtual key code, a wheel id). Equality and
//! hashing are structural, so two shortcuts bind to the same action only when
//! both the mask and the id match.
//!
//! # Design Notes
//!
//! - `id` identifies a control *within* a modifier context, not globally:
//!   `Shift+LEFT` and `LEFT` are different shortcuts.
//! - Click bindings are keyed by [`ClickShortcut`], which adds the click count
//!   so single-, double- and triple-click can carry distinct bindings.
//! - [`Trigger`] says which binding table of a branch a shortcut belongs to.

use std::fmt;

use bitflags::bitflags;

/// Device-specific control identifier (button, virtual key, wheel).
pub type ControlId = u32;

/// The "no control" id, used by [`Shortcut::default`].
pub const NO_ID: ControlId = 0;

/// Well-known pointer button ids.
pub mod button {
    use super::ControlId;

    /// Motion with no button held (trackpads, hover).
    pub const NONE: ControlId = 0;
    /// Left mouse button.
    pub const LEFT: ControlId = 1;
    /// Center mouse button (wheel click).
    pub const CENTER: ControlId = 2;
    /// Right mouse button.
    pub const RIGHT: ControlId = 3;
    /// Mouse wheel, for one-degree-of-freedom bindings.
    pub const WHEEL: ControlId = 8;
}

bitflags! {
    /// Modifier keys held while a control is actuated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE      = 0b0_0000;
        /// Shift key.
        const SHIFT     = 0b0_0001;
        /// Control key.
        const CTRL      = 0b0_0010;
        /// Alt/Option key.
        const ALT       = 0b0_0100;
        /// Meta/Command/Super key.
        const META      = 0b0_1000;
        /// AltGr key.
        const ALT_GRAPH = 0b1_0000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Modifiers {
    /// Renders the mask as `CTRL+SHIFT`, or an empty string for `NONE`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::CTRL, "CTRL"),
            (Self::ALT, "ALT"),
            (Self::SHIFT, "SHIFT"),
            (Self::META, "META"),
            (Self::ALT_GRAPH, "ALT_GRAPH"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shortcut
// ---------------------------------------------------------------------------

/// Immutable binding key: a modifier mask plus a control id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shortcut {
    modifiers: Modifiers,
    id: ControlId,
}

impl Shortcut {
    /// Shortcut for `id` with no modifiers.
    #[must_use]
    pub const fn new(id: ControlId) -> Self {
        Self {
            modifiers: Modifiers::NONE,
            id,
        }
    }

    /// Shortcut for `id` under the given modifier mask.
    #[must_use]
    pub const fn with_modifiers(modifiers: Modifiers, id: ControlId) -> Self {
        Self { modifiers, id }
    }

    /// The modifier mask.
    #[inline]
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// The control id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ControlId {
        self.id
    }

    /// Pair this shortcut with a click count.
    #[must_use]
    pub const fn clicks(self, count: u8) -> ClickShortcut {
        ClickShortcut::new(self, count)
    }
}

impl From<ControlId> for Shortcut {
    fn from(id: ControlId) -> Self {
        Self::new(id)
    }
}

impl From<(Modifiers, ControlId)> for Shortcut {
    fn from((modifiers, id): (Modifiers, ControlId)) -> Self {
        Self::with_modifiers(modifiers, id)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "ID_{}", self.id)
        } else {
            write!(f, "{}+ID_{}", self.modifiers, self.id)
        }
    }
}

// ---------------------------------------------------------------------------
// ClickShortcut
// ---------------------------------------------------------------------------

/// Click binding key: a shortcut plus the exact number of clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClickShortcut {
    /// Button and modifiers.
    pub shortcut: Shortcut,
    /// Number of consecutive clicks (1 = single click).
    pub count: u8,
}

impl ClickShortcut {
    /// Create a click shortcut.
    #[must_use]
    pub const fn new(shortcut: Shortcut, count: u8) -> Self {
        Self { shortcut, count }
    }
}

impl fmt::Display for ClickShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.shortcut, self.count)
    }
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// Which binding table of a branch a key lives in.
///
/// Each [`Event`](crate::event::Event) variant maps to exactly one trigger
/// kind, so keyboard, wheel, pointer-motion and click bindings never collide
/// even when they share a control id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Trigger {
    /// Keyboard key (plain events).
    Key(Shortcut),
    /// One degree-of-freedom motion (wheel).
    Wheel(Shortcut),
    /// Two degree-of-freedom motion (pointer press/drag).
    Motion(Shortcut),
    /// Multi-click.
    Click(ClickShortcut),
}

impl Trigger {
    /// The shortcut, without any click count.
    #[must_use]
    pub const fn shortcut(&self) -> Shortcut {
        match self {
            Self::Key(s) | Self::Wheel(s) | Self::Motion(s) => *s,
            Self::Click(c) => c.shortcut,
        }
    }
}

impl From<ClickShortcut> for Trigger {
    fn from(click: ClickShortcut) -> Self {
        Self::Click(click)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(s) => write!(f, "key {s}"),
            Self::Wheel(s) => write!(f, "wheel {s}"),
            Self::Motion(s) => write!(f, "motion {s}"),
            Self::Click(c) => write!(f, "click {c}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
