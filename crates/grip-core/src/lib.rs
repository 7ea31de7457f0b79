#![forbid(unsafe_code)]

//! Core: shortcut bindings, focus routing, and pointer gesture dispatch.
//!
//! # Role in grip
//! `grip-core` turns device events into application actions. The host feeds
//! canonical [`Event`]s; the engine decides which grabber has focus, looks the
//! event's [`Shortcut`] up in that grabber's binding tables, and hands the
//! resolved action token to [`Grabber::consume`]. The engine never knows what
//! an action does.
//!
//! # Primary responsibilities
//! - **Shortcut / Profile / Branch**: exact-match binding tables keyed by
//!   modifier mask and control id, grouped per trigger kind.
//! - **Agent**: grabber membership, focus resolution with default fallback,
//!   and kind-based routing to branches.
//! - **PointerAgent**: press/drag/release lifecycle with immediate,
//!   continuous and deferred actions, multi-click counting and fling.
//! - **Presets**: stock viewer vocabularies and binding schemes.
//!
//! # How it fits in the system
//! Grabbers are owned by the host in a [`Grabbers`] arena. Any number of
//! agents (typically one keyboard [`Agent`] and one [`PointerAgent`]) share
//! that arena by [`GrabberId`]. All operations are synchronous and take
//! `&mut self`; the host drives [`PointerAgent::pump`] from its frame tick
//! while [`PointerAgent::is_continuous`] holds.

pub mod agent;
pub mod branch;
pub mod click;
pub mod error;
pub mod event;
pub mod gesture;
pub mod grabber;
pub mod preset;
pub mod profile;
pub mod shortcut;

pub use agent::{Agent, Dispatched, Invocation};
pub use branch::{Branch, BranchId};
pub use click::ClickCounter;
pub use error::{GripError, Result};
pub use event::{
    ClickEvent, Event, Motion1Event, Motion2Event, PlainEvent, Point, Sample1, Sample2,
};
pub use gesture::{
    DispatchMode, GestureAction, GestureConfig, GesturePhase, PointerAgent, PumpPolicy, Release,
};
pub use grabber::{ConsumeError, Grabber, GrabberId, GrabberKind, Grabbers};
pub use profile::Profile;
pub use shortcut::{ClickShortcut, ControlId, Modifiers, Shortcut, Trigger, button};
