#![forbid(unsafe_code)]

//! Stock action vocabularies and binding schemes for viewer-style scenes.
//!
//! The engine itself is generic over the action type; this module supplies
//! ready-made vocabularies for the common case of an interactive viewer with
//! an eye (camera) and movable objects:
//!
//! - [`MotionAction`] for pointer and wheel, with [`mouse_agent`] installing
//!   one of three [`MouseScheme`]s, laid out for a mouse or a trackpad
//!   ([`PointerDevice`]).
//! - [`KeyAction`] for the keyboard, with [`keyboard_agent`] installing the
//!   default key table.
//!
//! # Branch layout
//!
//! | Agent    | Branch  | Routed kinds       |
//! |----------|---------|--------------------|
//! | mouse    | `eye`   | `Eye`              |
//! | mouse    | `frame` | `Object`, `Scene`  |
//! | keyboard | `scene` | `Scene`            |
//! | keyboard | `eye`   | `Eye`              |
//! | keyboard | `frame` | `Object`           |

use std::fmt;

use crate::agent::Agent;
use crate::branch::BranchId;
use crate::error::Result;
use crate::gesture::{DispatchMode, GestureAction, GestureConfig, PointerAgent};
use crate::grabber::GrabberKind;
use crate::shortcut::{ControlId, Modifiers, Shortcut, Trigger, button};

/// Branch name for eye bindings.
pub const EYE_BRANCH: &str = "eye";
/// Branch name for object bindings.
pub const FRAME_BRANCH: &str = "frame";
/// Branch name for scene-wide key bindings.
pub const SCENE_BRANCH: &str = "scene";

// ---------------------------------------------------------------------------
// Pointer vocabulary
// ---------------------------------------------------------------------------

/// Pointer, wheel and click actions of a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionAction {
    /// Arcball rotation about the pivot.
    Rotate,
    /// Rotation about the screen's normal axis.
    ScreenRotate,
    /// Translation in the view plane.
    Translate,
    /// Translation constrained to the dominant screen axis.
    ScreenTranslate,
    /// Uniform scaling.
    Scale,
    /// Move the eye toward the pivot.
    Zoom,
    /// Fit the rectangle dragged from press to release.
    ZoomOnRegion,
    /// Fly forward while held.
    MoveForward,
    /// Fly backward while held.
    MoveBackward,
    /// Drive along the ground plane while held.
    Drive,
    /// Turn the view direction in place.
    LookAround,
    /// Roll about the view direction.
    RotateZ,
    /// Align the target with the world axes.
    AlignFrame,
    /// Center the target in the view.
    CenterFrame,
}

impl GestureAction for MotionAction {
    fn mode(&self) -> DispatchMode {
        match self {
            Self::ZoomOnRegion => DispatchMode::Deferred,
            Self::MoveForward | Self::MoveBackward | Self::Drive => DispatchMode::Continuous,
            _ => DispatchMode::Immediate,
        }
    }

    fn is_inertial(&self) -> bool {
        matches!(self, Self::Rotate | Self::ScreenRotate)
    }
}

/// Stock pointer binding schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MouseScheme {
    /// Rotate, zoom and pan around a pivot.
    #[default]
    Arcball,
    /// Fly the eye.
    FirstPerson,
    /// Fly an object followed by the eye.
    ThirdPerson,
}

impl fmt::Display for MouseScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arcball => "arcball",
            Self::FirstPerson => "first-person",
            Self::ThirdPerson => "third-person",
        })
    }
}

/// Physical device a [`MouseScheme`] is laid out for.
///
/// Trackpad tables put the primary actions on [`button::NONE`] and select
/// them with modifiers. The host brackets each stroke with
/// [`PointerAgent::press`] and [`PointerAgent::release`] using `button::NONE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerDevice {
    /// Three-button mouse.
    #[default]
    Mouse,
    /// Trackpad; `Alt` strokes are left unbound.
    Trackpad,
}

fn motion(modifiers: Modifiers, id: ControlId) -> Trigger {
    Trigger::Motion(Shortcut::with_modifiers(modifiers, id))
}

fn wheel(modifiers: Modifiers) -> Trigger {
    Trigger::Wheel(Shortcut::with_modifiers(modifiers, button::WHEEL))
}

fn double_click(id: ControlId) -> Trigger {
    Trigger::Click(Shortcut::new(id).clicks(2))
}

/// Build a mouse agent for `scheme` with the default [`GestureConfig`].
pub fn mouse_agent(scheme: MouseScheme, is_3d: bool) -> Result<PointerAgent<MotionAction>> {
    mouse_agent_with(scheme, is_3d, PointerDevice::Mouse, GestureConfig::default())
}

/// Build a pointer agent with `eye` and `frame` branches bound per `scheme`.
///
/// Pass [`GestureConfig::from_env`] to honor the `GRIP_*` variables.
pub fn mouse_agent_with(
    scheme: MouseScheme,
    is_3d: bool,
    device: PointerDevice,
    config: GestureConfig,
) -> Result<PointerAgent<MotionAction>> {
    let mut agent = Agent::new("mouse");
    let eye = agent.add_branch(EYE_BRANCH)?;
    let frame = agent.add_branch(FRAME_BRANCH)?;
    agent.route(GrabberKind::Eye, eye);
    agent.route(GrabberKind::Object, frame);
    agent.route(GrabberKind::Scene, frame);
    apply_scheme(&mut agent, eye, frame, scheme, is_3d, device);
    Ok(PointerAgent::new(agent, config))
}

/// Replace the pointer bindings of `eye` and `frame` with `scheme`.
pub fn apply_scheme(
    agent: &mut Agent<MotionAction>,
    eye: BranchId,
    frame: BranchId,
    scheme: MouseScheme,
    is_3d: bool,
    device: PointerDevice,
) {
    agent.clear_bindings(eye);
    agent.clear_bindings(frame);

    match device {
        PointerDevice::Mouse => bind_mouse(agent, eye, frame, scheme, is_3d),
        PointerDevice::Trackpad => bind_trackpad(agent, eye, frame, scheme, is_3d),
    }

    let zoom = if is_3d { MotionAction::Zoom } else { MotionAction::Scale };
    for branch in [eye, frame] {
        agent.bind(branch, double_click(button::LEFT), MotionAction::AlignFrame);
        agent.bind(branch, double_click(button::RIGHT), MotionAction::CenterFrame);
    }
    agent.bind(eye, wheel(Modifiers::NONE), zoom);
    agent.bind(frame, wheel(Modifiers::NONE), MotionAction::Scale);
}

fn bind_mouse(
    agent: &mut Agent<MotionAction>,
    eye: BranchId,
    frame: BranchId,
    scheme: MouseScheme,
    is_3d: bool,
) {
    use MotionAction as M;
    const NONE: Modifiers = Modifiers::NONE;
    const SHIFT: Modifiers = Modifiers::SHIFT;

    let zoom = if is_3d { M::Zoom } else { M::Scale };
    let arcball_frame = [
        (motion(NONE, button::LEFT), M::Rotate),
        (motion(NONE, button::CENTER), M::Scale),
        (motion(NONE, button::RIGHT), M::Translate),
        (motion(SHIFT, button::CENTER), M::ScreenTranslate),
        (motion(SHIFT, button::RIGHT), M::ScreenRotate),
    ];

    match scheme {
        MouseScheme::Arcball => {
            for (trigger, action) in [
                (motion(NONE, button::LEFT), M::Rotate),
                (motion(NONE, button::CENTER), zoom),
                (motion(NONE, button::RIGHT), M::Translate),
                (motion(SHIFT, button::LEFT), M::ZoomOnRegion),
                (motion(SHIFT, button::CENTER), M::ScreenTranslate),
                (motion(SHIFT, button::RIGHT), M::ScreenRotate),
            ] {
                agent.bind(eye, trigger, action);
            }
            for (trigger, action) in arcball_frame {
                agent.bind(frame, trigger, action);
            }
        }
        MouseScheme::FirstPerson => {
            agent.bind(eye, motion(NONE, button::LEFT), M::MoveForward);
            agent.bind(eye, motion(NONE, button::RIGHT), M::MoveBackward);
            agent.bind(eye, motion(SHIFT, button::LEFT), M::RotateZ);
            agent.bind(eye, wheel(Modifiers::CTRL), M::RotateZ);
            if is_3d {
                agent.bind(eye, motion(NONE, button::CENTER), M::LookAround);
                agent.bind(eye, motion(SHIFT, button::CENTER), M::Drive);
            }
            for (trigger, action) in arcball_frame {
                agent.bind(frame, trigger, action);
            }
        }
        MouseScheme::ThirdPerson => {
            agent.bind(frame, motion(NONE, button::LEFT), M::MoveForward);
            agent.bind(frame, motion(NONE, button::RIGHT), M::MoveBackward);
            agent.bind(frame, motion(SHIFT, button::LEFT), M::RotateZ);
            if is_3d {
                agent.bind(frame, motion(NONE, button::CENTER), M::LookAround);
                agent.bind(frame, motion(SHIFT, button::CENTER), M::Drive);
            }
        }
    }
}

fn bind_trackpad(
    agent: &mut Agent<MotionAction>,
    eye: BranchId,
    frame: BranchId,
    scheme: MouseScheme,
    is_3d: bool,
) {
    use MotionAction as M;
    const NONE: Modifiers = Modifiers::NONE;
    const SHIFT: Modifiers = Modifiers::SHIFT;
    const CTRL: Modifiers = Modifiers::CTRL;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;

    let zoom = if is_3d { M::Zoom } else { M::Scale };
    let arcball_frame = [
        (motion(NONE, button::NONE), M::Rotate),
        (motion(SHIFT, button::NONE), M::Scale),
        (motion(CTRL, button::NONE), M::Translate),
        (motion(NONE, button::CENTER), M::ScreenTranslate),
        (motion(NONE, button::RIGHT), M::ScreenRotate),
    ];

    match scheme {
        MouseScheme::Arcball => {
            for (trigger, action) in [
                (motion(NONE, button::NONE), M::Rotate),
                (motion(SHIFT, button::NONE), zoom),
                (motion(CTRL, button::NONE), M::Translate),
                (motion(ctrl_shift, button::NONE), M::ZoomOnRegion),
                (motion(NONE, button::CENTER), M::ScreenTranslate),
                (motion(NONE, button::RIGHT), M::ScreenRotate),
            ] {
                agent.bind(eye, trigger, action);
            }
            for (trigger, action) in arcball_frame {
                agent.bind(frame, trigger, action);
            }
        }
        MouseScheme::FirstPerson => {
            agent.bind(eye, motion(CTRL, button::NONE), M::MoveForward);
            agent.bind(eye, motion(SHIFT, button::NONE), M::MoveBackward);
            agent.bind(eye, motion(NONE, button::RIGHT), M::RotateZ);
            agent.bind(eye, wheel(ctrl_shift), M::RotateZ);
            if is_3d {
                agent.bind(eye, motion(NONE, button::NONE), M::LookAround);
                agent.bind(eye, motion(ctrl_shift, button::NONE), M::Drive);
            }
            for (trigger, action) in arcball_frame {
                agent.bind(frame, trigger, action);
            }
        }
        MouseScheme::ThirdPerson => {
            agent.bind(frame, motion(CTRL, button::NONE), M::MoveForward);
            agent.bind(frame, motion(SHIFT, button::NONE), M::MoveBackward);
            agent.bind(frame, wheel(ctrl_shift), M::RotateZ);
            if is_3d {
                agent.bind(frame, motion(NONE, button::NONE), M::LookAround);
                agent.bind(frame, motion(ctrl_shift, button::NONE), M::Drive);
            }
        }
    }

    // Alt strokes stay free for the host.
    for branch in [eye, frame] {
        agent.unbind(branch, &motion(Modifiers::ALT, button::NONE));
    }
}

// ---------------------------------------------------------------------------
// Keyboard vocabulary
// ---------------------------------------------------------------------------

/// Virtual key codes used by the default key table.
pub mod vk {
    use crate::shortcut::ControlId;

    /// Left arrow.
    pub const LEFT: ControlId = 37;
    /// Up arrow.
    pub const UP: ControlId = 38;
    /// Right arrow.
    pub const RIGHT: ControlId = 39;
    /// Down arrow.
    pub const DOWN: ControlId = 40;
    /// Digit `1`.
    pub const KEY_1: ControlId = 49;
    /// Digit `2`.
    pub const KEY_2: ControlId = 50;
    /// Digit `3`.
    pub const KEY_3: ControlId = 51;
    /// Letter `A`.
    pub const A: ControlId = 65;
    /// Letter `C`.
    pub const C: ControlId = 67;
    /// Letter `E`.
    pub const E: ControlId = 69;
    /// Letter `F`.
    pub const F: ControlId = 70;
    /// Letter `G`.
    pub const G: ControlId = 71;
    /// Letter `H`.
    pub const H: ControlId = 72;
    /// Letter `M`.
    pub const M: ControlId = 77;
    /// Letter `R`.
    pub const R: ControlId = 82;
    /// Letter `S`.
    pub const S: ControlId = 83;
    /// Letter `X`.
    pub const X: ControlId = 88;
    /// Letter `Y`.
    pub const Y: ControlId = 89;
    /// Letter `Z`.
    pub const Z: ControlId = 90;
}

/// Keyboard actions of a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyAction {
    /// Show or hide the world axes.
    ToggleAxesVisualHint,
    /// Switch between perspective and orthographic projection.
    ToggleCameraType,
    /// Show or hide grabber picking hints.
    TogglePickingVisualHint,
    /// Show or hide the ground grid.
    ToggleGridVisualHint,
    /// Show or hide keyframe paths.
    TogglePathsVisualHint,
    /// Start or stop the scene animation.
    ToggleAnimation,
    /// Print the current bindings.
    DisplayInfo,
    /// Animate the eye until the whole scene is in view.
    InterpolateToFit,
    /// Step the eye left.
    MoveLeft,
    /// Step the eye up.
    MoveUp,
    /// Step the eye right.
    MoveRight,
    /// Step the eye down.
    MoveDown,
    /// Append a keyframe to path `n` (1-based).
    AddKeyframe(u8),
    /// Delete path `n` (1-based).
    DeletePath(u8),
    /// Play path `n` (1-based).
    PlayPath(u8),
    /// Align the target with the world axes.
    AlignFrame,
    /// Center the target in the view.
    CenterFrame,
    /// Step the target along `-X`.
    TranslateDownX,
    /// Step the target along `+X`.
    TranslateUpX,
    /// Step the target along `-Y`.
    TranslateDownY,
    /// Step the target along `+Y`.
    TranslateUpY,
    /// Turn the target clockwise about `Z`.
    RotateDownZ,
    /// Turn the target counter-clockwise about `Z`.
    RotateUpZ,
}

/// Build a keyboard agent with the default `scene`, `eye` and `frame` tables.
pub fn keyboard_agent() -> Result<Agent<KeyAction>> {
    let mut agent = Agent::new("keyboard");
    let scene = agent.add_branch(SCENE_BRANCH)?;
    let eye = agent.add_branch(EYE_BRANCH)?;
    let frame = agent.add_branch(FRAME_BRANCH)?;
    agent.route(GrabberKind::Scene, scene);
    agent.route(GrabberKind::Eye, eye);
    agent.route(GrabberKind::Object, frame);
    set_default_keys(&mut agent, scene, eye, frame);
    Ok(agent)
}

/// Install the default key table into the given branches.
pub fn set_default_keys(
    agent: &mut Agent<KeyAction>,
    scene: BranchId,
    eye: BranchId,
    frame: BranchId,
) {
    use KeyAction as K;
    let key = |id| Trigger::Key(Shortcut::new(id));
    let with = |modifiers, id| Trigger::Key(Shortcut::with_modifiers(modifiers, id));

    for (id, action) in [
        (vk::A, K::ToggleAxesVisualHint),
        (vk::E, K::ToggleCameraType),
        (vk::F, K::TogglePickingVisualHint),
        (vk::G, K::ToggleGridVisualHint),
        (vk::H, K::DisplayInfo),
        (vk::M, K::ToggleAnimation),
        (vk::R, K::TogglePathsVisualHint),
        (vk::S, K::InterpolateToFit),
        (vk::LEFT, K::MoveLeft),
        (vk::UP, K::MoveUp),
        (vk::RIGHT, K::MoveRight),
        (vk::DOWN, K::MoveDown),
    ] {
        agent.bind(scene, key(id), action);
    }
    for (n, id) in [(1_u8, vk::KEY_1), (2, vk::KEY_2), (3, vk::KEY_3)] {
        agent.bind(scene, with(Modifiers::CTRL, id), K::AddKeyframe(n));
        agent.bind(scene, with(Modifiers::ALT, id), K::DeletePath(n));
        agent.bind(scene, key(id), K::PlayPath(n));
    }

    for branch in [eye, frame] {
        agent.bind(branch, key(vk::A), K::AlignFrame);
        agent.bind(branch, key(vk::C), K::CenterFrame);
        agent.bind(branch, key(vk::X), K::TranslateDownX);
        agent.bind(branch, with(Modifiers::SHIFT, vk::X), K::TranslateUpX);
        agent.bind(branch, key(vk::Y), K::TranslateDownY);
        agent.bind(branch, with(Modifiers::SHIFT, vk::Y), K::TranslateUpY);
        agent.bind(branch, key(vk::Z), K::RotateDownZ);
        agent.bind(branch, with(Modifiers::SHIFT, vk::Z), K::RotateUpZ);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(agent: &Agent<MotionAction>, name: &str) -> BranchId {
        agent.branch_id(name).expect("branch exists")
    }

    #[test]
    fn motion_modes() {
        assert_eq!(MotionAction::ZoomOnRegion.mode(), DispatchMode::Deferred);
        assert_eq!(MotionAction::Drive.mode(), DispatchMode::Continuous);
        assert_eq!(MotionAction::Rotate.mode(), DispatchMode::Immediate);
        assert!(MotionAction::Rotate.is_inertial());
        assert!(!MotionAction::Translate.is_inertial());
    }

    #[test]
    fn arcball_3d_bindings() {
        let pointer = mouse_agent(MouseScheme::Arcball, true).expect("fresh agent");
        let agent = pointer.agent();
        let (eye, frame) = (branch(agent, EYE_BRANCH), branch(agent, FRAME_BRANCH));

        assert_eq!(
            agent.action(eye, &motion(Modifiers::NONE, button::CENTER)),
            Some(&MotionAction::Zoom)
        );
        assert_eq!(
            agent.action(eye, &motion(Modifiers::SHIFT, button::LEFT)),
            Some(&MotionAction::ZoomOnRegion)
        );
        assert_eq!(
            agent.action(frame, &motion(Modifiers::NONE, button::CENTER)),
            Some(&MotionAction::Scale)
        );
        assert!(!agent.has_binding(frame, &motion(Modifiers::SHIFT, button::LEFT)));
        assert_eq!(
            agent.action(eye, &wheel(Modifiers::NONE)),
            Some(&MotionAction::Zoom)
        );
        assert_eq!(
            agent.action(frame, &double_click(button::RIGHT)),
            Some(&MotionAction::CenterFrame)
        );
    }

    #[test]
    fn arcball_2d_scales_instead_of_zooming() {
        let pointer = mouse_agent(MouseScheme::Arcball, false).expect("fresh agent");
        let agent = pointer.agent();
        let eye = branch(agent, EYE_BRANCH);
        assert_eq!(
            agent.action(eye, &motion(Modifiers::NONE, button::CENTER)),
            Some(&MotionAction::Scale)
        );
        assert_eq!(
            agent.action(eye, &wheel(Modifiers::NONE)),
            Some(&MotionAction::Scale)
        );
    }

    #[test]
    fn first_person_binds_flight_on_eye() {
        let pointer = mouse_agent(MouseScheme::FirstPerson, true).expect("fresh agent");
        let agent = pointer.agent();
        let eye = branch(agent, EYE_BRANCH);
        assert_eq!(
            agent.action(eye, &motion(Modifiers::NONE, button::LEFT)),
            Some(&MotionAction::MoveForward)
        );
        assert_eq!(
            agent.action(eye, &motion(Modifiers::SHIFT, button::CENTER)),
            Some(&MotionAction::Drive)
        );
        assert_eq!(
            agent.action(eye, &wheel(Modifiers::CTRL)),
            Some(&MotionAction::RotateZ)
        );

        let flat = mouse_agent(MouseScheme::FirstPerson, false).expect("fresh agent");
        let eye = branch(flat.agent(), EYE_BRANCH);
        assert!(
            !flat
                .agent()
                .has_binding(eye, &motion(Modifiers::NONE, button::CENTER))
        );
    }

    #[test]
    fn third_person_binds_flight_on_frame() {
        let pointer = mouse_agent(MouseScheme::ThirdPerson, true).expect("fresh agent");
        let agent = pointer.agent();
        let (eye, frame) = (branch(agent, EYE_BRANCH), branch(agent, FRAME_BRANCH));
        assert_eq!(
            agent.action(frame, &motion(Modifiers::NONE, button::RIGHT)),
            Some(&MotionAction::MoveBackward)
        );
        assert!(!agent.has_binding(eye, &motion(Modifiers::NONE, button::LEFT)));
        assert!(agent.has_binding(eye, &double_click(button::LEFT)));
    }

    fn trackpad(scheme: MouseScheme, is_3d: bool) -> PointerAgent<MotionAction> {
        mouse_agent_with(scheme, is_3d, PointerDevice::Trackpad, GestureConfig::default())
            .expect("fresh agent")
    }

    #[test]
    fn arcball_trackpad_bindings() {
        let pointer = trackpad(MouseScheme::Arcball, true);
        let agent = pointer.agent();
        let (eye, frame) = (branch(agent, EYE_BRANCH), branch(agent, FRAME_BRANCH));
        let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;

        assert_eq!(
            agent.action(eye, &motion(Modifiers::NONE, button::NONE)),
            Some(&MotionAction::Rotate)
        );
        assert_eq!(
            agent.action(eye, &motion(Modifiers::SHIFT, button::NONE)),
            Some(&MotionAction::Zoom)
        );
        assert_eq!(
            agent.action(eye, &motion(Modifiers::CTRL, button::NONE)),
            Some(&MotionAction::Translate)
        );
        assert_eq!(
            agent.action(eye, &motion(ctrl_shift, button::NONE)),
            Some(&MotionAction::ZoomOnRegion)
        );
        assert_eq!(
            agent.action(eye, &motion(Modifiers::NONE, button::RIGHT)),
            Some(&MotionAction::ScreenRotate)
        );
        assert_eq!(
            agent.action(frame, &motion(Modifiers::SHIFT, button::NONE)),
            Some(&MotionAction::Scale)
        );
        assert!(!agent.has_binding(frame, &motion(ctrl_shift, button::NONE)));
        assert!(!agent.has_binding(eye, &motion(Modifiers::NONE, button::LEFT)));
        for b in [eye, frame] {
            assert!(!agent.has_binding(b, &motion(Modifiers::ALT, button::NONE)));
            assert!(agent.has_binding(b, &double_click(button::LEFT)));
        }
    }

    #[test]
    fn arcball_trackpad_2d_scales() {
        let pointer = trackpad(MouseScheme::Arcball, false);
        let eye = branch(pointer.agent(), EYE_BRANCH);
        assert_eq!(
            pointer
                .agent()
                .action(eye, &motion(Modifiers::SHIFT, button::NONE)),
            Some(&MotionAction::Scale)
        );
    }

    #[test]
    fn first_person_trackpad_rolls_on_ctrl_shift_wheel() {
        let pointer = trackpad(MouseScheme::FirstPerson, true);
        let agent = pointer.agent();
        let (eye, frame) = (branch(agent, EYE_BRANCH), branch(agent, FRAME_BRANCH));
        let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;

        assert_eq!(
            agent.action(eye, &motion(Modifiers::CTRL, button::NONE)),
            Some(&MotionAction::MoveForward)
        );
        assert_eq!(
            agent.action(eye, &motion(Modifiers::SHIFT, button::NONE)),
            Some(&MotionAction::MoveBackward)
        );
        assert_eq!(
            agent.action(eye, &motion(Modifiers::NONE, button::RIGHT)),
            Some(&MotionAction::RotateZ)
        );
        assert_eq!(
            agent.action(eye, &wheel(ctrl_shift)),
            Some(&MotionAction::RotateZ)
        );
        assert!(!agent.has_binding(eye, &wheel(Modifiers::CTRL)));
        assert_eq!(
            agent.action(eye, &motion(Modifiers::NONE, button::NONE)),
            Some(&MotionAction::LookAround)
        );
        assert_eq!(
            agent.action(eye, &motion(ctrl_shift, button::NONE)),
            Some(&MotionAction::Drive)
        );
        assert_eq!(
            agent.action(frame, &motion(Modifiers::NONE, button::NONE)),
            Some(&MotionAction::Rotate)
        );

        let flat = trackpad(MouseScheme::FirstPerson, false);
        let eye = branch(flat.agent(), EYE_BRANCH);
        assert!(
            !flat
                .agent()
                .has_binding(eye, &motion(Modifiers::NONE, button::NONE))
        );
    }

    #[test]
    fn third_person_trackpad_binds_frame() {
        let pointer = trackpad(MouseScheme::ThirdPerson, true);
        let agent = pointer.agent();
        let (eye, frame) = (branch(agent, EYE_BRANCH), branch(agent, FRAME_BRANCH));
        let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;

        assert_eq!(
            agent.action(frame, &motion(Modifiers::CTRL, button::NONE)),
            Some(&MotionAction::MoveForward)
        );
        assert_eq!(
            agent.action(frame, &wheel(ctrl_shift)),
            Some(&MotionAction::RotateZ)
        );
        assert_eq!(
            agent.action(frame, &motion(ctrl_shift, button::NONE)),
            Some(&MotionAction::Drive)
        );
        assert!(!agent.has_binding(eye, &motion(Modifiers::CTRL, button::NONE)));
        assert_eq!(
            agent.action(frame, &wheel(Modifiers::NONE)),
            Some(&MotionAction::Scale)
        );
    }

    #[test]
    fn switching_device_replaces_tables() {
        let mut pointer = trackpad(MouseScheme::Arcball, true);
        let eye = branch(pointer.agent(), EYE_BRANCH);
        let frame = branch(pointer.agent(), FRAME_BRANCH);
        apply_scheme(
            pointer.agent_mut(),
            eye,
            frame,
            MouseScheme::Arcball,
            true,
            PointerDevice::Mouse,
        );
        assert!(
            !pointer
                .agent()
                .has_binding(eye, &motion(Modifiers::NONE, button::NONE))
        );
        assert_eq!(
            pointer
                .agent()
                .action(eye, &motion(Modifiers::NONE, button::LEFT)),
            Some(&MotionAction::Rotate)
        );
    }

    #[test]
    fn mouse_agent_uses_given_config() {
        assert_eq!(
            mouse_agent(MouseScheme::Arcball, true)
                .expect("fresh agent")
                .config(),
            &GestureConfig::default()
        );

        let config = GestureConfig::default().with_fling_speed(0.0);
        let pointer = mouse_agent_with(MouseScheme::Arcball, true, PointerDevice::Mouse, config)
            .expect("fresh agent");
        assert_eq!(pointer.config().fling_speed, 0.0);
    }

    #[test]
    fn reapplying_scheme_replaces_bindings() {
        let mut pointer = mouse_agent(MouseScheme::FirstPerson, true).expect("fresh agent");
        let eye = branch(pointer.agent(), EYE_BRANCH);
        let frame = branch(pointer.agent(), FRAME_BRANCH);
        apply_scheme(
            pointer.agent_mut(),
            eye,
            frame,
            MouseScheme::Arcball,
            true,
            PointerDevice::Mouse,
        );
        assert!(!pointer.agent().is_bound(eye, &MotionAction::MoveForward));
        assert!(pointer.agent().is_bound(eye, &MotionAction::ZoomOnRegion));
    }

    #[test]
    fn keyboard_default_table() {
        let agent = keyboard_agent().expect("fresh agent");
        let scene = agent.branch_id(SCENE_BRANCH).expect("scene");
        let frame = agent.branch_id(FRAME_BRANCH).expect("frame");
        let key = |m, id| Trigger::Key(Shortcut::with_modifiers(m, id));

        assert_eq!(
            agent.action(scene, &key(Modifiers::NONE, vk::G)),
            Some(&KeyAction::ToggleGridVisualHint)
        );
        assert_eq!(
            agent.action(scene, &key(Modifiers::CTRL, vk::KEY_2)),
            Some(&KeyAction::AddKeyframe(2))
        );
        assert_eq!(
            agent.action(scene, &key(Modifiers::NONE, vk::KEY_3)),
            Some(&KeyAction::PlayPath(3))
        );
        assert_eq!(
            agent.action(frame, &key(Modifiers::SHIFT, vk::Z)),
            Some(&KeyAction::RotateUpZ)
        );
        assert_eq!(
            agent.action(frame, &key(Modifiers::NONE, vk::A)),
            Some(&KeyAction::AlignFrame)
        );
    }

    #[test]
    fn scheme_display() {
        assert_eq!(MouseScheme::FirstPerson.to_string(), "first-person");
    }
}
