// Copyright 2025 the Raywand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input records, configuration, and the event vocabulary.

use glam::{Affine3A, Vec3};
use raywand_ray::{HitProvider, RayHit};

/// Identifier of a physical controller.
///
/// A dispatcher is bound to exactly one controller; button events carrying
/// any other id are silently ignored.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct ControllerId(pub u8);

/// The two physical button channels of a controller.
///
/// Which channel acts as the selection/drag-capable "primary" input is
/// configuration ([`DispatchConfig::primary`]); the other is the secondary,
/// click-only input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ButtonChannel {
    /// The bumper-like digital button.
    Bumper,
    /// The trigger-like analog button.
    Trigger,
}

impl ButtonChannel {
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Bumper => 0,
            Self::Trigger => 1,
        }
    }
}

/// A discrete press or release callback from the button source.
///
/// The same record is used for both edges; the dispatcher's down/up entry
/// points decide which transition it represents.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonEvent {
    /// The controller that raised the event.
    pub controller: ControllerId,
    /// Which physical channel changed.
    pub channel: ButtonChannel,
    /// Press intensity reported by trigger-like channels, `0.0..=1.0`.
    ///
    /// Accepted but never consulted for threshold logic; bumper-like
    /// channels report `0.0` or `1.0`.
    pub pressure: f32,
    /// Event timestamp in seconds, on the same clock as
    /// [`DispatchConfig::click_window`] comparisons.
    pub time: f64,
}

/// The per-frame snapshot handed to the dispatcher.
///
/// `hit` is the hit-test provider's answer for this frame, sampled exactly
/// once; `pointer` is the pointer's world-space pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameSample<K> {
    /// The object under the pointer ray, if any.
    pub hit: Option<RayHit<K>>,
    /// The pointer's spatial transform.
    pub pointer: Affine3A,
}

impl<K> FrameSample<K> {
    /// Snapshot the provider's answer for this frame.
    ///
    /// Call once per frame; button handlers run against the last snapshot
    /// rather than re-querying the provider.
    pub fn sampled<P: HitProvider<K>>(provider: &P, pointer: Affine3A) -> Self {
        Self {
            hit: provider.sample(),
            pointer,
        }
    }
}

/// Dispatcher configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DispatchConfig {
    /// The channel that drives selection and drags.
    pub primary: ButtonChannel,
    /// Maximum elapsed seconds between a press and a release on the same
    /// object for the pair to count as a click. The comparison is strict:
    /// a release at exactly the window does not click.
    pub click_window: f64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            primary: ButtonChannel::Bumper,
            click_window: 0.8,
        }
    }
}

impl DispatchConfig {
    /// The channel playing the secondary role under this configuration.
    pub const fn secondary(&self) -> ButtonChannel {
        match self.primary {
            ButtonChannel::Bumper => ButtonChannel::Trigger,
            ButtonChannel::Trigger => ButtonChannel::Bumper,
        }
    }
}

/// Transient context snapshot passed alongside every delivered event.
///
/// Rebuilt at each frame update and at each button callback from the state
/// captured at the last frame's hit test; fully owned and overwritten by the
/// dispatcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventContext<K> {
    /// The currently selected object, before any selection change the
    /// current handler is about to make.
    pub selected: Option<K>,
    /// The pointer's spatial transform.
    pub pointer: Affine3A,
    /// The raw object under the ray, before ancestor resolution.
    pub raw_hit: Option<K>,
    /// World-space hit point. Only meaningful inside drag and end-drag
    /// deliveries; elsewhere it merely echoes the last sample.
    pub hit_point: Option<Vec3>,
}

/// A semantic interaction event addressed to one scene object.
///
/// Events are delivered only to objects carrying the matching
/// [`raywand_target::Capability`] flag; the dispatcher checks and silently
/// skips the rest.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PointerEvent<K> {
    /// The pointer started hitting the object.
    PointerEnter(K),
    /// The pointer stopped hitting the object.
    PointerExit(K),
    /// The pointer rested on the object for another frame.
    PointerStay(K),
    /// Primary button pressed on the object.
    PointerDown(K),
    /// Primary button released over the object.
    PointerUp(K),
    /// Primary press/release pair landed on the object within the click window.
    PointerClick(K),
    /// Secondary button pressed on the object.
    SecondaryDown(K),
    /// Secondary button released over the object.
    SecondaryUp(K),
    /// Secondary press/release pair landed on the object within the click window.
    SecondaryClick(K),
    /// The object became the selection.
    Select(K),
    /// The object stopped being the selection.
    Deselect(K),
    /// Per-frame notification to the selected object.
    UpdateSelected(K),
    /// Press landed on an object that defers drag initiation to an external
    /// decision; see [`crate::Dispatcher::begin_pending_drag`].
    InitializePotentialDrag(K),
    /// A drag started on the object.
    BeginDrag(K),
    /// Per-frame notification to the dragged object.
    Drag(K),
    /// The drag on the object completed.
    EndDrag(K),
}

impl<K: Copy> PointerEvent<K> {
    /// The object this event is addressed to.
    pub fn target(&self) -> K {
        match self {
            Self::PointerEnter(k)
            | Self::PointerExit(k)
            | Self::PointerStay(k)
            | Self::PointerDown(k)
            | Self::PointerUp(k)
            | Self::PointerClick(k)
            | Self::SecondaryDown(k)
            | Self::SecondaryUp(k)
            | Self::SecondaryClick(k)
            | Self::Select(k)
            | Self::Deselect(k)
            | Self::UpdateSelected(k)
            | Self::InitializePotentialDrag(k)
            | Self::BeginDrag(k)
            | Self::Drag(k)
            | Self::EndDrag(k) => *k,
        }
    }
}
