// Copyright 2025 the Raywand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raywand Dispatch: a frame-driven interaction dispatcher for ray pointers.
//!
//! ## Overview
//!
//! This crate routes low-level spatial-pointer input — a ray cast against a
//! 3-D scene plus two physical controller buttons — into semantic
//! interaction events: enter/exit/stay, down/up/click, select/deselect, and
//! the begin/drag/end lifecycle. Events are delivered to whichever scene
//! objects declare interest via [`raywand_target::Capability`] flags; it is
//! the dispatching layer underlying sliders, buttons, and panels in a
//! spatial UI.
//!
//! It does not perform hit testing. Instead, feed it a [`FrameSample`] each
//! frame (for example built from [`raywand_ray::nearest_hit`] or a physics
//! engine's raycast) and forward the controller's discrete button callbacks;
//! it emits capability-checked events through a host callback.
//!
//! ## Inputs
//!
//! - [`FrameSample`]: the hit-test provider's once-per-frame answer plus the
//!   pointer pose. Sampled once; button handlers run against the last
//!   sample, never a fresh raycast.
//! - [`ButtonEvent`]: a press or release on one of two channels
//!   ([`ButtonChannel::Bumper`] or [`ButtonChannel::Trigger`]), carrying the
//!   controller id and a host-supplied timestamp. [`DispatchConfig`] names
//!   one channel primary (selection and drags) and the other secondary
//!   (clicks only).
//!
//! ## Workflow
//!
//! 1) Construct a [`Dispatcher`] and [`Dispatcher::bind`] it to the
//!    controller once acquired; an unbound dispatcher processes nothing.
//! 2) Each frame, call [`Dispatcher::on_frame`] with the sample, the scene
//!    lookups, and an event sink.
//! 3) Forward button callbacks to [`Dispatcher::on_button_down`] /
//!    [`Dispatcher::on_button_up`].
//! 4) For targets that defer drag initiation
//!    ([`raywand_target::Capability::INIT_POTENTIAL_DRAG`]), call
//!    [`Dispatcher::begin_pending_drag`] when the external criterion decides
//!    the drag should start.
//!
//! ## Minimal example
//!
//! ```
//! use glam::Affine3A;
//! use raywand_dispatch::{
//!     ButtonChannel, ButtonEvent, ControllerId, DispatchConfig, Dispatcher, FrameSample,
//!     PointerEvent,
//! };
//! use raywand_ray::RayHit;
//! use raywand_target::{Capability, SceneMap};
//!
//! let mut scene: SceneMap<u32> = SceneMap::new();
//! scene.insert(
//!     1,
//!     None,
//!     Capability::EVENT_TARGET | Capability::POINTER_ENTER | Capability::POINTER_CLICK,
//! );
//!
//! let mut dispatcher = Dispatcher::new(DispatchConfig::default());
//! dispatcher.bind(ControllerId(0));
//!
//! // Frame: the ray rests on object 1.
//! let sample = FrameSample {
//!     hit: Some(RayHit {
//!         node: 1_u32,
//!         point: glam::Vec3::new(0.0, 0.0, -1.0),
//!         distance: 1.0,
//!     }),
//!     pointer: Affine3A::IDENTITY,
//! };
//! let mut seen = Vec::new();
//! dispatcher.on_frame(&sample, &scene, |event, _cx| seen.push(event));
//! assert_eq!(seen, vec![PointerEvent::PointerEnter(1)]);
//!
//! // A quick primary press/release pair on the same object clicks it.
//! let down = ButtonEvent {
//!     controller: ControllerId(0),
//!     channel: ButtonChannel::Bumper,
//!     pressure: 1.0,
//!     time: 0.0,
//! };
//! let up = ButtonEvent { time: 0.25, ..down };
//! seen.clear();
//! dispatcher.on_button_down(&down, &scene, |event, _cx| seen.push(event));
//! dispatcher.on_button_up(&up, &scene, |event, _cx| seen.push(event));
//! assert!(seen.contains(&PointerEvent::PointerClick(1)));
//! ```
//!
//! ## Concurrency model
//!
//! Single-threaded and cooperative: one per-frame update plus serialized
//! button callbacks. All cross-frame state is owned by the [`Dispatcher`]
//! value, and every entry point takes `&mut self`, so overlapping handler
//! execution is unrepresentable. There is no cancellation; a drag ends with
//! the matching primary release or is abandoned by [`Dispatcher::unbind`].
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod dispatcher;
mod types;

pub use dispatcher::Dispatcher;
pub use types::{
    ButtonChannel, ButtonEvent, ControllerId, DispatchConfig, EventContext, FrameSample,
    PointerEvent,
};
