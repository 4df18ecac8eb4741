// Copyright 2025 the Raywand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A floating panel with two buttons and a draggable slider handle.
//!
//! This example shows how to combine:
//! - `raywand_ray` for casting the pointer ray against pick shapes,
//! - `raywand_target` for capability flags and ancestor resolution,
//! - `raywand_dispatch` for turning frames and button edges into events.
//!
//! Run:
//! - `cargo run -p raywand_examples --example panel_buttons`

use std::collections::HashMap;

use glam::{Affine3A, Quat, Vec3};
use raywand_dispatch::{
    ButtonChannel, ButtonEvent, ControllerId, DispatchConfig, Dispatcher, FrameSample,
};
use raywand_ray::{Aabb, HitParams, Ray, RayHitScore, RayTest, Sphere, nearest_hit};
use raywand_target::{Capability, SceneMap};

/// Scene object ids. Small integers keep the printout readable.
const PANEL: u32 = 1;
const OK_BUTTON: u32 = 10;
const OK_COLLIDER: u32 = 11;
const CANCEL_BUTTON: u32 = 20;
const SLIDER_HANDLE: u32 = 30;

/// Pick shapes for the collider objects.
#[derive(Clone, Copy, Debug)]
enum Shape {
    Sphere(Sphere),
    Aabb(Aabb),
}

/// Implement ray testing by delegating to the underlying geometry.
impl RayTest for Shape {
    fn ray_test(&self, ray: &Ray, params: &HitParams) -> Option<RayHitScore> {
        match self {
            Shape::Sphere(s) => s.ray_test(ray, params),
            Shape::Aabb(b) => b.ray_test(ray, params),
        }
    }
}

fn main() {
    // Capability wiring: the OK button receives events through a small
    // collider child; the slider handle drags directly on press.
    let mut scene: SceneMap<u32> = SceneMap::new();
    scene.insert(PANEL, None, Capability::empty());
    scene.insert(
        OK_BUTTON,
        Some(PANEL),
        Capability::EVENT_TARGET
            | Capability::POINTER_ENTER
            | Capability::POINTER_EXIT
            | Capability::POINTER_DOWN
            | Capability::POINTER_UP
            | Capability::POINTER_CLICK
            | Capability::SELECT
            | Capability::DESELECT,
    );
    scene.insert(OK_COLLIDER, Some(OK_BUTTON), Capability::empty());
    scene.insert(
        CANCEL_BUTTON,
        Some(PANEL),
        Capability::EVENT_TARGET
            | Capability::POINTER_ENTER
            | Capability::POINTER_EXIT
            | Capability::SECONDARY_DOWN
            | Capability::SECONDARY_UP
            | Capability::SECONDARY_CLICK,
    );
    scene.insert(
        SLIDER_HANDLE,
        Some(PANEL),
        Capability::EVENT_TARGET
            | Capability::POINTER_ENTER
            | Capability::POINTER_EXIT
            | Capability::BEGIN_DRAG
            | Capability::DRAG
            | Capability::END_DRAG
            | Capability::SELECT
            | Capability::DESELECT,
    );

    // Collider geometry, one meter in front of the user.
    let mut shapes: HashMap<u32, Shape> = HashMap::new();
    shapes.insert(
        OK_COLLIDER,
        Shape::Sphere(Sphere {
            center: Vec3::new(-0.2, 0.0, -1.0),
            radius: 0.08,
        }),
    );
    shapes.insert(
        CANCEL_BUTTON,
        Shape::Sphere(Sphere {
            center: Vec3::new(0.2, 0.0, -1.0),
            radius: 0.08,
        }),
    );
    shapes.insert(
        SLIDER_HANDLE,
        Shape::Aabb(Aabb::from_corners(
            Vec3::new(-0.05, -0.25, -1.02),
            Vec3::new(0.05, -0.15, -0.98),
        )),
    );

    let controller = ControllerId(0);
    let mut dispatcher = Dispatcher::new(DispatchConfig::default());
    dispatcher.bind(controller);

    let params = HitParams {
        max_distance: 5.0,
        ..HitParams::default()
    };

    // A scripted session: aim at the OK button and click it, glance at the
    // cancel button, then grab the slider handle and drag it.
    let aim_at = |target: Vec3| {
        Affine3A::from_rotation_translation(
            Quat::from_rotation_arc(Vec3::NEG_Z, target.normalize()),
            Vec3::ZERO,
        )
    };
    let ok = Vec3::new(-0.2, 0.0, -1.0);
    let cancel = Vec3::new(0.2, 0.0, -1.0);
    let handle = Vec3::new(0.0, -0.2, -1.0);
    let nowhere = Vec3::new(0.0, 1.0, -1.0);

    #[rustfmt::skip]
    let script: &[(&str, Vec3, Option<(ButtonChannel, bool, f64)>)] = &[
        ("aim at OK",            ok,      None),
        ("press bumper",         ok,      Some((ButtonChannel::Bumper, true, 0.10))),
        ("release bumper",       ok,      Some((ButtonChannel::Bumper, false, 0.35))),
        ("glance at cancel",     cancel,  None),
        ("settle on cancel",     cancel,  None),
        ("press trigger",        cancel,  Some((ButtonChannel::Trigger, true, 1.00))),
        ("release trigger",      cancel,  Some((ButtonChannel::Trigger, false, 1.20))),
        ("aim at slider handle", handle,  None),
        ("settle on handle",     handle,  None),
        ("grab handle",          handle,  Some((ButtonChannel::Bumper, true, 2.00))),
        ("drag upward",          Vec3::new(0.0, -0.1, -1.0), None),
        ("drag further",         Vec3::new(0.0,  0.0, -1.0), None),
        ("release handle",       nowhere, Some((ButtonChannel::Bumper, false, 3.00))),
        ("aim away",             nowhere, None),
    ];

    for (label, target, button) in script {
        let pointer = aim_at(*target);
        let ray = Ray::from_pose(&pointer);
        let hit = nearest_hit(
            shapes.iter().map(|(k, s)| (*k, *s)),
            &ray,
            &params,
        );
        let sample = FrameSample { hit, pointer };

        println!("\n== {label} ==");
        dispatcher.on_frame(&sample, &scene, |event, _cx| {
            println!("  frame:  {event:?}");
        });

        if let Some((channel, pressed, time)) = button {
            let ev = ButtonEvent {
                controller,
                channel: *channel,
                pressure: if *pressed { 1.0 } else { 0.0 },
                time: *time,
            };
            if *pressed {
                dispatcher.on_button_down(&ev, &scene, |event, _cx| {
                    println!("  button: {event:?}");
                });
            } else {
                dispatcher.on_button_up(&ev, &scene, |event, _cx| {
                    println!("  button: {event:?}");
                });
            }
        }
    }

    println!(
        "\nselected at end of session: {:?}",
        dispatcher.selected()
    );
}
