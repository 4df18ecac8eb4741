// Copyright 2025 the Raywand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame interaction dispatcher.
//!
//! ## Overview
//!
//! [`Dispatcher`] turns the hit-test provider's per-frame answer and the
//! controller's discrete button callbacks into semantic events: enter, exit
//! and stay transitions, primary down/up/click, secondary down/up/click,
//! select and deselect, and the begin/drag/end lifecycle. Events are handed
//! to a host callback together with the refreshed [`EventContext`]; the
//! dispatcher checks the target's [`Capability`] flags first and silently
//! skips events the target did not ask for.
//!
//! ## State machine
//!
//! Cross-frame state is one owned struct: the last hit object (the
//! comparison baseline for transitions), the selection, the dragged object,
//! the per-channel down-object records, and the per-channel press
//! timestamps. While a drag is active the hit tracker is suspended — every
//! frame forwards `Drag` to the object frozen at drag start, and no
//! enter/exit/stay processing occurs until the primary release ends the
//! drag.
//!
//! Two sequencing details are contract, not accident:
//!
//! - When the resolved target changes while the pointer stays on geometry,
//!   the old target's exit fires alone and the new target's enter fires on
//!   the *following* frame.
//! - The drag lifecycle delivers to the target frozen at drag start, even if
//!   the ray has long since left it; end-drag does not re-resolve.
//!
//! ## Lifecycle
//!
//! A dispatcher starts unbound and inert. Call [`Dispatcher::bind`] once the
//! controller reference is acquired; an unbound dispatcher ignores frames
//! and button events entirely rather than running partially initialized.
//! Button events carrying a different controller id than the bound one are
//! silently ignored. [`Dispatcher::unbind`] is the teardown path: it drops
//! the binding and resets interaction state without delivering events; the
//! host unsubscribes its callbacks from the button source.

use raywand_target::{Capability, CapabilityLookup, ParentLookup, resolve_target};

use crate::types::{
    ButtonChannel, ButtonEvent, ControllerId, DispatchConfig, EventContext, FrameSample,
    PointerEvent,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Role {
    Primary,
    Secondary,
}

/// Routes ray hits and button edges to scene objects as capability events.
///
/// Generic over the host's object identifier `K`. Scene structure is
/// supplied per call as any type implementing both [`ParentLookup`] and
/// [`CapabilityLookup`] (for example [`raywand_target::SceneMap`]); events
/// are delivered through a `FnMut(PointerEvent<K>, &EventContext<K>)` sink,
/// synchronously and in order.
///
/// All entry points take `&mut self`: handlers can never overlap, and no
/// locking is needed — the host's event delivery is expected to be serial.
#[derive(Clone, Debug)]
pub struct Dispatcher<K> {
    config: DispatchConfig,
    controller: Option<ControllerId>,
    /// Last frame's snapshot; button handlers run against this, never a
    /// fresh raycast.
    sample: FrameSample<K>,
    last_hit: Option<K>,
    /// Whether the last hit object carries the stay capability; looked up
    /// once at enter since the stay check runs every frame.
    stay_cached: bool,
    selected: Option<K>,
    update_selected_cached: bool,
    dragged: Option<K>,
    drag_cached: bool,
    primary_down: Option<K>,
    /// Whether the primary channel is physically held; gates the external
    /// deferred-drag trigger.
    primary_held: bool,
    secondary_down: Option<K>,
    press_times: [f64; 2],
}

impl<K: Copy + Eq> Dispatcher<K> {
    /// Create an unbound dispatcher. It processes nothing until
    /// [`Dispatcher::bind`] is called.
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            config,
            controller: None,
            sample: FrameSample {
                hit: None,
                pointer: glam::Affine3A::IDENTITY,
            },
            last_hit: None,
            stay_cached: false,
            selected: None,
            update_selected_cached: false,
            dragged: None,
            drag_cached: false,
            primary_down: None,
            primary_held: false,
            secondary_down: None,
            press_times: [f64::NEG_INFINITY; 2],
        }
    }

    /// Bind to a controller. Only button events carrying this id are
    /// processed.
    pub fn bind(&mut self, controller: ControllerId) {
        self.controller = Some(controller);
    }

    /// Tear down: drop the controller binding and reset interaction state.
    ///
    /// No events are delivered — an in-flight drag or selection is simply
    /// abandoned. The host is responsible for unsubscribing its callbacks
    /// from the button source.
    pub fn unbind(&mut self) {
        self.controller = None;
        self.sample.hit = None;
        self.last_hit = None;
        self.stay_cached = false;
        self.selected = None;
        self.update_selected_cached = false;
        self.dragged = None;
        self.drag_cached = false;
        self.primary_down = None;
        self.primary_held = false;
        self.secondary_down = None;
        self.press_times = [f64::NEG_INFINITY; 2];
    }

    /// The bound controller, if any.
    pub fn controller(&self) -> Option<ControllerId> {
        self.controller
    }

    /// The active configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    /// The dragged object; `Some` exactly while [`Dispatcher::is_dragging`].
    pub fn dragged(&self) -> Option<K> {
        self.dragged
    }

    /// The currently selected object.
    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    /// The resolved object the pointer currently rests on, as tracked by the
    /// hit-transition logic. Frozen while dragging.
    pub fn last_hit(&self) -> Option<K> {
        self.last_hit
    }

    fn context(&self) -> EventContext<K> {
        EventContext {
            selected: self.selected,
            pointer: self.sample.pointer,
            raw_hit: self.sample.hit.map(|h| h.node),
            hit_point: self.sample.hit.map(|h| h.point),
        }
    }

    fn role(&self, channel: ButtonChannel) -> Role {
        if channel == self.config.primary {
            Role::Primary
        } else {
            Role::Secondary
        }
    }

    fn within_click_window(&self, channel: ButtonChannel, release_time: f64) -> bool {
        release_time - self.press_times[channel.index()] < self.config.click_window
    }

    /// Per-frame update: refresh the context snapshot, then either forward
    /// the drag or run hit-transition tracking, then notify the selection.
    pub fn on_frame<S, F>(&mut self, frame: &FrameSample<K>, scene: &S, mut sink: F)
    where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        if self.controller.is_none() {
            return;
        }
        self.sample = *frame;
        let cx = self.context();

        if self.is_dragging() {
            // Hit processing is suspended; the frozen target keeps receiving
            // the drag with the fresh context.
            if let Some(target) = self.last_hit
                && self.drag_cached
            {
                sink(PointerEvent::Drag(target), &cx);
            }
        } else {
            self.track_hit(frame, scene, &cx, &mut sink);
        }

        // Runs every frame independently of drag state.
        if let Some(sel) = self.selected
            && self.update_selected_cached
        {
            sink(PointerEvent::UpdateSelected(sel), &cx);
        }
    }

    fn track_hit<S, F>(&mut self, frame: &FrameSample<K>, scene: &S, cx: &EventContext<K>, sink: &mut F)
    where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        let Some(raw) = frame.hit else {
            if let Some(prev) = self.last_hit.take() {
                self.stay_cached = false;
                if scene.capabilities(&prev).contains(Capability::POINTER_EXIT) {
                    sink(PointerEvent::PointerExit(prev), cx);
                }
            }
            return;
        };

        let target = resolve_target(raw.node, scene, scene);
        match self.last_hit {
            None => {
                let caps = scene.capabilities(&target);
                if caps.contains(Capability::POINTER_ENTER) {
                    sink(PointerEvent::PointerEnter(target), cx);
                }
                self.stay_cached = caps.contains(Capability::POINTER_STAY);
                self.last_hit = Some(target);
            }
            Some(prev) if prev == target => {
                if self.stay_cached {
                    sink(PointerEvent::PointerStay(target), cx);
                }
            }
            Some(prev) => {
                // Target changed under the ray: exit the old target now and
                // leave the baseline empty, so the new target enters on the
                // next frame rather than in the same one.
                if scene.capabilities(&prev).contains(Capability::POINTER_EXIT) {
                    sink(PointerEvent::PointerExit(prev), cx);
                }
                self.last_hit = None;
                self.stay_cached = false;
            }
        }
    }

    /// Handle a button press. Ignored entirely while dragging and for
    /// controllers other than the bound one.
    pub fn on_button_down<S, F>(&mut self, ev: &ButtonEvent, scene: &S, mut sink: F)
    where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        if self.controller != Some(ev.controller) || self.is_dragging() {
            return;
        }
        let cx = self.context();
        self.press_times[ev.channel.index()] = ev.time;

        let role = self.role(ev.channel);
        if role == Role::Primary {
            self.primary_held = true;
        }
        let Some(target) = self.last_hit else {
            // Pressed while pointing at empty space.
            match role {
                Role::Primary => self.primary_down = None,
                Role::Secondary => self.secondary_down = None,
            }
            return;
        };

        let caps = scene.capabilities(&target);
        match role {
            Role::Primary => {
                self.primary_down = Some(target);
                if caps.contains(Capability::POINTER_DOWN) {
                    sink(PointerEvent::PointerDown(target), &cx);
                }
                if caps.contains(Capability::INIT_POTENTIAL_DRAG) {
                    // Drag initiation is deferred to an external decision;
                    // see `begin_pending_drag`.
                    sink(PointerEvent::InitializePotentialDrag(target), &cx);
                } else if caps.contains(Capability::BEGIN_DRAG) {
                    self.start_drag(target, caps, scene, &cx, &mut sink);
                }
            }
            Role::Secondary => {
                self.secondary_down = Some(target);
                if caps.contains(Capability::SECONDARY_DOWN) {
                    sink(PointerEvent::SecondaryDown(target), &cx);
                }
            }
        }
    }

    /// Handle a button release.
    pub fn on_button_up<S, F>(&mut self, ev: &ButtonEvent, scene: &S, mut sink: F)
    where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        if self.controller != Some(ev.controller) {
            return;
        }
        let cx = self.context();
        let role = self.role(ev.channel);
        if role == Role::Primary {
            self.primary_held = false;
        }

        if self.is_dragging() {
            // Only the matching primary release ends a drag.
            if role == Role::Primary {
                self.end_drag(scene, &cx, &mut sink);
            }
            return;
        }

        let Some(target) = self.last_hit else {
            // Released over empty space. A primary press that also started
            // on empty space clears the selection.
            if role == Role::Primary
                && self.primary_down.is_none()
                && let Some(sel) = self.selected.take()
            {
                self.update_selected_cached = false;
                if scene.capabilities(&sel).contains(Capability::DESELECT) {
                    sink(PointerEvent::Deselect(sel), &cx);
                }
            }
            return;
        };

        let caps = scene.capabilities(&target);
        match role {
            Role::Primary => {
                if caps.contains(Capability::POINTER_UP) {
                    sink(PointerEvent::PointerUp(target), &cx);
                }
                if self.primary_down == Some(target) {
                    if self.within_click_window(ev.channel, ev.time)
                        && caps.contains(Capability::POINTER_CLICK)
                    {
                        sink(PointerEvent::PointerClick(target), &cx);
                    }
                    self.select(target, caps, scene, &cx, &mut sink);
                }
            }
            Role::Secondary => {
                if caps.contains(Capability::SECONDARY_UP) {
                    sink(PointerEvent::SecondaryUp(target), &cx);
                }
                if self.secondary_down == Some(target)
                    && self.within_click_window(ev.channel, ev.time)
                    && caps.contains(Capability::SECONDARY_CLICK)
                {
                    sink(PointerEvent::SecondaryClick(target), &cx);
                }
            }
        }
    }

    /// Start the drag deferred by an `InitializePotentialDrag` delivery.
    ///
    /// The dispatcher never decides this on its own: after delivering
    /// [`PointerEvent::InitializePotentialDrag`], it waits for an external
    /// collaborator (a gesture recognizer, a distance threshold, a timer) to
    /// call this. The call is a silent no-op unless a primary press is held
    /// on the current hit object, that object carries
    /// [`Capability::BEGIN_DRAG`], and no drag is already active.
    pub fn begin_pending_drag<S, F>(&mut self, scene: &S, mut sink: F)
    where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        if self.controller.is_none() || self.is_dragging() {
            return;
        }
        let Some(target) = self.last_hit else {
            return;
        };
        if !self.primary_held || self.primary_down != Some(target) {
            return;
        }
        let caps = scene.capabilities(&target);
        if !caps.contains(Capability::BEGIN_DRAG) {
            return;
        }
        let cx = self.context();
        self.start_drag(target, caps, scene, &cx, &mut sink);
    }

    fn start_drag<S, F>(
        &mut self,
        target: K,
        caps: Capability,
        scene: &S,
        cx: &EventContext<K>,
        sink: &mut F,
    ) where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        sink(PointerEvent::BeginDrag(target), cx);
        self.dragged = Some(target);
        self.drag_cached = caps.contains(Capability::DRAG);
        // A drag implicitly deselects any unrelated prior selection.
        if let Some(sel) = self.selected
            && sel != target
        {
            self.selected = None;
            self.update_selected_cached = false;
            if scene.capabilities(&sel).contains(Capability::DESELECT) {
                sink(PointerEvent::Deselect(sel), cx);
            }
        }
    }

    fn end_drag<S, F>(&mut self, scene: &S, cx: &EventContext<K>, sink: &mut F)
    where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        // Deliver to the target frozen at drag start; no re-resolution.
        if let Some(target) = self.last_hit {
            let caps = scene.capabilities(&target);
            if caps.contains(Capability::END_DRAG) {
                sink(PointerEvent::EndDrag(target), cx);
            }
            if self.selected != Some(target) {
                if caps.contains(Capability::SELECT) {
                    sink(PointerEvent::Select(target), cx);
                }
                self.selected = Some(target);
                self.update_selected_cached = caps.contains(Capability::UPDATE_SELECTED);
            }
        }
        self.dragged = None;
        self.drag_cached = false;
    }

    /// Release-time selection: select the target, replacing (and notifying)
    /// any different previous selection. The selection record updates only
    /// after both notifications fired.
    fn select<S, F>(
        &mut self,
        target: K,
        caps: Capability,
        scene: &S,
        cx: &EventContext<K>,
        sink: &mut F,
    ) where
        S: ParentLookup<K> + CapabilityLookup<K>,
        F: FnMut(PointerEvent<K>, &EventContext<K>),
    {
        match self.selected {
            None => {
                if caps.contains(Capability::SELECT) {
                    sink(PointerEvent::Select(target), cx);
                }
                self.selected = Some(target);
                self.update_selected_cached = caps.contains(Capability::UPDATE_SELECTED);
            }
            Some(prev) if prev != target => {
                if caps.contains(Capability::SELECT) {
                    sink(PointerEvent::Select(target), cx);
                }
                if scene.capabilities(&prev).contains(Capability::DESELECT) {
                    sink(PointerEvent::Deselect(prev), cx);
                }
                self.selected = Some(target);
                self.update_selected_cached = caps.contains(Capability::UPDATE_SELECTED);
            }
            Some(_) => {}
        }
    }
}
