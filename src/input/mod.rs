use std::time::Instant;

use crate::animation::VelocityTracker;
use crate::config::PhysicsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub id: i32,
    pub kind: PointerKind,
    /// 0 is the primary button.
    pub button: i16,
    pub x: f32,
    pub y: f32,
    pub at: Instant,
}

impl PointerEvent {
    pub fn new(id: i32, kind: PointerKind, x: f32, y: f32, at: Instant) -> Self {
        Self { id, kind, button: 0, x, y, at }
    }

    pub fn is_primary_button(&self) -> bool {
        self.button == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Undecided,
    Horizontal,
}

#[derive(Debug, Clone)]
struct ActiveDrag {
    pointer_id: i32,
    kind: PointerKind,
    start_x: f32,
    start_y: f32,
    origin: f32,
    position: f32,
    moved: bool,
    axis: Axis,
    velocity: VelocityTracker,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragAction {
    None,
    /// Crossed the threshold: switch the track to direct positioning.
    Engage { position: f32 },
    Move { position: f32 },
    /// Vertical touch gesture; give it back to the page.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub position: f32,
    /// px/ms
    pub velocity: f32,
    pub moved: bool,
}

#[derive(Debug, Clone)]
pub struct DragTracker {
    drag_speed: f32,
    threshold: f32,
    axis_lock: bool,
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new(physics: &PhysicsConfig) -> Self {
        Self {
            drag_speed: physics.drag_speed,
            threshold: physics.touch_threshold,
            axis_lock: physics.axis_lock,
            active: None,
        }
    }

    pub fn reconfigure(&mut self, physics: &PhysicsConfig) {
        self.drag_speed = physics.drag_speed;
        self.threshold = physics.touch_threshold;
        self.axis_lock = physics.axis_lock;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Start tracking from the track's current translation.
    pub fn begin(&mut self, ev: &PointerEvent, origin: f32) {
        let mut velocity = VelocityTracker::default();
        velocity.reset(origin, ev.at);
        self.active = Some(ActiveDrag {
            pointer_id: ev.id,
            kind: ev.kind,
            start_x: ev.x,
            start_y: ev.y,
            origin,
            position: origin,
            moved: false,
            axis: Axis::Undecided,
            velocity,
        });
    }

    pub fn update(&mut self, ev: &PointerEvent) -> DragAction {
        let (threshold, lock, speed) = (self.threshold, self.axis_lock, self.drag_speed);
        let Some(drag) = self.active.as_mut().filter(|d| d.pointer_id == ev.id) else {
            return DragAction::None;
        };
        let raw_dx = ev.x - drag.start_x;
        let dy = ev.y - drag.start_y;

        if lock && drag.kind == PointerKind::Touch && drag.axis == Axis::Undecided {
            if dy.abs() > raw_dx.abs() && dy.abs() > threshold {
                self.active = None;
                return DragAction::Abort;
            }
            if raw_dx.abs() > threshold {
                drag.axis = Axis::Horizontal;
            }
        }

        let position = drag.origin + raw_dx * speed;
        if !drag.moved {
            if raw_dx.abs() <= threshold {
                return DragAction::None;
            }
            drag.moved = true;
            drag.position = position;
            drag.velocity.sample(position, ev.at);
            return DragAction::Engage { position };
        }
        drag.position = position;
        drag.velocity.sample(position, ev.at);
        DragAction::Move { position }
    }

    /// Pointer up or cancel. `None` if no drag was tracked for this pointer.
    pub fn release(&mut self, ev: &PointerEvent) -> Option<Release> {
        if self.active.as_ref()?.pointer_id != ev.id {
            return None;
        }
        let drag = self.active.take()?;
        Some(Release {
            position: drag.position,
            velocity: if drag.moved { drag.velocity.velocity() } else { 0.0 },
            moved: drag.moved,
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
