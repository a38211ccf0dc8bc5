//! Per-seat cursor mode state machine: passthrough / down / drag / ignore / op.

use std::collections::HashMap;

use super::constraint::{ConstraintKind, ConstraintUpdate, PointerConstraint};
use super::scene::{HitResult, NodeId, Role, Scene};

#[derive(Debug, Clone, PartialEq)]
pub enum CursorMode<S> {
    Passthrough,
    Down {
        surface: S,
        sx: f64,
        sy: f64,
    },
    Drag,
    Ignore,
    Op {
        residue_x: f64,
        residue_y: f64,
    },
}

impl<S> CursorMode<S> {
    pub fn is_down(&self) -> bool {
        matches!(self, CursorMode::Down { .. })
    }
}

/// Side effects the cursor state machine produces. Implemented by the live
/// seat in production, and by a recording stub in tests.
pub trait CursorDelegate<S, B> {
    fn forward_raw_relative(&mut self, dx: f64, dy: f64);
    fn deliver_motion(&mut self, surface: &S, sx: f64, sy: f64);
    fn deliver_button(&mut self, surface: &S, button: u32, pressed: bool);
    fn binding_pressed(&mut self, binding: &B);
    fn binding_released(&mut self, binding: &B);
    fn mark_windowing_dirty(&mut self);
    fn record_interaction(&mut self, hit: &HitResult<S>);
    fn op_update(&mut self, dx: i32, dy: i32);
    fn op_release(&mut self);
    fn warp_cursor(&mut self, lx: f64, ly: f64);
    fn deliver_touch_down(&mut self, surface: &S, id: i32, sx: f64, sy: f64);
    fn deliver_touch_motion(&mut self, surface: &S, id: i32, sx: f64, sy: f64);
    fn deliver_touch_up(&mut self, id: i32);
    fn broadcast_touch_cancel(&mut self);
}

/// What a pressed button's matching release is owed, fixed at press time so
/// a mode change before the release can't change who receives it (mirrors
/// `keyboard.rs`'s `Consumer`).
#[derive(Debug, Clone, PartialEq)]
enum PressConsumer<S, B> {
    Binding(B),
    Surface(S),
    Inert,
}

pub struct CursorStateMachine<S, B> {
    pub lx: f64,
    pub ly: f64,
    pub mode: CursorMode<S>,
    pressed: HashMap<u32, PressConsumer<S, B>>,
    hovered: Option<NodeId>,
    touch_points: HashMap<i32, (f64, f64)>,
}

impl<S: Clone + PartialEq, B: Clone> Default for CursorStateMachine<S, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone + PartialEq, B: Clone> CursorStateMachine<S, B> {
    pub fn new() -> Self {
        Self {
            lx: 0.0,
            ly: 0.0,
            mode: CursorMode::Passthrough,
            pressed: HashMap::new(),
            hovered: None,
            touch_points: HashMap::new(),
        }
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    /// Invariant P3: the pressed map is empty iff mode is passthrough, or
    /// mid-release in op (checked by callers at frame boundaries, not here,
    /// since `op` legitimately holds an empty pressed set throughout).
    pub fn mode_is_consistent(&self) -> bool {
        match self.mode {
            CursorMode::Passthrough => self.pressed.is_empty(),
            CursorMode::Down { .. } => true,
            _ => true,
        }
    }

    fn update_hover(&mut self, hit: Option<&HitResult<S>>, delegate: &mut impl CursorDelegate<S, B>) {
        let new_hover = match hit {
            Some(h) if h.role == Role::Window => Some(h.node),
            _ => None,
        };
        if new_hover != self.hovered {
            self.hovered = new_hover;
            delegate.mark_windowing_dirty();
        }
    }

    fn apply_constraint_update(&mut self, update: ConstraintUpdate, delegate: &mut impl CursorDelegate<S, B>) {
        if let ConstraintUpdate::WarpTo(x, y) = update {
            self.lx = x;
            self.ly = y;
            delegate.warp_cursor(x, y);
        }
    }

    /// `processMotionRelative` (spec §4.3). Returns early without moving
    /// the cursor if a `locked` constraint is active.
    #[allow(clippy::too_many_arguments)]
    pub fn process_motion_relative(
        &mut self,
        dx: f64,
        dy: f64,
        scene: &Scene<S>,
        locked: bool,
        mut constraint: Option<&mut PointerConstraint<S>>,
        is_focused_constraint: bool,
        op_in_progress: bool,
        delegate: &mut impl CursorDelegate<S, B>,
    ) {
        delegate.forward_raw_relative(dx, dy);

        let mut dx = dx;
        let mut dy = dy;
        if let Some(c) = constraint.as_deref_mut() {
            if c.is_active() {
                if c.kind == ConstraintKind::Locked {
                    return;
                }
                c.confine(&mut dx, &mut dy);
            }
        }

        match &mut self.mode {
            CursorMode::Passthrough | CursorMode::Drag => {
                self.lx += dx;
                self.ly += dy;
                let hit = scene.hit_test(self.lx, self.ly, locked);
                self.update_hover(hit.as_ref(), delegate);
                if let Some(hit) = &hit {
                    if let Some(surface) = &hit.surface {
                        delegate.deliver_motion(surface, hit.sx, hit.sy);
                    }
                }
                if let Some(c) = constraint {
                    let update = c.maybe_activate(is_focused_constraint, op_in_progress, hit.as_ref());
                    self.apply_constraint_update(update, delegate);
                }
            }
            CursorMode::Down { surface, sx, sy } => {
                *sx += dx;
                *sy += dy;
                let surface = surface.clone();
                let point = (*sx, *sy);
                delegate.deliver_motion(&surface, point.0, point.1);
            }
            CursorMode::Ignore => {
                self.lx += dx;
                self.ly += dy;
            }
            CursorMode::Op { residue_x, residue_y } => {
                *residue_x += dx;
                *residue_y += dy;
                let int_dx = residue_x.trunc() as i32;
                let int_dy = residue_y.trunc() as i32;
                *residue_x -= int_dx as f64;
                *residue_y -= int_dy as f64;
                delegate.op_update(int_dx, int_dy);
            }
        }
    }

    /// Button press while in `passthrough`. Other modes still owe this
    /// button a matching release, so its consumer is fixed here too: a
    /// binding fires `binding_pressed` regardless of mode, and a button with
    /// no binding is delivered to whatever surface is currently `down`
    /// (there's nothing to deliver to in `drag`/`ignore`/`op`).
    pub fn press(
        &mut self,
        button: u32,
        hit: Option<HitResult<S>>,
        binding: Option<B>,
        delegate: &mut impl CursorDelegate<S, B>,
    ) {
        if self.pressed.contains_key(&button) {
            tracing::warn!(button, "duplicate press for button already tracked, dropping");
            return;
        }

        if !matches!(self.mode, CursorMode::Passthrough) {
            let consumer = if let Some(binding) = binding {
                delegate.binding_pressed(&binding);
                PressConsumer::Binding(binding)
            } else if let CursorMode::Down { surface, .. } = &self.mode {
                let surface = surface.clone();
                delegate.deliver_button(&surface, button, true);
                PressConsumer::Surface(surface)
            } else {
                PressConsumer::Inert
            };
            self.pressed.insert(button, consumer);
            return;
        }

        if let Some(binding) = binding {
            self.pressed.insert(button, PressConsumer::Binding(binding.clone()));
            delegate.binding_pressed(&binding);
            self.mode = CursorMode::Ignore;
            self.hovered = None;
            return;
        }

        match hit {
            Some(hit) if hit.surface.is_some() => {
                let surface = hit.surface.clone().unwrap();
                self.pressed.insert(button, PressConsumer::Surface(surface.clone()));
                delegate.deliver_button(&surface, button, true);
                delegate.record_interaction(&hit);
                self.mode = CursorMode::Down {
                    surface,
                    sx: hit.sx,
                    sy: hit.sy,
                };
            }
            _ => {
                self.pressed.insert(button, PressConsumer::Inert);
                self.mode = CursorMode::Ignore;
                self.hovered = None;
            }
        }
    }

    /// Button release. Consumer is whatever was recorded at press time,
    /// regardless of the cursor's current mode.
    pub fn release(&mut self, button: u32, delegate: &mut impl CursorDelegate<S, B>) {
        let Some(entry) = self.pressed.remove(&button) else {
            tracing::warn!(button, "release with no matching press, dropping");
            return;
        };

        match entry {
            PressConsumer::Binding(binding) => delegate.binding_released(&binding),
            PressConsumer::Surface(surface) => delegate.deliver_button(&surface, button, false),
            PressConsumer::Inert => {}
        }

        if self.pressed.is_empty() {
            match self.mode {
                CursorMode::Op { .. } => {
                    delegate.op_release();
                    delegate.mark_windowing_dirty();
                    self.mode = CursorMode::Passthrough;
                }
                CursorMode::Down { .. } | CursorMode::Drag | CursorMode::Ignore => {
                    self.mode = CursorMode::Passthrough;
                }
                CursorMode::Passthrough => {}
            }
        }
    }

    pub fn enter_op(&mut self) {
        self.mode = CursorMode::Op { residue_x: 0.0, residue_y: 0.0 };
        self.hovered = None;
    }

    pub fn enter_drag(&mut self) {
        self.mode = CursorMode::Drag;
    }

    pub fn touch_down(
        &mut self,
        id: i32,
        hit: Option<HitResult<S>>,
        delegate: &mut impl CursorDelegate<S, B>,
    ) {
        let point = hit.as_ref().map(|h| (h.sx, h.sy)).unwrap_or((0.0, 0.0));
        self.touch_points.insert(id, point);
        if let Some(hit) = &hit {
            delegate.record_interaction(hit);
            if let Some(surface) = &hit.surface {
                delegate.deliver_touch_down(surface, id, hit.sx, hit.sy);
            }
        }
    }

    pub fn touch_motion(&mut self, id: i32, surface: Option<&S>, sx: f64, sy: f64, delegate: &mut impl CursorDelegate<S, B>) {
        if let Some(point) = self.touch_points.get_mut(&id) {
            *point = (sx, sy);
        }
        if let Some(surface) = surface {
            delegate.deliver_touch_motion(surface, id, sx, sy);
        }
    }

    pub fn touch_up(&mut self, id: i32, delegate: &mut impl CursorDelegate<S, B>) {
        self.touch_points.remove(&id);
        delegate.deliver_touch_up(id);
    }

    pub fn touch_cancel(&mut self, delegate: &mut impl CursorDelegate<S, B>) {
        self.touch_points.clear();
        delegate.broadcast_touch_cancel();
    }
}
