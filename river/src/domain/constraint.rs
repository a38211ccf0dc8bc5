//! Pointer constraint (lock/confine) activation, warp, and confinement.

use super::scene::{HitResult, NodeId, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Locked,
    Confined,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintState {
    Inactive,
    Active { node: NodeId, sx: f64, sy: f64 },
}

/// Result of re-evaluating a constraint after cursor motion or a scene
/// graph change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstraintUpdate {
    NoOp,
    Activated,
    /// The cursor must be warped to this layout position to stay pinned to
    /// the constrained surface-local point.
    WarpTo(f64, f64),
    Deactivated,
}

#[derive(Debug, Clone)]
pub struct PointerConstraint<S> {
    pub surface: S,
    pub kind: ConstraintKind,
    /// Surface-local region the cursor must stay within while active.
    pub region: Rect,
    /// Cursor-hint position (surface-local) to warp to on deactivation, if
    /// the client set one.
    pub cursor_hint: Option<(f64, f64)>,
    pub state: ConstraintState,
}

impl<S: PartialEq + Clone> PointerConstraint<S> {
    pub fn new(surface: S, kind: ConstraintKind, region: Rect) -> Self {
        Self {
            surface,
            kind,
            region,
            cursor_hint: None,
            state: ConstraintState::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ConstraintState::Active { .. })
    }

    /// Attempt activation. `is_focused_constraint` is whether this is the
    /// seat's designated focused constraint; `op_in_progress` whether an
    /// interactive window-manager operation is running; `hit` is the
    /// current scene-query result at the cursor.
    pub fn maybe_activate(
        &mut self,
        is_focused_constraint: bool,
        op_in_progress: bool,
        hit: Option<&HitResult<S>>,
    ) -> ConstraintUpdate {
        if !is_focused_constraint || op_in_progress {
            return ConstraintUpdate::NoOp;
        }
        if self.is_active() {
            return ConstraintUpdate::NoOp;
        }
        let Some(hit) = hit else {
            return ConstraintUpdate::NoOp;
        };
        if hit.surface.as_ref() != Some(&self.surface) {
            return ConstraintUpdate::NoOp;
        }
        if !self.region.contains_local(hit.sx, hit.sy) {
            return ConstraintUpdate::NoOp;
        }

        self.state = ConstraintState::Active {
            node: hit.node,
            sx: hit.sx,
            sy: hit.sy,
        };
        ConstraintUpdate::Activated
    }

    /// Re-evaluate an active constraint against the constrained scene
    /// node's current layout origin (`None` if the node has been disabled
    /// or removed). Returns the warp target, or signals deactivation.
    pub fn update_state(&mut self, node_origin: Option<(f64, f64)>) -> ConstraintUpdate {
        let (sx, sy) = match self.state {
            ConstraintState::Active { sx, sy, .. } => (sx, sy),
            ConstraintState::Inactive => return ConstraintUpdate::NoOp,
        };

        match node_origin {
            Some((nx, ny)) if self.region.contains_local(sx, sy) => {
                ConstraintUpdate::WarpTo(nx + sx, ny + sy)
            }
            _ => {
                self.state = ConstraintState::Inactive;
                ConstraintUpdate::Deactivated
            }
        }
    }

    /// For `Confined` constraints: clamp `(dx, dy)` so the surface-local
    /// position stays within the region, updating the stored position.
    /// `Locked` constraints are untouched (caller must not forward motion
    /// at all while locked — see the cursor state machine).
    pub fn confine(&mut self, dx: &mut f64, dy: &mut f64) {
        if self.kind != ConstraintKind::Confined {
            return;
        }
        let ConstraintState::Active { sx, sy, .. } = &mut self.state else {
            return;
        };

        let min_x = self.region.x;
        let max_x = self.region.x + self.region.w;
        let min_y = self.region.y;
        let max_y = self.region.y + self.region.h;

        let new_sx = (*sx + *dx).clamp(min_x, max_x);
        let new_sy = (*sy + *dy).clamp(min_y, max_y);

        *dx = new_sx - *sx;
        *dy = new_sy - *sy;
        *sx = new_sx;
        *sy = new_sy;
    }

    /// Deactivate, returning the cursor-hint surface-local point to warp to
    /// if the client set one.
    pub fn deactivate(&mut self) -> Option<(f64, f64)> {
        self.state = ConstraintState::Inactive;
        self.cursor_hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scene::Role;

    fn hit(surface: &'static str, sx: f64, sy: f64) -> HitResult<&'static str> {
        HitResult {
            node: 1,
            surface: Some(surface),
            sx,
            sy,
            role: Role::Window,
        }
    }

    #[test]
    fn activation_requires_focus_no_op_and_region_hit() {
        let mut c = PointerConstraint::new("s", ConstraintKind::Locked, Rect::new(0.0, 0.0, 50.0, 50.0));

        assert_eq!(c.maybe_activate(false, false, Some(&hit("s", 10.0, 10.0))), ConstraintUpdate::NoOp);
        assert_eq!(c.maybe_activate(true, true, Some(&hit("s", 10.0, 10.0))), ConstraintUpdate::NoOp);
        assert_eq!(c.maybe_activate(true, false, Some(&hit("other", 10.0, 10.0))), ConstraintUpdate::NoOp);
        assert_eq!(c.maybe_activate(true, false, Some(&hit("s", 100.0, 100.0))), ConstraintUpdate::NoOp);
        assert!(!c.is_active());

        assert_eq!(c.maybe_activate(true, false, Some(&hit("s", 10.0, 10.0))), ConstraintUpdate::Activated);
        assert!(c.is_active());
    }

    #[test]
    fn confine_clamps_motion_to_region() {
        let mut c = PointerConstraint::new("s", ConstraintKind::Confined, Rect::new(0.0, 0.0, 20.0, 20.0));
        c.maybe_activate(true, false, Some(&hit("s", 10.0, 10.0)));

        let mut dx = 100.0;
        let mut dy = 0.0;
        c.confine(&mut dx, &mut dy);

        assert_eq!(dx, 10.0); // 10 -> clamps at boundary 20
        assert_eq!(dy, 0.0);

        if let ConstraintState::Active { sx, sy, .. } = c.state {
            assert_eq!(sx, 20.0);
            assert_eq!(sy, 10.0);
        } else {
            panic!("expected active state");
        }
    }

    #[test]
    fn locked_constraint_confine_is_noop() {
        let mut c = PointerConstraint::new("s", ConstraintKind::Locked, Rect::new(0.0, 0.0, 20.0, 20.0));
        c.maybe_activate(true, false, Some(&hit("s", 10.0, 10.0)));

        let mut dx = 5.0;
        let mut dy = 5.0;
        c.confine(&mut dx, &mut dy);
        assert_eq!((dx, dy), (5.0, 5.0));
    }

    #[test]
    fn update_state_warps_with_moved_node_and_deactivates_when_node_gone() {
        let mut c = PointerConstraint::new("s", ConstraintKind::Locked, Rect::new(0.0, 0.0, 20.0, 20.0));
        c.maybe_activate(true, false, Some(&hit("s", 5.0, 5.0)));

        assert_eq!(c.update_state(Some((100.0, 200.0))), ConstraintUpdate::WarpTo(105.0, 205.0));
        assert!(c.is_active());

        assert_eq!(c.update_state(None), ConstraintUpdate::Deactivated);
        assert!(!c.is_active());
    }

    #[test]
    fn deactivate_returns_cursor_hint() {
        let mut c = PointerConstraint::new("s", ConstraintKind::Confined, Rect::new(0.0, 0.0, 20.0, 20.0));
        c.cursor_hint = Some((3.0, 4.0));
        c.maybe_activate(true, false, Some(&hit("s", 1.0, 1.0)));

        assert_eq!(c.deactivate(), Some((3.0, 4.0)));
        assert!(!c.is_active());
    }
}
