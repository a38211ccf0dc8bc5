//! Drag & drop icon tracking (spec §4.8): the icon's scene position follows
//! the originating pointer or touch point, and drag start forces `cursor`
//! into `drag` mode.

use super::cursor::CursorStateMachine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOrigin {
    Pointer,
    Touch { touch_id: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconOffset {
    pub dx: f64,
    pub dy: f64,
}

#[derive(Debug)]
pub struct DragIcon<S> {
    surface: S,
    origin: DragOrigin,
    mapped: bool,
    x: f64,
    y: f64,
    pending_offset: Option<IconOffset>,
}

impl<S: Clone> DragIcon<S> {
    /// Starts a drag session: records the icon surface and origin, and
    /// drives the cursor state machine into `drag` mode.
    pub fn start<B>(
        surface: S,
        origin: DragOrigin,
        start_x: f64,
        start_y: f64,
        cursor: &mut CursorStateMachine<S, B>,
    ) -> Self
    where
        S: Clone + PartialEq,
        B: Clone,
    {
        cursor.enter_drag();
        Self { surface, origin, mapped: false, x: start_x, y: start_y, pending_offset: None }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn origin(&self) -> DragOrigin {
        self.origin
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn map(&mut self) {
        self.mapped = true;
    }

    pub fn unmap(&mut self) {
        self.mapped = false;
    }

    /// Follows the seat's pointer or touch point; a no-op if the motion's
    /// source doesn't match this icon's origin (e.g. pointer motion during
    /// a touch-originated drag).
    pub fn follow(&mut self, origin: DragOrigin, x: f64, y: f64) {
        if origin == self.origin {
            self.x = x;
            self.y = y;
        }
    }

    /// Queues a subsurface offset delta pending the next commit.
    pub fn request_offset(&mut self, dx: f64, dy: f64) {
        self.pending_offset = Some(IconOffset { dx, dy });
    }

    /// Applies any queued subsurface offset delta to the icon's position.
    pub fn commit(&mut self) {
        if let Some(offset) = self.pending_offset.take() {
            self.x += offset.dx;
            self.y += offset.dy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cursor::CursorMode;

    #[test]
    fn start_forces_cursor_into_drag_mode() {
        let mut cursor: CursorStateMachine<&'static str, &'static str> = CursorStateMachine::new();

        let icon = DragIcon::start("icon", DragOrigin::Pointer, 5.0, 5.0, &mut cursor);

        assert_eq!(cursor.mode, CursorMode::Drag);
        assert_eq!(icon.position(), (5.0, 5.0));
        assert!(!icon.is_mapped());
    }

    #[test]
    fn follow_ignores_mismatched_origin() {
        let mut cursor: CursorStateMachine<&'static str, &'static str> = CursorStateMachine::new();
        let mut icon = DragIcon::start("icon", DragOrigin::Touch { touch_id: 1 }, 0.0, 0.0, &mut cursor);

        icon.follow(DragOrigin::Pointer, 99.0, 99.0);
        assert_eq!(icon.position(), (0.0, 0.0));

        icon.follow(DragOrigin::Touch { touch_id: 1 }, 10.0, 20.0);
        assert_eq!(icon.position(), (10.0, 20.0));
    }

    #[test]
    fn map_unmap_toggle_visibility() {
        let mut cursor: CursorStateMachine<&'static str, &'static str> = CursorStateMachine::new();
        let mut icon = DragIcon::start("icon", DragOrigin::Pointer, 0.0, 0.0, &mut cursor);

        icon.map();
        assert!(icon.is_mapped());
        icon.unmap();
        assert!(!icon.is_mapped());
    }

    #[test]
    fn commit_applies_queued_offset_once() {
        let mut cursor: CursorStateMachine<&'static str, &'static str> = CursorStateMachine::new();
        let mut icon = DragIcon::start("icon", DragOrigin::Pointer, 0.0, 0.0, &mut cursor);

        icon.request_offset(3.0, -2.0);
        assert_eq!(icon.position(), (0.0, 0.0));

        icon.commit();
        assert_eq!(icon.position(), (3.0, -2.0));

        // A second commit with no pending offset is a no-op.
        icon.commit();
        assert_eq!(icon.position(), (3.0, -2.0));
    }
}
