//! Tablet tool state: proximity, pen/mouse axis motion, tip, and button
//! events (spec §4.3 "Tablet."). Modeled separately from `cursor.rs` because
//! a tablet tool has its own proximity lifecycle and an absolute-vs-relative
//! axis split that a pointer never has.

use super::scene::{HitResult, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Pen,
    Mouse,
}

#[derive(Debug, Clone, PartialEq)]
enum TabletMode<S> {
    Passthrough,
    Down { surface: S, sx: f64, sy: f64 },
}

/// Side effects a tablet tool produces. Implemented by the live seat in
/// production, and by a recording stub in tests.
pub trait TabletDelegate<S> {
    fn attach_cursor(&mut self);
    fn set_shape(&mut self, shape: &str);
    fn warp_absolute(&mut self, x: f64, y: f64);
    fn move_relative(&mut self, dx: f64, dy: f64);
    fn deliver_motion(&mut self, surface: &S, sx: f64, sy: f64);
    fn deliver_tip(&mut self, surface: &S, down: bool);
    fn deliver_button(&mut self, button: u32, pressed: bool);
}

pub struct TabletTool<S> {
    kind: ToolKind,
    lx: f64,
    ly: f64,
    mode: TabletMode<S>,
    is_down: bool,
    buttons_held: u32,
}

impl<S: Clone + PartialEq> TabletTool<S> {
    pub fn new(kind: ToolKind) -> Self {
        Self {
            kind,
            lx: 0.0,
            ly: 0.0,
            mode: TabletMode::Passthrough,
            is_down: false,
            buttons_held: 0,
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self.mode, TabletMode::Down { .. })
    }

    /// Proximity-in: attach the tool's cursor to the tablet device, warp to
    /// its absolute position, set the cursor shape to `"pencil"`, and run
    /// passthrough.
    pub fn proximity_in(&mut self, x: f64, y: f64, delegate: &mut impl TabletDelegate<S>) {
        delegate.attach_cursor();
        self.lx = x;
        self.ly = y;
        delegate.warp_absolute(x, y);
        delegate.set_shape("pencil");
        self.mode = TabletMode::Passthrough;
    }

    /// Axis event. Pen-like tools warp absolute, with `None` on an axis
    /// that didn't change (reported as NaN to the client so the other axis
    /// is preserved); mouse-like tools move relative. In `down`, motion is
    /// reported as an offset from the initial surface-local point rather
    /// than driving the device's native axis mode.
    pub fn axis(
        &mut self,
        x: Option<f64>,
        y: Option<f64>,
        dx: f64,
        dy: f64,
        scene: &Scene<S>,
        delegate: &mut impl TabletDelegate<S>,
    ) {
        if let TabletMode::Down { surface, sx, sy } = &mut self.mode {
            *sx += dx;
            *sy += dy;
            let surface = surface.clone();
            let (sx, sy) = (*sx, *sy);
            delegate.deliver_motion(&surface, sx, sy);
            return;
        }

        match self.kind {
            ToolKind::Pen => {
                let warp_x = x.unwrap_or(f64::NAN);
                let warp_y = y.unwrap_or(f64::NAN);
                if let Some(x) = x {
                    self.lx = x;
                }
                if let Some(y) = y {
                    self.ly = y;
                }
                delegate.warp_absolute(warp_x, warp_y);
            }
            ToolKind::Mouse => {
                self.lx += dx;
                self.ly += dy;
                delegate.move_relative(dx, dy);
            }
        }

        if let Some(hit) = scene.hit_test(self.lx, self.ly, false) {
            if let Some(surface) = &hit.surface {
                delegate.deliver_motion(surface, hit.sx, hit.sy);
            }
        }
    }

    /// Tip-down: enter `down` if a surface is hit, recording the
    /// surface-local coordinates it started at.
    pub fn tip_down(&mut self, hit: Option<HitResult<S>>, delegate: &mut impl TabletDelegate<S>) {
        self.is_down = true;
        if let Some(hit) = hit {
            if let Some(surface) = hit.surface {
                delegate.deliver_tip(&surface, true);
                self.mode = TabletMode::Down {
                    surface,
                    sx: hit.sx,
                    sy: hit.sy,
                };
            }
        }
    }

    /// Tip-up. Exits `down` only once no button remains held either.
    pub fn tip_up(&mut self, delegate: &mut impl TabletDelegate<S>) {
        self.is_down = false;
        self.maybe_exit_down(delegate);
    }

    /// Button press/release. Exits `down` on a release only once the tip is
    /// also up and no other button remains held.
    pub fn button(&mut self, button: u32, pressed: bool, delegate: &mut impl TabletDelegate<S>) {
        if pressed {
            self.buttons_held += 1;
        } else {
            self.buttons_held = self.buttons_held.saturating_sub(1);
        }
        delegate.deliver_button(button, pressed);
        if !pressed {
            self.maybe_exit_down(delegate);
        }
    }

    fn maybe_exit_down(&mut self, delegate: &mut impl TabletDelegate<S>) {
        if self.is_down || self.buttons_held != 0 {
            return;
        }
        if let TabletMode::Down { surface, .. } = &self.mode {
            let surface = surface.clone();
            delegate.deliver_tip(&surface, false);
            self.mode = TabletMode::Passthrough;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scene::{Rect, Role, Scene, SceneNode};

    #[derive(Debug, Default)]
    struct Recorder {
        attaches: u32,
        shapes: Vec<String>,
        warps: Vec<(f64, f64)>,
        relative_moves: Vec<(f64, f64)>,
        motions: Vec<(&'static str, f64, f64)>,
        tips: Vec<(&'static str, bool)>,
        buttons: Vec<(u32, bool)>,
    }

    impl TabletDelegate<&'static str> for Recorder {
        fn attach_cursor(&mut self) {
            self.attaches += 1;
        }
        fn set_shape(&mut self, shape: &str) {
            self.shapes.push(shape.to_string());
        }
        fn warp_absolute(&mut self, x: f64, y: f64) {
            self.warps.push((x, y));
        }
        fn move_relative(&mut self, dx: f64, dy: f64) {
            self.relative_moves.push((dx, dy));
        }
        fn deliver_motion(&mut self, surface: &&'static str, sx: f64, sy: f64) {
            self.motions.push((surface, sx, sy));
        }
        fn deliver_tip(&mut self, surface: &&'static str, down: bool) {
            self.tips.push((surface, down));
        }
        fn deliver_button(&mut self, button: u32, pressed: bool) {
            self.buttons.push((button, pressed));
        }
    }

    fn scene_with_window() -> Scene<&'static str> {
        let mut scene = Scene::new();
        scene.push(SceneNode {
            id: 1,
            role: Role::Window,
            enabled: true,
            geometry: Rect::new(0.0, 0.0, 200.0, 200.0),
            surface: Some("S"),
            input_region: None,
        });
        scene
    }

    #[test]
    fn proximity_in_warps_and_sets_pencil_shape() {
        let mut tool = TabletTool::<&'static str>::new(ToolKind::Pen);
        let mut rec = Recorder::default();
        tool.proximity_in(50.0, 60.0, &mut rec);
        assert_eq!(rec.attaches, 1);
        assert_eq!(rec.warps, vec![(50.0, 60.0)]);
        assert_eq!(rec.shapes, vec!["pencil".to_string()]);
    }

    #[test]
    fn pen_axis_warps_absolute_with_nan_for_unchanged_axis() {
        let scene = scene_with_window();
        let mut tool = TabletTool::<&'static str>::new(ToolKind::Pen);
        let mut rec = Recorder::default();
        tool.proximity_in(10.0, 10.0, &mut rec);

        tool.axis(Some(20.0), None, 0.0, 0.0, &scene, &mut rec);
        let (wx, wy) = rec.warps[1];
        assert_eq!(wx, 20.0);
        assert!(wy.is_nan());
        assert_eq!(tool.ly, 10.0);
    }

    #[test]
    fn mouse_axis_moves_relative() {
        let scene = scene_with_window();
        let mut tool = TabletTool::<&'static str>::new(ToolKind::Mouse);
        let mut rec = Recorder::default();
        tool.proximity_in(10.0, 10.0, &mut rec);

        tool.axis(None, None, 5.0, -2.0, &scene, &mut rec);
        assert_eq!(rec.relative_moves, vec![(5.0, -2.0)]);
        assert_eq!((tool.lx, tool.ly), (15.0, 8.0));
    }

    #[test]
    fn tip_down_enters_down_and_axis_reports_offset() {
        let scene = scene_with_window();
        let mut tool = TabletTool::<&'static str>::new(ToolKind::Pen);
        let mut rec = Recorder::default();
        tool.proximity_in(50.0, 50.0, &mut rec);

        let hit = scene.hit_test(tool.lx, tool.ly, false);
        tool.tip_down(hit, &mut rec);
        assert!(tool.is_down());
        assert_eq!(rec.tips, vec![("S", true)]);

        tool.axis(Some(999.0), Some(999.0), 3.0, 4.0, &scene, &mut rec);
        assert_eq!(rec.motions.last(), Some(&("S", 3.0, 4.0)));
    }

    #[test]
    fn tip_up_exits_down_only_once_buttons_released() {
        let scene = scene_with_window();
        let mut tool = TabletTool::<&'static str>::new(ToolKind::Pen);
        let mut rec = Recorder::default();
        tool.proximity_in(50.0, 50.0, &mut rec);
        let hit = scene.hit_test(tool.lx, tool.ly, false);
        tool.tip_down(hit, &mut rec);
        tool.button(0, true, &mut rec);

        tool.tip_up(&mut rec);
        assert!(tool.is_down(), "a held button must keep the tool down");
        assert_eq!(rec.tips, vec![("S", true)]);

        tool.button(0, false, &mut rec);
        assert!(!tool.is_down());
        assert_eq!(rec.tips, vec![("S", true), ("S", false)]);
    }
}
