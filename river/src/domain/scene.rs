//! Hit-testing over the scene graph: layout coordinate to (surface, role).
//!
//! Generic over the surface-handle type `S` so the algorithm can be unit
//! tested without a live Wayland display; production wiring instantiates
//! `S = smithay::wayland::compositor::SurfaceData` (or a thin newtype over
//! `WlSurface`).

/// The semantic kind of whatever was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Window,
    ShellSurface,
    LayerSurface,
    LockSurface,
    OverrideRedirect,
}

pub type NodeId = u64;

/// An axis-aligned box in layout coordinates, or a surface-local input
/// region when attached to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Containment test against surface-local coordinates, i.e. as if the
    /// rect's own `x, y` were the local origin offset.
    pub(crate) fn contains_local(&self, sx: f64, sy: f64) -> bool {
        sx >= self.x && sx < self.x + self.w && sy >= self.y && sy < self.y + self.h
    }
}

/// One entry of the scene graph.
#[derive(Debug, Clone)]
pub struct SceneNode<S> {
    pub id: NodeId,
    pub role: Role,
    pub enabled: bool,
    /// Geometry in layout coordinates.
    pub geometry: Rect,
    /// `None` for nodes that have no directly hittable surface of their own
    /// (e.g. a window's container node whose toplevel surface is nested).
    pub surface: Option<S>,
    /// Surface-local input region. `None` means the whole geometry accepts
    /// input (no subsurface extends past the toplevel's own input region).
    pub input_region: Option<Rect>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HitResult<S> {
    pub node: NodeId,
    pub surface: Option<S>,
    pub sx: f64,
    pub sy: f64,
    pub role: Role,
}

/// An ordered (bottom-to-top) list of scene nodes. The last node whose
/// geometry contains the point and that passes the lock-visibility gate
/// wins.
#[derive(Debug, Default)]
pub struct Scene<S> {
    nodes: Vec<SceneNode<S>>,
}

impl<S: Clone> Scene<S> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn push(&mut self, node: SceneNode<S>) {
        self.nodes.push(node);
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode<S>> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode<S>> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Hit-test `(lx, ly)`. `locked` is the lock manager's current gating
    /// state: when `true` only lock-surface nodes are eligible; when
    /// `false` lock-surface nodes are invisible to hit-testing.
    pub fn hit_test(&self, lx: f64, ly: f64, locked: bool) -> Option<HitResult<S>> {
        for node in self.nodes.iter().rev() {
            if !node.enabled {
                continue;
            }
            let is_lock = node.role == Role::LockSurface;
            if is_lock != locked {
                continue;
            }
            if !node.geometry.contains(lx, ly) {
                continue;
            }

            let sx = lx - node.geometry.x;
            let sy = ly - node.geometry.y;
            let in_region = node
                .input_region
                .as_ref()
                .map_or(true, |region| region.contains_local(sx, sy));
            let surface = if in_region { node.surface.clone() } else { None };

            debug_assert!(node.enabled, "hit-test returned a disabled node");
            debug_assert_eq!(is_lock, locked, "lock-gating invariant violated");

            return Some(HitResult {
                node: node.id,
                surface,
                sx,
                sy,
                role: node.role,
            });
        }
        None
    }
}
