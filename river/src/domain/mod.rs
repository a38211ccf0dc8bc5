//! Core input/focus domain logic, independent of any live Wayland display.
//!
//! Every stateful type here is generic over an opaque handle type (surface,
//! binding reference, client identity) and drives side effects through a
//! small `*Delegate` trait, so the state machines can be exercised with
//! plain unit tests. The `wayland` glue layer (protocol handlers, seat
//! wiring) instantiates these generics with real smithay types and
//! implements the delegate traits against live client state.

pub mod constraint;
pub mod cursor;
pub mod dispatcher;
pub mod drag;
pub mod focus;
pub mod input_method;
pub mod keyboard;
pub mod keymap_cache;
pub mod lock;
pub mod scene;
pub mod seat;
pub mod tablet;

pub use constraint::{ConstraintKind, ConstraintState, ConstraintUpdate, PointerConstraint};
pub use cursor::{CursorDelegate, CursorMode, CursorStateMachine};
pub use dispatcher::{DispatchDelegate, Dispatcher, QueuedEvent, DEFAULT_CAPACITY};
pub use drag::{DragIcon, DragOrigin};
pub use focus::{xwayland_cofocus_allowed, FocusDelegate, FocusError, FocusTarget, SeatFocus};
pub use input_method::{place_popup, InputMethodRelay, RelayDelegate, TextInput};
pub use keyboard::{Consumer, KeyboardDelegate, KeyboardGroup, PRESSED_CAPACITY};
pub use keymap_cache::KeymapEqualityCache;
pub use lock::{LockManager, LockSideEffect, LockState, NewLockOutcome, LOCK_SURFACES_TIMEOUT};
pub use scene::{HitResult, NodeId, Rect, Role, Scene, SceneNode};
pub use seat::{KeyboardGroupId, Seat};
pub use tablet::{TabletDelegate, TabletTool, ToolKind};
