//! Per-seat dispatcher queue (spec §4.9): decouples device-event arrival
//! from window-manager-synchronized processing. Touch and tablet events
//! bypass this queue entirely (they carry their own frame discipline) and
//! are delivered straight through the cursor state machine.

#[derive(Debug, Clone, PartialEq)]
pub enum QueuedEvent {
    RelativeMotion { dx: f64, dy: f64 },
    AbsoluteMotion { x: f64, y: f64 },
    Button { code: u32, pressed: bool },
    Axis { horizontal: f64, vertical: f64 },
    PinchBegin,
    PinchUpdate { dx: f64, dy: f64, scale: f64, rotation: f64 },
    PinchEnd,
    SwipeBegin,
    SwipeUpdate { dx: f64, dy: f64 },
    SwipeEnd,
}

/// Default queue depth for a newly constructed seat, chosen generously
/// above what a single frame interval plausibly accumulates.
pub const DEFAULT_CAPACITY: usize = 64;

pub trait DispatchDelegate {
    fn handle(&mut self, event: &QueuedEvent);
    fn pointer_frame(&mut self);
}

/// A bounded FIFO standing in for the allocation-backed queue the event
/// loop feeds. `capacity` models the queue's allocation ceiling: enqueueing
/// past it is the "allocation failure" the spec has silently drop the
/// event rather than deliver it partially.
pub struct Dispatcher {
    queue: Vec<QueuedEvent>,
    capacity: usize,
}

impl Dispatcher {
    pub fn new(capacity: usize) -> Self {
        Self { queue: Vec::with_capacity(capacity.min(256)), capacity }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns `false` if the queue was at capacity and the event was
    /// dropped.
    pub fn enqueue(&mut self, event: QueuedEvent) -> bool {
        if self.queue.len() >= self.capacity {
            tracing::warn!("dispatcher queue at capacity, dropping event");
            return false;
        }
        self.queue.push(event);
        true
    }

    /// `frame` (spec §4.9): drains the queue in arrival order, then sends
    /// `pointer_frame` to the current pointer focus regardless of whether
    /// anything was queued.
    pub fn frame(&mut self, delegate: &mut impl DispatchDelegate) {
        for event in self.queue.drain(..) {
            delegate.handle(&event);
        }
        delegate.pointer_frame();
    }
}
