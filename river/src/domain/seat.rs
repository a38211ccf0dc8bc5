//! Seat: the aggregate of one cursor, zero-or-more keyboard groups (one
//! designated active), an input-method relay, a focus target, and a
//! pending-event dispatcher (spec §3 Data Model).

use std::collections::HashMap;

use super::cursor::CursorStateMachine;
use super::dispatcher::Dispatcher;
use super::focus::SeatFocus;
use super::input_method::InputMethodRelay;
use super::keyboard::KeyboardGroup;

/// Opaque identifier for a physical keyboard group, assigned by the caller
/// when the underlying device is added to the seat.
pub type KeyboardGroupId = u32;

pub struct Seat<S, B, C> {
    pub cursor: CursorStateMachine<S, B>,
    pub focus: SeatFocus<S>,
    pub input_method: InputMethodRelay<C>,
    pub dispatcher: Dispatcher,
    keyboard_groups: HashMap<KeyboardGroupId, KeyboardGroup<B>>,
    active_keyboard_group: Option<KeyboardGroupId>,
}

impl<S: Clone + PartialEq, B: Clone, C: PartialEq + Clone> Seat<S, B, C> {
    pub fn new(dispatcher_capacity: usize) -> Self {
        Self {
            cursor: CursorStateMachine::new(),
            focus: SeatFocus::new(),
            input_method: InputMethodRelay::new(),
            dispatcher: Dispatcher::new(dispatcher_capacity),
            keyboard_groups: HashMap::new(),
            active_keyboard_group: None,
        }
    }

    pub fn active_keyboard_group(&self) -> Option<KeyboardGroupId> {
        self.active_keyboard_group
    }

    pub fn keyboard_group(&self, id: KeyboardGroupId) -> Option<&KeyboardGroup<B>> {
        self.keyboard_groups.get(&id)
    }

    pub fn keyboard_group_mut(&mut self, id: KeyboardGroupId) -> Option<&mut KeyboardGroup<B>> {
        self.keyboard_groups.get_mut(&id)
    }

    pub fn keyboard_group_count(&self) -> usize {
        self.keyboard_groups.len()
    }

    /// Adds a new keyboard group to the seat. The first group added becomes
    /// active; later additions don't displace it.
    pub fn add_keyboard_group(&mut self, id: KeyboardGroupId) {
        self.keyboard_groups.entry(id).or_insert_with(KeyboardGroup::new);
        if self.active_keyboard_group.is_none() {
            self.active_keyboard_group = Some(id);
        }
    }

    /// Explicitly designates `id` the seat's active keyboard group.
    pub fn set_active_keyboard_group(&mut self, id: KeyboardGroupId) -> bool {
        if self.keyboard_groups.contains_key(&id) {
            self.active_keyboard_group = Some(id);
            true
        } else {
            false
        }
    }

    /// Teardown rule (spec §4.4): removing a keyboard group that was the
    /// seat's active one reassigns activity to another surviving group, if
    /// any remain.
    pub fn remove_keyboard_group(&mut self, id: KeyboardGroupId) {
        self.keyboard_groups.remove(&id);
        if self.active_keyboard_group == Some(id) {
            self.active_keyboard_group = self.keyboard_groups.keys().next().copied();
        }
    }
}

impl<S: Clone + PartialEq, B: Clone, C: PartialEq + Clone> Default for Seat<S, B, C> {
    fn default() -> Self {
        Self::new(super::dispatcher::DEFAULT_CAPACITY)
    }
}
