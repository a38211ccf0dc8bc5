//! Keyboard group: fans N physical keyboards into one logical keyboard and
//! routes each key to exactly one consumer for its whole press/release
//! lifetime.

use std::collections::HashMap;

/// Capacity ceiling matching the underlying input library's N-key rollover.
pub const PRESSED_CAPACITY: usize = 32;

/// Who a given key press is routed to, fixed at press time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Consumer<B> {
    Builtin,
    /// `None` when a press for this binding has already been delivered via
    /// another physical keyboard of the same group (fan-in dedup).
    Binding(Option<B>),
    EnsureEaten,
    ImGrab,
    Focus,
}

pub trait KeyboardDelegate<B> {
    fn binding_pressed(&mut self, binding: &B);
    fn binding_released(&mut self, binding: &B);
    fn deliver_to_im_grab(&mut self, keycode: u32, pressing: bool);
    fn deliver_to_focus(&mut self, keycode: u32, pressing: bool);
    fn modifiers_to_im_grab(&mut self);
    fn modifiers_to_focus(&mut self);
}

/// Fan-in of physical keyboards presented to clients as one logical
/// keyboard. `classify` (supplied by the caller at press time) performs
/// steps 1-7 of the classification algorithm using seat-wide state this
/// type doesn't own (bindings table, input-method grab, focus); this type
/// is responsible only for pressed-table bookkeeping, capacity, and fixed
/// press/release consumer routing.
#[derive(Debug, Default)]
pub struct KeyboardGroup<B> {
    pressed: HashMap<u32, (Consumer<B>, u32)>,
}

impl<B: Clone> KeyboardGroup<B> {
    pub fn new() -> Self {
        Self { pressed: HashMap::new() }
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    pub fn is_pressed(&self, keycode: u32) -> bool {
        self.pressed.contains_key(&keycode)
    }

    /// `processKey` (spec §4.4). `classify` is invoked only on a true new
    /// press (not on repeats of an already-tracked key).
    pub fn process_key(
        &mut self,
        keycode: u32,
        pressing: bool,
        classify: impl FnOnce() -> Consumer<B>,
        delegate: &mut impl KeyboardDelegate<B>,
    ) {
        if let Some((_, count)) = self.pressed.get_mut(&keycode) {
            if pressing {
                *count += 1;
            } else {
                *count -= 1;
                if *count == 0 {
                    let (consumer, _) = self.pressed.remove(&keycode).unwrap();
                    self.deliver(keycode, &consumer, false, delegate);
                }
            }
            return;
        }

        if !pressing {
            tracing::warn!(keycode, "release with no matching press, dropping");
            return;
        }

        if self.pressed.len() >= PRESSED_CAPACITY {
            tracing::warn!(keycode, "pressed-key capacity exceeded, dropping press");
            return;
        }

        let consumer = classify();
        self.deliver(keycode, &consumer, true, delegate);
        self.pressed.insert(keycode, (consumer, 1));
    }

    fn deliver(&self, keycode: u32, consumer: &Consumer<B>, pressing: bool, delegate: &mut impl KeyboardDelegate<B>) {
        match consumer {
            Consumer::Builtin | Consumer::EnsureEaten => {}
            Consumer::Binding(Some(binding)) => {
                if pressing {
                    delegate.binding_pressed(binding);
                } else {
                    delegate.binding_released(binding);
                }
            }
            Consumer::Binding(None) => {}
            Consumer::ImGrab => delegate.deliver_to_im_grab(keycode, pressing),
            Consumer::Focus => delegate.deliver_to_focus(keycode, pressing),
        }
    }

    /// `processModifiers` (spec §4.4): forwarded without consumer
    /// classification, to whichever path currently owns input.
    pub fn process_modifiers(&self, to_im_grab: bool, delegate: &mut impl KeyboardDelegate<B>) {
        if to_im_grab {
            delegate.modifiers_to_im_grab();
        } else {
            delegate.modifiers_to_focus();
        }
    }
}
