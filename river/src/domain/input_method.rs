//! Input-method / text-input relay: multiplexes text-input objects against
//! at-most-one bound input method per seat.

use super::scene::Rect;

#[derive(Debug, Clone)]
pub struct TextInput<C> {
    pub id: u32,
    pub client: C,
    pub focused: bool,
}

pub trait RelayDelegate<C> {
    fn send_unavailable(&mut self);
    fn leave(&mut self, text_input_id: u32);
    fn enter(&mut self, text_input_id: u32);
    fn deactivate_enabled(&mut self, text_input_id: u32);
    fn send_done(&mut self, text_input_id: u32);
}

#[derive(Debug, Default)]
pub struct InputMethodRelay<C> {
    method_bound: bool,
    enabled_text_input: Option<u32>,
    text_inputs: Vec<TextInput<C>>,
}

impl<C: PartialEq + Clone> InputMethodRelay<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_method_bound(&self) -> bool {
        self.method_bound
    }

    pub fn add_text_input(&mut self, id: u32, client: C) {
        self.text_inputs.push(TextInput { id, client, focused: false });
    }

    /// Rejects with `unavailable` if a method is already bound (P7).
    pub fn bind_method(&mut self, delegate: &mut impl RelayDelegate<C>) -> bool {
        if self.method_bound {
            delegate.send_unavailable();
            return false;
        }
        self.method_bound = true;
        true
    }

    pub fn unbind_method(&mut self) {
        self.method_bound = false;
    }

    /// `focus(new_surface?)` (spec §4.5), expressed in terms of the new
    /// focus target's owning client (or `None` if focus is cleared).
    pub fn focus(&mut self, new_client: Option<&C>, delegate: &mut impl RelayDelegate<C>) {
        for ti in self.text_inputs.iter().filter(|ti| ti.focused) {
            delegate.leave(ti.id);
        }
        if let Some(enabled_id) = self.enabled_text_input.take() {
            delegate.deactivate_enabled(enabled_id);
            delegate.send_done(enabled_id);
        }
        for ti in &mut self.text_inputs {
            ti.focused = false;
        }

        if let (Some(client), true) = (new_client, self.method_bound) {
            for ti in &mut self.text_inputs {
                if &ti.client == client {
                    ti.focused = true;
                    delegate.enter(ti.id);
                }
            }
        }
    }

    pub fn enable(&mut self, text_input_id: u32, delegate: &mut impl RelayDelegate<C>) {
        if let Some(prev) = self.enabled_text_input {
            if prev != text_input_id {
                delegate.deactivate_enabled(prev);
            }
        }
        self.enabled_text_input = Some(text_input_id);
        delegate.send_done(text_input_id);
    }

    pub fn disable(&mut self, text_input_id: u32, delegate: &mut impl RelayDelegate<C>) {
        if self.enabled_text_input == Some(text_input_id) {
            self.enabled_text_input = None;
            delegate.deactivate_enabled(text_input_id);
        }
    }

    /// Input-method `commit`: forwards to the enabled text-input, if any.
    /// No-op if the method isn't bound or no text-input is enabled.
    pub fn method_commit(&mut self, delegate: &mut impl RelayDelegate<C>) {
        if !self.method_bound {
            return;
        }
        if let Some(id) = self.enabled_text_input {
            delegate.send_done(id);
        }
    }
}

/// Popup placement (spec §4.5): left/bottom-align preferred, falling back
/// to right/top-align so the popup stays within the output.
pub fn place_popup(cursor: Rect, popup_w: f64, popup_h: f64, output: Rect) -> (f64, f64) {
    let x = if cursor.x + popup_w <= output.x + output.w {
        cursor.x
    } else {
        (cursor.x + cursor.w - popup_w).max(output.x)
    };
    let y = if cursor.y + cursor.h + popup_h <= output.y + output.h {
        cursor.y + cursor.h
    } else {
        (cursor.y - popup_h).max(output.y)
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        unavailable: u32,
        leaves: Vec<u32>,
        enters: Vec<u32>,
        deactivations: Vec<u32>,
        dones: Vec<u32>,
    }

    impl RelayDelegate<&'static str> for Recorder {
        fn send_unavailable(&mut self) {
            self.unavailable += 1;
        }
        fn leave(&mut self, text_input_id: u32) {
            self.leaves.push(text_input_id);
        }
        fn enter(&mut self, text_input_id: u32) {
            self.enters.push(text_input_id);
        }
        fn deactivate_enabled(&mut self, text_input_id: u32) {
            self.deactivations.push(text_input_id);
        }
        fn send_done(&mut self, text_input_id: u32) {
            self.dones.push(text_input_id);
        }
    }

    #[test]
    fn p7_second_method_binding_rejected() {
        let mut relay: InputMethodRelay<&'static str> = InputMethodRelay::new();
        let mut rec = Recorder::default();

        assert!(relay.bind_method(&mut rec));
        assert!(!relay.bind_method(&mut rec));
        assert_eq!(rec.unavailable, 1);
    }

    #[test]
    fn focus_change_enters_only_matching_client_text_inputs() {
        let mut relay: InputMethodRelay<&'static str> = InputMethodRelay::new();
        let mut rec = Recorder::default();
        relay.bind_method(&mut rec);
        relay.add_text_input(1, "client-a");
        relay.add_text_input(2, "client-b");

        relay.focus(Some(&"client-a"), &mut rec);
        assert_eq!(rec.enters, vec![1]);

        relay.focus(Some(&"client-b"), &mut rec);
        assert_eq!(rec.leaves, vec![1]);
        assert_eq!(rec.enters, vec![1, 2]);
    }

    #[test]
    fn enable_then_disable_round_trips() {
        let mut relay: InputMethodRelay<&'static str> = InputMethodRelay::new();
        let mut rec = Recorder::default();

        relay.enable(7, &mut rec);
        assert_eq!(rec.dones, vec![7]);

        relay.disable(7, &mut rec);
        assert_eq!(rec.deactivations, vec![7]);
    }

    #[test]
    fn commit_is_noop_without_bound_method_or_enabled_text_input() {
        let mut relay: InputMethodRelay<&'static str> = InputMethodRelay::new();
        let mut rec = Recorder::default();

        relay.method_commit(&mut rec);
        assert!(rec.dones.is_empty());

        relay.bind_method(&mut rec);
        relay.method_commit(&mut rec);
        assert!(rec.dones.is_empty());

        relay.enable(3, &mut rec);
        relay.method_commit(&mut rec);
        assert_eq!(rec.dones, vec![3, 3]);
    }

    #[test]
    fn popup_prefers_left_bottom_but_falls_back() {
        let output = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let cursor = Rect::new(10.0, 10.0, 2.0, 20.0);

        let (x, y) = place_popup(cursor, 100.0, 50.0, output);
        assert_eq!((x, y), (10.0, 30.0));

        let cursor_near_edge = Rect::new(950.0, 980.0, 2.0, 20.0);
        let (x2, y2) = place_popup(cursor_near_edge, 100.0, 50.0, output);
        assert_eq!(x2, 852.0); // right-aligned: cursor.x + cursor.w - popup_w
        assert_eq!(y2, 930.0); // top-aligned: cursor.y - popup_h
    }
}
