//! Seat keyboard focus: owns the current focus target and validates
//! transitions against the lock manager and input inhibitors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusTarget<S> {
    None,
    Window(S),
    Layer(S),
    LockSurface(S),
    OverrideRedirect(S),
}

impl<S> FocusTarget<S> {
    pub fn surface(&self) -> Option<&S> {
        match self {
            FocusTarget::None => None,
            FocusTarget::Window(s)
            | FocusTarget::Layer(s)
            | FocusTarget::LockSurface(s)
            | FocusTarget::OverrideRedirect(s) => Some(s),
        }
    }

    pub fn is_lock_surface(&self) -> bool {
        matches!(self, FocusTarget::LockSurface(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusError {
    /// Only `lock_surface` or `none` are legal windowing focus targets
    /// while the lock manager isn't `unlocked`.
    InvalidWhileLocked,
    /// An input-inhibitor is active and the target isn't the inhibiting
    /// client.
    Suppressed,
}

pub trait FocusDelegate<S> {
    fn keyboard_leave(&mut self, surface: &S);
    fn keyboard_enter(&mut self, surface: &S);
    /// Xdg-activation-style side effect fired when a window gains focus
    /// and isn't already the recorded activated Xwayland surface.
    fn activate_window(&mut self, surface: &S);
}

#[derive(Debug, Default)]
pub struct SeatFocus<S> {
    target: FocusTarget<S>,
    /// PID of the Xwayland client last activated via a `Window` focus
    /// change, per §4.10 rule 2. `None` both for "no Xwayland surface
    /// activated yet" and "the last focused window was native Wayland".
    last_xwayland_activation_pid: Option<i32>,
}

impl<S: Clone + PartialEq> SeatFocus<S> {
    pub fn new() -> Self {
        Self {
            target: FocusTarget::None,
            last_xwayland_activation_pid: None,
        }
    }

    pub fn target(&self) -> &FocusTarget<S> {
        &self.target
    }

    /// Sets the new focus target, emitting leave/enter in the same turn.
    /// `locked` is whether the lock manager's state is not `unlocked`;
    /// `suppressed` is whether an input-inhibitor blocks this target;
    /// `xwayland_pid` is the PID backing `new_target` if it is an Xwayland
    /// surface, for §4.10 rule 2's activation-state preservation.
    pub fn set_focus(
        &mut self,
        new_target: FocusTarget<S>,
        locked: bool,
        suppressed: bool,
        xwayland_pid: Option<i32>,
        delegate: &mut impl FocusDelegate<S>,
    ) -> Result<(), FocusError> {
        if locked && !matches!(new_target, FocusTarget::LockSurface(_) | FocusTarget::None) {
            return Err(FocusError::InvalidWhileLocked);
        }
        if suppressed {
            return Err(FocusError::Suppressed);
        }
        if self.target == new_target {
            return Ok(());
        }

        if let Some(old_surface) = self.target.surface() {
            delegate.keyboard_leave(old_surface);
        }
        self.target = new_target;
        if let Some(new_surface) = self.target.surface() {
            delegate.keyboard_enter(new_surface);
            if matches!(self.target, FocusTarget::Window(_)) {
                let already_activated =
                    xwayland_pid.is_some() && xwayland_pid == self.last_xwayland_activation_pid;
                if !already_activated {
                    delegate.activate_window(new_surface);
                }
                self.last_xwayland_activation_pid = xwayland_pid;
            }
        }
        Ok(())
    }
}

/// Whether an override-redirect surface may hold focus concurrently with a
/// windowed Xwayland surface being focused, per the PID-pinning heuristic
/// (spec §9 Open Question, §4.6). Both PIDs must be known and equal.
pub fn xwayland_cofocus_allowed(override_redirect_pid: Option<i32>, window_pid: Option<i32>) -> bool {
    matches!((override_redirect_pid, window_pid), (Some(a), Some(b)) if a == b)
}
