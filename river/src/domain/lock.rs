//! Session-lock state machine (spec §4.7): unlocked -> waiting_for_lock_surfaces
//! -> waiting_for_blank / locked -> unlocked, bounded by a 200ms timer.

use std::time::Duration;

pub const LOCK_SURFACES_TIMEOUT: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    WaitingForLockSurfaces,
    WaitingForBlank,
    Locked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockSideEffect {
    None,
    EnableLockedTreeStartTimerClearFocus,
    DisableNormalTreeSendLockedCancelTimerWindowingDirty,
    DisableNormalTree,
    SendLockedWindowingDirty,
    EnableNormalDisableLockedRefocusWindowingDirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewLockOutcome {
    /// A lock client already exists and is alive; the new one must be
    /// destroyed by the caller.
    Denied,
    /// No live lock client existed. If the manager was already `locked`
    /// from a dead predecessor, the new client immediately receives
    /// `locked`; otherwise the normal `waiting_for_lock_surfaces` sequence
    /// starts (or continues, if a predecessor died mid-wait).
    Accepted { send_locked_now: bool, side_effect: LockSideEffect },
}

#[derive(Debug, Default)]
pub struct LockManager {
    state: LockState,
    has_lock_client: bool,
}

impl Default for LockState {
    fn default() -> Self {
        LockState::Unlocked
    }
}

impl LockManager {
    pub fn new() -> Self {
        Self { state: LockState::Unlocked, has_lock_client: false }
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// Whether the lock manager is anything but `unlocked`, i.e. the
    /// windowing focus target must be a lock surface or none (P5).
    pub fn is_locking(&self) -> bool {
        self.state != LockState::Unlocked
    }

    pub fn new_lock_request(&mut self) -> NewLockOutcome {
        if self.has_lock_client {
            return NewLockOutcome::Denied;
        }
        self.has_lock_client = true;

        match self.state {
            LockState::Unlocked => {
                self.state = LockState::WaitingForLockSurfaces;
                NewLockOutcome::Accepted {
                    send_locked_now: false,
                    side_effect: LockSideEffect::EnableLockedTreeStartTimerClearFocus,
                }
            }
            LockState::Locked => NewLockOutcome::Accepted {
                send_locked_now: true,
                side_effect: LockSideEffect::None,
            },
            LockState::WaitingForLockSurfaces | LockState::WaitingForBlank => {
                NewLockOutcome::Accepted { send_locked_now: false, side_effect: LockSideEffect::None }
            }
        }
    }

    pub fn all_outputs_rendered_lock_surface(&mut self) -> LockSideEffect {
        if self.state == LockState::WaitingForLockSurfaces {
            self.state = LockState::Locked;
            LockSideEffect::DisableNormalTreeSendLockedCancelTimerWindowingDirty
        } else {
            LockSideEffect::None
        }
    }

    pub fn timer_fired(&mut self) -> LockSideEffect {
        if self.state == LockState::WaitingForLockSurfaces {
            self.state = LockState::WaitingForBlank;
            LockSideEffect::DisableNormalTree
        } else {
            LockSideEffect::None
        }
    }

    pub fn all_outputs_blanked(&mut self) -> LockSideEffect {
        if self.state == LockState::WaitingForBlank {
            self.state = LockState::Locked;
            LockSideEffect::SendLockedWindowingDirty
        } else {
            LockSideEffect::None
        }
    }

    pub fn client_unlock(&mut self) -> LockSideEffect {
        if self.state == LockState::Locked {
            self.state = LockState::Unlocked;
            self.has_lock_client = false;
            LockSideEffect::EnableNormalDisableLockedRefocusWindowingDirty
        } else {
            LockSideEffect::None
        }
    }

    /// The lock client died. `waiting_for_lock_surfaces` advances straight
    /// to `waiting_for_blank`; other states are unaffected (a future lock
    /// request can still adopt them).
    pub fn lock_client_destroyed(&mut self) -> LockSideEffect {
        self.has_lock_client = false;
        if self.state == LockState::WaitingForLockSurfaces {
            self.state = LockState::WaitingForBlank;
            LockSideEffect::DisableNormalTree
        } else {
            LockSideEffect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_lock_timeout_then_blank_then_locked() {
        let mut lock = LockManager::new();
        assert!(matches!(
            lock.new_lock_request(),
            NewLockOutcome::Accepted { send_locked_now: false, .. }
        ));
        assert_eq!(lock.state(), LockState::WaitingForLockSurfaces);

        assert_eq!(lock.timer_fired(), LockSideEffect::DisableNormalTree);
        assert_eq!(lock.state(), LockState::WaitingForBlank);

        assert_eq!(lock.all_outputs_blanked(), LockSideEffect::SendLockedWindowingDirty);
        assert_eq!(lock.state(), LockState::Locked);
    }

    #[test]
    fn all_lock_surfaces_rendered_skips_blank_phase() {
        let mut lock = LockManager::new();
        lock.new_lock_request();

        assert_eq!(
            lock.all_outputs_rendered_lock_surface(),
            LockSideEffect::DisableNormalTreeSendLockedCancelTimerWindowingDirty
        );
        assert_eq!(lock.state(), LockState::Locked);
    }

    #[test]
    fn unlock_returns_to_unlocked() {
        let mut lock = LockManager::new();
        lock.new_lock_request();
        lock.all_outputs_rendered_lock_surface();

        assert_eq!(lock.client_unlock(), LockSideEffect::EnableNormalDisableLockedRefocusWindowingDirty);
        assert_eq!(lock.state(), LockState::Unlocked);
    }

    #[test]
    fn second_lock_request_denied_while_client_alive() {
        let mut lock = LockManager::new();
        lock.new_lock_request();

        assert_eq!(lock.new_lock_request(), NewLockOutcome::Denied);
    }

    #[test]
    fn lock_client_death_mid_wait_advances_to_blank() {
        let mut lock = LockManager::new();
        lock.new_lock_request();

        assert_eq!(lock.lock_client_destroyed(), LockSideEffect::DisableNormalTree);
        assert_eq!(lock.state(), LockState::WaitingForBlank);
    }

    #[test]
    fn new_lock_after_predecessor_died_while_already_locked_gets_locked_immediately() {
        let mut lock = LockManager::new();
        lock.new_lock_request();
        lock.all_outputs_rendered_lock_surface();
        assert_eq!(lock.state(), LockState::Locked);

        // Predecessor's client connection dies without ever unlocking.
        lock.lock_client_destroyed();
        assert_eq!(lock.state(), LockState::Locked);

        // A fresh lock client connects; it should see `locked` right away
        // rather than restarting the waiting_for_lock_surfaces sequence.
        assert_eq!(
            lock.new_lock_request(),
            NewLockOutcome::Accepted { send_locked_now: true, side_effect: LockSideEffect::None }
        );
    }

    proptest::proptest! {
        #[test]
        fn p5_focus_target_is_lock_surface_only_when_locking(
            events in proptest::collection::vec(0u8..5, 0..30)
        ) {
            let mut lock = LockManager::new();
            for event in events {
                match event {
                    0 => { lock.new_lock_request(); }
                    1 => { lock.all_outputs_rendered_lock_surface(); }
                    2 => { lock.timer_fired(); }
                    3 => { lock.all_outputs_blanked(); }
                    _ => { lock.client_unlock(); }
                }
                let locking = lock.is_locking();
                prop_assert_eq!(locking, lock.state() != LockState::Unlocked);
            }
        }
    }
}
