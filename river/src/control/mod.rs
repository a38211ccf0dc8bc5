//! Control protocol server (spec §6): one of the globals the core exposes.
//! A privileged client submits a command as an argument vector over its own
//! control object and gets back exactly one success/failure reply. Only one
//! command may be in flight per object at a time.

#[derive(Debug, Clone, PartialEq)]
pub enum ControlOutcome {
    Success,
    Failure(String),
}

pub trait ControlDelegate {
    fn reply_success(&mut self);
    fn reply_failure(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// A command was submitted while a previous one on this object hadn't
    /// replied yet.
    AlreadyPending,
    /// An argv with no elements carries no command to run.
    EmptyArgv,
}

/// Per-client control object. `begin`/`complete` are split because running
/// the command itself (outside this module, against live compositor state)
/// may not finish synchronously.
#[derive(Debug, Default)]
pub struct ControlSession {
    pending: bool,
}

impl ControlSession {
    pub fn new() -> Self {
        Self { pending: false }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Accepts a submitted command, or rejects it without disturbing any
    /// command already in flight.
    pub fn begin(&mut self, argv: &[String]) -> Result<(), ControlError> {
        if self.pending {
            return Err(ControlError::AlreadyPending);
        }
        if argv.is_empty() {
            return Err(ControlError::EmptyArgv);
        }
        self.pending = true;
        Ok(())
    }

    /// Completes the in-flight command, sending its reply and freeing the
    /// object to accept the next submission.
    pub fn complete(&mut self, outcome: ControlOutcome, delegate: &mut impl ControlDelegate) {
        match outcome {
            ControlOutcome::Success => delegate.reply_success(),
            ControlOutcome::Failure(message) => delegate.reply_failure(&message),
        }
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        successes: u32,
        failures: Vec<String>,
    }

    impl ControlDelegate for Recorder {
        fn reply_success(&mut self) {
            self.successes += 1;
        }
        fn reply_failure(&mut self, message: &str) {
            self.failures.push(message.to_string());
        }
    }

    #[test]
    fn successful_round_trip() {
        let mut session = ControlSession::new();
        let mut rec = Recorder::default();

        session.begin(&["spawn".to_string(), "foot".to_string()]).unwrap();
        assert!(session.is_pending());
        session.complete(ControlOutcome::Success, &mut rec);
        assert!(!session.is_pending());
        assert_eq!(rec.successes, 1);
    }

    #[test]
    fn failure_reply_is_carried_through() {
        let mut session = ControlSession::new();
        let mut rec = Recorder::default();

        session.begin(&["close".to_string()]).unwrap();
        session.complete(ControlOutcome::Failure("no such command".into()), &mut rec);
        assert_eq!(rec.failures, vec!["no such command".to_string()]);
    }

    #[test]
    fn empty_argv_is_rejected_without_starting_a_command() {
        let mut session = ControlSession::new();
        assert_eq!(session.begin(&[]), Err(ControlError::EmptyArgv));
        assert!(!session.is_pending());
    }

    #[test]
    fn second_submission_while_pending_is_rejected() {
        let mut session = ControlSession::new();
        let mut rec = Recorder::default();

        session.begin(&["spawn".to_string()]).unwrap();
        assert_eq!(session.begin(&["close".to_string()]), Err(ControlError::AlreadyPending));

        session.complete(ControlOutcome::Success, &mut rec);
        assert!(session.begin(&["close".to_string()]).is_ok(), "completing frees the object for the next command");
    }
}
