//! Structured logging for River, built on `tracing`.
//!
//! An `EnvFilter`-driven `tracing_subscriber` writing to stderr, ANSI-aware.
//! Maps the CLI's `-log-scopes` syntax (a closed enumeration, not a free
//! string) onto per-target `EnvFilter` directives, supporting `all` and
//! `~<scope>` negation.

use std::fmt;
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{fmt as tracing_fmt, EnvFilter};

use crate::error::LoggingError;

/// The closed set of log scopes River exposes via `-log-scopes`.
///
/// Each scope corresponds to a module path used as a `tracing` target, so
/// `-log-scopes ~cursor` silences `target: "river::cursor"` specifically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogScope {
    Server,
    Scene,
    Cursor,
    Constraint,
    Keyboard,
    InputMethod,
    Focus,
    Lock,
    Drag,
    Dispatcher,
    Control,
    Xwayland,
}

impl LogScope {
    /// All scopes, in the order they're listed for `-h`.
    pub const ALL: &'static [LogScope] = &[
        LogScope::Server,
        LogScope::Scene,
        LogScope::Cursor,
        LogScope::Constraint,
        LogScope::Keyboard,
        LogScope::InputMethod,
        LogScope::Focus,
        LogScope::Lock,
        LogScope::Drag,
        LogScope::Dispatcher,
        LogScope::Control,
        LogScope::Xwayland,
    ];

    /// The `tracing` target (module path prefix) this scope filters.
    pub fn target(self) -> &'static str {
        match self {
            LogScope::Server => "river::server",
            LogScope::Scene => "river::scene",
            LogScope::Cursor => "river::cursor",
            LogScope::Constraint => "river::cursor::constraint",
            LogScope::Keyboard => "river::keyboard",
            LogScope::InputMethod => "river::input_method",
            LogScope::Focus => "river::seat::focus",
            LogScope::Lock => "river::lock",
            LogScope::Drag => "river::cursor::drag",
            LogScope::Dispatcher => "river::dispatcher",
            LogScope::Control => "river::control",
            LogScope::Xwayland => "river::xwayland",
        }
    }
}

impl fmt::Display for LogScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogScope::Server => "server",
            LogScope::Scene => "scene",
            LogScope::Cursor => "cursor",
            LogScope::Constraint => "constraint",
            LogScope::Keyboard => "keyboard",
            LogScope::InputMethod => "input-method",
            LogScope::Focus => "focus",
            LogScope::Lock => "lock",
            LogScope::Drag => "drag",
            LogScope::Dispatcher => "dispatcher",
            LogScope::Control => "control",
            LogScope::Xwayland => "xwayland",
        };
        f.write_str(name)
    }
}

impl FromStr for LogScope {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "server" => LogScope::Server,
            "scene" => LogScope::Scene,
            "cursor" => LogScope::Cursor,
            "constraint" => LogScope::Constraint,
            "keyboard" => LogScope::Keyboard,
            "input-method" | "input_method" => LogScope::InputMethod,
            "focus" => LogScope::Focus,
            "lock" => LogScope::Lock,
            "drag" => LogScope::Drag,
            "dispatcher" => LogScope::Dispatcher,
            "control" => LogScope::Control,
            "xwayland" => LogScope::Xwayland,
            other => return Err(LoggingError::UnknownScope(other.to_string())),
        })
    }
}

/// One entry of a parsed `-log-scopes` list: enable everything, enable one
/// scope, or explicitly silence one scope (`~name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDirective {
    All,
    Enable(LogScope),
    Disable(LogScope),
}

/// Parses the comma-separated `-log-scopes` argument into directives.
pub fn parse_log_scopes(spec: &str) -> Result<Vec<ScopeDirective>, LoggingError> {
    spec.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            if entry == "all" {
                Ok(ScopeDirective::All)
            } else if let Some(negated) = entry.strip_prefix('~') {
                Ok(ScopeDirective::Disable(negated.parse()?))
            } else {
                Ok(ScopeDirective::Enable(entry.parse()?))
            }
        })
        .collect()
}

/// Builds an `EnvFilter` directive string from a base level and the parsed
/// `-log-scopes` directives. `all` sets the base level for every scope;
/// a later `~scope` in the list turns that scope off again.
fn build_filter_string(base_level: Level, directives: &[ScopeDirective]) -> String {
    if directives.is_empty() {
        return base_level.to_string();
    }

    let mut enabled: Vec<LogScope> = Vec::new();
    let mut disabled: Vec<LogScope> = Vec::new();

    for directive in directives {
        match directive {
            ScopeDirective::All => {
                enabled = LogScope::ALL.to_vec();
                disabled.clear();
            }
            ScopeDirective::Enable(scope) => {
                disabled.retain(|s| s != scope);
                if !enabled.contains(scope) {
                    enabled.push(*scope);
                }
            }
            ScopeDirective::Disable(scope) => {
                enabled.retain(|s| s != scope);
                if !disabled.contains(scope) {
                    disabled.push(*scope);
                }
            }
        }
    }

    let mut parts = vec!["warn".to_string()];
    for scope in &enabled {
        parts.push(format!("{}={}", scope.target(), base_level));
    }
    for scope in &disabled {
        parts.push(format!("{}=off", scope.target()));
    }
    parts.join(",")
}

/// Initializes the global `tracing` subscriber.
///
/// `log_level` is the base level from `-log-level` (defaults to `info` at
/// the call site); `log_scopes` is the raw `-log-scopes` argument, if any.
pub fn init_logging(base_level: Level, log_scopes: Option<&str>) -> Result<(), LoggingError> {
    let directives = match log_scopes {
        Some(spec) => parse_log_scopes(spec)?,
        None => Vec::new(),
    };
    let filter_string = build_filter_string(base_level, &directives);
    let filter = EnvFilter::try_new(&filter_string)
        .unwrap_or_else(|_| EnvFilter::new(base_level.to_string()));

    tracing_fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Minimal fallback logger for early startup or tests, matching the
/// teacher's `init_minimal_logging`: info level to stderr, errors ignored.
pub fn init_minimal_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));
    let _ = tracing_fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}
