use std::ffi::OsString;
use std::os::unix::fs::PermissionsExt;
use std::os::unix::process::CommandExt;
use std::process::{Command, ExitCode};

use calloop::signals::{Signal, Signals};
use calloop::EventLoop;
use nix::sys::signal::{self, SigHandler};
use nix::unistd::getpgrp;
use river::cli::{Cli, LogLevel};
use river::domain::{LockManager, Scene, Seat};
use river::error::RiverError;
use river_core::RiverCoreError;
use tracing::{error, info, warn};

/// Opaque handles the domain layer is generic over, standing in until the
/// protocol-glue layer instantiates `Seat`/`Scene` against live smithay
/// objects (tracked as future work in `DESIGN.md`).
type SurfaceHandle = u64;
type BindingHandle = u32;
type ClientHandle = u32;

/// Everything the event loop drives each dispatch: the scene graph, the
/// default seat, and the session-lock manager.
struct CompositorState {
    scene: Scene<SurfaceHandle>,
    seat: Seat<SurfaceHandle, BindingHandle, ClientHandle>,
    lock: LockManager,
}

impl CompositorState {
    fn new() -> Self {
        Self {
            scene: Scene::new(),
            seat: Seat::default(),
            lock: LockManager::new(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("river: {err}");
            return ExitCode::from(1);
        }
    };

    if let Err(err) = init_tracing(&cli) {
        eprintln!("river: {err}");
        return ExitCode::from(1);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "fatal error, exiting");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(cli: &Cli) -> Result<(), RiverError> {
    let level = match cli.log_level {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warning => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
    };
    river_core::init_logging(level, cli.log_scopes.as_deref())
        .map_err(RiverCoreError::from)
        .map_err(RiverError::from)
}

/// Single-threaded cooperative event loop (spec §5): the signal source and
/// (eventually) the Wayland/libinput sources all run on this one calloop
/// loop, with no parallelism anywhere in the core.
fn run(cli: Cli) -> Result<(), RiverError> {
    ignore_sigpipe();

    let mut event_loop: EventLoop<'static, CompositorState> = EventLoop::try_new()
        .map_err(|e| RiverError::BackendStart(format!("failed to create event loop: {e}")))?;
    let loop_signal = event_loop.get_signal();

    let signal_source = Signals::new(&[Signal::SIGINT, Signal::SIGTERM])
        .map_err(|e| RiverError::BackendStart(format!("failed to install signal handler: {e}")))?;
    event_loop
        .handle()
        .insert_source(signal_source, move |event, _, _state| {
            warn!(signal = ?event.signal, "received shutdown signal");
            loop_signal.stop();
        })
        .map_err(|e| RiverError::BackendStart(format!("failed to register signal source: {e}")))?;

    let init_script = resolve_init_command(&cli)?;

    let socket_name = choose_display_socket_name();
    std::env::set_var("WAYLAND_DISPLAY", &socket_name);
    info!(socket = %socket_name, "Wayland display socket chosen");

    if !cli.no_xwayland {
        // A real backend assigns this once Xwayland's own display is up;
        // recorded here as the startup-time placeholder the rest of the
        // core observes via the environment, matching spec §6.
        std::env::set_var("DISPLAY", ":0");
    }

    if let Some(init_script) = init_script {
        spawn_init_process(&init_script)?;
    }

    let mut state = CompositorState::new();
    state.seat.add_keyboard_group(0);

    info!("entering event loop");
    event_loop
        .run(None, &mut state, |_state| {})
        .map_err(|e| RiverError::BackendStart(format!("event loop terminated with an error: {e}")))?;
    info!("shutdown requested, terminating gracefully");

    broadcast_sigterm_to_init_process_group();
    Ok(())
}

/// SIGPIPE defaults to terminating the process; a single broken client
/// socket write must not take the compositor down with it. Restored to
/// `SIG_DFL` for any child we spawn.
fn ignore_sigpipe() {
    unsafe {
        let _ = signal::signal(signal::Signal::SIGPIPE, SigHandler::SigIgn);
    }
}

fn choose_display_socket_name() -> String {
    for n in 0..32 {
        let candidate = format!("wayland-{n}");
        let path = match river_core::runtime_dir() {
            Ok(dir) => dir.join(&candidate),
            Err(_) => break,
        };
        if !path.exists() {
            return candidate;
        }
    }
    "wayland-0".to_string()
}

/// `-c <command>` takes precedence over the init script; if neither is
/// usable the compositor still starts (no command is mandatory), but an
/// init script that exists and isn't executable is a usage error.
fn resolve_init_command(cli: &Cli) -> Result<Option<OsString>, RiverError> {
    if let Some(command) = &cli.command {
        return Ok(Some(OsString::from(command)));
    }

    let path = river_core::init_script_path().map_err(RiverError::from)?;
    if !path.exists() {
        return Ok(None);
    }

    let metadata = std::fs::metadata(&path).map_err(|e| {
        RiverError::from(RiverCoreError::Io {
            message: "failed to stat init script".into(),
            path: path.clone(),
            source: e,
        })
    })?;
    if metadata.permissions().mode() & 0o111 == 0 {
        return Err(RiverError::from(RiverCoreError::Usage(format!(
            "init script {} exists but is not executable",
            path.display()
        ))));
    }

    Ok(Some(path.into_os_string()))
}

fn spawn_init_process(command: &std::ffi::OsStr) -> Result<(), RiverError> {
    let shell = std::env::var_os("SHELL").unwrap_or_else(|| OsString::from("/bin/sh"));
    unsafe {
        Command::new(shell)
            .arg("-c")
            .arg(command)
            .pre_exec(|| {
                let _ = signal::signal(signal::Signal::SIGPIPE, SigHandler::SigDfl);
                Ok(())
            })
            .spawn()
            .map_err(|e| RiverError::BackendStart(format!("failed to launch init command: {e}")))?;
    }
    Ok(())
}

fn broadcast_sigterm_to_init_process_group() {
    let pgid = getpgrp();
    let _ = signal::killpg(pgid, signal::Signal::SIGTERM);
}
