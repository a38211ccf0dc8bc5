//! Wayland display bootstrap: creates the display and binds its listening
//! socket. Protocol handler wiring for individual globals (`wl_seat`,
//! pointer-constraints, …) against the `domain` state machines is the
//! remaining future work tracked in `DESIGN.md`.

pub mod globals;

use smithay::wayland::socket::ListeningSocketSource;
use wayland_server::Display;

use crate::error::RiverError;

/// A bound display plus the calloop source that accepts new client
/// connections on its socket.
pub struct DisplayBootstrap<D: 'static> {
    pub display: Display<D>,
    pub socket_source: ListeningSocketSource,
    pub socket_name: String,
}

/// Creates the display and binds an auto-numbered `wayland-N` socket,
/// mirroring the teacher's own `anvil`-derived startup sequence.
pub fn init_display<D: 'static>() -> Result<DisplayBootstrap<D>, RiverError> {
    let display = Display::<D>::new()
        .map_err(|e| RiverError::BackendStart(format!("failed to create Wayland display: {e}")))?;
    let socket_source = ListeningSocketSource::new_auto()
        .map_err(|e| RiverError::BackendStart(format!("failed to bind Wayland socket: {e}")))?;
    let socket_name = socket_source.socket_name().to_string_lossy().into_owned();

    Ok(DisplayBootstrap { display, socket_source, socket_name })
}
