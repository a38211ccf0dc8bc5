//! River: a dynamic tiling Wayland compositor.
//!
//! The input/focus engine lives in [`domain`] as a set of types generic
//! over opaque handles, independent of any live Wayland display. `main.rs`
//! and the protocol glue layer instantiate those generics against real
//! smithay state.

pub mod cli;
pub mod control;
pub mod domain;
pub mod error;
pub mod wayland;

pub use error::RiverError;
