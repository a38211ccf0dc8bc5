//! Security-context global filter (spec §6, SPEC_FULL §2.15): decides which
//! of the core's Wayland globals a given client may bind, based on whether
//! it was created inside a `wp_security_context_v1` sandbox.

use wayland_protocols::wp::input_method::zv2::server::zwp_input_method_manager_v2::ZwpInputMethodManagerV2;
use wayland_protocols::wp::pointer_constraints::zv1::server::zwp_pointer_constraints_v1::ZwpPointerConstraintsV1;
use wayland_protocols::wp::relative_pointer::zv1::server::zwp_relative_pointer_manager_v1::ZwpRelativePointerManagerV1;
use wayland_protocols::wp::text_input::zv3::server::zwp_text_input_manager_v3::ZwpTextInputManagerV3;
use wayland_server::Resource;

/// Every global the core advertises (spec §6's list), named independently
/// of the concrete Wayland interface that backs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalName {
    Seat,
    PointerConstraints,
    RelativePointer,
    TextInput,
    InputMethod,
    Tablet,
    VirtualPointer,
    VirtualKeyboard,
    IdleInhibit,
    SessionLock,
    CursorShape,
}

impl GlobalName {
    /// The three managers a security-context-restricted client is never
    /// allowed to bind (spec §6: "latter three are security-context-blocked").
    pub const RESTRICTED: [GlobalName; 3] =
        [GlobalName::Tablet, GlobalName::VirtualPointer, GlobalName::VirtualKeyboard];

    /// The wire interface name this global advertises, for diagnostics and
    /// for the global filter registered with `wayland_server::Display`.
    /// Tablet/virtual-pointer/virtual-keyboard are named as literals: their
    /// generated bindings live in the `wlr`/misc protocol extension crates,
    /// not in the `wp` namespace this module otherwise draws from.
    pub fn interface_name(&self) -> &'static str {
        match self {
            GlobalName::Seat => "wl_seat",
            GlobalName::PointerConstraints => ZwpPointerConstraintsV1::interface().name,
            GlobalName::RelativePointer => ZwpRelativePointerManagerV1::interface().name,
            GlobalName::TextInput => ZwpTextInputManagerV3::interface().name,
            GlobalName::InputMethod => ZwpInputMethodManagerV2::interface().name,
            GlobalName::Tablet => "zwp_tablet_manager_v2",
            GlobalName::VirtualPointer => "zwlr_virtual_pointer_manager_v1",
            GlobalName::VirtualKeyboard => "zwp_virtual_keyboard_manager_v1",
            GlobalName::IdleInhibit => "zwp_idle_inhibit_manager_v1",
            GlobalName::SessionLock => "ext_session_lock_manager_v1",
            GlobalName::CursorShape => "wp_cursor_shape_manager_v1",
        }
    }
}

/// Whether a client is bound by a `wp_security_context_v1` sandbox. Plain
/// data so the filter below is a pure function, independent of how the
/// compositor tracks client metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClientSecurityContext {
    pub restricted: bool,
}

/// Filter predicate registered with `wayland_server::DisplayHandle::create_global`
/// (or its per-global filter closure): `true` means the client may bind.
pub fn may_bind(client: &ClientSecurityContext, global: GlobalName) -> bool {
    if client.restricted && GlobalName::RESTRICTED.contains(&global) {
        return false;
    }
    true
}
