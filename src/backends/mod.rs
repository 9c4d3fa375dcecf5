//! Gamepad sources for `padmeter`.
//!
//! Implementations of [`GamepadSource`](crate::device::GamepadSource).
//!
//! # Feature flags
//! - **`xinput`** — enables the Windows XInput source (default).
//!
//! [`VirtualPad`](virtual_input::VirtualPad) is always available.

use crate::device::GamepadSource;

#[cfg(all(feature = "xinput", target_os = "windows"))]
#[cfg_attr(docsrs, doc(cfg(all(feature = "xinput", target_os = "windows"))))]
pub mod windows;

pub mod virtual_input;

/// Default source for this build.
///
/// XInput on Windows when `xinput` is enabled; otherwise an empty
/// [`VirtualPad`](virtual_input::VirtualPad), so every slot reads disconnected.
pub fn probe_source() -> Box<dyn GamepadSource> {
    #[cfg(all(feature = "xinput", target_os = "windows"))]
    {
        tracing::debug!("using XInput gamepad source");
        Box::new(windows::XInputSource::new())
    }

    #[cfg(not(all(feature = "xinput", target_os = "windows")))]
    {
        tracing::warn!("no XInput on this build; all slots will read disconnected");
        Box::new(virtual_input::VirtualPad::new())
    }
}
