#![cfg(target_os = "windows")]

//! Windows gamepad sources.
//!
//! - **XInput** user slots `0..4` via `XInputGetState` and
//!   `XInputGetBatteryInformation`.
//!
//! Most users should not touch this module directly. Prefer
//! [`probe_source`](crate::backends::probe_source) and hand the result to
//! [`DeviceRegistry::new`](crate::DeviceRegistry::new).

pub mod xinput_devices;

pub use xinput_devices::XInputSource;
