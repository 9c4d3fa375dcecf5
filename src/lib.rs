//! padmeter — rate-limited gamepad polling as named `f64` channels.
//!
//! A [`DeviceRegistry`] owns four controller slots and polls each one at most
//! once per poll interval (10 ms by default). Every poll is translated into
//! 23 normalized channels (sticks, buttons, triggers, connection, battery).
//! Consumers bind a [`ConsumerHandle`] to one `(slot, channel)` pair and read
//! a single value per query.
//!
//! ```no_run
//! use padmeter::{backends::probe_source, DeviceRegistry, RegistryConfig};
//!
//! let registry = DeviceRegistry::new(probe_source(), RegistryConfig::default());
//! let lx = registry.bind(0, "JoyL_X").expect("valid binding");
//! let up = registry.bind(0, "Dpad_U").expect("valid binding");
//! println!("LX={:.3} up={}", lx.query(&registry), up.query(&registry));
//! ```

pub mod backends;
pub mod binding;
pub mod channel;
pub mod clock;
pub mod config;
pub mod device;
pub mod error;
pub mod gamepad;
pub mod registry;
pub mod slot;
pub mod snapshot;

pub use backends::virtual_input::VirtualPad;
pub use binding::*;
pub use channel::*;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::*;
pub use device::*;
pub use error::*;
pub use gamepad::{
    derive_channels, BatteryDevice, BatteryInfo, BatteryLevel, ChannelValues, GamepadSnapshot,
    PollOutcome,
};
pub use registry::*;
pub use slot::*;
pub use snapshot::*;
