//! Point-in-time view of every slot.
//!
//! A [`Snapshot`] is an **owned**, read-only copy of all slot values at one
//! moment. It is produced by [`DeviceRegistry::snapshot`](crate::DeviceRegistry::snapshot)
//! and is cheap to clone for fan-out, logging or serialization.
//!
//! # Semantics
//! - Slots appear in index order, one entry per slot whether connected or not.
//! - Values are keyed by public channel name (`"JoyL_X"`, `"Connected"`, ...).
//! - Taking a snapshot does **not** poll; it reflects the last refresh of each slot.
//!
//! # Example
//! ```no_run
//! use padmeter::{DeviceRegistry, RegistryConfig};
//!
//! let registry = DeviceRegistry::new(padmeter::backends::probe_source(), RegistryConfig::default());
//! registry.refresh_all();
//! let snap = registry.snapshot();
//! for slot in snap.connected() {
//!     println!("slot {}: LX={:.3}", slot.slot, slot.get("JoyL_X").unwrap_or(0.0));
//! }
//! println!("{}", snap.to_json().unwrap());
//! ```

use crate::channel::Channel;
use crate::slot::DeviceSlot;
use serde::Serialize;
use std::collections::BTreeMap;

/// State of one slot inside a [`Snapshot`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotState {
    pub slot: usize,
    pub connected: bool,
    /// Driver packet counter of the last connected poll.
    pub packet: u32,
    /// `channel name -> value`.
    pub values: BTreeMap<&'static str, f64>,
}

impl SlotState {
    pub(crate) fn from_slot(slot: &DeviceSlot) -> Self {
        Self {
            slot: slot.index().get(),
            connected: slot.is_connected(),
            packet: slot.state().packet_number,
            values: slot.values().iter().map(|(c, v)| (c.name(), v)).collect(),
        }
    }

    /// Value of a channel by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<f64> {
        let channel = Channel::from_name(name)?;
        self.values.get(channel.name()).copied()
    }
}

/// Owned snapshot of every slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Snapshot(pub Vec<SlotState>);

impl Snapshot {
    #[inline]
    pub fn slots(&self) -> &[SlotState] {
        &self.0
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Option<&SlotState> {
        self.0.get(slot)
    }

    /// Slots whose last poll found a device.
    pub fn connected(&self) -> impl Iterator<Item = &SlotState> {
        self.0.iter().filter(|s| s.connected)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    #[inline]
    pub fn into_inner(self) -> Vec<SlotState> {
        self.0
    }
}
