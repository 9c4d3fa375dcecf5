//! Consumer handles.
//!
//! A [`ConsumerHandle`] binds one query site (one host measure) to a
//! `(slot, channel)` pair. It owns nothing else: the slot data lives in the
//! [`DeviceRegistry`] and outlives every handle. Any number of handles may
//! point at the same slot; whichever queries first after the poll interval
//! triggers the poll, and the rest read the same fresh values.

use crate::channel::{valid_names, Channel};
use crate::clock::Clock;
use crate::config::MeasureOptions;
use crate::device::GamepadSource;
use crate::registry::DeviceRegistry;
use crate::slot::{SlotIndex, MAX_SLOTS};
use tracing::{debug, error};

/// Binding between one consumer and one channel of one slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ConsumerHandle {
    slot: SlotIndex,
    channel: Channel,
}

impl ConsumerHandle {
    pub fn new(slot: SlotIndex, channel: Channel) -> Self {
        Self { slot, channel }
    }

    pub fn slot(&self) -> SlotIndex {
        self.slot
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Refresh the bound slot if stale and return the bound channel's value.
    pub fn query<S, C>(&self, registry: &DeviceRegistry<S, C>) -> f64
    where
        S: GamepadSource,
        C: Clock,
    {
        registry.value(self.slot, self.channel)
    }

    /// Re-apply host options, degrading instead of failing.
    ///
    /// - An out-of-range device logs an error and falls back to slot 0.
    /// - An empty channel keeps the current channel.
    /// - An unknown channel logs the list of valid names and keeps the current channel.
    pub fn reload(&mut self, options: &MeasureOptions) {
        self.slot = match SlotIndex::new(options.device) {
            Some(slot) => slot,
            None => {
                error!(
                    "Invalid Device {}: must be an integer between 0 and {} - defaulting to 0.",
                    options.device,
                    MAX_SLOTS - 1
                );
                SlotIndex::default()
            }
        };

        let name = options.channel.trim();
        if !name.is_empty() {
            match Channel::from_name(name) {
                Some(channel) => self.channel = channel,
                None => error!(
                    "Invalid Channel '{}', must be one of: {}.",
                    name,
                    valid_names()
                ),
            }
        }

        debug!(slot = %self.slot, channel = %self.channel, "consumer reloaded");
    }

    /// Handle built from host options on top of the default binding (slot 0, `JoyL_X`).
    pub fn from_options(options: &MeasureOptions) -> Self {
        let mut handle = Self::default();
        handle.reload(options);
        handle
    }
}
