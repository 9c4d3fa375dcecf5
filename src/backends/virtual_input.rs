//! In-memory gamepad source.
//!
//! [`VirtualPad`] answers polls from state injected by the caller. It backs
//! tests and demos, and stands in for XInput on hosts without it. Every poll
//! is counted per slot so callers can observe the rate limit.

use crate::device::GamepadSource;
use crate::gamepad::{BatteryDevice, BatteryInfo, GamepadSnapshot, PollOutcome};
use crate::slot::MAX_SLOTS;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Clone, Copy, Debug)]
struct VirtualSlot {
    outcome: PollOutcome,
    pad_battery: Option<BatteryInfo>,
    headset_battery: Option<BatteryInfo>,
    polls: u64,
}

impl Default for VirtualSlot {
    fn default() -> Self {
        Self {
            outcome: PollOutcome::Disconnected,
            pad_battery: Some(BatteryInfo::Unknown),
            headset_battery: Some(BatteryInfo::Unknown),
            polls: 0,
        }
    }
}

/// Scriptable source; every slot starts disconnected.
#[derive(Debug, Default)]
pub struct VirtualPad {
    slots: Mutex<[VirtualSlot; MAX_SLOTS]>,
}

impl VirtualPad {
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> MutexGuard<'_, [VirtualSlot; MAX_SLOTS]> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Plug a device into `slot` (or replace its state). Out-of-range slots are ignored.
    pub fn connect(&self, slot: usize, state: GamepadSnapshot) {
        if let Some(s) = self.slots().get_mut(slot) {
            s.outcome = PollOutcome::Connected(state);
        }
    }

    /// Unplug the device in `slot`.
    pub fn disconnect(&self, slot: usize) {
        if let Some(s) = self.slots().get_mut(slot) {
            s.outcome = PollOutcome::Disconnected;
        }
    }

    /// Battery report for `device`; `None` makes the query fail.
    pub fn set_battery(&self, slot: usize, device: BatteryDevice, info: Option<BatteryInfo>) {
        if let Some(s) = self.slots().get_mut(slot) {
            match device {
                BatteryDevice::Gamepad => s.pad_battery = info,
                BatteryDevice::Headset => s.headset_battery = info,
            }
        }
    }

    /// Number of polls `slot` has answered.
    pub fn poll_count(&self, slot: u32) -> u64 {
        self.slots()
            .get(slot as usize)
            .map(|s| s.polls)
            .unwrap_or(0)
    }
}

impl GamepadSource for VirtualPad {
    fn poll(&self, slot: u32) -> PollOutcome {
        match self.slots().get_mut(slot as usize) {
            Some(s) => {
                s.polls += 1;
                s.outcome
            }
            None => PollOutcome::Disconnected,
        }
    }

    fn battery(&self, slot: u32, device: BatteryDevice) -> Option<BatteryInfo> {
        let slots = self.slots();
        let s = slots.get(slot as usize)?;
        match s.outcome {
            PollOutcome::Disconnected => None,
            PollOutcome::Connected(_) => match device {
                BatteryDevice::Gamepad => s.pad_battery,
                BatteryDevice::Headset => s.headset_battery,
            },
        }
    }

    fn name(&self) -> &str {
        "virtual"
    }
}
