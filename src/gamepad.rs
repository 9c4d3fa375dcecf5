//! Raw gamepad snapshots and their translation into channel values.
//!
//! A [`GamepadSnapshot`] mirrors the fixed XInput gamepad layout: one 16-bit
//! button word, two 8-bit triggers and four signed 16-bit thumbstick axes.
//! [`derive_channels`] turns one snapshot into a full [`ChannelValues`] array
//! in a single pass. It is pure: the same snapshot always yields the same
//! values.

use crate::channel::{Channel, ALL_CHANNELS, BUTTON_CHANNELS, NUM_CHANNELS};
use std::ops::{Index, IndexMut};

/// Button bit masks of the gamepad button word.
pub mod buttons {
    pub const DPAD_UP: u16 = 0x0001;
    pub const DPAD_DOWN: u16 = 0x0002;
    pub const DPAD_LEFT: u16 = 0x0004;
    pub const DPAD_RIGHT: u16 = 0x0008;
    pub const START: u16 = 0x0010;
    pub const BACK: u16 = 0x0020;
    pub const LEFT_THUMB: u16 = 0x0040;
    pub const RIGHT_THUMB: u16 = 0x0080;
    pub const LEFT_SHOULDER: u16 = 0x0100;
    pub const RIGHT_SHOULDER: u16 = 0x0200;
    pub const A: u16 = 0x1000;
    pub const B: u16 = 0x2000;
    pub const X: u16 = 0x4000;
    pub const Y: u16 = 0x8000;
}

/// One raw controller state as returned by a single poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GamepadSnapshot {
    /// Driver packet counter; changes whenever the state changes.
    pub packet_number: u32,
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

/// Result of polling one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Connected(GamepadSnapshot),
    /// Slot is empty or the device was unplugged.
    Disconnected,
}

/// Which battery of a slot to query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BatteryDevice {
    Gamepad,
    Headset,
}

/// Discrete charge level reported by the driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryLevel {
    Empty,
    Low,
    Medium,
    Full,
}

/// Battery report for one [`BatteryDevice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatteryInfo {
    /// The driver could not determine the battery type.
    Unknown,
    /// A battery (or wired power) with a known level.
    Known(BatteryLevel),
}

impl BatteryLevel {
    /// Scalar value exposed on the battery channels.
    pub const fn value(self) -> f64 {
        match self {
            BatteryLevel::Empty => 0.0,
            BatteryLevel::Low => 0.33,
            BatteryLevel::Medium => 0.75,
            BatteryLevel::Full => 1.0,
        }
    }
}

impl BatteryInfo {
    pub const fn value(self) -> f64 {
        match self {
            BatteryInfo::Unknown => 0.0,
            BatteryInfo::Known(level) => level.value(),
        }
    }
}

/// Channel values of one slot, indexed by [`Channel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelValues([f64; NUM_CHANNELS]);

impl Default for ChannelValues {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl ChannelValues {
    pub const fn zeroed() -> Self {
        Self([0.0; NUM_CHANNELS])
    }

    #[inline]
    pub fn get(&self, channel: Channel) -> f64 {
        self.0[channel.index()]
    }

    #[inline]
    pub fn set(&mut self, channel: Channel, value: f64) {
        self.0[channel.index()] = value;
    }

    /// Zero every channel, including `Connected`.
    pub fn clear(&mut self) {
        self.0 = [0.0; NUM_CHANNELS];
    }

    pub fn as_array(&self) -> &[f64; NUM_CHANNELS] {
        &self.0
    }

    /// `(channel, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        ALL_CHANNELS.iter().map(move |&c| (c, self.get(c)))
    }
}

impl Index<Channel> for ChannelValues {
    type Output = f64;

    fn index(&self, channel: Channel) -> &f64 {
        &self.0[channel.index()]
    }
}

impl IndexMut<Channel> for ChannelValues {
    fn index_mut(&mut self, channel: Channel) -> &mut f64 {
        &mut self.0[channel.index()]
    }
}

/// Normalize a signed thumbstick axis.
///
/// `-32768 -> -1.0` exactly; `32767` lands just at `1.0` without exceeding it.
#[inline]
pub fn normalize_thumb(raw: i16) -> f64 {
    (f64::from(raw) + 32768.0) * (2.0 / 65535.0) - 1.0
}

/// Normalize an 8-bit trigger into `[0.0, 1.0]`.
#[inline]
pub fn normalize_trigger(raw: u8) -> f64 {
    f64::from(raw) / 255.0
}

/// Translate one connected snapshot into channel values.
///
/// Sets `Connected` to `1.0`. Battery channels are left at `0.0`; the
/// registry fills them when battery reporting is enabled.
pub fn derive_channels(gp: &GamepadSnapshot) -> ChannelValues {
    let mut out = ChannelValues::zeroed();

    for (bit, slot) in BUTTON_CHANNELS.iter().enumerate() {
        if let Some(channel) = slot {
            let pressed = gp.buttons & (1 << bit) != 0;
            out[*channel] = if pressed { 1.0 } else { 0.0 };
        }
    }

    out[Channel::LTrig2] = normalize_trigger(gp.left_trigger);
    out[Channel::RTrig2] = normalize_trigger(gp.right_trigger);

    out[Channel::JoyLX] = normalize_thumb(gp.thumb_lx);
    out[Channel::JoyLY] = normalize_thumb(gp.thumb_ly);
    out[Channel::JoyRX] = normalize_thumb(gp.thumb_rx);
    out[Channel::JoyRY] = normalize_thumb(gp.thumb_ry);

    out[Channel::Connected] = 1.0;
    out
}
