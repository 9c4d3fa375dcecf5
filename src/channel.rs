//! Channel vocabulary.
//!
//! A [`Channel`] names one derived `f64` value of a gamepad slot. The set and
//! order are fixed: the index of a channel is its storage position inside a
//! slot, and its name is the public, case-insensitive lookup key used by
//! host configuration (`Channel=JoyL_X`).
//!
//! ## Value conventions
//! - **Axes:** `(raw + 32768) * (2 / 65535) - 1`, spanning `[-1.0, 1.0]`.
//! - **Buttons:** `1.0` pressed, `0.0` released.
//! - **Triggers:** `raw / 255`, spanning `[0.0, 1.0]`.
//! - **Meta:** `Connected` is `1.0`/`0.0`; battery levels are one of
//!   `0.0 | 0.33 | 0.75 | 1.0`.
//!
//! Names are stable. Renaming one breaks every host configuration that uses it.

use serde::Serialize;
use std::fmt;

/// Number of channels held by every slot.
pub const NUM_CHANNELS: usize = 23;

/// One named, independently queryable value of a gamepad slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Channel {
    #[default]
    JoyLX,
    JoyLY,
    JoyRX,
    JoyRY,
    DpadU,
    DpadD,
    DpadL,
    DpadR,
    FaceU,
    FaceD,
    FaceL,
    FaceR,
    /// Left shoulder (bumper) button.
    LTrig1,
    /// Right shoulder (bumper) button.
    RTrig1,
    /// Left analog trigger.
    LTrig2,
    /// Right analog trigger.
    RTrig2,
    JoyLClick,
    JoyRClick,
    Start,
    Back,
    Connected,
    BatteryPad,
    BatteryHeadset,
}

/// Every channel in index order.
pub const ALL_CHANNELS: [Channel; NUM_CHANNELS] = [
    Channel::JoyLX,
    Channel::JoyLY,
    Channel::JoyRX,
    Channel::JoyRY,
    Channel::DpadU,
    Channel::DpadD,
    Channel::DpadL,
    Channel::DpadR,
    Channel::FaceU,
    Channel::FaceD,
    Channel::FaceL,
    Channel::FaceR,
    Channel::LTrig1,
    Channel::RTrig1,
    Channel::LTrig2,
    Channel::RTrig2,
    Channel::JoyLClick,
    Channel::JoyRClick,
    Channel::Start,
    Channel::Back,
    Channel::Connected,
    Channel::BatteryPad,
    Channel::BatteryHeadset,
];

const CHANNEL_NAMES: [&str; NUM_CHANNELS] = [
    "JoyL_X",
    "JoyL_Y",
    "JoyR_X",
    "JoyR_Y",
    "Dpad_U",
    "Dpad_D",
    "Dpad_L",
    "Dpad_R",
    "Face_U",
    "Face_D",
    "Face_L",
    "Face_R",
    "LTrig1",
    "RTrig1",
    "LTrig2",
    "RTrig2",
    "JoyL_Click",
    "JoyR_Click",
    "Start",
    "Back",
    "Connected",
    "Battery_Pad",
    "Battery_Headset",
];

/// Maps bit `i` of the gamepad button word to the channel it drives.
///
/// Bits 10 and 11 are reserved by the XInput layout and carry no channel.
pub const BUTTON_CHANNELS: [Option<Channel>; 16] = [
    Some(Channel::DpadU),     // DPAD_UP
    Some(Channel::DpadD),     // DPAD_DOWN
    Some(Channel::DpadL),     // DPAD_LEFT
    Some(Channel::DpadR),     // DPAD_RIGHT
    Some(Channel::Start),     // START
    Some(Channel::Back),      // BACK
    Some(Channel::JoyLClick), // LEFT_THUMB
    Some(Channel::JoyRClick), // RIGHT_THUMB
    Some(Channel::LTrig1),    // LEFT_SHOULDER
    Some(Channel::RTrig1),    // RIGHT_SHOULDER
    None,
    None,
    Some(Channel::FaceD), // A
    Some(Channel::FaceR), // B
    Some(Channel::FaceL), // X
    Some(Channel::FaceU), // Y
];

/// Category of a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ChannelKind {
    Axis,
    Button,
    Trigger,
    /// Connection and battery state.
    Meta,
}

/// Describes a channel for UIs and diagnostics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChannelDesc {
    #[serde(skip)]
    pub channel: Channel,
    pub kind: ChannelKind,
    /// Stable public name (e.g. `"JoyL_X"`).
    pub name: &'static str,
    /// Smallest value the channel reports.
    pub min: f64,
    /// Largest value the channel reports.
    pub max: f64,
}

impl Channel {
    /// Storage index of this channel inside a slot.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable public name.
    #[inline]
    pub const fn name(self) -> &'static str {
        CHANNEL_NAMES[self as usize]
    }

    /// Channel stored at `index`, if any.
    pub fn from_index(index: usize) -> Option<Channel> {
        ALL_CHANNELS.get(index).copied()
    }

    /// Case-insensitive lookup by public name.
    pub fn from_name(name: &str) -> Option<Channel> {
        ALL_CHANNELS
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Category this channel belongs to.
    pub const fn kind(self) -> ChannelKind {
        match self {
            Channel::JoyLX | Channel::JoyLY | Channel::JoyRX | Channel::JoyRY => ChannelKind::Axis,
            Channel::LTrig2 | Channel::RTrig2 => ChannelKind::Trigger,
            Channel::Connected | Channel::BatteryPad | Channel::BatteryHeadset => ChannelKind::Meta,
            _ => ChannelKind::Button,
        }
    }

    /// Name, category and value range of this channel.
    pub fn describe(self) -> ChannelDesc {
        let min = match self.kind() {
            ChannelKind::Axis => -1.0,
            _ => 0.0,
        };
        ChannelDesc {
            channel: self,
            kind: self.kind(),
            name: self.name(),
            min,
            max: 1.0,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptions of every channel in index order.
pub fn channel_descs() -> Vec<ChannelDesc> {
    ALL_CHANNELS.iter().map(|c| c.describe()).collect()
}

/// Human-readable list of valid names: `"A, B, or C"`.
pub fn valid_names() -> String {
    let mut out = String::new();
    for (i, name) in CHANNEL_NAMES.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if i == NUM_CHANNELS - 1 {
            out.push_str("or ");
        }
        out.push_str(name);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_declaration_order() {
        for (i, c) in ALL_CHANNELS.iter().enumerate() {
            assert_eq!(c.index(), i);
            assert_eq!(Channel::from_index(i), Some(*c));
        }
        assert_eq!(Channel::from_index(NUM_CHANNELS), None);
    }

    #[test]
    fn names_are_unique_and_resolve_case_insensitively() {
        for c in ALL_CHANNELS {
            assert_eq!(Channel::from_name(c.name()), Some(c));
            assert_eq!(Channel::from_name(&c.name().to_ascii_uppercase()), Some(c));
            assert_eq!(Channel::from_name(&c.name().to_ascii_lowercase()), Some(c));
        }
        assert_eq!(Channel::from_name("joyl_x"), Some(Channel::JoyLX));
        assert_eq!(Channel::from_name("battery_pad"), Some(Channel::BatteryPad));
        assert_eq!(Channel::from_name("JoyL X"), None);
        assert_eq!(Channel::from_name(""), None);
    }

    #[test]
    fn button_table_skips_reserved_bits_and_covers_every_button() {
        assert_eq!(BUTTON_CHANNELS[10], None);
        assert_eq!(BUTTON_CHANNELS[11], None);

        let mapped: Vec<Channel> = BUTTON_CHANNELS.iter().flatten().copied().collect();
        assert_eq!(mapped.len(), 14);
        for c in &mapped {
            assert_eq!(c.kind(), ChannelKind::Button);
        }
        let buttons = ALL_CHANNELS
            .iter()
            .filter(|c| c.kind() == ChannelKind::Button)
            .count();
        assert_eq!(buttons, mapped.len());
    }

    #[test]
    fn valid_names_lists_everything() {
        let list = valid_names();
        assert!(list.starts_with("JoyL_X, JoyL_Y"));
        assert!(list.ends_with(", or Battery_Headset"));
        for name in CHANNEL_NAMES {
            assert!(list.contains(name));
        }
    }

    #[test]
    fn descs_report_ranges() {
        let descs = channel_descs();
        assert_eq!(descs.len(), NUM_CHANNELS);
        assert_eq!(descs[0].min, -1.0);
        assert_eq!(descs[Channel::LTrig2.index()].kind, ChannelKind::Trigger);
        assert_eq!(descs[Channel::LTrig2.index()].min, 0.0);
        assert_eq!(descs[Channel::Connected.index()].kind, ChannelKind::Meta);
    }
}
