#![cfg(target_os = "windows")]

//! Windows XInput gamepad source.
//!
//! Exposes the four XInput user slots (`0..4`) through
//! [`GamepadSource`](crate::device::GamepadSource). XInput already reports a
//! fixed, bit-packed gamepad layout, so this module only copies the FFI
//! struct into a [`GamepadSnapshot`]; all normalization happens in
//! [`derive_channels`](crate::gamepad::derive_channels).
//!
//! # Battery
//! `XInputGetBatteryInformation` is an XInput 1.4 API (Windows 8 and later),
//! which is what `windows-sys` links against. The registry only calls it when
//! battery reporting is enabled in [`RegistryConfig`](crate::RegistryConfig).

use crate::device::GamepadSource;
use crate::gamepad::{BatteryDevice, BatteryInfo, BatteryLevel, GamepadSnapshot, PollOutcome};

// Windows XInput FFI.
use windows_sys::Win32::UI::Input::XboxController::*;

/// `ERROR_SUCCESS` as returned by the XInput getters.
const XINPUT_OK: u32 = 0;

/// XInput-backed source for slots 0–3.
#[derive(Clone, Copy, Debug, Default)]
pub struct XInputSource;

impl XInputSource {
    pub fn new() -> Self {
        XInputSource
    }

    #[inline]
    fn snapshot(state: &XINPUT_STATE) -> GamepadSnapshot {
        let gp = &state.Gamepad;
        GamepadSnapshot {
            packet_number: state.dwPacketNumber,
            buttons: gp.wButtons as u16,
            left_trigger: gp.bLeftTrigger,
            right_trigger: gp.bRightTrigger,
            thumb_lx: gp.sThumbLX,
            thumb_ly: gp.sThumbLY,
            thumb_rx: gp.sThumbRX,
            thumb_ry: gp.sThumbRY,
        }
    }

    #[inline]
    fn battery_info(raw: &XINPUT_BATTERY_INFORMATION) -> BatteryInfo {
        if raw.BatteryType == BATTERY_TYPE_UNKNOWN {
            return BatteryInfo::Unknown;
        }
        match raw.BatteryLevel {
            BATTERY_LEVEL_EMPTY => BatteryInfo::Known(BatteryLevel::Empty),
            BATTERY_LEVEL_LOW => BatteryInfo::Known(BatteryLevel::Low),
            BATTERY_LEVEL_MEDIUM => BatteryInfo::Known(BatteryLevel::Medium),
            BATTERY_LEVEL_FULL => BatteryInfo::Known(BatteryLevel::Full),
            _ => BatteryInfo::Unknown,
        }
    }
}

impl GamepadSource for XInputSource {
    fn poll(&self, slot: u32) -> PollOutcome {
        // FFI struct: must be manually zeroed
        let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };

        // SAFETY: `state` is a valid, writable XINPUT_STATE.
        let res = unsafe { XInputGetState(slot, &mut state) };
        if res != XINPUT_OK {
            // ERROR_DEVICE_NOT_CONNECTED or an invalid slot.
            return PollOutcome::Disconnected;
        }

        PollOutcome::Connected(Self::snapshot(&state))
    }

    fn battery(&self, slot: u32, device: BatteryDevice) -> Option<BatteryInfo> {
        let devtype = match device {
            BatteryDevice::Gamepad => BATTERY_DEVTYPE_GAMEPAD,
            BatteryDevice::Headset => BATTERY_DEVTYPE_HEADSET,
        };
        let mut info: XINPUT_BATTERY_INFORMATION = unsafe { std::mem::zeroed() };

        // SAFETY: `info` is a valid, writable XINPUT_BATTERY_INFORMATION.
        let res = unsafe { XInputGetBatteryInformation(slot, devtype, &mut info) };
        if res != XINPUT_OK {
            return None;
        }
        Some(Self::battery_info(&info))
    }

    fn name(&self) -> &str {
        "xinput"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_gamepad_fields() {
        let mut state: XINPUT_STATE = unsafe { std::mem::zeroed() };
        state.dwPacketNumber = 42;
        state.Gamepad.wButtons = XINPUT_GAMEPAD_DPAD_UP | XINPUT_GAMEPAD_A;
        state.Gamepad.bLeftTrigger = 12;
        state.Gamepad.sThumbRY = -32768;

        let gp = XInputSource::snapshot(&state);
        assert_eq!(gp.packet_number, 42);
        assert_eq!(gp.buttons, crate::gamepad::buttons::DPAD_UP | crate::gamepad::buttons::A);
        assert_eq!(gp.left_trigger, 12);
        assert_eq!(gp.thumb_ry, -32768);
    }

    #[test]
    fn maps_battery_levels() {
        let raw = XINPUT_BATTERY_INFORMATION {
            BatteryType: BATTERY_TYPE_ALKALINE,
            BatteryLevel: BATTERY_LEVEL_LOW,
        };
        assert_eq!(
            XInputSource::battery_info(&raw),
            BatteryInfo::Known(BatteryLevel::Low)
        );

        let unknown = XINPUT_BATTERY_INFORMATION {
            BatteryType: BATTERY_TYPE_UNKNOWN,
            BatteryLevel: BATTERY_LEVEL_FULL,
        };
        assert_eq!(XInputSource::battery_info(&unknown), BatteryInfo::Unknown);
    }

    #[test]
    fn button_masks_match_xinput() {
        use crate::gamepad::buttons;
        assert_eq!(buttons::DPAD_UP, XINPUT_GAMEPAD_DPAD_UP as u16);
        assert_eq!(buttons::RIGHT_SHOULDER, XINPUT_GAMEPAD_RIGHT_SHOULDER as u16);
        assert_eq!(buttons::A, XINPUT_GAMEPAD_A as u16);
        assert_eq!(buttons::Y, XINPUT_GAMEPAD_Y as u16);
    }
}
