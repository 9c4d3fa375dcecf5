//! The device registry.
//!
//! [`DeviceRegistry`] owns one [`DeviceSlot`] per controller position and the
//! [`GamepadSource`] they are polled from. It is created once by the host
//! application and passed by reference to whatever builds consumer handles;
//! every handle bound to the same slot shares that slot's state.
//!
//! # Staleness gate
//! [`refresh`](DeviceRegistry::refresh) polls a slot only when its last poll
//! is at least `poll_interval` old. Consumers may query as often as they like;
//! hardware is polled at most once per interval per slot, and failed polls are
//! rate-limited exactly like successful ones.
//!
//! # Concurrency
//! Each slot sits behind its own mutex, held for the duration of one refresh.
//! Slots never lock each other.
//!
//! # Example
//! ```
//! use padmeter::{Channel, DeviceRegistry, RegistryConfig, VirtualPad, GamepadSnapshot};
//!
//! let pad = VirtualPad::new();
//! pad.connect(0, GamepadSnapshot::default());
//! let registry = DeviceRegistry::new(pad, RegistryConfig::default());
//!
//! let handle = registry.bind(0, "connected").unwrap();
//! assert_eq!(handle.query(&registry), 1.0);
//! assert_eq!(handle.channel(), Channel::Connected);
//! ```

use crate::binding::ConsumerHandle;
use crate::channel::{valid_names, Channel};
use crate::clock::{Clock, MonotonicClock};
use crate::config::RegistryConfig;
use crate::device::GamepadSource;
use crate::error::BindError;
use crate::gamepad::ChannelValues;
use crate::slot::{DeviceSlot, RefreshOutcome, RefreshParams, SlotIndex, MAX_SLOTS};
use crate::snapshot::{SlotState, Snapshot};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Fixed set of device slots polled from one source.
pub struct DeviceRegistry<S = Box<dyn GamepadSource>, C = MonotonicClock> {
    source: S,
    clock: C,
    config: RegistryConfig,
    slots: [Mutex<DeviceSlot>; MAX_SLOTS],
}

impl<S: GamepadSource> DeviceRegistry<S, MonotonicClock> {
    /// Registry driven by the platform's high-resolution counter.
    pub fn new(source: S, config: RegistryConfig) -> Self {
        Self::with_clock(source, MonotonicClock::new(), config)
    }
}

impl<S: GamepadSource, C: Clock> DeviceRegistry<S, C> {
    pub fn with_clock(source: S, clock: C, config: RegistryConfig) -> Self {
        debug!(
            source = source.name(),
            interval_ms = config.poll_interval.as_millis() as u64,
            battery = config.battery,
            "device registry created"
        );
        Self {
            source,
            clock,
            config,
            slots: SlotIndex::ALL.map(|slot| Mutex::new(DeviceSlot::new(slot))),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn lock(&self, slot: SlotIndex) -> MutexGuard<'_, DeviceSlot> {
        // Values are assigned whole, so data behind a poisoned lock is still consistent.
        self.slots[slot.get()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn params(&self) -> RefreshParams {
        RefreshParams {
            now: self.clock.now_ticks(),
            interval_secs: self.config.poll_interval.as_secs_f64(),
            seconds_per_tick: self.clock.seconds_per_tick(),
            battery: self.config.battery,
        }
    }

    /// Poll `slot` if its data is stale. A no-op within the poll interval.
    pub fn refresh(&self, slot: SlotIndex) -> RefreshOutcome {
        let params = self.params();
        self.lock(slot).refresh(&self.source, &params)
    }

    /// Refresh every slot.
    pub fn refresh_all(&self) {
        for slot in SlotIndex::all() {
            self.refresh(slot);
        }
    }

    /// Refresh `slot`, then read one channel.
    pub fn value(&self, slot: SlotIndex, channel: Channel) -> f64 {
        let params = self.params();
        let mut guard = self.lock(slot);
        guard.refresh(&self.source, &params);
        guard.value(channel)
    }

    /// Last derived values of `slot`, without polling.
    pub fn peek(&self, slot: SlotIndex) -> ChannelValues {
        *self.lock(slot).values()
    }

    /// Copy of the full slot state, without polling.
    pub fn slot(&self, slot: SlotIndex) -> DeviceSlot {
        self.lock(slot).clone()
    }

    /// Bind a consumer to `(device_index, channel_name)`.
    ///
    /// The channel name matches case-insensitively.
    pub fn bind(&self, device_index: i64, channel_name: &str) -> Result<ConsumerHandle, BindError> {
        let slot = SlotIndex::try_from(device_index)?;
        let channel = Channel::from_name(channel_name).ok_or_else(|| BindError::UnknownChannel {
            name: channel_name.to_string(),
            valid: valid_names(),
        })?;
        Ok(ConsumerHandle::new(slot, channel))
    }

    /// Current values of every slot, without polling.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(
            SlotIndex::all()
                .map(|slot| {
                    let guard = self.lock(slot);
                    SlotState::from_slot(&guard)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_input::VirtualPad;
    use crate::clock::ManualClock;
    use crate::gamepad::{buttons, BatteryDevice, BatteryInfo, BatteryLevel, GamepadSnapshot};
    use std::sync::Arc;
    use std::time::Duration;

    fn registry(pad: &Arc<VirtualPad>, clock: &Arc<ManualClock>) -> DeviceRegistry<Arc<VirtualPad>, Arc<ManualClock>> {
        DeviceRegistry::with_clock(pad.clone(), clock.clone(), RegistryConfig::default())
    }

    fn slot(i: i64) -> SlotIndex {
        SlotIndex::new(i).unwrap()
    }

    #[test]
    fn second_refresh_inside_interval_is_a_noop() {
        let pad = Arc::new(VirtualPad::new());
        let clock = Arc::new(ManualClock::new());
        let reg = registry(&pad, &clock);
        pad.connect(0, GamepadSnapshot { packet_number: 1, thumb_lx: 100, ..Default::default() });

        assert_eq!(reg.refresh(slot(0)), RefreshOutcome::Polled { connected: true });
        let before = reg.slot(slot(0));

        pad.connect(0, GamepadSnapshot { packet_number: 2, thumb_lx: -100, ..Default::default() });
        clock.advance(Duration::from_millis(5));
        assert_eq!(reg.refresh(slot(0)), RefreshOutcome::Fresh);

        let after = reg.slot(slot(0));
        assert_eq!(pad.poll_count(0), 1);
        assert_eq!(after.state(), before.state());
        assert_eq!(after.last_poll(), before.last_poll());
        assert_eq!(after.values(), before.values());
    }

    #[test]
    fn refresh_after_interval_polls_again() {
        let pad = Arc::new(VirtualPad::new());
        let clock = Arc::new(ManualClock::new());
        let reg = registry(&pad, &clock);
        pad.connect(0, GamepadSnapshot::default());

        reg.refresh(slot(0));
        pad.connect(0, GamepadSnapshot { buttons: buttons::B, ..Default::default() });
        clock.advance(Duration::from_millis(11));
        reg.refresh(slot(0));

        assert_eq!(pad.poll_count(0), 2);
        assert_eq!(reg.peek(slot(0))[Channel::FaceR], 1.0);
    }

    #[test]
    fn gate_opens_exactly_at_poll_interval() {
        for ms in [7u64, 10, 13, 25, 33] {
            let pad = Arc::new(VirtualPad::new());
            let clock = Arc::new(ManualClock::new());
            let config = RegistryConfig::default().with_poll_interval(Duration::from_millis(ms));
            let reg = DeviceRegistry::with_clock(pad.clone(), clock.clone(), config);
            pad.connect(0, GamepadSnapshot::default());

            reg.refresh(slot(0));
            clock.advance(Duration::from_nanos(ms * 1_000_000 - 1));
            assert_eq!(reg.refresh(slot(0)), RefreshOutcome::Fresh, "{ms} ms minus 1 ns");
            clock.advance(Duration::from_nanos(1));
            assert_eq!(
                reg.refresh(slot(0)),
                RefreshOutcome::Polled { connected: true },
                "{ms} ms exactly"
            );
            assert_eq!(pad.poll_count(0), 2);
        }
    }

    #[test]
    fn failed_polls_are_rate_limited_too() {
        let pad = Arc::new(VirtualPad::new());
        let clock = Arc::new(ManualClock::new());
        let reg = registry(&pad, &clock);

        assert_eq!(reg.refresh(slot(3)), RefreshOutcome::Polled { connected: false });
        assert_eq!(reg.refresh(slot(3)), RefreshOutcome::Fresh);
        clock.advance(Duration::from_millis(3));
        assert_eq!(reg.refresh(slot(3)), RefreshOutcome::Fresh);
        assert_eq!(pad.poll_count(3), 1);
        assert!(reg.slot(slot(3)).last_poll().is_some());
    }

    #[test]
    fn slots_are_rate_limited_independently() {
        let pad = Arc::new(VirtualPad::new());
        let clock = Arc::new(ManualClock::new());
        let reg = registry(&pad, &clock);

        reg.refresh(slot(0));
        reg.refresh(slot(1));
        reg.refresh(slot(0));
        assert_eq!(pad.poll_count(0), 1);
        assert_eq!(pad.poll_count(1), 1);
        assert_eq!(pad.poll_count(2), 0);
    }

    #[test]
    fn disconnect_zeroes_every_channel() {
        let pad = Arc::new(VirtualPad::new());
        let clock = Arc::new(ManualClock::new());
        let reg = registry(&pad, &clock);
        pad.connect(
            1,
            GamepadSnapshot {
                buttons: 0xF3FF,
                left_trigger: 255,
                right_trigger: 128,
                thumb_lx: 32767,
                thumb_ly: -32768,
                thumb_rx: 1234,
                thumb_ry: -4321,
                ..Default::default()
            },
        );
        reg.refresh(slot(1));
        assert!(reg.slot(slot(1)).is_connected());

        pad.disconnect(1);
        clock.advance(Duration::from_millis(10));
        clock.advance(Duration::from_micros(1));
        assert_eq!(reg.refresh(slot(1)), RefreshOutcome::Polled { connected: false });

        let values = reg.peek(slot(1));
        assert!(values.as_array().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn reconnect_recovers_on_next_stale_poll() {
        let pad = Arc::new(VirtualPad::new());
        let clock = Arc::new(ManualClock::new());
        let reg = registry(&pad, &clock);

        assert_eq!(reg.value(slot(2), Channel::Connected), 0.0);
        pad.connect(2, GamepadSnapshot::default());
        assert_eq!(reg.value(slot(2), Channel::Connected), 0.0);
        clock.advance(Duration::from_millis(20));
        assert_eq!(reg.value(slot(2), Channel::Connected), 1.0);
    }

    #[test]
    fn battery_channels_follow_config() {
        let pad = Arc::new(VirtualPad::new());
        pad.connect(0, GamepadSnapshot::default());
        pad.set_battery(0, BatteryDevice::Gamepad, Some(BatteryInfo::Known(BatteryLevel::Medium)));
        pad.set_battery(0, BatteryDevice::Headset, Some(BatteryInfo::Unknown));

        let off = DeviceRegistry::with_clock(pad.clone(), ManualClock::new(), RegistryConfig::default());
        assert_eq!(off.value(slot(0), Channel::BatteryPad), 0.0);

        let on = DeviceRegistry::with_clock(
            pad.clone(),
            ManualClock::new(),
            RegistryConfig::default().with_battery(true),
        );
        assert_eq!(on.value(slot(0), Channel::BatteryPad), 0.75);
        assert_eq!(on.value(slot(0), Channel::BatteryHeadset), 0.0);
    }

    #[test]
    fn failed_battery_query_reads_zero() {
        let pad = Arc::new(VirtualPad::new());
        pad.connect(0, GamepadSnapshot::default());
        pad.set_battery(0, BatteryDevice::Gamepad, None);
        let reg = DeviceRegistry::with_clock(
            pad,
            ManualClock::new(),
            RegistryConfig::default().with_battery(true),
        );
        assert_eq!(reg.value(slot(0), Channel::BatteryPad), 0.0);
        assert_eq!(reg.value(slot(0), Channel::Connected), 1.0);
    }

    #[test]
    fn bind_validates_device_and_channel() {
        let reg = DeviceRegistry::with_clock(VirtualPad::new(), ManualClock::new(), RegistryConfig::default());

        let h = reg.bind(3, "dpad_u").unwrap();
        assert_eq!(h.slot(), slot(3));
        assert_eq!(h.channel(), Channel::DpadU);

        assert_eq!(
            reg.bind(4, "JoyL_X").unwrap_err(),
            BindError::DeviceOutOfRange { index: 4, max: 3 }
        );
        assert!(matches!(reg.bind(-1, "JoyL_X"), Err(BindError::DeviceOutOfRange { .. })));

        match reg.bind(0, "Trigger") {
            Err(BindError::UnknownChannel { name, valid }) => {
                assert_eq!(name, "Trigger");
                assert!(valid.contains("Battery_Headset"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn snapshot_does_not_poll() {
        let pad = Arc::new(VirtualPad::new());
        let clock = Arc::new(ManualClock::new());
        let reg = registry(&pad, &clock);
        let snap = reg.snapshot();
        assert_eq!(snap.slots().len(), MAX_SLOTS);
        for i in 0..MAX_SLOTS as u32 {
            assert_eq!(pad.poll_count(i), 0);
        }
    }
}
