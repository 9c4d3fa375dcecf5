//! Per-slot polling state.

use crate::channel::Channel;
use crate::clock::ticks_to_secs;
use crate::device::GamepadSource;
use crate::gamepad::{derive_channels, BatteryDevice, ChannelValues, GamepadSnapshot, PollOutcome};
use std::fmt;
use tracing::{info, trace};

/// Number of device slots a registry manages.
pub const MAX_SLOTS: usize = 4;

/// A validated slot index in `0..MAX_SLOTS`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    /// Every slot in order.
    pub const ALL: [SlotIndex; MAX_SLOTS] = [SlotIndex(0), SlotIndex(1), SlotIndex(2), SlotIndex(3)];

    /// `None` when `index` is outside `0..MAX_SLOTS`.
    pub fn new(index: i64) -> Option<Self> {
        if (0..MAX_SLOTS as i64).contains(&index) {
            Some(SlotIndex(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = SlotIndex> {
        Self::ALL.into_iter()
    }
}

impl TryFrom<i64> for SlotIndex {
    type Error = crate::error::BindError;

    fn try_from(index: i64) -> Result<Self, Self::Error> {
        SlotIndex::new(index).ok_or(crate::error::BindError::DeviceOutOfRange {
            index,
            max: MAX_SLOTS - 1,
        })
    }
}

impl From<SlotIndex> for i64 {
    fn from(slot: SlotIndex) -> i64 {
        slot.0 as i64
    }
}

impl fmt::Display for SlotIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a call to [`DeviceSlot::refresh`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Polled recently; nothing touched.
    Fresh,
    /// The source was polled once.
    Polled { connected: bool },
}

/// Polling state of one device position.
///
/// The channel array is always whole: a refresh either repopulates every
/// channel from a connected snapshot or zeroes every channel.
#[derive(Clone, Debug)]
pub struct DeviceSlot {
    index: SlotIndex,
    /// Last snapshot reported by a successful poll.
    state: GamepadSnapshot,
    /// Tick reading of the last poll, successful or not.
    last_poll: Option<u64>,
    values: ChannelValues,
}

/// Knobs the registry passes down to every slot refresh.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RefreshParams {
    pub now: u64,
    pub interval_secs: f64,
    pub seconds_per_tick: f64,
    pub battery: bool,
}

impl DeviceSlot {
    pub fn new(index: SlotIndex) -> Self {
        Self {
            index,
            state: GamepadSnapshot::default(),
            last_poll: None,
            values: ChannelValues::zeroed(),
        }
    }

    pub fn index(&self) -> SlotIndex {
        self.index
    }

    pub fn values(&self) -> &ChannelValues {
        &self.values
    }

    #[inline]
    pub fn value(&self, channel: Channel) -> f64 {
        self.values.get(channel)
    }

    /// Last snapshot read while connected.
    pub fn state(&self) -> &GamepadSnapshot {
        &self.state
    }

    pub fn last_poll(&self) -> Option<u64> {
        self.last_poll
    }

    pub fn is_connected(&self) -> bool {
        self.values.get(Channel::Connected) != 0.0
    }

    /// `true` when the last poll is older than the interval (or never happened).
    pub(crate) fn is_stale(&self, p: &RefreshParams) -> bool {
        match self.last_poll {
            None => true,
            Some(last) => ticks_to_secs(last, p.now, p.seconds_per_tick) >= p.interval_secs,
        }
    }

    /// Poll `source` if stale and rebuild the channel array.
    pub(crate) fn refresh<S>(&mut self, source: &S, p: &RefreshParams) -> RefreshOutcome
    where
        S: GamepadSource + ?Sized,
    {
        if !self.is_stale(p) {
            return RefreshOutcome::Fresh;
        }

        let slot = self.index.get() as u32;
        let was_connected = self.is_connected();
        let connected = match source.poll(slot) {
            PollOutcome::Connected(gp) => {
                trace!(slot, packet = gp.packet_number, "polled");
                let mut values = derive_channels(&gp);
                if p.battery {
                    for (device, channel) in [
                        (BatteryDevice::Gamepad, Channel::BatteryPad),
                        (BatteryDevice::Headset, Channel::BatteryHeadset),
                    ] {
                        values[channel] = source
                            .battery(slot, device)
                            .map(|info| info.value())
                            .unwrap_or(0.0);
                    }
                }
                self.state = gp;
                self.values = values;
                true
            }
            PollOutcome::Disconnected => {
                self.values.clear();
                false
            }
        };
        self.last_poll = Some(p.now);

        if connected != was_connected {
            if connected {
                info!(slot, source = source.name(), "gamepad connected");
            } else {
                info!(slot, source = source.name(), "gamepad disconnected");
            }
        }

        RefreshOutcome::Polled { connected }
    }
}
