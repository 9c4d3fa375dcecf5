use crate::gamepad::{BatteryDevice, BatteryInfo, PollOutcome};

/// Polling API of a gamepad backend.
///
/// Slots are addressed by their raw index (`0..MAX_SLOTS`). Implementations
/// must be cheap and non-blocking; the registry calls [`poll`](Self::poll) at
/// most once per slot per poll interval.
pub trait GamepadSource: Send + Sync {
    /// Read the current state of `slot`.
    fn poll(&self, slot: u32) -> PollOutcome;

    /// Query a battery of `slot`. `None` when the query itself failed.
    fn battery(&self, slot: u32, device: BatteryDevice) -> Option<BatteryInfo>;

    /// Backend label used in logs.
    fn name(&self) -> &str;
}

impl<S: GamepadSource + ?Sized> GamepadSource for Box<S> {
    fn poll(&self, slot: u32) -> PollOutcome {
        (**self).poll(slot)
    }

    fn battery(&self, slot: u32, device: BatteryDevice) -> Option<BatteryInfo> {
        (**self).battery(slot, device)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: GamepadSource + ?Sized> GamepadSource for std::sync::Arc<S> {
    fn poll(&self, slot: u32) -> PollOutcome {
        (**self).poll(slot)
    }

    fn battery(&self, slot: u32, device: BatteryDevice) -> Option<BatteryInfo> {
        (**self).battery(slot, device)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
