//! Monotonic tick clocks.
//!
//! The registry measures poll staleness in raw ticks of a high-resolution
//! counter and converts them to seconds with a single process-wide scale.
//! On Windows the counter is `QueryPerformanceCounter`; elsewhere it is
//! nanoseconds since a lazily captured `Instant`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

/// Source of monotonic ticks.
pub trait Clock: Send + Sync {
    /// Current counter value. Never decreases.
    fn now_ticks(&self) -> u64;

    /// Seconds represented by one tick.
    fn seconds_per_tick(&self) -> f64;

    /// Seconds elapsed between two tick readings.
    #[inline]
    fn elapsed_secs(&self, earlier: u64, later: u64) -> f64 {
        ticks_to_secs(earlier, later, self.seconds_per_tick())
    }
}

/// Seconds between two tick readings at `seconds_per_tick`. Zero if `later < earlier`.
#[inline]
pub fn ticks_to_secs(earlier: u64, later: u64, seconds_per_tick: f64) -> f64 {
    later.saturating_sub(earlier) as f64 * seconds_per_tick
}

/// Process-wide seconds-per-tick of [`MonotonicClock`].
///
/// Computed on first use. Concurrent first calls compute the same value.
static SECONDS_PER_TICK: OnceLock<f64> = OnceLock::new();

/// The platform's high-resolution monotonic counter.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotonicClock;

impl MonotonicClock {
    pub fn new() -> Self {
        // Resolve the scale eagerly so the first refresh does not pay for it.
        let _ = timing_scale();
        MonotonicClock
    }
}

/// Seconds per tick of the platform counter.
pub fn timing_scale() -> f64 {
    *SECONDS_PER_TICK.get_or_init(platform::seconds_per_tick)
}

impl Clock for MonotonicClock {
    fn now_ticks(&self) -> u64 {
        platform::now_ticks()
    }

    fn seconds_per_tick(&self) -> f64 {
        timing_scale()
    }
}

#[cfg(windows)]
mod platform {
    use windows_sys::Win32::System::Performance::{
        QueryPerformanceCounter, QueryPerformanceFrequency,
    };

    pub(super) fn seconds_per_tick() -> f64 {
        let mut freq: i64 = 0;
        // SAFETY: `freq` is a valid out pointer for the duration of the call.
        let ok = unsafe { QueryPerformanceFrequency(&mut freq) };
        if ok == 0 || freq <= 0 {
            // Unreachable on XP and later. Assume the usual 10 MHz.
            return 1.0 / 10_000_000.0;
        }
        1.0 / freq as f64
    }

    pub(super) fn now_ticks() -> u64 {
        let mut count: i64 = 0;
        // SAFETY: `count` is a valid out pointer for the duration of the call.
        unsafe { QueryPerformanceCounter(&mut count) };
        count.max(0) as u64
    }
}

#[cfg(not(windows))]
mod platform {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();

    pub(super) fn seconds_per_tick() -> f64 {
        1e-9
    }

    pub(super) fn now_ticks() -> u64 {
        let epoch = *EPOCH.get_or_init(Instant::now);
        u64::try_from(epoch.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Manually advanced clock for tests and simulations.
///
/// One tick is one nanosecond.
#[derive(Debug, Default)]
pub struct ManualClock {
    ticks: AtomicU64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let nanos = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        self.ticks.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    fn seconds_per_tick(&self) -> f64 {
        1e-9
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now_ticks(&self) -> u64 {
        (**self).now_ticks()
    }

    fn seconds_per_tick(&self) -> f64 {
        (**self).seconds_per_tick()
    }
}
