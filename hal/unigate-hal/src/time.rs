//! Time source abstraction
//!
//! Blocking waits go through [`embedded_hal::delay::DelayNs`]; this module only
//! adds the monotonic clock needed where a deadline, not a fixed count,
//! decides how long to wait.

/// Monotonic microsecond clock
///
/// The value must never go backwards. Its epoch is arbitrary (usually boot).
pub trait Clock {
    /// Microseconds since an arbitrary fixed point
    fn now_us(&self) -> u64;

    /// Milliseconds since the same fixed point
    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
