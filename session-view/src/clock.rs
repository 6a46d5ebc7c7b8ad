//! Time source for expiry checks

use chrono::Utc;

/// Supplies the current time as whole seconds since the Unix epoch.
///
/// The fractional part is truncated so it compares at the same unit as a
/// token's `exp` claim. With [`SystemClock`] this means a token stays valid
/// for the remainder of the second named by `exp` (up to 999 ms past the
/// exact instant), since `exp == now` is accepted.
pub trait Clock {
    fn now(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(clock.now(), 1_700_000_000);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_is_near_now() {
        let now = Utc::now().timestamp();
        let reported = SystemClock.now();
        // Allow a little slack for slow test runners
        assert!((reported - now).abs() <= 5);
    }

    #[test]
    fn test_system_clock_truncates_sub_seconds() {
        let reported = SystemClock.now();
        let after = Utc::now();
        // Truncation never reports a second that has not started yet
        assert!(reported <= after.timestamp());
    }

    #[test]
    fn test_clock_through_indirection() {
        let boxed: Box<dyn Clock> = Box::new(FixedClock(42));
        assert_eq!(boxed.now(), 42);

        let fixed = FixedClock(7);
        let by_ref: &dyn Clock = &fixed;
        assert_eq!((&by_ref).now(), 7);
    }
}
