//! The hardware seam: radio, CPU and clock primitives driven by the policy.
//!
//! A port implements [`SleepPlatform`] on top of its PAC or vendor SDK and
//! hands it to [`Sleeper::new`](crate::sleep::Sleeper::new). The policy only
//! ever calls through this trait; it never touches registers itself.

/// Crystal reference clock frequency.
pub const REF_CLOCK_HZ: u32 = 24_000_000;

/// Reference clock divider applied while the CPU sleeps off the slow
/// reference (24 MHz / 8 = 3 MHz sleep clock).
pub const SLEEP_REF_CLOCK_DIV: u32 = 8;

/// Reference clock divider restored on wake, before the fast oscillator is
/// reselected as the CPU clock.
pub const WAKE_REF_CLOCK_DIV: u32 = 1;

/// Live status of the radio subsystem's low-power state machine.
///
/// Valid only at the instant it is read. The radio sleeps and wakes
/// asynchronously to CPU execution; on wakeup it walks through
/// [`ClockWarmup`](Self::ClockWarmup) and [`ClockStable`](Self::ClockStable)
/// before reaching [`Active`](Self::Active).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioStatus {
    /// Radio active, processing an event.
    Active,
    /// Radio closing out the current event.
    EventClose,
    /// Radio logic in (light) sleep.
    Sleep,
    /// Reference clock warming up on the way out of deep sleep.
    ClockWarmup,
    /// Reference clock stable, radio about to go active.
    ClockStable,
    /// Radio in deep sleep.
    DeepSleep,
    /// Radio in hibernation.
    Hibernate,
    /// Status register reported an unrecognized value.
    Invalid,
}

#[cfg(feature = "defmt")]
impl defmt::Format for RadioStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RadioStatus::Active => defmt::write!(f, "Active"),
            RadioStatus::EventClose => defmt::write!(f, "EventClose"),
            RadioStatus::Sleep => defmt::write!(f, "Sleep"),
            RadioStatus::ClockWarmup => defmt::write!(f, "ClockWarmup"),
            RadioStatus::ClockStable => defmt::write!(f, "ClockStable"),
            RadioStatus::DeepSleep => defmt::write!(f, "DeepSleep"),
            RadioStatus::Hibernate => defmt::write!(f, "Hibernate"),
            RadioStatus::Invalid => defmt::write!(f, "Invalid"),
        }
    }
}

/// Radio low-power mode, both the target of a transition request and its
/// best-effort result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioLpMode {
    Active,
    Sleep,
    DeepSleep,
    Hibernate,
    Invalid,
}

#[cfg(feature = "defmt")]
impl defmt::Format for RadioLpMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            RadioLpMode::Active => defmt::write!(f, "Active"),
            RadioLpMode::Sleep => defmt::write!(f, "Sleep"),
            RadioLpMode::DeepSleep => defmt::write!(f, "DeepSleep"),
            RadioLpMode::Hibernate => defmt::write!(f, "Hibernate"),
            RadioLpMode::Invalid => defmt::write!(f, "Invalid"),
        }
    }
}

/// Platform binding for the sleep policy.
///
/// Every method is a thin wrapper over one hardware primitive. None of them
/// may re-enable interrupts: the CPU sleep and clock methods are called with
/// interrupts masked.
pub trait SleepPlatform {
    /// Read the radio's current low-power status. Non-blocking.
    fn radio_status(&mut self) -> RadioStatus;

    /// Request a radio transition into `target`. Best-effort: the returned
    /// mode is what the radio actually entered, which may differ from the
    /// request. Non-blocking; the radio completes the transition on its own.
    fn radio_enter_low_power(&mut self, target: RadioLpMode) -> RadioLpMode;

    /// Take the radio out of its low-power mode. Non-blocking.
    fn radio_exit_low_power(&mut self);

    /// Put the CPU into (light) sleep. Blocks until any interrupt fires.
    fn cpu_sleep(&mut self);

    /// Put the CPU into deep sleep. Blocks until one of the always-on wake
    /// sources fires: low-power comparator, GPIO, radio subsystem event or
    /// watchdog.
    fn cpu_deep_sleep(&mut self);

    /// Switch the CPU onto the divided crystal reference
    /// ([`SLEEP_REF_CLOCK_DIV`]) and stop the fast RC oscillator. Must set
    /// the divider before selecting the reference as the CPU clock.
    fn clock_select_slow_ref(&mut self);

    /// Restart the fast RC oscillator, reselect it as the CPU clock and
    /// restore the reference divider to [`WAKE_REF_CLOCK_DIV`]. Strictly
    /// paired with [`clock_select_slow_ref`](Self::clock_select_slow_ref),
    /// in that order.
    fn clock_select_fast_ref(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_reference_runs_at_3mhz() {
        assert_eq!(REF_CLOCK_HZ / SLEEP_REF_CLOCK_DIV, 3_000_000);
        assert_eq!(WAKE_REF_CLOCK_DIV, 1);
    }
}
