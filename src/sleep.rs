//! The sleep orchestrator: maps a combined request onto the radio and CPU
//! low-power primitives, gated by the radio's live status.
//!
//! One call to [`Sleeper::request_sleep`] runs two phases. The radio phase
//! is fire-and-continue: it requests a radio transition if the current
//! status allows one and moves on. The CPU phase (only when the request
//! asks for CPU sleep) runs inside a critical section, re-reads the radio
//! status and enters the deepest CPU sleep that status permits. The call
//! returns once the CPU has woken.

use crate::platform::{RadioLpMode, RadioStatus, SleepPlatform};
use crate::request::{CpuDepth, RadioDepth, SleepRequest};

/// Callback invoked around CPU sleep entry, with `true` right before the
/// CPU stops and `false` right after it wakes.
///
/// Runs with interrupts masked and must not re-enable them; waking depends
/// on the masked state being restored by the orchestrator alone.
pub type PowerCallback = fn(entering: bool);

/// Sleeper configuration passed when constructing.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Called around CPU (light) sleep, e.g. to quiesce board peripherals.
    pub on_cpu_sleep: Option<PowerCallback>,
    /// Called around CPU deep sleep.
    pub on_cpu_deep_sleep: Option<PowerCallback>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            on_cpu_sleep: None,
            on_cpu_deep_sleep: None,
        }
    }
}

/// What the radio phase does for a given live status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RadioAction {
    /// Enter the requested depth.
    EnterRequested,
    /// Enter (light) sleep only. The reference clock is already stable and
    /// the radio is about to go active; deep-sleep entry is past its window.
    EnterSleep,
    /// Mid-transition or unrecognized; leave the radio alone.
    Skip,
}

fn radio_action(status: RadioStatus) -> RadioAction {
    match status {
        // EventClose counts as "event done": the status register documents
        // it as the terminal phase of the current radio event.
        RadioStatus::Active
        | RadioStatus::EventClose
        | RadioStatus::Sleep
        | RadioStatus::ClockWarmup => RadioAction::EnterRequested,
        RadioStatus::ClockStable => RadioAction::EnterSleep,
        RadioStatus::DeepSleep | RadioStatus::Hibernate | RadioStatus::Invalid => {
            RadioAction::Skip
        }
    }
}

/// What the CPU phase may do for a given live status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CpuAction {
    /// Radio fully down; deep sleep is allowed if the request asks for it.
    DeepAllowed,
    /// Only (light) sleep. The status register documentation also permits
    /// deep sleep while the reference clock warms up, but the radio is
    /// waking up then, so this policy deliberately stays at sleep.
    SleepOnly,
    /// (Light) sleep, run off the divided slow reference with the fast
    /// oscillator stopped. Deeper savings at the cost of wake latency.
    SleepOnSlowRef,
    /// Mid-transition or unrecognized; no safe CPU entry this call.
    Skip,
}

fn cpu_action(status: RadioStatus) -> CpuAction {
    match status {
        RadioStatus::DeepSleep | RadioStatus::Hibernate => CpuAction::DeepAllowed,
        RadioStatus::ClockWarmup | RadioStatus::ClockStable => CpuAction::SleepOnly,
        RadioStatus::Sleep | RadioStatus::Active => CpuAction::SleepOnSlowRef,
        RadioStatus::EventClose | RadioStatus::Invalid => CpuAction::Skip,
    }
}

/// Sleep orchestrator over a [`SleepPlatform`].
///
/// Construct once at startup; the application event loop then calls
/// [`request_sleep`](Self::request_sleep) whenever it has nothing left to
/// do, and [`wakeup_radio`](Self::wakeup_radio) before talking to the radio
/// again.
pub struct Sleeper<P: SleepPlatform> {
    platform: P,
    on_cpu_sleep: Option<PowerCallback>,
    on_cpu_deep_sleep: Option<PowerCallback>,
}

impl<P: SleepPlatform> Sleeper<P> {
    pub fn new(platform: P, config: Config) -> Self {
        Self {
            platform,
            on_cpu_sleep: config.on_cpu_sleep,
            on_cpu_deep_sleep: config.on_cpu_deep_sleep,
        }
    }

    /// Replace both callback slots. `None` clears a slot.
    ///
    /// Intended to be called once at startup, from the same context that
    /// later calls [`request_sleep`](Self::request_sleep).
    pub fn register_callbacks(
        &mut self,
        on_cpu_sleep: Option<PowerCallback>,
        on_cpu_deep_sleep: Option<PowerCallback>,
    ) {
        self.on_cpu_sleep = on_cpu_sleep;
        self.on_cpu_deep_sleep = on_cpu_deep_sleep;
    }

    /// Put the radio and, if requested, the CPU to sleep.
    ///
    /// Best-effort on every step: a radio status with no safe transition
    /// skips that step silently. Callers poll this from their event loop,
    /// so "nothing to do this time around" is not an error. Blocks for the
    /// CPU sleep window when the request includes CPU sleep; returns
    /// immediately after the radio phase otherwise.
    pub fn request_sleep(&mut self, request: SleepRequest) {
        let (radio_req, cpu_req) = request.depths();

        // Radio phase. The mode reported back by the transition primitive is
        // stale by the time the CPU phase runs (the radio wakes on its own),
        // so it is discarded; the CPU phase re-reads the live status instead.
        let status = self.platform.radio_status();
        match radio_action(status) {
            RadioAction::EnterRequested => {
                let target = match radio_req {
                    RadioDepth::Sleep => RadioLpMode::Sleep,
                    RadioDepth::DeepSleep => RadioLpMode::DeepSleep,
                };
                let _ = self.platform.radio_enter_low_power(target);
            }
            RadioAction::EnterSleep => {
                let _ = self.platform.radio_enter_low_power(RadioLpMode::Sleep);
            }
            RadioAction::Skip => {}
        }

        if cpu_req == CpuDepth::NoSleep {
            return;
        }

        // CPU phase. Interrupts stay masked from the status re-read through
        // the sleep entry: a radio wakeup interrupt landing in between can
        // leave the system unable to wake. The closure scope guarantees the
        // prior mask state comes back on every branch.
        critical_section::with(|_| {
            let status = self.platform.radio_status();
            match cpu_action(status) {
                CpuAction::DeepAllowed if cpu_req == CpuDepth::DeepSleep => {
                    self.notify_deep_sleep(true);
                    self.platform.cpu_deep_sleep();
                    self.notify_deep_sleep(false);
                }
                CpuAction::DeepAllowed | CpuAction::SleepOnly => {
                    self.notify_sleep(true);
                    self.platform.cpu_sleep();
                    self.notify_sleep(false);
                }
                CpuAction::SleepOnSlowRef => {
                    self.notify_sleep(true);
                    self.platform.clock_select_slow_ref();
                    self.platform.cpu_sleep();
                    self.platform.clock_select_fast_ref();
                    self.notify_sleep(false);
                }
                CpuAction::Skip => {
                    // May indicate an unexpected hardware state; worth seeing
                    // during bring-up.
                    debug!("no CPU sleep entry from radio status {:?}", status);
                }
            }
        });
    }

    /// Take the radio out of its low-power mode, unconditionally.
    ///
    /// No status check: the caller knows this module put the radio to sleep
    /// earlier. Non-blocking.
    pub fn wakeup_radio(&mut self) {
        self.platform.radio_exit_low_power();
    }

    fn notify_sleep(&self, entering: bool) {
        if let Some(cbk) = self.on_cpu_sleep {
            cbk(entering);
        }
    }

    fn notify_deep_sleep(&self, entering: bool) {
        if let Some(cbk) = self.on_cpu_deep_sleep {
            cbk(entering);
        }
    }
}
