//! Combined sleep requests and their (radio depth, CPU depth) encoding.

/// A combined radio/CPU sleep request.
///
/// Each variant fixes one radio sleep depth and one CPU sleep depth. The two
/// are requested together because they are not independent: CPU deep sleep
/// is only safe once the radio itself is deep sleeping, so no variant pairs
/// radio (light) sleep with CPU deep sleep.
///
/// The radio-only variants leave the CPU running; [`Sleeper::request_sleep`]
/// returns immediately after the radio transition for those.
///
/// [`Sleeper::request_sleep`]: crate::sleep::Sleeper::request_sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepRequest {
    /// Radio sleep, CPU stays awake.
    RadioSleep,
    /// Radio deep sleep, CPU stays awake.
    RadioDeepSleep,
    /// Radio sleep and CPU sleep (fast radio wakeup preserved).
    RadioSleepCpuSleep,
    /// Radio deep sleep and CPU sleep.
    RadioDeepSleepCpuSleep,
    /// Radio deep sleep and CPU deep sleep (lowest power).
    RadioDeepSleepCpuDeepSleep,
}

#[cfg(feature = "defmt")]
impl defmt::Format for SleepRequest {
    fn format(&self, f: defmt::Formatter) {
        match self {
            SleepRequest::RadioSleep => defmt::write!(f, "RadioSleep"),
            SleepRequest::RadioDeepSleep => defmt::write!(f, "RadioDeepSleep"),
            SleepRequest::RadioSleepCpuSleep => defmt::write!(f, "RadioSleepCpuSleep"),
            SleepRequest::RadioDeepSleepCpuSleep => defmt::write!(f, "RadioDeepSleepCpuSleep"),
            SleepRequest::RadioDeepSleepCpuDeepSleep => {
                defmt::write!(f, "RadioDeepSleepCpuDeepSleep")
            }
        }
    }
}

/// Requested radio sleep depth, decoded from a [`SleepRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RadioDepth {
    Sleep,
    DeepSleep,
}

/// Requested CPU sleep depth, decoded from a [`SleepRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CpuDepth {
    NoSleep,
    Sleep,
    DeepSleep,
}

impl SleepRequest {
    /// Encode a (radio, CPU) depth pair into its combined request.
    ///
    /// Total over all six pairs. The pair (radio sleep, CPU deep sleep) has
    /// no variant of its own; it collapses to the nearest legal encoding,
    /// [`SleepRequest::RadioDeepSleepCpuSleep`]. That is a fallback, not a
    /// feature: nothing reachable through the enumerated variants produces
    /// the pair in the first place.
    #[allow(dead_code)]
    pub(crate) fn from_depths(radio: RadioDepth, cpu: CpuDepth) -> Self {
        match (radio, cpu) {
            (RadioDepth::Sleep, CpuDepth::NoSleep) => SleepRequest::RadioSleep,
            (RadioDepth::DeepSleep, CpuDepth::NoSleep) => SleepRequest::RadioDeepSleep,
            (RadioDepth::Sleep, CpuDepth::Sleep) => SleepRequest::RadioSleepCpuSleep,
            (RadioDepth::DeepSleep, CpuDepth::Sleep) => SleepRequest::RadioDeepSleepCpuSleep,
            (RadioDepth::DeepSleep, CpuDepth::DeepSleep) => {
                SleepRequest::RadioDeepSleepCpuDeepSleep
            }
            // Unrepresentable combination, see the type-level docs.
            (RadioDepth::Sleep, CpuDepth::DeepSleep) => SleepRequest::RadioDeepSleepCpuSleep,
        }
    }

    /// Decode into the (radio, CPU) depth pair. Exact inverse of
    /// [`from_depths`](Self::from_depths) over the five variants.
    pub(crate) fn depths(self) -> (RadioDepth, CpuDepth) {
        match self {
            SleepRequest::RadioSleep => (RadioDepth::Sleep, CpuDepth::NoSleep),
            SleepRequest::RadioDeepSleep => (RadioDepth::DeepSleep, CpuDepth::NoSleep),
            SleepRequest::RadioSleepCpuSleep => (RadioDepth::Sleep, CpuDepth::Sleep),
            SleepRequest::RadioDeepSleepCpuSleep => (RadioDepth::DeepSleep, CpuDepth::Sleep),
            SleepRequest::RadioDeepSleepCpuDeepSleep => {
                (RadioDepth::DeepSleep, CpuDepth::DeepSleep)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depths_match_request_table() {
        assert_eq!(
            SleepRequest::RadioSleep.depths(),
            (RadioDepth::Sleep, CpuDepth::NoSleep)
        );
        assert_eq!(
            SleepRequest::RadioDeepSleep.depths(),
            (RadioDepth::DeepSleep, CpuDepth::NoSleep)
        );
        assert_eq!(
            SleepRequest::RadioSleepCpuSleep.depths(),
            (RadioDepth::Sleep, CpuDepth::Sleep)
        );
        assert_eq!(
            SleepRequest::RadioDeepSleepCpuSleep.depths(),
            (RadioDepth::DeepSleep, CpuDepth::Sleep)
        );
        assert_eq!(
            SleepRequest::RadioDeepSleepCpuDeepSleep.depths(),
            (RadioDepth::DeepSleep, CpuDepth::DeepSleep)
        );
    }

    #[test]
    fn encode_decode_round_trip_over_valid_pairs() {
        let valid = [
            (RadioDepth::Sleep, CpuDepth::NoSleep),
            (RadioDepth::DeepSleep, CpuDepth::NoSleep),
            (RadioDepth::Sleep, CpuDepth::Sleep),
            (RadioDepth::DeepSleep, CpuDepth::Sleep),
            (RadioDepth::DeepSleep, CpuDepth::DeepSleep),
        ];
        for (radio, cpu) in valid {
            assert_eq!(SleepRequest::from_depths(radio, cpu).depths(), (radio, cpu));
        }
    }

    #[test]
    fn unrepresentable_pair_collapses_to_radio_deep_cpu_sleep() {
        assert_eq!(
            SleepRequest::from_depths(RadioDepth::Sleep, CpuDepth::DeepSleep),
            SleepRequest::from_depths(RadioDepth::DeepSleep, CpuDepth::Sleep)
        );
        assert_eq!(
            SleepRequest::from_depths(RadioDepth::Sleep, CpuDepth::DeepSleep),
            SleepRequest::RadioDeepSleepCpuSleep
        );
    }
}
