#![no_std]
#![doc = include_str!("../README.md")]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

#[cfg(test)]
extern crate std;

pub mod platform;
pub mod request;
pub mod sleep;

pub use platform::{RadioLpMode, RadioStatus, SleepPlatform};
pub use request::SleepRequest;
pub use sleep::{Config, PowerCallback, Sleeper};
