#![no_std]

pub mod clock;
pub mod speaker;

/// Period of the tone generator interrupt
pub const TIMER_RESOLUTION_US: u64 = 20;
