#![cfg_attr(not(test), no_std)]

pub mod blink;
pub mod zone;

#[cfg(feature = "rp")]
pub mod sampler;
