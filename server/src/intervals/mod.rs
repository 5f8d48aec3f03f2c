//! Intervals.icu integration.

pub mod client;

pub use client::{date_range, IntervalsActivity, IntervalsClient, IntervalsFitness};
