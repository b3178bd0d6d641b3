//! Headless driver for the NEXORA animations.
//!
//! Runs one mounted animation on a dedicated loop thread at display rate
//! and renders it to a terminal as ASCII frames.

pub mod ascii;
pub mod frame_loop;
