//! Background Tasks Module
//!
//! Periodic maintenance that runs alongside the host.
//!
//! # Tasks
//! - Expiry sweep: reclaims memory held by expired entries at configured
//!   intervals

mod sweep;

pub use sweep::spawn_sweep_task;
