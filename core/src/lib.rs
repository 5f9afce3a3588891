//! Rental lifecycle engine for the RentQuad mobile client.
//!
//! The engine owns the rental phase, the active vehicle, a bounded
//! progress log and the simulated ride stats. UI layers call the
//! operations on [`engine::RentalEngine`], poll it so pending timers
//! fire, and render the snapshot it emits.
//!
//! RULES:
//!   - Only the engine mutates its own state. Callers read snapshots.
//!   - Timed transitions live in the engine-owned TimerSet; resetting
//!     the flow drops every pending timer atomically.
//!   - Vehicle status writes are fire-and-forget: a failed write is
//!     logged and never blocks a phase transition.

pub mod clock;
pub mod config;
pub mod engine;
pub mod event;
pub mod gateway;
pub mod metrics;
pub mod qr;
pub mod snapshot;
pub mod timer;
pub mod types;
pub mod vehicle;
