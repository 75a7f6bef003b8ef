//! Control and scheduling core for a smart power-outlet dashboard.
//!
//! Two independent units do the real work: the plug control state machine
//! in [`control`], which mediates optimistic toggles against a remote
//! gateway, and the economy-interval deriver in [`schedule`], which
//! run-length encodes a consumption series into "economy active" windows.
//! The [`sim`] module ties both to a synthetic day of telemetry for the
//! interactive demo.

pub mod config;
/// Plug control state machine and remote gateway contract.
pub mod control;
pub mod export;
/// Economy-interval derivation over power series.
pub mod schedule;
/// Simulated day profile, in-memory gateway, and demo engine.
pub mod sim;
