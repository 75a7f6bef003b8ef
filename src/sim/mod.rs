//! Simulated demo day: synthetic load curve, in-memory gateway, and the
//! engine that maps economy windows back onto plugs.

pub mod engine;
pub mod gateway;
/// Synthetic daily consumption curve.
pub mod load_curve;

// Re-export the main types for convenience
pub use engine::{DemoEngine, DemoPlug, Selection};
pub use gateway::SimulatedGateway;
pub use load_curve::{Harmonic, LoadCurve};
