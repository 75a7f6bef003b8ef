//! Plug control: identity types, gateway contract, and the toggle state
//! machine.

pub mod controller;
pub mod gateway;
#[cfg(feature = "http")]
pub mod http;
pub mod types;

// Re-export the main types for convenience
pub use controller::PlugController;
pub use gateway::{GatewayError, PlugGateway, SetAck, SwitchState};
#[cfg(feature = "http")]
pub use http::HttpGateway;
pub use types::{PlugId, PlugState, Vendor};
