//! Remote gateway contract for plug commands and queries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::PlugId;

/// Definite on/off value as reported on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    #[default]
    Off,
    On,
}

impl SwitchState {
    /// Maps a boolean intent to the wire value.
    pub fn from_on(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }

    /// Returns `true` for [`SwitchState::On`].
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

/// Acknowledgement of a set-state command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SetAck {
    /// Whether the plug was present and acknowledged the new state.
    pub present: bool,
}

/// Gateway-boundary failure.
///
/// The controller folds every variant into [`PlugState::Unknown`]; the
/// taxonomy exists so the gateway boundary can log what happened.
///
/// [`PlugState::Unknown`]: super::types::PlugState::Unknown
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway request timed out")]
    Timeout,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("unexpected gateway response: {0}")]
    UnexpectedResponse(String),
}

/// Remote command/query surface for plugs and the global economy flag.
///
/// Implementations apply their own request timeout so that every call
/// resolves; an unresponsive device surfaces as [`GatewayError::Timeout`],
/// never as a hung future.
#[async_trait]
pub trait PlugGateway: Send + Sync {
    /// Requests the plug be switched on or off.
    async fn set_state(&self, id: &PlugId, on: bool) -> Result<SetAck, GatewayError>;

    /// Reads the plug's current state; `None` when the plug is
    /// unreachable or unknown.
    async fn query_state(&self, id: &PlugId) -> Result<Option<SwitchState>, GatewayError>;

    /// Sets the global economy-mode flag; returns the success signal.
    async fn set_economy_mode(&self, on: bool) -> Result<bool, GatewayError>;

    /// Reads the global economy-mode flag.
    async fn economy_mode(&self) -> Result<SwitchState, GatewayError>;
}
