//! HTTP gateway client for the outlet broker.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::gateway::{GatewayError, PlugGateway, SetAck, SwitchState};
use super::types::PlugId;

/// Gateway implementation speaking the outlet broker's REST surface.
///
/// All requests share a construction-time timeout so every call resolves;
/// timeouts and transport failures surface as [`GatewayError`] variants and
/// are folded to `Unknown` by the controller. No retries are attempted.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: Client,
}

/// Body of the state query endpoints; `state: null` means unreachable.
#[derive(Debug, Deserialize)]
struct StateBody {
    state: Option<SwitchState>,
}

/// Body of the set-state endpoint.
#[derive(Debug, Deserialize)]
struct SetBody {
    present: bool,
}

/// Body of the economy-mode query endpoint.
#[derive(Debug, Deserialize)]
struct EconomyBody {
    state: SwitchState,
}

impl HttpGateway {
    /// Creates a client for the broker at `base_url` with the given
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn map_transport(err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout
        } else {
            GatewayError::Transport(err.to_string())
        }
    }

    fn on_off(on: bool) -> &'static str {
        if on { "on" } else { "off" }
    }
}

#[async_trait]
impl PlugGateway for HttpGateway {
    async fn set_state(&self, id: &PlugId, on: bool) -> Result<SetAck, GatewayError> {
        debug!(plug = %id, state = Self::on_off(on), "issuing set command");
        let resp = self
            .client
            .post(self.url("/api/tomada/set"))
            .query(&[("id", id.as_str()), ("state", Self::on_off(on))])
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !resp.status().is_success() {
            return Err(GatewayError::UnexpectedResponse(format!(
                "status {}",
                resp.status()
            )));
        }
        let body: SetBody = resp
            .json()
            .await
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;
        Ok(SetAck {
            present: body.present,
        })
    }

    async fn query_state(&self, id: &PlugId) -> Result<Option<SwitchState>, GatewayError> {
        let resp = self
            .client
            .get(self.url("/api/tomada/get"))
            .query(&[("id", id.as_str())])
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !resp.status().is_success() {
            return Err(GatewayError::UnexpectedResponse(format!(
                "status {}",
                resp.status()
            )));
        }
        let body: StateBody = resp
            .json()
            .await
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;
        Ok(body.state)
    }

    async fn set_economy_mode(&self, on: bool) -> Result<bool, GatewayError> {
        debug!(state = Self::on_off(on), "issuing economy-mode command");
        let resp = self
            .client
            .post(self.url("/api/tomada/set_economia"))
            .query(&[("state", Self::on_off(on))])
            .send()
            .await
            .map_err(Self::map_transport)?;
        Ok(resp.status().is_success())
    }

    async fn economy_mode(&self) -> Result<SwitchState, GatewayError> {
        let resp = self
            .client
            .get(self.url("/api/tomada/get_economia"))
            .send()
            .await
            .map_err(Self::map_transport)?;

        if !resp.status().is_success() {
            return Err(GatewayError::UnexpectedResponse(format!(
                "status {}",
                resp.status()
            )));
        }
        let body: EconomyBody = resp
            .json()
            .await
            .map_err(|e| GatewayError::UnexpectedResponse(e.to_string()))?;
        Ok(body.state)
    }
}
