//! Optimistic toggle state machine over a remote gateway.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, warn};

use super::gateway::{PlugGateway, SwitchState};
use super::types::{PlugId, PlugState};

/// Mediates between toggle intent and the remote gateway, presenting a
/// race-free view of per-plug control state.
///
/// State is keyed by plug id and mutated only by
/// [`PlugController::request_toggle`] and [`PlugController::refresh`];
/// rendering layers read it through [`PlugController::state`]. `Pending`
/// marks an in-flight request and blocks further requests for that plug
/// until the gateway answer resolves it to a stable state. Interleaved
/// callers may hold the controller by shared reference; the state map sits
/// behind a mutex that is never held across a suspension point.
///
/// Generic over `G: PlugGateway` for static dispatch.
pub struct PlugController<G: PlugGateway> {
    gateway: G,
    states: Mutex<HashMap<PlugId, PlugState>>,
}

impl<G: PlugGateway> PlugController<G> {
    /// Creates a controller with an empty state map.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Current control state; `Unknown` for plugs never seen.
    pub fn state(&self, id: &PlugId) -> PlugState {
        self.lock_states()
            .get(id)
            .copied()
            .unwrap_or(PlugState::Unknown)
    }

    /// Snapshot of all tracked plugs and their states.
    pub fn states(&self) -> Vec<(PlugId, PlugState)> {
        self.lock_states()
            .iter()
            .map(|(id, state)| (id.clone(), *state))
            .collect()
    }

    /// Returns a reference to the gateway collaborator.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Issues one set command and resolves the plug to a stable state.
    ///
    /// The plug is marked `Pending` before the command goes out; the
    /// gateway answer resolves it to `On`/`Off` on a positive
    /// acknowledgement and to `Unknown` on absence, timeout, or any other
    /// failure. No retry is attempted.
    ///
    /// A call made while the plug is already `Pending` is a no-op: it
    /// returns `Pending`, issues no command, and leaves the in-flight
    /// request to resolve on its own.
    pub async fn request_toggle(&self, id: &PlugId, desired_on: bool) -> PlugState {
        if !self.begin_request(id) {
            debug!(plug = %id, "toggle ignored, request already in flight");
            return PlugState::Pending;
        }

        debug!(plug = %id, desired_on, "issuing toggle");
        let resolved = match self.gateway.set_state(id, desired_on).await {
            Ok(ack) if ack.present => {
                if desired_on {
                    PlugState::On
                } else {
                    PlugState::Off
                }
            }
            Ok(_) => {
                warn!(plug = %id, "plug not present, control state unknown");
                PlugState::Unknown
            }
            Err(err) => {
                warn!(plug = %id, error = %err, "set command failed");
                PlugState::Unknown
            }
        };
        self.resolve(id, resolved)
    }

    /// Issues one read-only query and resolves the plug to a stable state.
    ///
    /// Used at mount time to establish the initial state. Honors the same
    /// single-outstanding-request discipline as
    /// [`PlugController::request_toggle`]: a `Pending` plug is not queried.
    pub async fn refresh(&self, id: &PlugId) -> PlugState {
        if !self.begin_request(id) {
            debug!(plug = %id, "refresh ignored, request already in flight");
            return PlugState::Pending;
        }

        let resolved = match self.gateway.query_state(id).await {
            Ok(Some(SwitchState::On)) => PlugState::On,
            Ok(Some(SwitchState::Off)) => PlugState::Off,
            Ok(None) => PlugState::Unknown,
            Err(err) => {
                warn!(plug = %id, error = %err, "state query failed");
                PlugState::Unknown
            }
        };
        self.resolve(id, resolved)
    }

    /// Sets the global economy-mode flag.
    ///
    /// Gateway failures are absorbed and reported as `false`.
    pub async fn set_economy_mode(&self, on: bool) -> bool {
        match self.gateway.set_economy_mode(on).await {
            Ok(ok) => ok,
            Err(err) => {
                warn!(error = %err, "economy-mode command failed");
                false
            }
        }
    }

    /// Reads the global economy-mode flag; `None` when the gateway fails.
    pub async fn economy_mode(&self) -> Option<bool> {
        match self.gateway.economy_mode().await {
            Ok(state) => Some(state.is_on()),
            Err(err) => {
                warn!(error = %err, "economy-mode query failed");
                None
            }
        }
    }

    /// Marks the plug `Pending`, refusing if a request is already in
    /// flight. Returns `true` when the caller owns the new request.
    fn begin_request(&self, id: &PlugId) -> bool {
        let mut states = self.lock_states();
        if states.get(id) == Some(&PlugState::Pending) {
            return false;
        }
        states.insert(id.clone(), PlugState::Pending);
        true
    }

    /// Records the stable outcome of the in-flight request.
    fn resolve(&self, id: &PlugId, state: PlugState) -> PlugState {
        self.lock_states().insert(id.clone(), state);
        state
    }

    fn lock_states(&self) -> MutexGuard<'_, HashMap<PlugId, PlugState>> {
        self.states.lock().expect("plug state lock poisoned")
    }
}
