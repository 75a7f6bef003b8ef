//! In-memory gateway used by the demo and tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::control::gateway::{GatewayError, PlugGateway, SetAck, SwitchState};
use crate::control::types::PlugId;

/// Gateway implementation backed by plain maps.
///
/// Registered plugs acknowledge commands and report their state; plugs
/// that were never registered, or that are marked unreachable, behave like
/// the broker does for unknown plugs: set commands come back
/// `present: false` and queries report no state.
#[derive(Debug, Default)]
pub struct SimulatedGateway {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    plugs: HashMap<PlugId, SwitchState>,
    unreachable: HashSet<PlugId>,
    economy: SwitchState,
}

impl SimulatedGateway {
    /// Creates an empty gateway with economy mode off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plug with an initial switch state.
    pub fn register(&self, id: PlugId, state: SwitchState) {
        self.lock().plugs.insert(id, state);
    }

    /// Marks a plug unreachable (or reachable again).
    pub fn set_reachable(&self, id: &PlugId, reachable: bool) {
        let mut inner = self.lock();
        if reachable {
            inner.unreachable.remove(id);
        } else {
            inner.unreachable.insert(id.clone());
        }
    }

    /// Current switch state of a registered plug.
    pub fn plug_state(&self, id: &PlugId) -> Option<SwitchState> {
        self.lock().plugs.get(id).copied()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("simulated gateway lock poisoned")
    }
}

#[async_trait]
impl PlugGateway for SimulatedGateway {
    async fn set_state(&self, id: &PlugId, on: bool) -> Result<SetAck, GatewayError> {
        let mut inner = self.lock();
        if !inner.plugs.contains_key(id) || inner.unreachable.contains(id) {
            return Ok(SetAck { present: false });
        }
        inner.plugs.insert(id.clone(), SwitchState::from_on(on));
        Ok(SetAck { present: true })
    }

    async fn query_state(&self, id: &PlugId) -> Result<Option<SwitchState>, GatewayError> {
        let inner = self.lock();
        if inner.unreachable.contains(id) {
            return Ok(None);
        }
        Ok(inner.plugs.get(id).copied())
    }

    async fn set_economy_mode(&self, on: bool) -> Result<bool, GatewayError> {
        self.lock().economy = SwitchState::from_on(on);
        Ok(true)
    }

    async fn economy_mode(&self) -> Result<SwitchState, GatewayError> {
        Ok(self.lock().economy)
    }
}
