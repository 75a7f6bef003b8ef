//! Demo engine mapping the economy schedule back onto plugs.

use std::cmp::Ordering;

use crate::control::controller::PlugController;
use crate::control::gateway::PlugGateway;
use crate::control::types::{PlugId, PlugState, Vendor};
use crate::schedule::{self, EconomyInterval, PowerSample};

/// A plug participating in the demo.
#[derive(Debug, Clone)]
pub struct DemoPlug {
    pub id: PlugId,
    pub name: String,
    pub vendor: Vendor,
    /// Whether this plug follows the economy schedule.
    pub economy: bool,
}

/// Outcome of a timeline selection.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Selected step index.
    pub step: usize,
    /// Whether the economy predicate holds at the selected sample.
    pub economy_active: bool,
    /// Resolved control state per participating plug, in plug order.
    pub outcomes: Vec<(PlugId, PlugState)>,
}

/// Demo engine owning the simulated day, derived intervals, and plugs.
///
/// Derives the economy intervals once per profile and replays the
/// dashboard's timeline-click protocol: selecting a step evaluates the
/// economy predicate at that sample and toggles every participating plug
/// accordingly. Generic over `G: PlugGateway` for static dispatch; the
/// demo binary uses the in-memory gateway, tests may substitute scripted
/// ones.
pub struct DemoEngine<G: PlugGateway> {
    controller: PlugController<G>,
    plugs: Vec<DemoPlug>,
    samples: Vec<PowerSample>,
    intervals: Vec<EconomyInterval>,
    threshold_w: f32,
}

impl<G: PlugGateway> DemoEngine<G> {
    /// Creates the engine and derives the economy intervals for `samples`.
    ///
    /// # Arguments
    ///
    /// * `gateway` - Gateway the plug controller issues commands through
    /// * `plugs` - Demo plugs with their economy participation flags
    /// * `samples` - One day of consumption telemetry
    /// * `threshold_w` - Economy predicate threshold in watts
    pub fn new(
        gateway: G,
        plugs: Vec<DemoPlug>,
        samples: Vec<PowerSample>,
        threshold_w: f32,
    ) -> Self {
        let intervals =
            schedule::derive_intervals(&samples, schedule::below_threshold(threshold_w));
        Self {
            controller: PlugController::new(gateway),
            plugs,
            samples,
            intervals,
            threshold_w,
        }
    }

    /// The simulated day of telemetry.
    pub fn samples(&self) -> &[PowerSample] {
        &self.samples
    }

    /// Economy windows derived from the day profile.
    pub fn intervals(&self) -> &[EconomyInterval] {
        &self.intervals
    }

    /// The demo plugs in display order.
    pub fn plugs(&self) -> &[DemoPlug] {
        &self.plugs
    }

    /// The plug controller driving the gateway.
    pub fn controller(&self) -> &PlugController<G> {
        &self.controller
    }

    /// Economy predicate threshold in watts.
    pub fn threshold_w(&self) -> f32 {
        self.threshold_w
    }

    /// Opts a plug in or out of the economy schedule.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_plug_economy(&mut self, index: usize, economy: bool) {
        self.plugs[index].economy = economy;
    }

    /// Establishes the initial control state for every plug (the
    /// mount-time query).
    pub async fn refresh_all(&self) {
        for plug in &self.plugs {
            self.controller.refresh(&plug.id).await;
        }
    }

    /// Simulates a timeline click at `step`.
    ///
    /// Evaluates the economy predicate at the selected sample; while
    /// economy is active, participating plugs are requested off, otherwise
    /// on. Plugs not participating are never toggled.
    ///
    /// # Panics
    ///
    /// Panics if `step` is out of range.
    pub async fn select_step(&self, step: usize) -> Selection {
        let sample = &self.samples[step];
        let economy_active = schedule::below_threshold(self.threshold_w)(sample);
        let desired_on = !economy_active;

        let mut outcomes = Vec::new();
        for plug in self.plugs.iter().filter(|p| p.economy) {
            let resolved = self.controller.request_toggle(&plug.id, desired_on).await;
            outcomes.push((plug.id.clone(), resolved));
        }

        Selection {
            step,
            economy_active,
            outcomes,
        }
    }

    /// Selects the sample nearest to `hour` on the timeline.
    ///
    /// # Panics
    ///
    /// Panics if the day profile is empty.
    pub async fn select_hour(&self, hour: f32) -> Selection {
        let step = self
            .samples
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.time_hr - hour)
                    .abs()
                    .partial_cmp(&(b.time_hr - hour).abs())
                    .unwrap_or(Ordering::Equal)
            })
            .map(|(step, _)| step)
            .expect("day profile is empty");
        self.select_step(step).await
    }
}
