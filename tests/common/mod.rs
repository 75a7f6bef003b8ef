//! Shared test fixtures for integration tests.

use plugdash::config::DashboardConfig;
use plugdash::control::gateway::SwitchState;
use plugdash::control::types::{PlugId, Vendor};
use plugdash::schedule::PowerSample;
use plugdash::sim::engine::{DemoEngine, DemoPlug};
use plugdash::sim::gateway::SimulatedGateway;
use plugdash::sim::load_curve::{Harmonic, LoadCurve};

/// Default dashboard configuration (demo preset, noise-free, seed 42).
pub fn default_config() -> DashboardConfig {
    DashboardConfig::demo()
}

/// Builds an hourly sample series from raw wattages.
pub fn step_samples(watts: &[f32]) -> Vec<PowerSample> {
    watts
        .iter()
        .enumerate()
        .map(|(i, &w)| PowerSample::new(i as f32, w))
        .collect()
}

/// Builds the demo engine the way the binary does: curve from config, one
/// registered plug per roster slot, every plug participating in economy.
pub fn build_demo_engine(cfg: &DashboardConfig) -> DemoEngine<SimulatedGateway> {
    let c = &cfg.curve;
    let harmonics = c
        .harmonics
        .iter()
        .map(|h| Harmonic {
            amp_w: h.amp_w,
            step_div: h.step_div,
        })
        .collect();
    let mut curve = LoadCurve::new(harmonics, c.noise_std_w, c.steps_per_hour, c.seed);
    let samples = curve.day_profile(c.hours);

    let vendor = Vendor::from_name(&cfg.plugs.vendor).unwrap_or(Vendor::Goodwe);

    let gateway = SimulatedGateway::new();
    let mut plugs = Vec::with_capacity(cfg.plugs.count);
    for i in 0..cfg.plugs.count {
        let id = PlugId::new(format!("plug-{:02}", i + 1));
        gateway.register(id.clone(), SwitchState::from_on(cfg.plugs.initial_on));
        plugs.push(DemoPlug {
            id,
            name: format!("Outlet {}", i + 1),
            vendor,
            economy: true,
        });
    }

    DemoEngine::new(gateway, plugs, samples, cfg.economy.threshold_w)
}
