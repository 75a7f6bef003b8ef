//! Synthetic daily consumption curve for the demo timeline.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::schedule::PowerSample;

/// One sinusoidal component of the synthetic curve.
///
/// Contributes `(sin(step / step_div) + 1) * amp_w` watts, i.e. a
/// non-negative oscillation in `0..=2 * amp_w`.
#[derive(Debug, Clone, Copy)]
pub struct Harmonic {
    /// Component half-range in watts.
    pub amp_w: f32,
    /// Step divisor controlling the component period.
    pub step_div: f32,
}

/// Synthetic consumption curve: a sum of harmonics plus optional seeded
/// Gaussian noise, clamped non-negative.
///
/// Deterministic for a fixed seed, so demo runs and exports reproduce
/// byte-for-byte.
#[derive(Debug, Clone)]
pub struct LoadCurve {
    harmonics: Vec<Harmonic>,
    noise_std_w: f32,
    steps_per_hour: usize,
    rng: StdRng,
}

impl LoadCurve {
    /// Creates a curve from its components.
    ///
    /// # Arguments
    ///
    /// * `harmonics` - Sinusoidal components summed per step
    /// * `noise_std_w` - Gaussian noise standard deviation in watts
    /// * `steps_per_hour` - Sampling resolution (must be > 0)
    /// * `seed` - Random seed for reproducible noise
    ///
    /// # Panics
    ///
    /// Panics if `steps_per_hour` is zero, `noise_std_w` is negative, or
    /// any harmonic has a non-positive `step_div`.
    pub fn new(harmonics: Vec<Harmonic>, noise_std_w: f32, steps_per_hour: usize, seed: u64) -> Self {
        assert!(steps_per_hour > 0, "steps_per_hour must be > 0");
        assert!(noise_std_w >= 0.0);
        assert!(harmonics.iter().all(|h| h.step_div > 0.0));

        Self {
            harmonics,
            noise_std_w,
            steps_per_hour,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The stock dashboard demo curve: three harmonics at five-minute
    /// resolution with a pronounced trough dipping below 400 W.
    pub fn demo(noise_std_w: f32, seed: u64) -> Self {
        Self::new(
            vec![
                Harmonic {
                    amp_w: 500.0,
                    step_div: 24.0,
                },
                Harmonic {
                    amp_w: 400.0,
                    step_div: 5.0,
                },
                Harmonic {
                    amp_w: 200.0,
                    step_div: 4.0,
                },
            ],
            noise_std_w,
            12,
            seed,
        )
    }

    /// Sampling resolution in steps per hour.
    pub fn steps_per_hour(&self) -> usize {
        self.steps_per_hour
    }

    /// Consumption in watts at the given step.
    pub fn sample_w(&mut self, step: usize) -> f32 {
        let base: f32 = self
            .harmonics
            .iter()
            .map(|h| ((step as f32 / h.step_div).sin() + 1.0) * h.amp_w)
            .sum();

        let noise = if self.noise_std_w > 0.0 {
            // simple Gaussian-ish noise via Box-Muller
            let u1: f32 = self.rng.random::<f32>().clamp(1e-6, 1.0);
            let u2: f32 = self.rng.random::<f32>();
            let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
            z0 * self.noise_std_w
        } else {
            0.0
        };

        (base + noise).max(0.0) // no negative demand
    }

    /// Generates `hours` worth of samples at this curve's resolution.
    pub fn day_profile(&mut self, hours: usize) -> Vec<PowerSample> {
        let steps = hours * self.steps_per_hour;
        (0..steps)
            .map(|step| PowerSample {
                time_hr: step as f32 / self.steps_per_hour as f32,
                watts: self.sample_w(step),
            })
            .collect()
    }
}
