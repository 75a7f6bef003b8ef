//! TOML-based dashboard configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::control::types::Vendor;

/// Top-level dashboard configuration parsed from TOML.
///
/// All fields have defaults matching the `demo` preset. Load from TOML
/// with [`DashboardConfig::from_toml_file`] or use
/// [`DashboardConfig::demo`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Synthetic load-curve parameters.
    #[serde(default)]
    pub curve: CurveConfig,
    /// Economy predicate parameters.
    #[serde(default)]
    pub economy: EconomyConfig,
    /// Demo plug roster parameters.
    #[serde(default)]
    pub plugs: PlugsConfig,
    /// Remote gateway endpoint parameters.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Synthetic load-curve parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CurveConfig {
    /// Samples per hour (must be > 0).
    pub steps_per_hour: usize,
    /// Hours in the simulated day (must be > 0).
    pub hours: usize,
    /// Gaussian noise standard deviation (watts, >= 0).
    pub noise_std_w: f32,
    /// Master random seed.
    pub seed: u64,
    /// Sinusoidal components summed per step.
    pub harmonics: Vec<HarmonicConfig>,
}

/// One sinusoidal component of the load curve.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarmonicConfig {
    /// Component half-range (watts).
    pub amp_w: f32,
    /// Step divisor controlling the component period (must be > 0).
    pub step_div: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            steps_per_hour: 12,
            hours: 24,
            noise_std_w: 0.0,
            seed: 42,
            harmonics: vec![
                HarmonicConfig {
                    amp_w: 500.0,
                    step_div: 24.0,
                },
                HarmonicConfig {
                    amp_w: 400.0,
                    step_div: 5.0,
                },
                HarmonicConfig {
                    amp_w: 200.0,
                    step_div: 4.0,
                },
            ],
        }
    }
}

/// Economy predicate parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomyConfig {
    /// Consumption below this value counts as economy time (watts).
    pub threshold_w: f32,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self { threshold_w: 400.0 }
    }
}

/// Demo plug roster parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlugsConfig {
    /// Number of plugs in the roster (must be > 0).
    pub count: usize,
    /// Vendor tag applied to every plug (`"goodwe"` or `"tuya"`).
    pub vendor: String,
    /// Initial switch state for every plug.
    pub initial_on: bool,
}

impl Default for PlugsConfig {
    fn default() -> Self {
        Self {
            count: 3,
            vendor: "goodwe".to_string(),
            initial_on: true,
        }
    }
}

/// Remote gateway endpoint parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// Base URL of the outlet broker.
    pub base_url: String,
    /// Request timeout in seconds (must be > 0).
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"curve.steps_per_hour"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl DashboardConfig {
    /// Returns the demo preset (the dashboard's stock day profile).
    pub fn demo() -> Self {
        Self {
            curve: CurveConfig::default(),
            economy: EconomyConfig::default(),
            plugs: PlugsConfig::default(),
            gateway: GatewayConfig::default(),
        }
    }

    /// Returns the noisy preset: the demo curve with visible jitter.
    pub fn noisy() -> Self {
        Self {
            curve: CurveConfig {
                noise_std_w: 35.0,
                ..CurveConfig::default()
            },
            ..Self::demo()
        }
    }

    /// Returns the overnight preset: a low flat curve with long economy
    /// runs and a larger roster.
    pub fn overnight() -> Self {
        Self {
            curve: CurveConfig {
                harmonics: vec![HarmonicConfig {
                    amp_w: 150.0,
                    step_div: 30.0,
                }],
                ..CurveConfig::default()
            },
            plugs: PlugsConfig {
                count: 4,
                ..PlugsConfig::default()
            },
            ..Self::demo()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "noisy", "overnight"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "noisy" => Ok(Self::noisy()),
            "overnight" => Ok(Self::overnight()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let c = &self.curve;

        if c.steps_per_hour == 0 {
            errors.push(ConfigError {
                field: "curve.steps_per_hour".into(),
                message: "must be > 0".into(),
            });
        }
        if c.hours == 0 {
            errors.push(ConfigError {
                field: "curve.hours".into(),
                message: "must be > 0".into(),
            });
        }
        if c.noise_std_w < 0.0 {
            errors.push(ConfigError {
                field: "curve.noise_std_w".into(),
                message: "must be >= 0".into(),
            });
        }
        if c.harmonics.is_empty() {
            errors.push(ConfigError {
                field: "curve.harmonics".into(),
                message: "must have at least one harmonic".into(),
            });
        }
        for (i, h) in c.harmonics.iter().enumerate() {
            if h.step_div <= 0.0 {
                errors.push(ConfigError {
                    field: format!("curve.harmonics[{i}].step_div"),
                    message: "must be > 0".into(),
                });
            }
            if h.amp_w < 0.0 {
                errors.push(ConfigError {
                    field: format!("curve.harmonics[{i}].amp_w"),
                    message: "must be >= 0".into(),
                });
            }
        }

        let p = &self.plugs;
        if p.count == 0 {
            errors.push(ConfigError {
                field: "plugs.count".into(),
                message: "must be > 0".into(),
            });
        }
        if Vendor::from_name(&p.vendor).is_none() {
            errors.push(ConfigError {
                field: "plugs.vendor".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    Vendor::NAMES.join(", "),
                    p.vendor
                ),
            });
        }

        let g = &self.gateway;
        if g.base_url.is_empty() {
            errors.push(ConfigError {
                field: "gateway.base_url".into(),
                message: "must not be empty".into(),
            });
        }
        if g.timeout_secs == 0 {
            errors.push(ConfigError {
                field: "gateway.timeout_secs".into(),
                message: "must be > 0".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_preset_valid() {
        let cfg = DashboardConfig::demo();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "demo should be valid: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in DashboardConfig::PRESETS {
            let cfg = DashboardConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = DashboardConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[curve]
steps_per_hour = 4
hours = 12
noise_std_w = 10.0
seed = 99

[[curve.harmonics]]
amp_w = 300.0
step_div = 16.0

[economy]
threshold_w = 250.0

[plugs]
count = 5
vendor = "tuya"
initial_on = false

[gateway]
base_url = "http://broker.local:9000"
timeout_secs = 5
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.curve.steps_per_hour), Some(4));
        assert_eq!(cfg.as_ref().map(|c| c.curve.harmonics.len()), Some(1));
        assert_eq!(cfg.as_ref().map(|c| c.plugs.count), Some(5));
        assert_eq!(cfg.as_ref().map(|c| c.economy.threshold_w), Some(250.0));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[curve]
steps_per_hour = 12
bogus_field = true
"#;
        let result = DashboardConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[curve]
seed = 99
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // seed overridden
        assert_eq!(cfg.as_ref().map(|c| c.curve.seed), Some(99));
        // resolution kept default
        assert_eq!(cfg.as_ref().map(|c| c.curve.steps_per_hour), Some(12));
        // economy threshold kept default
        assert_eq!(cfg.as_ref().map(|c| c.economy.threshold_w), Some(400.0));
    }

    #[test]
    fn validation_catches_zero_steps_per_hour() {
        let mut cfg = DashboardConfig::demo();
        cfg.curve.steps_per_hour = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "curve.steps_per_hour"));
    }

    #[test]
    fn validation_catches_empty_harmonics() {
        let mut cfg = DashboardConfig::demo();
        cfg.curve.harmonics.clear();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "curve.harmonics"));
    }

    #[test]
    fn validation_catches_bad_step_div() {
        let mut cfg = DashboardConfig::demo();
        cfg.curve.harmonics[1].step_div = 0.0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "curve.harmonics[1].step_div")
        );
    }

    #[test]
    fn validation_catches_zero_plug_count() {
        let mut cfg = DashboardConfig::demo();
        cfg.plugs.count = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "plugs.count"));
    }

    #[test]
    fn validation_catches_unknown_vendor() {
        let mut cfg = DashboardConfig::demo();
        cfg.plugs.vendor = "acme".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "plugs.vendor"));
    }

    #[test]
    fn validation_catches_zero_timeout() {
        let mut cfg = DashboardConfig::demo();
        cfg.gateway.timeout_secs = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "gateway.timeout_secs"));
    }

    #[test]
    fn noisy_preset_adds_jitter() {
        let demo = DashboardConfig::demo();
        let noisy = DashboardConfig::noisy();
        assert!(noisy.curve.noise_std_w > demo.curve.noise_std_w);
    }

    #[test]
    fn overnight_preset_flattens_the_curve() {
        let overnight = DashboardConfig::overnight();
        assert_eq!(overnight.curve.harmonics.len(), 1);
        assert!(overnight.plugs.count > DashboardConfig::demo().plugs.count);
    }
}
