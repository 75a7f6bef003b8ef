//! Plug identity and control-state types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable plug identifier.
///
/// Identifiers come from the device inventory (the broker hands out
/// UUIDs); the controller only requires them to be unique and hashable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlugId(String);

impl PlugId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlugId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Plug hardware provenance. Affects display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Goodwe,
    Tuya,
}

impl Vendor {
    /// Known vendor names accepted in configuration.
    pub const NAMES: &[&str] = &["goodwe", "tuya"];

    /// Resolves a configuration name to a vendor tag.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "goodwe" => Some(Self::Goodwe),
            "tuya" => Some(Self::Tuya),
            _ => None,
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Goodwe => f.write_str("goodwe"),
            Self::Tuya => f.write_str("tuya"),
        }
    }
}

/// Control state of a single plug.
///
/// `Off`, `On`, and `Unknown` are stable; `Pending` marks an in-flight
/// gateway request and always resolves to a stable state within that
/// request's lifetime. The rendering layer derives its disabled/loading
/// affordance from `Pending` rather than tracking it separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlugState {
    Off,
    On,
    Unknown,
    Pending,
}

impl PlugState {
    /// Returns `true` for every state except `Pending`.
    pub fn is_stable(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Returns `true` when the plug is definitely on.
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for PlugState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
            Self::Unknown => f.write_str("unknown"),
            Self::Pending => f.write_str("pending"),
        }
    }
}
