//! Dispatcher configuration.

use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::AppResult;

/// Environment variable holding comma-separated vehicle ids.
pub const ENV_VEHICLES: &str = "DISPATCH_VEHICLES";
/// Environment variable holding the service duration in milliseconds.
pub const ENV_SERVICE_MS: &str = "DISPATCH_SERVICE_MS";
/// Environment variable selecting the intake queue backend.
pub const ENV_QUEUE: &str = "DISPATCH_QUEUE";
/// Environment variable sizing the in-memory event buffer.
pub const ENV_EVENT_BUFFER: &str = "DISPATCH_EVENT_BUFFER";

/// Intake queue backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueBackendConfig {
    /// Sorted deque with linear insertion.
    #[default]
    Linear,
    /// Ordered map keyed by priority and sequence.
    Ordered,
}

impl FromStr for QueueBackendConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "ordered" => Ok(Self::Ordered),
            other => Err(format!("unknown queue backend `{other}`")),
        }
    }
}

fn default_vehicles() -> Vec<String> {
    vec!["Vehicle-1".into(), "Vehicle-2".into()]
}

const fn default_service_duration_ms() -> u64 {
    10_000
}

const fn default_event_buffer() -> usize {
    1024
}

/// Dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Vehicle ids in registration order. Earlier ids are preferred.
    #[serde(default = "default_vehicles")]
    pub vehicles: Vec<String>,
    /// Fixed time between assignment and resolution, in milliseconds.
    #[serde(default = "default_service_duration_ms")]
    pub service_duration_ms: u64,
    /// Intake queue backend.
    #[serde(default)]
    pub queue: QueueBackendConfig,
    /// Capacity of the in-memory event buffer.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            vehicles: default_vehicles(),
            service_duration_ms: default_service_duration_ms(),
            queue: QueueBackendConfig::default(),
            event_buffer: default_event_buffer(),
        }
    }
}

impl DispatchConfig {
    /// Service duration as a `Duration`.
    #[must_use]
    pub const fn service_duration(&self) -> Duration {
        Duration::from_millis(self.service_duration_ms)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// A message naming the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.vehicles.is_empty() {
            return Err("at least one vehicle must be defined".into());
        }
        for (i, vehicle) in self.vehicles.iter().enumerate() {
            if vehicle.trim().is_empty() {
                return Err(format!("vehicle #{i} has an empty id"));
            }
            if self.vehicles[..i].contains(vehicle) {
                return Err(format!("vehicle `{vehicle}` listed twice"));
            }
        }
        if self.service_duration_ms == 0 {
            return Err("service_duration_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Parse or validation failure message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment, reading a `.env` file first
    /// if one exists. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Unparseable values or a configuration that fails validation.
    pub fn from_env() -> AppResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("failed to load .env");
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, using the same keys
    /// as [`DispatchConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Unparseable values or a configuration that fails validation.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_VEHICLES) {
            cfg.vehicles = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(raw) = lookup(ENV_SERVICE_MS) {
            cfg.service_duration_ms = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_SERVICE_MS} must be an integer, got `{raw}`"))?;
        }
        if let Some(raw) = lookup(ENV_QUEUE) {
            cfg.queue = raw.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(raw) = lookup(ENV_EVENT_BUFFER) {
            cfg.event_buffer = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_EVENT_BUFFER} must be an integer, got `{raw}`"))?;
        }
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}
