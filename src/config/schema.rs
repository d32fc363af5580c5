//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default marker replaced by head content in the base template.
pub const DEFAULT_HEAD_PLACEHOLDER: &str = "<!-- {{%HEAD_FOR_SSR%}} -->";

/// Default marker replaced by body content in the base template.
pub const DEFAULT_BODY_PLACEHOLDER: &str = "<!-- {{%BODY_FOR_SSR%}} -->";

/// Root configuration for the pre-render server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Application settings shared with the client build.
    pub settings: Settings,

    /// Pre-render inputs and template markers.
    pub ssr: SsrConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Application settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Verbose startup diagnostics.
    pub debug: bool,

    /// Build output directory; static assets are served from here.
    pub output_folder: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            output_folder: PathBuf::from("dist"),
        }
    }
}

/// Pre-render inputs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SsrConfig {
    /// Base HTML template. Defaults to `<output_folder>/index.html`.
    pub template: Option<PathBuf>,

    /// Compiled client bundle containing the router point region.
    pub source: Option<PathBuf>,

    /// Route manifest emitted by the build (JSON or TOML).
    pub manifest: Option<PathBuf>,

    /// Render tree bundle emitted by the build (JSON).
    pub trees: Option<PathBuf>,

    /// Marker replaced by head content.
    pub head_placeholder: String,

    /// Marker replaced by body content.
    pub body_placeholder: String,

    /// Comment opening the router point region.
    pub start_marker: String,

    /// Comment closing the router point region.
    pub end_marker: String,

    /// Name of the route registration call.
    pub register_fn: String,
}

impl Default for SsrConfig {
    fn default() -> Self {
        Self {
            template: None,
            source: None,
            manifest: None,
            trees: None,
            head_placeholder: DEFAULT_HEAD_PLACEHOLDER.to_string(),
            body_placeholder: DEFAULT_BODY_PLACEHOLDER.to_string(),
            start_marker: crate::extract::DEFAULT_START_MARKER.to_string(),
            end_marker: crate::extract::DEFAULT_END_MARKER.to_string(),
            register_fn: crate::extract::DEFAULT_REGISTER_FN.to_string(),
        }
    }
}

impl AppConfig {
    /// Resolved path of the base template.
    pub fn template_path(&self) -> PathBuf {
        self.ssr
            .template
            .clone()
            .unwrap_or_else(|| self.settings.output_folder.join("index.html"))
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
