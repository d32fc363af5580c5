//! Route extraction subsystem.
//!
//! # Data Flow
//! ```text
//! compiled client bundle ──▶ router_point.rs (sentinel region, statement parsing) ─┐
//!                                                                                  ├─▶ RouteTable
//! build manifest (JSON/TOML) ──▶ manifest.rs (typed records) ─────────────────────┘
//! ```
//!
//! # Design Decisions
//! - A missing router point is not an error: pre-rendering is disabled
//! - Malformed statements are skipped with a warning, never fatal
//! - Route and global order is discovery order

pub mod manifest;
pub mod router_point;
pub mod types;

pub use manifest::{ManifestError, RouteManifest};
pub use router_point::{
    extract_routes, is_identifier, RouterPointSyntax, DEFAULT_END_MARKER, DEFAULT_REGISTER_FN,
    DEFAULT_START_MARKER,
};
pub use types::{RouteDescriptor, RouteTable};
