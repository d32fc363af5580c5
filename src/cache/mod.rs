//! Render cache subsystem.
//!
//! # Data Flow
//! ```text
//! RouteTable + HandlerRegistry
//!     → store.rs (execute, build fragments, key by pattern)
//!     → RenderCache (immutable, shared via Arc)
//!     → lookup(path) at request time
//! ```

pub mod store;

pub use store::{normalize_pattern, CacheEntry, RenderCache};
