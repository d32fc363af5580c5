//! Handler execution subsystem.
//!
//! # Data Flow
//! ```text
//! handler name
//!     → handler.rs (registry lookup: closure or bundled StaticTree)
//!     → context.rs (fresh RenderContext seeded with body/head roots)
//!     → executor.rs (single call, errors and panics caught)
//!     → RenderTree (tree.rs), or None on failure
//! ```
//!
//! # Design Decisions
//! - Handlers reach the host only through `RenderContext`
//! - One call per execution, no retries
//! - A failing handler never aborts startup

pub mod bundle;
pub mod context;
pub mod executor;
pub mod handler;
pub mod tree;

pub use bundle::{BundleError, TreeBundle};
pub use context::RenderContext;
pub use executor::{execute, try_execute, RenderError};
pub use handler::{HandlerRegistry, HandlerResult, InvalidTree, RenderHandler, StaticTree};
pub use tree::{RenderNode, RenderTree, BODY_ROOT, HEAD_ROOT};
