//! Pre-rendering server for client-side applications.
//!
//! Render functions compiled into the client build are executed once at
//! startup, their output is turned into HTML fragments, and the fragments are
//! served inside the application's base template.
//!
//! ```text
//!   compiled source / manifest        tree bundle / Rust handlers
//!              │                                │
//!              ▼                                ▼
//!      ┌──────────────┐                 ┌──────────────┐
//!      │   extract    │                 │    render    │
//!      │ route table  │                 │  execution   │
//!      └──────┬───────┘                 └──────┬───────┘
//!             │                                │ RenderTree
//!             │                                ▼
//!             │                         ┌──────────────┐
//!             └───────────────────────▶ │    cache     │ ◀── markup::builder
//!                                       │ pattern→page │
//!                                       └──────┬───────┘
//!                                              │ Arc
//!     Client Request                           ▼
//!     ─────────────────────────────────▶ ┌──────────────┐     ┌──────────┐
//!                                        │     http     │ ──▶ │ ServeDir │
//!     ◀───────────────────────────────── │ page / asset │     └──────────┘
//!                                        └──────────────┘
//! ```

pub mod cache;
pub mod config;
pub mod extract;
pub mod http;
pub mod lifecycle;
pub mod markup;
pub mod observability;
pub mod render;
pub mod routing;

pub use cache::RenderCache;
pub use config::schema::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use render::{HandlerRegistry, RenderContext, RenderNode, RenderTree};
