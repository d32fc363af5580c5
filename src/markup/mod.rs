//! Markup subsystem: render trees to HTML, and HTML into the base page.
//!
//! # Data Flow
//! ```text
//! RenderTree → builder.rs → HtmlFragment { head, body }
//!
//! base template + global fragment + route fragment
//!     → template.rs → composed page
//! ```

pub mod builder;
pub mod template;

pub use builder::{build_fragment, HtmlFragment};
pub use template::BaseTemplate;
