//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → router.rs (ordered scan)
//!     → matcher.rs (exact or segment pattern)
//!     → Return: matched value or NoMatch
//!
//! Route Compilation (at startup):
//!     (pattern, exact, value)[]
//!     → Compile matchers
//!     → Sort by specificity
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by specificity)

pub mod matcher;
pub mod router;

pub use router::Router;
