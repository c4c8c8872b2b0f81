//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Configurator
//!     → RouterHandle calls (filters, prefix, restrictions, routes)
//!     → router.rs (scope state, child scopes via group())
//!     → route.rs (prefixed paths, controller-bound actions)
//!
//! Inspection:
//!     Router::snapshot()
//!     → ScopeSnapshot tree (serializable)
//! ```
//!
//! # Design Decisions
//! - Registration only; request matching lives outside this crate
//! - Scopes form a tree owned by the root router

pub mod restrictions;
pub mod route;
pub mod router;

pub use restrictions::Restrictions;
pub use route::{Action, Route};
pub use router::{Router, RouterHandle, ScopeSnapshot};
