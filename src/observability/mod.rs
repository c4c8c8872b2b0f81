//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! configurator, router, loader
//!     → tracing events (debug per registration, trace per token)
//!     → logging.rs subscriber (stderr)
//! ```

pub mod logging;
