//! HTTP vocabulary shared by the configurator and the router.

pub mod method;

pub use method::{HttpMethod, UnknownMethod};
