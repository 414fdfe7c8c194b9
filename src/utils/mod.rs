//! Utility functions and helper modules.
//!
//! Display formatting for the dashboard, the wind compass, and request
//! inspection helpers used by the middleware.

pub mod format;
pub mod http;
pub mod route;
pub mod wind;

pub use http::*;
pub use route::*;
pub use wind::*;
