//! HTTP request handlers for API endpoints and the dashboard page.

pub mod dashboard;
pub mod forecast;
pub mod health;
pub mod metrics;
pub mod openapi;
pub mod version;

pub use dashboard::*;
pub use forecast::*;
pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use version::*;
