//! Business logic and service layer modules.
//!
//! Upstream clients (forecast backend, reverse geocoder), the dashboard
//! session state and its presenter, and metrics collection.

pub mod dashboard;
pub mod forecast;
pub mod geocode;
pub mod http_client;
pub mod metrics;
pub mod presenter;

pub use dashboard::*;
pub use forecast::*;
pub use geocode::*;
pub use http_client::*;
pub use metrics::*;
pub use presenter::*;
