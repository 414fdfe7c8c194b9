//! Data models for the weather dashboard.
//!
//! Forecast and place types mirror the backend and geocoder payloads; the
//! `api` and `view` modules hold what this service itself serves.

pub mod api;
pub mod forecast;
pub mod place;
pub mod units;
pub mod view;

pub use api::*;
pub use forecast::*;
pub use place::*;
pub use units::*;
pub use view::*;
