//! Configuration structures and loading utilities.
//!
//! Every structure loads from environment variables with defaults suitable
//! for local development.

pub mod client;
pub mod metrics;
pub mod server;

pub use client::*;
pub use metrics::*;
pub use server::*;
