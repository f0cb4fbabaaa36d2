//! API layer
//!
//! HTTP handlers for:
//! - Statuses resource
//! - Metrics (Prometheus)

mod dto;
pub mod metrics;
mod statuses;

pub use dto::*;

pub use metrics::metrics_router;
pub use statuses::statuses_router;
