//! Service layer
//!
//! Contains the outcome mapping separated from HTTP handlers.

mod status;

pub use status::StatusService;
