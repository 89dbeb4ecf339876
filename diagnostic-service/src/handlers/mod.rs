//! HTTP handlers for the diagnostic service.

pub mod diagnostic;
pub mod health;
pub mod metrics;
pub mod page;
