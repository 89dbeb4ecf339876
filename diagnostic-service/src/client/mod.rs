//! Client side of the diagnostic round trip.
//!
//! `DiagnosticClient` performs the request and always yields a
//! `DiagnosticResult`; `DiagnosticSession` publishes the idle → loading →
//! resolved transitions that drive the rendering surface.

pub mod session;
pub mod trigger;

pub use session::{DiagnosticSession, ViewState};
pub use trigger::{default_locale, DiagnosticClient, TRANSPORT_ERROR_MESSAGE};
