pub mod diagnostic;
pub mod metrics;
pub mod providers;

pub use diagnostic::{build_prompt, DiagnosticError, DiagnosticGenerator};
