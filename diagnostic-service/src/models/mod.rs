pub mod request;
pub mod result;

pub use request::DiagnosticRequest;
pub use result::{Architecture, Benefit, DiagnosticResult};
