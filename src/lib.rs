pub mod error;
pub mod scanner;

// Re-export error types for convenience
pub use error::{Diagnostic, DiagnosticKind};
