use miette::{NamedSource, SourceSpan};
use serde::Serialize;
use thiserror::Error;

use crate::scanner::cursor::Cursor;
use crate::scanner::source::SourceBuffer;
use crate::scanner::token::Span;

/// Classification of a scan diagnostic. `Ok` marks the absence of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, strum::Display)]
pub enum DiagnosticKind {
    #[default]
    Ok,
    InvalidToken,
    InvalidNumber,
    InvalidByteLiteral,
    UnterminatedString,
    UnterminatedComment,
}

/// A non-fatal problem found while scanning, positioned at the offending byte.
#[derive(Error, Debug, miette::Diagnostic)]
#[error("[ERROR] at {file}:{line}:{column} during parsing: {message}")]
#[diagnostic(code(aleron::lex))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    #[label("here")]
    pub span: SourceSpan,
    #[source_code]
    src: NamedSource<String>,
}

impl Diagnostic {
    pub fn new(
        kind: DiagnosticKind,
        message: impl Into<String>,
        file: impl Into<String>,
        at: Cursor,
        len: usize,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            file: file.into(),
            line: at.line,
            column: at.column,
            span: Span::new(at.offset, len).into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    /// The "no error" value.
    pub fn ok() -> Self {
        Self::new(DiagnosticKind::Ok, "", "", Cursor::new(), 0)
    }

    pub fn is_ok(&self) -> bool {
        self.kind == DiagnosticKind::Ok
    }

    /// Add an inner cause to the message, keeping kind and position.
    pub fn wrap(self, detail: impl AsRef<str>) -> Self {
        Self {
            message: format!("{} (internal: {})", self.message, detail.as_ref()),
            ..self
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(self, source: &SourceBuffer) -> Self {
        Self {
            src: NamedSource::new(source.name(), source.text().into_owned()),
            ..self
        }
    }
}

impl Default for Diagnostic {
    fn default() -> Self {
        Self::ok()
    }
}
