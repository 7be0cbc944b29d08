pub mod cursor;
pub mod keywords;
pub mod lexer;
pub mod source;
pub mod token;

use crate::error::Diagnostic;
pub use lexer::Lexer;
pub use source::SourceBuffer;
use token::Token;

/// Everything one pass over a source buffer produced.
#[derive(Debug)]
pub struct Scan {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    pub had_error: bool,
}

impl Scan {
    /// Reject the token stream if any diagnostic was recorded.
    pub fn into_result(self) -> Result<Vec<Token>, Vec<Diagnostic>> {
        if self.had_error {
            Err(self.diagnostics)
        } else {
            Ok(self.tokens)
        }
    }
}

/// Scan a whole source buffer into tokens and diagnostics.
pub fn scan(source: &SourceBuffer) -> Scan {
    let mut lexer = Lexer::new(source);
    let (tokens, had_error) = lexer.tokenize_all();
    Scan {
        tokens,
        diagnostics: lexer.into_diagnostics(),
        had_error,
    }
}

/// Render tokens one per line as `line:column KIND[: literal]`.
pub fn dump(tokens: &[Token]) -> String {
    tokens.iter().map(|token| format!("{token}\n")).collect()
}
