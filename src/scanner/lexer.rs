use std::iter::FusedIterator;

use tracing::{debug, trace};
use winnow::prelude::*;
use winnow::stream::{LocatingSlice, Location};
use winnow::token::{any, take_till, take_while};

use crate::error::{Diagnostic, DiagnosticKind};
use crate::scanner::cursor::Cursor;
use crate::scanner::keywords::classify_word;
use crate::scanner::source::SourceBuffer;
use crate::scanner::token::{Span, Token, TokenKind};

type Input<'a> = LocatingSlice<&'a [u8]>;

/// Output of one sub-scanner. `text` replaces the raw source slice as the
/// token's lexeme when the spelling is normalised; `fault` becomes a
/// diagnostic once the lexer knows where the lexeme ended.
#[derive(Debug)]
struct Scanned {
    kind: TokenKind,
    text: Option<Vec<u8>>,
    fault: Option<DiagnosticKind>,
}

impl Scanned {
    fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            text: None,
            fault: None,
        }
    }

    fn with_text(mut self, text: impl Into<Vec<u8>>) -> Self {
        self.text = Some(text.into());
        self
    }

    fn with_fault(mut self, fault: DiagnosticKind) -> Self {
        self.fault = Some(fault);
        self
    }
}

fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn peek_at(input: &Input<'_>, n: usize) -> Option<u8> {
    input.get(n).copied()
}

fn bump(input: &mut Input<'_>) -> ModalResult<u8> {
    any.parse_next(input)
}

fn whitespace<'a>(input: &mut Input<'a>) -> ModalResult<&'a [u8]> {
    take_while(0.., is_space).parse_next(input)
}

fn digits<'a>(input: &mut Input<'a>) -> ModalResult<&'a [u8]> {
    take_while(0.., is_digit).parse_next(input)
}

fn line_comment(input: &mut Input<'_>) -> ModalResult<Scanned> {
    let _: &[u8] = take_till(0.., b'\n').parse_next(input)?;
    Ok(Scanned::new(TokenKind::Comment))
}

fn block_comment(input: &mut Input<'_>) -> ModalResult<Scanned> {
    // opener
    bump(input)?;
    bump(input)?;
    loop {
        let _: &[u8] = take_till(0.., b'*').parse_next(input)?;
        match (peek_at(input, 0), peek_at(input, 1)) {
            (None, _) => {
                return Ok(Scanned::new(TokenKind::Comment).with_fault(DiagnosticKind::UnterminatedComment));
            }
            (Some(_), Some(b'/')) => {
                bump(input)?;
                bump(input)?;
                return Ok(Scanned::new(TokenKind::Comment));
            }
            _ => {
                bump(input)?;
            }
        }
    }
}

fn string_literal(input: &mut Input<'_>) -> ModalResult<Scanned> {
    bump(input)?;
    let mut content = Vec::new();
    loop {
        let run: &[u8] = take_till(0.., |b: u8| b == b'"' || b == b'\\').parse_next(input)?;
        content.extend_from_slice(run);
        match peek_at(input, 0) {
            None => {
                return Ok(Scanned::new(TokenKind::String)
                    .with_text(content)
                    .with_fault(DiagnosticKind::UnterminatedString));
            }
            Some(b'"') => {
                bump(input)?;
                return Ok(Scanned::new(TokenKind::String).with_text(content));
            }
            Some(_) => {
                // backslash: the next byte can never close the string
                content.push(bump(input)?);
                if peek_at(input, 0).is_some() {
                    content.push(bump(input)?);
                }
            }
        }
    }
}

fn byte_literal(input: &mut Input<'_>) -> ModalResult<Scanned> {
    bump(input)?;
    if peek_at(input, 0).is_none() {
        return Ok(Scanned::new(TokenKind::Invalid).with_fault(DiagnosticKind::InvalidByteLiteral));
    }
    let value = bump(input)?;
    let scanned = Scanned::new(TokenKind::Uint8).with_text(value.to_string());
    if peek_at(input, 0) == Some(b'\'') {
        bump(input)?;
        Ok(scanned)
    } else {
        Ok(scanned.with_fault(DiagnosticKind::InvalidByteLiteral))
    }
}

fn identifier(input: &mut Input<'_>) -> ModalResult<Scanned> {
    let word: &[u8] = take_while(1.., is_word).parse_next(input)?;
    let kind = std::str::from_utf8(word).map_or(TokenKind::Identifier, classify_word);
    Ok(Scanned::new(kind))
}

fn number(input: &mut Input<'_>) -> ModalResult<Scanned> {
    let leading_point = peek_at(input, 0) == Some(b'.');
    if leading_point && !peek_at(input, 1).is_some_and(is_digit) {
        bump(input)?;
        return Ok(Scanned::new(TokenKind::Dot));
    }

    let mut text = String::new();
    if leading_point {
        text.push('0');
    }
    let mut seen_point = false;
    let mut fault = None;
    loop {
        text.extend(digits(input)?.iter().map(|&b| char::from(b)));
        if peek_at(input, 0) != Some(b'.') {
            break;
        }
        if seen_point {
            // the second point starts the next token
            fault = Some(DiagnosticKind::InvalidNumber);
            break;
        }
        seen_point = true;
        bump(input)?;
        text.push('.');
    }

    let kind = if seen_point {
        TokenKind::Number
    } else {
        TokenKind::Integer
    };
    Ok(Scanned {
        kind,
        text: Some(text.into_bytes()),
        fault,
    })
}

fn operator(input: &mut Input<'_>) -> ModalResult<Scanned> {
    let lead = bump(input)?;
    let next = peek_at(input, 0);
    let (kind, two_bytes) = match (lead, next) {
        (b'=', Some(b'=')) => (TokenKind::Equal, true),
        (b'=', _) => (TokenKind::Assign, false),
        (b'!', Some(b'=')) => (TokenKind::NotEqual, true),
        (b'!', _) => (TokenKind::Not, false),
        (b'<', Some(b'=')) => (TokenKind::LessEqual, true),
        (b'<', _) => (TokenKind::Less, false),
        (b'>', Some(b'=')) => (TokenKind::GreaterEqual, true),
        (b'>', _) => (TokenKind::Greater, false),

        (b'+', Some(b'=')) => (TokenKind::PlusAssign, true),
        (b'+', _) => (TokenKind::Plus, false),
        (b'-', Some(b'=')) => (TokenKind::MinusAssign, true),
        (b'-', _) => (TokenKind::Minus, false),
        (b'*', Some(b'=')) => (TokenKind::StarAssign, true),
        (b'*', _) => (TokenKind::Star, false),
        (b'/', Some(b'=')) => (TokenKind::SlashAssign, true),
        (b'/', _) => (TokenKind::Slash, false),
        (b'%', Some(b'=')) => (TokenKind::ModAssign, true),
        (b'%', _) => (TokenKind::Mod, false),

        (b'&', Some(b'&')) => (TokenKind::And, true),
        (b'&', Some(b'=')) => (TokenKind::AmpAssign, true),
        (b'&', _) => (TokenKind::Ampersand, false),
        (b'|', Some(b'|')) => (TokenKind::Or, true),
        (b'|', Some(b'=')) => (TokenKind::PipeAssign, true),
        (b'|', _) => (TokenKind::Pipe, false),
        (b'^', Some(b'^')) => (TokenKind::Xor, true),
        (b'^', Some(b'=')) => (TokenKind::CaretAssign, true),
        (b'^', _) => (TokenKind::Caret, false),
        (b'~', Some(b'=')) => (TokenKind::TildeAssign, true),
        (b'~', _) => (TokenKind::Tilde, false),
        (b':', Some(b'=')) => (TokenKind::InferAssign, true),
        (b':', _) => (TokenKind::Colon, false),

        (b'(', _) => (TokenKind::ParenOpen, false),
        (b')', _) => (TokenKind::ParenClose, false),
        // brackets share the brace kinds
        (b'{' | b'[', _) => (TokenKind::BraceOpen, false),
        (b'}' | b']', _) => (TokenKind::BraceClose, false),
        (b',', _) => (TokenKind::Comma, false),
        (b';', _) => (TokenKind::Semicolon, false),

        _ => return Ok(Scanned::new(TokenKind::Invalid).with_fault(DiagnosticKind::InvalidToken)),
    };
    if two_bytes {
        bump(input)?;
    }
    Ok(Scanned::new(kind))
}

fn scan_lexeme(input: &mut Input<'_>) -> ModalResult<Scanned> {
    match (peek_at(input, 0), peek_at(input, 1)) {
        (Some(b'/'), Some(b'/')) => line_comment(input),
        (Some(b'/'), Some(b'*')) => block_comment(input),
        (Some(b'"'), _) => string_literal(input),
        (Some(b'\''), _) => byte_literal(input),
        (Some(b), _) if b.is_ascii_alphabetic() || b == b'_' => identifier(input),
        (Some(b), _) if b.is_ascii_digit() || b == b'.' => number(input),
        _ => operator(input),
    }
}

/// Scanner over one [`SourceBuffer`].
///
/// Pull tokens one at a time through [`Lexer::next_token`] (or the
/// `Iterator` impl), or drain everything with [`Lexer::tokenize_all`].
/// Malformed input never stops the scan: it yields a best-effort token and
/// records a [`Diagnostic`]. The last token of every pass is `Eof`.
pub struct Lexer<'src> {
    source: &'src SourceBuffer,
    input: Input<'src>,
    cursor: Cursor,
    diagnostics: Vec<Diagnostic>,
    had_error: bool,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src SourceBuffer) -> Self {
        Self {
            source,
            input: LocatingSlice::new(source.bytes()),
            cursor: Cursor::new(),
            diagnostics: Vec::new(),
            had_error: false,
            finished: false,
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    /// Position of the next unconsumed byte.
    pub fn position(&self) -> Cursor {
        self.cursor
    }

    /// Scan everything that is left. Returns the tokens and whether any
    /// diagnostic was recorded during the pass.
    pub fn tokenize_all(&mut self) -> (Vec<Token>, bool) {
        let tokens: Vec<Token> = self.by_ref().collect();
        debug!(
            file = self.source.name(),
            tokens = tokens.len(),
            diagnostics = self.diagnostics.len(),
            "scan finished"
        );
        (tokens, self.had_error)
    }

    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        let _ = whitespace(&mut self.input);
        self.sync_cursor();
        let start = self.cursor;

        if self.input.is_empty() {
            self.finished = true;
            let token = Token::new(
                TokenKind::Eof,
                "",
                Span::new(start.offset, 0),
                start.line,
                start.column,
            );
            trace!(line = token.line, column = token.column, "eof");
            return Some(token);
        }

        // Cannot fail: input is non-empty and every sub-scanner takes at least
        // one byte of it.
        let scanned = scan_lexeme(&mut self.input).unwrap_or_else(|_| {
            let _ = bump(&mut self.input);
            Scanned::new(TokenKind::Invalid)
        });
        self.sync_cursor();

        let source = self.source;
        let raw = source
            .bytes()
            .get(start.offset..self.cursor.offset)
            .unwrap_or_default();
        if let Some(fault) = scanned.fault {
            self.report(fault, start, raw);
        }

        let lexeme = scanned.text.unwrap_or_else(|| raw.to_vec());
        let token = Token::new(
            scanned.kind,
            lexeme,
            Span::new(start.offset, raw.len()),
            start.line,
            start.column,
        );
        trace!(
            kind = %token.kind,
            line = token.line,
            column = token.column,
            "token"
        );
        Some(token)
    }

    /// Bring the cursor up to wherever the input has been consumed to.
    fn sync_cursor(&mut self) {
        let end = self.input.current_token_start();
        if let Some(consumed) = self.source.bytes().get(self.cursor.offset..end) {
            self.cursor.advance(consumed);
        }
    }

    fn report(&mut self, fault: DiagnosticKind, start: Cursor, raw: &[u8]) {
        let here = self.cursor;
        let here_len = usize::from(here.offset < self.source.len());
        let diagnostic = match fault {
            DiagnosticKind::Ok => return,
            DiagnosticKind::InvalidToken => self.diagnostic(
                DiagnosticKind::InvalidToken,
                format!("Invalid token '{}'", raw.escape_ascii()),
                start,
                raw.len(),
            ),
            DiagnosticKind::InvalidNumber => self.diagnostic(
                DiagnosticKind::InvalidNumber,
                "Invalid number literal",
                here,
                here_len,
            ),
            DiagnosticKind::InvalidByteLiteral => self.diagnostic(
                DiagnosticKind::InvalidByteLiteral,
                "Invalid byte literal",
                here,
                here_len,
            ),
            DiagnosticKind::UnterminatedString => self
                .diagnostic(
                    DiagnosticKind::UnterminatedString,
                    "String was never terminated",
                    here,
                    0,
                )
                .wrap("Unexpected EOF"),
            DiagnosticKind::UnterminatedComment => self
                .diagnostic(
                    DiagnosticKind::UnterminatedComment,
                    "Comment was never terminated",
                    here,
                    0,
                )
                .wrap("Unexpected EOF"),
        };
        debug!(
            kind = %diagnostic.kind,
            line = diagnostic.line,
            column = diagnostic.column,
            "{}",
            diagnostic.message
        );
        self.had_error |= !diagnostic.is_ok();
        self.diagnostics.push(diagnostic);
    }

    fn diagnostic(
        &self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        at: Cursor,
        len: usize,
    ) -> Diagnostic {
        Diagnostic::new(kind, message, self.source.name(), at, len)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

impl FusedIterator for Lexer<'_> {}
