use std::fmt;

use bstr::{BString, ByteSlice};
use serde::{Serialize, Serializer};

/// Every token kind the scanner can produce.
///
/// The rendered names follow the debug listing format (`IDENT`, `LPAREN`,
/// `INT32_T`, ...), so `to_string()` on a kind is what `dump` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Sentinels
    Invalid,
    #[strum(serialize = "EOF")]
    Eof,
    Comment,

    // Literals
    #[strum(serialize = "IDENT")]
    Identifier,
    String,
    Integer,
    Number,

    // Relational operators
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    Mod,

    // Logical operators
    And,
    Or,
    Not,
    Xor,

    // Bitwise operators
    Ampersand,
    Pipe,
    Caret,
    Tilde,

    // Assignment operators
    Assign,
    InferAssign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    ModAssign,
    AmpAssign,
    PipeAssign,
    CaretAssign,
    TildeAssign,

    // Delimiters
    Comma,
    Semicolon,
    Colon,
    #[strum(serialize = "LPAREN")]
    ParenOpen,
    #[strum(serialize = "RPAREN")]
    ParenClose,
    /// `{` and also `[`.
    #[strum(serialize = "LBRACE")]
    BraceOpen,
    /// `}` and also `]`.
    #[strum(serialize = "RBRACE")]
    BraceClose,
    Dot,

    // Keywords: modules
    Package,
    Import,
    Export,
    As,

    // Keywords: declarations
    Let,
    Const,
    Var,
    Func,
    Return,
    Proc,

    // Keywords: control flow
    If,
    Match,
    Case,
    Else,
    Defer,
    For,
    Break,
    Continue,
    With,

    // Keywords: type construction
    Type,
    Struct,
    Enum,
    Union,

    // Primitive types
    #[strum(serialize = "INT8_T")]
    Int8,
    #[strum(serialize = "UINT8_T")]
    Uint8,
    #[strum(serialize = "INT16_T")]
    Int16,
    #[strum(serialize = "UINT16_T")]
    Uint16,
    #[strum(serialize = "INT32_T")]
    Int32,
    #[strum(serialize = "UINT32_T")]
    Uint32,
    #[strum(serialize = "INT64_T")]
    Int64,
    #[strum(serialize = "UINT64_T")]
    Uint64,
    /// Pointer-sized signed integer.
    #[strum(serialize = "INT_T")]
    Int,
    #[strum(serialize = "UINT_T")]
    Uint,
    #[strum(serialize = "FLOAT32_T")]
    Float32,
    #[strum(serialize = "FLOAT64_T")]
    Float64,
    #[strum(serialize = "STRING_T")]
    StringType,
    #[strum(serialize = "BOOLEAN_T")]
    Bool,
    True,
    False,
    #[strum(serialize = "FUNCTION_T")]
    FunctionType,
    #[strum(serialize = "PROCEDURE_T")]
    ProcedureType,
}

impl TokenKind {
    /// Kinds whose literal text varies and is part of the debug listing.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::Identifier | Self::String | Self::Integer | Self::Number | Self::Comment
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::new(span.offset.into(), span.len)
    }
}

/// A classified lexeme.
///
/// `line` and `column` point at the first byte of the lexeme. `lexeme` is the
/// matched spelling after normalisation: strings lose their quotes, byte
/// literals become their decimal value and `.5` becomes `0.5`. The untouched
/// source bytes are always `span`. Bytes that are not UTF-8 are kept as they
/// are; only the listing and JSON output render them lossily.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(serialize_with = "serialize_lossy")]
    pub lexeme: BString,
    pub span: Span,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<BString>,
        span: Span,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
            line,
            column,
        }
    }

    /// Whether the debug listing shows `lexeme` after the kind.
    ///
    /// Invalid tokens print the offending bytes (`INVALID: @`) so a listing
    /// line can be matched to its diagnostic; older listings printed a bare
    /// `INVALID`.
    fn shows_lexeme(&self) -> bool {
        match self.kind {
            TokenKind::Invalid => true,
            // `u8` the type keyword vs `'A'` the byte literal
            TokenKind::Uint8 => {
                !self.lexeme.is_empty() && self.lexeme.iter().all(u8::is_ascii_digit)
            }
            kind => kind.is_literal(),
        }
    }
}

fn serialize_lossy<S: Serializer>(lexeme: &BString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&lexeme.to_str_lossy())
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.line, self.column, self.kind)?;
        if self.shows_lexeme() {
            write!(f, ": {}", self.lexeme)?;
        }
        Ok(())
    }
}
