//! Reserved words and built-in type names.
//!
//! Both tables are frozen on first use and only ever read afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::scanner::token::TokenKind;

pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("package", TokenKind::Package),
    ("import", TokenKind::Import),
    ("export", TokenKind::Export),
    ("as", TokenKind::As),
    ("let", TokenKind::Let),
    ("const", TokenKind::Const),
    ("var", TokenKind::Var),
    ("func", TokenKind::Func),
    ("return", TokenKind::Return),
    ("proc", TokenKind::Proc),
    ("if", TokenKind::If),
    ("match", TokenKind::Match),
    ("case", TokenKind::Case),
    ("else", TokenKind::Else),
    ("defer", TokenKind::Defer),
    ("for", TokenKind::For),
    ("break", TokenKind::Break),
    ("continue", TokenKind::Continue),
    ("with", TokenKind::With),
    ("type", TokenKind::Type),
    ("struct", TokenKind::Struct),
    ("enum", TokenKind::Enum),
    ("union", TokenKind::Union),
    ("true", TokenKind::True),
    ("false", TokenKind::False),
];

pub const PRIMITIVE_TYPES: &[(&str, TokenKind)] = &[
    ("int8", TokenKind::Int8),
    ("uint8", TokenKind::Uint8),
    ("int16", TokenKind::Int16),
    ("uint16", TokenKind::Uint16),
    ("int32", TokenKind::Int32),
    ("uint32", TokenKind::Uint32),
    ("int64", TokenKind::Int64),
    ("uint64", TokenKind::Uint64),
    ("int", TokenKind::Int),
    ("uint", TokenKind::Uint),
    ("float32", TokenKind::Float32),
    ("float64", TokenKind::Float64),
    ("string", TokenKind::StringType),
    ("bool", TokenKind::Bool),
    // aliases
    ("byte", TokenKind::Uint8),
    ("str", TokenKind::StringType),
    // shorthand
    ("i8", TokenKind::Int8),
    ("u8", TokenKind::Uint8),
    ("i16", TokenKind::Int16),
    ("u16", TokenKind::Uint16),
    ("i32", TokenKind::Int32),
    ("u32", TokenKind::Uint32),
    ("i64", TokenKind::Int64),
    ("u64", TokenKind::Uint64),
    ("f32", TokenKind::Float32),
    ("f64", TokenKind::Float64),
    ("function", TokenKind::FunctionType),
    ("procedure", TokenKind::ProcedureType),
];

static KEYWORD_TABLE: LazyLock<HashMap<&'static str, TokenKind>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

static TYPE_TABLE: LazyLock<HashMap<&'static str, TokenKind>> =
    LazyLock::new(|| PRIMITIVE_TYPES.iter().copied().collect());

pub fn keyword_kind(ident: &str) -> Option<TokenKind> {
    KEYWORD_TABLE.get(ident).copied()
}

pub fn primitive_type_kind(ident: &str) -> Option<TokenKind> {
    TYPE_TABLE.get(ident).copied()
}

/// Resolve a scanned word: keywords first, then primitive types, then a
/// plain identifier.
pub fn classify_word(ident: &str) -> TokenKind {
    keyword_kind(ident)
        .or_else(|| primitive_type_kind(ident))
        .unwrap_or(TokenKind::Identifier)
}
