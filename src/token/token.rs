use std::fmt;

use crate::token::SourceId;

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,

    /// Position of first character in token.
    pub pos: Pos,
    /// Position of character immediately after token
    pub end_pos: Pos,
    /// Byte length of token
    pub length: usize,
}

impl Token {
    /// Create new Token.
    pub fn new(kind: TokenKind, length: usize, pos: Pos) -> Token {
        let end_pos = Pos {
            source_id: pos.source_id,
            row: pos.row,
            col: pos.col + length,
            offset: pos.offset + length,
            line_begin: pos.line_begin,
        };

        Token {
            length,
            pos,
            end_pos,
            kind,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.kind, self.pos.row, self.pos.col)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pos {
    /// Id of the source this position points into
    pub source_id: SourceId,
    /// Row in file, starting at 0
    pub row: usize,
    /// Column on line, starting at 0
    pub col: usize,
    /// Byte offset in file
    pub offset: usize,
    /// Offset of first character on same line as this Pos
    pub line_begin: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Whitespace, // Ignored by scanner

    // Literals, contain the literal value
    Ident(String),
    IntLit(u64),

    // Keywords
    Typedef,
    Struct,
    Union,
    Enum,

    // Type specifier keywords
    Signed,
    Unsigned,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,

    // Punctuation
    LBrace,
    RBrace,
    LBrack,
    RBrack,
    LParen,
    RParen,
    Semi,
    Comma,
    Star,
    Colon,
}

impl TokenKind {
    /// Keywords that can start or continue a multi-word primitive type
    /// name, eg. 'unsigned long long'.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Signed
                | TokenKind::Unsigned
                | TokenKind::Char
                | TokenKind::Short
                | TokenKind::Int
                | TokenKind::Long
                | TokenKind::Float
                | TokenKind::Double
        )
    }
}

/// Reserved token lexemes
static RESERVED: &[(&str, TokenKind)] = &[
    // Keywords
    ("typedef", TokenKind::Typedef),
    ("struct", TokenKind::Struct),
    ("union", TokenKind::Union),
    ("enum", TokenKind::Enum),
    // Type specifiers
    ("signed", TokenKind::Signed),
    ("unsigned", TokenKind::Unsigned),
    ("char", TokenKind::Char),
    ("short", TokenKind::Short),
    ("int", TokenKind::Int),
    ("long", TokenKind::Long),
    ("float", TokenKind::Float),
    ("double", TokenKind::Double),
    // Punctuation
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("[", TokenKind::LBrack),
    ("]", TokenKind::RBrack),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    (";", TokenKind::Semi),
    (",", TokenKind::Comma),
    ("*", TokenKind::Star),
    (":", TokenKind::Colon),
];

pub fn str_to_token(s: &str) -> Option<&TokenKind> {
    RESERVED.iter().find(|(kw, _)| *kw == s).map(|(_, t)| t)
}

pub fn token_to_str(t: &TokenKind) -> Option<&'static str> {
    RESERVED.iter().find(|(_, tok)| tok == t).map(|(kw, _)| *kw)
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Whitespace => panic!("whitespace tokens should be discarded"),

            TokenKind::Ident(ident) => write!(f, "{}", ident),
            TokenKind::IntLit(n) => write!(f, "{}", n),

            k => {
                let s = token_to_str(k).expect("kind was not found in RESERVED map");
                write!(f, "{}", s)
            }
        }
    }
}
