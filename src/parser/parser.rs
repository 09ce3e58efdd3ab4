use std::collections::HashSet;

use tracing::{debug, info};

use crate::{
    error::{ErrorKind, Report, Res},
    parser::{FieldDecl, StructDecl},
    token::{Pos, Source, Token, TokenKind},
};

pub fn parse(source: &Source, tokens: Vec<Token>) -> Res<Vec<StructDecl>> {
    let parser = Parser::new(source, tokens);
    parser.parse()
}

/// Text of an identifier token. Calling this with any other kind is a
/// bug in the caller.
pub fn ident_text(tok: &Token) -> &str {
    match &tok.kind {
        TokenKind::Ident(s) => s,
        k => panic!("expected identifier token, got {:?}", k),
    }
}

struct Parser<'a> {
    source: &'a Source,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a Source, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn parse(mut self) -> Res<Vec<StructDecl>> {
        info!("parsing: {}", self.source.filepath);

        let mut decls = Vec::new();
        while !self.eof() {
            decls.push(self.parse_typedef()?);
        }

        debug!("success: {} declarations", decls.len());
        Ok(decls)
    }

    fn parse_typedef(&mut self) -> Res<StructDecl> {
        self.expect(TokenKind::Typedef)?;
        self.reject_union_or_enum()?;
        self.expect(TokenKind::Struct)?;

        // An optional struct tag is accepted and ignored.
        if self.matches_ident() {
            self.consume();
        }

        // A typedef with no body is a forward declaration.
        if !self.matches(TokenKind::LBrace) {
            return Err(self.error(
                ErrorKind::UnsupportedConstruct,
                "forward-declared struct types are not supported",
            ));
        }
        self.consume(); // {

        let mut fields = Vec::new();
        let mut names = HashSet::new();

        while !self.matches(TokenKind::RBrace) {
            if self.eof() {
                return Err(self.error(
                    ErrorKind::Syntax,
                    "unexpected end of file while parsing struct body",
                ));
            }

            let field = self.parse_field()?;

            // If name already exists
            let text = ident_text(&field.name);
            if !names.insert(text.to_owned()) {
                let msg = format!("field '{}' is declared twice", text);
                return Err(self.error_at(ErrorKind::DuplicateField, &msg, &field.name));
            }

            fields.push(field);
        }

        if fields.is_empty() {
            return Err(self.error(
                ErrorKind::Syntax,
                "struct must declare at least one field",
            ));
        }

        self.expect(TokenKind::RBrace)?;
        let name = self.expect_identifier("typedef name")?;
        self.expect(TokenKind::Semi)?;

        Ok(StructDecl { name, fields })
    }

    fn parse_field(&mut self) -> Res<FieldDecl> {
        self.reject_union_or_enum()?;

        // A struct keyword in field position is either an anonymous
        // nested struct or a tag reference, neither of which the type
        // model supports. Nested types must be typedef'd first and
        // referenced by their typedef name.
        if self.matches(TokenKind::Struct) {
            let msg = if matches!(self.peek_kind(), Some(TokenKind::LBrace)) {
                "anonymous nested structs are not supported"
            } else {
                "struct tag field types are not supported, reference the typedef name instead"
            };
            return Err(self.error(ErrorKind::UnsupportedConstruct, msg));
        }

        let (type_tok, type_name) = self.parse_type_name()?;
        self.reject_declarator_symbols()?;

        let name = self.expect_identifier("field name")?;
        self.reject_declarator_symbols()?;

        let mut dims = Vec::new();
        while self.matches(TokenKind::LBrack) {
            self.consume(); // [

            let dim_tok = self.must_consume()?;
            let TokenKind::IntLit(n) = dim_tok.kind else {
                return Err(self.error_at(
                    ErrorKind::Syntax,
                    "expected array dimension",
                    &dim_tok,
                ));
            };

            if n == 0 {
                return Err(self.error_at(
                    ErrorKind::Syntax,
                    "array dimension must be a positive integer",
                    &dim_tok,
                ));
            }

            self.expect(TokenKind::RBrack)?;
            dims.push(n);
        }

        if self.matches(TokenKind::Colon) {
            return Err(self.error(
                ErrorKind::UnsupportedConstruct,
                "bitfields are not supported",
            ));
        }

        self.expect(TokenKind::Semi)?;

        Ok(FieldDecl {
            name,
            type_name,
            type_tok,
            dims,
        })
    }

    /// Parse a field type name: either a single identifier (typedef or
    /// stdint name) or one or more type specifier keywords.
    fn parse_type_name(&mut self) -> Res<(Token, String)> {
        let Some(first) = self.cur() else {
            return Err(self.error(ErrorKind::Syntax, "expected field type"));
        };

        match &first.kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.consume();
                Ok((first, name))
            }
            k if k.is_type_keyword() => {
                let mut words = Vec::new();
                while let Some(tok) = self.cur() {
                    if !tok.kind.is_type_keyword() {
                        break;
                    }
                    words.push(tok.kind.to_string());
                    self.consume();
                }
                Ok((first, words.join(" ")))
            }
            _ => Err(self.error(ErrorKind::Syntax, "expected field type")),
        }
    }

    /// Reject unsupported declarator symbols at the current position.
    fn reject_declarator_symbols(&self) -> Res<()> {
        if self.matches(TokenKind::Star) {
            return Err(self.error(
                ErrorKind::UnsupportedConstruct,
                "pointer fields are not supported",
            ));
        }

        if self.matches(TokenKind::LParen) {
            return Err(self.error(
                ErrorKind::UnsupportedConstruct,
                "function declarators are not supported",
            ));
        }

        Ok(())
    }

    fn reject_union_or_enum(&self) -> Res<()> {
        if self.matches(TokenKind::Union) {
            return Err(self.error(
                ErrorKind::UnsupportedConstruct,
                "unions are not supported",
            ));
        }

        if self.matches(TokenKind::Enum) {
            return Err(self.error(
                ErrorKind::UnsupportedConstruct,
                "enums are not supported",
            ));
        }

        Ok(())
    }

    /// Create error marking the current token.
    fn error(&self, kind: ErrorKind, message: &str) -> Report {
        match self.cur_or_last() {
            Some(tok) => self.error_at(kind, message, &tok),
            // Empty token stream, point at the start of the source
            None => Report::new(
                kind,
                message,
                &Pos {
                    source_id: self.source.id,
                    row: 0,
                    col: 0,
                    offset: 0,
                    line_begin: 0,
                },
                1,
            ),
        }
    }

    /// Create error marking the given token.
    fn error_at(&self, kind: ErrorKind, message: &str, tok: &Token) -> Report {
        Report::new(kind, message, &tok.pos, tok.length)
    }

    fn cur(&self) -> Option<Token> {
        self.tokens.get(self.pos).cloned()
    }

    fn cur_or_last(&self) -> Option<Token> {
        if self.pos < self.tokens.len() {
            self.tokens.get(self.pos).cloned()
        } else {
            self.tokens.last().cloned()
        }
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos + 1).map(|t| t.kind.clone())
    }

    fn consume(&mut self) -> Option<Token> {
        if self.pos < self.tokens.len() {
            let pos = self.pos;
            self.pos += 1;
            Some(self.tokens[pos].clone())
        } else {
            None
        }
    }

    /// Consumes current token and returns it. Errors if EOF.
    fn must_consume(&mut self) -> Res<Token> {
        match self.consume() {
            Some(t) => Ok(t),
            None => Err(self.error(ErrorKind::Syntax, "unexpected end of file")),
        }
    }

    /// Expects the current token to be of a specific kind.
    /// Returns token if it matches, else error.
    fn expect(&mut self, kind: TokenKind) -> Res<Token> {
        self.expect_pred(&format!("'{}'", kind), |t| t.kind == kind)
    }

    /// Expects the current token to match a predicate.
    /// Returns token if it matches, else error.
    /// Message is prefixed with "expected ".
    fn expect_pred<P>(&mut self, message: &str, predicate: P) -> Res<Token>
    where
        P: Fn(&Token) -> bool,
    {
        if let Some(tok) = self.cur() {
            if predicate(&tok) {
                self.pos += 1;
                return Ok(tok);
            }
        }
        Err(self.error(ErrorKind::Syntax, &format!("expected {}", message)))
    }

    /// Expects the current token to be an identifier with any content.
    fn expect_identifier(&mut self, message: &str) -> Res<Token> {
        self.expect_pred(message, |t| matches!(t.kind, TokenKind::Ident(_)))
    }

    fn matches(&self, kind: TokenKind) -> bool {
        if let Some(tok) = self.cur() {
            tok.kind == kind
        } else {
            false
        }
    }

    fn matches_ident(&self) -> bool {
        matches!(self.cur(), Some(t) if matches!(t.kind, TokenKind::Ident(_)))
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
