use tracing::{debug, info, trace};

use crate::{
    error::{ErrorKind, Report, Res},
    token::{Pos, Source, Token, TokenKind, str_to_token},
};

pub fn scan(src: &Source) -> Res<Vec<Token>> {
    let scanner = Scanner::new(src);
    scanner.scan()
}

struct Scanner<'a> {
    source: &'a Source,
    pos: usize,
    row: usize,
    line_begin: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a Source) -> Self {
        Scanner {
            source,
            pos: 0,
            row: 0,
            line_begin: 0,
        }
    }

    fn scan(mut self) -> Res<Vec<Token>> {
        info!("scanning: {}", self.source.filepath);

        let mut tokens = Vec::new();

        while !self.eof() {
            let (token, consumed) = match self.cur() {
                // Whitespace tokens are ignored and not added to token list
                v if Scanner::is_whitespace(v) => (
                    Token::new(TokenKind::Whitespace, 0, self.pos()),
                    self.peek_while(Scanner::is_whitespace),
                ),

                // Newline resets row and line begin. Not significant in C,
                // consumed as whitespace.
                b'\n' => {
                    let pos = self.pos();
                    self.row += 1;
                    self.line_begin = self.pos + 1;
                    (Token::new(TokenKind::Whitespace, 0, pos), 1)
                }

                // Line comment
                b'/' if matches!(self.peek(), Some(b'/')) => {
                    let len = self.peek_while(|b| b != b'\n');
                    (Token::new(TokenKind::Whitespace, 0, self.pos()), len)
                }

                // Block comment. C block comments do not nest.
                b'/' if matches!(self.peek(), Some(b'*')) => {
                    let consumed = self.scan_block_comment()?;
                    (Token::new(TokenKind::Whitespace, 0, self.pos()), consumed)
                }

                // Identifier or keyword
                v if Scanner::is_alpha(v) => {
                    let length = self.peek_while(Scanner::is_alphanum);
                    let lexeme = self.source.str_range(self.pos, self.pos + length);

                    if let Some(k) = str_to_token(lexeme) {
                        (Token::new(k.clone(), length, self.pos()), length)
                    } else {
                        (
                            Token::new(TokenKind::Ident(lexeme.to_owned()), length, self.pos()),
                            length,
                        )
                    }
                }

                // Integer literal. Array dimensions are the only numbers
                // in the grammar, so only plain decimal is accepted.
                v if Scanner::is_number(v) => {
                    let length = self.peek_while(Scanner::is_number);
                    let lexeme = self.source.str_range(self.pos, self.pos + length);

                    match lexeme.parse() {
                        Ok(n) => (Token::new(TokenKind::IntLit(n), length, self.pos()), length),
                        _ => return Err(self.error("integer literal too large", length)),
                    }
                }

                // Single-character symbol. Reserved symbols are all
                // ASCII, so a byte-wise lookup is safe.
                c => {
                    let lexeme = (c as char).to_string();
                    match str_to_token(&lexeme) {
                        Some(kind) => (Token::new(kind.to_owned(), 1, self.pos()), 1),
                        None => {
                            let msg = format!("unrecognized character '{}'", c.escape_ascii());
                            return Err(self.error(&msg, 1));
                        }
                    }
                }
            };

            trace!("consumed token: '{:?}'", token.kind);
            self.pos += consumed;

            if !token.kind.eq(&TokenKind::Whitespace) {
                tokens.push(token);
            }
        }

        debug!("success: {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Consumes a block comment, tracking newlines inside it. Returns
    /// bytes consumed from the opening '/'.
    fn scan_block_comment(&mut self) -> Result<usize, Report> {
        let open = self.pos();
        let mut i = self.pos + 2; // Skip opening /*

        while i + 1 < self.len() {
            if self.at(i) == b'*' && self.at(i + 1) == b'/' {
                return Ok(i + 2 - self.pos);
            }

            if self.at(i) == b'\n' {
                self.row += 1;
                self.line_begin = i + 1;
            }

            i += 1;
        }

        Err(Report::new(
            ErrorKind::Lex,
            "block comment was not terminated",
            &open,
            2,
        ))
    }

    fn pos(&self) -> Pos {
        Pos {
            source_id: self.source.id,
            row: self.row,
            col: self.pos - self.line_begin,
            offset: self.pos,
            line_begin: self.line_begin,
        }
    }

    fn at(&self, pos: usize) -> u8 {
        assert!(
            pos < self.len(),
            "tried to access pos {} when src is {}",
            pos,
            self.len()
        );
        self.source.src[pos]
    }

    fn peek(&self) -> Option<u8> {
        if self.pos + 1 >= self.len() {
            None
        } else {
            Some(self.at(self.pos + 1))
        }
    }

    fn cur(&self) -> u8 {
        self.source.src[self.pos]
    }

    fn eof(&self) -> bool {
        self.pos >= self.len()
    }

    fn len(&self) -> usize {
        self.source.src.len()
    }

    fn error(&self, msg: &str, length: usize) -> Report {
        Report::new(ErrorKind::Lex, msg, &self.pos(), length)
    }

    /// Peeks bytes while predicate returns true. Returns number of bytes peeked.
    fn peek_while<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(u8) -> bool,
    {
        let mut consumed = 0;
        while self.pos + consumed < self.len() && predicate(self.source.src[self.pos + consumed]) {
            consumed += 1;
        }

        consumed
    }

    fn is_number(n: u8) -> bool {
        n >= b'0' && n <= b'9'
    }

    fn is_whitespace(b: u8) -> bool {
        b == b' ' || b == b'\t' || b == b'\r'
    }

    fn is_alpha(b: u8) -> bool {
        (b >= b'a' && b <= b'z') || (b >= b'A' && b <= b'Z') || b == b'_'
    }

    fn is_alphanum(b: u8) -> bool {
        Scanner::is_alpha(b) || Scanner::is_number(b)
    }
}
