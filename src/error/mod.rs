use core::fmt;

use crate::token::{Pos, Source, SourceMap};

pub type Res<T> = Result<T, Report>;

/// Error category, stable for machine consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lex,
    Syntax,
    DuplicateField,
    DuplicateDefinition,
    UnknownType,
    UnsupportedConstruct,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Lex => "lex error",
            ErrorKind::Syntax => "syntax error",
            ErrorKind::DuplicateField => "duplicate field",
            ErrorKind::DuplicateDefinition => "duplicate definition",
            ErrorKind::UnknownType => "unknown type",
            ErrorKind::UnsupportedConstruct => "unsupported construct",
        };
        write!(f, "{}", s)
    }
}

/// A single positioned error. Parsing is fail-fast: the first Report
/// aborts the session, so there is no error set to accumulate into.
#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ErrorKind,
    pub message: String,
    pub pos: Pos,
    pub length: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Report {
    pub fn new(kind: ErrorKind, msg: &str, from: &Pos, length: usize) -> Self {
        Self {
            kind,
            message: msg.to_owned(),
            pos: from.clone(),
            length,
        }
    }

    /// Render with the line of source the error points into.
    pub fn render(&self, source: &Source) -> String {
        let line = self.pos.row + 1;
        let line_str = source.line(self.pos.row).to_owned();
        let from = self.pos.col;

        let pad = line_str.len() - line_str.trim_start().len();
        let point_start = if from < pad { 1 } else { from - pad };

        format!(
            "{}\n{}: {}\n    |\n{:<3} |    {}\n    |    {}{}\n",
            source.filepath,
            self.kind,
            self.message,
            line,
            line_str.trim(),
            " ".repeat(point_start),
            "^".repeat(self.length.max(1)),
        )
    }

    /// Render against a source map, falling back to a bare message when
    /// the source is not registered (should not happen in practice).
    pub fn render_map(&self, map: &SourceMap) -> String {
        match map.get(self.pos.source_id) {
            Some(source) => self.render(source),
            None => format!("{}: {}", self.kind, self.message),
        }
    }
}
