mod decl;
mod parser;

pub use decl::*;
pub use parser::{ident_text, parse};

#[cfg(test)]
mod parser_test;
