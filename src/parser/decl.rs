use crate::token::Token;

/// An unresolved `typedef struct` declaration: names are still raw
/// strings, nothing has been checked against the registry yet.
#[derive(Debug)]
pub struct StructDecl {
    /// Typedef name token.
    pub name: Token,
    /// Fields in declaration order.
    pub fields: Vec<FieldDecl>,
}

#[derive(Debug)]
pub struct FieldDecl {
    /// Field name token.
    pub name: Token,
    /// Raw type name, multi-word specifiers joined with single spaces,
    /// eg. 'unsigned long long'.
    pub type_name: String,
    /// First token of the type name, kept for error reporting.
    pub type_tok: Token,
    /// Array dimensions, outermost first. Empty for scalar fields.
    pub dims: Vec<u64>,
}
