use super::*;
use crate::error::ErrorKind;

fn scan_kinds(src: &str) -> Vec<TokenKind> {
    let source = Source::new_from_string(src);
    scan(&source)
        .unwrap_or_else(|err| panic!("unexpected error: {}", err.message))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_scan_simple_typedef() {
    let kinds = scan_kinds("typedef struct { int x; } Point;");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Typedef,
            TokenKind::Struct,
            TokenKind::LBrace,
            TokenKind::Int,
            TokenKind::Ident("x".into()),
            TokenKind::Semi,
            TokenKind::RBrace,
            TokenKind::Ident("Point".into()),
            TokenKind::Semi,
        ]
    );
}

#[test]
fn test_scan_array_dims() {
    let kinds = scan_kinds("float m[3][3];");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Float,
            TokenKind::Ident("m".into()),
            TokenKind::LBrack,
            TokenKind::IntLit(3),
            TokenKind::RBrack,
            TokenKind::LBrack,
            TokenKind::IntLit(3),
            TokenKind::RBrack,
            TokenKind::Semi,
        ]
    );
}

#[test]
fn test_scan_comments_ignored() {
    let kinds = scan_kinds("// leading comment\nint /* inline */ x;");
    assert_eq!(
        kinds,
        vec![
            TokenKind::Int,
            TokenKind::Ident("x".into()),
            TokenKind::Semi,
        ]
    );
}

#[test]
fn test_scan_positions() {
    let source = Source::new_from_string("int x;\nchar y;");
    let tokens = scan(&source).unwrap();

    // 'char' is the first token on the second line
    let tok = &tokens[3];
    assert_eq!(tok.kind, TokenKind::Char);
    assert_eq!(tok.pos.row, 1);
    assert_eq!(tok.pos.col, 0);

    // 'y' follows at column 5
    let tok = &tokens[4];
    assert_eq!(tok.pos.row, 1);
    assert_eq!(tok.pos.col, 5);
}

#[test]
fn test_scan_multiline_block_comment() {
    let source = Source::new_from_string("/* first\nsecond */ int x;");
    let tokens = scan(&source).unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[0].pos.row, 1);
}

#[test]
fn test_scan_unrecognized_character() {
    let source = Source::new_from_string("int x @;");
    let err = scan(&source).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
    assert_eq!(err.pos.col, 6);
}

#[test]
fn test_scan_unterminated_block_comment() {
    let source = Source::new_from_string("int x; /* no end");
    let err = scan(&source).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Lex);
}
