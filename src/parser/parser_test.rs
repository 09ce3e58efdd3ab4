use super::*;
use crate::{
    error::ErrorKind,
    token::{Source, scan},
};

fn parse_str(src: &str) -> crate::error::Res<Vec<StructDecl>> {
    let source = Source::new_from_string(src);
    scan(&source).and_then(|toks| parse(&source, toks))
}

fn parse_one(src: &str) -> StructDecl {
    let mut decls = parse_str(src).unwrap_or_else(|err| {
        panic!("unexpected error: {}: {}", err.kind, err.message);
    });
    assert_eq!(decls.len(), 1);
    decls.pop().unwrap()
}

fn assert_error(src: &str, kind: ErrorKind) {
    match parse_str(src) {
        Ok(_) => panic!("expected {} error", kind),
        Err(err) => assert_eq!(err.kind, kind, "message: {}", err.message),
    }
}

#[test]
fn test_parse_single_struct() {
    let decl = parse_one("typedef struct { int x; int y; } Point;");
    assert_eq!(ident_text(&decl.name), "Point");
    assert_eq!(decl.fields.len(), 2);
    assert_eq!(ident_text(&decl.fields[0].name), "x");
    assert_eq!(decl.fields[0].type_name, "int");
    assert!(decl.fields[0].dims.is_empty());
}

#[test]
fn test_parse_multiword_type_names() {
    let decl = parse_one(
        r#"
        typedef struct {
            unsigned char a;
            unsigned long long b;
            signed char c;
            long double d;
        } Words;
    "#,
    );

    let names: Vec<&str> = decl.fields.iter().map(|f| f.type_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["unsigned char", "unsigned long long", "signed char", "long double"]
    );
}

#[test]
fn test_parse_array_dims() {
    let decl = parse_one(
        r#"
        typedef struct {
            float rotation[3];
            float calibration_matrix[3][3];
        } M;
    "#,
    );

    assert_eq!(decl.fields[0].dims, vec![3]);
    assert_eq!(decl.fields[1].dims, vec![3, 3]);
}

#[test]
fn test_parse_struct_tag_ignored() {
    let decl = parse_one("typedef struct tagPoint { int x; } Point;");
    assert_eq!(ident_text(&decl.name), "Point");
}

#[test]
fn test_parse_multiple_structs_in_order() {
    let decls = parse_str(
        r#"
        typedef struct { int8_t x; } A;
        typedef struct { A a; } B;
    "#,
    )
    .unwrap();

    assert_eq!(decls.len(), 2);
    assert_eq!(ident_text(&decls[0].name), "A");
    assert_eq!(ident_text(&decls[1].name), "B");
    assert_eq!(decls[1].fields[0].type_name, "A");
}

#[test]
fn test_parse_errors() {
    // Grammar violations
    assert_error("typedef struct { int x } P;", ErrorKind::Syntax);
    assert_error("typedef struct { } P;", ErrorKind::Syntax);
    assert_error("typedef struct { int x; }", ErrorKind::Syntax);
    assert_error("typedef struct { int x[0]; } P;", ErrorKind::Syntax);
    assert_error("typedef struct { int x[]; } P;", ErrorKind::Syntax);
    assert_error("typedef struct { int x;", ErrorKind::Syntax);

    // Duplicate field names
    assert_error("typedef struct { int x; int x; } P;", ErrorKind::DuplicateField);
}

#[test]
fn test_parse_unsupported_constructs() {
    let unsupported = [
        "typedef union { int x; } U;",
        "typedef enum { A, B } E;",
        "typedef struct { int *p; } P;",
        "typedef struct { int x : 3; } P;",
        "typedef struct { int (*f)(void); } P;",
        "typedef struct { struct { int x; } inner; } P;",
        "typedef struct { struct Other o; } P;",
        "typedef struct Fwd Fwd;",
    ];

    for src in unsupported {
        assert_error(src, ErrorKind::UnsupportedConstruct);
    }
}

#[test]
fn test_unknown_type_is_not_a_parse_error() {
    // Unresolved type names are the resolver's concern, not the parser's
    let decl = parse_one("typedef struct { badtype x; } P;");
    assert_eq!(decl.fields[0].type_name, "badtype");
}

#[test]
fn test_syntax_error_has_position() {
    let err = parse_str("typedef struct {\n    int x\n} P;").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Syntax);
    // Error points at the '}' where ';' was expected
    assert_eq!(err.pos.row, 2);
}
