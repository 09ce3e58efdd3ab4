use tracing::debug;

use crate::{
    config::AbiProfile,
    error::{ErrorKind, Report, Res},
    parser::{StructDecl, ident_text},
    types::{StructLayout, TypeDesc, TypeRegistry, array_of, lay_out, primitive_from_name},
};

/// Resolve an unresolved declaration against the registry and lay it
/// out. Field base types must be primitives or structs already in the
/// registry, which is what enforces definition-before-use ordering.
pub fn resolve(
    decl: &StructDecl,
    registry: &TypeRegistry,
    profile: &AbiProfile,
) -> Res<StructLayout> {
    let name = ident_text(&decl.name);

    if registry.contains(name) {
        let msg = format!("type '{}' is already defined", name);
        return Err(Report::new(
            ErrorKind::DuplicateDefinition,
            &msg,
            &decl.name.pos,
            decl.name.length,
        ));
    }

    let mut fields = Vec::with_capacity(decl.fields.len());
    for field in &decl.fields {
        let field_name = ident_text(&field.name);

        let base = if let Some(kind) = primitive_from_name(&field.type_name) {
            TypeDesc::Primitive {
                name: kind,
                size: kind.size(profile),
                align: kind.align(profile),
            }
        } else if let Some(s) = registry.get(&field.type_name) {
            TypeDesc::Struct {
                name: s.name.clone(),
                size: s.size,
                align: s.align,
            }
        } else {
            let msg = format!(
                "unknown type '{}' for field '{}', types must be defined before use",
                field.type_name, field_name
            );
            return Err(Report::new(
                ErrorKind::UnknownType,
                &msg,
                &field.type_tok.pos,
                field.type_tok.length,
            ));
        };

        let ty = if field.dims.is_empty() {
            base
        } else {
            match array_of(base, field.dims.clone()) {
                Some(ty) => ty,
                None => {
                    let msg = format!("array size of field '{}' overflows", field_name);
                    return Err(Report::new(
                        ErrorKind::Syntax,
                        &msg,
                        &field.name.pos,
                        field.name.length,
                    ));
                }
            }
        };

        fields.push((field_name.to_owned(), ty));
    }

    let Some(layout) = lay_out(name, fields) else {
        let msg = format!("struct '{}' is too large, its size overflows", name);
        return Err(Report::new(
            ErrorKind::Syntax,
            &msg,
            &decl.name.pos,
            decl.name.length,
        ));
    };
    debug!(
        "resolved '{}': size={} align={}",
        layout.name, layout.size, layout.align
    );

    Ok(layout)
}
