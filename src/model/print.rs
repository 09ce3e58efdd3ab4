use crate::model::TypeModel;

/// Human-readable layout dump, one block per struct in declaration
/// order. Offsets are printed in a fixed-width column so padding gaps
/// stand out when reading.
pub fn print_model(model: &TypeModel) -> String {
    let mut out = String::new();

    for s in &model.structs {
        out += &format!("struct {} (size={} align={})\n", s.name, s.size, s.align);
        for field in &s.fields {
            out += &format!("    {:<6} {:<24} {}\n", field.offset, field.name, field.ty);
        }
        out += "\n";
    }

    out
}
