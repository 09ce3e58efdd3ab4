use std::fmt::Display;

use crate::{
    config::AbiProfile,
    error::Res,
    model::TypeModel,
    token::Source,
    types::parse_source,
};

pub fn must<T, V: Display>(res: Result<T, V>) -> T {
    res.unwrap_or_else(|err| panic!("unexpected error: {}", err))
}

/// Parse header text under the default (lp64) profile.
pub fn parse_header(src: &str) -> Res<TypeModel> {
    parse_header_with(src, &AbiProfile::default())
}

pub fn parse_header_with(src: &str, profile: &AbiProfile) -> Res<TypeModel> {
    let source = Source::new_from_string(src);
    parse_source(&source, profile)
}

/// Parse header text, panicking on error.
pub fn model_for(src: &str) -> TypeModel {
    must(parse_header(src))
}

/// Offsets of all fields of the named struct, in declaration order.
pub fn offsets_of(model: &TypeModel, name: &str) -> Vec<u64> {
    model
        .get(name)
        .unwrap_or_else(|| panic!("struct '{}' not in model", name))
        .fields
        .iter()
        .map(|f| f.offset)
        .collect()
}
