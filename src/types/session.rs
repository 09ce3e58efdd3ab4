use tracing::info;

use crate::{
    config::AbiProfile,
    error::Res,
    model::TypeModel,
    parser::parse,
    token::{Source, scan},
    types::{TypeRegistry, resolve},
};

/// One parse session: owns the registry for its lifetime and hands it
/// off as a read-only model on success. A failed session is simply
/// dropped, so partial registries never escape.
pub struct Session {
    profile: AbiProfile,
    registry: TypeRegistry,
}

impl Session {
    pub fn new(profile: AbiProfile) -> Self {
        Self {
            profile,
            registry: TypeRegistry::new(),
        }
    }

    /// Scan, parse, resolve and lay out all declarations in a source.
    /// Structs defined by earlier sources in the same session are
    /// visible to this one.
    pub fn add_source(&mut self, source: &Source) -> Res<()> {
        let tokens = scan(source)?;
        let decls = parse(source, tokens)?;

        for decl in decls {
            let layout = resolve(&decl, &self.registry, &self.profile)?;
            self.registry.insert(layout);
        }

        Ok(())
    }

    pub fn finish(self) -> TypeModel {
        info!("session complete: {} types", self.registry.len());
        TypeModel::new(self.registry, self.profile)
    }
}

/// Parse a single source into a type model.
pub fn parse_source(source: &Source, profile: &AbiProfile) -> Res<TypeModel> {
    let mut session = Session::new(profile.clone());
    session.add_source(source)?;
    Ok(session.finish())
}

/// Parse several sources, in order, into one model. Fail-fast: the
/// first error aborts and discards everything.
pub fn parse_sources<'a>(
    sources: impl IntoIterator<Item = &'a Source>,
    profile: &AbiProfile,
) -> Res<TypeModel> {
    let mut session = Session::new(profile.clone());
    for source in sources {
        session.add_source(source)?;
    }
    Ok(session.finish())
}
