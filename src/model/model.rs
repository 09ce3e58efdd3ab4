use std::collections::HashMap;

use serde::Serialize;

use crate::{
    config::AbiProfile,
    types::{StructLayout, TypeRegistry},
};

/// The finalized output of a parse session: every struct fully laid
/// out, in declaration order, plus the ABI profile the sizes were
/// computed under. Read-only after construction.
#[derive(Debug, Serialize)]
pub struct TypeModel {
    pub profile: AbiProfile,
    pub structs: Vec<StructLayout>,

    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl TypeModel {
    pub(crate) fn new(registry: TypeRegistry, profile: AbiProfile) -> Self {
        let structs = registry.into_ordered();
        let index = structs
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();

        Self {
            profile,
            structs,
            index,
        }
    }

    pub fn get(&self, name: &str) -> Option<&StructLayout> {
        self.index.get(name).map(|&i| &self.structs[i])
    }

    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Serialize to the stable JSON schema consumed by code generators.
    pub fn to_json(&self, pretty: bool) -> Result<String, String> {
        let res = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };

        res.map_err(|e| format!("failed to serialize model: {}", e))
    }
}
