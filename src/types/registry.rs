use std::collections::HashMap;

use crate::types::StructLayout;

/// Append-only map of typedef name to finalized struct layout, owned by
/// exactly one parse session. Declaration order is preserved for the
/// output model.
pub struct TypeRegistry {
    structs: HashMap<String, StructLayout>,
    order: Vec<String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            structs: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StructLayout> {
        self.structs.get(name)
    }

    /// Insert a finalized layout. The resolver checks for redefinition
    /// before resolving, so a duplicate here is a bug.
    pub fn insert(&mut self, layout: StructLayout) {
        assert!(
            !self.contains(&layout.name),
            "registry already contains '{}'",
            layout.name
        );

        self.order.push(layout.name.clone());
        self.structs.insert(layout.name.clone(), layout);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Consume the registry into declaration-ordered layouts.
    pub fn into_ordered(mut self) -> Vec<StructLayout> {
        self.order
            .iter()
            .filter_map(|name| self.structs.remove(name))
            .collect()
    }
}
