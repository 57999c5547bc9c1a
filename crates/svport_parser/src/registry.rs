//! Symbol table of user-defined types visible to the type resolver.

use std::collections::BTreeMap;
use svport_model::DataType;

/// Maps type names to the composite types they denote.
///
/// Filled by the typedef pass and extended by `parameter type` aliases.
/// An alias entry holds a clone of the target's [`DataType`], which shares
/// the same underlying composite object.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, DataType>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the type registered under `name`.
    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.types.get(name)
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registers `data_type` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, data_type: DataType) {
        self.types.insert(name.into(), data_type);
    }

    /// Registers `alias` as another name for the type called `target`.
    ///
    /// Returns `false` (and changes nothing) if `target` is not registered.
    pub fn alias(&mut self, alias: &str, target: &str) -> bool {
        match self.types.get(target).cloned() {
            Some(data_type) => {
                self.types.insert(alias.to_string(), data_type);
                true
            }
            None => false,
        }
    }

    /// Iterates over `(name, type)` entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataType)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Returns the number of registered names, aliases included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
