use super::error::RegistryError;
use serde_json::Value;
use std::collections::HashMap;

/// Something that can be stored in a [`Registry`] and shown in a catalog.
pub trait Capability {
    fn name(&self) -> &str;

    /// Serialized description presented to the model.
    fn describe(&self) -> Value;
}

/// Capabilities indexed by lower-cased name.
///
/// Keeps insertion order so the catalog shown to the model is stable.
pub struct Registry<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Capability> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, failing on the first name collision.
    pub fn try_from_iter<I>(items: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut registry = Self::new();
        for item in items {
            registry.insert(item)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, item: T) -> Result<(), RegistryError> {
        let key = item.name().trim().to_lowercase();
        if key.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(&key) {
            return Err(RegistryError::Duplicate {
                name: item.name().to_string(),
            });
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(item);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.index
            .get(&name.trim().to_lowercase())
            .map(|&position| &self.entries[position])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        match self.index.get(&name.trim().to_lowercase()) {
            Some(&position) => self.entries.get_mut(position),
            None => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn catalog(&self) -> Vec<Value> {
        self.entries.iter().map(Capability::describe).collect()
    }
}
