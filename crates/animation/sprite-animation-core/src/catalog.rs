//! Name-to-definition lookup.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::data::AnimationDefinition;
use crate::error::AnimationError;

/// Ordered list of shared definitions, searched linearly by name.
///
/// Duplicate names are allowed; the first match wins.
#[derive(Debug, Clone)]
pub struct AnimationCatalog<H = String> {
    items: Vec<Arc<AnimationDefinition<H>>>,
}

impl<H> Default for AnimationCatalog<H> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<H> AnimationCatalog<H> {
    pub fn new(definitions: impl IntoIterator<Item = AnimationDefinition<H>>) -> Self {
        Self {
            items: definitions.into_iter().map(Arc::new).collect(),
        }
    }

    /// Append a definition and return the shared handle the catalog keeps.
    pub fn push(&mut self, definition: AnimationDefinition<H>) -> Arc<AnimationDefinition<H>> {
        let shared = Arc::new(definition);
        self.items.push(Arc::clone(&shared));
        shared
    }

    pub fn find(&self, name: &str) -> Result<&Arc<AnimationDefinition<H>>, AnimationError> {
        self.get(name)
            .ok_or_else(|| AnimationError::not_found(name))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Arc<AnimationDefinition<H>>> {
        self.items.iter().find(|d| d.name == name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<AnimationDefinition<H>>> {
        self.items.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|d| d.name.as_str())
    }

    /// Convert every definition's frames, keeping order (and duplicates).
    pub fn map_frames<U>(&self, mut f: impl FnMut(&H) -> U) -> AnimationCatalog<U> {
        AnimationCatalog::new(self.items.iter().map(|d| d.map_frames(&mut f)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<H: DeserializeOwned> AnimationCatalog<H> {
    /// Parse a JSON array of definitions, validating each one.
    pub fn from_json(s: &str) -> Result<Self, AnimationError> {
        let definitions: Vec<AnimationDefinition<H>> = serde_json::from_str(s)?;
        for def in &definitions {
            def.validate()?;
        }
        Ok(Self::new(definitions))
    }
}

impl<H> FromIterator<AnimationDefinition<H>> for AnimationCatalog<H> {
    fn from_iter<I: IntoIterator<Item = AnimationDefinition<H>>>(iter: I) -> Self {
        Self::new(iter)
    }
}
