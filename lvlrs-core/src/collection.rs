//! A name-keyed collection of species.

use crate::properties::Properties;
use crate::species::Species;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A collection of [`Species`] keyed by name. Pure container: adding a
/// species under an existing name replaces the previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesCollection {
    species: HashMap<String, Species>,
    properties: Properties,
}

impl SpeciesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_species(&mut self, species: Species) {
        self.species.insert(species.name().to_string(), species);
    }

    pub fn remove_species(&mut self, name: &str) -> Option<Species> {
        self.species.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Species> {
        self.species.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Species> {
        self.species.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.species.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Species> {
        self.species.values()
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    pub fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::Level;

    #[test]
    fn add_get_remove() {
        let mut collection = SpeciesCollection::new();
        let mut species = Species::new("al26");
        species.add_level(Level::new(0.0, 11));
        collection.add_species(species);

        assert_eq!(collection.len(), 1);
        assert!(collection.contains("al26"));
        assert_eq!(collection.get("al26").map(|s| s.n_levels()), Some(1));
        assert!(collection.get("fe60").is_none());

        let removed = collection.remove_species("al26");
        assert!(removed.is_some());
        assert!(collection.is_empty());
    }

    #[test]
    fn add_replaces_same_name() {
        let mut collection = SpeciesCollection::new();
        collection.add_species(Species::new("al26"));

        let mut replacement = Species::new("al26");
        replacement.add_level(Level::new(0.0, 11));
        collection.add_species(replacement);

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get("al26").map(|s| s.n_levels()), Some(1));
    }
}
