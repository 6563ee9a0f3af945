use std::collections::HashMap;

use crate::dataset::Feature;

/// Distinct feature vectors in first-seen order, with ordinal lookup by value
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    /// Map from feature to ordinal
    index: HashMap<Feature, u32>,
    /// Map from ordinal to feature
    features: Vec<Feature>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Get or create the ordinal of a feature
    pub fn get_or_insert(&mut self, feature: &Feature) -> u32 {
        if let Some(&id) = self.index.get(feature) {
            id
        } else {
            let id = self.features.len() as u32;
            self.index.insert(feature.clone(), id);
            self.features.push(feature.clone());
            id
        }
    }

    /// Iterate over distinct features in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = &Feature> + '_ {
        self.features.iter()
    }
}
