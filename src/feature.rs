use crate::dataset::Feature;

/// A binary indicator over a (dimension, value, label) triple
///
/// Fires when a feature has `value` at `dimension` and the candidate label is
/// `label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureFunction {
    /// Feature dimension index
    pub dimension: usize,
    /// Feature value at that dimension
    pub value: u32,
    /// Target label
    pub label: i32,
}

impl FeatureFunction {
    pub fn new(dimension: usize, value: u32, label: i32) -> Self {
        Self {
            dimension,
            value,
            label,
        }
    }

    /// Evaluate the indicator, 1 when it fires and 0 otherwise
    ///
    /// A feature shorter than `dimension` never fires.
    #[inline]
    pub fn apply(&self, feature: &Feature, label: i32) -> u32 {
        (label == self.label && feature.get(self.dimension) == Some(self.value)) as u32
    }
}
