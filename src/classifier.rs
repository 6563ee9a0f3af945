use crate::dataset::{Feature, Instance};
use crate::feature::FeatureFunction;

/// The classifier predicts labels for feature vectors using trained weights
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    /// Feature functions, in weight order
    functions: &'a [FeatureFunction],
    /// One weight per feature function
    weights: &'a [f64],
    min_label: i32,
    max_label: i32,
}

impl<'a> Classifier<'a> {
    pub(crate) fn new(
        functions: &'a [FeatureFunction],
        weights: &'a [f64],
        min_label: i32,
        max_label: i32,
    ) -> Self {
        debug_assert_eq!(functions.len(), weights.len());
        Self {
            functions,
            weights,
            min_label,
            max_label,
        }
    }

    /// Score of every candidate label, lowest label first.
    ///
    /// The score of label `y` is `sum_j exp(w_j * f_j(feature, y))`.
    pub fn scores(&self, feature: &Feature) -> Vec<f64> {
        (self.min_label..=self.max_label)
            .map(|label| self.score(feature, label))
            .collect()
    }

    fn score(&self, feature: &Feature, label: i32) -> f64 {
        self.functions
            .iter()
            .zip(self.weights)
            .map(|(function, &w)| (w * f64::from(function.apply(feature, label))).exp())
            .sum()
    }

    /// Predict the label of a feature vector.
    ///
    /// Returns the label with the strictly largest score; ties keep the
    /// smallest label. Values or dimensions never seen in training simply
    /// fire no function.
    pub fn classify(&self, feature: &Feature) -> i32 {
        let mut max = 0.0;
        let mut label = self.min_label;
        for y in self.min_label..=self.max_label {
            let sum = self.score(feature, y);
            if sum > max {
                max = sum;
                label = y;
            }
        }
        label
    }

    /// Fraction of instances whose predicted label equals their own label
    pub fn accuracy(&self, instances: &[Instance]) -> f64 {
        if instances.is_empty() {
            return 0.0;
        }
        let pass = instances
            .iter()
            .filter(|inst| self.classify(&inst.feature) == inst.label)
            .count();
        pass as f64 / instances.len() as f64
    }
}
