use std::ops::RangeInclusive;

use super::feature_set::FeatureSet;
use crate::dataset::{Feature, Instance};
use crate::error::{Error, Result};
use crate::feature::FeatureFunction;

/// Upper bound on the number of generated feature functions
pub const MAX_FUNCTIONS: usize = 1 << 28;

/// Feature function generator for IIS training
///
/// Functions are emitted dimension-major, then by value, then by label. The
/// weight vector is indexed in this order everywhere else.
#[derive(Debug, Clone)]
pub struct FeatureGenerator {
    /// All feature functions
    pub functions: Vec<FeatureFunction>,
    /// Distinct training features in first-seen order
    pub features: FeatureSet,
    /// Ordinal into `features` for every training instance
    pub ordinals: Vec<u32>,
    /// Largest observed value per dimension
    max_values: Vec<u32>,
    /// Index of the first function of each dimension
    offsets: Vec<usize>,
    min_label: i32,
    max_label: i32,
}

impl FeatureGenerator {
    /// Generate feature functions from training instances.
    ///
    /// Every (dimension, value, label) combination within the observed ranges
    /// gets a function, including combinations that never co-occur.
    pub fn generate(instances: &[Instance]) -> Result<Self> {
        let first = instances.first().ok_or(Error::EmptyTrainingSet)?;
        let num_dims = first.feature.len();
        if num_dims == 0 {
            return Err(Error::invalid_input(
                "instances must have at least one feature dimension",
            ));
        }

        let mut min_label = i32::MAX;
        let mut max_label = i32::MIN;
        let mut max_values = vec![0u32; num_dims];
        let mut features = FeatureSet::new();
        let mut ordinals = Vec::with_capacity(instances.len());

        for (index, inst) in instances.iter().enumerate() {
            let values = inst.feature.values();
            if values.len() != num_dims {
                return Err(Error::DimensionMismatch {
                    index,
                    expected: num_dims,
                    actual: values.len(),
                });
            }
            min_label = min_label.min(inst.label);
            max_label = max_label.max(inst.label);
            for (max, &value) in max_values.iter_mut().zip(values) {
                *max = (*max).max(value);
            }
            ordinals.push(features.get_or_insert(&inst.feature));
        }

        let num_labels = usize::try_from(i64::from(max_label) - i64::from(min_label) + 1)
            .map_err(|_| Error::invalid_input("label range too large"))?;

        let mut offsets = Vec::with_capacity(num_dims);
        let mut num_functions = 0usize;
        for &max in &max_values {
            offsets.push(num_functions);
            num_functions = (max as usize + 1)
                .checked_mul(num_labels)
                .and_then(|n| n.checked_add(num_functions))
                .filter(|&n| n <= MAX_FUNCTIONS)
                .ok_or_else(|| {
                    Error::invalid_input(format!(
                        "too many feature functions, at most {} are supported",
                        MAX_FUNCTIONS
                    ))
                })?;
        }

        let mut functions = Vec::with_capacity(num_functions);
        for (dim, &max) in max_values.iter().enumerate() {
            for value in 0..=max {
                for label in min_label..=max_label {
                    functions.push(FeatureFunction::new(dim, value, label));
                }
            }
        }

        Ok(Self {
            functions,
            features,
            ordinals,
            max_values,
            offsets,
            min_label,
            max_label,
        })
    }

    /// Get the number of feature functions
    pub fn num_functions(&self) -> usize {
        self.functions.len()
    }

    /// Number of feature dimensions
    pub fn num_dims(&self) -> usize {
        self.max_values.len()
    }

    /// Number of labels in `[min_label, max_label]`
    pub fn num_labels(&self) -> usize {
        (i64::from(self.max_label) - i64::from(self.min_label) + 1) as usize
    }

    pub fn min_label(&self) -> i32 {
        self.min_label
    }

    pub fn max_label(&self) -> i32 {
        self.max_label
    }

    /// Candidate labels in ascending order
    pub fn labels(&self) -> RangeInclusive<i32> {
        self.min_label..=self.max_label
    }

    /// Position of `label` within the label range
    pub fn label_index(&self, label: i32) -> Option<usize> {
        if label < self.min_label || label > self.max_label {
            return None;
        }
        Some((i64::from(label) - i64::from(self.min_label)) as usize)
    }

    /// Index of the function for (dim, value, label), if one was generated
    pub fn function_index(&self, dim: usize, value: u32, label: i32) -> Option<usize> {
        let max = *self.max_values.get(dim)?;
        if value > max {
            return None;
        }
        let li = self.label_index(label)?;
        Some(self.offsets[dim] + value as usize * self.num_labels() + li)
    }

    /// Indices of the functions firing for (feature, label), in ascending order
    ///
    /// At most one function fires per dimension.
    pub fn active_functions<'a>(
        &'a self,
        feature: &'a Feature,
        label: i32,
    ) -> impl Iterator<Item = usize> + 'a {
        feature
            .values()
            .iter()
            .enumerate()
            .filter_map(move |(dim, &value)| self.function_index(dim, value, label))
    }

    /// Fraction of training instances on which each function fires for the
    /// instance's own label
    pub fn empirical_expectations(&self, instances: &[Instance]) -> Vec<f64> {
        let mut expects = vec![0.0; self.num_functions()];
        for inst in instances {
            for fid in self.active_functions(&inst.feature, inst.label) {
                expects[fid] += 1.0;
            }
        }
        let n = instances.len() as f64;
        for e in &mut expects {
            *e /= n;
        }
        expects
    }
}
