use std::fmt;

/// A fixed-length vector of discrete feature values
///
/// Two features with the same value sequence compare equal and hash the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature {
    values: Vec<u32>,
}

/// An instance consists of a label and its feature vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Category id
    pub label: i32,
    /// Observed feature values
    pub feature: Feature,
}

impl Feature {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// Feature values in dimension order
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Number of feature dimensions
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at dimension `dim`, `None` past the end
    pub fn get(&self, dim: usize) -> Option<u32> {
        self.values.get(dim).copied()
    }
}

impl From<Vec<u32>> for Feature {
    fn from(values: Vec<u32>) -> Self {
        Self { values }
    }
}

impl From<&[u32]> for Feature {
    fn from(values: &[u32]) -> Self {
        Self {
            values: values.to_vec(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.values)
    }
}

impl Instance {
    pub fn new(label: i32, values: Vec<u32>) -> Self {
        Self {
            label,
            feature: Feature::new(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_feature_equality_by_value() {
        let a = Feature::new(vec![0, 1, 2]);
        let b = Feature::from(&[0u32, 1, 2][..]);
        let c = Feature::new(vec![0, 1, 3]);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let set: HashSet<Feature> = vec![a.clone(), b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_feature_access() {
        let feature = Feature::new(vec![4, 0]);
        assert_eq!(feature.len(), 2);
        assert_eq!(feature.get(0), Some(4));
        assert_eq!(feature.get(2), None);
        assert_eq!(feature.to_string(), "[4, 0]");
        assert!(Feature::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_instance_creation() {
        let inst = Instance::new(3, vec![1, 0]);
        assert_eq!(inst.label, 3);
        assert_eq!(inst.feature.values(), &[1, 0]);
    }
}
