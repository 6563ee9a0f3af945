use tracing::info;

use super::maxent::MaxEnt;
use super::params::IisParams;
use crate::dataset::Instance;
use crate::error::{Error, Result};

/// MaxEnt trainer
///
/// Collects training instances and parameters, then builds and trains a
/// [`MaxEnt`] model.
#[derive(Debug, Clone, Default)]
pub struct Trainer {
    /// Training instances
    instances: Vec<Instance>,
    /// Enable verbose output
    verbose: bool,
    /// Training parameters
    params: IisParams,
}

impl Trainer {
    /// Create a new trainer
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable verbose output
    pub fn verbose(&mut self, enabled: bool) -> &mut Self {
        self.verbose = enabled;
        self
    }

    /// Get training parameters
    pub fn params(&self) -> &IisParams {
        &self.params
    }

    /// Get training parameters for mutation
    pub fn params_mut(&mut self) -> &mut IisParams {
        &mut self.params
    }

    /// Set a training parameter by name
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.params.set(name, value)
    }

    /// Get a training parameter by name
    pub fn get(&self, name: &str) -> Result<String> {
        self.params.get(name)
    }

    /// Set maximum iterations (builder pattern)
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self> {
        self.params.set_max_iterations(max_iterations)?;
        Ok(self)
    }

    /// Set early stopping threshold (builder pattern)
    pub fn with_epsilon(mut self, epsilon: f64) -> Result<Self> {
        self.params.set_epsilon(epsilon)?;
        Ok(self)
    }

    /// Number of appended instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Append one training instance
    pub fn append(&mut self, label: i32, values: &[u32]) -> Result<()> {
        if values.is_empty() {
            return Err(Error::invalid_input(
                "empty feature vectors are not allowed",
            ));
        }
        if let Some(first) = self.instances.first() {
            if first.feature.len() != values.len() {
                return Err(Error::DimensionMismatch {
                    index: self.instances.len(),
                    expected: first.feature.len(),
                    actual: values.len(),
                });
            }
        }
        self.instances.push(Instance::new(label, values.to_vec()));
        Ok(())
    }

    /// Append already-built instances
    pub fn extend<I: IntoIterator<Item = Instance>>(&mut self, instances: I) -> Result<()> {
        for inst in instances {
            self.append(inst.label, inst.feature.values())?;
        }
        Ok(())
    }

    /// Clear all training data
    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Build a model from the appended instances and train it
    pub fn train(&self) -> Result<MaxEnt> {
        if self.instances.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }

        let mut model = MaxEnt::with_params(self.instances.clone(), self.params.clone())?;
        if self.verbose {
            info!(
                instances = model.num_instances(),
                distinct_features = model.num_distinct_features(),
                functions = model.num_functions(),
                min_label = model.min_label(),
                max_label = model.max_label(),
                "generated feature functions"
            );
        }

        model.train()?;

        if self.verbose {
            info!(
                log_likelihood = model.log_likelihood(),
                "training completed"
            );
        }
        Ok(model)
    }
}
