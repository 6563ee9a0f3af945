use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, enabled, trace, Level};

use super::feature_gen::FeatureGenerator;
use super::iis_context::IisContext;
use super::model_writer::ModelWriter;
use super::params::IisParams;
use crate::classifier::Classifier;
use crate::dataset::Instance;
use crate::error::{Error, Result};
use crate::feature::FeatureFunction;

/// Maximum Entropy model trained with Improved Iterative Scaling
///
/// Owns the training instances, the generated feature functions, their
/// weights and empirical expectations. Training can be resumed by calling
/// [`MaxEnt::train`] again.
#[derive(Debug)]
pub struct MaxEnt {
    /// Training instances
    instances: Vec<Instance>,
    /// Feature functions and label/feature bookkeeping
    fgen: FeatureGenerator,
    /// One weight per feature function
    weights: Vec<f64>,
    /// Empirical expectation of each feature function
    empirical_expects: Vec<f64>,
    /// p(y|x) and f# tables
    ctx: IisContext,
    /// Training parameters
    params: IisParams,
}

impl MaxEnt {
    /// Build an untrained model with default parameters
    pub fn new(instances: Vec<Instance>) -> Result<Self> {
        Self::with_params(instances, IisParams::default())
    }

    /// Build an untrained model
    pub fn with_params(instances: Vec<Instance>, params: IisParams) -> Result<Self> {
        let fgen = FeatureGenerator::generate(&instances)?;
        let empirical_expects = fgen.empirical_expectations(&instances);
        let ctx = IisContext::new(&fgen);
        let weights = vec![0.0; fgen.num_functions()];
        Ok(Self {
            instances,
            fgen,
            weights,
            empirical_expects,
            ctx,
            params,
        })
    }

    /// Get training parameters
    pub fn params(&self) -> &IisParams {
        &self.params
    }

    /// Get training parameters for mutation
    pub fn params_mut(&mut self) -> &mut IisParams {
        &mut self.params
    }

    pub fn num_instances(&self) -> usize {
        self.instances.len()
    }

    /// Number of distinct feature vectors in the training set
    pub fn num_distinct_features(&self) -> usize {
        self.fgen.features.len()
    }

    pub fn num_functions(&self) -> usize {
        self.fgen.num_functions()
    }

    pub fn num_dims(&self) -> usize {
        self.fgen.num_dims()
    }

    pub fn min_label(&self) -> i32 {
        self.fgen.min_label()
    }

    pub fn max_label(&self) -> i32 {
        self.fgen.max_label()
    }

    /// Feature functions in weight order
    pub fn functions(&self) -> &[FeatureFunction] {
        &self.fgen.functions
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Replace the weight vector, e.g. to resume training from saved weights
    pub fn set_weights(&mut self, weights: &[f64]) -> Result<()> {
        if weights.len() != self.weights.len() {
            return Err(Error::invalid_input(format!(
                "weights length ({}) must equal number of feature functions ({})",
                weights.len(),
                self.weights.len()
            )));
        }
        self.weights.copy_from_slice(weights);
        Ok(())
    }

    pub fn empirical_expectations(&self) -> &[f64] {
        &self.empirical_expects
    }

    /// Run IIS.
    ///
    /// Each pass solves every feature function in generation order and commits
    /// its delta before solving the next one. On error the weights are
    /// restored to their value before the call.
    pub fn train(&mut self) -> Result<()> {
        let initial = self.weights.clone();
        let result = self.iterate();
        if result.is_err() {
            self.weights = initial;
        }
        result
    }

    fn iterate(&mut self) -> Result<()> {
        let max_iterations = self.params.max_iterations();
        let epsilon = self.params.epsilon();

        for k in 0..max_iterations {
            let mut max_delta = 0.0f64;
            for fid in 0..self.fgen.num_functions() {
                let delta = self.solve_delta(self.empirical_expects[fid], fid)?;
                self.weights[fid] += delta;
                max_delta = max_delta.max(delta.abs());
            }

            if enabled!(Level::DEBUG) {
                let log_likelihood = self.log_likelihood();
                debug!(iteration = k + 1, max_delta, log_likelihood, "IIS pass");
            }

            if max_delta < epsilon {
                debug!(iteration = k + 1, "IIS converged");
                break;
            }
        }
        Ok(())
    }

    /// Solve the IIS update for function `fid` with Newton-Raphson.
    ///
    /// Finds `delta` such that
    /// `e = 1/N sum_i sum_y p(y|x_i) f(x_i, y) exp(delta * f#(x_i, y))`.
    pub(crate) fn solve_delta(&mut self, empirical: f64, fid: usize) -> Result<f64> {
        self.ctx.compute_probabilities(&self.fgen, &self.weights);

        let function = self.fgen.functions[fid];
        let li = self
            .fgen
            .label_index(function.label)
            .ok_or_else(|| Error::invalid_input("feature function label out of range"))?;
        let n = self.instances.len() as f64;
        let max_iterations = self.params.newton_max_iterations();
        let tolerance = self.params.newton_tolerance();
        let step_epsilon = self.params.newton_epsilon();

        let mut delta = 0.0;
        for iter in 0..max_iterations {
            let mut f_newton = 0.0;
            let mut df_newton = 0.0;
            for (inst, &x) in self.instances.iter().zip(&self.fgen.ordinals) {
                if function.apply(&inst.feature, function.label) == 0 {
                    continue;
                }
                let f_sharp = self.ctx.f_sharp(x, li);
                let prod = self.ctx.prob(x, li) * (delta * f_sharp).exp();
                f_newton += prod;
                df_newton += prod * f_sharp;
            }
            let g = empirical - f_newton / n;
            let dg = -df_newton / n;

            if g.abs() < tolerance {
                trace!(function = fid, iterations = iter, delta, "Newton converged");
                return Ok(delta);
            }

            let ratio = g / dg;
            if !ratio.is_finite() {
                return Err(Error::NonConvergence {
                    function: fid,
                    iterations: iter + 1,
                });
            }
            delta -= ratio;
            if ratio.abs() < step_epsilon {
                trace!(function = fid, iterations = iter + 1, delta, "Newton converged");
                return Ok(delta);
            }
        }

        Err(Error::NonConvergence {
            function: fid,
            iterations: max_iterations,
        })
    }

    /// p(y|x) under the current weights.
    ///
    /// One row per distinct training feature in first-seen order, one column
    /// per label from `min_label` to `max_label`.
    pub fn conditional_probabilities(&self) -> Vec<Vec<f64>> {
        IisContext::conditional_table(&self.fgen, &self.weights)
            .rows()
            .into_iter()
            .map(|row| row.to_vec())
            .collect()
    }

    /// Average log-probability of the training labels
    pub fn log_likelihood(&self) -> f64 {
        let table = IisContext::conditional_table(&self.fgen, &self.weights);
        let sum: f64 = self
            .instances
            .iter()
            .zip(&self.fgen.ordinals)
            .filter_map(|(inst, &x)| {
                self.fgen
                    .label_index(inst.label)
                    .map(|l| table[[x as usize, l]].ln())
            })
            .sum();
        sum / self.instances.len() as f64
    }

    /// Classifier over the current weights
    pub fn classifier(&self) -> Classifier<'_> {
        Classifier::new(
            &self.fgen.functions,
            &self.weights,
            self.fgen.min_label(),
            self.fgen.max_label(),
        )
    }

    /// Predict the label of an instance; its own label is ignored
    pub fn classify(&self, instance: &Instance) -> i32 {
        self.classifier().classify(&instance.feature)
    }

    /// Write the feature functions and weights
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        ModelWriter::write(
            writer,
            &self.fgen.functions,
            &self.weights,
            self.fgen.num_dims(),
            self.fgen.min_label(),
            self.fgen.max_label(),
        )
    }

    /// Save the feature functions and weights to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
