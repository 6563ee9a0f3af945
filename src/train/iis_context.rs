use ndarray::Array2;

use super::feature_gen::FeatureGenerator;

/// Scratch tables for IIS training
#[derive(Debug, Clone)]
pub struct IisContext {
    /// Conditional probabilities p(y|x)
    ///
    /// This is a `[X][L]` matrix whose element `[x][l]` is the probability of
    /// label #l given distinct feature #x under the current weights.
    cond_prob: Array2<f64>,
    /// Active function counts f#(x, y)
    ///
    /// This is a `[X][L]` matrix whose element `[x][l]` is the number of
    /// feature functions firing for distinct feature #x and label #l. It does
    /// not depend on the weights.
    f_sharp: Array2<f64>,
}

impl IisContext {
    /// Create a new context sized for the generator's distinct features
    pub fn new(fgen: &FeatureGenerator) -> Self {
        let num_features = fgen.features.len();
        let num_labels = fgen.num_labels();
        let mut f_sharp = Array2::zeros((num_features, num_labels));
        for (x, feature) in fgen.features.iter().enumerate() {
            for (l, label) in fgen.labels().enumerate() {
                f_sharp[[x, l]] = fgen.active_functions(feature, label).count() as f64;
            }
        }
        Self {
            cond_prob: Array2::zeros((num_features, num_labels)),
            f_sharp,
        }
    }

    /// Recompute p(y|x) for every distinct feature from `weights`
    pub fn compute_probabilities(&mut self, fgen: &FeatureGenerator, weights: &[f64]) {
        fill_probabilities(&mut self.cond_prob, fgen, weights);
    }

    /// A fresh p(y|x) table for `weights`, leaving any context untouched
    pub fn conditional_table(fgen: &FeatureGenerator, weights: &[f64]) -> Array2<f64> {
        let mut table = Array2::zeros((fgen.features.len(), fgen.num_labels()));
        fill_probabilities(&mut table, fgen, weights);
        table
    }

    /// p(y|x) for distinct feature `x` and label index `l`
    #[inline]
    pub fn prob(&self, x: u32, l: usize) -> f64 {
        self.cond_prob[[x as usize, l]]
    }

    /// f#(x, y) for distinct feature `x` and label index `l`
    #[inline]
    pub fn f_sharp(&self, x: u32, l: usize) -> f64 {
        self.f_sharp[[x as usize, l]]
    }

    /// The current p(y|x) table
    #[cfg(test)]
    pub fn probabilities(&self) -> &Array2<f64> {
        &self.cond_prob
    }
}

fn fill_probabilities(table: &mut Array2<f64>, fgen: &FeatureGenerator, weights: &[f64]) {
    for (x, feature) in fgen.features.iter().enumerate() {
        let mut row = table.row_mut(x);
        for (l, label) in fgen.labels().enumerate() {
            row[l] = fgen
                .active_functions(feature, label)
                .map(|fid| weights[fid])
                .sum::<f64>();
        }
        // Shift by the largest score before exponentiating
        let max = row.fold(f64::NEG_INFINITY, |m, &z| m.max(z));
        row.mapv_inplace(|z| (z - max).exp());
        let normalize = row.sum();
        row.mapv_inplace(|p| p / normalize);
    }
}
