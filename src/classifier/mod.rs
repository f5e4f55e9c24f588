pub mod activation;

use std::collections::HashSet;

use crate::classifier::activation::Activation;
use crate::error::{DimensionMismatchError, ModelLoadError};
use crate::utils::math::vector::math::l2_norm;
use crate::vectorizer::FeatureVector;

/// Linear (logistic-regression style) classifier over TF-IDF features.
///
/// One weight row and one bias per class. Rows are index-aligned with
/// `labels`, and every probability distribution it returns follows the
/// same order.
#[derive(Debug, Clone)]
pub struct Classifier {
    labels: Vec<String>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
    activation: Activation,
}

impl Classifier {
    /// Build a classifier from fitted weights.
    ///
    /// A two-class model may be given in compact form: a single row and a
    /// single bias holding the score of class 1 relative to class 0. It is
    /// expanded to rows `[0; V], row` and biases `[0, bias]`.
    pub fn new(
        labels: Vec<String>,
        mut coef: Vec<Vec<f64>>,
        mut intercept: Vec<f64>,
        n_features: usize,
    ) -> Result<Self, ModelLoadError> {
        if labels.len() < 2 {
            return Err(ModelLoadError::inconsistent(format!(
                "need at least 2 class labels, got {}",
                labels.len()
            )));
        }
        {
            let mut seen = HashSet::with_capacity(labels.len());
            if let Some(dup) = labels.iter().find(|label| !seen.insert(label.as_str())) {
                return Err(ModelLoadError::inconsistent(format!(
                    "duplicate class label {dup:?}"
                )));
            }
        }

        if labels.len() == 2 && coef.len() == 1 && intercept.len() == 1 {
            coef.insert(0, vec![0.0; coef[0].len()]);
            intercept.insert(0, 0.0);
        }
        if coef.len() != labels.len() {
            return Err(ModelLoadError::inconsistent(format!(
                "weight matrix has {} rows but there are {} labels",
                coef.len(),
                labels.len()
            )));
        }
        if intercept.len() != coef.len() {
            return Err(ModelLoadError::inconsistent(format!(
                "weight matrix has {} rows but {} biases",
                coef.len(),
                intercept.len()
            )));
        }
        for (row_idx, row) in coef.iter().enumerate() {
            if row.len() != n_features {
                return Err(ModelLoadError::inconsistent(format!(
                    "weight row {} has length {} but vocabulary size is {}",
                    row_idx,
                    row.len(),
                    n_features
                )));
            }
            if row.iter().any(|w| !w.is_finite()) {
                return Err(ModelLoadError::inconsistent(format!(
                    "weight row {row_idx} contains a non-finite value"
                )));
            }
        }
        if intercept.iter().any(|b| !b.is_finite()) {
            return Err(ModelLoadError::inconsistent("bias vector contains a non-finite value"));
        }
        // features have norm <= 1, so |score_c| <= ||row_c|| + |bias_c|
        for (row_idx, (row, bias)) in coef.iter().zip(&intercept).enumerate() {
            if !(l2_norm(row) + bias.abs()).is_finite() {
                return Err(ModelLoadError::inconsistent(format!(
                    "weight row {row_idx} is large enough for its score to overflow"
                )));
            }
        }

        let activation = Activation::for_classes(labels.len());
        Ok(Self {
            labels,
            coef,
            intercept,
            n_features,
            activation,
        })
    }

    #[inline]
    fn check_dim(&self, features: &FeatureVector) -> Result<(), DimensionMismatchError> {
        if features.len() != self.n_features {
            return Err(DimensionMismatchError {
                expected: self.n_features,
                found: features.len(),
            });
        }
        Ok(())
    }

    /// Raw score per class: `row_c · features + bias_c`
    pub fn decision_function(
        &self,
        features: &FeatureVector,
    ) -> Result<Vec<f64>, DimensionMismatchError> {
        self.check_dim(features)?;
        Ok(self.scores(features))
    }

    /// Probability per class, in label order
    pub fn predict_proba(
        &self,
        features: &FeatureVector,
    ) -> Result<Vec<f64>, DimensionMismatchError> {
        self.check_dim(features)?;
        Ok(self.probabilities(features))
    }

    /// Label with the highest probability.
    /// Exact ties resolve to the lowest class index.
    pub fn predict(&self, features: &FeatureVector) -> Result<&str, DimensionMismatchError> {
        let proba = self.predict_proba(features)?;
        Ok(&self.labels[argmax(&proba)])
    }

    // caller guarantees `features.len() == n_features`
    pub(crate) fn scores(&self, features: &FeatureVector) -> Vec<f64> {
        debug_assert_eq!(features.len(), self.n_features);
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| features.dot_dense(row.as_slice()) + bias)
            .collect()
    }

    pub(crate) fn probabilities(&self, features: &FeatureVector) -> Vec<f64> {
        self.activation.apply(&self.scores(features))
    }

    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    #[inline]
    pub fn coef(&self) -> &[Vec<f64>] {
        &self.coef
    }

    #[inline]
    pub fn intercept(&self) -> &[f64] {
        &self.intercept
    }
}

/// index of the first maximum
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}
