use serde::Serialize;

/// Score-to-probability mapping, fixed by the class count at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// two classes: logistic of `score[1] - score[0]`
    Sigmoid,
    /// more than two classes
    Softmax,
}

impl Activation {
    #[inline]
    pub fn for_classes(n_classes: usize) -> Self {
        if n_classes == 2 {
            Activation::Sigmoid
        } else {
            Activation::Softmax
        }
    }

    /// raw scores to a probability distribution of the same length
    pub fn apply(self, scores: &[f64]) -> Vec<f64> {
        match self {
            Activation::Sigmoid => {
                debug_assert_eq!(scores.len(), 2);
                let p1 = sigmoid(scores[1] - scores[0]);
                vec![1.0 - p1, p1]
            }
            Activation::Softmax => softmax(scores),
        }
    }
}

/// Logistic function.
/// Evaluated so that `exp` never sees a large positive argument.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Softmax with the max score subtracted before exponentiating
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
