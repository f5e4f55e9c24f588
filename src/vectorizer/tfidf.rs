use serde::{Deserialize, Serialize};

/// Term-frequency convention of a loaded model.
///
/// Must match the convention the persisted IDF vector was fitted under,
/// so it lives in the artifact and is fixed for the model's lifetime.
/// - `Raw`: tf = count (default)
/// - `Sublinear`: tf = 1 + ln(count)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TfScaling {
    #[default]
    Raw,
    Sublinear,
}

impl TfScaling {
    /// tf for a term seen `count` times, `count >= 1`
    #[inline]
    pub fn tf(self, count: u32) -> f64 {
        match self {
            TfScaling::Raw => count as f64,
            TfScaling::Sublinear => 1.0 + (count as f64).ln(),
        }
    }

    /// weighted value of one feature
    #[inline]
    pub fn tf_idf(self, count: u32, idf: f64) -> f64 {
        self.tf(count) * idf
    }
}
