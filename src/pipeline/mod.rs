pub mod shared;

use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

use crate::classifier::{argmax, Classifier};
use crate::error::ModelLoadError;
use crate::model;
use crate::vectorizer::{FeatureVector, Vectorizer};

/// One class and its probability
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProbability {
    pub label: String,
    pub probability: f64,
}

/// Result of running one document through the pipeline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inference {
    /// predicted label
    pub label: String,
    /// max probability as a percentage, `0..=100`
    pub confidence: f64,
    /// every class in label order
    pub distribution: Vec<ClassProbability>,
    /// non-zero features the document produced
    pub active_features: usize,
}

impl Inference {
    /// No vocabulary term matched, the verdict comes from the biases alone
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.active_features == 0
    }

    pub fn probability_of(&self, label: &str) -> Option<f64> {
        self.distribution
            .iter()
            .find(|class| class.label == label)
            .map(|class| class.probability)
    }
}

/// Max probability of a distribution as a percentage in `0..=100`
#[inline]
pub fn confidence(distribution: &[f64]) -> f64 {
    let max = distribution.iter().copied().fold(0.0, f64::max);
    (max * 100.0).clamp(0.0, 100.0)
}

/// Vectorizer and classifier whose dimensions are known to agree
#[derive(Debug, Clone)]
pub struct Pipeline {
    vectorizer: Vectorizer,
    classifier: Classifier,
}

impl Pipeline {
    pub fn new(vectorizer: Vectorizer, classifier: Classifier) -> Result<Self, ModelLoadError> {
        if classifier.n_features() != vectorizer.vocab_size() {
            return Err(ModelLoadError::inconsistent(format!(
                "classifier expects {} features but vocabulary size is {}",
                classifier.n_features(),
                vectorizer.vocab_size()
            )));
        }
        Ok(Self { vectorizer, classifier })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let (vectorizer, classifier) = model::load(path)?;
        Self::new(vectorizer, classifier)
    }

    /// Document to label, confidence and full distribution
    pub fn infer(&self, document: &str) -> Inference {
        let features = self.vectorizer.transform(document);
        let inference = self.infer_features(&features);
        tracing::debug!(
            label = %inference.label,
            confidence = inference.confidence,
            active_features = inference.active_features,
            "inferred document"
        );
        inference
    }

    /// [`Pipeline::infer`] over many documents in parallel
    pub fn infer_batch<D>(&self, documents: &[D]) -> Vec<Inference>
    where
        D: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.infer(doc.as_ref()))
            .collect()
    }

    // features always come from our own vectorizer, so the length matches
    fn infer_features(&self, features: &FeatureVector) -> Inference {
        let proba = self.classifier.probabilities(features);
        let labels = self.classifier.labels();
        Inference {
            label: labels[argmax(&proba)].clone(),
            confidence: confidence(&proba),
            distribution: labels
                .iter()
                .zip(&proba)
                .map(|(label, probability)| ClassProbability {
                    label: label.clone(),
                    probability: *probability,
                })
                .collect(),
            active_features: features.nnz(),
        }
    }

    #[inline]
    pub fn vectorizer(&self) -> &Vectorizer {
        &self.vectorizer
    }

    #[inline]
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelArtifact;

    fn toy() -> Pipeline {
        let (vectorizer, classifier) = ModelArtifact::example().into_parts().unwrap();
        Pipeline::new(vectorizer, classifier).unwrap()
    }

    #[test]
    fn toy_document_is_fake() {
        let pipeline = toy();
        let inference = pipeline.infer("berita palsu palsu");
        assert_eq!(inference.label, "FAKE");
        assert!(!inference.is_degenerate());
        assert_eq!(inference.active_features, 2);
        let total: f64 = inference.distribution.iter().map(|c| c.probability).sum();
        assert!((total - 1.0).abs() < 1e-9);
        let fake = inference.probability_of("FAKE").unwrap();
        assert!((inference.confidence - fake * 100.0).abs() < 1e-9);
        assert!(inference.confidence > 50.0 && inference.confidence <= 100.0);
        assert_eq!(inference.distribution[0].label, "FAKE");
        assert_eq!(inference.distribution[1].label, "REAL");
    }

    #[test]
    fn real_leaning_document() {
        let inference = toy().infer("Fakta ASLI, asli.");
        assert_eq!(inference.label, "REAL");
    }

    #[test]
    fn empty_document_is_degenerate_not_an_error() {
        let inference = toy().infer("");
        assert!(inference.is_degenerate());
        assert_eq!(inference.label, "FAKE");
        assert_eq!(inference.confidence, 50.0);
    }

    #[test]
    fn confidence_bounds() {
        assert_eq!(confidence(&[0.25, 0.75]), 75.0);
        assert_eq!(confidence(&[1.0, 0.0]), 100.0);
        assert_eq!(confidence(&[]), 0.0);
    }

    #[test]
    fn batch_matches_single() {
        let pipeline = toy();
        let docs = vec!["berita palsu".to_string(), String::new(), "asli fakta".to_string()];
        let batch = pipeline.infer_batch(&docs);
        assert_eq!(batch.len(), 3);
        for (doc, inference) in docs.iter().zip(&batch) {
            assert_eq!(&pipeline.infer(doc), inference);
        }
    }

    #[test]
    fn new_rejects_mismatched_components() {
        let (vectorizer, _) = ModelArtifact::example().into_parts().unwrap();
        let classifier = Classifier::new(
            vec!["FAKE".to_string(), "REAL".to_string()],
            vec![vec![0.0; 3], vec![0.0; 3]],
            vec![0.0, 0.0],
            3,
        )
        .unwrap();
        assert!(Pipeline::new(vectorizer, classifier).is_err());
    }

    #[test]
    fn inference_serializes_to_json() {
        let inference = toy().infer("berita palsu palsu");
        let value = serde_json::to_value(&inference).unwrap();
        assert_eq!(value["label"], "FAKE");
        assert_eq!(value["distribution"][1]["label"], "REAL");
    }
}
