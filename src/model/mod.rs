pub mod format;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{Error, ModelLoadError};
use crate::model::format::ArtifactFormat;
use crate::vectorizer::{tfidf::TfScaling, token::NgramRange, Vectorizer};

/// Current artifact layout version
pub const ARTIFACT_VERSION: u32 = 1;

/// Persisted model state.
///
/// This is a plain record with no behavior. Dimensions are validated
/// once by [`ModelArtifact::into_parts`], which turns it into the typed
/// [`Vectorizer`] and [`Classifier`].
///
/// Invariants checked at load:
/// - `vocabulary` indices are exactly `0..V`
/// - `idf.len() == V`
/// - `coef` has one row per label (or one row for two labels), each of length V
/// - `intercept` has one value per row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: u32,
    /// class labels, in probability order
    pub labels: Vec<String>,
    /// term -> feature index
    pub vocabulary: IndexMap<String, usize>,
    pub idf: Vec<f64>,
    /// weight rows, one per label
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub tf_scaling: TfScaling,
    #[serde(default)]
    pub ngram_range: NgramRange,
}

impl ModelArtifact {
    /// Build an artifact with the default tf convention and unigram range
    pub fn new(
        labels: Vec<String>,
        vocabulary: IndexMap<String, usize>,
        idf: Vec<f64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    ) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            labels,
            vocabulary,
            idf,
            coef,
            intercept,
            tf_scaling: TfScaling::default(),
            ngram_range: NgramRange::default(),
        }
    }

    pub fn with_tf_scaling(mut self, tf_scaling: TfScaling) -> Self {
        self.tf_scaling = tf_scaling;
        self
    }

    pub fn with_ngram_range(mut self, ngram_range: NgramRange) -> Self {
        self.ngram_range = ngram_range;
        self
    }

    /// Snapshot loaded components back into an artifact
    pub fn from_parts(vectorizer: &Vectorizer, classifier: &Classifier) -> Self {
        Self {
            version: ARTIFACT_VERSION,
            labels: classifier.labels().to_vec(),
            vocabulary: vectorizer
                .terms()
                .enumerate()
                .map(|(idx, term)| (term.to_string(), idx))
                .collect(),
            idf: vectorizer.idf().to_vec(),
            coef: classifier.coef().to_vec(),
            intercept: classifier.intercept().to_vec(),
            tf_scaling: vectorizer.tf_scaling(),
            ngram_range: vectorizer.ngram_range(),
        }
    }

    /// Validate and split into the vectorizer and classifier
    pub fn into_parts(self) -> Result<(Vectorizer, Classifier), ModelLoadError> {
        if self.version != ARTIFACT_VERSION {
            return Err(ModelLoadError::UnsupportedVersion(self.version));
        }
        let vocab_size = self.vocabulary.len();
        if self.idf.len() != vocab_size {
            return Err(ModelLoadError::inconsistent(format!(
                "vocabulary has {} terms but idf vector has {} weights",
                vocab_size,
                self.idf.len()
            )));
        }

        // order terms by feature index
        let mut slots: Vec<Option<String>> = vec![None; vocab_size];
        for (term, idx) in self.vocabulary {
            let Some(slot) = slots.get_mut(idx) else {
                return Err(ModelLoadError::inconsistent(format!(
                    "term {term:?} has feature index {idx} outside vocabulary of size {vocab_size}"
                )));
            };
            if let Some(other) = slot.as_ref() {
                return Err(ModelLoadError::inconsistent(format!(
                    "terms {other:?} and {term:?} share feature index {idx}"
                )));
            }
            *slot = Some(term);
        }
        // every slot is filled: V distinct indices all below V
        let vocabulary: IndexSet<Box<str>> = slots
            .into_iter()
            .flatten()
            .map(String::into_boxed_str)
            .collect();

        let vectorizer =
            Vectorizer::new(vocabulary, self.idf, self.tf_scaling, self.ngram_range)?;
        let classifier = Classifier::new(self.labels, self.coef, self.intercept, vocab_size)?;
        Ok((vectorizer, classifier))
    }

    /// Read an artifact, encoding chosen by extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelLoadError> {
        let path = path.as_ref();
        let format = ArtifactFormat::from_path(path)?;
        let file = File::open(path).map_err(|source| ModelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        format.read(BufReader::new(file))
    }

    /// Write an artifact, encoding chosen by extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let format = ArtifactFormat::from_path(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        format.write(self, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn example() -> Self {
        let vocabulary = ["berita", "palsu", "fakta", "asli"]
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();
        Self::new(
            vec!["FAKE".to_string(), "REAL".to_string()],
            vocabulary,
            vec![1.0, 2.0, 1.0, 2.0],
            vec![vec![0.1, 0.9, -0.2, -0.8], vec![-0.1, -0.9, 0.2, 0.8]],
            vec![0.0, 0.0],
        )
    }
}

/// Load the vectorizer and classifier from an artifact file.
///
/// Fails when the file is missing, cannot be decoded, or its
/// dimensions disagree. Nothing is returned on failure.
pub fn load(path: impl AsRef<Path>) -> Result<(Vectorizer, Classifier), ModelLoadError> {
    let path = path.as_ref();
    let (vectorizer, classifier) = ModelArtifact::load(path)?.into_parts()?;
    tracing::info!(
        path = %path.display(),
        vocab_size = vectorizer.vocab_size(),
        classes = classifier.n_classes(),
        activation = ?classifier.activation(),
        tf_scaling = ?vectorizer.tf_scaling(),
        "loaded model artifact"
    );
    Ok((vectorizer, classifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_splits_into_parts() {
        let (vectorizer, classifier) = ModelArtifact::example().into_parts().unwrap();
        assert_eq!(vectorizer.vocab_size(), 4);
        assert_eq!(classifier.n_features(), 4);
        assert_eq!(classifier.labels(), &["FAKE".to_string(), "REAL".to_string()]);
    }

    #[test]
    fn vocabulary_order_follows_indices_not_insertion() {
        let mut artifact = ModelArtifact::example();
        artifact.vocabulary = [("asli", 3), ("berita", 0), ("fakta", 2), ("palsu", 1)]
            .into_iter()
            .map(|(t, i)| (t.to_string(), i))
            .collect();
        let (vectorizer, _) = artifact.into_parts().unwrap();
        assert_eq!(vectorizer.term_index("berita"), Some(0));
        assert_eq!(vectorizer.term_index("asli"), Some(3));
    }

    #[test]
    fn idf_length_mismatch_is_rejected() {
        let mut artifact = ModelArtifact::example();
        artifact.vocabulary = (0..10).map(|i| (format!("kata{i}"), i)).collect();
        artifact.idf = vec![1.0; 8];
        artifact.coef = vec![vec![0.0; 10]; 2];
        assert!(matches!(artifact.into_parts(), Err(ModelLoadError::Inconsistent(_))));
    }

    #[test]
    fn bad_vocabulary_indices_are_rejected() {
        let mut shared = ModelArtifact::example();
        shared.vocabulary.insert("palsu".to_string(), 0);
        assert!(shared.into_parts().is_err());

        let mut out_of_range = ModelArtifact::example();
        out_of_range.vocabulary.insert("asli".to_string(), 4);
        assert!(out_of_range.into_parts().is_err());
    }

    #[test]
    fn weight_shape_mismatches_are_rejected() {
        let mut short_row = ModelArtifact::example();
        short_row.coef[1].pop();
        assert!(short_row.into_parts().is_err());

        let mut extra_row = ModelArtifact::example();
        extra_row.coef.push(vec![0.0; 4]);
        extra_row.intercept.push(0.0);
        assert!(extra_row.into_parts().is_err());

        let mut missing_bias = ModelArtifact::example();
        missing_bias.intercept.pop();
        assert!(missing_bias.into_parts().is_err());
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut artifact = ModelArtifact::example();
        artifact.version = 2;
        assert!(matches!(artifact.into_parts(), Err(ModelLoadError::UnsupportedVersion(2))));
    }

    #[test]
    fn oversized_ngram_range_is_rejected() {
        let json = r#"{
            "version": 1,
            "labels": ["FAKE", "REAL"],
            "vocabulary": {"berita": 0, "palsu": 1},
            "idf": [1.0, 2.0],
            "coef": [[0.5, 1.5]],
            "intercept": [-0.25],
            "ngram_range": [1, 100000]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert!(matches!(artifact.into_parts(), Err(ModelLoadError::Inconsistent(_))));
    }

    #[test]
    fn defaults_apply_when_fields_are_absent() {
        let json = r#"{
            "version": 1,
            "labels": ["FAKE", "REAL"],
            "vocabulary": {"berita": 0, "palsu": 1},
            "idf": [1.0, 2.0],
            "coef": [[0.5, 1.5]],
            "intercept": [-0.25]
        }"#;
        let artifact: ModelArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.tf_scaling, TfScaling::Raw);
        assert_eq!(artifact.ngram_range, NgramRange::UNIGRAM);
        let (_, classifier) = artifact.into_parts().unwrap();
        assert_eq!(classifier.n_classes(), 2);
    }

    #[test]
    fn from_parts_reproduces_artifact() {
        let artifact = ModelArtifact::example().with_ngram_range(NgramRange(1, 2));
        let (vectorizer, classifier) = artifact.clone().into_parts().unwrap();
        assert_eq!(ModelArtifact::from_parts(&vectorizer, &classifier), artifact);
    }

    #[test]
    fn save_reports_format_and_io_errors() {
        let dir = std::env::temp_dir();
        let err = ModelArtifact::example().save(dir.join("model.pkl")).unwrap_err();
        assert!(matches!(err, Error::ModelLoad(ModelLoadError::UnsupportedFormat { .. })));
        let err = ModelArtifact::example().save("/nonexistent/dir/model.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load("/nonexistent/dir/model.json").unwrap_err();
        assert!(matches!(err, ModelLoadError::Io { .. }));
    }
}
