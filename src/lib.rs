/// This crate is the inference core of a fake news detector:
/// a TF-IDF vectorizer feeding a linear classifier.
pub mod classifier;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod utils;
pub mod vectorizer;

/// TF-IDF Vectorizer
/// Turns a raw document into a sparse, L2-normalized TF-IDF feature vector
/// using a fixed vocabulary and fixed IDF weights.
///
/// Internally, it holds:
/// - The vocabulary (term -> feature index)
/// - The IDF vector, index-aligned with the vocabulary
/// - The term-frequency convention (raw counts or sublinear)
/// - The word n-gram range the vocabulary was built with
///
/// Every input string is valid. A document with no in-vocabulary term
/// produces the all-zero vector.
pub use vectorizer::{FeatureVector, Vectorizer};

/// Term-frequency convention
/// Fixed per model, stored in the artifact.
/// - Raw: tf = count (default)
/// - Sublinear: tf = 1 + ln(count)
pub use vectorizer::tfidf::TfScaling;

/// Tokenizer and n-gram analyzer
/// Lower-cases, splits on non-word characters and drops one-char tokens.
pub use vectorizer::token::{tokenize, Analyzer, NgramRange};

/// Linear Classifier
/// One weight row and bias per class. Scores become probabilities through
/// a sigmoid for two classes or a softmax otherwise; which one is decided
/// once when the classifier is built.
///
/// Ties for the highest probability go to the lowest class index.
pub use classifier::{activation::Activation, Classifier};

/// Model Artifact
/// The persisted record holding vocabulary, IDF, weights, biases and labels.
/// Encoded as JSON (`.json`) or CBOR (`.cbor`), validated once at load.
pub use model::{format::ArtifactFormat, load, ModelArtifact, ARTIFACT_VERSION};

/// Inference Pipeline
/// Chains the vectorizer and classifier.
/// `Pipeline::infer` returns the label, the confidence percentage and
/// the full distribution.
///
/// `SharedPipeline` loads a pipeline lazily, exactly once, and shares it
/// read-only between threads.
pub use pipeline::{confidence, shared::SharedPipeline, ClassProbability, Inference, Pipeline};

/// Error Types
/// - `ModelLoadError`: missing, corrupt or inconsistent artifact
/// - `DimensionMismatchError`: feature vector of the wrong length
pub use error::{DimensionMismatchError, Error, ModelLoadError, Result};
