pub mod tfidf;
pub mod token;

use indexmap::IndexSet;
use rayon::prelude::*;

use crate::error::ModelLoadError;
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::{
    tfidf::TfScaling,
    token::{Analyzer, NgramRange},
};

/// TF-IDF feature vector of logical length V
pub type FeatureVector = ZeroSpVec<f64>;

/// Fitted TF-IDF vectorizer, read-only after construction.
///
/// Holds:
/// - the vocabulary, where a term's position in the set is its feature index
/// - the IDF vector, index-aligned with the vocabulary
/// - the tf convention and n-gram range the vocabulary was built with
#[derive(Debug, Clone)]
pub struct Vectorizer {
    vocabulary: IndexSet<Box<str>>,
    idf: Vec<f64>,
    tf_scaling: TfScaling,
    analyzer: Analyzer,
}

impl Vectorizer {
    /// Build a vectorizer from fitted state.
    ///
    /// Fails when the IDF length differs from the vocabulary size,
    /// an IDF weight is negative or not finite, or the n-gram range is invalid.
    pub fn new(
        vocabulary: IndexSet<Box<str>>,
        idf: Vec<f64>,
        tf_scaling: TfScaling,
        ngram_range: NgramRange,
    ) -> Result<Self, ModelLoadError> {
        if vocabulary.len() != idf.len() {
            return Err(ModelLoadError::inconsistent(format!(
                "vocabulary has {} terms but idf vector has {} weights",
                vocabulary.len(),
                idf.len()
            )));
        }
        if let Some(pos) = idf.iter().position(|w| !w.is_finite() || *w < 0.0) {
            return Err(ModelLoadError::inconsistent(format!(
                "idf weight at index {} is {}",
                pos, idf[pos]
            )));
        }
        if !ngram_range.is_valid() {
            return Err(ModelLoadError::inconsistent(format!(
                "invalid ngram range ({}, {})",
                ngram_range.min_n(),
                ngram_range.max_n()
            )));
        }
        Ok(Self {
            vocabulary,
            idf,
            tf_scaling,
            analyzer: Analyzer::new(ngram_range),
        })
    }

    /// Document to L2-normalized TF-IDF vector.
    ///
    /// Out-of-vocabulary terms are dropped. A document with no
    /// in-vocabulary term yields the all-zero vector of length V.
    pub fn transform(&self, document: &str) -> FeatureVector {
        let mut hits: Vec<usize> = self
            .analyzer
            .analyze(document)
            .iter()
            .filter_map(|term| self.vocabulary.get_index_of(term.as_str()))
            .collect();
        if hits.is_empty() {
            return FeatureVector::zeros(self.vocab_size());
        }
        hits.sort_unstable();

        let mut inds = Vec::with_capacity(hits.len());
        let mut vals = Vec::with_capacity(hits.len());
        let mut start = 0;
        while start < hits.len() {
            let idx = hits[start];
            let mut end = start + 1;
            while end < hits.len() && hits[end] == idx {
                end += 1;
            }
            let count = (end - start) as u32;
            inds.push(idx);
            vals.push(self.tf_scaling.tf_idf(count, self.idf[idx]));
            start = end;
        }

        let mut features = FeatureVector::from_sorted_parts(self.vocab_size(), inds, vals);
        features.l2_normalize();
        features
    }

    /// [`Vectorizer::transform`] over many documents in parallel
    pub fn transform_batch<D>(&self, documents: &[D]) -> Vec<FeatureVector>
    where
        D: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    /// V
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains(term)
    }

    #[inline]
    pub fn term_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get_index_of(term)
    }

    #[inline]
    pub fn term_at(&self, index: usize) -> Option<&str> {
        self.vocabulary.get_index(index).map(|term| &**term)
    }

    /// terms in feature-index order
    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.vocabulary.iter().map(|term| &**term)
    }

    #[inline]
    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    #[inline]
    pub fn tf_scaling(&self) -> TfScaling {
        self.tf_scaling
    }

    #[inline]
    pub fn ngram_range(&self) -> NgramRange {
        self.analyzer.ngram_range()
    }
}
