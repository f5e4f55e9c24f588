use serde::{Deserialize, Serialize};

/// Shortest token kept by the tokenizer, in chars
pub const MIN_TOKEN_CHARS: usize = 2;

/// word character: unicode alphanumeric or `_`
#[inline]
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a document into normalized tokens.
///
/// The document is lower-cased, then cut at every non-word character.
/// Runs shorter than [`MIN_TOKEN_CHARS`] are discarded.
///
/// # Examples
/// ```
/// use fakenews_classifier::vectorizer::token::tokenize;
/// assert_eq!(tokenize("Berita PALSU, a-b c_d!"), vec!["berita", "palsu", "c_d"]);
/// ```
pub fn tokenize(document: &str) -> Vec<String> {
    document
        .to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|tok| tok.chars().nth(MIN_TOKEN_CHARS - 1).is_some())
        .map(str::to_string)
        .collect()
}

/// Largest n-gram size an artifact may declare.
/// Keeps analysis linear in document length.
pub const MAX_NGRAM: usize = 8;

/// Inclusive range of word n-gram sizes emitted by the [`Analyzer`].
/// Serialized as `[min_n, max_n]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramRange(pub usize, pub usize);

impl NgramRange {
    pub const UNIGRAM: NgramRange = NgramRange(1, 1);

    #[inline]
    pub fn min_n(&self) -> usize {
        self.0
    }

    #[inline]
    pub fn max_n(&self) -> usize {
        self.1
    }

    /// `1 <= min_n <= max_n <= MAX_NGRAM`
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 >= 1 && self.0 <= self.1 && self.1 <= MAX_NGRAM
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        Self::UNIGRAM
    }
}

/// Turns a document into the terms looked up in the vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Analyzer {
    ngram_range: NgramRange,
}

impl Analyzer {
    pub fn new(ngram_range: NgramRange) -> Self {
        Self { ngram_range }
    }

    pub fn ngram_range(&self) -> NgramRange {
        self.ngram_range
    }

    /// Tokenize and expand into word n-grams.
    /// n-grams are tokens joined by a single space.
    pub fn analyze(&self, document: &str) -> Vec<String> {
        let tokens = tokenize(document);
        if self.ngram_range == NgramRange::UNIGRAM {
            return tokens;
        }

        let (min_n, max_n) = (self.ngram_range.min_n(), self.ngram_range.max_n());
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
                continue;
            }
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        terms
    }
}
