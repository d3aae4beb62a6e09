//! Latent-semantic sentence ranking with a deterministic fallback

use std::collections::HashMap;
use std::sync::LazyLock;

use nalgebra::DMatrix;
use rust_stemmers::{Algorithm, Stemmer};
use thiserror::Error;
use tracing::debug;

use crate::{periods, stopwords, tokenize};

/// Inputs shorter than this (trimmed, counted in characters) are returned
/// whole instead of being analyzed.
const MIN_ANALYZABLE_CHARS: usize = 100;

/// Smoothing weight for max-tf normalization.
const SMOOTHING: f64 = 0.4;

/// Upper bound on `vocabulary x sentences` matrix cells (about 32 MB of
/// f64). Past it the fallback runs instead of the decomposition.
const MAX_MATRIX_CELLS: usize = 4_000_000;

/// Iteration budget for the decomposition before giving up.
const SVD_MAX_ITERATIONS: usize = 1_000;

static STEMMER: LazyLock<Stemmer> = LazyLock::new(|| Stemmer::create(Algorithm::English));

/// Why the ranking path could not run. Callers never see this; every
/// variant degrades to the fallback.
#[derive(Debug, Error)]
enum RankError {
    #[error("input produced no sentences")]
    NoSentences,
    #[error("no usable vocabulary after stop-word removal")]
    EmptyVocabulary,
    #[error("matrix of {0} cells exceeds the decomposition budget")]
    MatrixTooLarge(usize),
    #[error("singular value decomposition did not converge")]
    SvdFailed,
}

/// Result of a summarization call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Selected sentences in original document order
    pub sentences: Vec<String>,

    /// True when the latent-semantic path failed and the split-on-period
    /// fallback produced the sentences instead
    pub used_fallback: bool,
}

/// Summarize `text` into at most `sentence_count` sentences
///
/// Convenience wrapper over [`summarize_with_outcome`] for callers that do
/// not care whether the fallback fired.
pub fn summarize(text: &str, sentence_count: usize) -> Vec<String> {
    summarize_with_outcome(text, sentence_count).sentences
}

/// Summarize `text` and report how the result was produced
///
/// Never fails and never panics on any input:
/// - trimmed-empty text yields no sentences;
/// - text shorter than 100 characters is returned whole as one entry;
/// - anything the ranking cannot handle (no vocabulary, oversized matrix,
///   failed decomposition) degrades to a deterministic split on literal
///   periods over the original text, flagged via
///   [`used_fallback`](Summary::used_fallback).
///
/// Output is deterministic for a fixed input and count.
pub fn summarize_with_outcome(text: &str, sentence_count: usize) -> Summary {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Summary {
            sentences: Vec::new(),
            used_fallback: false,
        };
    }
    if trimmed.chars().count() < MIN_ANALYZABLE_CHARS {
        return Summary {
            sentences: vec![trimmed.to_string()],
            used_fallback: false,
        };
    }

    let protected = periods::protect(trimmed);
    let sentences = tokenize::split_sentences(&protected);
    match rank_sentences(&sentences) {
        Ok(ranks) => Summary {
            sentences: select_top(&sentences, &ranks, sentence_count),
            used_fallback: false,
        },
        Err(reason) => {
            debug!("sentence ranking fell back: {}", reason);
            Summary {
                sentences: fallback_split(text, sentence_count),
                used_fallback: true,
            }
        }
    }
}

/// Score every sentence by its weight across the singular components.
///
/// Builds a term-by-sentence count matrix over stemmed non-stop-words,
/// normalizes each column by its maximum term frequency, and decomposes it.
/// Sentence `j` scores `sqrt(sum_k (sigma_k * v_t[k][j])^2)`; all
/// components contribute, so component ordering does not matter.
fn rank_sentences(sentences: &[String]) -> Result<Vec<f64>, RankError> {
    if sentences.is_empty() {
        return Err(RankError::NoSentences);
    }

    let mut term_index: HashMap<String, usize> = HashMap::new();
    let mut sentence_terms: Vec<Vec<usize>> = Vec::with_capacity(sentences.len());
    for sentence in sentences {
        let mut terms = Vec::new();
        for word in tokenize::words(sentence) {
            if stopwords::is_stop_word(&word) {
                continue;
            }
            let stem = STEMMER.stem(&word).into_owned();
            let next_index = term_index.len();
            terms.push(*term_index.entry(stem).or_insert(next_index));
        }
        sentence_terms.push(terms);
    }

    let vocabulary = term_index.len();
    if vocabulary == 0 {
        return Err(RankError::EmptyVocabulary);
    }
    let cells = vocabulary.saturating_mul(sentences.len());
    if cells > MAX_MATRIX_CELLS {
        return Err(RankError::MatrixTooLarge(cells));
    }

    let mut matrix = DMatrix::<f64>::zeros(vocabulary, sentences.len());
    for (column, terms) in sentence_terms.iter().enumerate() {
        for &row in terms {
            matrix[(row, column)] += 1.0;
        }
    }
    normalize_columns(&mut matrix);

    let svd = matrix
        .try_svd(false, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or(RankError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(RankError::SvdFailed)?;
    let sigma = svd.singular_values;

    let mut ranks = Vec::with_capacity(sentences.len());
    for column in 0..v_t.ncols() {
        let mut sum = 0.0;
        for (component, sigma_k) in sigma.iter().enumerate() {
            let weighted = sigma_k * v_t[(component, column)];
            sum += weighted * weighted;
        }
        ranks.push(sum.sqrt());
    }
    Ok(ranks)
}

/// Max-tf normalization with uniform smoothing: in any column with a
/// non-zero maximum, every cell (zeros included) becomes
/// `SMOOTHING + (1 - SMOOTHING) * count / max`. All-zero columns stay zero.
fn normalize_columns(matrix: &mut DMatrix<f64>) {
    for column in 0..matrix.ncols() {
        let mut max = 0.0f64;
        for row in 0..matrix.nrows() {
            max = max.max(matrix[(row, column)]);
        }
        if max > 0.0 {
            for row in 0..matrix.nrows() {
                matrix[(row, column)] =
                    SMOOTHING + (1.0 - SMOOTHING) * (matrix[(row, column)] / max);
            }
        }
    }
}

/// Pick the `count` best sentences, then put them back in document order
/// and restore their shielded periods. Rating ties go to the earlier
/// sentence.
fn select_top(sentences: &[String], ranks: &[f64], count: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..sentences.len()).collect();
    order.sort_by(|&a, &b| {
        ranks[b]
            .partial_cmp(&ranks[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order.truncate(count);
    order.sort_unstable();
    order
        .into_iter()
        .map(|index| periods::restore(&sentences[index]))
        .collect()
}

/// Terminal degradation path: split the original text on literal periods,
/// keep the first `count` non-empty trimmed fragments, and give each its
/// period back. Runs over the unprotected input, so decimals and initials
/// may split here; accepted for the degraded path.
fn fallback_split(text: &str, sentence_count: usize) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .take(sentence_count)
        .map(|fragment| format!("{fragment}."))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the output contract holds for any input
        #[test]
        fn test_output_contract(text in ".{0,300}", count in 0usize..5) {
            let trimmed = text.trim();
            let summary = summarize(&text, count);

            if trimmed.is_empty() {
                prop_assert!(summary.is_empty());
            } else if trimmed.chars().count() < 100 {
                prop_assert_eq!(summary, vec![trimmed.to_string()]);
            } else {
                prop_assert!(summary.len() <= count);
            }
        }

        /// Property: summarization is deterministic
        #[test]
        fn test_deterministic(text in ".{0,300}") {
            prop_assert_eq!(summarize(&text, 3), summarize(&text, 3));
        }
    }
}
