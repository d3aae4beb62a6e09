//! Mailgist Summarizer
//!
//! Extractive summarization for cleaned email text.
//!
//! # Overview
//!
//! The summarizer picks the most representative sentences out of a message
//! body and returns them verbatim, in their original order. Ranking is
//! latent-semantic: a term-by-sentence frequency matrix is decomposed with
//! SVD and each sentence is scored by its weight across the singular
//! components. Nothing is generated or paraphrased.
//!
//! # Architecture
//!
//! ```text
//! text → protect periods → sentences/terms → TF matrix → SVD → top-k → restore
//! ```
//!
//! Every failure inside that chain (no usable vocabulary, decomposition
//! failure, oversized matrix) degrades to a deterministic split-on-period
//! fallback. The summarizer never returns an error.
//!
//! # Example Usage
//!
//! ```
//! use mailgist_summarizer::summarize;
//!
//! let text = "The rollout starts Monday morning. Database backups finished \
//!             without errors last night. The rollout plan covers the two \
//!             staging clusters first. Lunch is provided on Thursday.";
//! let summary = summarize(text, 2);
//! assert_eq!(summary.len(), 2);
//! ```

#![warn(missing_docs)]

mod lsa;
mod stopwords;

pub mod periods;
pub mod tokenize;

pub use lsa::{summarize, summarize_with_outcome, Summary};
