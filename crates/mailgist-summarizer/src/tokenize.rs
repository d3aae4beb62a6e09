//! Sentence and word tokenization
//!
//! Deliberately simple rules: a sentence ends at `.`, `!` or `?` followed by
//! whitespace (or end of input), and line breaks always end sentences. Words
//! are ASCII letter runs, lowercased. Periods that should not split are
//! expected to be shielded first via [`crate::periods`]; abbreviations like
//! `Mr.` are not special-cased and do split.

use std::sync::LazyLock;

use regex::Regex;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]+").unwrap());

/// Split text into sentences, preserving terminators and document order
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            flush(&mut sentences, &mut current);
            continue;
        }
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.get(i + 1).is_none_or(|next| next.is_whitespace());
            if at_boundary {
                flush(&mut sentences, &mut current);
            }
        }
    }
    flush(&mut sentences, &mut current);

    sentences
}

fn flush(sentences: &mut Vec<String>, current: &mut String) {
    let sentence = current.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
    current.clear();
}

/// Split a sentence into lowercased ASCII-letter word runs
pub fn words(sentence: &str) -> Vec<String> {
    WORD.find_iter(sentence)
        .map(|word| word.as_str().to_ascii_lowercase())
        .collect()
}
