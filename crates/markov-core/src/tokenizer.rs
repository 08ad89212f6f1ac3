//! Convenience tokenizer for the CLI and for quick demos.
//!
//! The engine itself treats tokenization and POS tagging as an external
//! black box (see the crate's documentation); this module is a minimal,
//! regex-based stand-in for callers who don't have a real tagger handy.
//! Unlike a full linguistic tokenizer it does not lowercase or stem —
//! the engine's own trie does the case-folding it needs.

use std::sync::LazyLock;

use regex::Regex;

use crate::pos::Pos;
use crate::trainer::Token;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s']").unwrap());
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]\s+").unwrap());
static APOSTROPHE_TRIM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^'+|'+$").unwrap());
static NUMERIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

/// Split text into sentences at sentence-ending punctuation followed by
/// whitespace.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut last = 0;

    for m in SENTENCE_END.find_iter(text) {
        let sentence = text[last..m.start() + 1].trim().to_string();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        last = m.end();
    }

    let remainder = text[last..].trim().to_string();
    if !remainder.is_empty() {
        sentences.push(remainder);
    }

    sentences
}

/// Split a single sentence into word tokens. Preserves case and internal
/// apostrophes; strips leading/trailing apostrophes and other punctuation.
pub fn tokenize_words(sentence: &str) -> Vec<String> {
    let cleaned = NON_WORD.replace_all(sentence, " ");
    cleaned
        .split_whitespace()
        .map(|t| APOSTROPHE_TRIM.replace_all(t, "").to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A coarse, tagger-free POS guess: purely numeric tokens are `Num`,
/// everything else is `Other`. Real part-of-speech tagging is out of this
/// crate's scope; callers with a real tagger should build `Token`s
/// directly instead of using this.
fn guess_pos(word: &str) -> Pos {
    if NUMERIC.is_match(word) {
        Pos::Num
    } else {
        Pos::Other
    }
}

/// Tokenize raw text into a document (sentences of tagged tokens) the
/// trainer can consume directly.
pub fn tokenize_document(text: &str) -> Vec<Vec<Token>> {
    split_sentences(text)
        .iter()
        .map(|sentence| {
            tokenize_words(sentence)
                .into_iter()
                .map(|word| {
                    let pos = guess_pos(&word);
                    Token::new(word, pos)
                })
                .collect()
        })
        .filter(|sentence: &Vec<Token>| !sentence.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_splitting() {
        let sentences = split_sentences("First. Second! Third? Fourth.");
        assert_eq!(sentences.len(), 4);
    }

    #[test]
    fn tokenize_words_preserves_case_and_apostrophes() {
        let tokens = tokenize_words("Don't Stop the Music");
        assert_eq!(tokens, vec!["Don't", "Stop", "the", "Music"]);
    }

    #[test]
    fn tokenize_words_strips_surrounding_punctuation() {
        let tokens = tokenize_words("'hello' \"world\"");
        assert_eq!(tokens, vec!["hello", "world"]);
    }

    #[test]
    fn tokenize_document_builds_sentences_of_tokens() {
        let doc = tokenize_document("The cat sat. It purred 7 times.");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0].len(), 3);
        assert_eq!(doc[1][2].pos, Pos::Num);
    }

    #[test]
    fn empty_text_yields_empty_document() {
        assert!(tokenize_document("").is_empty());
    }
}
