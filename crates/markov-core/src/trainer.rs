//! Given a segmented document, emit n-grams within a window and fold them
//! into the store.

use std::collections::HashMap;

use crate::neighbor::Neighbor;
use crate::pos::Pos;
use crate::trie::Trie;
use crate::word::Word;

/// A single tagged token as seen by the trainer.
#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(text: impl Into<String>, pos: Pos) -> Token {
        Token { text: text.into(), pos }
    }
}

/// Folds tokenized sentences into a `Trie`'s word/neighbor statistics.
pub struct Trainer<'a> {
    trie: &'a mut Trie,
    window: u32,
}

impl<'a> Trainer<'a> {
    pub fn new(trie: &'a mut Trie, window: u32) -> Trainer<'a> {
        Trainer { trie, window }
    }

    /// Learn from a document: a sequence of sentences, each a sequence of
    /// tokens. Words freshly read from the trie are cached for the
    /// duration of this call so repeated mutations to the same word within
    /// one document accumulate instead of clobbering each other.
    pub fn learn(&mut self, document: &[Vec<Token>]) {
        let mut ngrams = Vec::new();
        for sentence in document {
            ngrams.extend(Trainer::ngramify(sentence, self.window));
        }

        let mut row_cache: HashMap<String, Word> = HashMap::new();

        for (a, b, dist) in ngrams {
            let mut word = match row_cache.remove(&a.text) {
                Some(w) => w,
                None => self
                    .trie
                    .select(&a.text)
                    .unwrap_or_else(|| Word::new(a.text.clone(), a.pos)),
            };

            let mut neighbor = word
                .get_neighbor(&b.text)
                .cloned()
                .unwrap_or_else(|| Neighbor::fresh(b.text.clone(), b.pos, self.window));

            neighbor.count += 1;
            neighbor
                .add_distance(dist, self.window)
                .expect("ngramify only emits offsets within the window");

            word.set_neighbor(neighbor);

            if self.trie.update(word.clone()).is_none() {
                self.trie.insert(word.clone());
            }

            row_cache.insert(a.text.clone(), word);
        }
    }

    /// All ordered pairs `(a, b)` of tokens in `sentence` with
    /// `0 < |index(b) - index(a)| <= window`, paired with the signed
    /// offset `index(b) - index(a)`.
    fn ngramify(sentence: &[Token], window: u32) -> Vec<(Token, Token, i32)> {
        let mut grams = Vec::new();
        for (a_idx, a) in sentence.iter().enumerate() {
            for (b_idx, b) in sentence.iter().enumerate() {
                let dist = b_idx as i32 - a_idx as i32;
                if dist == 0 {
                    continue;
                }
                if dist.unsigned_abs() <= window {
                    grams.push((a.clone(), b.clone(), dist));
                }
            }
        }
        grams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(pairs: &[(&str, Pos)]) -> Vec<Token> {
        pairs.iter().map(|(t, p)| Token::new(*t, *p)).collect()
    }

    #[test]
    fn learn_single_bigram_s1() {
        let mut trie = Trie::new();
        let doc = vec![sentence(&[("A", Pos::Noun), ("B", Pos::Verb)])];
        Trainer::new(&mut trie, 2).learn(&doc);

        let a = trie.select("A").unwrap();
        let n = a.get_neighbor("B").unwrap();
        assert_eq!(n.count, 1);
        assert_eq!(n.dist, vec![0, 0, 0, 1, 0]);

        let b = trie.select("B").unwrap();
        let n = b.get_neighbor("A").unwrap();
        assert_eq!(n.count, 1);
        assert_eq!(n.dist, vec![0, 1, 0, 0, 0]);
    }

    #[test]
    fn window_clipping_s2() {
        let tokens: Vec<Token> = (0..20).map(|i| Token::new(i.to_string(), Pos::Noun)).collect();
        let mut trie = Trie::new();
        let doc = vec![tokens];
        Trainer::new(&mut trie, 2).learn(&doc);

        let w0 = trie.select("0").unwrap();
        let mut neighbor_texts: Vec<&String> = w0.neighbors.keys().collect();
        neighbor_texts.sort();
        assert_eq!(neighbor_texts, vec!["1", "2"]);
    }

    #[test]
    fn repeated_mutation_within_one_learn_call_accumulates() {
        let mut trie = Trie::new();
        let doc = vec![
            sentence(&[("A", Pos::Noun), ("B", Pos::Verb)]),
            sentence(&[("A", Pos::Noun), ("B", Pos::Verb)]),
        ];
        Trainer::new(&mut trie, 2).learn(&doc);

        let a = trie.select("A").unwrap();
        let n = a.get_neighbor("B").unwrap();
        assert_eq!(n.count, 2);
        assert_eq!(n.dist, vec![0, 0, 0, 2, 0]);
    }

    #[test]
    fn count_equals_sum_of_dist() {
        let mut trie = Trie::new();
        let doc = vec![sentence(&[
            ("cat", Pos::Noun),
            ("sat", Pos::Verb),
            ("mat", Pos::Noun),
        ])];
        Trainer::new(&mut trie, 2).learn(&doc);

        let cat = trie.select("cat").unwrap();
        for neighbor in cat.neighbors.values() {
            let sum: u32 = neighbor.dist.iter().sum();
            assert_eq!(sum as u64, neighbor.count);
        }
    }
}
