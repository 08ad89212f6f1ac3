//! Part-of-speech adapter: normalizes whatever tag an external tagger hands
//! us into the closed set the engine actually reasons about.

use crate::error::{MarkovError, Result};

/// Closed set of part-of-speech tags, plus the `Eos` sentinel used inside a
/// skeleton to mark a sentence boundary. Unrecognized tagger output folds
/// into `Other` rather than growing the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Pos {
    Propn = 0,
    Noun = 1,
    Pron = 2,
    Verb = 3,
    Adj = 4,
    Adv = 5,
    Det = 6,
    Adp = 7,
    Conj = 8,
    Num = 9,
    Part = 10,
    Intj = 11,
    Punct = 12,
    Other = 13,
    Eos = 14,
}

impl Pos {
    /// The integer code used in the snapshot wire format (`_P` / neighbor
    /// array index 0).
    pub fn code(self) -> i64 {
        self as u8 as i64
    }

    /// Decode a wire-format code back into a `Pos`. Unrecognized codes are
    /// a corrupt snapshot, not a silent `Other` fallback — the writer only
    /// ever emits codes it produced itself.
    pub fn from_code(code: i64) -> Option<Pos> {
        match code {
            0 => Some(Pos::Propn),
            1 => Some(Pos::Noun),
            2 => Some(Pos::Pron),
            3 => Some(Pos::Verb),
            4 => Some(Pos::Adj),
            5 => Some(Pos::Adv),
            6 => Some(Pos::Det),
            7 => Some(Pos::Adp),
            8 => Some(Pos::Conj),
            9 => Some(Pos::Num),
            10 => Some(Pos::Part),
            11 => Some(Pos::Intj),
            12 => Some(Pos::Punct),
            13 => Some(Pos::Other),
            14 => Some(Pos::Eos),
            _ => None,
        }
    }

    /// Normalize an external tagger's tag string. Anything not recognized
    /// folds to `Other`; this never fails.
    pub fn from_tag(tag: &str) -> Pos {
        match tag.to_ascii_uppercase().as_str() {
            "PROPN" | "NNP" | "NNPS" => Pos::Propn,
            "NOUN" | "NN" | "NNS" => Pos::Noun,
            "PRON" | "PRP" | "PRP$" => Pos::Pron,
            "VERB" | "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" => Pos::Verb,
            "ADJ" | "JJ" | "JJR" | "JJS" => Pos::Adj,
            "ADV" | "RB" | "RBR" | "RBS" => Pos::Adv,
            "DET" | "DT" => Pos::Det,
            "ADP" | "IN" => Pos::Adp,
            "CONJ" | "CCONJ" | "SCONJ" | "CC" => Pos::Conj,
            "NUM" | "CD" => Pos::Num,
            "PART" | "TO" => Pos::Part,
            "INTJ" | "UH" => Pos::Intj,
            "PUNCT" | "." | "," => Pos::Punct,
            "EOS" => Pos::Eos,
            _ => Pos::Other,
        }
    }
}

/// A length-`n` vector, all zero except index `i` set to 1.
pub fn one_hot(index: usize, len: usize) -> Result<Vec<u32>> {
    if index >= len {
        return Err(MarkovError::OutOfRange { index, len });
    }
    let mut v = vec![0u32; len];
    v[index] = 1;
    Ok(v)
}
