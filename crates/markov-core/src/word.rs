//! A vocabulary entry: text, POS, and the map from neighbor text to
//! neighbor record.

use indexmap::IndexMap;
use serde_json::{Value, json};

use crate::config::EngineConfig;
use crate::neighbor::Neighbor;
use crate::pos::Pos;
use crate::projection::Projection;

#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub pos: Pos,
    /// Insertion-ordered so iteration is deterministic within a run.
    pub neighbors: IndexMap<String, Neighbor>,
}

impl Word {
    pub fn new(text: impl Into<String>, pos: Pos) -> Word {
        Word {
            text: text.into(),
            pos,
            neighbors: IndexMap::new(),
        }
    }

    pub fn get_neighbor(&self, text: &str) -> Option<&Neighbor> {
        self.neighbors.get(text)
    }

    pub fn set_neighbor(&mut self, neighbor: Neighbor) {
        self.neighbors.insert(neighbor.text.clone(), neighbor);
    }

    /// Filter neighbors by POS, preserving insertion order.
    pub fn select_neighbors(&self, pos: Pos) -> Vec<&Neighbor> {
        self.neighbors.values().filter(|n| n.pos == pos).collect()
    }

    /// Adjust a neighbor's externally settable rating by `delta`. Returns
    /// `false` if no such neighbor exists.
    pub fn adjust_rating(&mut self, neighbor_text: &str, delta: i64) -> bool {
        match self.neighbors.get_mut(neighbor_text) {
            Some(n) => {
                n.rating += delta;
                true
            }
            None => false,
        }
    }

    /// The central operation: turn this word, sitting at slot `i` of a
    /// sentence of length `sentence_len`, into a distribution over
    /// candidate fillers of `target_pos`.
    pub fn project(&self, i: usize, sentence_len: usize, target_pos: Pos, config: &EngineConfig) -> Projection {
        let neighbors = self.select_neighbors(target_pos);
        let window = config.window_size as i64;

        let mut magnitudes = Vec::with_capacity(neighbors.len());
        let mut distances = Vec::with_capacity(neighbors.len());
        let mut keys = Vec::with_capacity(neighbors.len());
        let mut pos = Vec::with_capacity(neighbors.len());

        for neighbor in neighbors {
            let mut row = vec![0u32; sentence_len];
            for (j, &value) in neighbor.dist.iter().enumerate() {
                let s = (j as i64 - window) + i as i64;
                if s >= 0 && (s as usize) < sentence_len {
                    row[s as usize] = value;
                }
            }
            distances.push(row);
            magnitudes.push(
                config.weight_count * neighbor.count as f64 + config.weight_rating * neighbor.rating as f64,
            );
            keys.push(neighbor.text.clone());
            pos.push(neighbor.pos);
        }

        Projection {
            magnitudes,
            distances,
            keys,
            pos,
        }
    }

    /// Serialize to the `(_W, _N)` payload pair used by the trie's wire
    /// format.
    pub fn to_wire(&self) -> (Value, Value) {
        let word_val = json!({ "_T": self.text, "_P": self.pos.code() });
        let mut neighbors_obj = serde_json::Map::new();
        for (text, neighbor) in &self.neighbors {
            neighbors_obj.insert(text.clone(), neighbor.to_wire());
        }
        (word_val, Value::Object(neighbors_obj))
    }

    /// Parse a `(_W, _N)` payload pair back into a `Word`.
    pub fn from_wire(word_val: &Value, neighbors_val: &Value) -> Option<Word> {
        let text = word_val.get("_T")?.as_str()?.to_string();
        let pos = Pos::from_code(word_val.get("_P")?.as_i64()?)?;
        let neighbors_obj = neighbors_val.as_object()?;

        let mut neighbors = IndexMap::new();
        for (key, value) in neighbors_obj {
            let neighbor = Neighbor::from_wire(key, value)?;
            neighbors.insert(key.clone(), neighbor);
        }

        Some(Word { text, pos, neighbors })
    }
}
