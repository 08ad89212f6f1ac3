//! Case-insensitive character trie keyed by word text.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{MarkovError, Result};
use crate::word::Word;

const WORD_KEY: &str = "_W";
const NEIGHBORS_KEY: &str = "_N";

#[derive(Debug, Clone, Default)]
struct Node {
    children: IndexMap<char, Node>,
    payload: Option<Word>,
}

/// The trie store. Traversal lowercases each character; an empty `text`
/// is a no-op miss on every operation.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    root: Node,
}

impl Trie {
    pub fn new() -> Trie {
        Trie::default()
    }

    fn get_node(&self, text: &str) -> Option<&Node> {
        if text.is_empty() {
            return None;
        }
        let mut node = &self.root;
        for c in text.chars() {
            node = node.children.get(&c.to_ascii_lowercase_unicode())?;
        }
        Some(node)
    }

    fn get_node_mut_create(&mut self, text: &str) -> &mut Node {
        let mut node = &mut self.root;
        for c in text.chars() {
            node = node
                .children
                .entry(c.to_ascii_lowercase_unicode())
                .or_default();
        }
        node
    }

    pub fn select(&self, text: &str) -> Option<Word> {
        self.get_node(text)?.payload.clone()
    }

    /// Insert `word`, creating any missing character nodes, overwriting any
    /// existing payload.
    pub fn insert(&mut self, word: Word) -> Option<Word> {
        if word.text.is_empty() {
            return None;
        }
        let node = self.get_node_mut_create(&word.text);
        node.payload = Some(word.clone());
        Some(word)
    }

    /// Only succeeds if a payload already exists at `word.text`'s path.
    pub fn update(&mut self, word: Word) -> Option<Word> {
        if word.text.is_empty() {
            return None;
        }
        let node = self.get_node(&word.text)?;
        if node.payload.is_none() {
            return None;
        }
        // Re-borrow mutably now that we know the path exists.
        let mut cursor = &mut self.root;
        for c in word.text.chars() {
            cursor = cursor.children.get_mut(&c.to_ascii_lowercase_unicode())?;
        }
        cursor.payload = Some(word.clone());
        Some(word)
    }

    /// Every word stored in the trie, in an unspecified order.
    pub fn words(&self) -> Vec<&Word> {
        let mut out = Vec::new();
        Trie::collect_words(&self.root, &mut out);
        out
    }

    fn collect_words<'a>(node: &'a Node, out: &mut Vec<&'a Word>) {
        if let Some(word) = &node.payload {
            out.push(word);
        }
        for child in node.children.values() {
            Trie::collect_words(child, out);
        }
    }

    /// Render the trie as the legacy nested-map JSON schema.
    pub fn to_json(&self) -> Value {
        Trie::node_to_json(&self.root)
    }

    fn node_to_json(node: &Node) -> Value {
        let mut obj = serde_json::Map::new();
        for (c, child) in &node.children {
            obj.insert(c.to_string(), Trie::node_to_json(child));
        }
        if let Some(word) = &node.payload {
            let (word_val, neighbors_val) = word.to_wire();
            obj.insert(WORD_KEY.to_string(), word_val);
            obj.insert(NEIGHBORS_KEY.to_string(), neighbors_val);
        }
        Value::Object(obj)
    }

    /// Parse the legacy nested-map JSON schema back into a `Trie`.
    pub fn from_json(value: &Value) -> Result<Trie> {
        let root = Trie::node_from_json(value)?;
        Ok(Trie { root })
    }

    fn node_from_json(value: &Value) -> Result<Node> {
        let obj = value
            .as_object()
            .ok_or_else(|| MarkovError::Corrupt("trie node is not an object".into()))?;

        let mut children = IndexMap::new();
        let mut word_val = None;
        let mut neighbors_val = None;

        for (key, child) in obj {
            match key.as_str() {
                WORD_KEY => word_val = Some(child),
                NEIGHBORS_KEY => neighbors_val = Some(child),
                _ => {
                    let mut chars = key.chars();
                    let c = chars
                        .next()
                        .ok_or_else(|| MarkovError::Corrupt("empty child key".into()))?;
                    if chars.next().is_some() {
                        return Err(MarkovError::Corrupt(format!(
                            "child key '{key}' is not a single character"
                        )));
                    }
                    children.insert(c, Trie::node_from_json(child)?);
                }
            }
        }

        let payload = match (word_val, neighbors_val) {
            (Some(w), Some(n)) => Some(
                Word::from_wire(w, n)
                    .ok_or_else(|| MarkovError::Corrupt("malformed word payload".into()))?,
            ),
            (None, None) => None,
            _ => {
                return Err(MarkovError::Corrupt(
                    "node has only one of _W/_N".into(),
                ));
            }
        };

        Ok(Node { children, payload })
    }
}

trait LowercaseUnicode {
    fn to_ascii_lowercase_unicode(self) -> char;
}

impl LowercaseUnicode for char {
    /// Case-folds using Unicode `to_lowercase`, taking the first resulting
    /// scalar for the (rare) multi-character expansions.
    fn to_ascii_lowercase_unicode(self) -> char {
        self.to_lowercase().next().unwrap_or(self)
    }
}
