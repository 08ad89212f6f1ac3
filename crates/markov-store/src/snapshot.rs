//! Single-file snapshot persistence: `deflate(utf8(compact_json(trie)))`,
//! no header or version byte.

use std::fs::File;
use std::io::{Read as _, Write as _};
use std::path::Path;

use flate2::Compression;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use markov_core::Trie;

use crate::error::{Result, StoreError};

/// Load a snapshot from `path`. Parses the whole file into a fresh `Trie`
/// before returning, so a malformed file never leaves a caller with a
/// partially built trie — it either gets the complete structure or an
/// error, nothing in between.
pub fn load(path: &Path) -> Result<Trie> {
    tracing::debug!(path = %path.display(), "loading snapshot");

    let mut compressed = Vec::new();
    File::open(path)?.read_to_end(&mut compressed)?;

    let mut decoder = DeflateDecoder::new(compressed.as_slice());
    let mut json_bytes = Vec::new();
    decoder
        .read_to_end(&mut json_bytes)
        .map_err(|e| StoreError::Corrupt(format!("deflate decode failed: {e}")))?;

    let value: serde_json::Value = serde_json::from_slice(&json_bytes)?;
    let trie = Trie::from_json(&value)?;

    tracing::debug!(path = %path.display(), "snapshot loaded");
    Ok(trie)
}

/// Serialize `trie` to compact JSON, deflate it, and write it to `path`.
pub fn save(trie: &Trie, path: &Path) -> Result<()> {
    tracing::debug!(path = %path.display(), "saving snapshot");

    let value = trie.to_json();
    let json_bytes = serde_json::to_vec(&value)?;

    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&json_bytes)?;
    let compressed = encoder.finish()?;

    let mut file = File::create(path)?;
    file.write_all(&compressed)?;

    tracing::debug!(path = %path.display(), bytes = compressed.len(), "snapshot saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use markov_core::{Neighbor, Pos, Word};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn round_trip_s5() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.bin");

        let mut trie = Trie::new();
        let mut a = Word::new("A", Pos::Noun);
        let mut n = Neighbor::fresh("B", Pos::Verb, 2);
        n.count = 1;
        n.add_distance(1, 2).unwrap();
        a.set_neighbor(n);
        trie.insert(a.clone());

        save(&trie, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.select("A"), Some(a));
    }

    #[test]
    fn load_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.bin");
        std::fs::write(&path, b"not a deflate stream").unwrap();

        assert!(load(&path).is_err());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.bin");
        assert!(matches!(load(&path), Err(StoreError::Io(_))));
    }
}
