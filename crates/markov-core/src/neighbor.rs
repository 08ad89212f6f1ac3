//! One word's view of one co-occurring word: counts, rating, and the
//! distance histogram over the training window.

use serde_json::{Value, json};

use crate::error::{MarkovError, Result};
use crate::pos::{Pos, one_hot};

/// A neighbor record. `count` and `rating` are kept as plain integers
/// during training; only the projection step promotes anything to float.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub text: String,
    pub pos: Pos,
    pub count: u64,
    pub rating: i64,
    pub dist: Vec<u32>,
}

impl Neighbor {
    /// A freshly observed neighbor: zeroed count, rating, and histogram.
    pub fn fresh(text: impl Into<String>, pos: Pos, window: u32) -> Neighbor {
        Neighbor {
            text: text.into(),
            pos,
            count: 0,
            rating: 0,
            dist: vec![0; (2 * window + 1) as usize],
        }
    }

    /// A length-`2K+1` vector with a single 1 at `offset + K`.
    pub fn distance_one_hot(offset: i32, window: u32) -> Result<Vec<u32>> {
        if offset.unsigned_abs() > window {
            return Err(MarkovError::OutOfWindow { offset, window });
        }
        let index = (offset + window as i32) as usize;
        one_hot(index, (2 * window + 1) as usize)
    }

    /// Fold a one-hot distance vector into this neighbor's histogram.
    pub fn add_distance(&mut self, offset: i32, window: u32) -> Result<()> {
        let hot = Neighbor::distance_one_hot(offset, window)?;
        for (d, h) in self.dist.iter_mut().zip(hot.iter()) {
            *d += h;
        }
        Ok(())
    }

    /// Serialize to the wire-format array: `[pos_code, [count, rating], dist]`.
    pub fn to_wire(&self) -> Value {
        json!([self.pos.code(), [self.count, self.rating], self.dist])
    }

    /// Parse a wire-format neighbor array back into a `Neighbor`.
    pub fn from_wire(text: &str, value: &Value) -> Option<Neighbor> {
        let arr = value.as_array()?;
        if arr.len() != 3 {
            return None;
        }
        let pos = Pos::from_code(arr[0].as_i64()?)?;
        let values = arr[1].as_array()?;
        if values.len() != 2 {
            return None;
        }
        let count = values[0].as_u64()?;
        let rating = values[1].as_i64()?;
        let dist = arr[2]
            .as_array()?
            .iter()
            .map(|v| v.as_u64().map(|u| u as u32))
            .collect::<Option<Vec<u32>>>()?;
        Some(Neighbor {
            text: text.to_string(),
            pos,
            count,
            rating,
            dist,
        })
    }
}
