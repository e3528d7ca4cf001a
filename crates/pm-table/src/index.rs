//! Multi-level row index.

use crate::error::{TableError, TableResult};
use pm_core::Variable;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Ordered, named row-key levels of a table.
///
/// Keys are stored row-major: one tuple of level values per row, with the
/// first tuple element belonging to the outermost level.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiIndex {
    levels: Vec<Variable>,
    keys: Vec<Vec<f64>>,
}

impl MultiIndex {
    /// Build an index from level names and row keys.
    ///
    /// # Errors
    /// Fails when a level name repeats or a key tuple does not match the
    /// number of levels.
    pub fn new(levels: Vec<Variable>, keys: Vec<Vec<f64>>) -> TableResult<Self> {
        let mut seen = HashSet::new();
        for level in &levels {
            if !seen.insert(*level) {
                return Err(TableError::DuplicateLevel(*level));
            }
        }
        for key in &keys {
            if key.len() != levels.len() {
                return Err(TableError::ShapeMismatch {
                    what: "row key",
                    expected: levels.len(),
                    got: key.len(),
                });
            }
        }
        Ok(Self { levels, keys })
    }

    /// Crate-internal constructor for parts already known to be coherent.
    pub(crate) fn from_parts(levels: Vec<Variable>, keys: Vec<Vec<f64>>) -> Self {
        Self { levels, keys }
    }

    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn n_rows(&self) -> usize {
        self.keys.len()
    }

    pub fn levels(&self) -> &[Variable] {
        &self.levels
    }

    pub fn keys(&self) -> &[Vec<f64>] {
        &self.keys
    }

    /// Position of a level, outermost first.
    pub fn position(&self, level: Variable) -> TableResult<usize> {
        self.levels
            .iter()
            .position(|l| *l == level)
            .ok_or(TableError::UnknownLevel(level))
    }

    /// The value of `level` for every row, in row order.
    pub fn level_values(&self, level: Variable) -> TableResult<Vec<f64>> {
        let pos = self.position(level)?;
        Ok(self.keys.iter().map(|key| key[pos]).collect())
    }

    /// Distinct values of `level`, in order of first appearance.
    pub fn unique_level_values(&self, level: Variable) -> TableResult<Vec<f64>> {
        let pos = self.position(level)?;
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for key in &self.keys {
            let v = key[pos];
            if seen.insert(v.to_bits()) {
                unique.push(v);
            }
        }
        Ok(unique)
    }

    /// Stable row permutation that sorts keys lexicographically.
    pub fn sort_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.keys.len()).collect();
        order.sort_by(|&a, &b| compare_keys(&self.keys[a], &self.keys[b]));
        order
    }

    /// Apply a row permutation produced by [`MultiIndex::sort_order`].
    pub fn permuted(&self, order: &[usize]) -> Self {
        let keys = order.iter().map(|&i| self.keys[i].clone()).collect();
        Self {
            levels: self.levels.clone(),
            keys,
        }
    }

    /// Reorder levels to the given order, which must name each existing
    /// level exactly once.
    pub fn reordered(&self, order: &[Variable]) -> TableResult<Self> {
        if order.len() != self.levels.len() {
            return Err(TableError::BadLevelOrder {
                what: "order must name every level",
            });
        }
        let mut positions = Vec::with_capacity(order.len());
        let mut seen = HashSet::new();
        for level in order {
            if !seen.insert(*level) {
                return Err(TableError::BadLevelOrder {
                    what: "order names a level twice",
                });
            }
            positions.push(self.position(*level)?);
        }
        let keys = self
            .keys
            .iter()
            .map(|key| positions.iter().map(|&p| key[p]).collect())
            .collect();
        Ok(Self {
            levels: order.to_vec(),
            keys,
        })
    }

    /// Remove a level, collapsing rows whose remaining keys become
    /// duplicates (the first occurrence wins). Returns the new index and
    /// the indices of the surviving rows.
    pub fn without_level(&self, level: Variable) -> TableResult<(Self, Vec<usize>)> {
        let pos = self.position(level)?;
        let mut seen = HashSet::new();
        let mut keys = Vec::new();
        let mut kept = Vec::new();
        for (row, key) in self.keys.iter().enumerate() {
            let mut reduced: Vec<f64> = key.clone();
            reduced.remove(pos);
            let bits: Vec<u64> = reduced.iter().map(|v| v.to_bits()).collect();
            if seen.insert(bits) {
                keys.push(reduced);
                kept.push(row);
            }
        }
        let mut levels = self.levels.clone();
        levels.remove(pos);
        Ok((Self { levels, keys }, kept))
    }

    /// Insert a new outermost level holding `value` for every row.
    pub fn with_outer_level(&self, level: Variable, value: f64) -> TableResult<Self> {
        if self.levels.contains(&level) {
            return Err(TableError::DuplicateLevel(level));
        }
        let mut levels = Vec::with_capacity(self.levels.len() + 1);
        levels.push(level);
        levels.extend_from_slice(&self.levels);
        let keys = self
            .keys
            .iter()
            .map(|key| {
                let mut out = Vec::with_capacity(key.len() + 1);
                out.push(value);
                out.extend_from_slice(key);
                out
            })
            .collect();
        Ok(Self { levels, keys })
    }
}

/// Lexicographic total order over key tuples.
fn compare_keys(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = x.total_cmp(y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}
