//! Performance-data tables.

use crate::error::{TableError, TableResult};
use crate::index::MultiIndex;
use pm_core::{Quantity, Variable};

/// A numeric table with a multi-level row index and named output columns.
///
/// Data is stored column-major. Every transforming operation returns a new
/// table; nothing mutates in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    index: MultiIndex,
    columns: Vec<Quantity>,
    data: Vec<Vec<f64>>,
    axis_label: Option<String>,
}

impl Table {
    /// Build a table from an index and `(quantity, values)` columns.
    ///
    /// # Errors
    /// Fails on repeated column names or columns whose length differs from
    /// the number of index rows.
    pub fn new(index: MultiIndex, columns: Vec<(Quantity, Vec<f64>)>) -> TableResult<Self> {
        let mut names = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (quantity, values) in columns {
            if names.contains(&quantity) {
                return Err(TableError::DuplicateColumn(quantity));
            }
            if values.len() != index.n_rows() {
                return Err(TableError::ShapeMismatch {
                    what: "column",
                    expected: index.n_rows(),
                    got: values.len(),
                });
            }
            names.push(quantity);
            data.push(values);
        }
        Ok(Self {
            index,
            columns: names,
            data,
            axis_label: None,
        })
    }

    pub fn index(&self) -> &MultiIndex {
        &self.index
    }

    pub fn n_rows(&self) -> usize {
        self.index.n_rows()
    }

    pub fn columns(&self) -> &[Quantity] {
        &self.columns
    }

    pub fn has_column(&self, quantity: Quantity) -> bool {
        self.columns.contains(&quantity)
    }

    /// Label attached to the column axis (the operating mode name).
    pub fn axis_label(&self) -> Option<&str> {
        self.axis_label.as_deref()
    }

    pub fn with_axis_label(&self, label: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.axis_label = Some(label.into());
        new
    }

    fn column_position(&self, quantity: Quantity) -> TableResult<usize> {
        self.columns
            .iter()
            .position(|c| *c == quantity)
            .ok_or(TableError::UnknownColumn(quantity))
    }

    pub fn column(&self, quantity: Quantity) -> TableResult<&[f64]> {
        Ok(&self.data[self.column_position(quantity)?])
    }

    /// Append a column.
    pub fn with_column(&self, quantity: Quantity, values: Vec<f64>) -> TableResult<Self> {
        if self.has_column(quantity) {
            return Err(TableError::DuplicateColumn(quantity));
        }
        if values.len() != self.n_rows() {
            return Err(TableError::ShapeMismatch {
                what: "column",
                expected: self.n_rows(),
                got: values.len(),
            });
        }
        let mut new = self.clone();
        new.columns.push(quantity);
        new.data.push(values);
        Ok(new)
    }

    pub fn without_column(&self, quantity: Quantity) -> TableResult<Self> {
        let pos = self.column_position(quantity)?;
        let mut new = self.clone();
        new.columns.remove(pos);
        new.data.remove(pos);
        Ok(new)
    }

    /// Keep only the named columns, in the given order.
    pub fn select_columns(&self, order: &[Quantity]) -> TableResult<Self> {
        let mut columns = Vec::with_capacity(order.len());
        let mut data = Vec::with_capacity(order.len());
        for &quantity in order {
            let pos = self.column_position(quantity)?;
            columns.push(quantity);
            data.push(self.data[pos].clone());
        }
        Ok(Self {
            index: self.index.clone(),
            columns,
            data,
            axis_label: self.axis_label.clone(),
        })
    }

    /// Multiply every value of a column by a factor.
    pub fn scale_column(&self, quantity: Quantity, factor: f64) -> TableResult<Self> {
        let pos = self.column_position(quantity)?;
        let mut new = self.clone();
        for v in &mut new.data[pos] {
            *v *= factor;
        }
        Ok(new)
    }

    pub fn level_values(&self, level: Variable) -> TableResult<Vec<f64>> {
        self.index.level_values(level)
    }

    pub fn unique_level_values(&self, level: Variable) -> TableResult<Vec<f64>> {
        self.index.unique_level_values(level)
    }

    /// Reorder the index levels, leaving rows in place.
    pub fn reorder_levels(&self, order: &[Variable]) -> TableResult<Self> {
        Ok(Self {
            index: self.index.reordered(order)?,
            columns: self.columns.clone(),
            data: self.data.clone(),
            axis_label: self.axis_label.clone(),
        })
    }

    /// Sort rows lexicographically by their index keys (stable).
    pub fn sorted_by_index(&self) -> Self {
        let order = self.index.sort_order();
        let data = self
            .data
            .iter()
            .map(|col| order.iter().map(|&i| col[i]).collect())
            .collect();
        Self {
            index: self.index.permuted(&order),
            columns: self.columns.clone(),
            data,
            axis_label: self.axis_label.clone(),
        }
    }

    /// Drop an index level, collapsing rows that become duplicates
    /// (first occurrence wins).
    pub fn drop_level(&self, level: Variable) -> TableResult<Self> {
        let (index, kept) = self.index.without_level(level)?;
        let data = self
            .data
            .iter()
            .map(|col| kept.iter().map(|&i| col[i]).collect())
            .collect();
        Ok(Self {
            index,
            columns: self.columns.clone(),
            data,
            axis_label: self.axis_label.clone(),
        })
    }

    /// Concatenate blocks under a new outermost level.
    ///
    /// Block `i` is keyed by `entries[i]`; all blocks must share the same
    /// levels and columns.
    pub fn concat_new_level(
        level: Variable,
        entries: &[f64],
        blocks: &[Table],
    ) -> TableResult<Self> {
        if entries.len() != blocks.len() {
            return Err(TableError::ConcatMismatch {
                what: "one entry is needed per block",
            });
        }
        let first = blocks.first().ok_or(TableError::ConcatMismatch {
            what: "at least one block is needed",
        })?;
        let mut index: Option<MultiIndex> = None;
        let mut data: Vec<Vec<f64>> = vec![Vec::new(); first.columns.len()];
        for (&entry, block) in entries.iter().zip(blocks) {
            if block.index.levels() != first.index.levels() {
                return Err(TableError::ConcatMismatch {
                    what: "blocks disagree on index levels",
                });
            }
            if block.columns != first.columns {
                return Err(TableError::ConcatMismatch {
                    what: "blocks disagree on columns",
                });
            }
            let block_index = block.index.with_outer_level(level, entry)?;
            index = Some(match index {
                None => block_index,
                Some(acc) => append_index(acc, block_index),
            });
            for (col, values) in data.iter_mut().zip(&block.data) {
                col.extend_from_slice(values);
            }
        }
        Ok(Self {
            // index is Some: blocks is non-empty
            index: index.ok_or(TableError::ConcatMismatch {
                what: "at least one block is needed",
            })?,
            columns: first.columns.clone(),
            data,
            axis_label: first.axis_label.clone(),
        })
    }
}

fn append_index(a: MultiIndex, b: MultiIndex) -> MultiIndex {
    let levels = a.levels().to_vec();
    let mut keys = a.keys().to_vec();
    keys.extend_from_slice(b.keys());
    MultiIndex::from_parts(levels, keys)
}
