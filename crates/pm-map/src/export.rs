//! Fixed-format writer for TRNSYS Type 3254 performance files.
//!
//! The layout is a binding contract with the external reader: a fixed
//! warning banner, per-level data-point counts and value lists (outermost
//! level first), a performance-map banner and the tab-separated body. The
//! preamble is assembled with sequential prepend-by-rewrite passes over the
//! written file, which assumes a single writer per path.

use crate::error::{MapError, MapResult};
use crate::permap::PerformanceMap;
use pm_core::round_to;
use pm_table::Table;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Layout of the serialized table body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorOrder {
    /// Innermost index level varies fastest.
    Row,
    /// Index levels reversed, so the outermost level varies fastest.
    Col,
}

impl MajorOrder {
    /// Parse `"row"` or `"col"`, case-insensitively.
    pub fn parse(text: &str) -> MapResult<Self> {
        match text.to_lowercase().as_str() {
            "row" => Ok(MajorOrder::Row),
            "col" => Ok(MajorOrder::Col),
            _ => Err(MapError::InvalidMajorOrder {
                given: text.to_string(),
            }),
        }
    }
}

impl FromStr for MajorOrder {
    type Err = MapError;

    fn from_str(s: &str) -> MapResult<Self> {
        MajorOrder::parse(s)
    }
}

const HEADER_BANNER: &str = "!#\n\
!# This is a data file for Type 3254. Do not change the format.\n\
!# In PARTICULAR, LINES STARTING WITH !# MUST BE LEFT IN THE FILE AT THEIR LOCATION.\n\
!# Comments within \"normal lines\" (not starting with !#) are optional but the data must be there.\n\
!#\n\
!# Independent variables\n\
!#";

const MAP_BANNER: &str = "!#\n!# Performance map\n!#";

impl PerformanceMap {
    /// Write the performance map in the Type 3254 format.
    ///
    /// # Errors
    /// I/O errors from the target path; [`MapError::InvalidMajorOrder`] is
    /// only produced by [`MajorOrder::parse`], so a typed `order` never
    /// fails validation here.
    pub fn print_permap(&self, path: impl AsRef<Path>, order: MajorOrder) -> MapResult<()> {
        let path = path.as_ref();
        fs::write(path, body(self.table(), order)?)?;
        prepend(path, MAP_BANNER)?;
        let levels = self.table().index().levels().to_vec();
        for &level in levels.iter().rev() {
            let values = self.table().unique_level_values(level)?;
            let joined = values
                .iter()
                .map(|v| fmt_value(*v))
                .collect::<Vec<_>>()
                .join("\t");
            prepend(path, &format!("!# {level} values\n   {joined}"))?;
        }
        for &level in levels.iter().rev() {
            let count = self.table().unique_level_values(level)?.len();
            prepend(path, &format!("!# Number of {level} data points\n   {count}"))?;
        }
        prepend(path, HEADER_BANNER)?;
        Ok(())
    }
}

/// Serialize the sorted table body, header row included.
///
/// The leading `!#` header field and the empty first field of every data
/// row stand in for a pseudo index level, so readers can treat the header
/// as one more comment line.
fn body(table: &Table, order: MajorOrder) -> MapResult<String> {
    let table = match order {
        MajorOrder::Row => table.sorted_by_index(),
        MajorOrder::Col => {
            let mut levels = table.index().levels().to_vec();
            levels.reverse();
            table.reorder_levels(&levels)?.sorted_by_index()
        }
    };
    let mut out = String::new();
    let mut header = vec!["!#".to_string()];
    header.extend(table.index().levels().iter().map(|l| l.to_string()));
    header.extend(table.columns().iter().map(|c| c.to_string()));
    out.push_str(&header.join("\t"));
    out.push('\n');

    let columns: Vec<&[f64]> = table
        .columns()
        .iter()
        .map(|&c| table.column(c))
        .collect::<Result<_, _>>()?;
    for (row, key) in table.index().keys().iter().enumerate() {
        let mut fields = vec![String::new()];
        fields.extend(key.iter().map(|v| fmt_value(*v)));
        fields.extend(columns.iter().map(|col| fmt_value(col[row])));
        out.push_str(&fields.join("\t"));
        out.push('\n');
    }
    Ok(out)
}

/// Rewrite the file with `text` on top of the existing content.
fn prepend(path: &Path, text: &str) -> MapResult<()> {
    let existing = fs::read_to_string(path)?;
    let mut content = String::with_capacity(text.len() + 1 + existing.len());
    content.push_str(text.trim_end_matches(['\r', '\n']));
    content.push('\n');
    content.push_str(&existing);
    fs::write(path, content)?;
    Ok(())
}

/// Ten-decimal-digit rounding, shortest decimal form.
fn fmt_value(v: f64) -> String {
    let r = round_to(v, 10);
    // normalize negative zero
    let r = if r == 0.0 { 0.0 } else { r };
    format!("{r}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_order_case_insensitively() {
        assert_eq!(MajorOrder::parse("row").unwrap(), MajorOrder::Row);
        assert_eq!(MajorOrder::parse("COL").unwrap(), MajorOrder::Col);
        assert_eq!("Row".parse::<MajorOrder>().unwrap(), MajorOrder::Row);
        assert!(matches!(
            MajorOrder::parse("diagonal"),
            Err(MapError::InvalidMajorOrder { .. })
        ));
    }

    #[test]
    fn values_round_to_ten_digits() {
        assert_eq!(fmt_value(0.123456789012345), "0.123456789");
        assert_eq!(fmt_value(1.0), "1");
        assert_eq!(fmt_value(-0.0), "0");
        assert_eq!(fmt_value(0.1), "0.1");
    }
}
