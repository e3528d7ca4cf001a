use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use pm_core::Quantity::Power;
use pm_core::Variable::{Tdbo, Tdbr};
use pm_map::{MajorOrder, PerformanceMap};
use pm_table::{MultiIndex, Table};

fn unique_temp_file(prefix: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    path.push(format!("{}_{}.dat", prefix, nanos));
    path
}

/// Two Tdbr values by three Tdbo values, one output column.
fn sample_map() -> PerformanceMap {
    let index = MultiIndex::new(
        vec![Tdbr, Tdbo],
        vec![
            vec![20.0, 5.0],
            vec![20.0, 10.0],
            vec![20.0, 15.0],
            vec![25.0, 5.0],
            vec![25.0, 10.0],
            vec![25.0, 15.0],
        ],
    )
    .unwrap();
    let table = Table::new(index, vec![(Power, vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0])]).unwrap();
    PerformanceMap::new(table)
}

#[test]
fn row_major_layout_matches_contract() {
    let path = unique_temp_file("pm_export_row");
    sample_map()
        .print_permap(&path, MajorOrder::Row)
        .expect("export should succeed");
    let written = fs::read_to_string(&path).expect("file should exist");
    fs::remove_file(&path).ok();

    let expected = "\
!#
!# This is a data file for Type 3254. Do not change the format.
!# In PARTICULAR, LINES STARTING WITH !# MUST BE LEFT IN THE FILE AT THEIR LOCATION.
!# Comments within \"normal lines\" (not starting with !#) are optional but the data must be there.
!#
!# Independent variables
!#
!# Number of Tdbr data points
   2
!# Number of Tdbo data points
   3
!# Tdbr values
   20\t25
!# Tdbo values
   5\t10\t15
!#
!# Performance map
!#
!#\tTdbr\tTdbo\tpower
\t20\t5\t0.5
\t20\t10\t1
\t20\t15\t1.5
\t25\t5\t2
\t25\t10\t2.5
\t25\t15\t3
";
    assert_eq!(written, expected);
}

#[test]
fn column_major_reverses_body_levels_only() {
    let path = unique_temp_file("pm_export_col");
    sample_map()
        .print_permap(&path, MajorOrder::Col)
        .expect("export should succeed");
    let written = fs::read_to_string(&path).expect("file should exist");
    fs::remove_file(&path).ok();

    // The preamble keeps the original level order...
    let counts_tdbr = written.find("!# Number of Tdbr data points").unwrap();
    let counts_tdbo = written.find("!# Number of Tdbo data points").unwrap();
    assert!(counts_tdbr < counts_tdbo);

    // ...while the body flips it, so Tdbo becomes the slow axis.
    assert!(written.contains("!#\tTdbo\tTdbr\tpower\n"));
    let body: Vec<&str> = written
        .lines()
        .skip_while(|l| !l.starts_with("!#\t"))
        .skip(1)
        .collect();
    assert_eq!(body[0], "\t5\t20\t0.5");
    assert_eq!(body[1], "\t5\t25\t2");
}

#[test]
fn values_are_rounded_to_ten_digits() {
    let index = MultiIndex::new(vec![Tdbr], vec![vec![20.0]]).unwrap();
    let table = Table::new(index, vec![(Power, vec![0.123456789012345])]).unwrap();
    let path = unique_temp_file("pm_export_round");
    PerformanceMap::new(table)
        .print_permap(&path, MajorOrder::Row)
        .unwrap();
    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).ok();
    assert!(written.contains("\t0.123456789\n"));
    assert!(!written.contains("0.123456789012345"));
}
