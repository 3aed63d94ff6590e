use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;
use crate::error::BatchError;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_lms_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

#[test]
fn test_open_maybe_gz_reads_both() {
    let dir = make_temp_dir();
    let plain = dir.join("a.txt");
    let gz = dir.join("a.txt.gz");
    fs::write(&plain, "x\ny\n").unwrap();
    write_gz(&gz, "x\ny\n");

    for path in [plain, gz] {
        let lines = open_maybe_gz(&path)
            .unwrap()
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(lines, vec!["x".to_string(), "y".to_string()]);
    }
}

#[test]
fn test_split_fields_and_skippable() {
    let fields = split_fields(" 1.5,\t2  3 ,4\n").collect::<Vec<_>>();
    assert_eq!(fields, vec!["1.5", "2", "3", "4"]);
    assert!(is_skippable("   \n"));
    assert!(is_skippable("  # note"));
    assert!(!is_skippable("0 1 2 3"));
}

#[test]
fn test_load_measurements_with_age_alias() {
    let dir = make_temp_dir();
    let path = dir.join("m.tsv");
    fs::write(
        &path,
        "ID\tAge\tValue\tnote\np1\t11\t55.0\tx\n\np2\t10.5\t48.2\t\n",
    )
    .unwrap();

    let rows = load_measurements(&path).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        Measurement {
            id: "p1".to_string(),
            value: 55.0,
            covariate: 11.0,
        }
    );
    assert_eq!(rows[1].covariate, 10.5);
}

#[test]
fn test_load_measurements_without_id_column() {
    let dir = make_temp_dir();
    let path = dir.join("m.tsv.gz");
    write_gz(&path, "covariate\tvalue\n1\t2\n3\t4\n");

    let rows = load_measurements(&path).unwrap();
    assert_eq!(rows[0].id, "row1");
    assert_eq!(rows[1].id, "row2");
    assert_eq!(rows[1].value, 4.0);
}

#[test]
fn test_load_measurements_errors() {
    let dir = make_temp_dir();

    let missing = dir.join("missing.tsv");
    fs::write(&missing, "id\tage\n1\t2\n").unwrap();
    assert!(matches!(
        load_measurements(&missing),
        Err(BatchError::MissingColumn("value"))
    ));

    let bad = dir.join("bad.tsv");
    fs::write(&bad, "id\tage\tvalue\na\t1\t2\nb\t1\tabc\n").unwrap();
    match load_measurements(&bad) {
        Err(BatchError::Parse { line, message }) => {
            assert_eq!(line, 3);
            assert!(message.contains("value"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let empty = dir.join("empty.tsv");
    fs::write(&empty, "id\tage\tvalue\n").unwrap();
    assert!(matches!(
        load_measurements(&empty),
        Err(BatchError::EmptyInput)
    ));
}
