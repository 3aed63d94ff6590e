use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("kira-lmscentile").chain(args.iter().copied()))
}

#[test]
fn test_parse_score() {
    let cli = parse(&[
        "score", "--table", "wfa.tsv", "--value", "12.5", "--at", "24", "--kind", "weight-age",
    ])
    .unwrap();
    assert_eq!(cli.log_level, "info");
    match cli.command {
        Command::Score {
            table,
            value,
            at,
            json,
        } => {
            assert_eq!(table.table, PathBuf::from("wfa.tsv"));
            assert_eq!(table.kind, Some(TableKind::WeightForAge));
            assert_eq!(value, 12.5);
            assert_eq!(at, 24.0);
            assert!(!json);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_parse_negative_z() {
    let cli = parse(&["centile", "--z", "-1.5", "--log-level", "debug"]).unwrap();
    assert_eq!(cli.log_level, "debug");
    assert!(matches!(cli.command, Command::Centile { z } if z == -1.5));
}

#[test]
fn test_parse_value_requires_exactly_one_target() {
    assert!(parse(&["value", "--table", "t", "--at", "3"]).is_err());
    assert!(
        parse(&[
            "value", "--table", "t", "--at", "3", "--z", "1", "--centile", "0.5",
        ])
        .is_err()
    );
    let cli = parse(&["value", "--table", "t", "--at", "3", "--centile", "0.97"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Value { z: None, centile: Some(p), .. } if p == 0.97
    ));
}

#[test]
fn test_parse_rejects_unknown_kind() {
    assert!(
        parse(&[
            "score", "--table", "t", "--value", "1", "--at", "1", "--kind", "arm-span",
        ])
        .is_err()
    );
}

#[test]
fn test_parse_batch() {
    let cli = parse(&["batch", "--table", "t.gz", "--input", "m.tsv", "--out", "out"]).unwrap();
    match cli.command {
        Command::Batch { table, input, out } => {
            assert_eq!(table.table, PathBuf::from("t.gz"));
            assert!(table.kind.is_none());
            assert_eq!(input, PathBuf::from("m.tsv"));
            assert_eq!(out, PathBuf::from("out"));
        }
        other => panic!("unexpected {other:?}"),
    }
}
