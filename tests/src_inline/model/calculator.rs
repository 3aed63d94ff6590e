use super::*;
use crate::model::normal::StandardNormal;
use crate::table::TableRow;

fn table() -> ReferenceTable {
    ReferenceTable::from_rows(
        "bmi",
        vec![
            TableRow::new(0.0, -0.3, 13.4, 0.09),
            TableRow::new(10.0, 1.0, 50.0, 0.10),
            TableRow::new(12.0, 1.0, 60.0, 0.12),
            TableRow::new(24.0, 0.5, 80.0, 0.10),
        ],
    )
    .unwrap()
}

/// Provider that returns a fixed value so tests can see it is consulted.
struct Constant(f64);

impl NormalDistribution for Constant {
    fn cdf(&self, _z: f64) -> f64 {
        self.0
    }

    fn quantile(&self, _p: f64) -> f64 {
        0.0
    }
}

#[test]
fn test_centile_of_z_uses_provider_only() {
    let table = table();
    let normal = StandardNormal;
    let calc = CentileCalculator::new(&table, &normal);
    assert_eq!(calc.centile_of_z(0.0), normal.cdf(0.0));
    assert_eq!(calc.memo().misses(), 0);

    let constant = Constant(0.42);
    let calc = CentileCalculator::new(&table, &constant);
    assert_eq!(calc.centile_of_z(-7.0), 0.42);
}

#[test]
fn test_z_score_and_centile_at_interpolated_covariate() {
    let table = table();
    let normal = StandardNormal;
    let mut calc = CentileCalculator::new(&table, &normal);

    // LMS at 11 is (1, 55, 0.11), so 55 is the median.
    let z = calc.z_score(55.0, 11.0).unwrap();
    assert!(z.abs() < 1e-12);
    let centile = calc.centile(55.0, 11.0).unwrap();
    assert!((centile - 0.5).abs() < 1e-12);

    let z = calc.z_score(55.0 * 1.11, 11.0).unwrap();
    assert!((z - 1.0).abs() < 1e-9);
}

#[test]
fn test_score_reports_lms_and_extrapolation() {
    let table = table();
    let normal = StandardNormal;
    let mut calc = CentileCalculator::new(&table, &normal);

    let score = calc.score(70.0, 10.0).unwrap();
    assert_eq!(score.lms.m, 50.0);
    assert!(score.extrapolated);
    assert!((score.z - 4.0).abs() < 1e-9);
    assert!((score.centile - normal.cdf(score.z)).abs() < 1e-15);

    let score = calc.score(52.0, 10.0).unwrap();
    assert!(!score.extrapolated);
}

#[test]
fn test_errors_propagate_unmodified() {
    let table = table();
    let normal = StandardNormal;
    let mut calc = CentileCalculator::new(&table, &normal);

    assert!(matches!(
        calc.z_score(50.0, 30.0),
        Err(CentileError::OutOfRange { covariate, .. }) if covariate == 30.0
    ));
    assert!(matches!(
        calc.centile(50.0, -1.0),
        Err(CentileError::OutOfRange { .. })
    ));
    assert!(matches!(
        calc.score(0.0, 10.0),
        Err(CentileError::InvalidMeasurement(_))
    ));

    let broken = ReferenceTable::from_rows("broken", vec![TableRow::new(1.0, 1.0, 0.0, 0.1)])
        .unwrap();
    let mut calc = CentileCalculator::new(&broken, &normal);
    assert!(matches!(
        calc.z_score(5.0, 1.0),
        Err(CentileError::InvalidModel(_))
    ));
}

#[test]
fn test_repeated_covariate_hits_memo() {
    let table = table();
    let normal = StandardNormal;
    let mut calc = CentileCalculator::new(&table, &normal);

    let a = calc.resolve(18.0).unwrap();
    let b = calc.resolve(18.0).unwrap();
    assert_eq!(a.m.to_bits(), b.m.to_bits());
    assert_eq!(calc.memo().hits(), 1);

    calc.z_score(13.0, 0.0).unwrap();
    calc.z_score(13.5, 0.0).unwrap();
    assert_eq!(calc.memo().hits(), 1);
    assert_eq!(calc.memo().misses(), 3);
}

#[test]
fn test_value_at_and_value_for_centile() {
    let table = table();
    let normal = StandardNormal;
    let mut calc = CentileCalculator::new(&table, &normal);

    assert!((calc.value_for_centile(0.5, 10.0).unwrap() - 50.0).abs() < 1e-12);
    assert!((calc.value_at(2.0, 10.0).unwrap() - 60.0).abs() < 1e-9);
    assert!((calc.value_at(4.0, 10.0).unwrap() - 70.0).abs() < 1e-9);

    let x = calc.value_for_centile(0.97, 18.0).unwrap();
    let back = calc.centile(x, 18.0).unwrap();
    assert!((back - 0.97).abs() < 1e-9);

    for p in [0.0, 1.0, -0.5, f64::NAN] {
        assert!(matches!(
            calc.value_for_centile(p, 10.0),
            Err(CentileError::InvalidProbability(_))
        ));
    }
}
