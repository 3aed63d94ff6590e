pub mod json;
pub mod text;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::table::TableKind;

#[derive(Debug, Clone, Serialize)]
pub struct NamedStats {
    pub name: &'static str,
    pub min: f64,
    pub p10: f64,
    pub median: f64,
    pub p90: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableMeta {
    pub name: String,
    pub kind: Option<TableKind>,
    pub rows: usize,
    pub covariate_min: f64,
    pub covariate_max: f64,
    pub measure: Option<String>,
    pub covariate: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Bands {
    pub centile_below_3: f64,
    pub centile_above_97: f64,
    pub z_below_minus_2: f64,
    pub z_above_plus_2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: ToolMeta,
    pub table: TableMeta,
    pub centile_convention: &'static str,

    pub n_measurements: usize,
    pub n_scored: usize,
    pub n_failed: usize,
    pub n_extrapolated: usize,
    pub failures_by_kind: BTreeMap<String, usize>,

    pub z: Option<NamedStats>,
    pub centile: Option<NamedStats>,
    pub bands: Option<Bands>,

    pub memo_hits: u64,
    pub memo_misses: u64,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn named_stats(name: &'static str, values: &[f64]) -> Option<NamedStats> {
    if values.is_empty() {
        return None;
    }
    Some(NamedStats {
        name,
        min: quantile_indexed(values, 0.0),
        p10: p10(values),
        median: median(values),
        p90: p90(values),
        max: quantile_indexed(values, 1.0),
    })
}

pub fn fraction_where(values: &[f64], pred: impl Fn(f64) -> bool) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let count = values.iter().filter(|&&v| pred(v)).count();
    count as f64 / values.len() as f64
}
