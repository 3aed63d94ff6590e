use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::BatchError;
use crate::pipeline::stage1_score::{ScoreRecord, Stage1Output};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    Bands, SummaryData, TableMeta, ToolMeta, format_f64_6, fraction_where, named_stats,
};
use crate::table::ReferenceTable;

pub struct Stage2Input<'a> {
    pub table: &'a ReferenceTable,
    pub stage1: &'a Stage1Output,
    pub tool_name: String,
    pub tool_version: String,
}

pub fn write_reports(input: &Stage2Input<'_>, out_dir: &Path) -> Result<SummaryData, BatchError> {
    fs::create_dir_all(out_dir)?;

    write_centiles_tsv(&input.stage1.records, &out_dir.join("centiles.tsv"))?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary)?;
    write_text(&out_dir.join("summary.json"), &json)?;
    write_text(&out_dir.join("report.txt"), &render_report_text(&summary))?;

    Ok(summary)
}

pub fn build_summary(input: &Stage2Input<'_>) -> SummaryData {
    let records = &input.stage1.records;
    let scores = records.iter().filter_map(|r| r.score).collect::<Vec<_>>();
    let z = scores.iter().map(|s| s.z).collect::<Vec<_>>();
    let centile = scores.iter().map(|s| s.centile).collect::<Vec<_>>();

    let mut failures_by_kind = BTreeMap::new();
    for kind in records.iter().filter_map(|r| r.error_kind) {
        *failures_by_kind.entry(kind.to_string()).or_insert(0usize) += 1;
    }

    let bands = (!scores.is_empty()).then(|| Bands {
        centile_below_3: fraction_where(&centile, |c| c < 0.03),
        centile_above_97: fraction_where(&centile, |c| c > 0.97),
        z_below_minus_2: fraction_where(&z, |v| v < -2.0),
        z_above_plus_2: fraction_where(&z, |v| v > 2.0),
    });

    let table = input.table;
    let (covariate_min, covariate_max) = table.covariate_range();
    let kind = table.kind();

    SummaryData {
        tool: ToolMeta {
            name: input.tool_name.clone(),
            version: input.tool_version.clone(),
        },
        table: TableMeta {
            name: table.name().to_string(),
            kind,
            rows: table.len(),
            covariate_min,
            covariate_max,
            measure: kind.map(|k| format!("{} ({})", k.measure(), k.measure_unit())),
            covariate: kind.map(|k| format!("{} ({})", k.covariate(), k.covariate_unit())),
        },
        centile_convention: "probability",
        n_measurements: records.len(),
        n_scored: scores.len(),
        n_failed: records.len() - scores.len(),
        n_extrapolated: scores.iter().filter(|s| s.extrapolated).count(),
        failures_by_kind,
        z: named_stats("z_score", &z),
        centile: named_stats("centile", &centile),
        bands,
        memo_hits: input.stage1.memo_hits,
        memo_misses: input.stage1.memo_misses,
    }
}

fn write_centiles_tsv(records: &[ScoreRecord], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "id",
        "value",
        "covariate",
        "L",
        "M",
        "S",
        "z_score",
        "centile",
        "percent",
        "extrapolated",
        "error",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    for r in records {
        let mut row = vec![r.id.clone(), r.value.to_string(), r.covariate.to_string()];
        match &r.score {
            Some(s) => {
                row.push(format_f64_6(s.lms.l));
                row.push(format_f64_6(s.lms.m));
                row.push(format_f64_6(s.lms.s));
                row.push(format_f64_6(s.z));
                row.push(format_f64_6(s.centile));
                row.push(format!("{:.2}", s.centile * 100.0));
                row.push(s.extrapolated.to_string());
                row.push(String::new());
            }
            None => {
                row.extend(std::iter::repeat_n(String::new(), 7));
                row.push(r.error.clone().unwrap_or_default());
            }
        }
        writeln!(w, "{}", row.join("\t"))?;
    }
    w.flush()
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.write_all(b"\n")?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_report.rs"]
mod tests;
