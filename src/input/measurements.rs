use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::error::BatchError;
use crate::input::{is_skippable, open_maybe_gz};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub id: String,
    pub value: f64,
    pub covariate: f64,
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    id: Option<usize>,
    value: usize,
    covariate: usize,
}

fn resolve_columns(header: &[String]) -> Result<Columns, BatchError> {
    let mut id = None;
    let mut value = None;
    let mut covariate = None;
    for (idx, name) in header.iter().enumerate() {
        match name.to_ascii_lowercase().as_str() {
            "id" => id = id.or(Some(idx)),
            "value" => value = value.or(Some(idx)),
            "covariate" | "age" => covariate = covariate.or(Some(idx)),
            _ => {}
        }
    }
    Ok(Columns {
        id,
        value: value.ok_or(BatchError::MissingColumn("value"))?,
        covariate: covariate.ok_or(BatchError::MissingColumn("covariate"))?,
    })
}

fn parse_field(fields: &[&str], idx: usize, name: &str, line_no: usize) -> Result<f64, BatchError> {
    let raw = fields.get(idx).map(|s| s.trim()).unwrap_or("");
    raw.parse::<f64>().map_err(|_| BatchError::Parse {
        line: line_no,
        message: format!("invalid {name} {raw:?}"),
    })
}

/// Reads a tab-separated measurement file with a header naming `value` and
/// `covariate` (or `age`), plus an optional `id` column.
pub fn load_measurements(path: &Path) -> Result<Vec<Measurement>, BatchError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut line_no = 0usize;

    let header = loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            return Err(BatchError::EmptyInput);
        }
        line_no += 1;
        if !is_skippable(&buf) {
            break buf
                .trim_end()
                .split('\t')
                .map(|s| s.trim().to_string())
                .collect::<Vec<_>>();
        }
    };
    let columns = resolve_columns(&header)?;

    let mut out = Vec::new();
    let mut seen = HashSet::new();
    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if is_skippable(&buf) {
            continue;
        }
        let fields: Vec<&str> = buf.trim_end().split('\t').collect();
        let value = parse_field(&fields, columns.value, "value", line_no)?;
        let covariate = parse_field(&fields, columns.covariate, "covariate", line_no)?;
        let id = columns
            .id
            .and_then(|idx| fields.get(idx))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("row{}", out.len() + 1));
        if !seen.insert(id.clone()) {
            warn!("duplicate measurement id {} (line {})", id, line_no);
        }
        out.push(Measurement {
            id,
            value,
            covariate,
        });
    }

    if out.is_empty() {
        return Err(BatchError::EmptyInput);
    }
    Ok(out)
}
