use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::error::TableError;
use crate::input::{is_skippable, open_maybe_gz, split_fields};
use crate::table::{ReferenceTable, TableRow};

pub fn load_table(path: &Path) -> Result<ReferenceTable, TableError> {
    let reader = open_maybe_gz(path)?;
    let rows = parse_rows(reader)?;
    let table = ReferenceTable::from_rows(path.display().to_string(), rows)?;
    let (min, max) = table.covariate_range();
    debug!(
        "loaded {} rows from {} (covariate {}..{})",
        table.len(),
        table.name(),
        min,
        max
    );
    Ok(table)
}

/// Parses `covariate L M S [...]` rows.
///
/// The first data line is treated as a header when its first field is not a
/// number. Errors carry 1-based file line numbers.
pub fn parse_rows<R: BufRead>(mut reader: R) -> Result<Vec<TableRow>, TableError> {
    let mut rows: Vec<TableRow> = Vec::new();
    let mut buf = String::new();
    let mut line_no = 0usize;
    let mut header_checked = false;

    loop {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if is_skippable(&buf) {
            continue;
        }
        let fields: Vec<&str> = split_fields(&buf).collect();

        if !header_checked {
            header_checked = true;
            if fields.first().is_some_and(|f| f.parse::<f64>().is_err()) {
                continue;
            }
        }

        if fields.len() < 4 {
            return Err(TableError::Parse {
                line: line_no,
                message: format!("expected at least 4 columns, found {}", fields.len()),
            });
        }
        let mut values = [0.0f64; 4];
        for (slot, raw) in values.iter_mut().zip(&fields) {
            *slot = raw.parse::<f64>().map_err(|_| TableError::Parse {
                line: line_no,
                message: format!("invalid number {raw:?}"),
            })?;
        }
        let row = TableRow::new(values[0], values[1], values[2], values[3]);

        if values.iter().any(|v| !v.is_finite()) {
            return Err(TableError::NonFinite { line: line_no });
        }
        if rows.last().is_some_and(|prev| row.covariate < prev.covariate) {
            return Err(TableError::Unsorted { line: line_no });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(TableError::Empty);
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/table/loader.rs"]
mod tests;
