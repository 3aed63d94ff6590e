pub mod kind;
pub mod loader;
pub mod memo;
pub mod search;

use serde::Serialize;

use crate::error::{CentileError, TableError};

pub use kind::TableKind;
pub use memo::LmsMemo;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub covariate: f64,
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl TableRow {
    pub fn new(covariate: f64, l: f64, m: f64, s: f64) -> Self {
        Self { covariate, l, m, s }
    }

    pub fn lms(&self) -> Lms {
        Lms {
            l: self.l,
            m: self.m,
            s: self.s,
        }
    }

    fn is_finite(&self) -> bool {
        self.covariate.is_finite() && self.l.is_finite() && self.m.is_finite() && self.s.is_finite()
    }
}

/// Box-Cox power (L), median (M) and coefficient of variation (S) at one covariate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Lms {
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

/// Immutable LMS reference table, rows sorted ascending by covariate.
///
/// Resolution through [`ReferenceTable::lookup`] is pure; memoization lives in
/// [`LmsMemo`] so that a shared table never carries mutable state.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    name: String,
    kind: Option<TableKind>,
    rows: Vec<TableRow>,
}

impl ReferenceTable {
    /// Builds a table from already-ordered rows.
    ///
    /// Row positions in errors are 1-based.
    pub fn from_rows(name: impl Into<String>, rows: Vec<TableRow>) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::Empty);
        }
        for (idx, row) in rows.iter().enumerate() {
            if !row.is_finite() {
                return Err(TableError::NonFinite { line: idx + 1 });
            }
            if idx > 0 && row.covariate < rows[idx - 1].covariate {
                return Err(TableError::Unsorted { line: idx + 1 });
            }
        }
        Ok(Self {
            name: name.into(),
            kind: None,
            rows,
        })
    }

    pub fn with_kind(mut self, kind: TableKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<TableKind> {
        self.kind
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn covariate_range(&self) -> (f64, f64) {
        // Non-empty by construction.
        let first = self.rows[0].covariate;
        let last = self.rows[self.rows.len() - 1].covariate;
        (first, last)
    }

    /// Resolves the LMS triple at `covariate`, interpolating linearly between
    /// the tightest bounding rows when no row matches exactly.
    pub fn lookup(&self, covariate: f64) -> Result<Lms, CentileError> {
        let (min, max) = self.covariate_range();
        let out_of_range = CentileError::OutOfRange {
            covariate,
            min,
            max,
        };
        if !covariate.is_finite() || covariate < min || covariate > max {
            return Err(out_of_range);
        }

        if let Some(idx) = search::exact_index(&self.rows, covariate) {
            return Ok(self.rows[idx].lms());
        }

        let Some((lower, higher)) = search::bounding_indices(&self.rows, covariate) else {
            return Err(out_of_range);
        };
        let lo = &self.rows[lower];
        let hi = &self.rows[higher];
        let x0 = lo.covariate;
        let x1 = hi.covariate;

        Ok(Lms {
            l: search::interpolate(covariate, x0, x1, lo.l, hi.l)?,
            m: search::interpolate(covariate, x0, x1, lo.m, hi.m)?,
            s: search::interpolate(covariate, x0, x1, lo.s, hi.s)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/table/tests.rs"]
mod tests;
