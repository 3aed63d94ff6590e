use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    HeightForAge,
    WeightForAge,
    BmiForAge,
    HeadCircumferenceForAge,
    WeightForHeight,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::HeightForAge,
        TableKind::WeightForAge,
        TableKind::BmiForAge,
        TableKind::HeadCircumferenceForAge,
        TableKind::WeightForHeight,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TableKind::HeightForAge => "height-age",
            TableKind::WeightForAge => "weight-age",
            TableKind::BmiForAge => "bmi-age",
            TableKind::HeadCircumferenceForAge => "hc-age",
            TableKind::WeightForHeight => "weight-height",
        }
    }

    pub fn measure(self) -> &'static str {
        match self {
            TableKind::HeightForAge => "height",
            TableKind::WeightForAge | TableKind::WeightForHeight => "weight",
            TableKind::BmiForAge => "bmi",
            TableKind::HeadCircumferenceForAge => "head_circumference",
        }
    }

    pub fn measure_unit(self) -> &'static str {
        match self {
            TableKind::HeightForAge => "cm",
            TableKind::WeightForAge | TableKind::WeightForHeight => "kg",
            TableKind::BmiForAge => "kg/m2",
            TableKind::HeadCircumferenceForAge => "mm",
        }
    }

    pub fn covariate(self) -> &'static str {
        match self {
            TableKind::WeightForHeight => "height",
            _ => "age",
        }
    }

    pub fn covariate_unit(self) -> &'static str {
        match self {
            TableKind::WeightForHeight => "cm",
            _ => "months",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Serialized as its `id()`, so report values parse back through `FromStr`.
impl Serialize for TableKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl FromStr for TableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        TableKind::ALL
            .into_iter()
            .find(|k| k.id() == lower)
            .ok_or_else(|| {
                let ids = TableKind::ALL.map(|k| k.id()).join("|");
                format!("invalid table kind {s:?} (use {ids})")
            })
    }
}
