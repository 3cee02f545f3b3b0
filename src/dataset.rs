//! Column-oriented datasets of geolocated records.
//!
//! A dataset is an ordered table whose columns carry their statistical type
//! (numeric or categorical), fixed when the column is built. Latitude and
//! longitude are located through case-insensitive aliases and renamed to the
//! canonical `lat`/`lon` before any plotting stage runs.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::{AustralError, Result};
use crate::geoutil::Extent;

/// Canonical latitude column name
pub const LAT: &str = "lat";
/// Canonical longitude column name
pub const LON: &str = "lon";

/// Accepted latitude column names (compared case-insensitively)
pub const LAT_ALIASES: &[&str] = &["lat", "latitude"];
/// Accepted longitude column names (compared case-insensitively)
pub const LON_ALIASES: &[&str] = &["lon", "long", "longitude"];

/// Statistical type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Column storage. Absent numeric values are NaN, absent categories are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Categorical(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Categorical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnValues::Numeric(_) => ColumnKind::Numeric,
            ColumnValues::Categorical(_) => ColumnKind::Categorical,
        }
    }

    fn select(&self, keep: &[bool]) -> Self {
        fn pick<T: Clone>(values: &[T], keep: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(keep)
                .filter(|(_, k)| **k)
                .map(|(v, _)| v.clone())
                .collect()
        }
        match self {
            ColumnValues::Numeric(v) => ColumnValues::Numeric(pick(v, keep)),
            ColumnValues::Categorical(v) => ColumnValues::Categorical(pick(v, keep)),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        }
    }

    pub fn categorical<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        Self {
            name: name.into(),
            values: ColumnValues::Categorical(
                values.into_iter().map(|v| v.map(Into::into)).collect(),
            ),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.values.kind()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct present levels of a categorical column, sorted.
    /// Numeric columns have no levels.
    pub fn levels(&self) -> Vec<String> {
        match &self.values {
            ColumnValues::Categorical(values) => values
                .iter()
                .flatten()
                .cloned()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            ColumnValues::Numeric(_) => Vec::new(),
        }
    }
}

/// An ordered sequence of records sharing a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    columns: Vec<Column>,
}

impl Dataset {
    /// Build a dataset, checking that every column has the same length
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            if let Some(bad) = columns.iter().find(|c| c.len() != first.len()) {
                return Err(AustralError::InvalidParameter {
                    param: "columns".to_string(),
                    message: format!(
                        "Column {} has {} values but column {} has {}",
                        bad.name,
                        bad.len(),
                        first.name,
                        first.len()
                    ),
                });
            }
        }
        Ok(Self { columns })
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a column with error handling
    pub fn column_checked(&self, name: &str) -> Result<&Column> {
        self.column(name).ok_or_else(|| AustralError::DataNotFound {
            message: format!(
                "Column not found: {} (available: {})",
                name,
                self.column_names().join(", ")
            ),
        })
    }

    /// Canonical latitude values
    pub fn lat(&self) -> Result<&[f64]> {
        self.coordinate(LAT)
    }

    /// Canonical longitude values
    pub fn lon(&self) -> Result<&[f64]> {
        self.coordinate(LON)
    }

    fn coordinate(&self, name: &str) -> Result<&[f64]> {
        match self.column(name).map(|c| &c.values) {
            Some(ColumnValues::Numeric(values)) => Ok(values),
            Some(ColumnValues::Categorical(_)) => Err(AustralError::Schema {
                message: format!("Coordinate column {} is not numeric", name),
            }),
            None => Err(self.schema_error()),
        }
    }

    /// Rename the first latitude and longitude aliases to `lat`/`lon`.
    ///
    /// A column already carrying the canonical name wins over other aliases.
    pub fn normalize_coordinates(mut self) -> Result<Self> {
        let lat_idx = self.find_alias(LAT, LAT_ALIASES);
        let lon_idx = self.find_alias(LON, LON_ALIASES);

        let (Some(lat_idx), Some(lon_idx)) = (lat_idx, lon_idx) else {
            return Err(self.schema_error());
        };

        self.columns[lat_idx].name = LAT.to_string();
        self.columns[lon_idx].name = LON.to_string();

        // Fail early if either coordinate column is categorical
        self.lat()?;
        self.lon()?;
        Ok(self)
    }

    fn find_alias(&self, canonical: &str, aliases: &[&str]) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name == canonical)
            .or_else(|| {
                self.columns
                    .iter()
                    .position(|c| aliases.contains(&c.name.to_lowercase().as_str()))
            })
    }

    fn schema_error(&self) -> AustralError {
        AustralError::Schema {
            message: format!(
                "Could not identify latitude/longitude columns \
                 (accepted: {} / {}); found columns: [{}]",
                LAT_ALIASES.join(", "),
                LON_ALIASES.join(", "),
                self.column_names().join(", ")
            ),
        }
    }

    /// Keep the records whose mask entry is true
    pub fn filter(&self, keep: &[bool]) -> Self {
        Self {
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    name: c.name.clone(),
                    values: c.values.select(keep),
                })
                .collect(),
        }
    }

    /// Lat/lon extent of the dataset, `None` when it holds no finite coordinates
    pub fn extent(&self) -> Result<Option<Extent>> {
        Ok(Extent::from_coordinates(self.lat()?, self.lon()?))
    }
}

/// Map a column name onto its canonical coordinate name if it is an alias
pub fn canonical_coordinate(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    if LAT_ALIASES.contains(&lower.as_str()) {
        Some(LAT)
    } else if LON_ALIASES.contains(&lower.as_str()) {
        Some(LON)
    } else {
        None
    }
}
