//! JSON data loading functionality.
//!
//! This module reads record tables and coastline vertex files from disk and
//! converts them into the in-memory types the composer works with.
//!
//! Records are a JSON array of flat objects. A column is numeric when every
//! non-null value in it is a number; otherwise it is categorical and numbers are
//! kept as their text. Keys missing from a record read as null. An empty array
//! carries no keys at all and reads as an empty table with `lat`/`lon` columns.

use serde_json::{Map, Value};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::coastline::{CoastlineSource, Vertex, WorldCoastline};
use crate::dataset::{Column, Dataset, LAT, LON};
use crate::error::{AustralError, Result};
use crate::logging::{log_operation_end, log_operation_start};

/// Load a record table from a JSON file
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let start = Instant::now();
    log_operation_start("load_dataset", Some(&path.display().to_string()));

    let result = read_file(path).and_then(|content| parse_dataset(&content));
    log_operation_end("load_dataset", start, result.is_ok());

    let dataset = result?;
    info!(
        rows = dataset.len(),
        columns = dataset.columns().len(),
        "Loaded dataset from {}",
        path.display()
    );
    Ok(dataset)
}

/// Parse a record table from JSON text
pub fn parse_dataset(content: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(AustralError::Schema {
            message: "Record file must contain a JSON array of objects".to_string(),
        });
    };

    let mut records: Vec<Map<String, Value>> = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match item {
            Value::Object(record) => records.push(record),
            other => {
                return Err(AustralError::Schema {
                    message: format!("Record {} is not an object: {}", i, other),
                });
            }
        }
    }

    if records.is_empty() {
        debug!("Empty record array; using bare coordinate columns");
        return Dataset::new(vec![
            Column::numeric(LAT, Vec::new()),
            Column::numeric(LON, Vec::new()),
        ]);
    }

    // Column order follows first appearance
    let mut names: Vec<String> = Vec::new();
    for record in &records {
        for key in record.keys() {
            if !names.iter().any(|n| n == key) {
                names.push(key.clone());
            }
        }
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let values: Vec<&Value> = records
                .iter()
                .map(|r| r.get(&name).unwrap_or(&Value::Null))
                .collect();
            build_column(name, &values)
        })
        .collect::<Result<Vec<_>>>()?;

    Dataset::new(columns)
}

fn build_column(name: String, values: &[&Value]) -> Result<Column> {
    let numeric = values
        .iter()
        .all(|v| matches!(v, Value::Null | Value::Number(_)));

    if numeric {
        let data = values
            .iter()
            .map(|v| v.as_f64().unwrap_or(f64::NAN))
            .collect();
        debug!(column = %name, "Inferred numeric column");
        return Ok(Column::numeric(name, data));
    }

    let data = values
        .iter()
        .map(|v| match v {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s.clone())),
            Value::Number(n) => Ok(Some(n.to_string())),
            Value::Bool(b) => Ok(Some(b.to_string())),
            other => Err(AustralError::Schema {
                message: format!("Column {} holds a nested value: {}", name, other),
            }),
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(column = %name, "Inferred categorical column");
    Ok(Column::categorical(name, data))
}

/// Load a coastline vertex file: an array of `[lon, lat]` pairs with `null` between paths
pub fn load_coastline(path: &Path) -> Result<WorldCoastline> {
    let start = Instant::now();
    log_operation_start("load_coastline", Some(&path.display().to_string()));

    let result = read_file(path).and_then(|content| parse_coastline(&content));
    log_operation_end("load_coastline", start, result.is_ok());

    let coastline = result?;
    info!(
        vertices = coastline.vertices().len(),
        "Loaded coastline from {}",
        path.display()
    );
    Ok(coastline)
}

/// Parse coastline vertices from JSON text
pub fn parse_coastline(content: &str) -> Result<WorldCoastline> {
    let entries: Vec<Option<[f64; 2]>> =
        serde_json::from_str(content).map_err(|e| AustralError::Schema {
            message: format!("Invalid coastline file: {}", e),
        })?;

    let vertices = entries
        .into_iter()
        .map(|entry| match entry {
            Some([lon, lat]) => Vertex::new(lon, lat),
            None => Vertex::gap(),
        })
        .collect();
    Ok(WorldCoastline::new(vertices))
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(AustralError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("File not found: {}", path.display()),
        )));
    }
    Ok(std::fs::read_to_string(path)?)
}
