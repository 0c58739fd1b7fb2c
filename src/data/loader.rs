use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;

use super::model::{Dataset, RawPoint, SourceFormat};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a file could not be turned into a dataset.
///
/// `row` is the 0-based record index for JSON and Parquet, and the 1-based
/// file line for CSV.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a top-level JSON array")]
    NotAnArray,

    #[error("record {0} is not a JSON object")]
    NotAnObject(usize),

    #[error("row {row}: missing field '{field}'")]
    MissingField { row: usize, field: &'static str },

    #[error("row {row}: field '{field}' is not a number")]
    NotANumber { row: usize, field: &'static str },

    #[error("row {row}: field '{field}' is not finite")]
    NonFinite { row: usize, field: &'static str },

    #[error("missing '{0}' column")]
    MissingColumn(&'static str),

    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid Parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("unreadable Parquet column: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

// ---------------------------------------------------------------------------
// Fields and their accepted spellings
// ---------------------------------------------------------------------------

/// The three columns every point record must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Longitude,
    Latitude,
    BandwidthUsage,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Longitude, Field::Latitude, Field::BandwidthUsage];

    /// Canonical key as written in the JSON source format.
    pub fn name(self) -> &'static str {
        match self {
            Field::Longitude => "longitude",
            Field::Latitude => "latitude",
            Field::BandwidthUsage => "bandwidthUsage",
        }
    }

    /// Canonical name first, then the short forms the campus scripts emit.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Longitude => &["longitude", "lon", "lng"],
            Field::Latitude => &["latitude", "lat"],
            Field::BandwidthUsage => &["bandwidthUsage", "bandwidth_usage", "bandwidth"],
        }
    }

    /// Case-insensitive header match, used for CSV and Parquet columns.
    fn matches_column(self, header: &str) -> bool {
        let header = header.trim();
        self.aliases().iter().any(|a| a.eq_ignore_ascii_case(header))
    }

    fn column_index<'a>(self, headers: impl IntoIterator<Item = &'a str>) -> Option<usize> {
        headers.into_iter().position(|h| self.matches_column(h))
    }
}

fn finite(row: usize, field: Field, v: f64) -> Result<f64, IngestError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(IngestError::NonFinite {
            row,
            field: field.name(),
        })
    }
}

fn point_from_fields(
    row: usize,
    mut get: impl FnMut(usize, Field) -> Result<f64, IngestError>,
) -> Result<RawPoint, IngestError> {
    let mut values = [0.0; 3];
    for (i, field) in Field::ALL.into_iter().enumerate() {
        values[i] = finite(row, field, get(i, field)?)?;
    }
    let [longitude, latitude, bandwidth_usage] = values;
    Ok(RawPoint::new(longitude, latitude, bandwidth_usage))
}

// ---------------------------------------------------------------------------
// Ingestor capability
// ---------------------------------------------------------------------------

/// One way of turning a file into raw points.
pub trait Ingestor {
    fn format(&self) -> SourceFormat;

    /// Lower-case file extensions this ingestor handles (without the dot).
    fn extensions(&self) -> &'static [&'static str];

    fn read(&self, path: &Path) -> Result<Vec<RawPoint>, IngestError>;
}

/// Every ingestor, in the order the file dialog lists them.
pub fn all_ingestors() -> Vec<Box<dyn Ingestor>> {
    vec![
        Box::new(JsonIngestor),
        Box::new(CsvIngestor),
        Box::new(ParquetIngestor),
    ]
}

/// Pick the ingestor for `path` by its extension.
pub fn ingestor_for(path: &Path) -> Result<Box<dyn Ingestor>, IngestError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    all_ingestors()
        .into_iter()
        .find(|ing| ing.extensions().contains(&ext.as_str()))
        .ok_or(IngestError::UnsupportedExtension(ext))
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a point dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[{ "longitude": .., "latitude": .., "bandwidthUsage": .. }, ...]`
/// * `.csv`     – header row naming the three columns
/// * `.parquet` – three numeric columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset, IngestError> {
    let ingestor = ingestor_for(path)?;
    let points = ingestor.read(path)?;
    Ok(Dataset::new(points, ingestor.format()).with_source(path))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> IngestError + '_ {
    move |source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

pub struct JsonIngestor;

impl JsonIngestor {
    /// Parse a JSON document holding an array of point objects.
    pub fn parse_str(&self, text: &str) -> Result<Vec<RawPoint>, IngestError> {
        let root: JsonValue = serde_json::from_str(text)?;
        let records = root.as_array().ok_or(IngestError::NotAnArray)?;
        records
            .iter()
            .enumerate()
            .map(|(row, rec)| raw_point_from_json(row, rec))
            .collect()
    }
}

impl Ingestor for JsonIngestor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Json
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn read(&self, path: &Path) -> Result<Vec<RawPoint>, IngestError> {
        let text = std::fs::read_to_string(path).map_err(io_error(path))?;
        self.parse_str(&text)
    }
}

/// Validate one JSON record into a [`RawPoint`].
pub fn raw_point_from_json(row: usize, rec: &JsonValue) -> Result<RawPoint, IngestError> {
    let obj = rec.as_object().ok_or(IngestError::NotAnObject(row))?;
    point_from_fields(row, |_, field| json_number(obj, row, field))
}

fn json_number(obj: &Map<String, JsonValue>, row: usize, field: Field) -> Result<f64, IngestError> {
    let value = field
        .aliases()
        .iter()
        .find_map(|key| obj.get(*key))
        .ok_or(IngestError::MissingField {
            row,
            field: field.name(),
        })?;

    value.as_f64().ok_or(IngestError::NotANumber {
        row,
        field: field.name(),
    })
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

/// CSV layout: header row, one point per line.  Columns are located by name
/// (any order, case-insensitive); extra columns are ignored.
pub struct CsvIngestor;

impl CsvIngestor {
    pub fn from_reader<R: Read>(&self, rdr: R) -> Result<Vec<RawPoint>, IngestError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
        let headers = reader.headers()?.clone();

        let mut columns = [0usize; 3];
        for (slot, field) in columns.iter_mut().zip(Field::ALL) {
            *slot = field
                .column_index(headers.iter())
                .ok_or(IngestError::MissingColumn(field.name()))?;
        }

        let mut points = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result?;
            let row = record
                .position()
                .map_or(index + 2, |pos| pos.line() as usize);
            let point = point_from_fields(row, |i, field| {
                let cell = record.get(columns[i]).unwrap_or("");
                if cell.is_empty() {
                    return Err(IngestError::MissingField {
                        row,
                        field: field.name(),
                    });
                }
                cell.parse::<f64>().map_err(|_| IngestError::NotANumber {
                    row,
                    field: field.name(),
                })
            })?;
            points.push(point);
        }
        Ok(points)
    }
}

impl Ingestor for CsvIngestor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Csv
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv"]
    }

    fn read(&self, path: &Path) -> Result<Vec<RawPoint>, IngestError> {
        let file = File::open(path).map_err(io_error(path))?;
        self.from_reader(file)
    }
}

// ---------------------------------------------------------------------------
// Parquet
// ---------------------------------------------------------------------------

/// Parquet file with numeric `longitude`, `latitude` and `bandwidthUsage`
/// columns (any integer or float type; cast to `f64`).
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
pub struct ParquetIngestor;

impl Ingestor for ParquetIngestor {
    fn format(&self) -> SourceFormat {
        SourceFormat::Parquet
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["parquet", "pq"]
    }

    fn read(&self, path: &Path) -> Result<Vec<RawPoint>, IngestError> {
        let file = File::open(path).map_err(io_error(path))?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

        // Resolve columns from the file schema so files without rows are
        // still checked.
        let mut indices = [0usize; 3];
        {
            let schema = builder.schema();
            let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
            for (slot, field) in indices.iter_mut().zip(Field::ALL) {
                *slot = field
                    .column_index(names.iter().copied())
                    .ok_or(IngestError::MissingColumn(field.name()))?;
            }
        }

        let reader = builder.build()?;
        let mut points = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;

            let mut columns = Vec::with_capacity(3);
            for idx in indices {
                let source = batch.column(idx);
                let values = arrow::compute::cast(source, &DataType::Float64)?;
                columns.push((source.clone(), values.as_primitive::<Float64Type>().clone()));
            }

            let offset = points.len();
            for i in 0..batch.num_rows() {
                let row = offset + i;
                let point = point_from_fields(row, |c, field| {
                    let (source, values) = &columns[c];
                    if source.is_null(i) {
                        return Err(IngestError::MissingField {
                            row,
                            field: field.name(),
                        });
                    }
                    // Text that does not parse casts to null.
                    if values.is_null(i) {
                        return Err(IngestError::NotANumber {
                            row,
                            field: field.name(),
                        });
                    }
                    Ok(values.value(i))
                })?;
                points.push(point);
            }
        }
        Ok(points)
    }
}
