use crate::measurement::parse_cell;
use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use std::fmt;
use std::io;
use std::path::Path;

#[derive(Debug)]
pub enum DatasetError {
    Workbook(calamine::Error),
    Csv(csv::Error),
    Io(io::Error),
    DataFrame(PolarsError),
    EmptySheet,
    MissingColumn(String),
    UnsupportedFile(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Workbook(err) => write!(f, "workbook error: {err}"),
            DatasetError::Csv(err) => write!(f, "csv error: {err}"),
            DatasetError::Io(err) => write!(f, "io error: {err}"),
            DatasetError::DataFrame(err) => write!(f, "dataframe error: {err}"),
            DatasetError::EmptySheet => write!(f, "the file contains no header row"),
            DatasetError::MissingColumn(name) => write!(f, "no column named '{name}'"),
            DatasetError::UnsupportedFile(path) => {
                write!(f, "unsupported file type: {path}")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<calamine::Error> for DatasetError {
    fn from(value: calamine::Error) -> Self {
        Self::Workbook(value)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<io::Error> for DatasetError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<PolarsError> for DatasetError {
    fn from(value: PolarsError) -> Self {
        Self::DataFrame(value)
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(v) => {
            if (v.floor() - v).abs() < f64::EPSILON {
                format!("{}", *v as i64)
            } else {
                format!("{v}")
            }
        }
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => String::new(),
    }
}

fn frame_from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> DatasetResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let values: Vec<String> = rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect();
        columns.push(Series::new(header.as_str().into(), values).into_column());
    }
    Ok(DataFrame::new(columns)?)
}

fn load_workbook(path: &Path) -> DatasetResult<DataFrame> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names().to_owned();
    let sheet = names.first().cloned().ok_or(DatasetError::EmptySheet)?;
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => return Err(DatasetError::EmptySheet),
    };
    let data: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    frame_from_rows(headers, data)
}

fn load_csv(path: &Path) -> DatasetResult<DataFrame> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(DatasetError::EmptySheet);
    }
    let mut data = Vec::new();
    for record in reader.records() {
        let record = record?;
        data.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    frame_from_rows(headers, data)
}

/// Loads one sheet of a tabular file into a string-typed [`DataFrame`].
/// The first row is the header; every cell is kept as text so that the
/// measurement parser decides what is numeric.
pub fn load_table<P: AsRef<Path>>(path: P) -> DatasetResult<DataFrame> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => load_csv(path),
        Some(_) => load_workbook(path),
        None => Err(DatasetError::UnsupportedFile(path.display().to_string())),
    }
}

/// A named column parsed into parallel value/error vectors. Cells with no
/// numeric interpretation become `NaN` values with no error; they are kept
/// in place so row order matches the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub errors: Vec<Option<f64>>,
}

impl ColumnSeries {
    pub fn extract(df: &DataFrame, name: &str) -> DatasetResult<Self> {
        let column = df
            .column(name)
            .map_err(|_| DatasetError::MissingColumn(name.to_string()))?;
        let cells = column.str()?;

        let mut values = Vec::with_capacity(cells.len());
        let mut errors = Vec::with_capacity(cells.len());
        for idx in 0..cells.len() {
            match cells.get(idx).and_then(parse_cell) {
                Some(measurement) => {
                    values.push(measurement.value);
                    errors.push(measurement.error);
                }
                None => {
                    values.push(f64::NAN);
                    errors.push(None);
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            values,
            errors,
        })
    }

    /// Replaces every value with its reciprocal (the 1/Y axis option) and
    /// renames the series accordingly. Zero values become infinite and are
    /// rejected later by the fit.
    pub fn reciprocal(mut self) -> Self {
        for value in &mut self.values {
            *value = 1.0 / *value;
        }
        self.name = format!("1/{}", self.name);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(Option::is_some)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
