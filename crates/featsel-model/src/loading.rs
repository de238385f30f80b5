// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Dataset loader for ARFF and CSV files.
//!
//! This module turns text streams into a `Dataset`. Two formats are accepted:
//!
//! - **ARFF**: `@relation`, `@attribute <name> <type>` declarations followed by
//!   `@data` and comma separated rows. Supported attribute types are `numeric`,
//!   `real`, `integer` and nominal sets `{a, b, c}`. Lines starting with `%` are
//!   comments. Nominal values of input attributes are encoded as their position
//!   in the declaration so that distance based objectives can use them.
//! - **CSV**: comma separated rows with an optional header line. A first row
//!   whose non-class cells do not all parse as numbers is taken as the header.
//!
//! The class column defaults to the last attribute and can be chosen with
//! `with_class_index`. It is pulled out of the feature vector into the
//! instance label, so the resulting dataset's feature universe never contains
//! it. Missing values (`?`) are rejected. Every error that points at the input
//! carries the 1-based line number.

use crate::dataset::{Dataset, DatasetError, Instance};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// The error type for the dataset loading process.
#[derive(Debug, thiserror::Error)]
pub enum DatasetLoaderError {
    /// An I/O error occurred while reading the input stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The input ended before any attribute or data section was seen.
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(&'static str),
    /// An `@attribute` line could not be understood.
    #[error("line {line}: malformed attribute declaration")]
    MalformedAttribute { line: usize },
    /// An attribute type other than numeric or nominal.
    #[error("line {line}: unsupported attribute type '{kind}'")]
    UnsupportedAttributeType { line: usize, kind: String },
    /// A cell could not be parsed as a number or nominal value.
    #[error("line {line}: could not parse value '{token}' of attribute '{attribute}'")]
    Parse {
        line: usize,
        token: String,
        attribute: String,
    },
    /// A cell holds the missing value marker.
    #[error("line {line}: missing values are not supported")]
    MissingValue { line: usize },
    /// A row does not have one cell per attribute.
    #[error("line {line}: expected {expected} values but found {found}")]
    RowArity {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The requested class column does not exist.
    #[error("class index {index} is out of range for {num_attributes} attributes")]
    ClassIndexOutOfRange { index: usize, num_attributes: usize },
    /// The parsed data could not form a dataset.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Source format of a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Arff,
    Csv,
}

impl DatasetFormat {
    /// Guesses the format from a file extension; anything but `.csv` is ARFF.
    pub fn from_path<P>(path: P) -> Self
    where
        P: AsRef<Path>,
    {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
        {
            Some(ext) if ext == "csv" => DatasetFormat::Csv,
            _ => DatasetFormat::Arff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttributeKind {
    Numeric,
    Nominal(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    name: String,
    kind: AttributeKind,
}

/// Loader configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetLoader {
    class_index: Option<usize>,
}

impl DatasetLoader {
    /// Creates a loader that uses the last attribute as the class.
    #[inline]
    pub fn new() -> Self {
        Self { class_index: None }
    }

    /// Uses attribute `index` (0-based, counting the class column) as the class.
    #[inline]
    pub fn with_class_index(mut self, index: usize) -> Self {
        self.class_index = Some(index);
        self
    }

    /// Loads a dataset from a file, picking the format from the extension.
    pub fn from_path<P>(&self, path: P) -> Result<Dataset, DatasetLoaderError>
    where
        P: AsRef<Path>,
    {
        let format = DatasetFormat::from_path(&path);
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file), format)
    }

    /// Loads a dataset from any reader.
    pub fn from_reader<R>(&self, reader: R, format: DatasetFormat) -> Result<Dataset, DatasetLoaderError>
    where
        R: Read,
    {
        self.from_bufread(BufReader::new(reader), format)
    }

    /// Loads a dataset from an in-memory string.
    pub fn from_str(&self, input: &str, format: DatasetFormat) -> Result<Dataset, DatasetLoaderError> {
        self.from_bufread(input.as_bytes(), format)
    }

    /// Loads a dataset from a buffered reader.
    pub fn from_bufread<R>(&self, reader: R, format: DatasetFormat) -> Result<Dataset, DatasetLoaderError>
    where
        R: BufRead,
    {
        let dataset = match format {
            DatasetFormat::Arff => self.parse_arff(reader)?,
            DatasetFormat::Csv => self.parse_csv(reader)?,
        };

        tracing::info!(
            relation = dataset.relation().unwrap_or("<unnamed>"),
            features = dataset.num_features(),
            instances = dataset.num_instances(),
            ?format,
            "loaded dataset"
        );

        Ok(dataset)
    }

    fn resolve_class_index(&self, num_attributes: usize) -> Result<usize, DatasetLoaderError> {
        match self.class_index {
            Some(index) if index < num_attributes => Ok(index),
            Some(index) => Err(DatasetLoaderError::ClassIndexOutOfRange {
                index,
                num_attributes,
            }),
            None if num_attributes > 0 => Ok(num_attributes - 1),
            None => Err(DatasetLoaderError::UnexpectedEof("no attributes declared")),
        }
    }

    fn parse_arff<R>(&self, reader: R) -> Result<Dataset, DatasetLoaderError>
    where
        R: BufRead,
    {
        let mut relation: Option<String> = None;
        let mut attributes: Vec<Attribute> = Vec::new();
        let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
        let mut in_data = false;

        for (line_index, line) in reader.lines().enumerate() {
            let line_number = line_index + 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }

            if in_data {
                rows.push((line_number, split_cells(trimmed)));
                continue;
            }

            let lower = trimmed.to_ascii_lowercase();
            if lower.starts_with("@relation") {
                relation = Some(unquote(trimmed["@relation".len()..].trim()).to_string());
            } else if lower.starts_with("@attribute") {
                attributes.push(parse_attribute(&trimmed["@attribute".len()..], line_number)?);
            } else if lower.starts_with("@data") {
                in_data = true;
            } else {
                return Err(DatasetLoaderError::MalformedAttribute { line: line_number });
            }
        }

        if !in_data {
            return Err(DatasetLoaderError::UnexpectedEof("missing @data section"));
        }

        let class_index = self.resolve_class_index(attributes.len())?;
        build_dataset(relation, &attributes, class_index, rows)
    }

    fn parse_csv<R>(&self, reader: R) -> Result<Dataset, DatasetLoaderError>
    where
        R: BufRead,
    {
        let mut lines = Vec::new();
        for (line_index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            lines.push((line_index + 1, split_cells(trimmed)));
        }

        let Some((_, first)) = lines.first() else {
            return Err(DatasetLoaderError::UnexpectedEof("empty CSV input"));
        };

        let num_attributes = first.len();
        let class_index = self.resolve_class_index(num_attributes)?;

        let has_header = first
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != class_index)
            .any(|(_, cell)| cell.parse::<f64>().is_err() && cell != "?");

        let names: Vec<String> = if has_header {
            first.iter().map(|c| unquote(c).to_string()).collect()
        } else {
            (0..num_attributes).map(|i| format!("attribute_{i}")).collect()
        };

        let attributes: Vec<Attribute> = names
            .into_iter()
            .map(|name| Attribute {
                name,
                kind: AttributeKind::Numeric,
            })
            .collect();

        let rows = if has_header {
            lines.into_iter().skip(1).collect()
        } else {
            lines
        };

        build_dataset(None, &attributes, class_index, rows)
    }
}

fn build_dataset(
    relation: Option<String>,
    attributes: &[Attribute],
    class_index: usize,
    rows: Vec<(usize, Vec<String>)>,
) -> Result<Dataset, DatasetLoaderError> {
    let feature_names: Vec<String> = attributes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != class_index)
        .map(|(_, a)| a.name.clone())
        .collect();

    let mut instances = Vec::with_capacity(rows.len());
    for (line, cells) in rows {
        if cells.len() != attributes.len() {
            return Err(DatasetLoaderError::RowArity {
                line,
                expected: attributes.len(),
                found: cells.len(),
            });
        }

        let mut features = Vec::with_capacity(feature_names.len());
        let mut label = String::new();
        for (column, (cell, attribute)) in cells.iter().zip(attributes).enumerate() {
            let cell = unquote(cell);
            if cell == "?" {
                return Err(DatasetLoaderError::MissingValue { line });
            }
            if column == class_index {
                label = cell.to_string();
                continue;
            }
            features.push(encode_value(cell, attribute, line)?);
        }
        instances.push(Instance::new(features, label));
    }

    Ok(Dataset::new(relation, feature_names, instances)?)
}

fn encode_value(cell: &str, attribute: &Attribute, line: usize) -> Result<f64, DatasetLoaderError> {
    let parsed = match &attribute.kind {
        AttributeKind::Numeric => cell.parse::<f64>().ok(),
        AttributeKind::Nominal(values) => values.iter().position(|v| v == cell).map(|p| p as f64),
    };

    parsed.ok_or_else(|| DatasetLoaderError::Parse {
        line,
        token: cell.to_string(),
        attribute: attribute.name.clone(),
    })
}

fn parse_attribute(rest: &str, line: usize) -> Result<Attribute, DatasetLoaderError> {
    let rest = rest.trim();
    let (name, kind) = split_name(rest).ok_or(DatasetLoaderError::MalformedAttribute { line })?;
    let kind = kind.trim();

    if kind.starts_with('{') {
        let inner = kind
            .strip_prefix('{')
            .and_then(|k| k.strip_suffix('}'))
            .ok_or(DatasetLoaderError::MalformedAttribute { line })?;
        let values: Vec<String> = split_cells(inner)
            .into_iter()
            .map(|v| unquote(&v).to_string())
            .collect();
        if values.is_empty() {
            return Err(DatasetLoaderError::MalformedAttribute { line });
        }
        return Ok(Attribute {
            name,
            kind: AttributeKind::Nominal(values),
        });
    }

    match kind.to_ascii_lowercase().as_str() {
        "numeric" | "real" | "integer" => Ok(Attribute {
            name,
            kind: AttributeKind::Numeric,
        }),
        "" => Err(DatasetLoaderError::MalformedAttribute { line }),
        other => Err(DatasetLoaderError::UnsupportedAttributeType {
            line,
            kind: other.to_string(),
        }),
    }
}

/// Splits `name type` where the name may be quoted.
fn split_name(rest: &str) -> Option<(String, &str)> {
    let first = rest.chars().next()?;
    if first == '\'' || first == '"' {
        let close = rest[1..].find(first)? + 1;
        return Some((rest[1..close].to_string(), &rest[close + 1..]));
    }
    let end = rest.find(char::is_whitespace)?;
    Some((rest[..end].to_string(), &rest[end..]))
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(|c| c.trim().to_string()).collect()
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('\'') && s.ends_with('\'')) || (s.starts_with('"') && s.ends_with('"')))
    {
        return &s[1..s.len() - 1];
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINE_LIKE: &str = "% toy wine\n\
        @relation wine\n\
        \n\
        @attribute alcohol numeric\n\
        @attribute 'malic acid' real\n\
        @attribute colour {red, white}\n\
        @attribute class {a, b}\n\
        @data\n\
        13.2, 1.78, red, a\n\
        12.1, 2.50, white, b\n\
        % trailing comment\n\
        14.0, 1.10, 'red', a\n";

    #[test]
    fn test_arff_basic() {
        let ds = DatasetLoader::new()
            .from_str(WINE_LIKE, DatasetFormat::Arff)
            .unwrap();

        assert_eq!(ds.relation(), Some("wine"));
        assert_eq!(ds.num_features(), 3);
        assert_eq!(ds.num_instances(), 3);
        assert_eq!(
            ds.feature_names(),
            &["alcohol".to_string(), "malic acid".to_string(), "colour".to_string()]
        );
        assert_eq!(ds.instances()[1].features(), &[12.1, 2.5, 1.0]);
        assert_eq!(ds.instances()[1].label(), "b");
        assert_eq!(ds.instances()[2].features()[2], 0.0);
    }

    #[test]
    fn test_arff_custom_class_index() {
        let ds = DatasetLoader::new()
            .with_class_index(0)
            .from_str(WINE_LIKE, DatasetFormat::Arff)
            .unwrap();

        assert_eq!(ds.num_features(), 3);
        assert_eq!(ds.instances()[0].label(), "13.2");
        assert_eq!(ds.instances()[0].features(), &[1.78, 0.0, 0.0]);
    }

    #[test]
    fn test_arff_class_index_out_of_range() {
        let err = DatasetLoader::new()
            .with_class_index(9)
            .from_str(WINE_LIKE, DatasetFormat::Arff)
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetLoaderError::ClassIndexOutOfRange {
                index: 9,
                num_attributes: 4
            }
        ));
    }

    #[test]
    fn test_arff_missing_data_section() {
        let err = DatasetLoader::new()
            .from_str("@relation r\n@attribute a numeric\n", DatasetFormat::Arff)
            .unwrap_err();
        assert!(matches!(err, DatasetLoaderError::UnexpectedEof(_)));
    }

    #[test]
    fn test_arff_errors_carry_line_numbers() {
        let input = "@relation r\n@attribute a numeric\n@attribute c {x,y}\n@data\n1.0,x\nabc,y\n";
        let err = DatasetLoader::new()
            .from_str(input, DatasetFormat::Arff)
            .unwrap_err();
        match err {
            DatasetLoaderError::Parse { line, token, .. } => {
                assert_eq!(line, 6);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }

        let input = "@relation r\n@attribute a numeric\n@attribute c {x,y}\n@data\n1.0\n";
        let err = DatasetLoader::new()
            .from_str(input, DatasetFormat::Arff)
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetLoaderError::RowArity {
                line: 5,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_arff_rejects_missing_values_and_string_attributes() {
        let input = "@relation r\n@attribute a numeric\n@attribute c {x,y}\n@data\n?,x\n";
        let err = DatasetLoader::new()
            .from_str(input, DatasetFormat::Arff)
            .unwrap_err();
        assert!(matches!(err, DatasetLoaderError::MissingValue { line: 5 }));

        let input = "@relation r\n@attribute a string\n@data\n";
        let err = DatasetLoader::new()
            .from_str(input, DatasetFormat::Arff)
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetLoaderError::UnsupportedAttributeType { line: 2, .. }
        ));
    }

    #[test]
    fn test_csv_with_and_without_header() {
        let with_header = "x,y,label\n1,2,a\n3,4,b\n";
        let ds = DatasetLoader::new()
            .from_str(with_header, DatasetFormat::Csv)
            .unwrap();
        assert_eq!(ds.feature_names(), &["x".to_string(), "y".to_string()]);
        assert_eq!(ds.num_instances(), 2);
        assert_eq!(ds.instances()[1].label(), "b");

        let without_header = "1,2,a\n3,4,b\n";
        let ds = DatasetLoader::new()
            .from_str(without_header, DatasetFormat::Csv)
            .unwrap();
        assert_eq!(ds.num_instances(), 2);
        assert_eq!(ds.feature_names()[0], "attribute_0");
        assert_eq!(ds.instances()[0].features(), &[1.0, 2.0]);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DatasetFormat::from_path("wine.csv"), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path("wine.CSV"), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path("wine.arff"), DatasetFormat::Arff);
        assert_eq!(DatasetFormat::from_path("wine"), DatasetFormat::Arff);
    }
}
