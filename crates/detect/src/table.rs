use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use thiserror::Error;

/// A single cell as handed over by the tokenizer or a programmatic caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One header-keyed line of the input table.
///
/// Keys keep the order of their first insertion; inserting an existing key
/// replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    cells: Vec<(String, CellValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<CellValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut row = RawRow::new();
        for (k, v) in pairs {
            row.insert(k, v);
        }
        row
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<CellValue>) {
        let key = key.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.cells.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.cells.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableOptions {
    /// Field delimiter; `None` sniffs it from the header line.
    pub delimiter: Option<u8>,
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b'|', b';'];

/// Picks the candidate delimiter that occurs most often on the header line.
pub fn sniff_delimiter(data: &[u8]) -> u8 {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let header = data.split(|b| *b == b'\n').next().unwrap_or_default();

    let mut best = (b',', 0usize);
    for candidate in DELIMITER_CANDIDATES {
        let count = header.iter().filter(|b| **b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Tokenizes delimited text with a header row into header-keyed rows.
///
/// Blank lines are skipped. Rows shorter than the header only carry the
/// fields they have; fields past the last header are dropped. Bytes that are
/// not valid UTF-8 are replaced with U+FFFD rather than failing the table.
pub fn read_rows<R: Read>(mut data: R, options: &TableOptions) -> Result<Vec<RawRow>, TableError> {
    let mut bytes = Vec::new();
    data.read_to_end(&mut bytes)?;
    parse_rows(&bytes, options)
}

pub fn parse_rows(data: &[u8], options: &TableOptions) -> Result<Vec<RawRow>, TableError> {
    let delimiter = options.delimiter.unwrap_or_else(|| sniff_delimiter(data));
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);

    let headers: Vec<String> = reader.byte_headers()?.iter().map(lossy).collect();
    let mut rows = Vec::new();

    for result in reader.byte_records() {
        let record = result?;
        let row = RawRow::from_pairs(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), lossy(v))),
        );
        rows.push(row);
    }

    Ok(rows)
}

fn lossy(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
