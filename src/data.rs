use anyhow::{anyhow, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A single field value as delivered by the data source
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Scalar {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Coerce to a measure contribution. Anything that is not a finite
    /// number (after trimming text) yields `None`; callers treat that as 0.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Scalar::Null => return None,
            Scalar::Number(n) => *n,
            Scalar::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Some(0.0);
                }
                s.parse::<f64>().ok()?
            }
        };
        n.is_finite().then_some(n)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Key view of this scalar; `Null` has no key.
    pub fn to_key(&self) -> Option<KeyValue> {
        match self {
            Scalar::Null => None,
            Scalar::Number(n) => Some(KeyValue::Number(OrderedFloat(*n))),
            Scalar::Text(s) => Some(KeyValue::Text(s.clone())),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_none(),
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// Categorical value identifying a row, column or clip bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl KeyValue {
    pub fn text(s: impl Into<String>) -> Self {
        KeyValue::Text(s.into())
    }

    pub fn number(n: f64) -> Self {
        KeyValue::Number(OrderedFloat(n))
    }

    /// Numeric reading of the key: numbers directly, text if it parses.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            KeyValue::Number(n) => Some(n.0),
            KeyValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Number(n) => write!(f, "{}", n.0),
            KeyValue::Text(s) => f.write_str(s),
        }
    }
}

/// One flat result row: field name -> scalar. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    fields: HashMap<String, Scalar>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<Scalar>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Scalar) {
        self.fields.insert(field.into(), value);
    }

    /// Missing fields read as `Null`.
    pub fn get(&self, field: &str) -> &Scalar {
        static NULL: Scalar = Scalar::Null;
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// `Number(row[field]) || 0`
    pub fn number(&self, field: &str) -> f64 {
        self.get(field).as_number().unwrap_or(0.0)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

/// An already-fetched flat result set
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl RowSet {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build from CSV-style string records. Every cell is kept as text;
    /// empty cells become `Null`.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| {
                let mut row = Row::new();
                for (header, cell) in headers.iter().zip(record) {
                    let value = if cell.is_empty() { Scalar::Null } else { Scalar::Text(cell) };
                    row.insert(header.clone(), value);
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Create a RowSet from a JSON Array of Objects
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value.as_array().ok_or_else(||
            anyhow!("Input data must be a JSON array of objects")
        )?;

        let mut headers: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item.as_object().ok_or_else(||
                anyhow!("Items in array must be objects")
            )?;

            let mut row = Row::new();
            for (field, val) in obj {
                if !headers.iter().any(|h| h == field) {
                    headers.push(field.clone());
                }
                let scalar = match val {
                    Value::String(s) => Scalar::Text(s.clone()),
                    Value::Number(n) => n.as_f64().map(Scalar::Number).unwrap_or(Scalar::Null),
                    Value::Bool(b) => Scalar::Text(b.to_string()),
                    Value::Null => Scalar::Null,
                    _ => return Err(anyhow!("Unsupported value type for field '{}'", field)),
                };
                row.insert(field.clone(), scalar);
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Case-insensitive header lookup returning the canonical header name
    pub fn find_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
