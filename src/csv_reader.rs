use crate::data::RowSet;
use anyhow::{Context, Result};
use std::io::{self, Read};

/// Read CSV with a header line into a `RowSet`. Empty cells become nulls;
/// an input with no data rows is not an error.
pub fn read_csv<R: Read>(reader: R) -> Result<RowSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .flexible(false)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to parse CSV record {}", i + 1))?;
        records.push(record.iter().map(str::to_string).collect());
    }

    Ok(RowSet::from_records(headers, records))
}

pub fn read_csv_from_stdin() -> Result<RowSet> {
    read_csv(io::stdin().lock())
}

/// Read a JSON array of flat objects
pub fn read_json<R: Read>(reader: R) -> Result<RowSet> {
    let value: serde_json::Value = serde_json::from_reader(reader).context("Failed to parse JSON input")?;
    RowSet::from_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Scalar;

    #[test]
    fn test_read_csv() {
        let input = "day, hour ,visits\n1,0:00-5:59,3\n2,6:00-7:59,\n";
        let data = read_csv(input.as_bytes()).unwrap();
        assert_eq!(data.headers, vec!["day", "hour", "visits"]);
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows[1].get("visits"), &Scalar::Null);
    }

    #[test]
    fn test_read_csv_headers_only() {
        let data = read_csv("day,hour\n".as_bytes()).unwrap();
        assert!(data.is_empty());
        assert_eq!(data.headers.len(), 2);
    }

    #[test]
    fn test_read_csv_ragged_record() {
        assert!(read_csv("a,b\n1,2,3\n".as_bytes()).is_err());
    }

    #[test]
    fn test_read_json() {
        let input = r#"[{"day": 1, "visits": 4}, {"day": 2, "visits": null}]"#;
        let data = read_json(input.as_bytes()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.rows[0].get("visits"), &Scalar::Number(4.0));
    }
}
