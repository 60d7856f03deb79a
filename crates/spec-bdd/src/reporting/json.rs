//! JSON writer for recorded failures.
//!
//! The writer serializes failure records into a predictable,
//! machine-readable shape. Kinds are lowercase labels so downstream tools
//! can rely on consistent casing.

use std::io::Write;

use serde::Serialize;

use super::{FailureRecord, snapshot};

#[derive(Serialize)]
struct JsonReport<'a> {
    failures: Vec<JsonFailure<'a>>,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    method: &'a str,
    description: &'a str,
    kind: &'static str,
    file: &'a str,
    line: u32,
    messages: &'a [String],
}

impl<'a> From<&'a [FailureRecord]> for JsonReport<'a> {
    fn from(records: &'a [FailureRecord]) -> Self {
        let failures = records.iter().map(JsonFailure::from).collect();
        Self { failures }
    }
}

impl<'a> From<&'a FailureRecord> for JsonFailure<'a> {
    fn from(record: &'a FailureRecord) -> Self {
        Self {
            method: record.method(),
            description: record.description(),
            kind: record.kind(),
            file: record.file(),
            line: record.line(),
            messages: record.messages(),
        }
    }
}

/// Serialize the provided records into the supplied writer.
///
/// # Examples
/// ```rust
/// use spec_bdd::reporting::{json, FailureRecord};
///
/// let records = vec![FailureRecord::new("m", " A it b", vec!["boom".into()], "a.rs", 3, true)];
/// let mut buffer = Vec::new();
/// json::write(&mut buffer, &records).unwrap();
/// let output = String::from_utf8(buffer).unwrap();
/// assert!(output.contains("\"kind\":\"assertion\""));
/// ```
///
/// # Errors
/// Returns an error when serialization of the provided records fails.
pub fn write<W: Write>(writer: &mut W, records: &[FailureRecord]) -> serde_json::Result<()> {
    serde_json::to_writer(writer, &JsonReport::from(records))
}

/// Serialize the current collector snapshot into the supplied writer.
///
/// # Errors
/// Returns an error when serializing the snapshot fails.
pub fn write_snapshot<W: Write>(writer: &mut W) -> serde_json::Result<()> {
    let snapshot = snapshot();
    write(writer, &snapshot)
}

/// Produce a JSON string representation of the provided records.
///
/// # Examples
/// ```rust
/// use spec_bdd::reporting::{json, FailureRecord};
///
/// let output = json::to_string(&[]).unwrap();
/// assert_eq!(output, "{\"failures\":[]}");
/// ```
///
/// # Errors
/// Returns an error when serialization fails.
pub fn to_string(records: &[FailureRecord]) -> serde_json::Result<String> {
    serde_json::to_string(&JsonReport::from(records))
}
