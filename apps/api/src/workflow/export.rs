//! CSV export of the current job list.
//!
//! The header is the key list of the first job, in the order the search service
//! sent it (serialization order for postings built locally); every row looks up
//! the same keys. All fields are quoted, inner quotes doubled,
//! rows separated by a bare newline with none after the last row.

use anyhow::{anyhow, Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde_json::{Map, Value};

use crate::models::JobPosting;

pub const CSV_FILE_NAME: &str = "jobscout_jobs.csv";

pub fn jobs_to_csv(jobs: &[JobPosting]) -> Result<String> {
    let Some(first) = jobs.first() else {
        return Ok(String::new());
    };

    let headers: Vec<String> = if first.wire_keys().is_empty() {
        as_object(first)?.keys().cloned().collect()
    } else {
        first.wire_keys().to_vec()
    };

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for job in jobs {
        let fields = as_object(job)?;
        writer.write_record(headers.iter().map(|h| field_text(fields.get(h))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV buffer: {}", e.error()))?;
    let mut text = String::from_utf8(bytes).context("CSV output is not UTF-8")?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn as_object(job: &JobPosting) -> Result<Map<String, Value>> {
    match serde_json::to_value(job)? {
        Value::Object(map) => Ok(map),
        other => Err(anyhow!("Job serialized to a non-object: {other}")),
    }
}

/// Absent and falsy values (null, false, 0, "") render as an empty field.
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
