use crate::domain::model::Record;
use crate::domain::schema::EntitySpec;
use crate::utils::error::{AdminError, Result};
use serde_json::Value;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

fn raw_value(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    }
}

/// CSV of the working list, one column per schema field in schema order.
/// The header uses field names so the file lines up with the import templates.
pub fn export_csv(spec: &EntitySpec, records: &[Record]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(spec.data_columns().map(|c| c.field))?;

    for record in records {
        writer.write_record(spec.data_columns().map(|c| raw_value(record.field(c.field))))?;
    }

    writer
        .into_inner()
        .map_err(|e| AdminError::IoError(e.into_error()))
}

pub fn csv_file_name(spec: &EntitySpec) -> String {
    format!("{}.csv", spec.upload_table)
}

/// ZIP archive with one `<table>.csv` per entity.
pub fn snapshot_zip(entries: &[(&EntitySpec, Vec<Record>)]) -> Result<Vec<u8>> {
    tracing::debug!("Creating snapshot with {} files", entries.len());

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (spec, records) in entries {
        zip.start_file::<_, ()>(csv_file_name(spec), FileOptions::default())?;
        zip.write_all(&export_csv(spec, records)?)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

pub fn snapshot_file_name(at: chrono::DateTime<chrono::Local>) -> String {
    format!("snapshot_{}.zip", at.format("%Y%m%d_%H%M%S"))
}
