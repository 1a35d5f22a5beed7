//! Subcommand implementations

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use field_data::{FieldData, FieldDescriptor, FieldLookup, RawRecord, SchemaStore};
use serde_json::Value;

use crate::args::{Command, Inputs};

/// Dispatch a parsed command, writing results to `out`
pub fn run_command(command: &Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Check { inputs } => check(inputs, out),
        Command::Get { inputs, field } => get(inputs, field, out),
    }
}

fn check(inputs: &Inputs, out: &mut impl Write) -> Result<()> {
    let (schema, raw) = load(inputs)?;
    let data = FieldData::with_decoder(&raw, &schema, inputs.mode);

    for field in data.unknown_fields() {
        tracing::warn!(field, "record field is not declared in the schema");
    }

    data.validate()
        .with_context(|| format!("{} failed validation", inputs.data.display()))?;
    let resolved = data.resolve_all()?;

    serde_json::to_writer_pretty(&mut *out, &resolved)?;
    writeln!(out)?;
    Ok(())
}

fn get(inputs: &Inputs, field: &str, out: &mut impl Write) -> Result<()> {
    let (schema, raw) = load(inputs)?;
    let data = FieldData::with_decoder(&raw, &schema, inputs.mode);

    let value = match data.get_ok_err(field)? {
        FieldLookup::Present(value) => value,
        FieldLookup::Absent => {
            tracing::info!(field, "field absent, using default");
            schema
                .get(field)
                .and_then(FieldDescriptor::default_or_zero)
                .with_context(|| format!("field {field} has no default"))?
        },
    };

    serde_json::to_writer_pretty(&mut *out, &Value::from(value))?;
    writeln!(out)?;
    Ok(())
}

fn load(inputs: &Inputs) -> Result<(SchemaStore, RawRecord)> {
    let schema = SchemaStore::from_reader(open(&inputs.schema)?)
        .with_context(|| format!("failed to load schema {}", inputs.schema.display()))?;
    let raw: RawRecord = serde_json::from_reader(open(&inputs.data)?)
        .with_context(|| format!("{} is not a JSON object", inputs.data.display()))?;

    tracing::debug!(
        schema_fields = schema.len(),
        raw_fields = raw.len(),
        mode = %inputs.mode,
        "inputs loaded"
    );
    Ok((schema, raw))
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}
