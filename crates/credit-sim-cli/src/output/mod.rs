pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Keys under `result` that hold row sequences (schedules, tree nodes).
pub const ROW_KEYS: [&str; 3] = ["schedule", "entries", "nodes"];

/// First row sequence found in the result object, if any.
pub fn rows(result: &serde_json::Map<String, Value>) -> Option<(&str, &[Value])> {
    ROW_KEYS.iter().find_map(|k| match result.get(*k) {
        Some(Value::Array(arr)) => Some((*k, arr.as_slice())),
        _ => None,
    })
}
