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

/// The row array inside the result envelope, if any. A schedule result
/// carries either raw "periods" or mapped "installments".
pub(crate) fn result_rows(value: &Value) -> Option<&Vec<Value>> {
    let result = value.get("result")?;
    for key in ["periods", "installments"] {
        if let Some(Value::Array(rows)) = result.get(key) {
            return Some(rows);
        }
    }
    None
}
