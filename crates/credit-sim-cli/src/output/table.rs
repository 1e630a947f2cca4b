use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::rows;

/// Render the result envelope as tables: scalar fields first, then any
/// schedule or node rows, then multi-line text such as the contract.
pub fn print_table(value: &Value) {
    let Value::Object(envelope) = value else {
        println!("{value}");
        return;
    };
    let Some(Value::Object(result)) = envelope.get("result") else {
        print_fields(envelope);
        return;
    };

    print_fields(result);

    if let Some((key, items)) = rows(result) {
        println!("\n{}:", key);
        print_rows(items);
    }

    for (key, val) in result {
        if let Value::String(s) = val {
            if s.contains('\n') {
                println!("\n{}:\n{}", key, s);
            }
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        let skip = matches!(val, Value::Array(a) if a.iter().any(Value::is_object))
            || matches!(val, Value::String(s) if s.contains('\n'));
        if !skip {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
    }
    println!("{}", Table::from(builder));
}

fn print_rows(items: &[Value]) {
    let Some(Value::Object(first)) = items.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for item in items {
        if let Value::Object(map) = item {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => arr.iter().map(format_value).collect::<Vec<_>>().join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
