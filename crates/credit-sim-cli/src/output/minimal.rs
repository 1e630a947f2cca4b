use serde_json::Value;

/// Print only the headline answer.
///
/// Simulations print their status, plus the monthly payment when approved.
/// Other results fall back to the first well-known field present.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result_obj else {
        println!("{}", format_minimal(result_obj));
        return;
    };

    if let Some(status) = map.get("status") {
        match map.get("payment") {
            Some(payment) => println!("{} {}", format_minimal(status), format_minimal(payment)),
            None => println!("{}", format_minimal(status)),
        }
        return;
    }

    let priority_keys = [
        "payment",
        "default_probability",
        "holdout_accuracy",
        "annual_rate_pct",
    ];
    for key in &priority_keys {
        if let Some(val) = map.get(*key) {
            if !val.is_null() {
                println!("{}", format_minimal(val));
                return;
            }
        }
    }

    if let Some((key, val)) = map.iter().next() {
        println!("{}: {}", key, format_minimal(val));
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
