use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render output as a table.
///
/// Three shapes come through here: the engine's analysis envelope
/// (`result` + `warnings` + `methodology`), the distribution command's
/// object with a `distribution` block (rendered with percentage bars),
/// and history arrays.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_envelope(result, map);
            } else if map.get("distribution").is_some() {
                print_distribution(map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_envelope(result: &Value, envelope: &serde_json::Map<String, Value>) {
    let suggestion = result.get("suggestion");

    if let Value::Object(fields) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in fields {
            // The suggestion gets its own colorized block below the table.
            if key == "suggestion" {
                continue;
            }
            builder.push_record([key.as_str(), &scalar(val)]);
        }
        println!("{}", Table::from(builder));
    }

    if let Some(Value::Object(s)) = suggestion {
        print_suggestion(s);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_suggestion(suggestion: &serde_json::Map<String, Value>) {
    let kind = suggestion.get("kind").and_then(Value::as_str).unwrap_or("");
    let message = suggestion
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("");

    let label = match kind {
        "good" => "GOOD".green().bold(),
        "warning" => "WARNING".yellow().bold(),
        _ => "DANGER".red().bold(),
    };
    println!("\n{}: {}", label, message);

    if let Some(price) = suggestion.get("recommended_price") {
        if !price.is_null() {
            println!("Recommended price: {}", scalar(price));
        }
    }
}

fn print_distribution(map: &serde_json::Map<String, Value>) {
    if let Some(price) = map.get("reference_price") {
        println!("Reference price: {}\n", scalar(price));
    }

    if let Some(Value::Object(shares)) = map.get("distribution") {
        for (name, share) in shares {
            let pct: f64 = share
                .as_str()
                .and_then(|s| s.parse().ok())
                .or_else(|| share.as_f64())
                .unwrap_or(0.0);
            // One # per two percentage points, floored at zero for losses.
            let bar = "#".repeat((pct.max(0.0) / 2.0).round() as usize);
            println!("{:>16}  {:>8}%  {}", name, scalar(share), bar);
        }
    }

    if let Some(Value::Object(comparison)) = map.get("comparison") {
        println!();
        print_flat_object(comparison);
    }
}

fn print_flat_object(map: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &scalar(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", scalar(item));
        }
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
