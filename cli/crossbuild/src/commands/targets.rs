//! `crossbuild --list-targets` — print the compatibility table.

use anyhow::Result;
use crossbuild_targets::{architectures, operating_systems};
use serde_json::{Map, Value};

/// Print every supported GOOS with its architectures.
pub fn list(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&table_json())?);
        return Ok(());
    }

    println!("Supported GOOS/GOARCH pairs:");
    println!();
    for os in operating_systems() {
        let archs = architectures(os).unwrap_or_default();
        println!("  {os:<12} {}", archs.join(", "));
    }
    Ok(())
}

fn table_json() -> Value {
    let map: Map<String, Value> = operating_systems()
        .map(|os| {
            let archs = architectures(os)
                .unwrap_or_default()
                .iter()
                .map(|a| Value::from(*a))
                .collect();
            (os.to_string(), Value::Array(archs))
        })
        .collect();
    Value::Object(map)
}
