//! Deterministic asset and event generators shared by the benchmarks.

use serde_json::{Value, json};

/// Generate an asset with `n` operations cycling through the operator
/// families, each targeting its own field.
pub fn gen_asset_yaml(n: usize) -> String {
    let mut yaml = String::from("name: decoder/bench/0\noperations:\n");
    for i in 0..n {
        let op = match i % 5 {
            0 => format!("  - field_{i}: +s_up/$user\n"),
            1 => format!("  - field_{i}: +s_concat/$user/-/{i}\n"),
            2 => format!("  - field_{i}: +re_extract/$msg/id=(\\d+)\n"),
            3 => format!("  - counter: +i_calc/sum/1\n"),
            _ => format!("  - field_{i}: +a_append/$user/x{i}\n"),
        };
        yaml.push_str(&op);
    }
    yaml
}

/// Generate `n` distinct events shaped for the generated asset.
pub fn gen_events(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            json!({
                "user": format!("user{i}"),
                "msg": format!("session id={i} opened"),
                "counter": i as i64,
            })
        })
        .collect()
}
