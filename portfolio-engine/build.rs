// build.rs
use std::collections::BTreeSet;
use std::{env, fs, path::PathBuf};

const LOCALES: [&str; 2] = ["en", "fr"];

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let locale_dir = manifest_dir.join("assets").join("locales");
    println!("cargo:rerun-if-changed=build.rs");

    let tables: Vec<(&str, BTreeSet<String>)> = LOCALES
        .iter()
        .map(|code| {
            let path = locale_dir.join(format!("{code}.locale.json"));
            println!("cargo:rerun-if-changed={}", path.display());
            let content = fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
            let value: serde_json::Value = serde_json::from_str(&content)
                .unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", path.display()));
            let mut keys = BTreeSet::new();
            collect_keys(&value, String::new(), &mut keys);
            (*code, keys)
        })
        .collect();

    // Every key must exist in every language.
    for (code, keys) in &tables {
        for (other, other_keys) in &tables {
            for missing in keys.difference(other_keys) {
                println!("cargo:warning=Locale '{other}' is missing '{missing}' (present in '{code}')");
            }
        }
    }
}

fn collect_keys(value: &serde_json::Value, prefix: String, keys: &mut BTreeSet<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (name, child) in map {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                collect_keys(child, key, keys);
            }
        }
        _ => {
            keys.insert(prefix);
        }
    }
}
