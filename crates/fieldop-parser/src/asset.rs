//! Asset loading: the YAML envelope that declares per-field definitions.
//!
//! An asset is one decoder/rule object owned by the catalog. Its
//! `operations` section is a sequence of single-key mappings so that
//! declaration order is preserved: pipeline order is declaration order,
//! and later operations may depend on fields written by earlier ones.
//!
//! ```yaml
//! name: decoder/auth/0
//! operations:
//!   - user: +s_lo
//!   - event.id: +re_extract/$message/id=(\d+)
//! ```
//!
//! Asset loading validates only the YAML envelope; the definition text of
//! each operation is kept raw so that the compile/validate pass can report
//! every malformed definition individually instead of aborting on the
//! first.

use std::path::Path;

use serde::Serialize;

use crate::error::{ParseError, Result};

/// One field/definition pair, order-significant within its asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    /// Target field path (dot-addressable).
    pub field: String,
    /// Raw definition text, e.g. `+s_trim/both/-`.
    pub text: String,
}

/// A decoder/rule asset: a named, ordered list of operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Catalog name, e.g. `decoder/auth/0`.
    pub name: String,
    /// Operations in declaration order.
    pub operations: Vec<Operation>,
}

/// Assets loaded from a directory, with per-file errors collected rather
/// than aborting the whole load.
#[derive(Debug, Default)]
pub struct AssetSet {
    pub assets: Vec<Asset>,
    pub errors: Vec<String>,
}

/// Parse a single asset from a YAML string.
pub fn parse_asset_yaml(yaml: &str) -> Result<Asset> {
    let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    parse_asset_value(&value)
}

/// Parse a single asset from a YAML file.
pub fn parse_asset_file(path: &Path) -> Result<Asset> {
    let content = std::fs::read_to_string(path)?;
    parse_asset_yaml(&content)
}

/// Recursively load all `.yml`/`.yaml` assets under a directory.
pub fn parse_asset_directory(path: &Path) -> Result<AssetSet> {
    let mut set = AssetSet::default();
    load_dir(path, &mut set)?;
    Ok(set)
}

fn load_dir(dir: &Path, set: &mut AssetSet) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?
        .collect::<std::io::Result<_>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            load_dir(&path, set)?;
        } else if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yml") | Some("yaml")
        ) {
            match parse_asset_file(&path) {
                Ok(asset) => set.assets.push(asset),
                Err(e) => set.errors.push(format!("{}: {e}", path.display())),
            }
        }
    }
    Ok(())
}

fn parse_asset_value(value: &serde_yaml::Value) -> Result<Asset> {
    let obj = value
        .as_mapping()
        .ok_or_else(|| ParseError::InvalidAsset("asset YAML must be a mapping".to_string()))?;

    let name = obj
        .get(ykey("name"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| ParseError::InvalidAsset("missing 'name'".to_string()))?
        .to_string();

    let operations = match obj.get(ykey("operations")) {
        Some(ops) => parse_operations(ops)?,
        None => Vec::new(),
    };

    Ok(Asset { name, operations })
}

fn parse_operations(value: &serde_yaml::Value) -> Result<Vec<Operation>> {
    let items = value
        .as_sequence()
        .ok_or_else(|| ParseError::InvalidAsset("'operations' must be a sequence".to_string()))?;

    let mut operations = Vec::with_capacity(items.len());
    for item in items {
        let map = item.as_mapping().filter(|m| m.len() == 1).ok_or_else(|| {
            ParseError::InvalidAsset(
                "each operation must be a single-key mapping of field to definition".to_string(),
            )
        })?;

        let Some((k, v)) = map.iter().next() else {
            continue;
        };
        let field = k.as_str().ok_or_else(|| {
            ParseError::InvalidAsset("operation field name must be a string".to_string())
        })?;
        let text = v.as_str().ok_or_else(|| {
            ParseError::InvalidAsset(format!("definition for '{field}' must be a string"))
        })?;

        operations.push(Operation {
            field: field.to_string(),
            text: text.to_string(),
        });
    }
    Ok(operations)
}

fn ykey(s: &str) -> serde_yaml::Value {
    serde_yaml::Value::String(s.to_string())
}
