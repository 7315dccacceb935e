use anyhow::{Context, Result};
use dimrand::api::DimensionInputs;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Node inputs from an optional JSON file, overlaid with optional inline JSON.
///
/// Both sources are objects of node input fields; inline fields win. Anything missing
/// takes the node default.
pub fn load(path: Option<&str>, inline: Option<&str>) -> Result<DimensionInputs> {
    let mut fields = Map::new();
    if let Some(path) = path {
        fields.extend(read_object(Path::new(path))?);
    }
    if let Some(inline) = inline {
        fields.extend(parse_object(inline).context("parsing --json")?);
    }
    serde_json::from_value(Value::Object(fields)).context("invalid node inputs")
}

fn read_object(path: &Path) -> Result<Map<String, Value>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_object(&text).with_context(|| format!("parsing {}", path.display()))
}

fn parse_object(text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected a JSON object, got {other}"),
    }
}
