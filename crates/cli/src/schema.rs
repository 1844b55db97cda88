use anyhow::{Context, Result, bail};
use argbind::{Arity, BindingSchemaV1, ParserSettings, SCHEMA_FORMAT_VERSION};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub fn load_schema(path: &Path) -> Result<BindingSchemaV1> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read schema `{}`", path.display()))?;
    let schema = BindingSchemaV1::from_json_slice(&bytes)
        .with_context(|| format!("failed to parse schema `{}`", path.display()))?;
    if schema.format_version != SCHEMA_FORMAT_VERSION {
        bail!(
            "unsupported schema format version {} (expected {})",
            schema.format_version,
            SCHEMA_FORMAT_VERSION
        );
    }
    tracing::debug!(specs = schema.specifications.len(), "loaded schema");
    Ok(schema)
}

pub fn load_settings(path: &Path) -> Result<ParserSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings `{}`", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse settings `{}`", path.display()))
}

#[derive(Debug, Serialize)]
pub struct SchemaReport {
    pub schema: String,
    pub target: String,
    pub options: Vec<OptionEntry>,
    /// Why the specifications were rejected, if they were.
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OptionEntry {
    pub name: String,
    pub member: String,
    pub kind: &'static str,
    pub arity: String,
    pub required: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub set: String,
}

impl SchemaReport {
    pub fn new(path: &Path, schema: &BindingSchemaV1, settings: &ParserSettings) -> Self {
        let options = schema
            .specifications
            .iter()
            .map(|spec| OptionEntry {
                name: spec.display_name(),
                member: spec.member.clone(),
                kind: spec.kind.type_name(),
                arity: describe_arity(&spec.arity),
                required: spec.required,
                set: spec.set_name.clone(),
            })
            .collect();
        let error = argbind::check_specifications(&schema.specifications, settings)
            .err()
            .map(|e| e.to_string());
        Self {
            schema: path.display().to_string(),
            target: schema.target.clone(),
            options,
            error,
        }
    }
}

fn describe_arity(arity: &Arity) -> String {
    match arity {
        Arity::Switch => "switch".to_string(),
        Arity::Scalar => "scalar".to_string(),
        Arity::Sequence { min, max } => {
            let bound = |b: &Option<u32>| b.map_or_else(|| "*".to_string(), |n| n.to_string());
            format!("sequence({}..{})", bound(min), bound(max))
        }
    }
}
