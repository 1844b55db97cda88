use crate::value::Value;
use argbind_metadata::{IntWidth, OptionSpecification, TargetKind};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Numeric text conventions used when converting integers and floats.
///
/// The default is the invariant grammar: optional sign, `.` decimal point, no
/// digit grouping. Parsing never depends on the process locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FormatPolicy {
    pub decimal_point: char,
    /// Ignored between digits when present (`1,000`).
    pub group_separator: Option<char>,
}

impl FormatPolicy {
    pub const INVARIANT: FormatPolicy = FormatPolicy {
        decimal_point: '.',
        group_separator: None,
    };

    /// Rewrite `text` into the invariant grammar. `None` when it uses a `.`
    /// the policy does not allow.
    fn normalize<'t>(&self, text: &'t str) -> Option<Cow<'t, str>> {
        if *self == Self::INVARIANT {
            return Some(Cow::Borrowed(text));
        }
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if Some(c) == self.group_separator {
                continue;
            }
            if c == self.decimal_point {
                out.push('.');
            } else if c == '.' {
                return None;
            } else {
                out.push(c);
            }
        }
        Some(Cow::Owned(out))
    }
}

impl Default for FormatPolicy {
    fn default() -> Self {
        Self::INVARIANT
    }
}

/// The raw text that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionFailure {
    pub value: String,
}

impl ConversionFailure {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// Convert the raw values assigned to a specification into its target kind.
///
/// Sequences convert element by element and fail as a whole on the first bad
/// element. Wrappers yield `Maybe(None)` for no input.
pub fn convert(
    values: &[String],
    kind: &TargetKind,
    format: &FormatPolicy,
) -> Result<Value, ConversionFailure> {
    match kind {
        TargetKind::Sequence(inner) => values
            .iter()
            .map(|v| convert_scalar(v, inner, format))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence),
        TargetKind::Nullable(inner) | TargetKind::Optional(inner) => {
            if values.is_empty() {
                Ok(Value::Maybe(None))
            } else {
                convert(values, inner, format).map(|v| Value::Maybe(Some(Box::new(v))))
            }
        }
        _ => match values.first() {
            Some(raw) => convert_scalar(raw, kind, format),
            None => Err(ConversionFailure::new("")),
        },
    }
}

/// Convert a declared default. Sequence defaults are split on the separator,
/// or on whitespace when none is declared.
pub fn convert_default(
    spec: &OptionSpecification,
    raw: &str,
    format: &FormatPolicy,
) -> Result<Value, ConversionFailure> {
    let values: Vec<String> = if spec.kind.is_sequence() {
        match spec.separator {
            Some(sep) => raw.split(sep).map(String::from).collect(),
            None => raw.split_whitespace().map(String::from).collect(),
        }
    } else {
        vec![raw.to_string()]
    };
    convert(&values, &spec.kind, format)
}

fn convert_scalar(
    raw: &str,
    kind: &TargetKind,
    format: &FormatPolicy,
) -> Result<Value, ConversionFailure> {
    let converted = match kind {
        TargetKind::Bool => parse_bool(raw).map(Value::Bool),
        TargetKind::Integer(width) => parse_integer(raw, *width, format).map(Value::Integer),
        TargetKind::Float => parse_float(raw, format).map(Value::Float),
        TargetKind::String => Some(Value::String(raw.to_string())),
        TargetKind::Enum { symbols } => parse_enum(raw, symbols),
        nested => return convert(std::slice::from_ref(&raw.to_string()), nested, format),
    };
    converted.ok_or_else(|| ConversionFailure::new(raw))
}

fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_integer(raw: &str, width: IntWidth, format: &FormatPolicy) -> Option<i64> {
    let text = format.normalize(raw)?;
    let value: i64 = text.parse().ok()?;
    width.contains(value).then_some(value)
}

fn parse_float(raw: &str, format: &FormatPolicy) -> Option<f64> {
    format.normalize(raw)?.parse().ok()
}

/// Exact-case symbol, or an index into `symbols`. No prefix matching.
fn parse_enum(raw: &str, symbols: &[String]) -> Option<Value> {
    let index = match symbols.iter().position(|s| s == raw) {
        Some(index) => index,
        None => raw
            .parse::<usize>()
            .ok()
            .filter(|i| *i < symbols.len())?,
    };
    Some(Value::Enum {
        index,
        symbol: symbols[index].clone(),
    })
}
