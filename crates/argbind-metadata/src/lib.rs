//! Shared specification model for argbind.
//!
//! The types here describe *what* can be bound, never how. A discovery step
//! (hand-written tables, a derive, or a JSON document) produces them and hands
//! them to the `argbind` engine, which never mutates them. They are used for:
//! - declaring the options and positional values of a target type
//! - attributing binding errors to an option (`NameInfo`)
//! - shipping specification lists between tools as JSON (`BindingSchemaV1`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Current `format-version` written by [`BindingSchemaV1::new`].
pub const SCHEMA_FORMAT_VERSION: u32 = 1;

/// Storage width of an integer member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntWidth {
    I8,
    I16,
    I32,
    #[default]
    I64,
}

impl IntWidth {
    /// Inclusive range of values representable at this width.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Self::I8 => (i64::from(i8::MIN), i64::from(i8::MAX)),
            Self::I16 => (i64::from(i16::MIN), i64::from(i16::MAX)),
            Self::I32 => (i64::from(i32::MIN), i64::from(i32::MAX)),
            Self::I64 => (i64::MIN, i64::MAX),
        }
    }

    pub fn contains(self, value: i64) -> bool {
        let (lo, hi) = self.bounds();
        (lo..=hi).contains(&value)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
        }
    }
}

/// Shape of the value a specification binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetKind {
    Bool,
    Integer(IntWidth),
    Float,
    String,
    /// Enumeration; values are matched by exact symbol or by index into `symbols`.
    Enum { symbols: Vec<String> },
    /// A scalar primitive that may be absent.
    Nullable(Box<TargetKind>),
    /// Any non-sequence value that may be absent.
    Optional(Box<TargetKind>),
    Sequence(Box<TargetKind>),
}

impl TargetKind {
    pub fn int() -> Self {
        Self::Integer(IntWidth::I32)
    }

    pub fn long() -> Self {
        Self::Integer(IntWidth::I64)
    }

    pub fn enumeration<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn nullable(inner: TargetKind) -> Self {
        Self::Nullable(Box::new(inner))
    }

    pub fn optional(inner: TargetKind) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn sequence(inner: TargetKind) -> Self {
        Self::Sequence(Box::new(inner))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    pub fn is_wrapper(&self) -> bool {
        matches!(self, Self::Nullable(_) | Self::Optional(_))
    }

    /// Bool, integer, float or enum.
    pub fn is_scalar_primitive(&self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Integer(_) | Self::Float | Self::Enum { .. }
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer(width) => width.name(),
            Self::Float => "float",
            Self::String => "string",
            Self::Enum { .. } => "enum",
            Self::Nullable(_) => "nullable",
            Self::Optional(_) => "optional",
            Self::Sequence(_) => "sequence",
        }
    }
}

/// How many values a specification consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Arity {
    /// No value; presence alone sets the member.
    Switch,
    /// Exactly one value.
    Scalar,
    /// A bounded range of values. `None` means the bound was not declared.
    Sequence {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
}

impl Arity {
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence { .. })
    }

    pub fn min(&self) -> Option<u32> {
        match self {
            Self::Sequence { min, .. } => *min,
            _ => None,
        }
    }

    pub fn max(&self) -> Option<u32> {
        match self {
            Self::Sequence { max, .. } => *max,
            _ => None,
        }
    }

    /// Whether `count` values fall inside the declared bounds.
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Self::Switch => count == 0,
            Self::Scalar => count == 1,
            Self::Sequence { min, max } => {
                min.is_none_or(|m| count >= m as usize) && max.is_none_or(|m| count <= m as usize)
            }
        }
    }
}

/// Names of a specification, used to attribute errors.
///
/// Both parts empty means a positional (value-only) specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NameInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long_name: String,
}

impl NameInfo {
    pub const EMPTY: NameInfo = NameInfo {
        short_name: String::new(),
        long_name: String::new(),
    };

    pub fn new(short_name: impl Into<String>, long_name: impl Into<String>) -> Self {
        Self {
            short_name: short_name.into(),
            long_name: long_name.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.short_name.is_empty() && self.long_name.is_empty()
    }

    /// The long name when present, otherwise the short name.
    pub fn name_text(&self) -> &str {
        if self.long_name.is_empty() {
            &self.short_name
        } else {
            &self.long_name
        }
    }
}

impl fmt::Display for NameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.short_name.is_empty(), self.long_name.is_empty()) {
            (true, true) => f.write_str("<value>"),
            (false, true) => write!(f, "-{}", self.short_name),
            (true, false) => write!(f, "--{}", self.long_name),
            (false, false) => write!(f, "-{}, --{}", self.short_name, self.long_name),
        }
    }
}

/// One bindable option or positional slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSpecification {
    /// Target member that receives the converted value.
    pub member: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    /// Binding order among positional specifications.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub arity: Arity,
    #[serde(default)]
    pub required: bool,
    /// Mutually exclusive set; empty means no set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub set_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<char>,
    pub kind: TargetKind,
    /// Raw default, converted like user input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
}

impl OptionSpecification {
    /// A named option. The long name defaults to the lower-cased member name.
    pub fn option(member: impl Into<String>, kind: TargetKind) -> Self {
        let member = member.into();
        let arity = match &kind {
            TargetKind::Bool => Arity::Switch,
            TargetKind::Sequence(_) => Arity::Sequence { min: None, max: None },
            _ => Arity::Scalar,
        };
        Self {
            long_name: Some(member.to_lowercase()),
            member,
            short_name: None,
            index: None,
            arity,
            required: false,
            set_name: String::new(),
            separator: None,
            kind,
            default_value: None,
            help: String::new(),
        }
    }

    /// A positional specification bound by `index` among leftover values.
    pub fn value(member: impl Into<String>, index: usize, kind: TargetKind) -> Self {
        let arity = if kind.is_sequence() {
            Arity::Sequence { min: None, max: None }
        } else {
            Arity::Scalar
        };
        Self {
            member: member.into(),
            short_name: None,
            long_name: None,
            index: Some(index),
            arity,
            required: false,
            set_name: String::new(),
            separator: None,
            kind,
            default_value: None,
            help: String::new(),
        }
    }

    pub fn with_short(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self
    }

    /// Keep only the short name.
    pub fn short_only(mut self, short: char) -> Self {
        self.short_name = Some(short);
        self.long_name = None;
        self
    }

    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long_name = Some(long.into());
        self
    }

    pub fn with_arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    pub fn with_bounds(mut self, min: Option<u32>, max: Option<u32>) -> Self {
        self.arity = Arity::Sequence { min, max };
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_set(mut self, set_name: impl Into<String>) -> Self {
        self.set_name = set_name.into();
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn is_positional(&self) -> bool {
        self.short_name.is_none() && self.long_name.is_none()
    }

    pub fn name_info(&self) -> NameInfo {
        NameInfo {
            short_name: self.short_name.map(String::from).unwrap_or_default(),
            long_name: self.long_name.clone().unwrap_or_default(),
        }
    }

    /// Human-readable identity for configuration diagnostics.
    pub fn display_name(&self) -> String {
        if self.is_positional() {
            format!("value #{} ({})", self.index.unwrap_or_default(), self.member)
        } else {
            self.name_info().to_string()
        }
    }
}

/// JSON envelope for a specification list handed over by a discovery tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BindingSchemaV1 {
    pub format_version: u32,
    /// Name of the bound target type, informational only.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specifications: Vec<OptionSpecification>,
}

impl BindingSchemaV1 {
    pub fn new(target: impl Into<String>, specifications: Vec<OptionSpecification>) -> Self {
        Self {
            format_version: SCHEMA_FORMAT_VERSION,
            target: target.into(),
            specifications,
        }
    }

    /// Encode as JSON bytes.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_default()
    }

    pub fn from_json_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
