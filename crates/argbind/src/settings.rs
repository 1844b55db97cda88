use crate::convert::FormatPolicy;
use crate::lookup::NameComparer;
use crate::tokenizer::{StandardTokenizer, Token, Tokenize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Knobs that shape a bind. Deserializable so a host can keep them in its own
/// configuration file.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserSettings {
    pub name_comparer: NameComparer,
    pub format: FormatPolicy,
    /// Names that request help when no specification claims them.
    pub help_names: Vec<String>,
    pub enable_dash_dash: bool,
    #[serde(skip)]
    tokenizer: Option<Arc<dyn Tokenize>>,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            name_comparer: NameComparer::default(),
            format: FormatPolicy::default(),
            help_names: vec!["help".to_string(), "h".to_string()],
            enable_dash_dash: true,
            tokenizer: None,
        }
    }
}

impl fmt::Debug for ParserSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserSettings")
            .field("name_comparer", &self.name_comparer)
            .field("format", &self.format)
            .field("help_names", &self.help_names)
            .field("enable_dash_dash", &self.enable_dash_dash)
            .field("custom_tokenizer", &self.tokenizer.is_some())
            .finish()
    }
}

impl ParserSettings {
    pub fn with_name_comparer(mut self, comparer: NameComparer) -> Self {
        self.name_comparer = comparer;
        self
    }

    pub fn with_format(mut self, format: FormatPolicy) -> Self {
        self.format = format;
        self
    }

    pub fn with_help_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.help_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_dash_dash(mut self, enabled: bool) -> Self {
        self.enable_dash_dash = enabled;
        self
    }

    /// Replace the standard tokenizer. `enable_dash_dash` is then up to the
    /// custom implementation (see [`preprocess_dash_dash`](crate::preprocess_dash_dash)).
    pub fn with_tokenizer(mut self, tokenizer: impl Tokenize + 'static) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Only whole name tokens are checked: a help name fused into a short
    /// cluster (`-xh`) is taken as the value attached to the preceding option.
    pub fn is_help_name(&self, name: &str) -> bool {
        self.help_names
            .iter()
            .any(|h| self.name_comparer.matches(h, name))
    }

    pub(crate) fn tokenize(&self, args: &[String], is_known: &dyn Fn(&str) -> bool) -> Vec<Token> {
        match &self.tokenizer {
            Some(custom) => custom.tokenize(args, is_known),
            None => StandardTokenizer {
                dash_dash: self.enable_dash_dash,
            }
            .tokenize(args, is_known),
        }
    }
}
