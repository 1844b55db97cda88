use argbind_metadata::OptionSpecification;
use serde::{Deserialize, Serialize};

/// Equality policy for option names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameComparer {
    #[default]
    Ordinal,
    IgnoreCase,
}

impl NameComparer {
    pub fn matches(self, a: &str, b: &str) -> bool {
        match self {
            Self::Ordinal => a == b,
            Self::IgnoreCase => a
                .chars()
                .flat_map(char::to_lowercase)
                .eq(b.chars().flat_map(char::to_lowercase)),
        }
    }
}

/// Matches names (without dashes) against declared specifications.
#[derive(Debug, Clone, Copy)]
pub struct NameLookup<'a> {
    specs: &'a [OptionSpecification],
    comparer: NameComparer,
}

impl<'a> NameLookup<'a> {
    pub fn new(specs: &'a [OptionSpecification], comparer: NameComparer) -> Self {
        Self { specs, comparer }
    }

    pub fn comparer(&self) -> NameComparer {
        self.comparer
    }

    /// Index of the specification whose short or long name is `name`.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.specs
            .iter()
            .position(|spec| matches_name(spec, name, self.comparer))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

fn matches_name(spec: &OptionSpecification, name: &str, comparer: NameComparer) -> bool {
    let mut buf = [0u8; 4];
    spec.short_name
        .is_some_and(|c| comparer.matches(c.encode_utf8(&mut buf), name))
        || spec
            .long_name
            .as_deref()
            .is_some_and(|long| comparer.matches(long, name))
}
