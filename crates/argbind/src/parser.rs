use crate::bind::{bind_immutable, bind_mutable};
use crate::builder::{ImmutableTarget, MutableTarget};
use crate::error::ConfigError;
use crate::result::ParseResult;
use crate::settings::ParserSettings;
use argbind_metadata::{BindingSchemaV1, OptionSpecification};

/// A target that can list its own option specifications.
pub trait Describe {
    fn specifications() -> Vec<OptionSpecification>;

    /// The specifications wrapped for export.
    fn schema() -> BindingSchemaV1 {
        BindingSchemaV1::new(std::any::type_name::<Self>(), Self::specifications())
    }
}

/// Settings plus entry points for [`Describe`] targets.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    settings: ParserSettings,
}

impl Parser {
    pub fn new(settings: ParserSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ParserSettings {
        &self.settings
    }

    pub fn parse_mutable<T, S>(&self, args: &[S]) -> Result<ParseResult<T>, ConfigError>
    where
        T: Describe + MutableTarget + Default + 'static,
        S: AsRef<str>,
    {
        bind_mutable(&T::specifications(), args, &self.settings)
    }

    pub fn parse_immutable<T, S>(&self, args: &[S]) -> Result<ParseResult<T>, ConfigError>
    where
        T: Describe + ImmutableTarget,
        S: AsRef<str>,
    {
        bind_immutable(&T::specifications(), args, &self.settings)
    }
}
