//! Bind command-line arguments to typed targets.
//!
//! A bind takes a list of [`OptionSpecification`]s and the raw arguments and
//! runs them through a fixed pipeline:
//! - check the specifications (mistakes there are a [`ConfigError`])
//! - tokenize (`--name=value`, `-abc` clusters, `-i10`, `--` escaping)
//! - partition tokens between named options and positional values
//! - convert raw text to the declared kinds
//! - validate arity, required options and mutually exclusive sets
//! - build the target through an [`InstanceBuilder`]
//!
//! Every problem with the arguments is collected into
//! [`ParseResult::Errors`] rather than stopping at the first one.

mod bind;
mod builder;
mod check;
mod convert;
mod error;
mod lookup;
mod parser;
mod partition;
mod record;
mod result;
mod settings;
mod tokenizer;
mod validate;
mod value;

pub use argbind_metadata::{
    Arity, BindingSchemaV1, IntWidth, NameInfo, OptionSpecification, SCHEMA_FORMAT_VERSION,
    TargetKind,
};
pub use bind::{bind_immutable, bind_mutable, bind_with};
pub use builder::{
    Assigning, Constructing, ConstructorArgs, ImmutableTarget, InstanceBuilder, Member,
    MutableTarget,
};
pub use check::check_specifications;
pub use convert::{ConversionFailure, FormatPolicy, convert, convert_default};
pub use error::{BindError, ConfigError, ErrorKind, MemberError};
pub use lookup::{NameComparer, NameLookup};
pub use parser::{Describe, Parser};
pub use partition::{Assignment, Partition, partition};
pub use record::Record;
pub use result::ParseResult;
pub use settings::ParserSettings;
pub use tokenizer::{StandardTokenizer, Token, Tokenize, preprocess_dash_dash, tokenize};
pub use validate::{BindingOutcome, Validation, validate};
pub use value::{FromValue, Value};
