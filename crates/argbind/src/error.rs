use argbind_metadata::NameInfo;
use thiserror::Error;

/// A problem with the supplied arguments.
///
/// These are data: every one found in an invocation is collected into
/// [`ParseResult::Errors`](crate::ParseResult::Errors).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("help requested")]
    HelpRequested,
    #[error("option '{0}' is unknown")]
    UnknownOption(String),
    #[error("option '{0}' has no value")]
    MissingValueOption(NameInfo),
    #[error("option '{0}' is defined multiple times")]
    RepeatedOption(NameInfo),
    #[error("a sequence value for '{0}' has too few or too many items")]
    SequenceOutOfRange(NameInfo),
    #[error("value '{value}' for '{name}' is not in the correct format")]
    BadFormatConversion { name: NameInfo, value: String },
    #[error("option '{name}' (set '{set_name}') cannot be combined with options of another set")]
    MutuallyExclusiveSet { name: NameInfo, set_name: String },
    #[error("required option '{0}' is missing")]
    MissingRequiredOption(NameInfo),
}

/// Discriminant of [`BindError`], for callers that map errors to exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    HelpRequested,
    UnknownOption,
    MissingValueOption,
    RepeatedOption,
    SequenceOutOfRange,
    BadFormatConversion,
    MutuallyExclusiveSet,
    MissingRequiredOption,
}

impl BindError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::HelpRequested => ErrorKind::HelpRequested,
            Self::UnknownOption(_) => ErrorKind::UnknownOption,
            Self::MissingValueOption(_) => ErrorKind::MissingValueOption,
            Self::RepeatedOption(_) => ErrorKind::RepeatedOption,
            Self::SequenceOutOfRange(_) => ErrorKind::SequenceOutOfRange,
            Self::BadFormatConversion { .. } => ErrorKind::BadFormatConversion,
            Self::MutuallyExclusiveSet { .. } => ErrorKind::MutuallyExclusiveSet,
            Self::MissingRequiredOption(_) => ErrorKind::MissingRequiredOption,
        }
    }

    /// The specification the error is attributed to, if any.
    ///
    /// Positional specifications report [`NameInfo::EMPTY`].
    pub fn name_info(&self) -> Option<&NameInfo> {
        match self {
            Self::HelpRequested | Self::UnknownOption(_) => None,
            Self::MissingValueOption(name)
            | Self::RepeatedOption(name)
            | Self::SequenceOutOfRange(name)
            | Self::MissingRequiredOption(name)
            | Self::BadFormatConversion { name, .. }
            | Self::MutuallyExclusiveSet { name, .. } => Some(name),
        }
    }

    /// Whether the error replaces every other result (help).
    pub fn stops_processing(&self) -> bool {
        matches!(self, Self::HelpRequested)
    }
}

/// A target rejected a value handed to it by the instance builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MemberError {
    #[error("unknown member '{0}'")]
    UnknownMember(String),
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("integer {0} does not fit the member type")]
    OutOfRange(i64),
    #[error("constructor expects {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },
}

/// The specification list (or the target it describes) is wrong.
///
/// Raised before any argument is examined and never mixed into the
/// per-argument error list: it is a programming mistake, not bad input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{spec}: sequence {bound} bound must be greater than zero")]
    ZeroSequenceBound { spec: String, bound: &'static str },
    #[error("{spec}: sequence min {min} exceeds max {max}")]
    InvertedSequenceBounds { spec: String, min: u32, max: u32 },
    #[error("{spec}: invalid short name '{name}'")]
    InvalidShortName { spec: String, name: char },
    #[error("{spec}: invalid long name '{name}'")]
    InvalidLongName { spec: String, name: String },
    #[error("{spec}: name '{name}' is already used by {other}")]
    DuplicateName {
        spec: String,
        name: String,
        other: String,
    },
    #[error("{spec}: positional index {index} is already used by {other}")]
    DuplicateIndex {
        spec: String,
        index: usize,
        other: String,
    },
    #[error("{spec}: {arity} arity cannot bind a {kind} member")]
    IncompatibleKind {
        spec: String,
        arity: &'static str,
        kind: &'static str,
    },
    #[error("{spec}: {reason}")]
    InvalidKind { spec: String, reason: &'static str },
    #[error("{spec}: a separator requires sequence arity")]
    SeparatorWithoutSequence { spec: String },
    #[error("{spec}: default value '{value}' is not a valid {kind}")]
    InvalidDefault {
        spec: String,
        value: String,
        kind: &'static str,
    },
    #[error("member '{member}' rejected by target: {source}")]
    TargetRejected {
        member: String,
        #[source]
        source: MemberError,
    },
}
