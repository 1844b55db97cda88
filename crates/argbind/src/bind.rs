use crate::builder::{Assigning, Constructing, ImmutableTarget, InstanceBuilder, Member, MutableTarget};
use crate::check::check_specifications;
use crate::error::{BindError, ConfigError};
use crate::lookup::NameLookup;
use crate::partition::partition;
use crate::result::ParseResult;
use crate::settings::ParserSettings;
use crate::validate::{BindingOutcome, validate};
use argbind_metadata::OptionSpecification;

/// Bind `args` to a default-constructed mutable target.
pub fn bind_mutable<T, S>(
    specs: &[OptionSpecification],
    args: &[S],
    settings: &ParserSettings,
) -> Result<ParseResult<T>, ConfigError>
where
    T: MutableTarget + Default + 'static,
    S: AsRef<str>,
{
    bind_with(Assigning::<T>::default(), specs, args, settings)
}

/// Bind `args` to an immutable target built through its constructor.
pub fn bind_immutable<T, S>(
    specs: &[OptionSpecification],
    args: &[S],
    settings: &ParserSettings,
) -> Result<ParseResult<T>, ConfigError>
where
    T: ImmutableTarget,
    S: AsRef<str>,
{
    bind_with(Constructing::<T>::default(), specs, args, settings)
}

/// Run the whole pipeline with an explicit builder.
///
/// `Err` is reserved for mistakes in `specs` (or a target that refuses a
/// value); problems with `args` come back as [`ParseResult::Errors`].
pub fn bind_with<B, S>(
    builder: B,
    specs: &[OptionSpecification],
    args: &[S],
    settings: &ParserSettings,
) -> Result<ParseResult<B::Output>, ConfigError>
where
    B: InstanceBuilder,
    S: AsRef<str>,
{
    let defaults = check_specifications(specs, settings)?;

    let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();
    let lookup = NameLookup::new(specs, settings.name_comparer);
    let tokens = settings.tokenize(&args, &|name| lookup.contains(name));
    tracing::trace!(?tokens, "tokenized");

    let partition = partition(&tokens, specs, &lookup, &|name| settings.is_help_name(name));
    if partition.help {
        tracing::debug!(args = args.len(), "help requested");
        return Ok(ParseResult::Errors(vec![BindError::HelpRequested]));
    }

    let validation = validate(&partition, specs, &settings.format);
    if !validation.errors.is_empty() {
        tracing::debug!(
            args = args.len(),
            specs = specs.len(),
            errors = validation.errors.len(),
            "binding failed"
        );
        return Ok(ParseResult::Errors(validation.errors));
    }

    let members = specs
        .iter()
        .zip(validation.outcomes)
        .zip(defaults)
        .map(|((spec, outcome), default)| Member {
            spec,
            input: match outcome {
                BindingOutcome::Bound(value) => Some(value),
                _ => None,
            },
            default,
        })
        .collect();
    let instance = builder.build(members)?;
    tracing::debug!(
        args = args.len(),
        specs = specs.len(),
        ignored = partition.ignored.len(),
        "bound"
    );
    Ok(ParseResult::Parsed(instance))
}
