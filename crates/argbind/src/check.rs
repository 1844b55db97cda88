use crate::convert::convert_default;
use crate::error::ConfigError;
use crate::settings::ParserSettings;
use crate::value::Value;
use argbind_metadata::{Arity, OptionSpecification, TargetKind};

/// Validate a specification list before any argument is examined.
///
/// Returns the converted default of every specification, index-aligned with
/// `specs`.
pub fn check_specifications(
    specs: &[OptionSpecification],
    settings: &ParserSettings,
) -> Result<Vec<Option<Value>>, ConfigError> {
    for (i, spec) in specs.iter().enumerate() {
        check_names(spec)?;
        check_arity(spec)?;
        check_kind(spec, &spec.kind, false)?;
        check_unique(spec, &specs[..i], settings)?;
    }

    specs
        .iter()
        .map(|spec| {
            let Some(raw) = spec.default_value.as_deref() else {
                return Ok(None);
            };
            convert_default(spec, raw, &settings.format)
                .map(Some)
                .map_err(|_| ConfigError::InvalidDefault {
                    spec: spec.display_name(),
                    value: raw.to_string(),
                    kind: spec.kind.type_name(),
                })
        })
        .collect()
}

fn check_names(spec: &OptionSpecification) -> Result<(), ConfigError> {
    if let Some(c) = spec.short_name
        && (c.is_whitespace() || c.is_control() || c == '-' || c == '=')
    {
        return Err(ConfigError::InvalidShortName {
            spec: spec.display_name(),
            name: c,
        });
    }
    if let Some(long) = spec.long_name.as_deref()
        && (long.is_empty()
            || long.starts_with('-')
            || long.contains('=')
            || long.chars().any(|c| c.is_whitespace() || c.is_control()))
    {
        return Err(ConfigError::InvalidLongName {
            spec: spec.display_name(),
            name: long.to_string(),
        });
    }
    Ok(())
}

fn check_arity(spec: &OptionSpecification) -> Result<(), ConfigError> {
    let name = || spec.display_name();
    let incompatible = |arity: &'static str| ConfigError::IncompatibleKind {
        spec: spec.display_name(),
        arity,
        kind: spec.kind.type_name(),
    };

    match spec.arity {
        Arity::Switch => {
            if spec.is_positional() {
                return Err(ConfigError::InvalidKind {
                    spec: name(),
                    reason: "a positional specification cannot be a switch",
                });
            }
            if spec.kind != TargetKind::Bool {
                return Err(incompatible("switch"));
            }
        }
        Arity::Scalar => {
            if spec.kind.is_sequence() {
                return Err(incompatible("scalar"));
            }
        }
        Arity::Sequence { min, max } => {
            if !spec.kind.is_sequence() {
                return Err(incompatible("sequence"));
            }
            for (bound, value) in [("min", min), ("max", max)] {
                if value == Some(0) {
                    return Err(ConfigError::ZeroSequenceBound { spec: name(), bound });
                }
            }
            if let (Some(min), Some(max)) = (min, max)
                && min > max
            {
                return Err(ConfigError::InvertedSequenceBounds {
                    spec: name(),
                    min,
                    max,
                });
            }
        }
    }

    if spec.separator.is_some() && !spec.arity.is_sequence() {
        return Err(ConfigError::SeparatorWithoutSequence { spec: name() });
    }
    Ok(())
}

fn check_kind(spec: &OptionSpecification, kind: &TargetKind, nested: bool) -> Result<(), ConfigError> {
    let invalid = |reason| {
        Err(ConfigError::InvalidKind {
            spec: spec.display_name(),
            reason,
        })
    };

    match kind {
        TargetKind::Enum { symbols } => {
            if symbols.is_empty() {
                return invalid("enum has no symbols");
            }
            if symbols
                .iter()
                .enumerate()
                .any(|(i, s)| symbols[..i].contains(s))
            {
                return invalid("enum symbols must be unique");
            }
            Ok(())
        }
        TargetKind::Nullable(inner) => {
            if nested {
                return invalid("wrappers cannot be nested");
            }
            if !inner.is_scalar_primitive() {
                return invalid("nullable requires a bool, integer, float or enum");
            }
            check_kind(spec, inner, true)
        }
        TargetKind::Optional(inner) => {
            if nested {
                return invalid("wrappers cannot be nested");
            }
            if inner.is_wrapper() || inner.is_sequence() {
                return invalid("optional requires a scalar");
            }
            check_kind(spec, inner, true)
        }
        TargetKind::Sequence(inner) => {
            if nested {
                return invalid("sequences cannot be nested");
            }
            if inner.is_wrapper() || inner.is_sequence() {
                return invalid("sequence items must be scalars");
            }
            check_kind(spec, inner, true)
        }
        _ => Ok(()),
    }
}

fn check_unique(
    spec: &OptionSpecification,
    earlier: &[OptionSpecification],
    settings: &ParserSettings,
) -> Result<(), ConfigError> {
    let names = spec_names(spec);
    for other in earlier {
        if let (Some(index), Some(other_index)) = (spec.index, other.index)
            && index == other_index
        {
            return Err(ConfigError::DuplicateIndex {
                spec: spec.display_name(),
                index,
                other: other.display_name(),
            });
        }
        let other_names = spec_names(other);
        for name in &names {
            if other_names
                .iter()
                .any(|o| settings.name_comparer.matches(name, o))
            {
                return Err(ConfigError::DuplicateName {
                    spec: spec.display_name(),
                    name: name.clone(),
                    other: other.display_name(),
                });
            }
        }
    }
    Ok(())
}

fn spec_names(spec: &OptionSpecification) -> Vec<String> {
    spec.short_name
        .map(String::from)
        .into_iter()
        .chain(spec.long_name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::NameComparer;

    fn check(specs: Vec<OptionSpecification>) -> Result<Vec<Option<Value>>, ConfigError> {
        check_specifications(&specs, &ParserSettings::default())
    }

    fn ints() -> TargetKind {
        TargetKind::sequence(TargetKind::int())
    }

    #[test]
    fn zero_bounds_are_rejected() {
        let err = check(vec![
            OptionSpecification::option("IntSequence", ints()).with_bounds(Some(0), Some(3)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::ZeroSequenceBound {
                spec: "--intsequence".to_string(),
                bound: "min"
            }
        );

        let err = check(vec![OptionSpecification::value("Items", 0, ints()).with_bounds(None, Some(0))])
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroSequenceBound { bound: "max", .. }));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = check(vec![
            OptionSpecification::option("IntSequence", ints()).with_bounds(Some(4), Some(3)),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedSequenceBounds { min: 4, max: 3, .. }
        ));
    }

    #[test]
    fn duplicates_follow_the_comparer() {
        let specs = vec![
            OptionSpecification::option("Verbose", TargetKind::Bool).with_short('v'),
            OptionSpecification::option("Version", TargetKind::Bool).short_only('V'),
        ];
        assert!(check_specifications(&specs, &ParserSettings::default()).is_ok());

        let ignore = ParserSettings::default().with_name_comparer(NameComparer::IgnoreCase);
        let err = check_specifications(&specs, &ignore).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { name, .. } if name == "V"));
    }

    #[test]
    fn duplicate_positional_index() {
        let err = check(vec![
            OptionSpecification::value("A", 0, TargetKind::String),
            OptionSpecification::value("B", 0, TargetKind::String),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateIndex { index: 0, .. }));
    }

    #[test]
    fn arity_must_match_kind() {
        let err = check(vec![
            OptionSpecification::option("Name", TargetKind::String).with_arity(Arity::Switch),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::IncompatibleKind { arity: "switch", .. }));

        let err = check(vec![
            OptionSpecification::option("Name", TargetKind::String).with_bounds(None, None),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::IncompatibleKind { arity: "sequence", .. }));

        let err = check(vec![OptionSpecification::option("Items", ints()).with_arity(Arity::Scalar)])
            .unwrap_err();
        assert!(matches!(err, ConfigError::IncompatibleKind { arity: "scalar", .. }));

        // A bool may still be bound from an explicit value.
        assert!(check(vec![
            OptionSpecification::option("Flag", TargetKind::Bool).with_arity(Arity::Scalar)
        ])
        .is_ok());
    }

    #[test]
    fn separator_needs_a_sequence() {
        let err = check(vec![
            OptionSpecification::option("Name", TargetKind::String).with_separator(','),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::SeparatorWithoutSequence { .. }));
    }

    #[test]
    fn kind_shapes() {
        let bad = [
            TargetKind::enumeration(Vec::<String>::new()),
            TargetKind::enumeration(["A", "A"]),
            TargetKind::nullable(TargetKind::String),
            TargetKind::optional(TargetKind::nullable(TargetKind::int())),
        ];
        for kind in bad {
            let err = check(vec![OptionSpecification::option("M", kind.clone())]).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidKind { .. }), "{kind:?}");
        }

        let err = check(vec![OptionSpecification::value(
            "M",
            0,
            TargetKind::Bool,
        )
        .with_arity(Arity::Switch)])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKind { .. }));
    }

    #[test]
    fn invalid_names() {
        let err = check(vec![
            OptionSpecification::option("Name", TargetKind::String).with_short(' '),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidShortName {
                spec: "- , --name".to_string(),
                name: ' '
            }
        );

        let err = check(vec![
            OptionSpecification::option("Name", TargetKind::String).with_long("a=b"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLongName { .. }));
    }

    #[test]
    fn defaults_are_converted() {
        let specs = vec![
            OptionSpecification::option("Count", TargetKind::int()).with_default("5"),
            OptionSpecification::option("Name", TargetKind::String),
        ];
        assert_eq!(check(specs), Ok(vec![Some(Value::Integer(5)), None]));

        let err = check(vec![
            OptionSpecification::option("Count", TargetKind::int()).with_default("five"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDefault {
                spec: "--count".to_string(),
                value: "five".to_string(),
                kind: "i32"
            }
        );
    }
}
