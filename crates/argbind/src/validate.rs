use crate::convert::{FormatPolicy, convert};
use crate::error::BindError;
use crate::partition::{Assignment, Partition};
use crate::value::Value;
use argbind_metadata::{Arity, OptionSpecification};
use indexmap::IndexMap;

/// What became of one specification.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingOutcome {
    /// No input; the builder decides what the member gets.
    Absent,
    Bound(Value),
    Failed(BindError),
}

impl BindingOutcome {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Bound(value) => Some(value),
            _ => None,
        }
    }
}

/// Outcomes (index-aligned with the specifications) plus every error found,
/// in reporting order.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub outcomes: Vec<BindingOutcome>,
    pub errors: Vec<BindError>,
}

/// Convert the partitioned input and check every constraint.
///
/// Errors are grouped by kind (unknown names, missing values, repeats,
/// sequence bounds, conversions, set conflicts, missing required options),
/// in declaration order within a group.
pub fn validate(
    partition: &Partition,
    specs: &[OptionSpecification],
    format: &FormatPolicy,
) -> Validation {
    let slots = &partition.assignments;
    let mut outcomes = vec![BindingOutcome::Absent; specs.len()];
    let mut errors: Vec<BindError> = partition
        .unknown
        .iter()
        .map(|name| BindError::UnknownOption(name.clone()))
        .collect();

    // Specifications whose input already failed; no "required" report for them.
    let mut spoiled = vec![false; specs.len()];

    for (idx, spec) in specs.iter().enumerate() {
        if slots[idx].missing_value {
            spoiled[idx] = true;
            fail(
                &mut outcomes[idx],
                &mut errors,
                BindError::MissingValueOption(spec.name_info()),
            );
        }
    }

    for (idx, spec) in specs.iter().enumerate() {
        if slots[idx].occurrences > 1 && !spec.arity.is_sequence() {
            errors.push(BindError::RepeatedOption(spec.name_info()));
        }
    }

    for (idx, spec) in specs.iter().enumerate() {
        if sequence_out_of_range(spec, &slots[idx]) {
            spoiled[idx] = true;
            fail(
                &mut outcomes[idx],
                &mut errors,
                BindError::SequenceOutOfRange(spec.name_info()),
            );
        }
    }

    let received: Vec<bool> = specs
        .iter()
        .zip(slots)
        .map(|(spec, slot)| slot.received(&spec.arity))
        .collect();

    for (idx, spec) in specs.iter().enumerate() {
        if !received[idx] || !matches!(outcomes[idx], BindingOutcome::Absent) {
            continue;
        }
        if spec.arity == Arity::Switch {
            outcomes[idx] = BindingOutcome::Bound(Value::Bool(true));
            continue;
        }
        match convert(&slots[idx].values, &spec.kind, format) {
            Ok(value) => outcomes[idx] = BindingOutcome::Bound(value),
            Err(failure) => {
                tracing::trace!(spec = %spec.display_name(), value = %failure.value, "conversion failed");
                fail(
                    &mut outcomes[idx],
                    &mut errors,
                    BindError::BadFormatConversion {
                        name: spec.name_info(),
                        value: failure.value,
                    },
                );
            }
        }
    }

    let mut sets: IndexMap<&str, Vec<usize>> = IndexMap::new();
    for (idx, spec) in specs.iter().enumerate() {
        if received[idx] && !spec.set_name.is_empty() {
            sets.entry(spec.set_name.as_str()).or_default().push(idx);
        }
    }
    if sets.len() > 1 {
        let mut conflicting: Vec<usize> = sets.values().flatten().copied().collect();
        conflicting.sort_unstable();
        for idx in conflicting {
            errors.push(BindError::MutuallyExclusiveSet {
                name: specs[idx].name_info(),
                set_name: specs[idx].set_name.clone(),
            });
        }
    }

    for (idx, spec) in specs.iter().enumerate() {
        if !spec.required || received[idx] || spoiled[idx] {
            continue;
        }
        if !spec.set_name.is_empty() && sets.contains_key(spec.set_name.as_str()) {
            continue;
        }
        errors.push(BindError::MissingRequiredOption(spec.name_info()));
    }

    Validation { outcomes, errors }
}

fn fail(outcome: &mut BindingOutcome, errors: &mut Vec<BindError>, error: BindError) {
    if matches!(outcome, BindingOutcome::Absent) {
        *outcome = BindingOutcome::Failed(error.clone());
    }
    errors.push(error);
}

fn sequence_out_of_range(spec: &OptionSpecification, slot: &Assignment) -> bool {
    if !spec.arity.is_sequence() || slot.missing_value {
        return false;
    }
    if slot.overflowed {
        return true;
    }
    if slot.values.is_empty() {
        // Absent named sequences are simply unset.
        return spec.is_positional() && spec.arity.min().is_some();
    }
    !spec.arity.accepts(slot.values.len())
}
