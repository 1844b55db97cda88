use crate::lookup::NameLookup;
use crate::tokenizer::Token;
use argbind_metadata::{Arity, OptionSpecification};
use std::collections::VecDeque;

/// Raw input gathered for one specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// How many times the option's name appeared.
    pub occurrences: usize,
    /// Raw values in input order, already split on the separator.
    pub values: Vec<String>,
    /// The name appeared without a value where one was needed.
    pub missing_value: bool,
    /// Values beyond the sequence's bounds were left unclaimed.
    pub overflowed: bool,
}

impl Assignment {
    /// Whether the specification received input: a switch by its presence,
    /// everything else by at least one value.
    pub fn received(&self, arity: &Arity) -> bool {
        match arity {
            Arity::Switch => self.occurrences > 0,
            _ => !self.values.is_empty(),
        }
    }
}

/// Output of [`partition`], index-aligned with the specification list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub help: bool,
    /// Unmatched option names, in input order.
    pub unknown: Vec<String>,
    pub assignments: Vec<Assignment>,
    /// Positional values no specification claimed.
    pub ignored: Vec<String>,
}

#[derive(Debug)]
struct Pending {
    text: String,
    /// Sequence that stopped at its max right before this value.
    overflow_from: Option<usize>,
}

/// Assign tokens to specifications.
///
/// Named options take their values first, walking left to right; the value
/// tokens nobody consumed are then bound to positional specifications in
/// index order.
pub fn partition(
    tokens: &[Token],
    specs: &[OptionSpecification],
    lookup: &NameLookup<'_>,
    is_help: &dyn Fn(&str) -> bool,
) -> Partition {
    let mut out = Partition {
        assignments: vec![Assignment::default(); specs.len()],
        ..Partition::default()
    };
    let mut positional: Vec<Pending> = Vec::new();
    let mut overflow_owner: Option<usize> = None;

    let mut i = 0;
    while i < tokens.len() {
        let (text, attached) = match &tokens[i] {
            Token::Value { text, escaped } => {
                positional.push(Pending {
                    text: text.clone(),
                    overflow_from: if *escaped { None } else { overflow_owner },
                });
                i += 1;
                continue;
            }
            Token::Name { text, attached } => (text, attached.as_deref()),
        };
        i += 1;
        overflow_owner = None;

        let Some(idx) = lookup.find(text) else {
            if is_help(text) {
                out.help = true;
            } else {
                tracing::trace!(name = %text, "unknown option");
                out.unknown.push(text.clone());
            }
            continue;
        };

        let spec = &specs[idx];
        let slot = &mut out.assignments[idx];
        slot.occurrences += 1;

        match spec.arity {
            Arity::Switch => {}
            Arity::Scalar => match attached.map(String::from).or_else(|| take_value(tokens, &mut i)) {
                Some(value) if slot.values.is_empty() => slot.values.push(value),
                Some(_) => {}
                None => slot.missing_value = true,
            },
            Arity::Sequence { max, .. } => {
                let max = max.map(|m| m as usize);
                let full = |len: usize| max.is_some_and(|m| len >= m);
                if full(slot.values.len()) {
                    // Repeated and already saturated.
                    overflow_owner = Some(idx);
                    continue;
                }
                let mut taken = 0;
                if let Some(value) = attached {
                    push_item(&mut slot.values, value, spec.separator);
                    taken += 1;
                }
                while !full(slot.values.len()) {
                    let Some(value) = take_value(tokens, &mut i) else {
                        break;
                    };
                    push_item(&mut slot.values, &value, spec.separator);
                    taken += 1;
                }
                if taken == 0 {
                    slot.missing_value = true;
                } else if full(slot.values.len()) {
                    overflow_owner = Some(idx);
                }
            }
        }
        tracing::trace!(option = %text, spec = idx, values = slot.values.len(), "bound option");
    }

    bind_positional(specs, positional, &mut out);
    out
}

/// Append one raw token to a sequence, split into items when a separator is
/// declared.
fn push_item(values: &mut Vec<String>, raw: &str, separator: Option<char>) {
    match separator {
        Some(sep) => values.extend(raw.split(sep).map(String::from)),
        None => values.push(raw.to_string()),
    }
}

/// Next token if it is a plain (non-escaped) value.
fn take_value(tokens: &[Token], i: &mut usize) -> Option<String> {
    match tokens.get(*i) {
        Some(Token::Value {
            text,
            escaped: false,
        }) => {
            *i += 1;
            Some(text.clone())
        }
        _ => None,
    }
}

fn bind_positional(specs: &[OptionSpecification], pending: Vec<Pending>, out: &mut Partition) {
    let mut order: Vec<usize> = (0..specs.len())
        .filter(|&idx| specs[idx].is_positional())
        .collect();
    order.sort_by_key(|&idx| specs[idx].index.unwrap_or(usize::MAX));

    let mut queue: VecDeque<Pending> = pending.into();
    for (n, &idx) in order.iter().enumerate() {
        let spec = &specs[idx];
        let slot = &mut out.assignments[idx];

        match spec.arity {
            Arity::Sequence { max, .. } => {
                // Leave one value for every scalar bound after this one.
                let reserved = order[n + 1..]
                    .iter()
                    .filter(|&&later| !specs[later].arity.is_sequence())
                    .count();
                let mut available = queue.len().saturating_sub(reserved);
                let max = max.map(|m| m as usize);
                while available > 0 && !max.is_some_and(|m| slot.values.len() >= m) {
                    let Some(p) = queue.pop_front() else {
                        break;
                    };
                    push_item(&mut slot.values, &p.text, spec.separator);
                    available -= 1;
                }
            }
            _ => {
                if let Some(p) = queue.pop_front() {
                    slot.values.push(p.text);
                }
            }
        }
    }

    let trailing_sequence = order
        .last()
        .copied()
        .filter(|&idx| specs[idx].arity.max().is_some());
    for p in queue {
        match p.overflow_from.or(trailing_sequence) {
            Some(owner) => out.assignments[owner].overflowed = true,
            None => {
                tracing::trace!(value = %p.text, "ignoring unclaimed value");
                out.ignored.push(p.text);
            }
        }
    }
}
