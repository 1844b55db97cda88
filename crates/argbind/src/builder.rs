use crate::error::{ConfigError, MemberError};
use crate::value::{FromValue, Value};
use argbind_metadata::OptionSpecification;
use std::collections::VecDeque;

/// One specification as seen by an [`InstanceBuilder`].
#[derive(Debug, Clone)]
pub struct Member<'a> {
    pub spec: &'a OptionSpecification,
    /// Converted user input, if any was given.
    pub input: Option<Value>,
    /// Converted declared default.
    pub default: Option<Value>,
}

/// Strategy that turns validated members into the bound instance.
pub trait InstanceBuilder {
    type Output;

    fn build(self, members: Vec<Member<'_>>) -> Result<Self::Output, ConfigError>;
}

/// A target populated member by member after default construction.
pub trait MutableTarget: Sized {
    fn set_member(&mut self, member: &str, value: Value) -> Result<(), MemberError>;

    /// Called once every member has been assigned.
    fn finish(self) -> Result<Self, MemberError> {
        Ok(self)
    }
}

/// A target built in one go from its members, in declaration order.
pub trait ImmutableTarget: Sized {
    fn construct(args: ConstructorArgs) -> Result<Self, MemberError>;
}

/// Builds a [`MutableTarget`]: `begin`, `set_member` for each member, `finish`.
///
/// Members without input get their default, an empty sequence or `None`;
/// anything else keeps whatever `begin` produced.
pub struct Assigning<T> {
    begin: Box<dyn FnOnce() -> T>,
}

impl<T> Assigning<T> {
    pub fn new(begin: impl FnOnce() -> T + 'static) -> Self {
        Self {
            begin: Box::new(begin),
        }
    }
}

impl<T: Default + 'static> Default for Assigning<T> {
    fn default() -> Self {
        Self::new(T::default)
    }
}

impl<T: MutableTarget> InstanceBuilder for Assigning<T> {
    type Output = T;

    fn build(self, members: Vec<Member<'_>>) -> Result<T, ConfigError> {
        let mut target = (self.begin)();
        for member in members {
            let kind = &member.spec.kind;
            let value = member.input.or(member.default).or_else(|| {
                (kind.is_sequence() || kind.is_wrapper()).then(|| Value::zero(kind))
            });
            let Some(value) = value else {
                continue;
            };
            target
                .set_member(&member.spec.member, value)
                .map_err(|source| rejected(&member.spec.member, source))?;
        }
        target
            .finish()
            .map_err(|source| rejected(std::any::type_name::<T>(), source))
    }
}

/// Builds an [`ImmutableTarget`] through [`ImmutableTarget::construct`].
///
/// Every member receives a value: input, else default, else the zero value of
/// its kind.
pub struct Constructing<T> {
    _target: std::marker::PhantomData<fn() -> T>,
}

impl<T> Default for Constructing<T> {
    fn default() -> Self {
        Self {
            _target: std::marker::PhantomData,
        }
    }
}

impl<T: ImmutableTarget> InstanceBuilder for Constructing<T> {
    type Output = T;

    fn build(self, members: Vec<Member<'_>>) -> Result<T, ConfigError> {
        let values = members
            .into_iter()
            .map(|m| {
                let value = m
                    .input
                    .or(m.default)
                    .unwrap_or_else(|| Value::zero(&m.spec.kind));
                (m.spec.member.clone(), value)
            })
            .collect();
        T::construct(ConstructorArgs::new(values))
            .map_err(|source| rejected(std::any::type_name::<T>(), source))
    }
}

fn rejected(member: &str, source: MemberError) -> ConfigError {
    ConfigError::TargetRejected {
        member: member.to_string(),
        source,
    }
}

/// Constructor arguments in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorArgs {
    values: VecDeque<(String, Value)>,
    total: usize,
    /// Calls to `next` so far, including those past the end.
    requested: usize,
}

impl ConstructorArgs {
    pub fn new(values: Vec<(String, Value)>) -> Self {
        Self {
            total: values.len(),
            values: values.into(),
            requested: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name of the member the next call to [`next`](Self::next) will return.
    pub fn peek_member(&self) -> Option<&str> {
        self.values.front().map(|(member, _)| member.as_str())
    }

    /// Take the next argument as `T`.
    pub fn next<T: FromValue>(&mut self) -> Result<T, MemberError> {
        self.requested += 1;
        match self.values.pop_front() {
            Some((_, value)) => T::from_value(value),
            None => Err(MemberError::ArgumentCount {
                expected: self.requested,
                found: self.total,
            }),
        }
    }

    /// Fail when arguments are left over.
    pub fn finish(self) -> Result<(), MemberError> {
        if self.values.is_empty() {
            Ok(())
        } else {
            Err(MemberError::ArgumentCount {
                expected: self.total - self.values.len(),
                found: self.total,
            })
        }
    }
}
