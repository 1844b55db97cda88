use crate::builder::MutableTarget;
use crate::error::MemberError;
use crate::value::Value;
use indexmap::IndexMap;
use serde::ser::{Serialize, Serializer};

/// A target without a Rust type: members are stored by name in the order they
/// were assigned.
///
/// Useful when specifications come from a [`BindingSchemaV1`](crate::BindingSchemaV1)
/// document rather than from code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    members: IndexMap<String, Value>,
}

impl Record {
    pub fn get(&self, member: &str) -> Option<&Value> {
        self.members.get(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.members.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl MutableTarget for Record {
    fn set_member(&mut self, member: &str, value: Value) -> Result<(), MemberError> {
        self.members.insert(member.to_string(), value);
        Ok(())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.members.iter())
    }
}
