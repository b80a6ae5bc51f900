use serde::{Deserialize, Serialize};

pub type GroupName = String;

/// A named virtual workspace.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: GroupName,
}

impl Group {
    pub fn new(name: impl Into<GroupName>) -> Self {
        Self { name: name.into() }
    }
}

/// One group per character of `names`.
pub fn groups_from_chars(names: &str) -> Vec<Group> {
    names.chars().map(|c| Group::new(c.to_string())).collect()
}
