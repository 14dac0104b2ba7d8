use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable member identifier as issued by the member directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        MemberId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operational duty roles filled on every operating day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    DutyOfficer,
    AssistantDutyOfficer,
    Instructor,
    TowPilot,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::DutyOfficer,
        Role::AssistantDutyOfficer,
        Role::Instructor,
        Role::TowPilot,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::DutyOfficer => "Duty Officer",
            Role::AssistantDutyOfficer => "Assistant Duty Officer",
            Role::Instructor => "Instructor",
            Role::TowPilot => "Tow Pilot",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-member role eligibility flags, one bit per role.
///
/// Replaces the per-role boolean field lookups of the membership records
/// with a table built once at extraction time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSet(u8);

impl RoleSet {
    pub fn empty() -> Self {
        RoleSet(0)
    }

    pub fn of(roles: &[Role]) -> Self {
        let mut set = RoleSet::empty();
        for role in roles {
            set.insert(*role);
        }
        set
    }

    pub fn insert(&mut self, role: Role) {
        self.0 |= 1 << role.index();
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0 & (1 << role.index()) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|r| self.contains(*r))
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// One club member, snapshotted for the duration of a scheduling run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub eligibility: RoleSet,
    pub active: bool,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, roles: &[Role]) -> Self {
        Member {
            id: MemberId::new(id),
            name: name.into(),
            eligibility: RoleSet::of(roles),
            active: true,
        }
    }
}
