use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::member::{MemberId, Role};

/// Preference and constraint facts the preference store holds per member.
///
/// An absent role weight means "no preference" (the member takes the
/// default weight for that role). `last_duty` is the most recent prior
/// assignment outside the current run, used only for fairness weighting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberPrefs {
    pub weights: HashMap<Role, u8>,
    pub dont_schedule: bool,
    pub suspended: bool,
    pub max_per_month: Option<u32>,
    pub last_duty: Option<NaiveDate>,
}

impl MemberPrefs {
    pub fn weight_for(&self, role: Role) -> Option<u8> {
        self.weights.get(&role).copied()
    }

    /// True when the member is out of the pool for this run entirely.
    pub fn opted_out(&self) -> bool {
        self.dont_schedule || self.suspended
    }
}

/// Unordered member pair, stored with the smaller id first so that
/// (A, B) and (B, A) compare and hash identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberPair {
    a: MemberId,
    b: MemberId,
}

impl MemberPair {
    pub fn new(x: MemberId, y: MemberId) -> Self {
        if x <= y {
            MemberPair { a: x, b: y }
        } else {
            MemberPair { a: y, b: x }
        }
    }

    pub fn first(&self) -> &MemberId {
        &self.a
    }

    pub fn second(&self) -> &MemberId {
        &self.b
    }

    pub fn contains(&self, member: &MemberId) -> bool {
        self.a == *member || self.b == *member
    }

    /// The partner of `member` in this pair, if `member` belongs to it.
    pub fn other(&self, member: &MemberId) -> Option<&MemberId> {
        if self.a == *member {
            Some(&self.b)
        } else if self.b == *member {
            Some(&self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> MemberId {
        MemberId::new(s)
    }

    #[test]
    fn pair_is_order_insensitive() {
        let p1 = MemberPair::new(id("bob"), id("alice"));
        let p2 = MemberPair::new(id("alice"), id("bob"));
        assert_eq!(p1, p2);
        assert_eq!(p1.first(), &id("alice"));
        assert_eq!(p1.second(), &id("bob"));
    }

    #[test]
    fn pair_other_side() {
        let p = MemberPair::new(id("alice"), id("bob"));
        assert_eq!(p.other(&id("alice")), Some(&id("bob")));
        assert_eq!(p.other(&id("bob")), Some(&id("alice")));
        assert_eq!(p.other(&id("carol")), None);
        assert!(p.contains(&id("bob")));
        assert!(!p.contains(&id("carol")));
    }

    #[test]
    fn default_prefs_have_no_opinion() {
        let prefs = MemberPrefs::default();
        assert_eq!(prefs.weight_for(Role::TowPilot), None);
        assert!(!prefs.opted_out());
        assert_eq!(prefs.max_per_month, None);
    }
}
