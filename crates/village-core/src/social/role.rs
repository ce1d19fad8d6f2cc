//! Social roles a villager can hold.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocialRole {
    #[default]
    CommunityMember,
    Newcomer,
    Elder,
    Leader,
    Healer,
    Merchant,
    Outcast,
}

impl SocialRole {
    pub fn all() -> &'static [SocialRole] {
        &[
            SocialRole::CommunityMember,
            SocialRole::Newcomer,
            SocialRole::Elder,
            SocialRole::Leader,
            SocialRole::Healer,
            SocialRole::Merchant,
            SocialRole::Outcast,
        ]
    }

    /// Multiplier on how much this villager's opinions sway others.
    pub fn influence_modifier(&self) -> f32 {
        match self {
            SocialRole::CommunityMember => 1.0,
            SocialRole::Newcomer => 0.5,
            SocialRole::Elder => 1.5,
            SocialRole::Leader => 2.0,
            SocialRole::Healer => 1.3,
            SocialRole::Merchant => 1.2,
            SocialRole::Outcast => 0.2,
        }
    }

    pub fn is_authority(&self) -> bool {
        matches!(self, SocialRole::Elder | SocialRole::Leader)
    }

    /// Whether a villager holding this role may move directly to `target`.
    pub fn can_transition_to(&self, target: SocialRole) -> bool {
        match (self, target) {
            (from, to) if *from == to => false,
            (SocialRole::Outcast, SocialRole::Leader | SocialRole::Elder) => false,
            (SocialRole::Newcomer, SocialRole::Elder) => false,
            _ => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SocialRole::CommunityMember => "community_member",
            SocialRole::Newcomer => "newcomer",
            SocialRole::Elder => "elder",
            SocialRole::Leader => "leader",
            SocialRole::Healer => "healer",
            SocialRole::Merchant => "merchant",
            SocialRole::Outcast => "outcast",
        }
    }
}

impl fmt::Display for SocialRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SocialRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SocialRole::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown social role '{}'", s))
    }
}
