//! Conflict resolution outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a conflict between two villagers ended, with the bond-strength
/// change each outcome carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictResolution {
    PeacefulCompromise,
    MutualApology,
    MediatedAgreement,
    Avoidance,
    DominanceAsserted,
    UnresolvedTension,
    EscalatedConflict,
}

impl ConflictResolution {
    pub fn all() -> &'static [ConflictResolution] {
        &[
            ConflictResolution::PeacefulCompromise,
            ConflictResolution::MutualApology,
            ConflictResolution::MediatedAgreement,
            ConflictResolution::Avoidance,
            ConflictResolution::DominanceAsserted,
            ConflictResolution::UnresolvedTension,
            ConflictResolution::EscalatedConflict,
        ]
    }

    /// Bond strength delta applied when the conflict resolves this way.
    pub fn strength_impact(&self) -> f32 {
        match self {
            ConflictResolution::PeacefulCompromise => 0.2,
            ConflictResolution::MutualApology => 0.25,
            ConflictResolution::MediatedAgreement => 0.15,
            ConflictResolution::Avoidance => -0.05,
            ConflictResolution::DominanceAsserted => -0.1,
            ConflictResolution::UnresolvedTension => -0.15,
            ConflictResolution::EscalatedConflict => -0.3,
        }
    }

    pub fn is_positive_resolution(&self) -> bool {
        self.strength_impact() > 0.0
    }

    pub fn causes_lasting_damage(&self) -> bool {
        matches!(
            self,
            ConflictResolution::EscalatedConflict | ConflictResolution::UnresolvedTension
        )
    }

    pub fn description(&self) -> &'static str {
        match self {
            ConflictResolution::PeacefulCompromise => "reached a peaceful compromise",
            ConflictResolution::MutualApology => "apologized to each other",
            ConflictResolution::MediatedAgreement => "agreed through a mediator",
            ConflictResolution::Avoidance => "avoided each other",
            ConflictResolution::DominanceAsserted => "one side asserted dominance",
            ConflictResolution::UnresolvedTension => "left the tension unresolved",
            ConflictResolution::EscalatedConflict => "let the conflict escalate",
        }
    }
}

impl fmt::Display for ConflictResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_matches_impact_sign() {
        for resolution in ConflictResolution::all() {
            assert_eq!(
                resolution.is_positive_resolution(),
                resolution.strength_impact() > 0.0
            );
        }
        assert!(ConflictResolution::MutualApology.is_positive_resolution());
        assert!(!ConflictResolution::Avoidance.is_positive_resolution());
    }

    #[test]
    fn test_lasting_damage() {
        assert!(ConflictResolution::EscalatedConflict.causes_lasting_damage());
        assert!(ConflictResolution::UnresolvedTension.causes_lasting_damage());
        assert!(!ConflictResolution::DominanceAsserted.causes_lasting_damage());
    }
}
