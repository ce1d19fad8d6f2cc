//! Social model: bonds, shared memories, gossip, roles and conflict outcomes.

pub mod bond;
pub mod conflict;
pub mod gossip;
pub mod ledger;
pub mod memory;
pub mod relationship;
pub mod role;

pub use bond::{BondType, SocialBond};
pub use conflict::ConflictResolution;
pub use gossip::{GossipKind, GossipMessage, GossipNetwork, Rumour};
pub use ledger::{
    marry, record_interaction, resolve_conflict_between, InteractionQueue, PairOutcome,
    PendingGossip, PendingInteraction,
};
pub use memory::SocialMemory;
pub use relationship::RelationshipData;
pub use role::SocialRole;
