//! Fact names shared by the world-state builder, goals and actions.

pub const AGE: &str = "age";
pub const HAPPINESS: &str = "happiness";
pub const LONELINESS: &str = "loneliness";
pub const CURIOSITY: &str = "curiosity";
pub const LOVE: &str = "love";
pub const BOREDOM: &str = "boredom";
pub const TIME_OF_DAY: &str = "time_of_day";
pub const HAS_SPOUSE: &str = "has_spouse";
pub const VILLAGERS_NEARBY: &str = "villagers_nearby";
pub const HAS_WORKED_TODAY: &str = "has_worked_today";
pub const HAS_SOCIALIZED_TODAY: &str = "has_socialized_today";

// Outcome facts that goals ask for and actions promise
pub const IS_HAPPY: &str = "is_happy";
pub const HAS_SOCIALIZED: &str = "has_socialized";
pub const HAS_WORKED: &str = "has_worked";
pub const KNOWS_LATEST_GOSSIP: &str = "knows_latest_gossip";
pub const IS_RESTED: &str = "is_rested";
