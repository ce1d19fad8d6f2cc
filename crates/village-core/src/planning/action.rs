//! Actions
//!
//! Units of behaviour with preconditions, promised effects and a
//! personality-scaled cost. Actions are stateless; everything they touch
//! arrives through [`ActionContext`].

use rand::rngs::SmallRng;
use rand::Rng;

use super::keys;
use super::world_state::WorldState;
use crate::components::{ActionCategory, Emotion, PersonalityProfile, Villager, VillagerId};
use crate::dialogue::{DialogueOutbox, DialogueRequest};
use crate::error::ActionError;
use crate::social::{GossipKind, InteractionQueue, PendingGossip, PendingInteraction, Rumour};
use village_events::TimeOfDay;

/// Another villager within reach of the acting one.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbour {
    pub id: VillagerId,
    pub name: String,
}

/// Everything an action may touch while executing.
pub struct ActionContext<'a> {
    pub villager: &'a mut Villager,
    pub nearby: &'a [Neighbour],
    pub rng: &'a mut SmallRng,
    pub outbox: &'a mut DialogueOutbox,
    pub interactions: &'a mut InteractionQueue,
    pub tick: u64,
}

impl ActionContext<'_> {
    /// Picks a random nearby villager.
    pub fn pick_neighbour(&mut self) -> Option<Neighbour> {
        if self.nearby.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.nearby.len());
        Some(self.nearby[index].clone())
    }

    fn interact_with(&mut self, partner: &Neighbour, experience_type: &str, impact: f32) {
        self.interactions.push(PendingInteraction {
            initiator: self.villager.id,
            partner: partner.id,
            experience_type: experience_type.to_string(),
            emotional_impact: impact,
        });
    }

    fn request_dialogue(&mut self, partner: Option<VillagerId>, topic: &str) {
        self.outbox.push(DialogueRequest {
            villager: self.villager.id,
            partner,
            topic: topic.to_string(),
            tick: self.tick,
        });
    }
}

pub trait Action: Send + Sync {
    fn name(&self) -> &str;

    fn base_cost(&self) -> f32;

    fn category(&self) -> ActionCategory;

    /// Facts that must hold before the action can run.
    fn preconditions(&self) -> WorldState {
        WorldState::new()
    }

    fn can_perform(&self, state: &WorldState) -> bool {
        let preconditions = self.preconditions();
        preconditions.is_empty() || state.satisfies(&preconditions)
    }

    /// Base cost scaled by the villager's temperament.
    fn get_cost(&self, _state: &WorldState, personality: &PersonalityProfile) -> f32 {
        (self.base_cost() * personality.action_cost_modifier(self.category())).max(0.0)
    }

    /// Facts the action promises to make true.
    fn get_effects(&self, state: &WorldState) -> WorldState;

    /// Runs the action. On success `state` carries the declared effects.
    fn execute(&self, state: &mut WorldState, ctx: &mut ActionContext<'_>) -> Result<(), ActionError>;
}

/// Chat with a random neighbour.
pub struct SocializeAction;

impl Action for SocializeAction {
    fn name(&self) -> &str {
        "socialize"
    }

    fn base_cost(&self) -> f32 {
        5.0
    }

    fn category(&self) -> ActionCategory {
        ActionCategory::Social
    }

    fn preconditions(&self) -> WorldState {
        WorldState::new().with_bool(keys::VILLAGERS_NEARBY, true)
    }

    fn get_effects(&self, _state: &WorldState) -> WorldState {
        WorldState::new()
            .with_bool(keys::HAS_SOCIALIZED, true)
            .with_bool(keys::HAS_SOCIALIZED_TODAY, true)
    }

    fn execute(&self, state: &mut WorldState, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
        let partner = ctx.pick_neighbour().ok_or(ActionError::NoNearbyVillagers)?;

        let brain = &mut ctx.villager.brain;
        brain.emotions.adjust(Emotion::Happiness, 10.0);
        brain.emotions.adjust(Emotion::Loneliness, -15.0);
        brain.mood.adjust_social(0.1);
        brain.daily.has_socialized_today = true;

        ctx.interact_with(&partner, "socializing", 0.3);
        ctx.request_dialogue(Some(partner.id), "small_talk");
        state.apply_effects(&self.get_effects(state));
        Ok(())
    }
}

/// Chance that a shift of work turns tedious
pub const WORK_BOREDOM_CHANCE: f32 = 0.2;

/// Put in a shift at the villager's profession.
pub struct WorkAction;

impl Action for WorkAction {
    fn name(&self) -> &str {
        "work"
    }

    fn base_cost(&self) -> f32 {
        8.0
    }

    fn category(&self) -> ActionCategory {
        ActionCategory::Work
    }

    fn can_perform(&self, state: &WorldState) -> bool {
        TimeOfDay::from_code(state.get_int(keys::TIME_OF_DAY))
            .is_some_and(TimeOfDay::is_working_hours)
    }

    fn get_effects(&self, _state: &WorldState) -> WorldState {
        WorldState::new()
            .with_bool(keys::HAS_WORKED, true)
            .with_bool(keys::HAS_WORKED_TODAY, true)
    }

    fn execute(&self, state: &mut WorldState, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
        let bored = ctx.rng.gen::<f32>() < WORK_BOREDOM_CHANCE;

        let brain = &mut ctx.villager.brain;
        brain.emotions.adjust(Emotion::Contentment, 8.0);
        if bored {
            brain.emotions.adjust(Emotion::Boredom, 10.0);
        }
        brain.mood.adjust_energy(-0.05);
        brain.daily.has_worked_today = true;

        state.apply_effects(&self.get_effects(state));
        Ok(())
    }
}

/// Swap news with a neighbour.
///
/// The villager starts a rumour about whoever it feels most strongly about,
/// then passes its freshest story on. The exchange itself is applied with
/// the other queued interactions.
pub struct GossipAction;

impl GossipAction {
    /// A rumour about the villager's strongest bond, leaving `partner` out.
    pub fn rumour_for(villager: &Villager, partner: VillagerId) -> Option<Rumour> {
        let bond = villager
            .brain
            .relationships
            .bonds()
            .filter(|b| b.other_id() != partner && b.strength() != 0.0)
            .max_by(|a, b| a.strength().abs().total_cmp(&b.strength().abs()))?;
        let (kind, verb) = if bond.is_positive_bond() {
            (GossipKind::PositiveInteraction, "speaks well of")
        } else {
            (GossipKind::NegativeInteraction, "complains about")
        };
        Some(Rumour {
            about: bond.other_id(),
            kind,
            content: format!("{} {} {}", villager.name, verb, bond.other_name()),
        })
    }
}

impl Action for GossipAction {
    fn name(&self) -> &str {
        "gossip"
    }

    fn base_cost(&self) -> f32 {
        3.0
    }

    fn category(&self) -> ActionCategory {
        ActionCategory::Gossip
    }

    fn preconditions(&self) -> WorldState {
        WorldState::new().with_bool(keys::VILLAGERS_NEARBY, true)
    }

    fn get_effects(&self, _state: &WorldState) -> WorldState {
        WorldState::new()
            .with_bool(keys::KNOWS_LATEST_GOSSIP, true)
            .with_bool(keys::HAS_SOCIALIZED, true)
    }

    fn execute(&self, state: &mut WorldState, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
        let partner = ctx.pick_neighbour().ok_or(ActionError::NoNearbyVillagers)?;

        ctx.villager.brain.emotions.adjust(Emotion::Curiosity, 10.0);
        let rumour = Self::rumour_for(ctx.villager, partner.id);
        ctx.interactions.push_gossip(PendingGossip {
            teller: ctx.villager.id,
            listener: partner.id,
            rumour,
        });
        ctx.interact_with(&partner, "gossip", 0.1);
        ctx.request_dialogue(Some(partner.id), "gossip");
        state.apply_effects(&self.get_effects(state));
        Ok(())
    }
}

/// Take a break at home.
pub struct RestAction;

impl Action for RestAction {
    fn name(&self) -> &str {
        "rest"
    }

    fn base_cost(&self) -> f32 {
        2.0
    }

    fn category(&self) -> ActionCategory {
        ActionCategory::Rest
    }

    fn get_effects(&self, _state: &WorldState) -> WorldState {
        WorldState::new().with_bool(keys::IS_RESTED, true)
    }

    fn execute(&self, state: &mut WorldState, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
        let brain = &mut ctx.villager.brain;
        brain.mood.adjust_energy(0.2);
        brain.emotions.adjust(Emotion::Boredom, -5.0);
        state.apply_effects(&self.get_effects(state));
        Ok(())
    }
}

/// Spend time with a neighbour to lift the villager's spirits.
pub struct SeekCompanyAction;

impl Action for SeekCompanyAction {
    fn name(&self) -> &str {
        "seek_company"
    }

    fn base_cost(&self) -> f32 {
        6.0
    }

    fn category(&self) -> ActionCategory {
        ActionCategory::Social
    }

    fn preconditions(&self) -> WorldState {
        WorldState::new().with_bool(keys::VILLAGERS_NEARBY, true)
    }

    fn get_effects(&self, _state: &WorldState) -> WorldState {
        WorldState::new()
            .with_bool(keys::IS_HAPPY, true)
            .with_bool(keys::HAS_SOCIALIZED, true)
    }

    fn execute(&self, state: &mut WorldState, ctx: &mut ActionContext<'_>) -> Result<(), ActionError> {
        let partner = ctx.pick_neighbour().ok_or(ActionError::NoNearbyVillagers)?;

        let brain = &mut ctx.villager.brain;
        brain.emotions.adjust(Emotion::Happiness, 15.0);
        brain.emotions.adjust(Emotion::Loneliness, -10.0);
        brain.mood.adjust_happiness(0.1);
        brain.daily.has_socialized_today = true;

        ctx.interact_with(&partner, "shared_meal", 0.4);
        ctx.request_dialogue(Some(partner.id), "company");
        state.apply_effects(&self.get_effects(state));
        Ok(())
    }
}

/// The standard action catalog.
pub fn standard_actions() -> Vec<Box<dyn Action>> {
    vec![
        Box::new(SocializeAction),
        Box::new(WorkAction),
        Box::new(GossipAction),
        Box::new(RestAction),
        Box::new(SeekCompanyAction),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PersonalityType;
    use crate::social::BondType;
    use rand::SeedableRng;

    struct Harness {
        villager: Villager,
        nearby: Vec<Neighbour>,
        rng: SmallRng,
        outbox: DialogueOutbox,
        interactions: InteractionQueue,
    }

    impl Harness {
        fn new(neighbours: usize) -> Self {
            Self {
                villager: Villager::new("Ada"),
                nearby: (0..neighbours)
                    .map(|i| Neighbour {
                        id: VillagerId::new(),
                        name: format!("N{}", i),
                    })
                    .collect(),
                rng: SmallRng::seed_from_u64(7),
                outbox: DialogueOutbox::new(),
                interactions: InteractionQueue::default(),
            }
        }

        fn run(&mut self, action: &dyn Action, state: &mut WorldState) -> Result<(), ActionError> {
            let mut ctx = ActionContext {
                villager: &mut self.villager,
                nearby: &self.nearby,
                rng: &mut self.rng,
                outbox: &mut self.outbox,
                interactions: &mut self.interactions,
                tick: 100,
            };
            action.execute(state, &mut ctx)
        }
    }

    #[test]
    fn test_socialize_fails_without_neighbours() {
        let mut harness = Harness::new(0);
        let mut state = WorldState::new().with_bool(keys::VILLAGERS_NEARBY, true);
        let before = harness.villager.brain.clone();

        let result = harness.run(&SocializeAction, &mut state);
        assert_eq!(result, Err(ActionError::NoNearbyVillagers));
        assert!(!state.get_bool(keys::HAS_SOCIALIZED));
        assert_eq!(harness.villager.brain, before);
        assert!(harness.outbox.is_empty());
    }

    #[test]
    fn test_socialize_applies_effects() {
        let mut harness = Harness::new(2);
        let mut state = WorldState::new().with_bool(keys::VILLAGERS_NEARBY, true);

        harness.run(&SocializeAction, &mut state).unwrap();
        assert!(state.get_bool(keys::HAS_SOCIALIZED));
        assert!(state.get_bool(keys::HAS_SOCIALIZED_TODAY));
        let emotions = &harness.villager.brain.emotions;
        assert!((emotions.get(Emotion::Happiness) - 60.0).abs() < 0.001);
        assert!((emotions.get(Emotion::Loneliness) - 5.0).abs() < 0.001);
        assert!(harness.villager.brain.daily.has_socialized_today);
        assert_eq!(harness.interactions.len(), 1);
        assert_eq!(harness.outbox.len(), 1);
    }

    #[test]
    fn test_preconditions() {
        let empty = WorldState::new();
        let crowd = WorldState::new().with_bool(keys::VILLAGERS_NEARBY, true);
        assert!(!SocializeAction.can_perform(&empty));
        assert!(SocializeAction.can_perform(&crowd));
        assert!(!GossipAction.can_perform(&empty));
        assert!(RestAction.can_perform(&empty));

        let afternoon = WorldState::new().with_int(keys::TIME_OF_DAY, TimeOfDay::Afternoon.code());
        let dusk = WorldState::new().with_int(keys::TIME_OF_DAY, TimeOfDay::Dusk.code());
        assert!(WorkAction.can_perform(&afternoon));
        assert!(!WorkAction.can_perform(&dusk));
    }

    #[test]
    fn test_costs_scale_with_personality() {
        let state = WorldState::new();
        let shy = PersonalityProfile::new(PersonalityType::Shy);
        let friendly = PersonalityProfile::new(PersonalityType::Friendly);
        assert!((SocializeAction.get_cost(&state, &shy) - 10.0).abs() < 0.001);
        assert!((SocializeAction.get_cost(&state, &friendly) - 2.5).abs() < 0.001);
        assert!((GossipAction.get_cost(&state, &shy) - 7.5).abs() < 0.001);
        assert!(
            (WorkAction.get_cost(&state, &PersonalityProfile::new(PersonalityType::Energetic))
                - 5.6)
                .abs()
                < 0.001
        );
    }

    #[test]
    fn test_work_execution() {
        let mut harness = Harness::new(0);
        let mut state = WorldState::new();
        harness.run(&WorkAction, &mut state).unwrap();

        assert!(state.get_bool(keys::HAS_WORKED));
        assert!(state.get_bool(keys::HAS_WORKED_TODAY));
        assert!(harness.villager.brain.daily.has_worked_today);
        assert!((harness.villager.brain.emotions.get(Emotion::Contentment) - 58.0).abs() < 0.001);
    }

    #[test]
    fn test_gossip_execution() {
        let mut harness = Harness::new(1);
        let mut state = WorldState::new();
        harness.run(&GossipAction, &mut state).unwrap();
        assert!(state.get_bool(keys::KNOWS_LATEST_GOSSIP));
        assert!((harness.villager.brain.emotions.get(Emotion::Curiosity) - 40.0).abs() < 0.001);

        let queued = harness.interactions.drain_gossip();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].teller, harness.villager.id);
        assert_eq!(queued[0].listener, harness.nearby[0].id);
        // no bonds yet, so nothing new to tell
        assert!(queued[0].rumour.is_none());
    }

    #[test]
    fn test_rumour_about_strongest_bond() {
        let mut ada = Villager::new("Ada");
        let (bram, cora, dell) = (VillagerId::new(), VillagerId::new(), VillagerId::new());
        let relationships = &mut ada.brain.relationships;
        relationships.create_social_bond(bram, "Bram", BondType::Friend, 0.9, 0, "");
        relationships.create_social_bond(cora, "Cora", BondType::Rival, -0.6, 0, "");
        relationships.create_social_bond(dell, "Dell", BondType::Acquaintance, 0.1, 0, "");

        let rumour = GossipAction::rumour_for(&ada, dell).unwrap();
        assert_eq!(rumour.about, bram);
        assert_eq!(rumour.kind, GossipKind::PositiveInteraction);
        assert_eq!(rumour.content, "Ada speaks well of Bram");

        // Bram is the listener, so the rival is next in line
        let rumour = GossipAction::rumour_for(&ada, bram).unwrap();
        assert_eq!(rumour.about, cora);
        assert_eq!(rumour.kind, GossipKind::NegativeInteraction);
    }

    #[test]
    fn test_rest_execution() {
        let mut harness = Harness::new(0);
        let mut state = WorldState::new();
        harness.run(&RestAction, &mut state).unwrap();
        assert!(state.get_bool(keys::IS_RESTED));
        assert!((harness.villager.brain.mood.energy() - 0.7).abs() < 0.001);
    }
}
