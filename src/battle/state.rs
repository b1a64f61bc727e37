use crate::battle::stats::StatOverlay;
use crate::creature::{Creature, CreatureId};
use crate::errors::{InvariantViolation, ValidationError};
use crate::roster::Roster;
use schema::{Side, StatType};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// How a fainted active creature is replaced.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplacementPolicy {
    /// The first living member in roster order.
    #[default]
    NextLiving,
    /// A uniformly random living member.
    Random,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleOutcome {
    Winner(Side),
    Draw,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleStatus {
    Ongoing,
    Ended(BattleOutcome),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    BattleStarted {
        team1: String,
        team2: String,
    },
    MoveUsed {
        side: Side,
        creature: String,
        move_name: String,
    },
    MoveMissed {
        attacker: String,
        defender: String,
        move_name: String,
    },
    AttackTypeEffectiveness {
        multiplier: f64,
    },
    DamageDealt {
        target: String,
        damage: u16,
        remaining_hp: u16,
    },
    CreatureHealed {
        target: String,
        amount: u16,
        new_hp: u16,
    },
    StatStageChanged {
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StatType,
        rising: bool,
    },
    CreatureSwitched {
        side: Side,
        old_creature: String,
        new_creature: String,
    },
    CreatureDraggedOut {
        side: Side,
        old_creature: String,
        new_creature: String,
    },
    CreatureFainted {
        side: Side,
        creature: String,
    },
    ReplacementSentOut {
        side: Side,
        creature: String,
    },
    TurnPassed {
        next: Side,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
}

impl BattleEvent {
    /// The message line for this event, or `None` for events that stay silent.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::BattleStarted { team1, team2 } => {
                Some(format!("{} and {} begin the battle!", team1, team2))
            }
            BattleEvent::MoveUsed {
                creature,
                move_name,
                ..
            } => Some(format!("{} used {}!", creature, move_name)),
            BattleEvent::MoveMissed { attacker, .. } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::AttackTypeEffectiveness { multiplier } => match *multiplier {
                m if m == 0.0 => Some("It had no effect!".to_string()),
                m if m > 1.0 => Some("It's super effective!".to_string()),
                m if m < 1.0 => Some("It's not very effective...".to_string()),
                _ => None, // Normal effectiveness, no message
            },
            BattleEvent::DamageDealt { target, damage, .. } => {
                Some(format!("{} took {} damage!", target, damage))
            }
            BattleEvent::CreatureHealed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                let verb = if new_stage > old_stage { "rose" } else { "fell" };
                let amount = (new_stage - old_stage).abs();
                if amount > 1 {
                    Some(format!("{}'s {} sharply {}!", target, stat, verb))
                } else {
                    Some(format!("{}'s {} {}!", target, stat, verb))
                }
            }
            BattleEvent::StatChangeBlocked {
                target,
                stat,
                rising,
            } => {
                let direction = if *rising { "higher" } else { "lower" };
                Some(format!("{}'s {} won't go any {}!", target, stat, direction))
            }
            BattleEvent::CreatureSwitched {
                old_creature,
                new_creature,
                ..
            } => Some(format!(
                "{} was withdrawn and {} was sent out!",
                old_creature, new_creature
            )),
            BattleEvent::CreatureDraggedOut {
                old_creature,
                new_creature,
                ..
            } => {
                if old_creature == new_creature {
                    Some("But it failed!".to_string())
                } else {
                    Some(format!(
                        "{} was blown away and {} was dragged out!",
                        old_creature, new_creature
                    ))
                }
            }
            BattleEvent::CreatureFainted { creature, .. } => {
                Some(format!("{} fainted!", creature))
            }
            BattleEvent::ReplacementSentOut { creature, .. } => {
                Some(format!("{} was sent out!", creature))
            }
            BattleEvent::TurnPassed { .. } => None,
            BattleEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::Winner(side) => Some(format!("{} wins the battle!", side)),
                BattleOutcome::Draw => Some("The battle ended in a draw!".to_string()),
            },
        }
    }
}

/// Ordered log of everything that happened in a battle.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::debug!(?event, "battle event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Message lines for every event from `start` onwards.
    pub fn messages_since(&self, start: usize) -> Vec<String> {
        self.events
            .iter()
            .skip(start)
            .filter_map(BattleEvent::format)
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages_since(0)
    }
}

impl fmt::Display for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            match event.format() {
                Some(formatted) => writeln!(f, "{}", formatted)?,
                None => writeln!(f, "{:?}", event)?,
            }
        }
        Ok(())
    }
}

/// The aggregate root of a single battle. Only the use cases in
/// `battle::use_cases` mutate it.
#[derive(Debug, Clone)]
pub struct Battle {
    rosters: [Roster; 2],
    overlays: HashMap<CreatureId, StatOverlay>,
    turn: Side,
    status: BattleStatus,
    turn_number: u32,
    replacement_policy: ReplacementPolicy,
    event_bus: EventBus,
}

impl Battle {
    /// Validate both rosters and build a battle with Team 1 to move.
    pub fn new(
        team1: Roster,
        team2: Roster,
        replacement_policy: ReplacementPolicy,
    ) -> Result<Self, ValidationError> {
        for (side, roster) in [(Side::Team1, &team1), (Side::Team2, &team2)] {
            if roster.is_empty() {
                return Err(ValidationError::EmptyRoster(side));
            }
            if !roster.has_living() {
                return Err(ValidationError::NoLivingCreature(side));
            }
        }

        let mut seen = HashSet::new();
        for creature in team1.iter().chain(team2.iter()) {
            if !seen.insert(creature.id()) {
                return Err(ValidationError::DuplicateCreature(
                    creature.name().to_string(),
                ));
            }
        }

        let overlays = team1
            .iter()
            .chain(team2.iter())
            .map(|creature| (creature.id(), StatOverlay::new(*creature.base_stats())))
            .collect();

        let mut battle = Self {
            rosters: [team1, team2],
            overlays,
            turn: Side::Team1,
            status: BattleStatus::Ongoing,
            turn_number: 1,
            replacement_policy,
            event_bus: EventBus::new(),
        };

        // A fainted creature may sit at position 0 of an otherwise healthy roster.
        for side in [Side::Team1, Side::Team2] {
            if battle.roster(side).active().is_some_and(Creature::is_fainted) {
                if let Some(index) = battle.roster(side).next_living_index() {
                    battle.roster_mut(side).switch_active(index)?;
                }
            }
        }

        Ok(battle)
    }

    pub fn with_replacement_policy(mut self, replacement_policy: ReplacementPolicy) -> Self {
        self.replacement_policy = replacement_policy;
        self
    }

    pub(crate) fn set_turn(&mut self, side: Side) {
        self.turn = side;
    }

    pub(crate) fn set_turn_number(&mut self, turn_number: u32) {
        self.turn_number = turn_number.max(1);
    }

    pub fn roster(&self, side: Side) -> &Roster {
        &self.rosters[side.to_index()]
    }

    pub(crate) fn roster_mut(&mut self, side: Side) -> &mut Roster {
        &mut self.rosters[side.to_index()]
    }

    pub fn team1(&self) -> &Roster {
        self.roster(Side::Team1)
    }

    pub fn team2(&self) -> &Roster {
        self.roster(Side::Team2)
    }

    /// The side whose action comes next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        match self.status {
            BattleStatus::Ongoing => None,
            BattleStatus::Ended(outcome) => Some(outcome),
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, BattleStatus::Ended(_))
    }

    pub fn replacement_policy(&self) -> ReplacementPolicy {
        self.replacement_policy
    }

    pub fn events(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) fn event_bus_mut(&mut self) -> &mut EventBus {
        &mut self.event_bus
    }

    pub fn active(&self, side: Side) -> Result<&Creature, InvariantViolation> {
        self.roster(side)
            .active()
            .ok_or(InvariantViolation::MissingActiveCreature(side))
    }

    pub(crate) fn active_mut(&mut self, side: Side) -> Result<&mut Creature, InvariantViolation> {
        self.roster_mut(side)
            .active_mut()
            .ok_or(InvariantViolation::MissingActiveCreature(side))
    }

    pub fn overlay(&self, id: CreatureId) -> Option<&StatOverlay> {
        self.overlays.get(&id)
    }

    pub(crate) fn overlay_mut(&mut self, id: CreatureId) -> Option<&mut StatOverlay> {
        self.overlays.get_mut(&id)
    }

    /// The stat overlay of a side's active creature.
    pub fn active_overlay(&self, side: Side) -> Result<&StatOverlay, InvariantViolation> {
        let creature = self.active(side)?;
        self.overlay(creature.id())
            .ok_or_else(|| InvariantViolation::MissingOverlay(creature.name().to_string()))
    }

    pub(crate) fn pass_turn(&mut self) {
        self.turn = self.turn.opponent();
        if self.turn == Side::Team1 {
            self.turn_number += 1;
        }
        let next = self.turn;
        self.event_bus.push(BattleEvent::TurnPassed { next });
    }

    pub(crate) fn end(&mut self, outcome: BattleOutcome) {
        self.status = BattleStatus::Ended(outcome);
        self.event_bus.push(BattleEvent::BattleEnded { outcome });
    }

    /// Scan both rosters. A side with no living creature loses; if neither
    /// side has one the result is a draw.
    pub fn scan_for_outcome(&self) -> Option<BattleOutcome> {
        let team1_alive = self.team1().has_living();
        let team2_alive = self.team2().has_living();
        match (team1_alive, team2_alive) {
            (true, true) => None,
            (true, false) => Some(BattleOutcome::Winner(Side::Team1)),
            (false, true) => Some(BattleOutcome::Winner(Side::Team2)),
            (false, false) => Some(BattleOutcome::Draw),
        }
    }

    /// Give both rosters back, discarding the per-battle overlays.
    pub fn into_rosters(self) -> (Roster, Roster) {
        let [team1, team2] = self.rosters;
        (team1, team2)
    }
}
