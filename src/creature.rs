use crate::errors::ValidationError;
use crate::moves::Move;
use schema::{BaseStats, CreatureType};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of move slots on every creature.
pub const MOVE_SLOTS: usize = 4;

/// Identity of a creature instance. Two creatures built from the same catalog
/// entry are still different creatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatureId(Uuid);

impl CreatureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CreatureId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Creature {
    id: CreatureId,
    name: String,
    types: Vec<CreatureType>,
    base_stats: BaseStats,
    current_hp: u16,
    moves: [Option<Move>; MOVE_SLOTS],
}

impl Creature {
    /// Create a battle-ready creature at full health. Only the first four moves are kept.
    pub fn new(
        name: impl Into<String>,
        types: Vec<CreatureType>,
        base_stats: BaseStats,
        moves: Vec<Move>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if types.is_empty() || types.len() > 2 {
            return Err(ValidationError::InvalidCreature(format!(
                "{} must have one or two types",
                name
            )));
        }
        if !base_stats.is_valid() {
            return Err(ValidationError::InvalidCreature(format!(
                "{} has a non-positive base stat",
                name
            )));
        }

        let mut move_array = [const { None }; MOVE_SLOTS];
        for (i, move_) in moves.into_iter().take(MOVE_SLOTS).enumerate() {
            move_array[i] = Some(move_);
        }

        Ok(Self {
            id: CreatureId::new(),
            name,
            types,
            current_hp: base_stats.max_health,
            base_stats,
            moves: move_array,
        })
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[CreatureType] {
        &self.types
    }

    pub fn base_stats(&self) -> &BaseStats {
        &self.base_stats
    }

    pub fn max_hp(&self) -> u16 {
        self.base_stats.max_health
    }

    pub fn current_hp(&self) -> u16 {
        self.current_hp
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    /// Set current HP, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u16) {
        self.current_hp = hp.min(self.max_hp());
    }

    pub fn set_hp_to_max(&mut self) {
        self.current_hp = self.max_hp();
    }

    /// Apply damage and return how much HP was actually lost.
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.current_hp);
        self.current_hp -= dealt;
        dealt
    }

    /// Restore HP and return how much was actually recovered.
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.max_hp() - self.current_hp);
        self.current_hp += healed;
        healed
    }

    pub fn faint(&mut self) {
        self.current_hp = 0;
    }

    pub fn moves(&self) -> &[Option<Move>; MOVE_SLOTS] {
        &self.moves
    }

    pub fn move_at(&self, slot: usize) -> Option<&Move> {
        self.moves.get(slot).and_then(|slot| slot.as_ref())
    }

    pub fn move_at_mut(&mut self, slot: usize) -> Option<&mut Move> {
        self.moves.get_mut(slot).and_then(|slot| slot.as_mut())
    }

    /// Put a move into a slot (or clear it with `None`).
    pub fn set_move(&mut self, slot: usize, move_: Option<Move>) -> Result<(), ValidationError> {
        let entry = self
            .moves
            .get_mut(slot)
            .ok_or(ValidationError::InvalidMoveSlot(slot))?;
        *entry = move_;
        Ok(())
    }

    pub fn has_usable_move(&self) -> bool {
        self.moves.iter().flatten().any(Move::has_uses)
    }

    /// Full health and full uses on every move.
    pub fn restore_all(&mut self) {
        self.set_hp_to_max();
        for move_ in self.moves.iter_mut().flatten() {
            move_.restore_uses();
        }
    }
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{} HP)", self.name, self.current_hp, self.max_hp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveEffect;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use schema::MoveCategory;

    fn tackle() -> Move {
        Move::new(
            "Tackle",
            CreatureType::Normal,
            MoveCategory::Physical,
            Some(40),
            Some(100),
            35,
            MoveEffect::PhysicalDamage,
        )
    }

    fn test_creature(max_hp: u16) -> Creature {
        Creature::new(
            "Testmon",
            vec![CreatureType::Normal],
            BaseStats::new(max_hp, 50, 50, 50, 50, 50),
            vec![tackle()],
        )
        .unwrap()
    }

    #[test]
    fn test_new_creature_starts_at_full_health() {
        let creature = test_creature(120);
        assert_eq!(creature.current_hp(), 120);
        assert!(!creature.is_fainted());
        assert!(creature.move_at(0).is_some());
        assert!(creature.move_at(1).is_none());
    }

    #[test]
    fn test_extra_moves_are_dropped() {
        let creature = Creature::new(
            "Testmon",
            vec![CreatureType::Normal],
            BaseStats::new(100, 50, 50, 50, 50, 50),
            vec![tackle(), tackle(), tackle(), tackle(), tackle()],
        )
        .unwrap();
        assert_eq!(creature.moves().iter().flatten().count(), 4);
    }

    #[test]
    fn test_invalid_definitions_are_rejected() {
        let no_types = Creature::new("Empty", vec![], BaseStats::new(1, 1, 1, 1, 1, 1), vec![]);
        assert!(matches!(no_types, Err(ValidationError::InvalidCreature(_))));

        let zero_attack = Creature::new(
            "Weak",
            vec![CreatureType::Bug],
            BaseStats::new(10, 0, 1, 1, 1, 1),
            vec![],
        );
        assert!(matches!(zero_attack, Err(ValidationError::InvalidCreature(_))));
    }

    #[test]
    fn test_damage_and_heal_report_actual_change() {
        let mut creature = test_creature(100);
        assert_eq!(creature.take_damage(30), 30);
        assert_eq!(creature.heal(50), 30);
        assert_eq!(creature.take_damage(500), 100);
        assert!(creature.is_fainted());
    }

    #[test]
    fn test_each_creature_has_its_own_identity() {
        let first = test_creature(100);
        let second = test_creature(100);
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn test_restore_all_refills_health_and_uses() {
        let mut creature = test_creature(100);
        creature.take_damage(60);
        creature.move_at_mut(0).unwrap().use_move();
        creature.restore_all();
        assert_eq!(creature.current_hp(), 100);
        assert_eq!(creature.move_at(0).unwrap().remaining_uses(), 35);
    }

    #[test]
    fn test_set_move_rejects_out_of_range_slot() {
        let mut creature = test_creature(100);
        assert_eq!(
            creature.set_move(4, Some(tackle())),
            Err(ValidationError::InvalidMoveSlot(4))
        );
        creature.set_move(0, None).unwrap();
        assert!(!creature.has_usable_move());
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_bounds(
            max_hp in 1u16..500,
            changes in proptest::collection::vec((any::<bool>(), 0u16..1000), 0..40),
        ) {
            let mut creature = test_creature(max_hp);
            for (is_damage, amount) in changes {
                if is_damage {
                    creature.take_damage(amount);
                } else {
                    creature.heal(amount);
                }
                prop_assert!(creature.current_hp() <= creature.max_hp());
            }
        }
    }
}
