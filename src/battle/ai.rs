//! AI behaviors for computer-controlled sides.

use crate::battle::state::Battle;
use crate::creature::Creature;
use crate::moves::{Move, MoveEffect};
use ordered_float::OrderedFloat;
use schema::{CreatureType, Side, StatType, Target};

/// An action a side can take on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    UseMove { slot: usize },
    SwitchCreature { index: usize },
}

/// A trait for any system that can decide on a battle action.
pub trait Behavior {
    /// Inspects the battle and decides the next action for `side`, or `None`
    /// if the side has nothing it is allowed to do.
    fn decide_action(&self, side: Side, battle: &Battle) -> Option<PlayerAction>;
}

/// Scores every usable move and picks the best. Ties go to the lowest slot so
/// runs stay reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringAi;

impl ScoringAi {
    pub fn new() -> Self {
        Self
    }

    /// Best usable move slot for the active creature of `side`.
    pub fn choose_move_slot(&self, battle: &Battle, side: Side) -> Option<usize> {
        let attacker = battle.active(side).ok()?;
        let defender = battle.active(side.opponent()).ok()?;

        attacker
            .moves()
            .iter()
            .enumerate()
            .filter_map(|(slot, entry)| entry.as_ref().map(|move_| (slot, move_)))
            .filter(|(_, move_)| move_.has_uses())
            .map(|(slot, move_)| {
                let score = self.score_move(move_, attacker, defender, side, battle);
                (slot, score)
            })
            .rev()
            .max_by_key(|(_, score)| OrderedFloat(*score))
            .map(|(slot, _)| slot)
    }

    fn score_move(
        &self,
        move_: &Move,
        attacker: &Creature,
        defender: &Creature,
        side: Side,
        battle: &Battle,
    ) -> f64 {
        let stage_of = |side: Side, stat: StatType| {
            battle
                .active_overlay(side)
                .map(|overlay| overlay.stage(stat))
                .unwrap_or(0)
        };

        let score = match move_.effect() {
            MoveEffect::PhysicalDamage | MoveEffect::SpecialDamage => {
                let effectiveness =
                    CreatureType::effectiveness_of(move_.move_type(), defender.types());
                // An immune target makes this a wasted turn.
                if effectiveness == 0.0 {
                    return -1.0;
                }
                let stab = if attacker.types().contains(&move_.move_type()) {
                    1.5
                } else {
                    1.0
                };
                let (attack_stat, defense_stat) = match move_.effect() {
                    MoveEffect::SpecialDamage => (StatType::SpecialAttack, StatType::SpecialDefense),
                    _ => (StatType::Attack, StatType::Defense),
                };
                let ratio = match (
                    battle.active_overlay(side),
                    battle.active_overlay(side.opponent()),
                ) {
                    (Ok(own), Ok(other)) => {
                        own.effective_stat(attack_stat) as f64
                            / other.effective_stat(defense_stat).max(1) as f64
                    }
                    _ => 1.0,
                };
                move_.power().unwrap_or(0) as f64 * effectiveness * stab * ratio
            }
            MoveEffect::OneHitKnockout => {
                60.0 * defender.current_hp() as f64 / defender.max_hp().max(1) as f64
            }
            MoveEffect::Heal { .. } => {
                let missing = attacker.max_hp() - attacker.current_hp();
                if missing == 0 {
                    return -1.0;
                }
                80.0 * missing as f64 / attacker.max_hp() as f64
            }
            MoveEffect::StatModify {
                stat,
                delta,
                target: Target::User,
            } if delta > 0 => {
                let current = stage_of(side, stat);
                if current >= 6 {
                    return -1.0;
                }
                // Value diminishes as the stat rises.
                20.0 * delta as f64 * (1.0 - current as f64 / 6.0)
            }
            MoveEffect::StatModify {
                stat,
                delta,
                target: Target::Target,
            } if delta < 0 => {
                if stage_of(side.opponent(), stat) <= -6 {
                    return -1.0;
                }
                15.0 * delta.unsigned_abs() as f64
            }
            MoveEffect::StatModify { .. } => -1.0,
            MoveEffect::ForceSwitch => {
                if battle.roster(side.opponent()).len() > 1 {
                    10.0
                } else {
                    -1.0
                }
            }
        };

        // Give a slight edge to sure-hit moves.
        let accuracy = move_.accuracy().map(f64::from).unwrap_or(101.0);
        score * accuracy / 100.0
    }
}

impl Behavior for ScoringAi {
    fn decide_action(&self, side: Side, battle: &Battle) -> Option<PlayerAction> {
        if let Some(slot) = self.choose_move_slot(battle, side) {
            return Some(PlayerAction::UseMove { slot });
        }

        // Out of moves: switch to the healthiest bench member that still has one.
        let roster = battle.roster(side);
        roster
            .creatures()
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, creature)| !creature.is_fainted() && creature.has_usable_move())
            .rev()
            .max_by_key(|(_, creature)| creature.current_hp())
            .map(|(index, _)| PlayerAction::SwitchCreature { index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{TestCreatureBuilder, create_test_battle, tackle};
    use pretty_assertions::assert_eq;
    use schema::MoveCategory;

    fn damaging(name: &str, move_type: CreatureType, power: u16) -> Move {
        Move::new(
            name,
            move_type,
            MoveCategory::Physical,
            Some(power),
            Some(100),
            10,
            MoveEffect::PhysicalDamage,
        )
    }

    #[test]
    fn test_prefers_super_effective_move() {
        let battle = create_test_battle(
            vec![
                TestCreatureBuilder::new("Attacker")
                    .with_moves(vec![
                        damaging("Tackle", CreatureType::Normal, 40),
                        damaging("Water Gun", CreatureType::Water, 40),
                    ])
                    .build(),
            ],
            vec![
                TestCreatureBuilder::new("Defender")
                    .with_types(vec![CreatureType::Fire])
                    .build(),
            ],
        );

        assert_eq!(ScoringAi::new().choose_move_slot(&battle, Side::Team1), Some(1));
    }

    #[test]
    fn test_avoids_move_the_defender_is_immune_to() {
        let battle = create_test_battle(
            vec![
                TestCreatureBuilder::new("Attacker")
                    .with_moves(vec![
                        damaging("Hyper Beam", CreatureType::Normal, 150),
                        damaging("Lick", CreatureType::Ghost, 30),
                    ])
                    .build(),
            ],
            vec![
                TestCreatureBuilder::new("Spirit")
                    .with_types(vec![CreatureType::Ghost])
                    .build(),
            ],
        );

        assert_eq!(ScoringAi::new().choose_move_slot(&battle, Side::Team1), Some(1));
    }

    #[test]
    fn test_skips_exhausted_moves_and_switches_when_out() {
        let mut worn_out = tackle();
        while worn_out.use_move() {}
        let battle = create_test_battle(
            vec![
                TestCreatureBuilder::new("Tired")
                    .with_moves(vec![worn_out])
                    .build(),
                TestCreatureBuilder::new("Fresh").build(),
            ],
            vec![TestCreatureBuilder::new("Defender").build()],
        );
        let ai = ScoringAi::new();

        assert_eq!(ai.choose_move_slot(&battle, Side::Team1), None);
        assert_eq!(
            ai.decide_action(Side::Team1, &battle),
            Some(PlayerAction::SwitchCreature { index: 1 })
        );
    }
}
