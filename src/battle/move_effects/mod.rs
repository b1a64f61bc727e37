// --- HELPER MODULES ---
mod damage_effects;
mod special_effects;
mod stat_effects;

// --- IMPORTS ---
use crate::battle::commands::BattleCommand;
use crate::battle::rng::TurnRng;
use crate::battle::state::Battle;
use crate::errors::InvariantViolation;
use crate::moves::{Move, MoveEffect};
use schema::{Side, StatType, Target};
use self::{damage_effects::*, special_effects::*, stat_effects::*};

// --- CONTEXT ---
#[derive(Debug, Clone)]
pub struct EffectContext {
    pub attacker: Side,
    pub defender: Side,
    pub move_used: Move,
}

impl EffectContext {
    pub fn new(attacker: Side, move_used: Move) -> Self {
        Self {
            attacker,
            defender: attacker.opponent(),
            move_used,
        }
    }

    pub fn target_side(&self, target: Target) -> Side {
        match target {
            Target::User => self.attacker,
            Target::Target => self.defender,
        }
    }
}

// --- DISPATCH ---

/// Turns a connected move into the commands that carry out its effect.
/// Implementations only read the battle; the executor applies the result.
pub trait BattleMoveEffectExt {
    fn apply(
        &self,
        context: &EffectContext,
        battle: &Battle,
        rng: &mut TurnRng,
    ) -> Result<Vec<BattleCommand>, InvariantViolation>;
}

impl BattleMoveEffectExt for MoveEffect {
    fn apply(
        &self,
        context: &EffectContext,
        battle: &Battle,
        rng: &mut TurnRng,
    ) -> Result<Vec<BattleCommand>, InvariantViolation> {
        match *self {
            MoveEffect::PhysicalDamage => {
                apply_damage_effect(StatType::Attack, StatType::Defense, context, battle)
            }
            MoveEffect::SpecialDamage => apply_damage_effect(
                StatType::SpecialAttack,
                StatType::SpecialDefense,
                context,
                battle,
            ),
            MoveEffect::OneHitKnockout => apply_one_hit_knockout_effect(context, battle),
            MoveEffect::Heal {
                numerator,
                denominator,
            } => apply_heal_effect(numerator, denominator, context, battle),
            MoveEffect::StatModify {
                stat,
                delta,
                target,
            } => Ok(apply_stat_modify_effect(stat, delta, target, context)),
            MoveEffect::ForceSwitch => apply_force_switch_effect(context, battle, rng),
        }
    }
}
