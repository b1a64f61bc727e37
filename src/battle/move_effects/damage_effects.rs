use super::EffectContext;
use crate::battle::calculators::calculate_damage;
use crate::battle::commands::BattleCommand;
use crate::battle::state::{Battle, BattleEvent};
use crate::errors::InvariantViolation;
use schema::StatType;

/// Standard damage: the attacker's `attack_stat` against the defender's
/// `defense_stat`, both with stages applied, then type effectiveness.
pub(super) fn apply_damage_effect(
    attack_stat: StatType,
    defense_stat: StatType,
    context: &EffectContext,
    battle: &Battle,
) -> Result<Vec<BattleCommand>, InvariantViolation> {
    let mut commands = Vec::new();
    let Some(power) = context.move_used.power() else {
        return Ok(commands);
    };

    let attack = battle
        .active_overlay(context.attacker)?
        .effective_stat(attack_stat);
    let defense = battle
        .active_overlay(context.defender)?
        .effective_stat(defense_stat);
    let defender = battle.active(context.defender)?;

    let (damage, multiplier) = calculate_damage(
        power,
        attack,
        defense,
        context.move_used.move_type(),
        defender.types(),
    );
    tracing::debug!(
        move_name = context.move_used.name(),
        power,
        attack,
        defense,
        multiplier,
        damage,
        "damage calculated"
    );

    if multiplier != 1.0 {
        commands.push(BattleCommand::EmitEvent(
            BattleEvent::AttackTypeEffectiveness { multiplier },
        ));
    }
    if damage > 0 {
        commands.push(BattleCommand::DealDamage {
            target: context.defender,
            amount: damage,
        });
    }
    Ok(commands)
}

/// Deals the defender's maximum HP regardless of stats.
pub(super) fn apply_one_hit_knockout_effect(
    context: &EffectContext,
    battle: &Battle,
) -> Result<Vec<BattleCommand>, InvariantViolation> {
    let defender = battle.active(context.defender)?;
    Ok(vec![BattleCommand::DealDamage {
        target: context.defender,
        amount: defender.max_hp(),
    }])
}
