use super::EffectContext;
use crate::battle::calculators::heal_amount;
use crate::battle::commands::BattleCommand;
use crate::battle::rng::TurnRng;
use crate::battle::state::Battle;
use crate::errors::InvariantViolation;

/// Heal the user by a fraction of its max HP, rounded up.
pub(super) fn apply_heal_effect(
    numerator: u16,
    denominator: u16,
    context: &EffectContext,
    battle: &Battle,
) -> Result<Vec<BattleCommand>, InvariantViolation> {
    let user = battle.active(context.attacker)?;
    Ok(vec![BattleCommand::HealCreature {
        target: context.attacker,
        amount: heal_amount(user.max_hp(), numerator, denominator),
    }])
}

/// Drag a uniformly random other member of the opposing roster into the
/// active slot. Fainted members are eligible; a lone member reselects itself.
pub(super) fn apply_force_switch_effect(
    context: &EffectContext,
    battle: &Battle,
    rng: &mut TurnRng,
) -> Result<Vec<BattleCommand>, InvariantViolation> {
    let roster = battle.roster(context.defender);
    let others = roster.len().saturating_sub(1);

    let index = if others == 0 {
        0
    } else {
        1 + rng.pick_index("Force Switch Target", others)
    };

    Ok(vec![BattleCommand::ForceSwitch {
        target: context.defender,
        index,
    }])
}
