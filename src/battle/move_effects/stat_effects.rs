use super::EffectContext;
use crate::battle::commands::BattleCommand;
use schema::{StatType, Target};

/// Shift one stat stage on the user or the target. Clamping happens when the
/// command is executed.
pub(super) fn apply_stat_modify_effect(
    stat: StatType,
    delta: i8,
    target: Target,
    context: &EffectContext,
) -> Vec<BattleCommand> {
    vec![BattleCommand::ChangeStatStage {
        target: context.target_side(target),
        stat,
        delta,
    }]
}
