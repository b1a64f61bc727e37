use crate::battle::state::{Battle, BattleEvent};
use crate::errors::InvariantViolation;
use schema::{Side, StatType};

/// Atomic commands representing final state changes. Effects only read the
/// battle and return these; the executor is the single place that mutates.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    DealDamage {
        target: Side,
        amount: u16,
    },
    HealCreature {
        target: Side,
        amount: u16,
    },
    ChangeStatStage {
        target: Side,
        stat: StatType,
        delta: i8,
    },
    /// Drag the member at `index` into the active position of `target`.
    ForceSwitch {
        target: Side,
        index: usize,
    },
    EmitEvent(BattleEvent),
}

/// What a batch of commands did, for the use case result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecutionSummary {
    pub damage_dealt: u16,
}

/// Execute a batch of commands in order.
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    battle: &mut Battle,
) -> Result<ExecutionSummary, InvariantViolation> {
    let mut summary = ExecutionSummary::default();
    for command in commands {
        execute_command(command, battle, &mut summary)?;
    }
    Ok(summary)
}

fn execute_command(
    command: BattleCommand,
    battle: &mut Battle,
    summary: &mut ExecutionSummary,
) -> Result<(), InvariantViolation> {
    match command {
        BattleCommand::EmitEvent(event) => {
            battle.event_bus_mut().push(event);
            Ok(())
        }
        BattleCommand::DealDamage { target, amount } => {
            let dealt = execute_deal_damage_command(target, amount, battle)?;
            summary.damage_dealt = summary.damage_dealt.saturating_add(dealt);
            Ok(())
        }
        BattleCommand::HealCreature { target, amount } => {
            let creature = battle.active_mut(target)?;
            let healed = creature.heal(amount);
            let event = BattleEvent::CreatureHealed {
                target: creature.name().to_string(),
                amount: healed,
                new_hp: creature.current_hp(),
            };
            battle.event_bus_mut().push(event);
            Ok(())
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => execute_stat_stage_command(target, stat, delta, battle),
        BattleCommand::ForceSwitch { target, index } => {
            let old_creature = battle.active(target)?.name().to_string();
            battle
                .roster_mut(target)
                .switch_active(index)
                .map_err(|_| InvariantViolation::MissingActiveCreature(target))?;
            let new_creature = battle.active(target)?.name().to_string();
            battle.event_bus_mut().push(BattleEvent::CreatureDraggedOut {
                side: target,
                old_creature,
                new_creature,
            });
            Ok(())
        }
    }
}

/// Apply damage to the active creature of `target`, emitting the damage and
/// faint events. Returns the HP actually lost.
fn execute_deal_damage_command(
    target: Side,
    amount: u16,
    battle: &mut Battle,
) -> Result<u16, InvariantViolation> {
    let creature = battle.active_mut(target)?;
    let dealt = creature.take_damage(amount);
    let name = creature.name().to_string();
    let remaining_hp = creature.current_hp();
    let fainted = creature.is_fainted();

    battle.event_bus_mut().push(BattleEvent::DamageDealt {
        target: name.clone(),
        damage: dealt,
        remaining_hp,
    });

    if fainted {
        battle.event_bus_mut().push(BattleEvent::CreatureFainted {
            side: target,
            creature: name,
        });
    }

    Ok(dealt)
}

fn execute_stat_stage_command(
    target: Side,
    stat: StatType,
    delta: i8,
    battle: &mut Battle,
) -> Result<(), InvariantViolation> {
    let creature = battle.active(target)?;
    let id = creature.id();
    let name = creature.name().to_string();

    let overlay = battle
        .overlay_mut(id)
        .ok_or_else(|| InvariantViolation::MissingOverlay(name.clone()))?;
    let old_stage = overlay.stage(stat);
    let applied = overlay.modify_stage(stat, delta);

    let event = if applied == 0 {
        BattleEvent::StatChangeBlocked {
            target: name,
            stat,
            rising: delta > 0,
        }
    } else {
        BattleEvent::StatStageChanged {
            target: name,
            stat,
            old_stage,
            new_stage: old_stage + applied,
        }
    };
    battle.event_bus_mut().push(event);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::tests::common::{TestCreatureBuilder, create_test_battle};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_deal_damage_command() {
        let mut battle = create_test_battle(
            vec![TestCreatureBuilder::new("Attacker").build()],
            vec![TestCreatureBuilder::new("Defender").with_hp(30).build()],
        );

        let summary = execute_command_batch(
            vec![BattleCommand::DealDamage {
                target: Side::Team2,
                amount: 50,
            }],
            &mut battle,
        )
        .unwrap();

        assert_eq!(summary.damage_dealt, 30);
        assert!(battle.active(Side::Team2).unwrap().is_fainted());
        assert_eq!(
            battle.events().events(),
            &[
                BattleEvent::DamageDealt {
                    target: "Defender".to_string(),
                    damage: 30,
                    remaining_hp: 0,
                },
                BattleEvent::CreatureFainted {
                    side: Side::Team2,
                    creature: "Defender".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_heal_command_is_capped() {
        let mut battle = create_test_battle(
            vec![TestCreatureBuilder::new("Healer").with_max_hp(100).with_hp(90).build()],
            vec![TestCreatureBuilder::new("Other").build()],
        );

        execute_command_batch(
            vec![BattleCommand::HealCreature {
                target: Side::Team1,
                amount: 50,
            }],
            &mut battle,
        )
        .unwrap();

        assert_eq!(battle.active(Side::Team1).unwrap().current_hp(), 100);
        assert_eq!(
            battle.events().events().last(),
            Some(&BattleEvent::CreatureHealed {
                target: "Healer".to_string(),
                amount: 10,
                new_hp: 100,
            })
        );
    }

    #[test]
    fn test_change_stat_stage_command_reports_block_at_limit() {
        let mut battle = create_test_battle(
            vec![TestCreatureBuilder::new("Booster").build()],
            vec![TestCreatureBuilder::new("Other").build()],
        );
        let raise = |delta| BattleCommand::ChangeStatStage {
            target: Side::Team1,
            stat: StatType::Attack,
            delta,
        };

        execute_command_batch(vec![raise(4), raise(4), raise(2)], &mut battle).unwrap();

        assert_eq!(battle.active_overlay(Side::Team1).unwrap().stage(StatType::Attack), 6);
        let events = battle.events().events();
        assert_eq!(
            events[1],
            BattleEvent::StatStageChanged {
                target: "Booster".to_string(),
                stat: StatType::Attack,
                old_stage: 4,
                new_stage: 6,
            }
        );
        assert!(matches!(
            events[2],
            BattleEvent::StatChangeBlocked { rising: true, .. }
        ));
    }

    #[test]
    fn test_force_switch_command_swaps_positions() {
        let mut battle = create_test_battle(
            vec![TestCreatureBuilder::new("Lead").build()],
            vec![
                TestCreatureBuilder::new("First").build(),
                TestCreatureBuilder::new("Second").build(),
                TestCreatureBuilder::new("Third").build(),
            ],
        );

        execute_command_batch(
            vec![BattleCommand::ForceSwitch {
                target: Side::Team2,
                index: 2,
            }],
            &mut battle,
        )
        .unwrap();

        let names: Vec<&str> = battle.team2().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }
}
