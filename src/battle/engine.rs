use crate::battle::calculators::move_hits;
use crate::battle::commands::execute_command_batch;
use crate::battle::move_effects::{BattleMoveEffectExt, EffectContext};
use crate::battle::rng::TurnRng;
use crate::battle::state::{Battle, BattleEvent, BattleOutcome, ReplacementPolicy};
use crate::creature::MOVE_SLOTS;
use crate::errors::{BattleResult, InvariantViolation, RuleViolation, ValidationError};
use crate::moves::Move;
use schema::Side;

/// What happened when the side to move used a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResolution {
    pub attacker: String,
    pub defender: String,
    pub move_name: String,
    pub hit: bool,
    pub damage: u16,
}

/// Check that the side to move may use the move in `slot` and return a copy of it.
/// Nothing is mutated.
pub fn validate_move_choice(battle: &Battle, slot: usize) -> BattleResult<Move> {
    if battle.is_over() {
        return Err(RuleViolation::BattleAlreadyEnded.into());
    }
    if slot >= MOVE_SLOTS {
        return Err(ValidationError::InvalidMoveSlot(slot).into());
    }

    let attacker = battle.active(battle.turn())?;
    let move_used = attacker
        .move_at(slot)
        .ok_or(ValidationError::InvalidMoveSlot(slot))?;
    if !move_used.has_uses() {
        return Err(RuleViolation::NoUsesRemaining {
            move_name: move_used.name().to_string(),
        }
        .into());
    }
    Ok(move_used.clone())
}

/// Resolve one move for the side to move: hit check, effect commands, then
/// use accounting. Faint replacement and the win scan are left to
/// [`settle_action`].
pub fn resolve_move(
    battle: &mut Battle,
    slot: usize,
    rng: &mut TurnRng,
) -> BattleResult<MoveResolution> {
    let move_used = validate_move_choice(battle, slot)?;
    let attacker_side = battle.turn();
    let context = EffectContext::new(attacker_side, move_used);

    let attacker = battle.active(context.attacker)?;
    let attacker_id = attacker.id();
    let attacker_name = attacker.name().to_string();
    let defender_name = battle.active(context.defender)?.name().to_string();

    battle.event_bus_mut().push(BattleEvent::MoveUsed {
        side: attacker_side,
        creature: attacker_name.clone(),
        move_name: context.move_used.name().to_string(),
    });

    let hit = move_hits(
        &context.move_used,
        battle.active_overlay(context.attacker)?,
        battle.active_overlay(context.defender)?,
        rng,
    );

    let mut damage = 0;
    if hit {
        let commands = context
            .move_used
            .effect()
            .apply(&context, battle, rng)?;
        damage = execute_command_batch(commands, battle)?.damage_dealt;
    } else {
        battle.event_bus_mut().push(BattleEvent::MoveMissed {
            attacker: attacker_name.clone(),
            defender: defender_name.clone(),
            move_name: context.move_used.name().to_string(),
        });
    }

    // One use per invocation, hit or miss, after every effect has run.
    let position = battle
        .roster(attacker_side)
        .position_of(attacker_id)
        .ok_or(InvariantViolation::MissingActiveCreature(attacker_side))?;
    if let Some(slot_move) = battle
        .roster_mut(attacker_side)
        .get_mut(position)
        .and_then(|creature| creature.move_at_mut(slot))
    {
        slot_move.use_move();
    }

    Ok(MoveResolution {
        attacker: attacker_name,
        defender: defender_name,
        move_name: context.move_used.name().to_string(),
        hit,
        damage,
    })
}

/// Bring a living member forward for every side whose active creature is
/// fainted. Sides with nobody left are untouched.
pub fn replace_fainted_actives(battle: &mut Battle, rng: &mut TurnRng) -> BattleResult<()> {
    // Defender first so the log reads in the order things happened.
    let order = [battle.turn().opponent(), battle.turn()];
    for side in order {
        if !battle.active(side)?.is_fainted() {
            continue;
        }
        let Some(index) = choose_replacement(battle, side, rng) else {
            continue;
        };
        battle.roster_mut(side).switch_active(index)?;
        let creature = battle.active(side)?.name().to_string();
        tracing::debug!(%side, creature = %creature, index, "replacement sent out");
        battle
            .event_bus_mut()
            .push(BattleEvent::ReplacementSentOut { side, creature });
    }
    Ok(())
}

fn choose_replacement(battle: &Battle, side: Side, rng: &mut TurnRng) -> Option<usize> {
    let roster = battle.roster(side);
    match battle.replacement_policy() {
        ReplacementPolicy::NextLiving => roster.next_living_index(),
        ReplacementPolicy::Random => {
            let living = roster.living_indices();
            if living.is_empty() {
                None
            } else {
                Some(living[rng.pick_index("Replacement Choice", living.len())])
            }
        }
    }
}

/// Run the post-action checks: faint replacement, the win scan, and either
/// ending the battle or passing the turn. Returns the outcome if the battle
/// ended.
pub fn settle_action(battle: &mut Battle, rng: &mut TurnRng) -> BattleResult<Option<BattleOutcome>> {
    replace_fainted_actives(battle, rng)?;

    match battle.scan_for_outcome() {
        Some(outcome) => {
            if outcome == BattleOutcome::Draw {
                tracing::error!(
                    error = %InvariantViolation::BothRostersDefeated,
                    "win detection found no living creature on either side"
                );
            }
            tracing::info!(?outcome, turn = battle.turn_number(), "battle ended");
            battle.end(outcome);
            Ok(Some(outcome))
        }
        None => {
            battle.pass_turn();
            Ok(None)
        }
    }
}
