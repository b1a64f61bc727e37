use crate::battle::engine::{resolve_move, settle_action};
use crate::battle::rng::TurnRng;
use crate::battle::state::{Battle, BattleEvent, BattleOutcome, ReplacementPolicy};
use crate::errors::{BattleResult, RuleViolation, ValidationError};
use crate::roster::Roster;
use schema::Side;

/// A freshly constructed battle and its opening line.
#[derive(Debug, Clone)]
pub struct BattleStart {
    pub battle: Battle,
    pub message: String,
}

/// Result of one successful `use_move` call.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub messages: Vec<String>,
    pub attacker: String,
    pub defender: String,
    pub move_name: String,
    pub hit: bool,
    /// HP actually removed from the defender; 0 on a miss or a non-damaging move.
    pub damage: u16,
    /// Present when this move ended the battle.
    pub report: Option<BattleReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub old_creature: String,
    pub new_creature: String,
    pub message: String,
}

/// Final summary of an ended battle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub winner: Option<Side>,
    /// Display name of the winning roster.
    pub winner_name: Option<String>,
    /// Living creatures left on the winning side (0 on a draw).
    pub remaining_living: usize,
    pub message: String,
}

/// Validate both rosters and construct a battle. No battle is produced if
/// any check fails.
pub fn start_battle(
    team1: Option<Roster>,
    team2: Option<Roster>,
    replacement_policy: ReplacementPolicy,
) -> BattleResult<BattleStart> {
    let team1 = team1.ok_or(ValidationError::MissingRoster(Side::Team1))?;
    let team2 = team2.ok_or(ValidationError::MissingRoster(Side::Team2))?;

    let mut battle = Battle::new(team1, team2, replacement_policy)?;

    let event = BattleEvent::BattleStarted {
        team1: battle.team1().name().to_string(),
        team2: battle.team2().name().to_string(),
    };
    let message = event.format().unwrap_or_default();
    battle.event_bus_mut().push(event);

    tracing::info!(
        team1 = battle.team1().name(),
        team2 = battle.team2().name(),
        team1_size = battle.team1().len(),
        team2_size = battle.team2().len(),
        "battle started"
    );

    Ok(BattleStart { battle, message })
}

/// Drive one turn: the side to move uses the move in `slot`. On error the
/// battle is unchanged.
pub fn use_move(battle: &mut Battle, slot: usize, rng: &mut TurnRng) -> BattleResult<MoveOutcome> {
    let start = battle.events().len();

    let resolution = resolve_move(battle, slot, rng)?;
    let report = match settle_action(battle, rng)? {
        Some(_) => Some(end_battle(battle)?),
        None => None,
    };

    Ok(MoveOutcome {
        messages: battle.events().messages_since(start),
        attacker: resolution.attacker,
        defender: resolution.defender,
        move_name: resolution.move_name,
        hit: resolution.hit,
        damage: resolution.damage,
        report,
    })
}

/// Voluntarily bring the member at `index` of the moving side's roster into
/// the active position. Counts as that side's action for the turn.
pub fn switch_creature(battle: &mut Battle, index: usize) -> BattleResult<SwitchOutcome> {
    if battle.is_over() {
        return Err(RuleViolation::BattleAlreadyEnded.into());
    }

    let side = battle.turn();
    let roster = battle.roster(side);
    let target = roster.get(index).ok_or(ValidationError::InvalidIndex(index))?;
    if target.is_fainted() {
        return Err(RuleViolation::FaintedTarget(index).into());
    }
    if index == 0 {
        return Err(RuleViolation::AlreadyActive(index).into());
    }

    let old_creature = battle.active(side)?.name().to_string();
    battle.roster_mut(side).switch_active(index)?;
    let new_creature = battle.active(side)?.name().to_string();

    let event = BattleEvent::CreatureSwitched {
        side,
        old_creature: old_creature.clone(),
        new_creature: new_creature.clone(),
    };
    let message = event.format().unwrap_or_default();
    battle.event_bus_mut().push(event);
    tracing::debug!(%side, old = %old_creature, new = %new_creature, "voluntary switch");

    battle.pass_turn();

    Ok(SwitchOutcome {
        old_creature,
        new_creature,
        message,
    })
}

/// Build the final report. Pure read, so calling it again returns the same report.
pub fn end_battle(battle: &Battle) -> BattleResult<BattleReport> {
    let outcome = battle.outcome().ok_or(ValidationError::BattleNotEnded)?;

    let report = match outcome {
        BattleOutcome::Winner(side) => {
            let roster = battle.roster(side);
            let remaining_living = roster.living_count();
            BattleReport {
                outcome,
                winner: Some(side),
                winner_name: Some(roster.name().to_string()),
                remaining_living,
                message: format!(
                    "{} ({}) won the battle with {} creature{} still standing!",
                    roster.name(),
                    side,
                    remaining_living,
                    if remaining_living == 1 { "" } else { "s" }
                ),
            }
        }
        BattleOutcome::Draw => BattleReport {
            outcome,
            winner: None,
            winner_name: None,
            remaining_living: 0,
            message: "The battle ended in a draw!".to_string(),
        },
    };
    Ok(report)
}
