//! Snapshot conversion and storage.
//!
//! A [`GameSnapshot`] is the serializable image of a game: both teams with
//! their creatures and move slots, plus the optional battle phase and tower
//! progress. Stores move snapshots around; the conversion functions here
//! turn them back into domain objects.

use crate::battle::state::{Battle, ReplacementPolicy};
use crate::creature::{Creature, MOVE_SLOTS};
use crate::errors::{SnapshotError, SnapshotResult};
use crate::move_data::{parse_category, parse_type, resolve_effect};
use crate::moves::Move;
use crate::roster::Roster;
use schema::{BattlePhaseSnapshot, CreatureSnapshot, GameSnapshot, MoveSnapshot, TeamSnapshot};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// How saved health and move uses are treated on restore.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreMode {
    /// Keep the saved current health and remaining uses.
    #[default]
    PreserveSaved,
    /// Restore every creature to full health and full uses.
    FreshStart,
}

// --- Domain -> snapshot ---

pub fn move_to_snapshot(move_: &Move) -> MoveSnapshot {
    MoveSnapshot {
        name: move_.name().to_string(),
        move_type: move_.move_type().to_string(),
        category: move_.category().to_string(),
        power: move_.power(),
        accuracy: move_.accuracy(),
        max_uses: move_.max_uses(),
        current_uses: move_.remaining_uses(),
        description: move_.description().to_string(),
    }
}

pub fn creature_to_snapshot(creature: &Creature) -> CreatureSnapshot {
    CreatureSnapshot {
        name: creature.name().to_string(),
        current_health: creature.current_hp(),
        base_stats: *creature.base_stats(),
        types: creature.types().iter().map(ToString::to_string).collect(),
        moves: creature
            .moves()
            .iter()
            .map(|slot| slot.as_ref().map(move_to_snapshot))
            .collect(),
    }
}

pub fn team_to_snapshot(roster: &Roster) -> TeamSnapshot {
    TeamSnapshot {
        name: roster.name().to_string(),
        creatures: roster.iter().map(creature_to_snapshot).collect(),
    }
}

/// Active creatures are always at position 0, so a live battle saves those indices.
pub fn battle_phase_of(battle: &Battle) -> BattlePhaseSnapshot {
    BattlePhaseSnapshot {
        turn: battle.turn(),
        team1_active_index: 0,
        team2_active_index: 0,
        turn_number: battle.turn_number(),
    }
}

// --- Snapshot -> domain ---

pub fn move_from_snapshot(snapshot: &MoveSnapshot, mode: RestoreMode) -> SnapshotResult<Move> {
    let move_type = parse_type(&snapshot.move_type)
        .map_err(|err| SnapshotError::Inconsistent(err.to_string()))?;
    let category = parse_category(&snapshot.category)
        .map_err(|err| SnapshotError::Inconsistent(err.to_string()))?;
    let effect = resolve_effect(&snapshot.name, category, snapshot.power).ok_or_else(|| {
        SnapshotError::Inconsistent(format!("{} has no supported effect", snapshot.name))
    })?;

    let mut move_ = Move::new(
        snapshot.name.clone(),
        move_type,
        category,
        snapshot.power,
        snapshot.accuracy,
        snapshot.max_uses,
        effect,
    )
    .with_description(snapshot.description.clone());

    if mode == RestoreMode::PreserveSaved {
        move_.set_remaining_uses(snapshot.current_uses);
    }
    Ok(move_)
}

/// Rebuild a creature. Empty move slots stay empty at the same positions.
/// The restored creature gets a new identity.
pub fn creature_from_snapshot(
    snapshot: &CreatureSnapshot,
    mode: RestoreMode,
) -> SnapshotResult<Creature> {
    if snapshot.moves.len() > MOVE_SLOTS {
        return Err(SnapshotError::Inconsistent(format!(
            "{} has {} move slots",
            snapshot.name,
            snapshot.moves.len()
        )));
    }

    let types = snapshot
        .types
        .iter()
        .map(|name| parse_type(name).map_err(|err| SnapshotError::Inconsistent(err.to_string())))
        .collect::<SnapshotResult<Vec<_>>>()?;

    let mut creature = Creature::new(snapshot.name.clone(), types, snapshot.base_stats, Vec::new())
        .map_err(|err| SnapshotError::Inconsistent(err.to_string()))?;

    for (slot, entry) in snapshot.moves.iter().enumerate() {
        let move_ = entry
            .as_ref()
            .map(|move_snapshot| move_from_snapshot(move_snapshot, mode))
            .transpose()?;
        creature
            .set_move(slot, move_)
            .map_err(|err| SnapshotError::Inconsistent(err.to_string()))?;
    }

    if mode == RestoreMode::PreserveSaved {
        creature.set_hp(snapshot.current_health);
    }
    Ok(creature)
}

pub fn roster_from_snapshot(snapshot: &TeamSnapshot, mode: RestoreMode) -> SnapshotResult<Roster> {
    let creatures = snapshot
        .creatures
        .iter()
        .map(|creature| creature_from_snapshot(creature, mode))
        .collect::<SnapshotResult<Vec<_>>>()?;
    Roster::with_creatures(snapshot.name.clone(), creatures)
        .map_err(|err| SnapshotError::Inconsistent(err.to_string()))
}

/// Rebuild an in-flight battle: the saved active members are moved to
/// position 0, the saved side is to move and the turn counter carries on.
/// Stat stages start fresh.
pub fn restore_battle(
    mut team1: Roster,
    mut team2: Roster,
    phase: &BattlePhaseSnapshot,
    replacement_policy: ReplacementPolicy,
) -> SnapshotResult<Battle> {
    team1
        .switch_active(phase.team1_active_index)
        .map_err(|err| SnapshotError::Inconsistent(err.to_string()))?;
    team2
        .switch_active(phase.team2_active_index)
        .map_err(|err| SnapshotError::Inconsistent(err.to_string()))?;

    let mut battle = Battle::new(team1, team2, replacement_policy)
        .map_err(|err| SnapshotError::Inconsistent(err.to_string()))?;
    battle.set_turn(phase.turn);
    battle.set_turn_number(phase.turn_number);
    Ok(battle)
}

// --- Codecs ---

pub fn to_json(snapshot: &GameSnapshot) -> SnapshotResult<String> {
    serde_json::to_string_pretty(snapshot).map_err(|err| SnapshotError::Encode(err.to_string()))
}

pub fn from_json(content: &str) -> SnapshotResult<GameSnapshot> {
    serde_json::from_str(content).map_err(|err| SnapshotError::Decode(err.to_string()))
}

/// Compact binary form of a snapshot.
pub fn encode_snapshot(snapshot: &GameSnapshot) -> SnapshotResult<Vec<u8>> {
    postcard::to_allocvec(snapshot).map_err(|err| SnapshotError::Encode(err.to_string()))
}

pub fn decode_snapshot(bytes: &[u8]) -> SnapshotResult<GameSnapshot> {
    postcard::from_bytes(bytes).map_err(|err| SnapshotError::Decode(err.to_string()))
}

// --- Stores ---

/// Durable home for a single game snapshot.
pub trait SnapshotStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> SnapshotResult<()>;

    /// The stored snapshot, or `None` if nothing has been saved yet.
    fn load(&self) -> SnapshotResult<Option<GameSnapshot>>;
}

/// Stores the snapshot as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> SnapshotResult<()> {
        let content = to_json(snapshot)?;
        fs::write(&self.path, content)
            .map_err(|err| SnapshotError::Io(format!("{}: {}", self.path.display(), err)))?;
        tracing::info!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    fn load(&self) -> SnapshotResult<Option<GameSnapshot>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => from_json(&content).map(Some),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(SnapshotError::Io(format!(
                "{}: {}",
                self.path.display(),
                err
            ))),
        }
    }
}

/// Keeps the encoded snapshot in memory. Useful for hosts without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    encoded: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &GameSnapshot) -> SnapshotResult<()> {
        self.encoded = Some(encode_snapshot(snapshot)?);
        Ok(())
    }

    fn load(&self) -> SnapshotResult<Option<GameSnapshot>> {
        self.encoded.as_deref().map(decode_snapshot).transpose()
    }
}
