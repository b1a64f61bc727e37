use crate::creature::{Creature, MOVE_SLOTS};
use crate::errors::{BattleResult, CatalogError, CatalogResult};
use crate::move_data::{build_move, parse_type};
use crate::roster::Roster;
use schema::CreatureRecord;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The catalog bundled with the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.ron");

/// Source of creature definitions. Battles never call this; creatures are
/// built from its records before a battle starts.
pub trait CreatureCatalog {
    fn fetch_creature(&self, id: &str) -> CatalogResult<CreatureRecord>;

    /// Every identifier the catalog can resolve, sorted.
    fn creature_ids(&self) -> Vec<String>;
}

/// In-memory catalog loaded from RON: a map from identifier to creature record.
#[derive(Debug, Clone, Default)]
pub struct RonCatalog {
    creatures: HashMap<String, CreatureRecord>,
}

impl RonCatalog {
    pub fn from_ron_str(content: &str) -> CatalogResult<Self> {
        let entries: HashMap<String, CreatureRecord> =
            ron::from_str(content).map_err(|err| CatalogError::MalformedData(err.to_string()))?;

        let creatures = entries
            .into_iter()
            .map(|(id, record)| (normalize_id(&id), record))
            .collect::<HashMap<_, _>>();
        tracing::debug!(count = creatures.len(), "catalog loaded");

        Ok(Self { creatures })
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|err| CatalogError::Io(format!("{}: {}", path.display(), err)))?;
        Self::from_ron_str(&content)
    }

    pub fn builtin() -> CatalogResult<Self> {
        Self::from_ron_str(BUILTIN_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}

impl CreatureCatalog for RonCatalog {
    fn fetch_creature(&self, id: &str) -> CatalogResult<CreatureRecord> {
        self.creatures
            .get(&normalize_id(id))
            .cloned()
            .ok_or_else(|| CatalogError::CreatureNotFound(id.to_string()))
    }

    fn creature_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.creatures.keys().cloned().collect();
        ids.sort();
        ids
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}

/// Build a fresh, battle-ready creature (full health, full uses) from a
/// catalog record. Moves with no supported effect are skipped and the first
/// four usable ones fill the slots.
pub fn creature_from_record(record: &CreatureRecord) -> CatalogResult<Creature> {
    let types = record
        .types
        .iter()
        .map(|name| parse_type(name))
        .collect::<CatalogResult<Vec<_>>>()?;

    let mut moves = Vec::with_capacity(MOVE_SLOTS);
    for move_record in &record.available_moves {
        if moves.len() == MOVE_SLOTS {
            break;
        }
        match build_move(move_record) {
            Ok(move_) => moves.push(move_),
            Err(CatalogError::UnsupportedMove(name)) => {
                tracing::warn!(creature = %record.name, move_name = %name, "skipping move with no supported effect");
            }
            Err(err) => return Err(err),
        }
    }
    if moves.is_empty() {
        return Err(CatalogError::NoUsableMoves(record.name.clone()));
    }

    Creature::new(record.name.clone(), types, record.base_stats, moves)
        .map_err(|err| CatalogError::MalformedData(err.to_string()))
}

pub fn build_creature<C: CreatureCatalog + ?Sized>(catalog: &C, id: &str) -> CatalogResult<Creature> {
    let record = catalog.fetch_creature(id)?;
    creature_from_record(&record)
}

/// Build a roster from catalog identifiers, in order.
pub fn build_roster<C: CreatureCatalog + ?Sized>(
    catalog: &C,
    name: &str,
    ids: &[&str],
) -> BattleResult<Roster> {
    let creatures = ids
        .iter()
        .map(|id| build_creature(catalog, id))
        .collect::<CatalogResult<Vec<_>>>()?;
    Ok(Roster::with_creatures(name, creatures)?)
}
