use crate::BaseStats;
use serde::{Deserialize, Serialize};

/// A move entry as a creature catalog describes it. Type and category are
/// kept as the catalog's own strings and parsed when the move is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    #[serde(default)]
    pub power: Option<u16>,
    #[serde(default)]
    pub accuracy: Option<u8>,
    pub max_uses: u8,
    #[serde(default)]
    pub description: String,
}

/// A creature definition returned by a catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub name: String,
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    pub available_moves: Vec<MoveRecord>,
}
